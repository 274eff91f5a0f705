use thiserror::Error;

/// Top-level error type for visibility computations.
#[derive(Debug, Error)]
pub enum VisigonError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Numerical(#[from] NumericalError),
}

/// Precondition violations in the caller-supplied geometry.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("vision radius must be positive, got {radius}")]
    NonPositiveRadius { radius: f64 },

    #[error("non-finite value in {0}")]
    NonFiniteInput(&'static str),

    #[error("boundary needs at least 3 vertices, got {len}")]
    BoundaryTooSmall { len: usize },

    #[error("eye ({x}, {y}) is not enclosed by the boundary")]
    EyeOutsideBoundary { x: f64, y: f64 },

    #[error("tolerance must be finite and positive, got {tolerance}")]
    InvalidTolerance { tolerance: f64 },

    #[error("cache threshold must be finite and not negative, got {epsilon_sq}")]
    InvalidCacheEpsilon { epsilon_sq: f64 },
}

/// Configurations where the sight-line arithmetic has no stable answer.
#[derive(Debug, Error, PartialEq)]
pub enum NumericalError {
    #[error("boundary polygon has (near) zero area")]
    DegenerateBoundary,

    #[error("eye ({x}, {y}) lies on an obstructor segment")]
    EyeOnObstructor { x: f64, y: f64 },
}

/// Convenience type alias for results using [`VisigonError`].
pub type Result<T> = std::result::Result<T, VisigonError>;
