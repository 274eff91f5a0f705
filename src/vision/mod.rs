mod cache;
mod candidates;
mod crossings;
mod prune;
mod scene;
mod sweep;

pub use cache::CacheState;

use tracing::debug;

use crate::error::{InputError, NumericalError, Result};
use crate::geometry::{Boundary, VisibilityPolygon};
use crate::math::polygon_2d::{point_in_polygon, sort_around};
use crate::math::{Point2, TOLERANCE};
use crate::obstructor::ObstructorIndex;

use scene::{Candidate, Origin, Scene};

/// Parameters controlling visibility computation and caching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisionConfig {
    /// Distance below which two points, or a point and a segment, coincide.
    pub tolerance: f64,
    /// Squared eye displacement up to which a cached polygon is reused.
    pub cache_epsilon_sq: f64,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            tolerance: TOLERANCE,
            cache_epsilon_sq: 1.0,
        }
    }
}

impl VisionConfig {
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn with_cache_epsilon_sq(mut self, cache_epsilon_sq: f64) -> Self {
        self.cache_epsilon_sq = cache_epsilon_sq;
        self
    }

    /// Checks that the tolerance is finite and positive and that the cache
    /// threshold is finite and not negative.
    ///
    /// # Errors
    ///
    /// Returns `InputError::InvalidTolerance` or
    /// `InputError::InvalidCacheEpsilon` naming the offending value.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(InputError::InvalidTolerance {
                tolerance: self.tolerance,
            }
            .into());
        }
        if !self.cache_epsilon_sq.is_finite() || self.cache_epsilon_sq < 0.0 {
            return Err(InputError::InvalidCacheEpsilon {
                epsilon_sq: self.cache_epsilon_sq,
            }
            .into());
        }
        Ok(())
    }
}

/// A polygonal field of view over a fixed set of obstructors.
///
/// The last result is cached; see [`CacheState`] for when it is reused.
#[derive(Debug, Clone, Default)]
pub struct Vision {
    obstructors: ObstructorIndex,
    config: VisionConfig,
    cache: Option<CacheState>,
}

impl Vision {
    /// Creates a vision object over the given obstructor polylines.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NonFiniteInput` if a vertex is NaN or infinite.
    pub fn new<P: AsRef<[Point2]>>(obstructors: &[P]) -> Result<Self> {
        Self::with_config(obstructors, VisionConfig::default())
    }

    /// Creates a vision object with explicit parameters.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NonFiniteInput` if a vertex is NaN or infinite,
    /// or the error of [`VisionConfig::validate`].
    pub fn with_config<P: AsRef<[Point2]>>(obstructors: &[P], config: VisionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            obstructors: ObstructorIndex::build(obstructors)?,
            config,
            cache: None,
        })
    }

    /// Replaces the obstructors. Any cached polygon is discarded.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NonFiniteInput` if a vertex is NaN or infinite;
    /// the previous obstructors stay in place in that case.
    pub fn set_obstructors<P: AsRef<[Point2]>>(&mut self, obstructors: &[P]) -> Result<()> {
        self.obstructors = ObstructorIndex::build(obstructors)?;
        self.invalidate();
        Ok(())
    }

    #[must_use]
    pub fn obstructors(&self) -> &ObstructorIndex {
        &self.obstructors
    }

    #[must_use]
    pub fn config(&self) -> &VisionConfig {
        &self.config
    }

    /// The cached result, if any.
    #[must_use]
    pub fn cached(&self) -> Option<&CacheState> {
        self.cache.as_ref()
    }

    /// Discards the cached polygon.
    pub fn invalidate(&mut self) {
        if self.cache.take().is_some() {
            debug!("vision cache invalidated");
        }
    }

    /// Returns the visibility polygon for `eye`, reusing the cached one while
    /// it is still fresh. A failed computation leaves nothing cached.
    ///
    /// # Errors
    ///
    /// See [`compute_visibility`].
    pub fn get_vision(
        &mut self,
        eye: Point2,
        radius: f64,
        boundary: &Boundary,
    ) -> Result<&VisibilityPolygon> {
        let state = match self.cache.take() {
            Some(state) if !state.is_stale(&eye, radius, self.config.cache_epsilon_sq) => {
                debug!(x = eye.x, y = eye.y, "vision cache hit");
                state
            }
            _ => CacheState::new(
                eye,
                radius,
                compute_visibility(eye, radius, boundary, &self.obstructors, &self.config)?,
            ),
        };
        Ok(self.cache.insert(state).polygon())
    }

    /// Recomputes the visibility polygon unconditionally and caches it.
    ///
    /// Normal callers want [`Vision::get_vision`].
    ///
    /// # Errors
    ///
    /// See [`compute_visibility`].
    pub fn calculate(
        &mut self,
        eye: Point2,
        radius: f64,
        boundary: &Boundary,
    ) -> Result<&VisibilityPolygon> {
        let polygon = compute_visibility(eye, radius, boundary, &self.obstructors, &self.config)?;
        Ok(self.cache.insert(CacheState::new(eye, radius, polygon)).polygon())
    }
}

/// Computes the region visible from `eye` within `radius` and `boundary`,
/// occluded by the segments of `index`.
///
/// # Errors
///
/// Returns an `InputError` if `config` is invalid, if `eye` or `radius` is
/// not finite, if `radius <= 0`, or if `eye` is not strictly inside
/// `boundary`. Returns
/// `NumericalError::EyeOnObstructor` if `eye` lies on an obstructor segment.
pub fn compute_visibility(
    eye: Point2,
    radius: f64,
    boundary: &Boundary,
    index: &ObstructorIndex,
    config: &VisionConfig,
) -> Result<VisibilityPolygon> {
    config.validate()?;
    validate(&eye, radius, boundary, config.tolerance)?;

    let tolerance = config.tolerance;
    let tol_sq = tolerance * tolerance;

    // Step 1: prune obstructors to the vision radius.
    let scene = Scene::new(eye, radius, tolerance, index, boundary);
    if scene.near.iter().any(|obs| obs.segment.dist_sq_to(&eye) <= tol_sq) {
        return Err(NumericalError::EyeOnObstructor { x: eye.x, y: eye.y }.into());
    }

    // Step 2: directly visible obstructor and boundary vertices.
    let visible = candidates::collect(&scene, index);

    // Steps 3-4: crossings of obstructors with the boundary and with each
    // other, unless something else hides them.
    let mut found = crossings::find_all(&scene);
    found.extend(crossings::find_between_obstructors(&scene));
    let crossings = crossings::retain_visible(&scene, found);

    // Step 5: merge and sort around the eye.
    let mut vertices: Vec<Candidate> = Vec::with_capacity(visible.len() + crossings.len());
    let merged = visible.into_iter().chain(crossings.iter().map(|&point| Candidate {
        point,
        origin: Origin::Crossing,
    }));
    for candidate in merged {
        if !vertices
            .iter()
            .any(|v| (v.point - candidate.point).norm_squared() <= tol_sq)
        {
            vertices.push(candidate);
        }
    }
    sort_around(&mut vertices, &eye, |c| c.point);

    // Step 6: shadow-edge sweep.
    let decisions = sweep::classify(&scene, &vertices);
    let points = sweep::assemble(&vertices, &decisions, tolerance);

    debug!(
        x = eye.x,
        y = eye.y,
        radius,
        near = scene.near.len(),
        crossings = crossings.len(),
        candidates = vertices.len(),
        output = points.len(),
        "visibility computed"
    );

    Ok(VisibilityPolygon::new(points))
}

fn validate(eye: &Point2, radius: f64, boundary: &Boundary, tolerance: f64) -> Result<()> {
    if !eye.x.is_finite() || !eye.y.is_finite() {
        return Err(InputError::NonFiniteInput("eye").into());
    }
    if !radius.is_finite() {
        return Err(InputError::NonFiniteInput("radius").into());
    }
    if radius <= 0.0 {
        return Err(InputError::NonPositiveRadius { radius }.into());
    }
    let on_edge = boundary.edges().any(|e| e.contains(eye, tolerance));
    if on_edge || !point_in_polygon(eye, boundary.points()) {
        return Err(InputError::EyeOutsideBoundary { x: eye.x, y: eye.y }.into());
    }
    Ok(())
}
