//! Ray sampling across the window face.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ShadeError;
use crate::geom::bboxes::BoundingBox;
use crate::geom::ray::Ray;
use crate::shading::window::Window;
use crate::solar::SunAngle;
use crate::{Point, Vector};

/// How the sun angle is turned into a ray direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RayModel {
    /// `(-cos(az), sin(az), -sin(el))`. Facing the window the ray always
    /// descends at least as steeply as 45 degrees, so a high sun still casts
    /// a shadow on the window plane.
    #[default]
    Unscaled,
    /// Horizontal components scaled by cos(elevation): the ray points at the
    /// sun, so a sun near the zenith gives a near-vertical ray.
    Projected,
}

/// Sampling grid and ray model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingSettings {
    /// Distance between sample points along y and z (same unit as geometry).
    pub spacing: f64,
    pub ray_model: RayModel,
}

impl SamplingSettings {
    pub fn validate(&self) -> Result<(), ShadeError> {
        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            return Err(ShadeError::InvalidGeometry(format!(
                "sample spacing must be positive and finite, got {}",
                self.spacing
            )));
        }
        Ok(())
    }

    /// Checks that the ray grid of `window` can be indexed.
    pub fn validate_for(&self, window: &Window) -> Result<(), ShadeError> {
        self.validate()?;
        let (ny, nz) = grid_dims(window, self.spacing);
        if ny.checked_mul(nz).is_none() {
            return Err(ShadeError::InvalidGeometry(format!(
                "sample spacing {} gives too many rays for window {}",
                self.spacing, window.name
            )));
        }
        Ok(())
    }
}

impl Default for SamplingSettings {
    fn default() -> Self {
        Self {
            spacing: 1.0,
            ray_model: RayModel::default(),
        }
    }
}

/// Lowest and highest obstructed sample heights (window z coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeightSpan {
    pub min: f64,
    pub max: f64,
}

impl HeightSpan {
    fn single(z: f64) -> Self {
        Self { min: z, max: z }
    }

    fn union(a: Option<Self>, b: Option<Self>) -> Option<Self> {
        match (a, b) {
            (Some(a), Some(b)) => Some(Self {
                min: a.min.min(b.min),
                max: a.max.max(b.max),
            }),
            (a, None) => a,
            (None, b) => b,
        }
    }
}

/// Outcome of one sampling pass over a window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleResult {
    /// `None` when no ray hits the obstacle.
    pub obstructed: Option<HeightSpan>,
    pub obstructed_rays: usize,
    pub total_rays: usize,
    /// Sun azimuth relative to the window orientation, degrees in [0, 360).
    pub relative_azimuth: f64,
    /// Sun elevation, degrees.
    pub elevation: f64,
}

impl SampleResult {
    pub fn unobstructed(total_rays: usize, relative_azimuth: f64, elevation: f64) -> Self {
        Self {
            obstructed: None,
            obstructed_rays: 0,
            total_rays,
            relative_azimuth,
            elevation,
        }
    }

    pub fn is_obstructed(&self) -> bool {
        self.obstructed.is_some()
    }
}

/// Direction of sunlight entering through a window, in the window frame
/// (outward normal along +x).
pub fn sun_direction(relative_azimuth: f64, elevation: f64, model: RayModel) -> Vector {
    let az = relative_azimuth.to_radians();
    let el = elevation.to_radians();
    let horizontal = match model {
        RayModel::Projected => el.cos(),
        RayModel::Unscaled => 1.0,
    };
    Vector::new(-az.cos() * horizontal, az.sin() * horizontal, -el.sin())
}

/// Number of half-open grid steps in `[lo, hi)`.
fn grid_count(lo: f64, hi: f64, spacing: f64) -> usize {
    let n = ((hi - lo) / spacing).ceil();
    if n.is_finite() && n > 0.0 { n as usize } else { 0 }
}

/// Grid steps along y and z.
fn grid_dims(window: &Window, spacing: f64) -> (usize, usize) {
    let (wmin, wmax) = (window.bounds().min(), window.bounds().max());
    (
        grid_count(wmin.y, wmax.y, spacing),
        grid_count(wmin.z, wmax.z, spacing),
    )
}

/// Number of rays cast for a window with the given settings.
///
/// Saturates for grids rejected by [`SamplingSettings::validate_for`].
pub fn grid_size(window: &Window, settings: &SamplingSettings) -> usize {
    let (ny, nz) = grid_dims(window, settings.spacing);
    ny.saturating_mul(nz)
}

/// Casts one ray per grid point of the window face toward the sun and
/// collects the heights of rays that pass through `obstacle`.
///
/// Pure: identical inputs always give identical outputs. The reduction
/// (count, min, max) is order independent, so the parallel map-reduce is
/// deterministic.
pub fn sample(
    sun: &SunAngle,
    obstacle: &BoundingBox,
    window: &Window,
    orientation: f64,
    settings: &SamplingSettings,
) -> SampleResult {
    let relative_azimuth = sun.relative_azimuth(orientation);
    let direction = sun_direction(relative_azimuth, sun.elevation, settings.ray_model);

    let wmin = window.bounds().min();
    let spacing = settings.spacing;
    let (ny, nz) = grid_dims(window, spacing);
    let total_rays = ny.saturating_mul(nz);

    let (obstructed_rays, obstructed) = (0..total_rays)
        .into_par_iter()
        .filter_map(|idx| {
            let y = wmin.y + (idx / nz) as f64 * spacing;
            let z = wmin.z + (idx % nz) as f64 * spacing;
            let ray = Ray::new(Point::new(wmin.x, y, z), direction);
            ray.intersects_box(obstacle).then_some(z)
        })
        .fold(
            || (0usize, None),
            |(n, span), z| (n + 1, HeightSpan::union(span, Some(HeightSpan::single(z)))),
        )
        .reduce(
            || (0, None),
            |(na, sa), (nb, sb)| (na + nb, HeightSpan::union(sa, sb)),
        );

    SampleResult {
        obstructed,
        obstructed_rays,
        total_rays,
        relative_azimuth,
        elevation: sun.elevation,
    }
}
