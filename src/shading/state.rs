use serde::Serialize;

use crate::error::ShadeError;
use crate::shading::sampler::SampleResult;
use crate::shading::window::Window;

/// How far each rail of a window shade must travel, as fractions of the
/// window height.
///
/// - `top`: covered fraction measured down from the window top.
/// - `bottom`: fraction from the window top down to the lowest obstructed
///   sample, the reference point of the bottom-up rail.
///
/// Both are in [0, 1]. `top <= bottom` holds for every sampled state but is
/// not relied on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShadeState {
    pub top: f64,
    pub bottom: f64,
}

/// [`ShadeState`] as whole percents (truncated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShadePercent {
    pub top: u8,
    pub bottom: u8,
}

impl ShadeState {
    /// Nothing to cover.
    pub fn open() -> Self {
        Self {
            top: 0.0,
            bottom: 0.0,
        }
    }

    pub fn from_sample(sample: &SampleResult, window: &Window) -> Result<Self, ShadeError> {
        let height = window.height();
        if height <= 0.0 {
            return Err(ShadeError::InvalidGeometry(format!(
                "window {} must have a positive height, got {height}",
                window.name
            )));
        }

        let Some(span) = sample.obstructed else {
            return Ok(Self::open());
        };

        let top_z = window.bounds().max().z;
        Ok(Self {
            top: ((top_z - span.max) / height).clamp(0.0, 1.0),
            bottom: ((top_z - span.min) / height).clamp(0.0, 1.0),
        })
    }

    /// Converts fractions to integer percents, truncating toward zero.
    pub fn percentages(&self) -> ShadePercent {
        ShadePercent {
            top: to_percent(self.top),
            bottom: to_percent(self.bottom),
        }
    }
}

fn to_percent(fraction: f64) -> u8 {
    (fraction.clamp(0.0, 1.0) * 100.0).floor() as u8
}
