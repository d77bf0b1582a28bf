use serde::{Deserialize, Serialize};

/// Apparent sun position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunAngle {
    /// Compass bearing in degrees from north, clockwise (0=N, 90=E, 180=S, 270=W).
    pub azimuth: f64,
    /// Angle above the horizon in degrees (0 = horizon, 90 = zenith).
    pub elevation: f64,
}

impl SunAngle {
    pub fn new(azimuth: f64, elevation: f64) -> Self {
        Self { azimuth, elevation }
    }

    /// Azimuth relative to a window facing `orientation` degrees, in [0, 360).
    pub fn relative_azimuth(&self, orientation: f64) -> f64 {
        let rel = (self.azimuth - orientation).rem_euclid(360.0);
        // rem_euclid may round up to exactly 360 for tiny negative inputs
        if rel >= 360.0 { 0.0 } else { rel }
    }

    /// Returns true if the sun is above the horizon.
    pub fn is_above_horizon(&self) -> bool {
        self.elevation > 0.0
    }
}
