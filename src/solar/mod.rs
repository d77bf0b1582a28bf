//! Sun position as seen from the site.
//!
//! The shading core only needs an azimuth/elevation pair. Where that pair
//! comes from is hidden behind [`SunPositionProvider`].

pub mod position;
pub mod provider;

pub use position::SunAngle;
pub use provider::{FixedSun, SpencerSun, SunPositionProvider};

use serde::{Deserialize, Serialize};

use crate::error::ShadeError;

/// Geographic location of the building.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Latitude in degrees (positive north).
    pub latitude: f64,
    /// Longitude in degrees (positive east).
    pub longitude: f64,
    /// Offset of the local clock from UTC in hours (e.g. -8 for PST).
    pub utc_offset_hours: f64,
}

impl Site {
    /// Checks coordinate ranges and that the UTC offset is a real one
    /// (within +/-14 hours).
    pub fn validate(&self) -> Result<(), ShadeError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ShadeError::InvalidConfig(format!(
                "latitude must be within [-90, 90], got {}",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ShadeError::InvalidConfig(format!(
                "longitude must be within [-180, 180], got {}",
                self.longitude
            )));
        }
        if !(-14.0..=14.0).contains(&self.utc_offset_hours) {
            return Err(ShadeError::InvalidConfig(format!(
                "UTC offset must be within [-14, 14] hours, got {}",
                self.utc_offset_hours
            )));
        }
        Ok(())
    }

    /// Portland, OR.
    pub fn portland() -> Self {
        Self {
            latitude: 45.5051,
            longitude: -122.6750,
            utc_offset_hours: -8.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portland_is_valid() {
        assert!(Site::portland().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_site() {
        let base = Site::portland();
        for site in [
            Site { latitude: -91.0, ..base },
            Site { longitude: 181.0, ..base },
            Site { utc_offset_hours: -15.0, ..base },
            Site { utc_offset_hours: f64::NAN, ..base },
        ] {
            assert!(
                matches!(site.validate(), Err(ShadeError::InvalidConfig(_))),
                "Accepted {site:?}"
            );
        }
    }
}
