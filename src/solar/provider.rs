use std::f64::consts::PI;

use anyhow::Result;
use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};

use super::{Site, SunAngle};

/// Source of sun positions for a site and an instant.
///
/// Implementations must be thread-safe, time series are evaluated in parallel.
pub trait SunPositionProvider: Send + Sync {
    fn sun_angle(&self, site: &Site, at: DateTime<FixedOffset>) -> Result<SunAngle>;
}

/// Always returns the same sun position.
#[derive(Debug, Clone, Copy)]
pub struct FixedSun(pub SunAngle);

impl SunPositionProvider for FixedSun {
    fn sun_angle(&self, _site: &Site, _at: DateTime<FixedOffset>) -> Result<SunAngle> {
        Ok(self.0)
    }
}

/// Approximate solar position (Spencer declination and equation of time).
///
/// Accurate to roughly one degree, no refraction correction.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpencerSun;

impl SpencerSun {
    /// Calculates the solar position for a UTC instant.
    pub fn calculate(latitude: f64, longitude: f64, utc: DateTime<Utc>) -> SunAngle {
        let lat = latitude.to_radians();
        let utc_hours =
            utc.hour() as f64 + utc.minute() as f64 / 60.0 + utc.second() as f64 / 3600.0;

        // Fractional year (Spencer)
        let gamma = 2.0 * PI / 365.0 * (utc.ordinal() as f64 - 1.0 + (utc_hours - 12.0) / 24.0);

        // Equation of time in minutes
        let eot = 229.18
            * (0.000075 + 0.001868 * gamma.cos()
                - 0.032077 * gamma.sin()
                - 0.014615 * (2.0 * gamma).cos()
                - 0.040849 * (2.0 * gamma).sin());

        // Solar declination (Spencer approximation)
        let declination = 0.006918 - 0.399912 * gamma.cos() + 0.070257 * gamma.sin()
            - 0.006758 * (2.0 * gamma).cos()
            + 0.000907 * (2.0 * gamma).sin()
            - 0.002697 * (3.0 * gamma).cos()
            + 0.00148 * (3.0 * gamma).sin();

        // True solar time in minutes, then hour angle (15 degrees per hour from solar noon)
        let solar_minutes = utc_hours * 60.0 + eot + 4.0 * longitude;
        let hour_angle = (solar_minutes / 4.0 - 180.0).to_radians();

        let sin_alt =
            lat.sin() * declination.sin() + lat.cos() * declination.cos() * hour_angle.cos();
        let elevation = sin_alt.clamp(-1.0, 1.0).asin().to_degrees();

        let cos_azimuth = (declination.sin() * lat.cos()
            - declination.cos() * lat.sin() * hour_angle.cos())
            / elevation.to_radians().cos().max(1e-10);

        let mut azimuth = cos_azimuth.clamp(-1.0, 1.0).acos().to_degrees();
        // Afternoon: the sun is west of the meridian
        if hour_angle.sin() > 0.0 {
            azimuth = 360.0 - azimuth;
        }

        SunAngle { azimuth, elevation }
    }
}

impl SunPositionProvider for SpencerSun {
    fn sun_angle(&self, site: &Site, at: DateTime<FixedOffset>) -> Result<SunAngle> {
        if !(-90.0..=90.0).contains(&site.latitude) {
            anyhow::bail!("Latitude out of range: {}", site.latitude);
        }
        Ok(Self::calculate(
            site.latitude,
            site.longitude,
            at.with_timezone(&Utc),
        ))
    }
}
