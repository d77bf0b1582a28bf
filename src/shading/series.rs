//! Diagnostic time series: shade states over a range of timestamps.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, FixedOffset};
use log::info;
use rayon::prelude::*;
use serde::Serialize;

use crate::config::ShadeConfig;
use crate::error::ShadeError;
use crate::shading::evaluate::evaluate_window;
use crate::solar::SunPositionProvider;

/// Inclusive range of timestamps with a fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    step: Duration,
}

impl TimeRange {
    pub fn new(
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
        step: Duration,
    ) -> Result<Self, ShadeError> {
        if step <= Duration::zero() {
            return Err(ShadeError::InvalidTimeRange(format!(
                "step must be positive, got {step}"
            )));
        }
        if end < start {
            return Err(ShadeError::InvalidTimeRange(format!(
                "end {end} is before start {start}"
            )));
        }
        Ok(Self { start, end, step })
    }

    pub fn timestamps(&self) -> Vec<DateTime<FixedOffset>> {
        let mut out = Vec::new();
        let mut t = self.start;
        while t <= self.end {
            out.push(t);
            t += self.step;
        }
        out
    }
}

/// One window at one timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesRecord {
    pub timestamp: DateTime<FixedOffset>,
    pub window: String,
    pub top: f64,
    pub bottom: f64,
    pub obstructed_rays: usize,
    pub relative_azimuth: f64,
    pub elevation: f64,
}

/// Evaluates all windows at every timestamp of `range`.
///
/// Records are ordered by timestamp, then by window order in the config.
pub fn generate_time_series(
    config: &ShadeConfig,
    provider: &dyn SunPositionProvider,
    range: &TimeRange,
) -> Result<Vec<TimeSeriesRecord>> {
    let timestamps = range.timestamps();
    info!(
        "Time series: {} timestamps x {} windows",
        timestamps.len(),
        config.windows().len()
    );

    let per_step: Vec<Vec<TimeSeriesRecord>> = timestamps
        .par_iter()
        .map(|&at| -> Result<Vec<TimeSeriesRecord>> {
            let sun = provider
                .sun_angle(&config.site, at)
                .with_context(|| format!("Sun position lookup failed at {at}"))?;
            config
                .windows()
                .iter()
                .map(|w| -> Result<TimeSeriesRecord> {
                    let e = evaluate_window(&sun, config, w)?;
                    Ok(TimeSeriesRecord {
                        timestamp: at,
                        window: w.name.clone(),
                        top: e.state.top,
                        bottom: e.state.bottom,
                        obstructed_rays: e.sample.obstructed_rays,
                        relative_azimuth: e.sample.relative_azimuth,
                        elevation: e.sample.elevation,
                    })
                })
                .collect()
        })
        .collect::<Result<_>>()?;

    Ok(per_step.into_iter().flatten().collect())
}

/// Writes records as a fixed-width text table.
pub fn write_table<W: Write>(records: &[TimeSeriesRecord], out: &mut W) -> std::io::Result<()> {
    writeln!(
        out,
        "{:>25} {:>10} {:>8} {:>11} {:>10} {:>16} {:>9}",
        "Timestamp", "Window", "Top Rail", "Bottom Rail", "Shady Rays", "Relative Azimuth", "Elevation"
    )?;
    for r in records {
        writeln!(
            out,
            "{:>25} {:>10} {:>8.3} {:>11.3} {:>10} {:>16.2} {:>9.2}",
            r.timestamp.format("%Y-%m-%d %H:%M:%S%:z").to_string(),
            r.window,
            r.top,
            r.bottom,
            r.obstructed_rays,
            r.relative_azimuth,
            r.elevation
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solar::{FixedSun, SpencerSun, SunAngle};
    use chrono::TimeZone;

    fn pst(h: u32, m: u32) -> DateTime<FixedOffset> {
        FixedOffset::west_opt(8 * 3600)
            .unwrap()
            .with_ymd_and_hms(2023, 11, 29, h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_time_range_inclusive() -> Result<()> {
        let range = TimeRange::new(pst(6, 0), pst(21, 0), Duration::minutes(15))?;
        let ts = range.timestamps();
        assert_eq!(ts.len(), 61);
        assert_eq!(ts[0], pst(6, 0));
        assert_eq!(ts[60], pst(21, 0));
        Ok(())
    }

    #[test]
    fn test_time_range_invalid() {
        assert!(TimeRange::new(pst(6, 0), pst(7, 0), Duration::zero()).is_err());
        assert!(TimeRange::new(pst(8, 0), pst(7, 0), Duration::minutes(5)).is_err());
    }

    #[test]
    fn test_series_order() -> Result<()> {
        let cfg = ShadeConfig::reference()?;
        let range = TimeRange::new(pst(9, 0), pst(10, 0), Duration::minutes(30))?;
        let records = generate_time_series(&cfg, &SpencerSun, &range)?;
        assert_eq!(records.len(), 6);
        let names: Vec<&str> = records.iter().map(|r| r.window.as_str()).collect();
        assert_eq!(names, ["Window1", "Window2", "Window1", "Window2", "Window1", "Window2"]);
        assert!(records.windows(2).all(|p| p[0].timestamp <= p[1].timestamp));
        Ok(())
    }

    #[test]
    fn test_series_fixed_sun_matches_single_evaluation() -> Result<()> {
        let cfg = ShadeConfig::reference()?;
        let sun = SunAngle::new(150.0, 30.0);
        let range = TimeRange::new(pst(12, 0), pst(12, 0), Duration::minutes(1))?;
        let records = generate_time_series(&cfg, &FixedSun(sun), &range)?;
        let states = crate::shading::evaluate(&sun, &cfg)?;
        assert_eq!(records[0].top, states["Window1"].top);
        assert_eq!(records[0].bottom, states["Window1"].bottom);
        assert!(records[0].obstructed_rays > 0);
        assert_eq!(records[0].relative_azimuth, 0.0);
        Ok(())
    }

    struct FailingSun;

    impl SunPositionProvider for FailingSun {
        fn sun_angle(
            &self,
            _site: &crate::solar::Site,
            _at: DateTime<FixedOffset>,
        ) -> Result<SunAngle> {
            anyhow::bail!("provider offline")
        }
    }

    #[test]
    fn test_provider_failure_propagates() -> Result<()> {
        let cfg = ShadeConfig::reference()?;
        let range = TimeRange::new(pst(9, 0), pst(10, 0), Duration::minutes(30))?;
        let err = generate_time_series(&cfg, &FailingSun, &range).unwrap_err();
        assert!(format!("{err:#}").contains("provider offline"));
        Ok(())
    }

    #[test]
    fn test_write_table() -> Result<()> {
        let record = TimeSeriesRecord {
            timestamp: pst(12, 0),
            window: "Window1".to_string(),
            top: 0.5,
            bottom: 1.0,
            obstructed_rays: 432,
            relative_azimuth: 0.0,
            elevation: 10.0,
        };
        let mut buf = Vec::new();
        write_table(&[record], &mut buf)?;
        let text = String::from_utf8(buf)?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Shady Rays"));
        assert!(lines[1].contains("2023-11-29 12:00:00-08:00"));
        assert!(lines[1].contains("432"));
        Ok(())
    }
}
