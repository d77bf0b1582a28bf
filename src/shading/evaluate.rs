use std::collections::BTreeMap;

use log::debug;
use rayon::prelude::*;

use crate::config::ShadeConfig;
use crate::error::ShadeError;
use crate::shading::sampler::{self, SampleResult};
use crate::shading::state::ShadeState;
use crate::shading::window::Window;
use crate::solar::SunAngle;

/// Sampler output and the shade state derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowEvaluation {
    pub sample: SampleResult,
    pub state: ShadeState,
}

/// Evaluates a single window.
///
/// With the sun at or below the horizon no ray is cast and the window is
/// reported unobstructed.
pub fn evaluate_window(
    sun: &SunAngle,
    config: &ShadeConfig,
    window: &Window,
) -> Result<WindowEvaluation, ShadeError> {
    let orientation = config.window_orientation();
    let sample = if sun.is_above_horizon() {
        sampler::sample(sun, config.desk(), window, orientation, config.sampling())
    } else {
        debug!(
            "{}: sun below horizon (elevation {:.2}), skipping rays",
            window.name, sun.elevation
        );
        SampleResult::unobstructed(
            sampler::grid_size(window, config.sampling()),
            sun.relative_azimuth(orientation),
            sun.elevation,
        )
    };
    let state = ShadeState::from_sample(&sample, window)?;
    debug!(
        "{}: {}/{} rays obstructed, top={:.3} bottom={:.3}",
        window.name, sample.obstructed_rays, sample.total_rays, state.top, state.bottom
    );
    Ok(WindowEvaluation { sample, state })
}

/// Evaluates every configured window for one sun position.
///
/// Windows are independent and evaluated in parallel.
pub fn evaluate(
    sun: &SunAngle,
    config: &ShadeConfig,
) -> Result<BTreeMap<String, ShadeState>, ShadeError> {
    config
        .windows()
        .par_iter()
        .map(|w| evaluate_window(sun, config, w).map(|e| (w.name.clone(), e.state)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_reference_facing_sun() -> Result<(), ShadeError> {
        let cfg = ShadeConfig::reference()?;
        let states = evaluate(&SunAngle::new(150.0, 30.0), &cfg)?;
        assert_eq!(states.len(), 2);
        let w1 = states["Window1"];
        assert!(w1.top > 0.0 && w1.top < 1.0);
        assert_eq!(states["Window2"], ShadeState::open());
        Ok(())
    }

    #[test]
    fn test_below_horizon_is_open() -> Result<(), ShadeError> {
        let cfg = ShadeConfig::reference()?;
        let w = &cfg.windows()[0];
        let e = evaluate_window(&SunAngle::new(150.0, -5.0), &cfg, w)?;
        assert_eq!(e.state, ShadeState::open());
        assert_eq!(e.sample.obstructed_rays, 0);
        assert_eq!(e.sample.total_rays, 1288);
        assert_eq!(e.sample.relative_azimuth, 0.0);
        Ok(())
    }

    #[test]
    fn test_evaluate_is_repeatable() -> Result<(), ShadeError> {
        let cfg = ShadeConfig::reference()?;
        let sun = SunAngle::new(180.0, 20.0);
        assert_eq!(evaluate(&sun, &cfg)?, evaluate(&sun, &cfg)?);
        Ok(())
    }
}
