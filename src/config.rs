//! Installation configuration: site, desk, windows, sampling.
//!
//! Loaded once from JSON and validated before any evaluation. The validated
//! [`ShadeConfig`] is immutable and shared by every evaluation.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::Point;
use crate::error::ShadeError;
use crate::geom::bboxes::BoundingBox;
use crate::shading::{RailConvention, SamplingSettings, Window};
use crate::solar::Site;

/// Box corners as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxSpec {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoxSpec {
    fn to_bbox(self) -> Result<BoundingBox, ShadeError> {
        BoundingBox::new(Point::from_array(self.min), Point::from_array(self.max))
    }

    fn from_bbox(bbox: &BoundingBox) -> Self {
        Self {
            min: bbox.min().to_array(),
            max: bbox.max().to_array(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSpec {
    pub name: String,
    pub min: [f64; 3],
    pub max: [f64; 3],
    pub top_rail_id: String,
    pub bottom_rail_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub rail_convention: RailConvention,
}

/// On-disk layout of the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub site: Site,
    /// Compass bearing the windows face, degrees.
    pub window_orientation: f64,
    pub desk: BoxSpec,
    pub windows: Vec<WindowSpec>,
    #[serde(default)]
    pub sampling: SamplingSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadeConfig {
    pub site: Site,
    window_orientation: f64,
    desk: BoundingBox,
    windows: Vec<Window>,
    sampling: SamplingSettings,
    pub output: OutputSettings,
}

impl ShadeConfig {
    pub fn new(
        site: Site,
        window_orientation: f64,
        desk: BoundingBox,
        windows: Vec<Window>,
        sampling: SamplingSettings,
        output: OutputSettings,
    ) -> Result<Self, ShadeError> {
        if !window_orientation.is_finite() {
            return Err(ShadeError::InvalidConfig(format!(
                "window orientation must be finite, got {window_orientation}"
            )));
        }
        site.validate()?;
        if windows.is_empty() {
            return Err(ShadeError::InvalidConfig("no windows configured".to_string()));
        }
        let mut names = HashSet::new();
        let mut rails = HashSet::new();
        for w in &windows {
            if !names.insert(w.name.as_str()) {
                return Err(ShadeError::InvalidConfig(format!(
                    "duplicate window name: {}",
                    w.name
                )));
            }
            for rail in [&w.top_rail_id, &w.bottom_rail_id] {
                if !rails.insert(rail.as_str()) {
                    warn!("Rail {rail} is shared by more than one window shade");
                }
            }
        }
        sampling.validate()?;
        for w in &windows {
            sampling.validate_for(w)?;
        }

        Ok(Self {
            site,
            window_orientation,
            desk,
            windows,
            sampling,
            output,
        })
    }

    /// The office installation the tool was written for (Portland, OR).
    pub fn reference() -> Result<Self, ShadeError> {
        Self::try_from(ConfigFile::reference())
    }

    /// Reads and validates a JSON config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config: {}", path.display()))?;
        let raw: ConfigFile = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Self::try_from(raw).with_context(|| format!("Invalid config: {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: ConfigFile = serde_json::from_str(json).context("Failed to parse config")?;
        Ok(Self::try_from(raw)?)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&ConfigFile::from(self))
            .context("Failed to serialize config to string")
    }

    pub fn window_orientation(&self) -> f64 {
        self.window_orientation
    }

    pub fn desk(&self) -> &BoundingBox {
        &self.desk
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn window(&self, name: &str) -> Option<&Window> {
        self.windows.iter().find(|w| w.name == name)
    }

    pub fn sampling(&self) -> &SamplingSettings {
        &self.sampling
    }
}

impl ConfigFile {
    pub fn reference() -> Self {
        Self {
            site: Site::portland(),
            window_orientation: 150.0,
            desk: BoxSpec {
                min: [60.0 + 12.0, 108.0, 30.0],
                max: [122.0 - 12.0, 132.0, 54.0],
            },
            windows: vec![
                WindowSpec {
                    name: "Window1".to_string(),
                    min: [148.0, 98.0, 44.0],
                    max: [148.0, 126.0, 90.0],
                    top_rail_id: "office_1_bottom_up".to_string(),
                    bottom_rail_id: "office_1_top_down".to_string(),
                },
                WindowSpec {
                    name: "Window2".to_string(),
                    min: [159.0, 18.0, 24.0],
                    max: [159.0, 59.0, 90.0],
                    top_rail_id: "office_2_bottom_up".to_string(),
                    bottom_rail_id: "office_2_top_down".to_string(),
                },
            ],
            sampling: SamplingSettings::default(),
            output: OutputSettings::default(),
        }
    }
}

impl TryFrom<ConfigFile> for ShadeConfig {
    type Error = ShadeError;

    fn try_from(raw: ConfigFile) -> Result<Self, ShadeError> {
        let desk = raw.desk.to_bbox()?;
        let windows = raw
            .windows
            .iter()
            .map(|w| {
                let bounds = BoundingBox::new(Point::from_array(w.min), Point::from_array(w.max))?;
                Window::new(&w.name, bounds, &w.top_rail_id, &w.bottom_rail_id)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(
            raw.site,
            raw.window_orientation,
            desk,
            windows,
            raw.sampling,
            raw.output,
        )
    }
}

impl From<&ShadeConfig> for ConfigFile {
    fn from(cfg: &ShadeConfig) -> Self {
        Self {
            site: cfg.site,
            window_orientation: cfg.window_orientation,
            desk: BoxSpec::from_bbox(&cfg.desk),
            windows: cfg
                .windows
                .iter()
                .map(|w| WindowSpec {
                    name: w.name.clone(),
                    min: w.bounds().min().to_array(),
                    max: w.bounds().max().to_array(),
                    top_rail_id: w.top_rail_id.clone(),
                    bottom_rail_id: w.bottom_rail_id.clone(),
                })
                .collect(),
            sampling: cfg.sampling,
            output: cfg.output,
        }
    }
}
