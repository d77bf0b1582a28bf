//! Rail positions sent to the automation controller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::shading::state::ShadeState;
use crate::shading::window::Window;

/// How the bottom rail position is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RailConvention {
    /// Both rails report the covered percent measured from the window top.
    Direct,
    /// The bottom-up rail reports its position measured from the window
    /// bottom: `100 - bottom%`. An unobstructed window therefore reports
    /// `{top: 0, bottom: 100}`.
    #[default]
    InvertBottom,
}

/// Integer rail positions for one window, 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RailPositions {
    pub top: u8,
    pub bottom: u8,
}

impl RailPositions {
    pub fn from_state(state: &ShadeState, convention: RailConvention) -> Self {
        let pct = state.percentages();
        let bottom = match convention {
            RailConvention::Direct => pct.bottom,
            RailConvention::InvertBottom => 100 - pct.bottom,
        };
        Self {
            top: pct.top,
            bottom,
        }
    }
}

/// Builds the outbound payload: window name -> rail positions.
pub fn payload(
    states: &BTreeMap<String, ShadeState>,
    convention: RailConvention,
) -> BTreeMap<String, RailPositions> {
    states
        .iter()
        .map(|(name, state)| (name.clone(), RailPositions::from_state(state, convention)))
        .collect()
}

/// Routes a payload to rail identifiers: rail id -> position.
///
/// Windows missing from `positions` are skipped. When two windows share a
/// rail id, the later window in `windows` wins.
pub fn by_rail(
    positions: &BTreeMap<String, RailPositions>,
    windows: &[Window],
) -> BTreeMap<String, u8> {
    let mut routed = BTreeMap::new();
    for window in windows {
        if let Some(p) = positions.get(&window.name) {
            routed.insert(window.top_rail_id.clone(), p.top);
            routed.insert(window.bottom_rail_id.clone(), p.bottom);
        }
    }
    routed
}
