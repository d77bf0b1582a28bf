//! Window shading: which part of a window must be covered so that direct
//! sunlight does not reach the desk.
//!
//! Pipeline: sun angle -> grid of rays cast from the window plane
//! ([`sampler`]) -> obstructed height span -> rail fractions ([`state`])
//! -> integer rail positions for the automation controller ([`rails`]).

pub mod evaluate;
pub mod rails;
pub mod sampler;
pub mod series;
pub mod state;
pub mod window;

pub use evaluate::{WindowEvaluation, evaluate, evaluate_window};
pub use rails::{RailConvention, RailPositions};
pub use sampler::{HeightSpan, RayModel, SampleResult, SamplingSettings, sample};
pub use series::{TimeRange, TimeSeriesRecord, generate_time_series};
pub use state::{ShadePercent, ShadeState};
pub use window::Window;
