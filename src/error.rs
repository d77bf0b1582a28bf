use thiserror::Error;

/// Errors raised by the shading core.
///
/// All of them are configuration defects detected before any sampling
/// happens. None are retried.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShadeError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid time range: {0}")]
    InvalidTimeRange(String),
}
