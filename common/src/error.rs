use thiserror::Error;

/// Rejected fill parameters. Raised before any grid work starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid step must be a positive finite distance, got {0}")]
    InvalidStep(f64),
    #[error("drill size must be a positive finite distance, got {0}")]
    InvalidDrill(f64),
    #[error("via size {size} must be larger than drill size {drill}")]
    InvalidViaSize { size: f64, drill: f64 },
    #[error("clearance must be a finite non-negative distance, got {0}")]
    InvalidClearance(f64),
    #[error("grid cell limit must be at least 1")]
    InvalidCellLimit,
    #[error("net '{0}' does not exist on the board")]
    UnknownNet(String),
    #[error("no net name given and the board has neither '/GND' nor 'GND'")]
    NoDefaultNet,
}
