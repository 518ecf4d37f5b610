use stitch_common::error::ConfigError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FillError {
    #[error("invalid fill configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("board bounding box is empty ({width} x {height})")]
    EmptyBoard { width: f64, height: f64 },
    #[error("board bounding box has non-finite coordinates")]
    NonFiniteBounds,
    #[error("fill grid of {columns} x {rows} cells exceeds the limit of {limit} cells")]
    GridTooLarge { columns: u64, rows: u64, limit: u64 },
}
