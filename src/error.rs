// Error types: match configuration rejected before the first tick

use thiserror::Error;

/// Configuration Errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Grid must be at least 2x1 cells, got {width}x{height}")]
    GridTooSmall { width: u32, height: u32 },
    #[error("Cell size must be at least one pixel")]
    ZeroCellSize,
    #[error("Grid has {cells} cells, at most {max} are supported")]
    TooManyCells { cells: u64, max: u64 },
    #[error("Grid of {width}x{height} cells at {cell_size}px does not fit in pixel space")]
    GridTooLarge {
        width: u32,
        height: u32,
        cell_size: u32,
    },
    #[error("Match duration must be positive, got {0}s")]
    NonPositiveDuration(f64),
    #[error("Base move interval must be positive, got {0}s")]
    NonPositiveMoveInterval(f64),
    #[error("Bot decision interval must be positive, got {0}s")]
    NonPositiveDecisionInterval(f64),
}
