use thiserror::Error;

/// Rejected physical constant sets.
#[derive(Debug, Error, PartialEq)]
pub enum ConstantsError {
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be non-negative and finite, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("warning band starting at {warning_depth} m must end before max depth {max_depth} m")]
    WarningPastMaxDepth { warning_depth: f32, max_depth: f32 },
}
