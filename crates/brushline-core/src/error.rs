use thiserror::Error;

use crate::SelectionRange;

#[derive(Error, Debug)]
pub enum ChartError {
    /// Malformed configuration or series input. Fatal to the chart being built.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// `max == min` for a domain used as a divisor. Callers recover with a flat fallback.
    #[error("Degenerate {field} domain: min equals max")]
    DegenerateDomain { field: &'static str },

    /// Candidate selection outside `[0, 1]` or crossing itself. Discarded silently.
    #[error("Selection out of bounds: {0:?}")]
    OutOfBoundsSelection(SelectionRange),

    #[error("Invalid render target: {0}. Expected an element id or a mounted container element")]
    InvalidHost(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChartError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Errors raised by normal interaction, recovered without interrupting a gesture
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DegenerateDomain { .. } | Self::OutOfBoundsSelection(_))
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
