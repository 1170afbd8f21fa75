//! Error types for fanout operations.
//!
//! Running out of data (fewer than two electrical pads, or a pad grid whose
//! first row or column has a single pad) is not an error: the fanout is
//! skipped and an empty report is returned. The variants here are caller
//! contract violations.

use thiserror::Error;

/// Result type for fanout operations.
pub type FanoutResult<T> = Result<T, FanoutError>;

/// Errors raised by the fanout engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FanoutError {
    /// No footprint with the given reference exists on the board.
    #[error("Footprint not found: {reference}")]
    FootprintNotFound {
        /// Reference designator that was looked up.
        reference: String,
    },

    /// The fanout plan has unusable track or via geometry.
    #[error("Invalid fanout plan: {message}")]
    InvalidPlan {
        /// Description of what's wrong.
        message: String,
    },

    /// A routing item was requested for a pad without a net.
    #[error("Cannot route net code {net_code}: pad has no net")]
    InvalidNet {
        /// The rejected net code.
        net_code: u32,
    },
}

impl FanoutError {
    /// Creates a footprint-not-found error.
    pub fn footprint_not_found(reference: impl Into<String>) -> Self {
        Self::FootprintNotFound {
            reference: reference.into(),
        }
    }

    /// Creates an invalid plan error.
    pub fn invalid_plan(message: impl Into<String>) -> Self {
        Self::InvalidPlan {
            message: message.into(),
        }
    }
}
