use thiserror::Error;

use crate::types::{Joint, Segment};

/// Errors raised while building or querying a body model.
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("Invalid value for {name}: {value} (must be finite and > 0)")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("Invalid anthropometric ratio for {segment}: {message}")]
    InvalidRatio { segment: Segment, message: String },

    #[error("Joint not found in coordinate table: {0}")]
    MissingJoint(Joint),

    #[error("Segment not found in table: {0}")]
    MissingSegment(Segment),

    #[error("Joint loads need a modelled foot (foot_length and ankle_height)")]
    FootNotModeled,

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BodyError {
    /// True for the lookup class of errors (a key absent from a supplied table).
    pub fn is_lookup(&self) -> bool {
        matches!(self, BodyError::MissingJoint(_) | BodyError::MissingSegment(_))
    }
}

pub type BodyResult<T> = Result<T, BodyError>;
