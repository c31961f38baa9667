//! Error types for the feature-extraction boundary.
//!
//! Only structural problems on the input are errors: a payload that is not a
//! record, a missing or mistyped tensor field, an unsupported rank, or a
//! malformed option. Numerical degeneracies inside the kernel (short signals,
//! flat signals, too few regression points) are never surfaced here; they
//! resolve to a 0.0 feature value so a batch always completes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural errors raised at the transform boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FeatureError {
    /// Transform input was not a record carrying named fields.
    #[error("payload must be a record carrying the signal tensor, got {got}")]
    InvalidPayload {
        /// Kind of the value that was received instead.
        got: String,
    },

    /// A required field is absent from the payload record.
    #[error("payload is missing required field `{key}`")]
    MissingField {
        /// The field that was looked up.
        key: String,
    },

    /// The tensor field exists but holds a non-tensor value.
    #[error("field `{key}` must be a numeric tensor, got {got}")]
    InvalidTensorType {
        /// The field that was looked up.
        key: String,
        /// Kind of the value that was found.
        got: String,
    },

    /// The tensor rank is neither 3 (trials, electrodes, time) nor
    /// 4 (trials, bands, electrodes, time).
    #[error(
        "unsupported tensor shape {shape:?}: expected 3-D (trials, electrodes, time) \
         or 4-D (trials, bands, electrodes, time)"
    )]
    InvalidShape {
        /// The offending shape as reported by the input tensor.
        shape: Vec<usize>,
    },

    /// A configuration option has the wrong type or an unrepresentable value.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Option name as supplied by the caller.
        name: String,
        /// Human-readable cause.
        reason: String,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, FeatureError>;
