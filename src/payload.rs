//! Record-style payload carried across the transform boundary.
//!
//! The extractor consumes a [`Value::Record`] holding the signal tensor under
//! a well-known key next to arbitrary side fields (labels, sampling rate,
//! subject ids) that pass through the transform untouched. Accessors are
//! typed: a missing key and a mistyped field are distinct, caller-visible
//! errors.
//!
//! # Examples
//!
//! ```
//! use hfdspace::payload::{Payload, Value};
//! use hfdspace::tensor::RawTensor;
//!
//! let mut payload = Payload::new();
//! payload.insert("x", Value::Tensor(RawTensor::new(vec![0.0; 24], vec![2, 3, 4])));
//! payload.insert("sfreq", Value::Num(250.0));
//!
//! assert!(payload.tensor("x").is_ok());
//! assert!(payload.tensor("y").is_err());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, Result};
use crate::tensor::{FeatureTensor, RawTensor};

/// A dynamically-typed field value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// A numeric tensor of arbitrary rank (the transform input).
    Tensor(RawTensor),
    /// Per-signal feature scalars (the transform output).
    Features(FeatureTensor),
    /// A real number.
    Num(f64),
    /// A boolean flag.
    Bool(bool),
    /// Free-form text.
    Text(String),
    /// A homogeneous or mixed sequence.
    List(Vec<Value>),
    /// A nested record.
    Record(Payload),
}

impl Value {
    /// Short kind name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Tensor(_) => "tensor",
            Value::Features(_) => "features",
            Value::Num(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }

    /// Unwraps a record, or reports what was received instead.
    pub fn into_record(self) -> Result<Payload> {
        match self {
            Value::Record(payload) => Ok(payload),
            other => Err(FeatureError::InvalidPayload {
                got: other.kind().to_string(),
            }),
        }
    }
}

/// An ordered map of named fields.
///
/// `BTreeMap` keeps field iteration deterministic, which keeps serialized
/// payloads and log lines stable across runs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    fields: BTreeMap<String, Value>,
}

impl Payload {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a field.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(key.into(), value)
    }

    /// Looks up a field without consuming it.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Whether a field is present.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the payload has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Borrows the tensor stored under `key`.
    ///
    /// # Errors
    ///
    /// [`FeatureError::MissingField`] if `key` is absent,
    /// [`FeatureError::InvalidTensorType`] if the field is not a tensor.
    pub fn tensor(&self, key: &str) -> Result<&RawTensor> {
        match self.fields.get(key) {
            None => Err(FeatureError::MissingField {
                key: key.to_string(),
            }),
            Some(Value::Tensor(tensor)) => Ok(tensor),
            Some(other) => Err(FeatureError::InvalidTensorType {
                key: key.to_string(),
                got: other.kind().to_string(),
            }),
        }
    }

    /// Removes and returns the tensor stored under `key`.
    ///
    /// On a type mismatch the field is left in place so the caller still
    /// observes the original payload.
    pub fn take_tensor(&mut self, key: &str) -> Result<RawTensor> {
        match self.fields.get(key) {
            None => Err(FeatureError::MissingField {
                key: key.to_string(),
            }),
            Some(Value::Tensor(_)) => match self.fields.remove(key) {
                Some(Value::Tensor(tensor)) => Ok(tensor),
                _ => unreachable!("field kind checked above"),
            },
            Some(other) => Err(FeatureError::InvalidTensorType {
                key: key.to_string(),
                got: other.kind().to_string(),
            }),
        }
    }
}

impl FromIterator<(String, Value)> for Payload {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
