//! hfdspace: Higuchi Fractal Dimension features for EEG signal batches.
//!
//! Given a batch of multi-band, multi-electrode signal segments, this crate
//! computes one complexity scalar per (trial, band, electrode) channel — the
//! slope of a log–log regression between analysis scale and average
//! normalized curve length. The output feeds a downstream classifier; the
//! surrounding pipeline (dataset loading, bandpass/CSP filtering, feature
//! selection, cross-validation) lives outside this crate and only exchanges
//! tensors with it.
//!
//! The transform is a pure function of its input and configuration: no fit
//! phase, no persisted state, no I/O. Signals are processed independently and
//! in parallel; degenerate signals (too short, constant) score a defined 0.0
//! instead of failing, so a batch always completes. Structural problems on
//! the payload (missing tensor, unsupported rank, malformed option) are
//! typed, caller-visible errors.
//!
//! # Examples
//!
//! ```
//! use hfdspace::extractor::{higuchi_fractal, HiguchiConfig};
//! use hfdspace::payload::{Payload, Value};
//! use hfdspace::tensor::RawTensor;
//!
//! // 2 trials × 3 electrodes × 128 samples, rank 3 (single implicit band).
//! let data: Vec<f64> = (0..2 * 3 * 128)
//!     .map(|i| f64::sin(i as f64 * 0.61) * ((i % 11) as f64 - 5.0))
//!     .collect();
//! let mut payload = Payload::new();
//! payload.insert("x", Value::Tensor(RawTensor::new(data, vec![2, 3, 128])));
//! payload.insert("sfreq", Value::Num(250.0));
//!
//! let out = higuchi_fractal(
//!     Value::Record(payload),
//!     HiguchiConfig::default().with_kmax(50),
//! )
//! .unwrap();
//!
//! let Value::Record(record) = out else { unreachable!() };
//! let Some(Value::Features(features)) = record.get("x") else { unreachable!() };
//! assert_eq!(features.shape(), vec![2, 1, 3]);
//! // Side fields pass through untouched.
//! assert_eq!(record.get("sfreq"), Some(&Value::Num(250.0)));
//! ```

pub mod error;
pub mod extractor;
pub mod higuchi;
pub mod payload;
pub mod scales;
pub mod tensor;

pub use error::{FeatureError, Result};
pub use extractor::{higuchi_fractal, HiguchiConfig, HiguchiExtractor, TENSOR_KEY};
pub use higuchi::{HiguchiEstimator, HiguchiOps};
pub use payload::{Payload, Value};
pub use scales::ScaleSet;
pub use tensor::{FeatureLayout, FeatureTensor, RawTensor, SignalTensor};

#[cfg(test)]
mod tests;
