//! Batch feature extraction over payload records.
//!
//! [`HiguchiExtractor`] is the boundary operation: it validates the payload,
//! canonicalizes the tensor rank, derives the scale set once, maps the
//! per-signal kernel over every (trial, band, electrode) signal in parallel,
//! and writes the reshaped feature tensor back under the tensor key. All
//! other payload fields pass through untouched.
//!
//! The transform is stateless and pure: no fit phase, no cross-call caching,
//! identical inputs give bit-identical outputs.
//!
//! # Examples
//!
//! ```
//! use hfdspace::extractor::{HiguchiConfig, HiguchiExtractor};
//! use hfdspace::payload::{Payload, Value};
//! use hfdspace::tensor::RawTensor;
//!
//! let sig: Vec<f64> = (0..256).map(|i| f64::sin(i as f64 * 0.9) * ((i % 5) as f64 + 1.0)).collect();
//! let mut payload = Payload::new();
//! payload.insert("x", Value::Tensor(RawTensor::new(sig, vec![1, 1, 256])));
//!
//! let extractor = HiguchiExtractor::new(HiguchiConfig::default().with_flatten(true));
//! let out = extractor.transform(Value::Record(payload)).unwrap();
//!
//! let Value::Record(record) = out else { unreachable!() };
//! let Some(Value::Features(features)) = record.get("x") else { unreachable!() };
//! assert_eq!(features.shape(), vec![1, 1]);
//! ```

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, Result};
use crate::higuchi::{HiguchiEstimator, HiguchiOps};
use crate::payload::{Payload, Value};
use crate::scales::ScaleSet;
use crate::tensor::{FeatureLayout, FeatureTensor, SignalTensor};

/// Payload field holding the signal tensor on input and the feature tensor
/// on output.
pub const TENSOR_KEY: &str = "x";

/// Default target maximum scale.
pub const DEFAULT_KMAX: usize = 100;

/// Extraction configuration.
///
/// `kmax` below 2 is clamped (not rejected) when the scale set is derived.
/// The legacy `flattening` option name is merged into `flatten` once, at
/// [`HiguchiConfig::from_options`]; the algorithm only ever sees the
/// canonical field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiguchiConfig {
    /// Target maximum curve-length scale.
    pub kmax: usize,
    /// Emit trials × (bands · electrodes) instead of the grid layout.
    pub flatten: bool,
}

impl Default for HiguchiConfig {
    fn default() -> Self {
        Self {
            kmax: DEFAULT_KMAX,
            flatten: false,
        }
    }
}

impl HiguchiConfig {
    /// Sets the target maximum scale.
    pub fn with_kmax(mut self, kmax: usize) -> Self {
        self.kmax = kmax;
        self
    }

    /// Selects the flattened output layout.
    pub fn with_flatten(mut self, flatten: bool) -> Self {
        self.flatten = flatten;
        self
    }

    /// `kmax` coerced to the minimum usable value.
    pub fn effective_kmax(&self) -> usize {
        self.kmax.max(2)
    }

    /// Reads options from a dynamically-typed record.
    ///
    /// Recognized fields: `kmax` (number, must carry an integer value;
    /// values below 2 — negatives included — are clamped to 2), `flatten`
    /// (boolean), and the legacy synonym `flattening` (boolean, OR'ed with
    /// `flatten`). Unknown fields are ignored.
    ///
    /// # Errors
    ///
    /// [`FeatureError::InvalidParameter`] when a recognized field has the
    /// wrong type or `kmax` is not an integer.
    pub fn from_options(options: &Payload) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = options.get("kmax") {
            let Value::Num(raw) = value else {
                return Err(FeatureError::InvalidParameter {
                    name: "kmax".to_string(),
                    reason: format!("expected an integer, got {}", value.kind()),
                });
            };
            if !raw.is_finite() || raw.fract() != 0.0 {
                return Err(FeatureError::InvalidParameter {
                    name: "kmax".to_string(),
                    reason: format!("expected an integer, got {raw}"),
                });
            }
            // below-minimum values (including negatives) are clamped, not rejected
            config.kmax = raw.max(2.0) as usize;
        }

        let mut flatten = read_flag(options, "flatten")?;
        // legacy alias, merged once here so the kernel never sees it
        flatten |= read_flag(options, "flattening")?;
        config.flatten = flatten;

        Ok(config)
    }
}

fn read_flag(options: &Payload, name: &str) -> Result<bool> {
    match options.get(name) {
        None => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(other) => Err(FeatureError::InvalidParameter {
            name: name.to_string(),
            reason: format!("expected a boolean, got {}", other.kind()),
        }),
    }
}

/// Stateless Higuchi Fractal Dimension extractor.
#[derive(Clone, Copy, Debug, Default)]
pub struct HiguchiExtractor {
    config: HiguchiConfig,
}

impl HiguchiExtractor {
    /// Builds an extractor with the given configuration.
    pub fn new(config: HiguchiConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &HiguchiConfig {
        &self.config
    }

    /// Replaces the tensor under [`TENSOR_KEY`] with its per-signal HFD
    /// features; every other field passes through untouched.
    ///
    /// # Errors
    ///
    /// [`FeatureError::InvalidPayload`] when `value` is not a record,
    /// [`FeatureError::MissingField`] / [`FeatureError::InvalidTensorType`]
    /// on a bad tensor field, [`FeatureError::InvalidShape`] on a rank other
    /// than 3 or 4.
    pub fn transform(&self, value: Value) -> Result<Value> {
        let mut payload = value.into_record()?;
        let raw = payload.take_tensor(TENSOR_KEY)?;
        let tensor = SignalTensor::canonicalize(raw)?;
        let features = self.extract(&tensor);
        payload.insert(TENSOR_KEY, Value::Features(features));
        Ok(Value::Record(payload))
    }

    /// Computes one HFD scalar per (trial, band, electrode) signal.
    ///
    /// Signals are fully independent, so the batch is a parallel map over
    /// disjoint time-axis slices; no per-signal outcome can fail, only the
    /// defined 0.0 fallbacks apply.
    pub fn extract(&self, tensor: &SignalTensor) -> FeatureTensor {
        let (trials, bands, electrodes, n_time) = tensor.shape();
        let kmax = self.config.effective_kmax();
        info!(
            "extracting HFD features: {trials}×{bands}×{electrodes} signals, \
             {n_time} samples, kmax={kmax}, flatten={}",
            self.config.flatten
        );

        let scales = ScaleSet::select(kmax, n_time);
        let values: Vec<f64> = if scales.is_degenerate() {
            debug!("degenerate scale set for n_time={n_time}, assigning 0.0 to all signals");
            vec![0.0; tensor.n_signals()]
        } else {
            debug!("shared scale set: {:?}", scales.ks());
            tensor
                .par_signals()
                .map(|sig| HiguchiEstimator::fractal_dimension(sig, &scales))
                .collect()
        };

        let layout = if self.config.flatten {
            FeatureLayout::Flat
        } else {
            FeatureLayout::Grid
        };
        debug!("feature extraction complete, layout {layout:?}");
        FeatureTensor::new(values, trials, bands, electrodes, layout)
    }
}

/// One-shot convenience around [`HiguchiExtractor::transform`].
pub fn higuchi_fractal(value: Value, config: HiguchiConfig) -> Result<Value> {
    HiguchiExtractor::new(config).transform(value)
}
