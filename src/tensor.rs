//! Dense tensors for signal batches and feature outputs.
//!
//! Storage is a single row-major `Vec<f64>` plus explicit shape metadata, so
//! per-signal access is a zero-copy slice view and the batch driver can hand
//! disjoint chunks to worker threads without synchronization.
//!
//! Three types live here:
//!
//! - [`RawTensor`]: a numeric tensor of arbitrary rank, as it arrives in a
//!   payload. Rank is validated only at canonicalization time.
//! - [`SignalTensor`]: the canonical 4-D batch
//!   (trials × bands × electrodes × time). A 3-D input
//!   (trials × electrodes × time) is promoted by inserting a singleton band
//!   axis; since the buffer is row-major the promotion touches no data.
//! - [`FeatureTensor`]: one scalar per (trial, band, electrode) signal, in
//!   either grid or flattened layout. The two layouts are reshapes of the
//!   same buffer; values are identical.
//!
//! # Examples
//!
//! ```
//! use hfdspace::tensor::{RawTensor, SignalTensor};
//!
//! // 2 trials, 3 electrodes, 4 samples — rank 3, promoted to one band.
//! let raw = RawTensor::new(vec![0.0; 24], vec![2, 3, 4]);
//! let batch = SignalTensor::canonicalize(raw).unwrap();
//! assert_eq!(batch.shape(), (2, 1, 3, 4));
//! assert_eq!(batch.n_signals(), 6);
//! ```

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, Result};

/// A dense numeric tensor of arbitrary rank, row-major.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawTensor {
    data: Vec<f64>,
    shape: Vec<usize>,
}

impl RawTensor {
    /// Wraps a row-major buffer with its shape.
    ///
    /// # Panics
    ///
    /// Panics if the element count does not match the shape product.
    pub fn new(data: Vec<f64>, shape: Vec<usize>) -> Self {
        let expected: usize = shape.iter().product();
        assert_eq!(
            data.len(),
            expected,
            "buffer holds {} elements but shape {:?} implies {}",
            data.len(),
            shape,
            expected
        );
        Self { data, shape }
    }

    /// Builds a rank-3 tensor from nested trial-major vectors.
    ///
    /// # Panics
    ///
    /// Panics if the nesting is ragged.
    pub fn from_nested3(trials: Vec<Vec<Vec<f64>>>) -> Self {
        let n_trials = trials.len();
        let n_electrodes = trials.first().map_or(0, Vec::len);
        let n_time = trials
            .first()
            .and_then(|t| t.first())
            .map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_trials * n_electrodes * n_time);
        for trial in &trials {
            assert_eq!(trial.len(), n_electrodes, "ragged electrode axis");
            for electrode in trial {
                assert_eq!(electrode.len(), n_time, "ragged time axis");
                data.extend_from_slice(electrode);
            }
        }
        Self::new(data, vec![n_trials, n_electrodes, n_time])
    }

    /// Tensor rank.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Shape as reported by the producer.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Flat row-major view of the buffer.
    pub fn values(&self) -> &[f64] {
        &self.data
    }
}

/// The canonical 4-D signal batch: trials × bands × electrodes × time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignalTensor {
    data: Vec<f64>,
    trials: usize,
    bands: usize,
    electrodes: usize,
    time: usize,
}

impl SignalTensor {
    /// Canonicalizes an arbitrary-rank tensor to the 4-D batch layout.
    ///
    /// Rank 3 is read as (trials, electrodes, time) and promoted with a
    /// singleton band axis; rank 4 is taken as-is. Any other rank fails with
    /// [`FeatureError::InvalidShape`] naming the offending shape. The buffer
    /// is moved, never copied.
    pub fn canonicalize(raw: RawTensor) -> Result<Self> {
        let RawTensor { data, shape } = raw;
        match shape.as_slice() {
            [trials, electrodes, time] => Ok(Self {
                data,
                trials: *trials,
                bands: 1,
                electrodes: *electrodes,
                time: *time,
            }),
            [trials, bands, electrodes, time] => Ok(Self {
                data,
                trials: *trials,
                bands: *bands,
                electrodes: *electrodes,
                time: *time,
            }),
            _ => Err(FeatureError::InvalidShape { shape }),
        }
    }

    /// Shape as (trials, bands, electrodes, time).
    pub fn shape(&self) -> (usize, usize, usize, usize) {
        (self.trials, self.bands, self.electrodes, self.time)
    }

    /// Samples along the time axis.
    pub fn n_time(&self) -> usize {
        self.time
    }

    /// Number of independent 1-D signals in the batch.
    pub fn n_signals(&self) -> usize {
        self.trials * self.bands * self.electrodes
    }

    /// Zero-copy view of one signal.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    pub fn signal(&self, trial: usize, band: usize, electrode: usize) -> &[f64] {
        assert!(trial < self.trials && band < self.bands && electrode < self.electrodes);
        let start = ((trial * self.bands + band) * self.electrodes + electrode) * self.time;
        &self.data[start..start + self.time]
    }

    /// Sequential iterator over all signals, trial-major.
    ///
    /// # Panics
    ///
    /// Panics if the time axis is empty; callers gate on
    /// [`n_time`](Self::n_time) first.
    pub fn signals(&self) -> std::slice::ChunksExact<'_, f64> {
        assert!(self.time > 0, "cannot slice signals of length 0");
        self.data.chunks_exact(self.time)
    }

    /// Parallel iterator over all signals; each worker reads a disjoint
    /// slice of the buffer.
    ///
    /// # Panics
    ///
    /// Panics if the time axis is empty.
    pub fn par_signals(&self) -> rayon::slice::ChunksExact<'_, f64> {
        assert!(self.time > 0, "cannot slice signals of length 0");
        self.data.par_chunks_exact(self.time)
    }
}

/// Output layout for the per-signal feature scalars.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureLayout {
    /// trials × bands × electrodes.
    #[default]
    Grid,
    /// trials × (bands · electrodes).
    Flat,
}

/// Per-signal feature scalars: exactly one element per
/// (trial, band, electrode) triple of the input batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureTensor {
    data: Vec<f64>,
    trials: usize,
    bands: usize,
    electrodes: usize,
    layout: FeatureLayout,
}

impl FeatureTensor {
    /// Wraps per-signal scalars, trial-major.
    ///
    /// # Panics
    ///
    /// Panics if the element count does not equal
    /// `trials * bands * electrodes`.
    pub fn new(
        data: Vec<f64>,
        trials: usize,
        bands: usize,
        electrodes: usize,
        layout: FeatureLayout,
    ) -> Self {
        assert_eq!(
            data.len(),
            trials * bands * electrodes,
            "feature buffer must hold one scalar per signal"
        );
        Self {
            data,
            trials,
            bands,
            electrodes,
            layout,
        }
    }

    /// Selected layout.
    pub fn layout(&self) -> FeatureLayout {
        self.layout
    }

    /// Dimensions under the selected layout.
    pub fn shape(&self) -> Vec<usize> {
        match self.layout {
            FeatureLayout::Grid => vec![self.trials, self.bands, self.electrodes],
            FeatureLayout::Flat => vec![self.trials, self.bands * self.electrodes],
        }
    }

    /// The scalar for one (trial, band, electrode) signal, independent of
    /// layout.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    pub fn get(&self, trial: usize, band: usize, electrode: usize) -> f64 {
        assert!(trial < self.trials && band < self.bands && electrode < self.electrodes);
        self.data[(trial * self.bands + band) * self.electrodes + electrode]
    }

    /// All scalars for one trial as a contiguous slice.
    ///
    /// # Panics
    ///
    /// Panics if `trial` is out of bounds.
    pub fn row(&self, trial: usize) -> &[f64] {
        assert!(trial < self.trials);
        let width = self.bands * self.electrodes;
        &self.data[trial * width..(trial + 1) * width]
    }

    /// Flat row-major view of the buffer.
    pub fn values(&self) -> &[f64] {
        &self.data
    }
}
