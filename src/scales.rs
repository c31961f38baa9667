//! Analysis-scale selection for the curve-length estimator.
//!
//! Scales depend only on the time-axis length and the configured maximum,
//! never on signal content, so they are derived once per call and shared by
//! every signal in the batch. Selection is fully deterministic.

use serde::{Deserialize, Serialize};

/// Signals shorter than this carry too little structure for a stable slope;
/// they score 0.0 without further computation.
pub const MIN_SIGNAL_LEN: usize = 10;

/// Number of log-spaced sampling points drawn before deduplication.
pub const SCALE_SAMPLES: usize = 10;

/// The ordered set of integer scales shared by one extraction call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleSet {
    /// The signal is too short (or the effective maximum too small) to
    /// estimate a dimension; every downstream signal scores 0.0.
    Degenerate,
    /// Strictly increasing, deduplicated scales, each ≥ 1, at most
    /// [`SCALE_SAMPLES`] of them.
    Scales(Vec<usize>),
}

impl ScaleSet {
    /// Derives the scale set for signals of length `n_time` under a target
    /// maximum scale `kmax`.
    ///
    /// The effective maximum is `min(kmax, n_time / 2)`. When it is below 2,
    /// or `n_time <` [`MIN_SIGNAL_LEN`], the set is [`ScaleSet::Degenerate`].
    /// Otherwise scales are sampled log-uniformly between 1 and the
    /// effective maximum inclusive, truncated to integers, then sorted and
    /// deduplicated with values below 1 discarded. Truncation (rather than
    /// rounding) of the log-spaced samples is the tie-break at extreme
    /// `kmax`/`n_time` ratios; it is deterministic for fixed inputs.
    pub fn select(kmax: usize, n_time: usize) -> Self {
        if n_time < MIN_SIGNAL_LEN {
            return ScaleSet::Degenerate;
        }
        let max_k = kmax.min(n_time / 2);
        if max_k < 2 {
            return ScaleSet::Degenerate;
        }

        let hi = (max_k as f64).log10();
        let steps = (SCALE_SAMPLES - 1) as f64;
        let mut ks: Vec<usize> = (0..SCALE_SAMPLES)
            .map(|i| 10f64.powf(hi * (i as f64 / steps)) as usize)
            .filter(|&k| k >= 1)
            .collect();
        ks.sort_unstable();
        ks.dedup();
        ScaleSet::Scales(ks)
    }

    /// Whether the set carries no usable scales.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, ScaleSet::Degenerate)
    }

    /// The scales, empty when degenerate.
    pub fn ks(&self) -> &[usize] {
        match self {
            ScaleSet::Degenerate => &[],
            ScaleSet::Scales(ks) => ks,
        }
    }

    /// Number of scales.
    pub fn len(&self) -> usize {
        self.ks().len()
    }

    /// Whether the set is empty (degenerate sets are).
    pub fn is_empty(&self) -> bool {
        self.ks().is_empty()
    }
}
