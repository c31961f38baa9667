mod test_extractor;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::payload::{Payload, Value};
use crate::tensor::RawTensor;

pub const KMAX: usize = 50;

/// Deterministic broadband noise; the same seed always yields the same
/// signal, so feature values are reproducible across test runs.
pub fn noise_signal(len: usize, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

pub fn constant_signal(len: usize, level: f64) -> Vec<f64> {
    vec![level; len]
}

/// Wraps a flat buffer as the standard `{"x": tensor}` transform input.
pub fn payload_with_tensor(data: Vec<f64>, shape: Vec<usize>) -> Value {
    let mut payload = Payload::new();
    payload.insert("x", Value::Tensor(RawTensor::new(data, shape)));
    Value::Record(payload)
}
