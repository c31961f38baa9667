//! Walkthrough: extract Higuchi Fractal Dimension features from a small
//! synthetic EEG batch and inspect both output layouts.
//!
//! Run with `RUST_LOG=debug cargo run --example extract_features` to see the
//! extractor's logging.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use hfdspace::extractor::{higuchi_fractal, HiguchiConfig};
use hfdspace::payload::{Payload, Value};
use hfdspace::tensor::RawTensor;

fn main() {
    env_logger::init();

    // =====================
    // 1. Build a batch: 4 trials × 3 electrodes × 512 samples.
    //    Trial 3 is deliberately flat to show the degenerate fallback.
    // =====================
    let (trials, electrodes, n_time) = (4usize, 3usize, 512usize);
    let mut rng = ChaCha8Rng::seed_from_u64(21);
    let mut data = Vec::with_capacity(trials * electrodes * n_time);
    for trial in 0..trials {
        for _electrode in 0..electrodes {
            if trial == 3 {
                data.extend(std::iter::repeat(1.0).take(n_time));
            } else {
                let jitter = 0.2 * (trial as f64 + 1.0);
                data.extend((0..n_time).map(|i| {
                    f64::sin(i as f64 * 0.11) + rng.gen_range(-jitter..jitter)
                }));
            }
        }
    }

    let mut payload = Payload::new();
    payload.insert(
        "x",
        Value::Tensor(RawTensor::new(data, vec![trials, electrodes, n_time])),
    );
    payload.insert("sfreq", Value::Num(250.0));
    payload.insert("subject", Value::Text("demo".to_string()));

    // =====================
    // 2. Grid layout: (trials, bands, electrodes).
    // =====================
    let out = higuchi_fractal(
        Value::Record(payload.clone()),
        HiguchiConfig::default().with_kmax(50),
    )
    .expect("valid payload");
    let Value::Record(record) = out else { unreachable!() };
    let Some(Value::Features(grid)) = record.get("x") else { unreachable!() };

    println!("grid shape: {:?}", grid.shape());
    for trial in 0..trials {
        let row: Vec<String> = (0..electrodes)
            .map(|e| format!("{:+.4}", grid.get(trial, 0, e)))
            .collect();
        println!("  trial {trial}: [{}]", row.join(", "));
    }
    println!("(trial 3 is constant, so every electrode scores exactly 0.0)");

    // =====================
    // 3. Flattened layout: (trials, bands·electrodes), same values.
    // =====================
    let out = higuchi_fractal(
        Value::Record(payload),
        HiguchiConfig::default().with_kmax(50).with_flatten(true),
    )
    .expect("valid payload");
    let Value::Record(record) = out else { unreachable!() };
    let Some(Value::Features(flat)) = record.get("x") else { unreachable!() };

    println!("flat shape: {:?}", flat.shape());
    println!("trial 0 feature vector: {:?}", flat.row(0));
    println!("side fields preserved: sfreq={:?}", record.get("sfreq"));
}
