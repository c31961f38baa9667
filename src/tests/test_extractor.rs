use crate::error::FeatureError;
use crate::extractor::{higuchi_fractal, HiguchiConfig, HiguchiExtractor};
use crate::payload::{Payload, Value};
use crate::tensor::RawTensor;

use super::{noise_signal, payload_with_tensor, KMAX};

#[test]
fn config_defaults() {
    let config = HiguchiConfig::default();
    assert_eq!(config.kmax, 100);
    assert!(!config.flatten);
}

#[test]
fn kmax_below_two_is_clamped_not_rejected() {
    assert_eq!(HiguchiConfig::default().with_kmax(0).effective_kmax(), 2);
    assert_eq!(HiguchiConfig::default().with_kmax(1).effective_kmax(), 2);
    assert_eq!(HiguchiConfig::default().with_kmax(64).effective_kmax(), 64);
}

#[test]
fn options_accept_integer_valued_kmax_only() {
    let mut options = Payload::new();
    options.insert("kmax", Value::Num(48.0));
    assert_eq!(HiguchiConfig::from_options(&options).unwrap().kmax, 48);

    // integer values below the minimum are clamped, not rejected
    options.insert("kmax", Value::Num(-5.0));
    assert_eq!(HiguchiConfig::from_options(&options).unwrap().kmax, 2);
    options.insert("kmax", Value::Num(0.0));
    assert_eq!(HiguchiConfig::from_options(&options).unwrap().kmax, 2);

    options.insert("kmax", Value::Num(48.5));
    assert!(matches!(
        HiguchiConfig::from_options(&options),
        Err(FeatureError::InvalidParameter { ref name, .. }) if name == "kmax"
    ));

    options.insert("kmax", Value::Text("100".to_string()));
    assert!(matches!(
        HiguchiConfig::from_options(&options),
        Err(FeatureError::InvalidParameter { ref name, .. }) if name == "kmax"
    ));

    options.insert("kmax", Value::Num(f64::NAN));
    assert!(HiguchiConfig::from_options(&options).is_err());
}

#[test]
fn legacy_flattening_alias_is_merged_with_or() {
    for (flatten, legacy, expected) in [
        (None, None, false),
        (Some(true), None, true),
        (None, Some(true), true),
        (Some(false), Some(true), true),
        (Some(true), Some(false), true),
        (Some(false), Some(false), false),
    ] {
        let mut options = Payload::new();
        if let Some(f) = flatten {
            options.insert("flatten", Value::Bool(f));
        }
        if let Some(f) = legacy {
            options.insert("flattening", Value::Bool(f));
        }
        let config = HiguchiConfig::from_options(&options).unwrap();
        assert_eq!(config.flatten, expected, "flatten={flatten:?} legacy={legacy:?}");
    }
}

#[test]
fn non_boolean_flatten_is_invalid_parameter() {
    let mut options = Payload::new();
    options.insert("flattening", Value::Num(1.0));
    assert!(matches!(
        HiguchiConfig::from_options(&options),
        Err(FeatureError::InvalidParameter { ref name, .. }) if name == "flattening"
    ));
}

#[test]
fn transform_rejects_non_record_input() {
    let err = higuchi_fractal(Value::Num(1.0), HiguchiConfig::default()).unwrap_err();
    assert_eq!(
        err,
        FeatureError::InvalidPayload {
            got: "number".to_string()
        }
    );
}

#[test]
fn transform_requires_the_tensor_key() {
    let mut payload = Payload::new();
    payload.insert("sfreq", Value::Num(250.0));
    let err = higuchi_fractal(Value::Record(payload), HiguchiConfig::default()).unwrap_err();
    assert_eq!(
        err,
        FeatureError::MissingField {
            key: "x".to_string()
        }
    );
}

#[test]
fn transform_rejects_rank2_and_rank5() {
    for shape in [vec![4, 6], vec![1, 1, 1, 1, 16]] {
        let len: usize = shape.iter().product();
        let err = higuchi_fractal(
            payload_with_tensor(vec![0.0; len], shape.clone()),
            HiguchiConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, FeatureError::InvalidShape { shape });
    }
}

#[test]
fn transform_rejects_mistyped_tensor_field() {
    let mut payload = Payload::new();
    payload.insert("x", Value::Text("not a tensor".to_string()));
    let err = higuchi_fractal(Value::Record(payload), HiguchiConfig::default()).unwrap_err();
    assert_eq!(
        err,
        FeatureError::InvalidTensorType {
            key: "x".to_string(),
            got: "text".to_string()
        }
    );
}

#[test]
fn grid_and_flat_shapes() {
    let mut data = Vec::new();
    for s in 0..2 * 3 * 4 {
        data.extend(noise_signal(64, s as u64));
    }

    let extractor = HiguchiExtractor::new(HiguchiConfig::default().with_kmax(KMAX));
    let out = extractor
        .transform(payload_with_tensor(data.clone(), vec![2, 3, 4, 64]))
        .unwrap();
    let Value::Record(record) = out else { unreachable!() };
    let Some(Value::Features(grid)) = record.get("x") else { unreachable!() };
    assert_eq!(grid.shape(), vec![2, 3, 4]);

    let extractor = HiguchiExtractor::new(
        HiguchiConfig::default().with_kmax(KMAX).with_flatten(true),
    );
    let out = extractor
        .transform(payload_with_tensor(data, vec![2, 3, 4, 64]))
        .unwrap();
    let Value::Record(record) = out else { unreachable!() };
    let Some(Value::Features(flat)) = record.get("x") else { unreachable!() };
    assert_eq!(flat.shape(), vec![2, 12]);
}

#[test]
fn side_fields_pass_through_untouched() {
    let mut payload = Payload::new();
    payload.insert(
        "x",
        Value::Tensor(RawTensor::new(noise_signal(128, 3), vec![1, 1, 128])),
    );
    payload.insert("subject", Value::Text("A03".to_string()));
    payload.insert("sfreq", Value::Num(250.0));

    let out = higuchi_fractal(Value::Record(payload), HiguchiConfig::default()).unwrap();
    let Value::Record(record) = out else { unreachable!() };
    assert_eq!(record.get("subject"), Some(&Value::Text("A03".to_string())));
    assert_eq!(record.get("sfreq"), Some(&Value::Num(250.0)));
    assert!(matches!(record.get("x"), Some(Value::Features(_))));
}
