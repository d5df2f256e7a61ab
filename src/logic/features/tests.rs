//! Codec and preset tests

use super::{encode, find_preset, EncodingError, PRESETS};

#[test]
fn test_encode_applies_divisors() {
    let vector = encode(["38.8", "18.3", "190", "3701"]).unwrap();
    assert_eq!(vector.as_array(), &[38.8, 18.3, 19.0, 37.01]);
}

#[test]
fn test_encode_trims_whitespace() {
    let vector = encode([" 47.5", "15.0 ", "\t217", "5076\n"]).unwrap();
    assert_eq!(vector.get_by_name("culmen_length"), Some(47.5));
    assert_eq!(vector.get_by_name("flipper_length"), Some(21.7));
    assert_eq!(vector.get_by_name("body_mass"), Some(50.76));
}

#[test]
fn test_encode_rejects_empty_field() {
    let err = encode(["38.8", "", "190", "3701"]).unwrap_err();
    assert_eq!(
        err,
        EncodingError::Empty {
            field: "culmen_depth",
        }
    );
}

#[test]
fn test_encode_rejects_garbage() {
    let err = encode(["38.8", "18.3", "190mm", "3701"]).unwrap_err();
    assert_eq!(err.field(), "flipper_length");
    assert!(matches!(err, EncodingError::NotANumber { .. }));
}

#[test]
fn test_encode_rejects_non_finite() {
    for bad in ["inf", "-infinity", "NaN"] {
        let err = encode(["38.8", "18.3", "190", bad]).unwrap_err();
        assert!(
            matches!(err, EncodingError::NonFinite { field: "body_mass", .. }),
            "{bad} should be rejected as non-finite"
        );
    }
}

#[test]
fn test_query_value_format() {
    let vector = encode(["38.8", "18.3", "190", "3701"]).unwrap();
    assert_eq!(vector.to_query_value(), "38.8,18.3,19,37.01");
}

#[test]
fn test_vector_serializes_as_plain_array() {
    let vector = encode(["38.8", "18.3", "190", "3701"]).unwrap();
    let json = serde_json::to_value(vector).unwrap();
    assert_eq!(json, serde_json::json!([38.8, 18.3, 19.0, 37.01]));
}

#[test]
fn test_all_presets_encode() {
    for preset in PRESETS.iter() {
        assert!(encode(preset.raw_inputs()).is_ok(), "{} preset", preset.species);
    }
}

#[test]
fn test_find_preset_case_insensitive() {
    assert_eq!(find_preset("GENTOO").map(|p| p.body_mass), Some("3733"));
    assert_eq!(find_preset(" adelie ").map(|p| p.species), Some("Adelie"));
    assert!(find_preset("emperor").is_none());
}
