//! Integration tests for the config document codec.
//!
//! These exercise decoding and encoding through the public API, including the
//! stock touchscreen document and one crafted violation per invariant.

use theremin_core::{
    decode_config, encode_config, Axes, AxisConfig, AxisId, Config, DocumentError, DocumentFormat,
    Effect, WaveShape,
};

const STOCK_AXIS: &str =
    r#"{"fmin":20,"fmax":300,"sensitivity":1,"effect":"none","waveShape":"sin"}"#;

fn document_with_x(x: &str) -> String {
    format!(r#"{{"type":"touchscreen","x":{x},"y":{STOCK_AXIS},"z":{STOCK_AXIS}}}"#)
}

fn decode(doc: &str) -> Result<Config, DocumentError> {
    decode_config(doc.as_bytes(), &DocumentFormat::default())
}

fn roundtrip(cfg: &Config) -> Config {
    let format = DocumentFormat::default();
    let bytes = encode_config(cfg, &format).expect("encode must succeed");
    decode_config(&bytes, &format).expect("decode must succeed")
}

/// Asserts the document fails with `InvalidValue` on exactly `x.<field>`.
fn assert_invalid_x_field(doc: &str, field: &str) {
    match decode(doc) {
        Err(DocumentError::InvalidValue(e)) => {
            assert_eq!(e.axis, Some(AxisId::X), "wrong axis for {doc}");
            assert_eq!(e.field, field, "wrong field for {doc}");
        }
        other => panic!("expected InvalidValue on x.{field}, got {other:?}"),
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[test]
fn test_stock_touchscreen_document_loads() {
    let cfg = decode(&document_with_x(STOCK_AXIS)).expect("stock document must load");

    assert_eq!(cfg.device_type, "touchscreen");
    assert_eq!(cfg.axes[AxisId::X].fmin, 20.0);
    assert_eq!(cfg.axes[AxisId::X].fmax, 300.0);
    assert_eq!(cfg.axes[AxisId::Z].effect, Effect::None);
}

#[test]
fn test_fmin_above_fmax_fails_on_x_fmin() {
    let x = r#"{"fmin":400,"fmax":300,"sensitivity":1,"effect":"none","waveShape":"sin"}"#;
    assert_invalid_x_field(&document_with_x(x), "fmin");
}

#[test]
fn test_original_legacy_document_loads() {
    // Key order and the legacy wave-shape key exactly as the first releases wrote them.
    let doc = r#"{
        "type" : "touchscreen",
        "y" : { "fmax" : 300, "sensitivity" : 1, "effect" : "none", "VWWWaveTypeSawtooth" : "sin", "fmin" : 20 },
        "z" : { "fmax" : 300, "sensitivity" : 1, "effect" : "none", "VWWWaveTypeSawtooth" : "sin", "fmin" : 20 },
        "x" : { "fmax" : 300, "sensitivity" : 1, "effect" : "none", "VWWWaveTypeSawtooth" : "sin", "fmin" : 20 }
    }"#;

    let cfg = decode(doc).expect("legacy document must load");

    assert_eq!(cfg, Config::default());
}

// ── Validation completeness: one violation per invariant ─────────────────────

#[test]
fn test_negative_fmin_fails_only_on_fmin() {
    let x = r#"{"fmin":-5,"fmax":300,"sensitivity":1,"effect":"none","waveShape":"sin"}"#;
    assert_invalid_x_field(&document_with_x(x), "fmin");
}

#[test]
fn test_zero_sensitivity_fails_only_on_sensitivity() {
    let x = r#"{"fmin":20,"fmax":300,"sensitivity":0,"effect":"none","waveShape":"sin"}"#;
    assert_invalid_x_field(&document_with_x(x), "sensitivity");
}

#[test]
fn test_negative_sensitivity_fails_only_on_sensitivity() {
    let x = r#"{"fmin":20,"fmax":300,"sensitivity":-0.5,"effect":"none","waveShape":"sin"}"#;
    assert_invalid_x_field(&document_with_x(x), "sensitivity");
}

#[test]
fn test_fmax_beyond_f64_range_fails_only_on_fmax() {
    let x = r#"{"fmin":20,"fmax":1e400,"sensitivity":1,"effect":"none","waveShape":"sin"}"#;
    assert_invalid_x_field(&document_with_x(x), "fmax");
}

#[test]
fn test_fmin_below_f64_range_fails_only_on_fmin() {
    let x = r#"{"fmin":-1e400,"fmax":300,"sensitivity":1,"effect":"none","waveShape":"sin"}"#;
    assert_invalid_x_field(&document_with_x(x), "fmin");
}

#[test]
fn test_unknown_effect_fails_only_on_effect() {
    let x = r#"{"fmin":20,"fmax":300,"sensitivity":1,"effect":"flanger","waveShape":"sin"}"#;
    assert_invalid_x_field(&document_with_x(x), "effect");
}

#[test]
fn test_unknown_wave_shape_fails_only_on_wave_shape() {
    let x = r#"{"fmin":20,"fmax":300,"sensitivity":1,"effect":"none","waveShape":"pulse"}"#;
    assert_invalid_x_field(&document_with_x(x), "waveShape");
}

#[test]
fn test_missing_z_axis_fails_with_missing_field_z() {
    let doc = format!(r#"{{"type":"touchscreen","x":{STOCK_AXIS},"y":{STOCK_AXIS}}}"#);
    assert_eq!(decode(&doc), Err(DocumentError::MissingField("z".to_string())));
}

#[test]
fn test_truncated_document_is_malformed() {
    let doc = document_with_x(STOCK_AXIS);
    let truncated = &doc[..doc.len() / 2];
    assert!(matches!(decode(truncated), Err(DocumentError::Malformed(_))));
}

#[test]
fn test_invalid_utf8_is_malformed() {
    let result = decode_config(&[0x7B, 0xFF, 0xFE, 0x7D], &DocumentFormat::default());
    assert!(matches!(result, Err(DocumentError::Malformed(_))));
}

// ── Round-trip ────────────────────────────────────────────────────────────────

#[test]
fn test_roundtrip_default_config() {
    let cfg = Config::default();
    assert_eq!(cfg, roundtrip(&cfg));
}

#[test]
fn test_roundtrip_custom_axes() {
    let mut cfg = Config::new("tilt", Axes::default());
    cfg.axes[AxisId::Z] = AxisConfig {
        fmin: 110.0,
        fmax: 880.0,
        sensitivity: 2.5,
        effect: Effect::Autotune,
        wave_shape: WaveShape::Linear,
    };
    assert_eq!(cfg, roundtrip(&cfg));
}

#[test]
fn test_encoding_is_deterministic() {
    let format = DocumentFormat::default();
    let a = encode_config(&Config::default(), &format).unwrap();
    let b = encode_config(&Config::default(), &format).unwrap();
    assert_eq!(a, b);
}
