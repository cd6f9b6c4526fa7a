//! JSON codec for the stored config document.
//!
//! Document shape:
//! ```text
//! {
//!   "type": "touchscreen",
//!   "x": { "fmin": 20, "fmax": 300, "sensitivity": 1, "effect": "none", "waveShape": "sin" },
//!   "y": { ... },
//!   "z": { ... }
//! }
//! ```
//!
//! Decoding goes through a [`serde_json::Value`] tree rather than a derived
//! `Deserialize` so that every failure names the exact field at fault.  It
//! runs in three passes, each of which must pass before the next starts:
//!
//! 1. syntax: the bytes must be a JSON object ([`DocumentError::Malformed`]);
//! 2. presence: `type`, `x`, `y`, `z` and every axis field must exist
//!    ([`DocumentError::MissingField`]);
//! 3. values: types, enum names and [`Config::validate`]
//!    ([`DocumentError::InvalidValue`]).
//!
//! Unknown keys are ignored on decode and never written on encode.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::domain::axis::{field, AxisConfig, AxisId, Effect, WaveShape};
use crate::domain::config::{Axes, Config, TYPE_FIELD};
use crate::domain::validation::ValidationError;

/// Legacy wave-shape key written by the first releases of the synthesizer.
pub const LEGACY_WAVE_SHAPE_KEY: &str = "VWWWaveTypeSawtooth";

/// Placeholder key used by early drafts of the document format.
pub const DRAFT_WAVE_SHAPE_KEY: &str = "waveShape-key";

/// Errors produced while decoding or encoding a config document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DocumentError {
    /// The bytes are not a JSON object.
    #[error("malformed config document: {0}")]
    Malformed(String),

    /// A required key is absent.  Axis fields use dotted names (`x.fmin`).
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A field is present but has the wrong type or violates an invariant.
    #[error(transparent)]
    InvalidValue(#[from] ValidationError),

    /// The document could not be serialized.
    #[error("failed to serialize config document: {0}")]
    Encode(String),
}

/// Axis-block keys that a wave-shape key or alias may not reuse.
pub const RESERVED_AXIS_KEYS: [&str; 4] =
    [field::FMIN, field::FMAX, field::SENSITIVITY, field::EFFECT];

/// Rejected wave-shape key names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("wave-shape key must not be empty")]
    EmptyKey,

    /// The key collides with another field of the axis block.
    #[error("wave-shape key {0:?} is already used by an axis field")]
    ReservedKey(String),
}

/// Naming policy for the wave-shape key inside each axis block.
///
/// The key is written as [`DocumentFormat::wave_shape_key`].  On read, that
/// key is tried first, then each alias in order; the first one present wins.
/// Neither the key nor any alias may be one of [`RESERVED_AXIS_KEYS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFormat {
    wave_shape_key: String,
    wave_shape_aliases: Vec<String>,
}

impl Default for DocumentFormat {
    /// Writes `waveShape`; also reads `waveShape-key` and `VWWWaveTypeSawtooth`.
    fn default() -> Self {
        Self {
            wave_shape_key: field::WAVE_SHAPE.to_string(),
            wave_shape_aliases: vec![
                DRAFT_WAVE_SHAPE_KEY.to_string(),
                LEGACY_WAVE_SHAPE_KEY.to_string(),
            ],
        }
    }
}

impl DocumentFormat {
    /// A format that reads and writes only `wave_shape_key`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] if the key is empty or names another axis
    /// field.
    pub fn new(wave_shape_key: impl Into<String>) -> Result<Self, FormatError> {
        Ok(Self {
            wave_shape_key: check_key(wave_shape_key.into())?,
            wave_shape_aliases: Vec::new(),
        })
    }

    /// Adds a key that is accepted on read in place of the primary key.
    /// Repeating the primary key or an existing alias is a no-op.
    ///
    /// # Errors
    ///
    /// Same as [`DocumentFormat::new`].
    pub fn with_alias(mut self, alias: impl Into<String>) -> Result<Self, FormatError> {
        let alias = check_key(alias.into())?;
        if alias != self.wave_shape_key && !self.wave_shape_aliases.contains(&alias) {
            self.wave_shape_aliases.push(alias);
        }
        Ok(self)
    }

    /// Key written for the wave shape on encode.
    pub fn wave_shape_key(&self) -> &str {
        &self.wave_shape_key
    }

    /// Keys accepted on decode, in lookup order.
    pub fn wave_shape_read_keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.wave_shape_key.as_str())
            .chain(self.wave_shape_aliases.iter().map(String::as_str))
    }

    fn find_wave_shape<'s, 'a>(
        &'s self,
        block: &'a Map<String, Value>,
    ) -> Option<(&'s str, &'a Value)> {
        self.wave_shape_read_keys()
            .find_map(|key| block.get(key).map(|value| (key, value)))
    }
}

fn check_key(key: String) -> Result<String, FormatError> {
    if key.is_empty() {
        Err(FormatError::EmptyKey)
    } else if RESERVED_AXIS_KEYS.contains(&key.as_str()) {
        Err(FormatError::ReservedKey(key))
    } else {
        Ok(key)
    }
}

// ── Decode ────────────────────────────────────────────────────────────────────

/// Decodes and validates a config document.
///
/// # Errors
///
/// - [`DocumentError::Malformed`] if `bytes` is not a JSON object.
/// - [`DocumentError::MissingField`] for the first absent key, checking
///   `type`, `x`, `y`, `z` and then each axis's fields.
/// - [`DocumentError::InvalidValue`] for the first field with a wrong type,
///   an unknown enum name, or a violated invariant.
///
/// # Examples
///
/// ```rust
/// use theremin_core::document::{decode_config, DocumentFormat};
/// use theremin_core::AxisId;
///
/// let axis = r#"{"fmin":20,"fmax":300,"sensitivity":1,"effect":"none","waveShape":"sin"}"#;
/// let doc = format!(r#"{{"type":"touchscreen","x":{axis},"y":{axis},"z":{axis}}}"#);
/// let cfg = decode_config(doc.as_bytes(), &DocumentFormat::default()).unwrap();
/// assert_eq!(cfg.device_type, "touchscreen");
/// assert_eq!(cfg.axis(AxisId::X).fmin, 20.0);
/// ```
pub fn decode_config(bytes: &[u8], format: &DocumentFormat) -> Result<Config, DocumentError> {
    let doc: Value =
        serde_json::from_slice(bytes).map_err(|e| DocumentError::Malformed(e.to_string()))?;
    let root = doc.as_object().ok_or_else(|| {
        DocumentError::Malformed(format!(
            "document root must be a JSON object, found {}",
            kind_of(&doc)
        ))
    })?;

    check_presence(root, format)?;

    for key in root.keys() {
        if key != TYPE_FIELD && key.parse::<AxisId>().is_err() {
            debug!(key = %key, "ignoring unknown top-level key in config document");
        }
    }

    let device_type = root[TYPE_FIELD]
        .as_str()
        .ok_or_else(|| {
            ValidationError::root(
                TYPE_FIELD,
                format!("expected a string, found {}", kind_of(&root[TYPE_FIELD])),
            )
        })?
        .to_string();

    let axes = Axes {
        x: decode_axis(root, AxisId::X, format)?,
        y: decode_axis(root, AxisId::Y, format)?,
        z: decode_axis(root, AxisId::Z, format)?,
    };

    let config = Config { device_type, axes };
    config.validate()?;
    Ok(config)
}

fn check_presence(root: &Map<String, Value>, format: &DocumentFormat) -> Result<(), DocumentError> {
    if !root.contains_key(TYPE_FIELD) {
        return Err(DocumentError::MissingField(TYPE_FIELD.to_string()));
    }
    if let Some(axis) = AxisId::ALL
        .into_iter()
        .find(|axis| !root.contains_key(axis.as_str()))
    {
        return Err(DocumentError::MissingField(axis.to_string()));
    }

    for axis in AxisId::ALL {
        // Non-object blocks are reported as invalid values in the next pass.
        let Some(block) = root[axis.as_str()].as_object() else {
            continue;
        };
        for name in [field::FMIN, field::FMAX, field::SENSITIVITY, field::EFFECT] {
            if !block.contains_key(name) {
                return Err(DocumentError::MissingField(format!("{axis}.{name}")));
            }
        }
        if format.find_wave_shape(block).is_none() {
            return Err(DocumentError::MissingField(format!(
                "{axis}.{}",
                format.wave_shape_key()
            )));
        }
    }
    Ok(())
}

fn decode_axis(
    root: &Map<String, Value>,
    axis: AxisId,
    format: &DocumentFormat,
) -> Result<AxisConfig, ValidationError> {
    let value = &root[axis.as_str()];
    let block = value.as_object().ok_or_else(|| {
        ValidationError::root(
            axis.as_str(),
            format!("expected an object, found {}", kind_of(value)),
        )
    })?;

    let number = |name: &str| -> Result<f64, ValidationError> {
        match &block[name] {
            Value::Number(n) => n.as_f64().ok_or_else(|| {
                ValidationError::axis(axis, name, format!("{n} is out of range"))
            }),
            other => Err(ValidationError::axis(
                axis,
                name,
                format!("expected a number, found {}", kind_of(other)),
            )),
        }
    };
    let text = |name: &str, value: &Value| -> Result<String, ValidationError> {
        value.as_str().map(str::to_string).ok_or_else(|| {
            ValidationError::axis(
                axis,
                name,
                format!("expected a string, found {}", kind_of(value)),
            )
        })
    };

    let fmin = number(field::FMIN)?;
    let fmax = number(field::FMAX)?;
    let sensitivity = number(field::SENSITIVITY)?;

    let effect = text(field::EFFECT, &block[field::EFFECT])?
        .parse::<Effect>()
        .map_err(|e| ValidationError::axis(axis, field::EFFECT, format!("{e}")))?;

    let (shape_key, shape_value) = format
        .find_wave_shape(block)
        .ok_or_else(|| ValidationError::axis(axis, format.wave_shape_key(), "missing"))?;
    let wave_shape = text(shape_key, shape_value)?
        .parse::<WaveShape>()
        .map_err(|e| ValidationError::axis(axis, shape_key, format!("{e}")))?;

    Ok(AxisConfig {
        fmin,
        fmax,
        sensitivity,
        effect,
        wave_shape,
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── Encode ────────────────────────────────────────────────────────────────────

/// Encodes `config` as a pretty-printed JSON document in canonical shape.
///
/// # Errors
///
/// Returns [`DocumentError::InvalidValue`] if `config` fails validation, so an
/// invalid config never reaches the byte level.
pub fn encode_config(config: &Config, format: &DocumentFormat) -> Result<Vec<u8>, DocumentError> {
    config.validate()?;
    serde_json::to_vec_pretty(&ConfigDocument { config, format })
        .map_err(|e| DocumentError::Encode(e.to_string()))
}

struct ConfigDocument<'a> {
    config: &'a Config,
    format: &'a DocumentFormat,
}

impl Serialize for ConfigDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry(TYPE_FIELD, &self.config.device_type)?;
        for (id, axis) in self.config.axes.iter() {
            map.serialize_entry(
                id.as_str(),
                &AxisDocument {
                    axis,
                    wave_shape_key: self.format.wave_shape_key(),
                },
            )?;
        }
        map.end()
    }
}

struct AxisDocument<'a> {
    axis: &'a AxisConfig,
    wave_shape_key: &'a str,
}

impl Serialize for AxisDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5))?;
        map.serialize_entry(field::FMIN, &self.axis.fmin)?;
        map.serialize_entry(field::FMAX, &self.axis.fmax)?;
        map.serialize_entry(field::SENSITIVITY, &self.axis.sensitivity)?;
        map.serialize_entry(field::EFFECT, &self.axis.effect)?;
        map.serialize_entry(self.wave_shape_key, &self.axis.wave_shape)?;
        map.end()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
