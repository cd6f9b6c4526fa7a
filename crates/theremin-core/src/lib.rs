//! # theremin-core
//!
//! Config model and document codec for the theremin synthesizer's axis
//! mapping.  A touch surface reports three input axes (x, y, z); each axis
//! is mapped onto a frequency range with its own sensitivity, audio effect,
//! and response curve.
//!
//! - **`domain`** – the in-memory [`Config`] and its invariants.  A config
//!   that fails [`Config::validate`] must never reach the audio engine.
//! - **`document`** – the JSON document stored on disk, decoded through a
//!   strict three-pass reader (syntax, presence, values) so each failure
//!   names the field at fault.
//!
//! This crate performs no I/O.  Persistence lives in `theremin-store`.

pub mod document;
pub mod domain;

pub use document::{decode_config, encode_config, DocumentError, DocumentFormat, FormatError};
pub use domain::{Axes, AxisConfig, AxisId, Config, Effect, ValidationError, WaveShape};
