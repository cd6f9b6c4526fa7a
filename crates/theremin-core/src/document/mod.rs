//! Byte-level representation of the config: the JSON document codec.

pub mod codec;

pub use codec::{
    decode_config, encode_config, DocumentError, DocumentFormat, FormatError, LEGACY_WAVE_SHAPE_KEY,
    RESERVED_AXIS_KEYS,
};
