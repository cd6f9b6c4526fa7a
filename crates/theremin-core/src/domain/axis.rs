//! Per-axis mapping settings.
//!
//! Each of the three tracked input dimensions carries its own frequency range,
//! input sensitivity, effect selector, and response curve.  The two selectors
//! are closed enums: a name the audio engine does not recognise is a
//! validation failure, never a silent fallback.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::validation::ValidationError;

/// One of the three tracked input dimensions on the touch surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisId {
    X,
    Y,
    Z,
}

impl AxisId {
    /// All axes in document order.
    pub const ALL: [AxisId; 3] = [AxisId::X, AxisId::Y, AxisId::Z];

    /// Returns the key used for this axis in the stored document.
    pub fn as_str(self) -> &'static str {
        match self {
            AxisId::X => "x",
            AxisId::Y => "y",
            AxisId::Z => "z",
        }
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognised selector name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised {kind} {name:?}")]
pub struct UnknownName {
    /// What was being parsed (`"axis"`, `"effect"`, `"wave shape"`).
    pub kind: &'static str,
    /// The offending input.
    pub name: String,
}

impl FromStr for AxisId {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(AxisId::X),
            "y" => Ok(AxisId::Y),
            "z" => Ok(AxisId::Z),
            other => Err(UnknownName {
                kind: "axis",
                name: other.to_string(),
            }),
        }
    }
}

/// Audio post-processing applied to the tone produced by an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    /// Raw tone, no processing.
    #[default]
    None,
    /// Snap the output frequency to the nearest note of the chromatic scale.
    Autotune,
}

impl Effect {
    /// Every effect the engine recognises.
    pub const ALL: [Effect; 2] = [Effect::None, Effect::Autotune];

    /// Wire name of the effect.
    pub fn as_str(self) -> &'static str {
        match self {
            Effect::None => "none",
            Effect::Autotune => "autotune",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Effect {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Effect::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| UnknownName {
                kind: "effect",
                name: s.to_string(),
            })
    }
}

/// Response curve mapping raw input magnitude onto the axis frequency range.
///
/// The names come from the synthesizer's wave-type vocabulary, but here they
/// select the *shape of the mapping*, not an oscillator waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveShape {
    #[default]
    Sin,
    Square,
    Triangle,
    Sawtooth,
    Linear,
}

impl WaveShape {
    /// Every curve the engine recognises.
    pub const ALL: [WaveShape; 5] = [
        WaveShape::Sin,
        WaveShape::Square,
        WaveShape::Triangle,
        WaveShape::Sawtooth,
        WaveShape::Linear,
    ];

    /// Wire name of the curve.
    pub fn as_str(self) -> &'static str {
        match self {
            WaveShape::Sin => "sin",
            WaveShape::Square => "square",
            WaveShape::Triangle => "triangle",
            WaveShape::Sawtooth => "sawtooth",
            WaveShape::Linear => "linear",
        }
    }
}

impl fmt::Display for WaveShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaveShape {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WaveShape::ALL
            .into_iter()
            .find(|w| w.as_str() == s)
            .ok_or_else(|| UnknownName {
                kind: "wave shape",
                name: s.to_string(),
            })
    }
}

/// Field names inside an axis block.
pub mod field {
    pub const FMIN: &str = "fmin";
    pub const FMAX: &str = "fmax";
    pub const SENSITIVITY: &str = "sensitivity";
    pub const EFFECT: &str = "effect";
    pub const WAVE_SHAPE: &str = "waveShape";
}

/// Mapping settings for a single axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisConfig {
    /// Lower frequency bound in Hz.
    pub fmin: f64,
    /// Upper frequency bound in Hz.
    pub fmax: f64,
    /// Scale factor applied to raw input magnitude before mapping.
    pub sensitivity: f64,
    pub effect: Effect,
    pub wave_shape: WaveShape,
}

impl Default for AxisConfig {
    /// 20–300 Hz, unit sensitivity, no effect, sine curve.
    fn default() -> Self {
        Self {
            fmin: 20.0,
            fmax: 300.0,
            sensitivity: 1.0,
            effect: Effect::None,
            wave_shape: WaveShape::Sin,
        }
    }
}

impl AxisConfig {
    /// Checks the numeric invariants of this axis.
    ///
    /// The enum selectors are valid by construction; the numeric fields are
    /// checked in document order (`fmin`, `fmax`, `sensitivity`) and the first
    /// violation is reported.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] naming `axis` and the offending field.
    pub fn validate(&self, axis: AxisId) -> Result<(), ValidationError> {
        if !self.fmin.is_finite() {
            return Err(ValidationError::axis(
                axis,
                field::FMIN,
                format!("must be a finite number, got {}", self.fmin),
            ));
        }
        if self.fmin < 0.0 {
            return Err(ValidationError::axis(
                axis,
                field::FMIN,
                format!("must be >= 0, got {}", self.fmin),
            ));
        }
        if !self.fmax.is_finite() {
            return Err(ValidationError::axis(
                axis,
                field::FMAX,
                format!("must be a finite number, got {}", self.fmax),
            ));
        }
        if self.fmin > self.fmax {
            return Err(ValidationError::axis(
                axis,
                field::FMIN,
                format!("must not exceed fmax ({} > {})", self.fmin, self.fmax),
            ));
        }
        if !self.sensitivity.is_finite() || self.sensitivity <= 0.0 {
            return Err(ValidationError::axis(
                axis,
                field::SENSITIVITY,
                format!("must be a finite number > 0, got {}", self.sensitivity),
            ));
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
