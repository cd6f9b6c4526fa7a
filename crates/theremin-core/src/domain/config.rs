//! Root configuration document for one input device.

use std::ops::{Index, IndexMut};

use crate::domain::axis::{AxisConfig, AxisId};
use crate::domain::validation::ValidationError;

/// Key of the device type tag in the stored document.
pub const TYPE_FIELD: &str = "type";

/// Device type written by [`Config::default`].
pub const DEFAULT_DEVICE_TYPE: &str = "touchscreen";

/// The three axis records.  All three are always present.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Axes {
    pub x: AxisConfig,
    pub y: AxisConfig,
    pub z: AxisConfig,
}

impl Axes {
    /// Builds all three axes from the same settings.
    pub fn uniform(axis: AxisConfig) -> Self {
        Self {
            x: axis.clone(),
            y: axis.clone(),
            z: axis,
        }
    }

    /// Iterates `(axis, settings)` in x, y, z order.
    pub fn iter(&self) -> impl Iterator<Item = (AxisId, &AxisConfig)> {
        AxisId::ALL.into_iter().map(move |id| (id, &self[id]))
    }
}

impl Index<AxisId> for Axes {
    type Output = AxisConfig;

    fn index(&self, axis: AxisId) -> &AxisConfig {
        match axis {
            AxisId::X => &self.x,
            AxisId::Y => &self.y,
            AxisId::Z => &self.z,
        }
    }
}

impl IndexMut<AxisId> for Axes {
    fn index_mut(&mut self, axis: AxisId) -> &mut AxisConfig {
        match axis {
            AxisId::X => &mut self.x,
            AxisId::Y => &mut self.y,
            AxisId::Z => &mut self.z,
        }
    }
}

/// Axis-to-synth mapping for one input surface.
///
/// A `Config` obtained from [`crate::document::decode_config`] has already
/// passed [`Config::validate`].  A `Config` built by hand should be validated
/// before it reaches the audio engine; the store does this on save.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Kind of input surface, e.g. `"touchscreen"`.
    pub device_type: String,
    pub axes: Axes,
}

impl Default for Config {
    /// Touchscreen with every axis at 20–300 Hz, unit sensitivity, no effect
    /// and a sine response curve.
    fn default() -> Self {
        Self {
            device_type: DEFAULT_DEVICE_TYPE.to_string(),
            axes: Axes::default(),
        }
    }
}

impl Config {
    pub fn new(device_type: impl Into<String>, axes: Axes) -> Self {
        Self {
            device_type: device_type.into(),
            axes,
        }
    }

    /// Settings for a single axis.
    pub fn axis(&self, axis: AxisId) -> &AxisConfig {
        &self.axes[axis]
    }

    /// Mutable settings for a single axis.
    pub fn axis_mut(&mut self, axis: AxisId) -> &mut AxisConfig {
        &mut self.axes[axis]
    }

    /// Checks every invariant, reporting the first violation in document
    /// order: `type`, then the x, y and z axes.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] describing the offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.device_type.trim().is_empty() {
            return Err(ValidationError::root(TYPE_FIELD, "must not be empty"));
        }
        for (id, axis) in self.axes.iter() {
            axis.validate(id)?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
