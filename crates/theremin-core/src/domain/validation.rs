//! Invariant violations reported by config validation.

use thiserror::Error;

use crate::domain::axis::AxisId;

/// A field that is present but violates an invariant.
///
/// `axis` is `None` for top-level fields such as `type`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value for {}: {reason}", field_path(.axis, .field))]
pub struct ValidationError {
    pub axis: Option<AxisId>,
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    /// Violation of a field inside an axis block.
    pub fn axis(axis: AxisId, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            axis: Some(axis),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Violation of a top-level field.
    pub fn root(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            axis: None,
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Dotted location of the field, e.g. `x.fmin` or `type`.
    pub fn path(&self) -> String {
        field_path(&self.axis, &self.field)
    }
}

fn field_path(axis: &Option<AxisId>, field: &str) -> String {
    match axis {
        Some(axis) => format!("{axis}.{field}"),
        None => field.to_string(),
    }
}
