//! Domain model for the axis-mapping configuration.
//!
//! Pure types and invariants with no I/O.  Everything that touches bytes
//! lives in [`crate::document`]; everything that touches storage lives in the
//! `theremin-store` crate.

pub mod axis;
pub mod config;
pub mod validation;

pub use axis::{AxisConfig, AxisId, Effect, UnknownName, WaveShape};
pub use config::{Axes, Config};
pub use validation::ValidationError;
