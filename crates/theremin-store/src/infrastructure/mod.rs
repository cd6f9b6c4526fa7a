//! Infrastructure layer: OS-facing storage adapters.
//!
//! **Dependency rule**: this layer may depend on `theremin_core`, but MUST
//! NOT import from `application`.

pub mod storage;
