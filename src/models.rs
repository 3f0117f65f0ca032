//! Engine models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Model structure
//!
//! Each model owns its domain logic behind a plain Rust API. Where a model
//! maps one crank angle to one output, a thin [`twine_core::Model`] adapter
//! delegates to that API so it can be composed with other Twine tooling.

pub mod engine;
