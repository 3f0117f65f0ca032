//! # Piston Motion
//!
//! Slider-crank kinematics and cam-driven valve timing for reciprocating
//! engine builds.
//!
//! ## Crate layout
//!
//! - [`models`]: Engine geometry, cam timing and full-cycle sampling, exposed
//!   as [`twine_core::Model`] implementations where they map a crank angle to
//!   an output.
//! - [`config`]: YAML run files that describe an engine and its cams.
//! - [`report`]: CSV export and the console summary of a sampled cycle.
//! - [`support`]: Crank angles, unit systems and value constraints.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.

pub mod config;
pub mod models;
pub mod report;
pub mod support;
