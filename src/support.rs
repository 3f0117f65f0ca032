//! Supporting utilities used by the engine models.
//!
//! These modules are public because callers building their own input layer
//! need them, but their APIs are not stable.

pub mod angle;
pub mod constraint;
pub mod units;
