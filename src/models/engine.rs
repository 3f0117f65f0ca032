//! Reciprocating engine models.
//!
//! - [`geometry`]: piston position and speed from crank angle, plus static
//!   build figures.
//! - [`cam`]: valve timing and lift from cam card figures.
//! - [`cycle`]: samples both across a full 4-stroke cycle.

pub mod cam;
pub mod cycle;
pub mod geometry;

#[cfg(test)]
pub(crate) mod test_support;
