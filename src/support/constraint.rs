//! Numeric constraints checked once at construction time.
//!
//! Engine inputs arrive as raw numbers (or raw [`uom`] quantities) from a
//! configuration file or a prompt. Wrapping them in [`Constrained<T, C>`]
//! records that a value was checked against an invariant such as "strictly
//! positive", so validation code reads as a list of requirements instead of a
//! pile of comparisons.
//!
//! # Provided constraints
//!
//! - [`NonNegative`]: Zero or greater (gasket thickness, valve pocket depth)
//! - [`StrictlyPositive`]: Greater than zero (bore, stroke, rpm, cylinder count)
//!
//! Each marker also provides an associated `new()` constructor
//! (e.g., `StrictlyPositive::new(90.0)`).
//!
//! # Extending
//!
//! Additional invariants can be expressed by implementing [`Constraint<T>`]
//! for another zero-sized marker type.

mod non_negative;
mod strictly_positive;

use std::marker::PhantomData;

use thiserror::Error;

pub use non_negative::NonNegative;
pub use strictly_positive::StrictlyPositive;

/// A trait for enforcing numeric invariants at construction time.
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// An error returned when a [`Constraint`] is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
}

/// A value that is known to satisfy the constraint `C`.
///
/// # Example
///
/// ```
/// use piston_motion::support::constraint::{Constrained, StrictlyPositive};
///
/// let cylinders = Constrained::<u32, StrictlyPositive>::new(8).unwrap();
/// assert_eq!(cylinders.into_inner(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Constructs a new constrained value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}
