use thiserror::Error;
use uom::si::f64::{Length, Volume};

use crate::support::angle::CrankAngle;

/// Errors raised when engine geometry is physically impossible.
///
/// These are detected at the point of computation. Input validation catches
/// the same conditions earlier, but the model does not trust its input.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// The connecting rod cannot reach the crank pin at this angle.
    #[error("rod length {rod_length:?} cannot span crank pin offset {pin_offset:?} at {angle}")]
    RodTooShort {
        angle: CrankAngle,
        rod_length: Length,
        pin_offset: Length,
    },

    /// A ratio over the stroke was requested with a zero stroke.
    #[error("stroke is zero")]
    ZeroStroke,

    /// Chamber, piston and gasket volumes leave no clearance volume.
    #[error("clearance volume {clearance:?} is not positive")]
    NonPositiveClearance { clearance: Volume },
}
