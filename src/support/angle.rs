//! Crank angles over a 4-stroke cycle.
//!
//! A 4-stroke engine completes one working cycle every two crank
//! revolutions, so valve events are located on a 720° circle measured after
//! top dead center (ATDC) of the intake stroke. [`CrankAngle`] stores degrees
//! as given and offers the cycle arithmetic the cam model needs.
//!
//! Piston motion repeats every 360°, which the trigonometric functions in the
//! geometry model handle on their own.

use std::fmt;

/// Degrees in one full 4-stroke cycle.
pub const CYCLE_DEGREES: f64 = 720.0;

/// Degrees in one crank revolution.
pub const REVOLUTION_DEGREES: f64 = 360.0;

/// A crank angle in degrees ATDC.
///
/// The value is not normalized on construction. Call
/// [`normalized`](Self::normalized) to fold it into `[0, 720)`.
///
/// ```
/// use piston_motion::support::angle::CrankAngle;
///
/// let a = CrankAngle::from_degrees(-20.0).normalized();
/// assert_eq!(a.degrees(), 700.0);
///
/// let b = CrankAngle::from_degrees(1460.0).normalized();
/// assert_eq!(b.degrees(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct CrankAngle(f64);

impl CrankAngle {
    /// Top dead center at the start of the intake stroke.
    pub const TDC: Self = Self(0.0);

    /// Constructs a crank angle from degrees ATDC.
    #[must_use]
    pub const fn from_degrees(degrees: f64) -> Self {
        Self(degrees)
    }

    /// Converts an exhaust lobe centerline given in degrees BTDC into ATDC.
    ///
    /// Exhaust centerlines are quoted before the overlap TDC that closes the
    /// cycle, so the ATDC position is `720 - btdc`, normalized.
    ///
    /// ```
    /// use piston_motion::support::angle::CrankAngle;
    ///
    /// assert_eq!(CrankAngle::from_btdc(110.0).degrees(), 610.0);
    /// ```
    #[must_use]
    pub fn from_btdc(btdc: f64) -> Self {
        Self(CYCLE_DEGREES - btdc).normalized()
    }

    /// Returns the angle in degrees.
    #[must_use]
    pub const fn degrees(self) -> f64 {
        self.0
    }

    /// Returns the angle in radians.
    #[must_use]
    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }

    /// Folds the angle into `[0, 720)`.
    #[must_use]
    pub fn normalized(self) -> Self {
        let folded = self.0.rem_euclid(CYCLE_DEGREES);
        // Tiny negative inputs round up to exactly 720.
        if folded >= CYCLE_DEGREES {
            Self(0.0)
        } else {
            Self(folded)
        }
    }

    /// Returns the signed distance in degrees from `reference` to `self`,
    /// taking the short way around the cycle.
    ///
    /// The result lies in `(-360, 360]`.
    #[must_use]
    pub fn offset_from(self, reference: CrankAngle) -> f64 {
        let delta = self.0 - reference.0;
        REVOLUTION_DEGREES - (REVOLUTION_DEGREES - delta).rem_euclid(CYCLE_DEGREES)
    }
}

impl From<u16> for CrankAngle {
    fn from(degrees: u16) -> Self {
        Self(f64::from(degrees))
    }
}

impl fmt::Display for CrankAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn normalizes_into_cycle() {
        assert_eq!(CrankAngle::from_degrees(0.0).normalized().degrees(), 0.0);
        assert_eq!(CrankAngle::from_degrees(720.0).normalized().degrees(), 0.0);
        assert_eq!(CrankAngle::from_degrees(719.5).normalized().degrees(), 719.5);
        assert_eq!(CrankAngle::from_degrees(-1.0).normalized().degrees(), 719.0);
    }

    #[test]
    fn normalizes_large_negative_angles() {
        let angle = CrankAngle::from_degrees(-720.0 * 1.0e6 - 30.0).normalized();
        assert_relative_eq!(angle.degrees(), 690.0, epsilon = 1e-6);
    }

    #[test]
    fn tiny_negative_angle_does_not_reach_cycle_end() {
        let angle = CrankAngle::from_degrees(-1.0e-15).normalized();
        assert!(angle.degrees() < CYCLE_DEGREES);
        assert!(angle.degrees() >= 0.0);
    }

    #[test]
    fn offsets_take_short_way_around() {
        let center = CrankAngle::from_degrees(10.0);
        assert_eq!(CrankAngle::from_degrees(710.0).offset_from(center), -20.0);
        assert_eq!(CrankAngle::from_degrees(40.0).offset_from(center), 30.0);

        let center = CrankAngle::from_degrees(700.0);
        assert_eq!(CrankAngle::from_degrees(20.0).offset_from(center), 40.0);
    }

    #[test]
    fn offset_half_cycle_is_positive() {
        let center = CrankAngle::from_degrees(0.0);
        assert_eq!(CrankAngle::from_degrees(360.0).offset_from(center), 360.0);
        assert_eq!(CrankAngle::from_degrees(-360.0).offset_from(center), 360.0);
    }

    #[test]
    fn exhaust_btdc_conversion() {
        assert_eq!(CrankAngle::from_btdc(114.0).degrees(), 606.0);
        assert_eq!(CrankAngle::from_btdc(0.0).degrees(), 0.0);
        assert_eq!(CrankAngle::from_btdc(-10.0).degrees(), 10.0);
    }
}
