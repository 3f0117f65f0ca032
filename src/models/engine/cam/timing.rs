use crate::support::angle::CrankAngle;

/// Multiplier from duration at checking lift to seat-to-seat duration.
///
/// A fixed allowance for the opening and closing ramps below the checking
/// lift. Real ramps vary by lobe family.
pub const RAMP_FACTOR: f64 = 1.4;

/// Seat-to-seat valve event derived from a cam card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CamTiming {
    /// Seat-to-seat duration in crank degrees.
    pub total_duration: f64,

    /// Crank angle at which the valve leaves its seat, in `[0, 720)`.
    pub opening: CrankAngle,

    /// Crank angle at which the valve returns to its seat, in `[0, 720)`.
    pub closing: CrankAngle,
}

impl CamTiming {
    /// Extrapolates seat timing symmetrically about `centerline`.
    #[must_use]
    pub fn from_checking_duration(duration_at_lift: f64, centerline: CrankAngle) -> Self {
        let total_duration = duration_at_lift * RAMP_FACTOR;
        let half = total_duration / 2.0;
        let centerline = centerline.degrees();

        Self {
            total_duration,
            opening: CrankAngle::from_degrees(centerline - half).normalized(),
            closing: CrankAngle::from_degrees(centerline + half).normalized(),
        }
    }

    #[must_use]
    pub fn half_duration(&self) -> f64 {
        self.total_duration / 2.0
    }

    /// True when the event straddles the 720°/0° boundary.
    #[must_use]
    pub fn wraps(&self) -> bool {
        self.opening > self.closing
    }

    /// True when the valve is off its seat at `angle`, event edges included.
    #[must_use]
    pub fn contains(&self, angle: CrankAngle) -> bool {
        let angle = angle.normalized();
        if self.wraps() {
            angle >= self.opening || angle <= self.closing
        } else {
            angle >= self.opening && angle <= self.closing
        }
    }
}
