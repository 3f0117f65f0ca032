use std::f64::consts::PI;

use uom::{ConstZero, si::f64::Length};

use crate::support::{
    angle::CrankAngle,
    constraint::{ConstraintError, NonNegative, StrictlyPositive},
};

use super::{CamError, CamTiming, error::invalid};

/// Default valve seat angle in degrees.
pub const DEFAULT_VALVE_ANGLE: f64 = 45.0;

/// One cam lobe with its rocker and valve, as read off a cam card.
///
/// Seat timing is derived by an explicit [`initialize`](Self::initialize)
/// step. Lift queries before that fail with [`CamError::NotInitialized`].
/// Builder methods that change the profile discard any earlier timing.
#[derive(Debug, Clone, PartialEq)]
pub struct CamProfile {
    max_lift: Length,
    duration_at_lift: f64,
    checking_lift: Length,
    lobe_centerline: CrankAngle,
    rocker_ratio: f64,
    valve_diameter: Length,
    valve_angle: f64,
    pocket_depth: Length,
    timing: Option<CamTiming>,
}

impl CamProfile {
    /// Constructs a profile with a 1.0 rocker ratio and no valve details.
    ///
    /// `duration_at_lift` is in crank degrees measured at `checking_lift`.
    /// `lobe_centerline` is the crank angle ATDC of peak lift; exhaust
    /// centerlines quoted BTDC go through [`CrankAngle::from_btdc`] first.
    ///
    /// # Errors
    ///
    /// Returns [`CamError::Invalid`] if the lift or duration is not strictly
    /// positive or the checking lift is negative.
    pub fn new(
        max_lift: Length,
        duration_at_lift: f64,
        checking_lift: Length,
        lobe_centerline: CrankAngle,
    ) -> Result<Self, CamError> {
        StrictlyPositive::new(max_lift).map_err(invalid("max lift"))?;
        StrictlyPositive::new(duration_at_lift).map_err(invalid("duration"))?;
        NonNegative::new(checking_lift).map_err(invalid("checking lift"))?;
        if lobe_centerline.degrees().is_nan() {
            return Err(invalid("centerline")(ConstraintError::NotANumber));
        }

        Ok(Self {
            max_lift,
            duration_at_lift,
            checking_lift,
            lobe_centerline,
            rocker_ratio: 1.0,
            valve_diameter: Length::ZERO,
            valve_angle: DEFAULT_VALVE_ANGLE,
            pocket_depth: Length::ZERO,
            timing: None,
        })
    }

    /// Sets the rocker arm ratio.
    ///
    /// # Errors
    ///
    /// Returns [`CamError::Invalid`] unless `ratio` is strictly positive.
    pub fn with_rocker_ratio(mut self, ratio: f64) -> Result<Self, CamError> {
        self.rocker_ratio = StrictlyPositive::new(ratio)
            .map_err(invalid("rocker ratio"))?
            .into_inner();
        self.timing = None;
        Ok(self)
    }

    /// Records the valve head diameter, seat angle and piston pocket depth.
    ///
    /// # Errors
    ///
    /// Returns [`CamError::Invalid`] for a negative diameter or pocket depth
    /// or a non-positive seat angle.
    pub fn with_valve(
        mut self,
        diameter: Length,
        seat_angle: f64,
        pocket_depth: Length,
    ) -> Result<Self, CamError> {
        self.valve_diameter = NonNegative::new(diameter)
            .map_err(invalid("valve diameter"))?
            .into_inner();
        self.valve_angle = StrictlyPositive::new(seat_angle)
            .map_err(invalid("valve angle"))?
            .into_inner();
        self.pocket_depth = NonNegative::new(pocket_depth)
            .map_err(invalid("pocket depth"))?
            .into_inner();
        self.timing = None;
        Ok(self)
    }

    /// Derives seat timing from the checking duration.
    ///
    /// Calling this again recomputes the same timing.
    pub fn initialize(&mut self) -> &CamTiming {
        let timing =
            CamTiming::from_checking_duration(self.duration_at_lift, self.lobe_centerline);
        tracing::debug!(
            centerline = %self.lobe_centerline,
            opening = %timing.opening,
            closing = %timing.closing,
            total_duration = timing.total_duration,
            "cam timing initialized"
        );
        self.timing.insert(timing)
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.timing.is_some()
    }

    /// Returns the derived seat timing.
    ///
    /// # Errors
    ///
    /// Returns [`CamError::NotInitialized`] before [`initialize`](Self::initialize).
    pub fn timing(&self) -> Result<&CamTiming, CamError> {
        self.timing.as_ref().ok_or(CamError::NotInitialized)
    }

    /// True when the valve is off its seat at `angle`.
    ///
    /// # Errors
    ///
    /// Returns [`CamError::NotInitialized`] before [`initialize`](Self::initialize).
    pub fn is_valve_open(&self, angle: CrankAngle) -> Result<bool, CamError> {
        Ok(self.timing()?.contains(angle))
    }

    /// Lift at the cam follower at `angle`.
    ///
    /// The lobe is modelled as a cosine bell spanning the seat-to-seat
    /// duration, peaking at the centerline:
    ///
    /// ```text
    /// lift = max_lift · (1 + cos(π·|Δθ| / (duration / 2))) / 2
    /// ```
    ///
    /// This is a modelling simplification. It does not reproduce measured
    /// ramp or flank shapes.
    ///
    /// # Errors
    ///
    /// Returns [`CamError::NotInitialized`] before [`initialize`](Self::initialize).
    pub fn cam_lift_at(&self, angle: CrankAngle) -> Result<Length, CamError> {
        let timing = self.timing()?;
        let angle = angle.normalized();
        if !timing.contains(angle) {
            return Ok(Length::ZERO);
        }

        let offset = angle.offset_from(self.lobe_centerline);
        let position = (offset / timing.half_duration()).abs();
        if position > 1.0 {
            return Ok(Length::ZERO);
        }

        let lift_ratio = ((1.0 + (position * PI).cos()) / 2.0).max(0.0);
        Ok(self.max_lift * lift_ratio)
    }

    /// Lift at the valve, the cam lift multiplied by the rocker ratio.
    ///
    /// # Errors
    ///
    /// Returns [`CamError::NotInitialized`] before [`initialize`](Self::initialize).
    pub fn valve_lift_at(&self, angle: CrankAngle) -> Result<Length, CamError> {
        Ok(self.cam_lift_at(angle)? * self.rocker_ratio)
    }

    #[must_use]
    pub fn max_lift(&self) -> Length {
        self.max_lift
    }

    /// Duration in crank degrees at the checking lift.
    #[must_use]
    pub fn duration_at_lift(&self) -> f64 {
        self.duration_at_lift
    }

    #[must_use]
    pub fn checking_lift(&self) -> Length {
        self.checking_lift
    }

    #[must_use]
    pub fn lobe_centerline(&self) -> CrankAngle {
        self.lobe_centerline
    }

    #[must_use]
    pub fn rocker_ratio(&self) -> f64 {
        self.rocker_ratio
    }

    #[must_use]
    pub fn valve_diameter(&self) -> Length {
        self.valve_diameter
    }

    /// Valve seat angle in degrees.
    #[must_use]
    pub fn valve_angle(&self) -> f64 {
        self.valve_angle
    }

    #[must_use]
    pub fn pocket_depth(&self) -> Length {
        self.pocket_depth
    }
}
