use twine_core::Model;
use uom::{ConstZero, si::f64::Length};

use crate::support::angle::CrankAngle;

use super::{CamError, CamProfile};

/// Intake and exhaust valve lift at one crank angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValveLift {
    pub intake: Length,
    pub exhaust: Length,
}

impl ValveLift {
    /// Both valves on their seats.
    pub const CLOSED: Self = Self {
        intake: Length::ZERO,
        exhaust: Length::ZERO,
    };
}

/// The intake and exhaust lobes of one cylinder.
///
/// The two valves are evaluated independently. Nothing here checks whether
/// they collide with each other or with the piston.
#[derive(Debug, Clone, PartialEq)]
pub struct CamSpecification {
    intake: CamProfile,
    exhaust: CamProfile,
}

impl CamSpecification {
    /// Pairs two profiles.
    ///
    /// The exhaust centerline must already be expressed ATDC.
    #[must_use]
    pub fn new(intake: CamProfile, exhaust: CamProfile) -> Self {
        Self { intake, exhaust }
    }

    /// Initializes the timing of both profiles.
    pub fn initialize(&mut self) {
        self.intake.initialize();
        self.exhaust.initialize();
    }

    #[must_use]
    pub fn intake(&self) -> &CamProfile {
        &self.intake
    }

    #[must_use]
    pub fn exhaust(&self) -> &CamProfile {
        &self.exhaust
    }

    /// Valve lift of both valves at `angle`.
    ///
    /// # Errors
    ///
    /// Returns [`CamError::NotInitialized`] if either profile has not been
    /// initialized.
    pub fn valve_lift_at(&self, angle: CrankAngle) -> Result<ValveLift, CamError> {
        Ok(ValveLift {
            intake: self.intake.valve_lift_at(angle)?,
            exhaust: self.exhaust.valve_lift_at(angle)?,
        })
    }
}

/// Exposes valve lift as a [`twine_core::Model`] over crank angle.
impl Model for CamSpecification {
    type Input = CrankAngle;
    type Output = ValveLift;
    type Error = CamError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.valve_lift_at(*input)
    }
}
