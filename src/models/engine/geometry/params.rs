use std::fmt;

use thiserror::Error;
use uom::si::{
    angular_velocity::revolution_per_minute,
    f64::{AngularVelocity, Length, Volume},
};

use crate::support::{
    constraint::{ConstraintError, NonNegative, StrictlyPositive},
    units::UnitSystem,
};

/// Physical description of one cylinder's slider-crank and combustion space.
///
/// Construct this from validated input and hand it to
/// [`EngineGeometry`](super::EngineGeometry) by reference.
/// Nothing in this crate mutates it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineParameters {
    /// Cylinder bore diameter.
    pub bore: Length,

    /// Crank stroke (twice the crank throw).
    pub stroke: Length,

    /// Connecting rod length, center to center.
    pub rod_length: Length,

    /// Block deck height, crank centerline to deck surface.
    pub deck_height: Length,

    /// Compressed head gasket thickness.
    pub gasket_height: Length,

    /// Piston compression height, pin center to crown.
    pub comp_height: Length,

    /// Piston crown volume.
    ///
    /// Positive for a dome, negative for a dish.
    pub piston_volume: Volume,

    /// Cylinder head combustion chamber volume.
    pub chamber_volume: Volume,

    /// Engine speed used for piston velocity.
    pub rpm: AngularVelocity,

    /// Number of cylinders, used only for total displacement.
    pub cylinder_count: u32,

    /// Unit system the values were entered in and reports are labelled in.
    pub units: UnitSystem,
}

/// A fatal problem with an [`EngineParameters`] set.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ParameterError {
    /// A single value violates its own constraint.
    #[error("invalid {field}")]
    Invalid {
        field: &'static str,
        #[source]
        source: ConstraintError,
    },

    /// The rod cannot clear the crank throw.
    #[error("rod length {rod_length:?} is shorter than the crank throw {throw:?}")]
    RodShorterThanThrow { rod_length: Length, throw: Length },

    /// The piston crown displaces the whole chamber.
    #[error("piston volume {piston_volume:?} leaves no clearance in chamber {chamber_volume:?}")]
    NonPositiveClearance {
        chamber_volume: Volume,
        piston_volume: Volume,
    },
}

/// A questionable but computable [`EngineParameters`] set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterWarning {
    /// The rod is shorter than the stroke, an unusual and likely mistyped geometry.
    RodShorterThanStroke { rod_length: Length, stroke: Length },
}

impl fmt::Display for ParameterWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RodShorterThanStroke { rod_length, stroke } => write!(
                f,
                "rod length {rod_length:?} is shorter than the stroke {stroke:?}"
            ),
        }
    }
}

impl EngineParameters {
    /// Checks every invariant the models rely on.
    ///
    /// Returns the non-fatal findings on success. Each warning is also
    /// emitted as a `tracing` warning event.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParameterError`] found.
    pub fn validate(&self) -> Result<Vec<ParameterWarning>, ParameterError> {
        StrictlyPositive::new(self.bore).map_err(invalid("bore"))?;
        StrictlyPositive::new(self.stroke).map_err(invalid("stroke"))?;
        StrictlyPositive::new(self.rod_length).map_err(invalid("rod length"))?;
        StrictlyPositive::new(self.deck_height).map_err(invalid("deck height"))?;
        NonNegative::new(self.gasket_height).map_err(invalid("gasket height"))?;
        StrictlyPositive::new(self.comp_height).map_err(invalid("compression height"))?;
        StrictlyPositive::new(self.rpm.get::<revolution_per_minute>()).map_err(invalid("rpm"))?;
        StrictlyPositive::new(self.cylinder_count).map_err(invalid("cylinder count"))?;

        if self.piston_volume.value.is_nan() {
            return Err(invalid("piston volume")(ConstraintError::NotANumber));
        }

        let throw = self.stroke / 2.0;
        if self.rod_length < throw {
            return Err(ParameterError::RodShorterThanThrow {
                rod_length: self.rod_length,
                throw,
            });
        }

        if StrictlyPositive::new(self.chamber_volume - self.piston_volume).is_err() {
            return Err(ParameterError::NonPositiveClearance {
                chamber_volume: self.chamber_volume,
                piston_volume: self.piston_volume,
            });
        }

        let mut warnings = Vec::new();
        if self.rod_length < self.stroke {
            warnings.push(ParameterWarning::RodShorterThanStroke {
                rod_length: self.rod_length,
                stroke: self.stroke,
            });
        }

        for warning in &warnings {
            tracing::warn!(%warning, "engine parameters accepted with a warning");
        }

        Ok(warnings)
    }
}

fn invalid(field: &'static str) -> impl FnOnce(ConstraintError) -> ParameterError {
    move |source| ParameterError::Invalid { field, source }
}
