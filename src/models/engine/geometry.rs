//! Slider-crank geometry of a single cylinder.
//!
//! [`EngineGeometry`] turns a crank angle into piston position and speed and
//! derives the static figures an engine builder checks before machining:
//! displacement, bore/stroke and rod ratios, piston-to-deck clearance and
//! static compression ratio.
//!
//! Position follows the usual slider-crank relation with crank throw
//! `r = stroke / 2` and rod length `l`:
//!
//! ```text
//! x(θ) = r·cos θ + √(l² − (r·sin θ)²)
//! ```
//!
//! where `x` is the distance from the crank centerline to the wrist pin.

mod error;
mod metrics;
mod params;

pub use error::GeometryError;
pub use metrics::StaticMetrics;
pub use params::{EngineParameters, ParameterError, ParameterWarning};

use std::f64::consts::PI;

use twine_core::Model;
use uom::si::{
    angular_velocity::radian_per_second,
    f64::{Length, Velocity, Volume},
    length::meter,
    velocity::meter_per_second,
    volume::cubic_meter,
};

use crate::support::angle::CrankAngle;

/// Piston position and speed at one crank angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PistonState {
    /// Crown height relative to the top of the head gasket.
    ///
    /// Zero means flush; negative means below the gasket surface.
    pub position: Length,

    /// Piston speed magnitude.
    pub velocity: Velocity,
}

/// Kinematic and static model of one cylinder.
#[derive(Debug, Clone, Copy)]
pub struct EngineGeometry<'a> {
    params: &'a EngineParameters,
}

/// Crank pin trigonometry shared by the position and velocity relations.
struct CrankPin {
    sin: f64,
    cos: f64,
    /// `√(l² − (r·sin θ)²)` in meters.
    rod_projection: f64,
}

impl<'a> EngineGeometry<'a> {
    #[must_use]
    pub fn new(params: &'a EngineParameters) -> Self {
        Self { params }
    }

    #[must_use]
    pub fn parameters(&self) -> &'a EngineParameters {
        self.params
    }

    fn crank_throw_m(&self) -> f64 {
        self.params.stroke.get::<meter>() / 2.0
    }

    fn bore_area_m2(&self) -> f64 {
        let radius = self.params.bore.get::<meter>() / 2.0;
        PI * radius * radius
    }

    fn crank_pin(&self, angle: CrankAngle) -> Result<CrankPin, GeometryError> {
        let r = self.crank_throw_m();
        let l = self.params.rod_length.get::<meter>();
        let (sin, cos) = angle.radians().sin_cos();

        let pin_offset = r * sin;
        let radicand = l * l - pin_offset * pin_offset;
        if radicand.is_nan() || radicand < 0.0 {
            return Err(GeometryError::RodTooShort {
                angle,
                rod_length: self.params.rod_length,
                pin_offset: Length::new::<meter>(pin_offset.abs()),
            });
        }

        Ok(CrankPin {
            sin,
            cos,
            rod_projection: radicand.sqrt(),
        })
    }

    /// Piston crown position at `angle`.
    ///
    /// Only `angle mod 360` matters. At TDC the result is the negated
    /// [`piston_to_deck`](Self::piston_to_deck) clearance.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::RodTooShort`] if the rod cannot reach the pin.
    pub fn position_at(&self, angle: CrankAngle) -> Result<Length, GeometryError> {
        let pin = self.crank_pin(angle)?;
        let x = Length::new::<meter>(self.crank_throw_m() * pin.cos + pin.rod_projection);

        let p = self.params;
        Ok(-((p.deck_height + p.gasket_height) - (x + p.comp_height)))
    }

    /// Piston speed magnitude at `angle` and the configured rpm.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::RodTooShort`] if the rod cannot reach the pin,
    /// including the degenerate case where it only just reaches it and the
    /// rod would stand perpendicular to the bore.
    pub fn velocity_at(&self, angle: CrankAngle) -> Result<Velocity, GeometryError> {
        let pin = self.crank_pin(angle)?;
        if pin.rod_projection == 0.0 {
            return Err(GeometryError::RodTooShort {
                angle,
                rod_length: self.params.rod_length,
                pin_offset: self.params.rod_length,
            });
        }

        let r = self.crank_throw_m();
        let omega = self.params.rpm.get::<radian_per_second>();
        let speed = omega * (r * pin.sin + (r * r * pin.sin * pin.cos) / pin.rod_projection);

        Ok(Velocity::new::<meter_per_second>(speed.abs()))
    }

    /// Position and speed at `angle`.
    ///
    /// # Errors
    ///
    /// See [`position_at`](Self::position_at) and [`velocity_at`](Self::velocity_at).
    pub fn state_at(&self, angle: CrankAngle) -> Result<PistonState, GeometryError> {
        Ok(PistonState {
            position: self.position_at(angle)?,
            velocity: self.velocity_at(angle)?,
        })
    }

    /// Swept volume of all cylinders.
    #[must_use]
    pub fn displacement(&self) -> Volume {
        let per_cylinder = self.bore_area_m2() * self.params.stroke.get::<meter>();
        Volume::new::<cubic_meter>(per_cylinder * f64::from(self.params.cylinder_count))
    }

    /// Bore divided by stroke.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroStroke`] for a zero stroke.
    pub fn bore_stroke_ratio(&self) -> Result<f64, GeometryError> {
        self.over_stroke(self.params.bore)
    }

    /// Rod length divided by stroke.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroStroke`] for a zero stroke.
    pub fn rod_ratio(&self) -> Result<f64, GeometryError> {
        self.over_stroke(self.params.rod_length)
    }

    fn over_stroke(&self, length: Length) -> Result<f64, GeometryError> {
        let stroke = self.params.stroke.get::<meter>();
        if stroke == 0.0 {
            return Err(GeometryError::ZeroStroke);
        }
        Ok(length.get::<meter>() / stroke)
    }

    /// Distance from the piston crown at TDC down to the top of the gasket.
    ///
    /// A negative value means the piston is out of the hole and is returned
    /// as is.
    #[must_use]
    pub fn piston_to_deck(&self) -> Length {
        let p = self.params;
        (p.deck_height + p.gasket_height) - (p.rod_length + p.comp_height + p.stroke / 2.0)
    }

    /// Static compression ratio.
    ///
    /// The clearance volume is the chamber volume minus the piston crown
    /// volume plus the compressed gasket cylinder. Deck clearance above the
    /// piston is not included.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonPositiveClearance`] when the piston crown
    /// fills the chamber.
    pub fn compression_ratio(&self) -> Result<f64, GeometryError> {
        let p = self.params;
        let area = self.bore_area_m2();
        let swept = area * p.stroke.get::<meter>();
        let gasket = area * p.gasket_height.get::<meter>();
        let clearance = (p.chamber_volume - p.piston_volume).get::<cubic_meter>() + gasket;

        if clearance.is_nan() || clearance <= 0.0 {
            return Err(GeometryError::NonPositiveClearance {
                clearance: Volume::new::<cubic_meter>(clearance),
            });
        }

        Ok((swept + clearance) / clearance)
    }
}

/// Exposes piston motion as a [`twine_core::Model`] over crank angle.
impl Model for EngineGeometry<'_> {
    type Input = CrankAngle;
    type Output = PistonState;
    type Error = GeometryError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.state_at(*input)
    }
}
