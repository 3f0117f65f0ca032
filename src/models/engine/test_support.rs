use uom::si::{angular_velocity::revolution_per_minute, f64::AngularVelocity};

use crate::support::{angle::CrankAngle, units::UnitSystem};

use super::{
    cam::{CamProfile, CamSpecification},
    geometry::EngineParameters,
};

/// A 2.8 L metric four with 1 mm of piston-to-deck clearance.
pub(crate) fn metric_engine() -> EngineParameters {
    let units = UnitSystem::Metric;
    EngineParameters {
        bore: units.length(100.0),
        stroke: units.length(90.0),
        rod_length: units.length(150.0),
        deck_height: units.length(229.0),
        gasket_height: units.length(1.0),
        comp_height: units.length(34.0),
        piston_volume: units.volume(0.0),
        chamber_volume: units.volume(70.0),
        rpm: AngularVelocity::new::<revolution_per_minute>(6000.0),
        cylinder_count: 4,
        units,
    }
}

/// Intake 220° @ 1.27 mm on 106° ATDC, exhaust 228° on 114° BTDC.
///
/// Returned uninitialized.
pub(crate) fn cam_specification() -> CamSpecification {
    let units = UnitSystem::Metric;
    let checking = units.default_checking_lift();

    let intake = CamProfile::new(
        units.length(12.0),
        220.0,
        checking,
        CrankAngle::from_degrees(106.0),
    )
    .expect("valid intake profile");

    let exhaust = CamProfile::new(
        units.length(11.5),
        228.0,
        checking,
        CrankAngle::from_btdc(114.0),
    )
    .expect("valid exhaust profile");

    CamSpecification::new(intake, exhaust)
}
