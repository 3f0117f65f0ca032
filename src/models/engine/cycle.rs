//! Sampling piston motion and valve lift over a full 4-stroke cycle.
//!
//! [`sample_cycle`] evaluates the geometry model, and optionally the cam
//! model, at every whole degree from 0° to 719° ATDC and bundles the samples
//! with the static metrics into a [`CycleResults`].

mod error;
mod results;

pub use error::CycleError;
pub use results::{CycleResults, MotionSample, PeakVelocity};

use crate::support::angle::CrankAngle;

use super::{
    cam::{CamSpecification, ValveLift},
    geometry::{EngineGeometry, StaticMetrics},
};

/// Samples per cycle, one per whole degree.
pub const SAMPLES_PER_CYCLE: u16 = 720;

/// Last angle searched for peak piston speed.
///
/// Speed is periodic in 360° and symmetric about BDC, so the first half
/// revolution already holds the maximum.
pub const PEAK_SEARCH_END: u16 = 180;

/// Samples one engine over a 4-stroke cycle.
///
/// Without `cams`, both valve lift columns are zero and
/// [`CycleResults::has_valve_lift`] is false.
/// Cams must be initialized before they are passed in.
///
/// # Errors
///
/// Returns a [`CycleError`] when a static metric fails or when the piston or
/// valve model fails at any sampled angle. Sampling stops at the first
/// failure.
pub fn sample_cycle(
    geometry: &EngineGeometry<'_>,
    cams: Option<&CamSpecification>,
) -> Result<CycleResults, CycleError> {
    tracing::debug!(
        samples = SAMPLES_PER_CYCLE,
        with_cams = cams.is_some(),
        "sampling engine cycle"
    );

    let metrics = StaticMetrics::compute(geometry).map_err(CycleError::Metrics)?;

    let samples = (0..SAMPLES_PER_CYCLE)
        .map(|angle| sample_at(geometry, cams, angle))
        .collect::<Result<Vec<_>, _>>()?;

    let peak_velocity = PeakVelocity::scan(
        samples
            .iter()
            .take_while(|sample| sample.angle <= PEAK_SEARCH_END),
    );

    tracing::info!(
        compression_ratio = metrics.compression_ratio,
        peak_velocity_angle = peak_velocity.angle,
        "cycle sampled"
    );

    Ok(CycleResults {
        metrics,
        peak_velocity,
        samples,
        has_valve_lift: cams.is_some(),
    })
}

fn sample_at(
    geometry: &EngineGeometry<'_>,
    cams: Option<&CamSpecification>,
    angle: u16,
) -> Result<MotionSample, CycleError> {
    let crank = CrankAngle::from(angle);

    let piston = geometry
        .state_at(crank)
        .map_err(|source| CycleError::Piston { angle, source })?;

    let valves = match cams {
        Some(cams) => cams
            .valve_lift_at(crank)
            .map_err(|source| CycleError::Valve { angle, source })?,
        None => ValveLift::CLOSED,
    };

    Ok(MotionSample {
        angle,
        piston_position: piston.position,
        piston_velocity: piston.velocity,
        intake_valve_lift: valves.intake,
        exhaust_valve_lift: valves.exhaust,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::{
        ConstZero,
        si::{
            f64::Length,
            length::millimeter,
            velocity::millimeter_per_second,
        },
    };

    use crate::models::engine::{
        cam::CamError,
        geometry::GeometryError,
        test_support::{cam_specification, metric_engine},
    };

    #[test]
    fn one_sample_per_degree() {
        let params = metric_engine();
        let results = sample_cycle(&EngineGeometry::new(&params), None).unwrap();

        assert_eq!(results.samples.len(), 720);
        for (index, sample) in results.samples.iter().enumerate() {
            assert_eq!(usize::from(sample.angle), index);
        }
    }

    #[test]
    fn valves_stay_shut_without_cams() {
        let params = metric_engine();
        let results = sample_cycle(&EngineGeometry::new(&params), None).unwrap();

        assert!(!results.has_valve_lift);
        assert!(results.samples.iter().all(|s| {
            s.intake_valve_lift == Length::ZERO && s.exhaust_valve_lift == Length::ZERO
        }));
    }

    #[test]
    fn piston_motion_repeats_each_revolution() {
        let params = metric_engine();
        let results = sample_cycle(&EngineGeometry::new(&params), None).unwrap();

        for angle in 0..360 {
            let first = &results.samples[angle];
            let second = &results.samples[angle + 360];
            assert_relative_eq!(
                first.piston_position.get::<millimeter>(),
                second.piston_position.get::<millimeter>(),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn peak_velocity_lands_before_quarter_turn() {
        let params = metric_engine();
        let results = sample_cycle(&EngineGeometry::new(&params), None).unwrap();

        let peak = results.peak_velocity;
        assert!((73..=77).contains(&peak.angle), "peak at {}", peak.angle);
        assert!(peak.value.get::<millimeter_per_second>() > 28_274.333);
        assert_eq!(
            peak.value,
            results.samples[usize::from(peak.angle)].piston_velocity
        );
    }

    #[test]
    fn carries_static_metrics() {
        let params = metric_engine();
        let geometry = EngineGeometry::new(&params);

        let results = sample_cycle(&geometry, None).unwrap();

        assert_eq!(results.metrics, StaticMetrics::compute(&geometry).unwrap());
    }

    #[test]
    fn merges_valve_lift_from_cams() {
        let params = metric_engine();
        let mut cams = cam_specification();
        cams.initialize();

        let results = sample_cycle(&EngineGeometry::new(&params), Some(&cams)).unwrap();

        assert!(results.has_valve_lift);
        assert_relative_eq!(
            results.samples[106].intake_valve_lift.get::<millimeter>(),
            12.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            results.samples[606].exhaust_valve_lift.get::<millimeter>(),
            11.5,
            epsilon = 1e-9
        );
        assert!(results.samples[0].intake_valve_lift > Length::ZERO);
        assert!(results.samples[0].exhaust_valve_lift > Length::ZERO);
        assert_eq!(results.samples[340].intake_valve_lift, Length::ZERO);
    }

    #[test]
    fn uninitialized_cams_fail_at_first_angle() {
        let params = metric_engine();
        let cams = cam_specification();

        let error = sample_cycle(&EngineGeometry::new(&params), Some(&cams)).unwrap_err();

        assert!(matches!(
            error,
            CycleError::Valve {
                angle: 0,
                source: CamError::NotInitialized
            }
        ));
    }

    #[test]
    fn short_rod_fails_where_it_cannot_reach() {
        let mut params = metric_engine();
        params.rod_length = params.units.length(40.0);

        let error = sample_cycle(&EngineGeometry::new(&params), None).unwrap_err();

        // asin(40 / 45) is just under 62.8°.
        assert!(matches!(
            error,
            CycleError::Piston {
                angle: 63,
                source: GeometryError::RodTooShort { .. }
            }
        ));
    }

    #[test]
    fn metric_failure_stops_before_sampling() {
        let mut params = metric_engine();
        params.stroke = Length::ZERO;

        let error = sample_cycle(&EngineGeometry::new(&params), None).unwrap_err();

        assert!(matches!(error, CycleError::Metrics(GeometryError::ZeroStroke)));
    }
}
