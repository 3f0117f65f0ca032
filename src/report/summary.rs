use std::fmt;

use crate::{
    models::engine::{
        cam::{CamProfile, CamSpecification},
        cycle::CycleResults,
        geometry::StaticMetrics,
    },
    support::units::UnitSystem,
};

/// Console summary of one run.
///
/// ```text
/// Peak piston velocity: 29526.549 mm/s @ 75°
/// Displacement: 2827.43 cc
/// ...
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Summary<'a> {
    results: &'a CycleResults,
    cams: Option<&'a CamSpecification>,
    units: UnitSystem,
}

impl<'a> Summary<'a> {
    #[must_use]
    pub fn new(results: &'a CycleResults, units: UnitSystem) -> Self {
        Self {
            results,
            cams: None,
            units,
        }
    }

    /// Adds the cam card figures of both lobes.
    #[must_use]
    pub fn with_cams(mut self, cams: &'a CamSpecification) -> Self {
        self.cams = Some(cams);
        self
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = self.units;
        let peak = &self.results.peak_velocity;

        writeln!(
            f,
            "Peak piston velocity: {:.3} {} @ {}°",
            units.velocity_value(peak.value),
            units.velocity_label(),
            peak.angle,
        )?;
        write!(f, "{}", MetricsSummary::new(&self.results.metrics, units))?;

        if let Some(cams) = self.cams {
            writeln!(f)?;
            writeln!(f, "Cam specification:")?;
            writeln!(f, "  Intake:  {}", CamLine(cams.intake(), units))?;
            write!(f, "  Exhaust: {}", CamLine(cams.exhaust(), units))?;
        }

        Ok(())
    }
}

/// The static build figures alone, for runs that stop before sampling.
#[derive(Debug, Clone, Copy)]
pub struct MetricsSummary<'a> {
    metrics: &'a StaticMetrics,
    units: UnitSystem,
}

impl<'a> MetricsSummary<'a> {
    #[must_use]
    pub fn new(metrics: &'a StaticMetrics, units: UnitSystem) -> Self {
        Self { metrics, units }
    }
}

impl fmt::Display for MetricsSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { metrics, units } = *self;

        writeln!(
            f,
            "Displacement: {:.2} {}",
            units.volume_value(metrics.displacement),
            units.volume_label(),
        )?;
        writeln!(f, "Bore/stroke ratio: {:.3}", metrics.bore_stroke_ratio)?;
        writeln!(f, "Rod ratio: {:.3}", metrics.rod_ratio)?;
        writeln!(
            f,
            "Piston to deck: {:.3} {}",
            units.length_value(metrics.piston_to_deck),
            units.length_label(),
        )?;
        write!(f, "Compression ratio: {:.2}:1", metrics.compression_ratio)
    }
}

/// One lobe's cam card line.
struct CamLine<'a>(&'a CamProfile, UnitSystem);

impl fmt::Display for CamLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(profile, units) = self;
        let label = units.length_label();
        write!(
            f,
            "Lift: {:.3} {label}, Duration: {:.0}° @ {:.3} {label}, ",
            units.length_value(profile.max_lift()),
            profile.duration_at_lift(),
            units.length_value(profile.checking_lift()),
        )?;
        write!(
            f,
            "Centerline: {:.1}°, Rocker: {:.2}",
            profile.lobe_centerline().degrees(),
            profile.rocker_ratio(),
        )
    }
}
