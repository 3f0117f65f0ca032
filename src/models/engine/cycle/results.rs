//! Result types for a sampled 4-stroke cycle.

use uom::{
    ConstZero,
    si::f64::{Length, Velocity},
};

use crate::models::engine::geometry::StaticMetrics;

/// Piston and valve state at one integer crank angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    /// Crank angle in whole degrees ATDC, `0..720`.
    pub angle: u16,
    pub piston_position: Length,
    pub piston_velocity: Velocity,
    /// Zero when no cam specification was supplied.
    pub intake_valve_lift: Length,
    /// Zero when no cam specification was supplied.
    pub exhaust_valve_lift: Length,
}

/// Highest piston speed over one half-revolution and where it occurs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakVelocity {
    pub value: Velocity,
    pub angle: u16,
}

impl PeakVelocity {
    const AT_REST: Self = Self {
        value: Velocity::ZERO,
        angle: 0,
    };

    /// Finds the fastest sample, keeping the earliest one on ties.
    ///
    /// Samples are scanned in the order given.
    pub(super) fn scan<'a>(samples: impl IntoIterator<Item = &'a MotionSample>) -> Self {
        samples
            .into_iter()
            .fold(None, |peak: Option<Self>, sample| match peak {
                Some(best) if sample.piston_velocity <= best.value => Some(best),
                _ => Some(Self {
                    value: sample.piston_velocity,
                    angle: sample.angle,
                }),
            })
            .unwrap_or(Self::AT_REST)
    }
}

/// Everything computed for one engine over one 4-stroke cycle.
///
/// Produced once by [`sample_cycle`](super::sample_cycle) and never updated.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleResults {
    pub metrics: StaticMetrics,

    /// Peak piston speed between 0° and 180°.
    pub peak_velocity: PeakVelocity,

    /// One sample per degree, ordered by angle.
    pub samples: Vec<MotionSample>,

    /// True when valve lift columns carry data.
    pub has_valve_lift: bool,
}
