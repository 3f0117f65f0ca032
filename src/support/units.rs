//! Unit systems for engine inputs and reports.
//!
//! All model math runs on [`uom`] quantities, so the models never care what
//! unit a number was entered in. Engine builders still think in either
//! millimeters and cubic centimeters or inches and cubic inches, and
//! [`UnitSystem`] is the bridge between those raw numbers and quantities.
//!
//! ```
//! use piston_motion::support::units::UnitSystem;
//!
//! let stroke = UnitSystem::Imperial.length(3.48);
//! assert!((UnitSystem::Metric.length_value(stroke) - 88.392).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use uom::si::{
    f64::{Length, Velocity, Volume},
    length::{inch, millimeter},
    velocity::{inch_per_second, millimeter_per_second},
    volume::{cubic_centimeter, cubic_inch},
};

/// The unit system raw engine values are entered and reported in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Millimeters, cubic centimeters, millimeters per second.
    #[default]
    Metric,
    /// Inches, cubic inches, inches per second.
    Imperial,
}

impl UnitSystem {
    /// Interprets a raw number as a length in this unit system.
    #[must_use]
    pub fn length(self, value: f64) -> Length {
        match self {
            Self::Metric => Length::new::<millimeter>(value),
            Self::Imperial => Length::new::<inch>(value),
        }
    }

    /// Interprets a raw number as a volume in this unit system.
    #[must_use]
    pub fn volume(self, value: f64) -> Volume {
        match self {
            Self::Metric => Volume::new::<cubic_centimeter>(value),
            Self::Imperial => Volume::new::<cubic_inch>(value),
        }
    }

    /// Expresses a length as a raw number in this unit system.
    #[must_use]
    pub fn length_value(self, length: Length) -> f64 {
        match self {
            Self::Metric => length.get::<millimeter>(),
            Self::Imperial => length.get::<inch>(),
        }
    }

    /// Expresses a volume as a raw number in this unit system.
    #[must_use]
    pub fn volume_value(self, volume: Volume) -> f64 {
        match self {
            Self::Metric => volume.get::<cubic_centimeter>(),
            Self::Imperial => volume.get::<cubic_inch>(),
        }
    }

    /// Expresses a velocity as a raw number in this unit system.
    #[must_use]
    pub fn velocity_value(self, velocity: Velocity) -> f64 {
        match self {
            Self::Metric => velocity.get::<millimeter_per_second>(),
            Self::Imperial => velocity.get::<inch_per_second>(),
        }
    }

    #[must_use]
    pub fn length_label(self) -> &'static str {
        match self {
            Self::Metric => "mm",
            Self::Imperial => "in",
        }
    }

    #[must_use]
    pub fn volume_label(self) -> &'static str {
        match self {
            Self::Metric => "cc",
            Self::Imperial => "ci",
        }
    }

    #[must_use]
    pub fn velocity_label(self) -> &'static str {
        match self {
            Self::Metric => "mm/s",
            Self::Imperial => "in/s",
        }
    }

    /// The lift at which cam duration is conventionally quoted.
    ///
    /// 0.050 in for imperial cam cards, 1.27 mm for metric ones.
    #[must_use]
    pub fn default_checking_lift(self) -> Length {
        match self {
            Self::Metric => Length::new::<millimeter>(1.27),
            Self::Imperial => Length::new::<inch>(0.050),
        }
    }
}
