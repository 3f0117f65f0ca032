//! YAML run files.
//!
//! A run file holds raw numbers in one unit system. [`RunConfig`] turns them
//! into [`EngineParameters`] and, when a `cams` section is present, an
//! initialized [`CamSpecification`].
//!
//! ```
//! use piston_motion::config::RunConfig;
//!
//! let config = RunConfig::from_yaml_str(
//!     "
//! units: imperial
//! engine:
//!   bore: 4.03
//!   stroke: 3.48
//!   rod_length: 5.7
//!   deck_height: 9.025
//!   gasket_height: 0.040
//!   comp_height: 1.56
//!   piston_volume: -5.0
//!   chamber_volume: 64.0
//!   rpm: 6500
//!   cylinder_count: 8
//! ",
//! )?;
//!
//! assert_eq!(config.engine_parameters().cylinder_count, 8);
//! assert!(config.cam_specification()?.is_none());
//! # Ok::<(), piston_motion::config::ConfigError>(())
//! ```

mod error;

pub use error::ConfigError;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use uom::si::{angular_velocity::revolution_per_minute, f64::AngularVelocity};

use crate::{
    models::engine::{
        cam::{CamError, CamProfile, CamSpecification, DEFAULT_VALVE_ANGLE},
        geometry::EngineParameters,
    },
    support::{angle::CrankAngle, units::UnitSystem},
};

/// File name used when a run names no output file.
pub const DEFAULT_OUTPUT_FILE: &str = "piston_motion.csv";

/// A complete run file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    #[serde(default)]
    pub units: UnitSystem,
    pub engine: EngineConfig,
    #[serde(default)]
    pub cams: Option<CamsConfig>,
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

/// Engine values in the run's unit system.
///
/// Lengths are mm or in, volumes cc or ci.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    pub bore: f64,
    pub stroke: f64,
    pub rod_length: f64,
    pub deck_height: f64,
    pub gasket_height: f64,
    pub comp_height: f64,
    pub piston_volume: f64,
    pub chamber_volume: f64,
    pub rpm: f64,
    pub cylinder_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CamsConfig {
    pub intake: LobeConfig,
    pub exhaust: LobeConfig,
}

/// One lobe as printed on a cam card.
///
/// Exactly one of `centerline` (degrees ATDC) or `centerline_btdc` must be
/// given. Exhaust lobes are normally quoted BTDC.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LobeConfig {
    pub max_lift: f64,
    pub duration_at_lift: f64,
    #[serde(default)]
    pub checking_lift: Option<f64>,
    #[serde(default)]
    pub centerline: Option<f64>,
    #[serde(default)]
    pub centerline_btdc: Option<f64>,
    #[serde(default)]
    pub rocker_ratio: Option<f64>,
    #[serde(default)]
    pub valve_diameter: Option<f64>,
    #[serde(default)]
    pub valve_angle: Option<f64>,
    #[serde(default)]
    pub pocket_depth: Option<f64>,
}

/// Where the CSV report goes, relative to the working directory.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub filename: Option<String>,
}

impl RunConfig {
    /// Reads and parses a run file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Yaml`] if it does not parse.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&content)?;
        tracing::debug!(path = %path.display(), units = ?config.units, "run file loaded");
        Ok(config)
    }

    /// Parses a run file from a string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] for malformed documents, missing fields
    /// and unknown fields.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Engine parameters in the run's unit system.
    ///
    /// The result is not validated; call
    /// [`EngineParameters::validate`] before handing it to a model.
    #[must_use]
    pub fn engine_parameters(&self) -> EngineParameters {
        let units = self.units;
        let e = &self.engine;
        EngineParameters {
            bore: units.length(e.bore),
            stroke: units.length(e.stroke),
            rod_length: units.length(e.rod_length),
            deck_height: units.length(e.deck_height),
            gasket_height: units.length(e.gasket_height),
            comp_height: units.length(e.comp_height),
            piston_volume: units.volume(e.piston_volume),
            chamber_volume: units.volume(e.chamber_volume),
            rpm: AngularVelocity::new::<revolution_per_minute>(e.rpm),
            cylinder_count: e.cylinder_count,
            units,
        }
    }

    /// Builds and initializes the cam specification, if the run has one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Centerline`] or [`ConfigError::Cam`] for a lobe
    /// that cannot be turned into a [`CamProfile`].
    pub fn cam_specification(&self) -> Result<Option<CamSpecification>, ConfigError> {
        let Some(cams) = &self.cams else {
            return Ok(None);
        };

        let intake = cams.intake.profile("intake", self.units)?;
        let exhaust = cams.exhaust.profile("exhaust", self.units)?;

        let mut spec = CamSpecification::new(intake, exhaust);
        spec.initialize();
        Ok(Some(spec))
    }

    /// Path of the CSV report.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        let output = self.output.clone().unwrap_or_default();
        let directory = output.directory.unwrap_or_else(|| PathBuf::from("."));
        directory.join(output.filename.as_deref().unwrap_or(DEFAULT_OUTPUT_FILE))
    }
}

impl LobeConfig {
    fn profile(&self, lobe: &'static str, units: UnitSystem) -> Result<CamProfile, ConfigError> {
        let cam = |source: CamError| ConfigError::Cam { lobe, source };

        let centerline = match (self.centerline, self.centerline_btdc) {
            (Some(atdc), None) => CrankAngle::from_degrees(atdc),
            (None, Some(btdc)) => CrankAngle::from_btdc(btdc),
            _ => return Err(ConfigError::Centerline { lobe }),
        };

        let checking_lift = self
            .checking_lift
            .map_or_else(|| units.default_checking_lift(), |lift| units.length(lift));

        let mut profile = CamProfile::new(
            units.length(self.max_lift),
            self.duration_at_lift,
            checking_lift,
            centerline,
        )
        .map_err(cam)?;

        if let Some(ratio) = self.rocker_ratio {
            profile = profile.with_rocker_ratio(ratio).map_err(cam)?;
        }

        if self.valve_diameter.is_some()
            || self.valve_angle.is_some()
            || self.pocket_depth.is_some()
        {
            profile = profile
                .with_valve(
                    units.length(self.valve_diameter.unwrap_or(0.0)),
                    self.valve_angle.unwrap_or(DEFAULT_VALVE_ANGLE),
                    units.length(self.pocket_depth.unwrap_or(0.0)),
                )
                .map_err(cam)?;
        }

        Ok(profile)
    }
}
