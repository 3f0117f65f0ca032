//! Valve-train timing from cam card figures.
//!
//! A cam card quotes duration at a small checking lift rather than seat to
//! seat. [`CamProfile::initialize`] extrapolates seat timing with a fixed
//! [`RAMP_FACTOR`] and places the event symmetrically about the lobe
//! centerline on the 720° cycle. Lift is then a cosine bell over that
//! event, scaled by the rocker ratio at the valve.
//!
//! ```
//! use piston_motion::models::engine::cam::CamProfile;
//! use piston_motion::support::angle::CrankAngle;
//! use uom::si::{f64::Length, length::inch};
//!
//! let mut intake = CamProfile::new(
//!     Length::new::<inch>(0.420),
//!     224.0,
//!     Length::new::<inch>(0.050),
//!     CrankAngle::from_degrees(110.0),
//! )?;
//! intake.initialize();
//!
//! assert!(intake.is_valve_open(CrankAngle::from_degrees(110.0))?);
//! assert_eq!(intake.cam_lift_at(CrankAngle::from_degrees(110.0))?, Length::new::<inch>(0.420));
//! # Ok::<(), piston_motion::models::engine::cam::CamError>(())
//! ```

mod error;
mod profile;
mod specification;
mod timing;

pub use error::CamError;
pub use profile::{CamProfile, DEFAULT_VALVE_ANGLE};
pub use specification::{CamSpecification, ValveLift};
pub use timing::{CamTiming, RAMP_FACTOR};
