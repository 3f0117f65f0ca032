//! Output of a sampled cycle.
//!
//! - [`write_csv`] and [`save_csv`]: one row per crank degree.
//! - [`Summary`]: the static metrics, peak piston speed and cam card figures
//!   as printed to the console. [`MetricsSummary`] prints the static figures
//!   on their own.
//!
//! Every value is reported in the run's [`UnitSystem`](crate::support::units::UnitSystem).

mod csv;
mod error;
mod summary;

pub use csv::{DEFAULT_PRECISION, save_csv, write_csv};
pub use error::ReportError;
pub use summary::{MetricsSummary, Summary};
