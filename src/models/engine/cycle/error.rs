use thiserror::Error;

use crate::models::engine::{cam::CamError, geometry::GeometryError};

/// Errors that can occur while sampling a 4-stroke cycle.
#[derive(Debug, Error)]
pub enum CycleError {
    /// A static metric could not be computed.
    #[error("static metrics failed")]
    Metrics(#[source] GeometryError),

    /// Piston motion could not be evaluated at one crank angle.
    #[error("piston motion failed at {angle}° ATDC")]
    Piston {
        angle: u16,
        #[source]
        source: GeometryError,
    },

    /// Valve lift could not be evaluated at one crank angle.
    #[error("valve lift failed at {angle}° ATDC")]
    Valve {
        angle: u16,
        #[source]
        source: CamError,
    },
}
