use thiserror::Error;

use crate::support::constraint::ConstraintError;

/// Errors from cam profile construction and lift queries.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CamError {
    /// Lift or timing was queried before [`initialize`](super::CamProfile::initialize).
    #[error("cam profile queried before its timing was initialized")]
    NotInitialized,

    /// A profile value violates its constraint.
    #[error("invalid cam {field}")]
    Invalid {
        field: &'static str,
        #[source]
        source: ConstraintError,
    },
}

pub(super) fn invalid(field: &'static str) -> impl FnOnce(ConstraintError) -> CamError {
    move |source| CamError::Invalid { field, source }
}
