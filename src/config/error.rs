use std::{io, path::PathBuf};

use thiserror::Error;

use crate::models::engine::cam::CamError;

/// Errors that can occur while loading a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not a valid run configuration document.
    #[error("invalid run configuration")]
    Yaml(#[from] serde_yaml::Error),

    /// A lobe gives both or neither of its centerline forms.
    #[error("{lobe} cam needs exactly one of `centerline` or `centerline_btdc`")]
    Centerline { lobe: &'static str },

    /// A lobe violates a cam profile constraint.
    #[error("{lobe} cam rejected")]
    Cam {
        lobe: &'static str,
        #[source]
        source: CamError,
    },
}
