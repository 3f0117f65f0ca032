use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur while writing a report to disk.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The output directory could not be created.
    #[error("failed to create directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The report file could not be written.
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
