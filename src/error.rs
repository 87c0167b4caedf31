// SPDX-License-Identifier: GPL-3.0-only
//! Error types for the panel core.

use std::process::ExitStatus;

use thiserror::Error;

/// Main error type for panel operations
#[derive(Error, Debug)]
pub enum PanelError {
    /// External command exited non-zero with a non-empty error stream
    #[error("{program} exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    /// External command could not be spawned at all
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Command output did not have the expected shape
    #[error("unexpected {what} output: {output:?}")]
    Parse { what: &'static str, output: String },

    /// Monitor index outside the discovered set
    #[error("no monitor with index {0}")]
    UnknownMonitor(usize),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for PanelError
pub type Result<T> = std::result::Result<T, PanelError>;
