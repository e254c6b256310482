//! Error types for clipboard operations.
//!
//! Stack capture never fails (it degrades to shorter output), so every
//! variant here describes a clipboard failure. The execution variants
//! together make up what callers see as an execution error: the program is
//! missing, could not start, broke a pipe, or exited unsuccessfully.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for clipboard operations.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// The clipboard program is not installed or not on `PATH`.
    #[error("clipboard program '{program}' not found")]
    NotFound {
        /// Name of the missing executable.
        program: String,
    },

    /// The clipboard program exists but could not be started.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        /// Name of the executable.
        program: String,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// Feeding stdin or draining stdout of the program failed.
    #[error("i/o with '{program}' failed: {source}")]
    Io {
        /// Name of the executable.
        program: String,
        /// Underlying pipe error.
        #[source]
        source: io::Error,
    },

    /// The program ran but reported failure.
    #[error("'{program}' exited with {}: {stderr}", .code.map_or_else(|| "signal".to_string(), |c| format!("status {c}")))]
    ExitStatus {
        /// Name of the executable.
        program: String,
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
        /// Trimmed standard error output.
        stderr: String,
    },

    /// Reading or writing a local file for the file helpers failed.
    #[error("file '{}': {source}", .path.display())]
    File {
        /// Path that was accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The pending write buffer rejected the data.
    #[error("write buffer error: {0}")]
    Buffer(String),
}

/// Result type for clipboard operations.
pub type ClipboardResult<T> = Result<T, ClipboardError>;

impl ClipboardError {
    /// Classify a spawn failure, separating "not installed" from other causes.
    #[must_use]
    pub fn from_spawn(program: impl Into<String>, source: io::Error) -> Self {
        let program = program.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { program }
        } else {
            Self::Spawn { program, source }
        }
    }

    /// Returns `true` for failures caused by running the external program.
    #[must_use]
    pub fn is_execution(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Spawn { .. } | Self::Io { .. } | Self::ExitStatus { .. }
        )
    }
}

impl From<ClipboardError> for io::Error {
    fn from(err: ClipboardError) -> Self {
        let kind = match &err {
            ClipboardError::NotFound { .. } => io::ErrorKind::NotFound,
            ClipboardError::Spawn { source, .. }
            | ClipboardError::Io { source, .. }
            | ClipboardError::File { source, .. } => source.kind(),
            ClipboardError::ExitStatus { .. } | ClipboardError::Buffer(_) => io::ErrorKind::Other,
        };
        io::Error::new(kind, err)
    }
}

// ============================================================================
// Tests
// ============================================================================
