//! Clipboard program table keyed by host platform.
//!
//! | Platform | Writer | Reader |
//! |----------|--------|--------|
//! | macOS | `pbcopy` | `pbpaste` |
//! | Windows | `clip` | `clip` |
//! | Linux | `xsel --input --clipboard` | `xclip -o -selection clipboard` |
//!
//! The table is resolved once when a [`Clipboard`](super::clipboard::Clipboard)
//! is built. It can also be loaded from JSON to point at other programs.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    READER_ON_LIN, READER_ON_MAC, READER_ON_WIN, WRITER_ON_LIN, WRITER_ON_MAC, WRITER_ON_WIN,
};
use crate::error::{ClipboardError, ClipboardResult};

// ============================================================================
// Host Platform
// ============================================================================

/// Host platforms with a known clipboard program pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostPlatform {
    /// Apple macOS.
    MacOs,
    /// Microsoft Windows.
    Windows,
    /// Linux and any other Unix-like host running X11.
    Linux,
}

impl HostPlatform {
    /// Platform this binary was compiled for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(windows) {
            Self::Windows
        } else {
            Self::Linux
        }
    }

    /// Short lowercase identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MacOs => "macos",
            Self::Windows => "windows",
            Self::Linux => "linux",
        }
    }
}

// ============================================================================
// ClipboardPrograms
// ============================================================================

/// Executables (and their arguments) used to write and read the clipboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardPrograms {
    /// Program that takes clipboard content on stdin.
    pub writer: String,
    /// Arguments passed to the writer.
    #[serde(default)]
    pub writer_args: Vec<String>,
    /// Program that prints clipboard content on stdout.
    pub reader: String,
    /// Arguments passed to the reader.
    #[serde(default)]
    pub reader_args: Vec<String>,
}

impl Default for ClipboardPrograms {
    fn default() -> Self {
        Self::for_host()
    }
}

impl ClipboardPrograms {
    /// Programs for the platform this binary runs on.
    #[must_use]
    pub fn for_host() -> Self {
        Self::for_platform(HostPlatform::current())
    }

    /// Programs for a specific platform.
    #[must_use]
    pub fn for_platform(platform: HostPlatform) -> Self {
        match platform {
            HostPlatform::MacOs => Self::new(WRITER_ON_MAC, READER_ON_MAC),
            HostPlatform::Windows => Self::new(WRITER_ON_WIN, READER_ON_WIN),
            HostPlatform::Linux => Self::new(WRITER_ON_LIN, READER_ON_LIN)
                .with_writer_args(["--input", "--clipboard"])
                .with_reader_args(["-o", "-selection", "clipboard"]),
        }
    }

    /// Programs with no extra arguments.
    #[must_use]
    pub fn new(writer: impl Into<String>, reader: impl Into<String>) -> Self {
        Self {
            writer: writer.into(),
            writer_args: Vec::new(),
            reader: reader.into(),
            reader_args: Vec::new(),
        }
    }

    /// Replaces the writer arguments.
    #[must_use]
    pub fn with_writer_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.writer_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the reader arguments.
    #[must_use]
    pub fn with_reader_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reader_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Parses a program table from JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the text is not a valid table.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Reads a JSON program table from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError::File`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> ClipboardResult<Self> {
        let path = path.as_ref();
        let file_error = |source: io::Error| ClipboardError::File {
            path: path.to_path_buf(),
            source,
        };

        let text = fs::read_to_string(path).map_err(file_error)?;
        Self::from_json(&text).map_err(|e| file_error(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// Serializes the table as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error on serialization failure.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// ============================================================================
// Tests
// ============================================================================
