//! System clipboard access through external programs.
//!
//! Writes are buffered: [`Clipboard::write_string`] only appends to a
//! pending buffer, and [`Clipboard::flush`] hands the buffer to the writer
//! program on stdin. Reads run the reader program and capture its stdout.
//!
//! # States
//!
//! An instance is idle while its buffer is empty and pending once
//! something has been written. A successful flush or a reset returns it to
//! idle. A failed flush keeps the buffer so the caller can retry or reset.
//!
//! # Example
//!
//! ```ignore
//! use stackclip::platform::clipboard::Clipboard;
//!
//! let mut clipboard = Clipboard::new();
//! clipboard.write_string("Hello, world!")?;
//! clipboard.flush()?;
//! assert_eq!(clipboard.read_string()?, "Hello, world!");
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use parking_lot::Mutex;

use super::programs::{ClipboardPrograms, HostPlatform};
use crate::error::{ClipboardError, ClipboardResult};

// ============================================================================
// Clipboard
// ============================================================================

/// Clipboard handle with a pending write buffer.
#[derive(Debug, Default)]
pub struct Clipboard {
    programs: ClipboardPrograms,
    buf: Vec<u8>,
}

impl Clipboard {
    /// Creates a clipboard using the host platform's programs.
    #[must_use]
    pub fn new() -> Self {
        let platform = HostPlatform::current();
        tracing::debug!(platform = platform.as_str(), "using host clipboard programs");
        Self::with_programs(ClipboardPrograms::for_platform(platform))
    }

    /// Creates a clipboard using an explicit program table.
    #[must_use]
    pub fn with_programs(programs: ClipboardPrograms) -> Self {
        Self {
            programs,
            buf: Vec::new(),
        }
    }

    /// The program table this instance runs.
    #[must_use]
    pub fn programs(&self) -> &ClipboardPrograms {
        &self.programs
    }

    /// Bytes written but not yet flushed.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.buf
    }

    /// Returns `true` when a flush would run the writer program.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    // ========================================================================
    // Availability
    // ========================================================================

    /// Returns `true` if the reader program is on `PATH`.
    #[must_use]
    pub fn readable(&self) -> bool {
        which::which(&self.programs.reader).is_ok()
    }

    /// Returns `true` if the writer program is on `PATH`.
    #[must_use]
    pub fn writeable(&self) -> bool {
        which::which(&self.programs.writer).is_ok()
    }

    /// Returns `true` if both programs are on `PATH`.
    #[must_use]
    pub fn available(&self) -> bool {
        self.readable() && self.writeable()
    }

    // ========================================================================
    // Writing
    // ========================================================================

    /// Appends raw bytes to the pending buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError::Buffer`] if the buffer cannot grow.
    pub fn write_bytes(&mut self, data: &[u8]) -> ClipboardResult<usize> {
        self.buf
            .try_reserve(data.len())
            .map_err(|e| ClipboardError::Buffer(e.to_string()))?;
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    /// Appends text to the pending buffer without touching the clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError::Buffer`] if the buffer cannot grow.
    pub fn write_string(&mut self, s: &str) -> ClipboardResult<usize> {
        self.write_bytes(s.as_bytes())
    }

    /// Buffers the contents of a file and flushes it to the clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError::File`] if the file cannot be read, or an
    /// execution error from [`Clipboard::flush`].
    pub fn write_from_file(&mut self, path: impl AsRef<Path>) -> ClipboardResult<()> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| ClipboardError::File {
            path: path.to_path_buf(),
            source,
        })?;
        self.write_bytes(&data)?;
        self.flush()
    }

    /// Sends the pending buffer to the writer program and clears it.
    ///
    /// Does nothing when the buffer is empty. On failure the buffer is kept.
    ///
    /// # Errors
    ///
    /// Returns an execution error if the writer is missing, cannot start,
    /// fails while reading stdin, or exits unsuccessfully.
    pub fn flush(&mut self) -> ClipboardResult<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.run_writer(&self.buf)?;
        self.buf.clear();
        Ok(())
    }

    /// Drops any pending content without running a program.
    ///
    /// # Errors
    ///
    /// Never fails; the `Result` mirrors the other clipboard operations.
    pub fn reset(&mut self) -> ClipboardResult<()> {
        self.buf.clear();
        Ok(())
    }

    /// Empties the system clipboard by writing nothing to it.
    ///
    /// Pending content is discarded first.
    ///
    /// # Errors
    ///
    /// Returns an execution error from the writer program.
    pub fn clean(&mut self) -> ClipboardResult<()> {
        self.buf.clear();
        self.run_writer(&[])
    }

    fn run_writer(&self, data: &[u8]) -> ClipboardResult<()> {
        let program = &self.programs.writer;
        tracing::debug!(program = %program, bytes = data.len(), "writing clipboard");

        let mut child = Command::new(program)
            .args(&self.programs.writer_args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ClipboardError::from_spawn(program, e))?;

        let io_error = |source: io::Error| ClipboardError::Io {
            program: program.clone(),
            source,
        };

        let written = match child.stdin.take() {
            Some(mut stdin) => {
                let written = stdin.write_all(data);
                // Close stdin so the writer sees end of input before we wait.
                drop(stdin);
                written
            }
            None => Ok(()),
        };

        // A writer that exits early breaks the pipe; its exit status and
        // stderr say more than the broken pipe does.
        let output = child.wait_with_output().map_err(io_error)?;
        check_status(program, &output)?;
        written.map_err(io_error)
    }

    // ========================================================================
    // Reading
    // ========================================================================

    /// Runs the reader program and returns its stdout unchanged.
    ///
    /// # Errors
    ///
    /// Returns an execution error if the reader is missing, cannot start,
    /// or exits unsuccessfully.
    pub fn read_bytes(&self) -> ClipboardResult<Vec<u8>> {
        let program = &self.programs.reader;
        tracing::debug!(program = %program, "reading clipboard");

        let output = Command::new(program)
            .args(&self.programs.reader_args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ClipboardError::from_spawn(program, e))?;

        check_status(program, &output)?;
        Ok(output.stdout)
    }

    /// Reads the clipboard as text, replacing invalid UTF-8.
    ///
    /// # Errors
    ///
    /// Same as [`Clipboard::read_bytes`].
    pub fn read_string(&self) -> ClipboardResult<String> {
        let bytes = self.read_bytes()?;
        Ok(String::from_utf8(bytes)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
    }

    /// Reads the clipboard into a file, replacing its contents.
    ///
    /// # Errors
    ///
    /// Returns an execution error from the reader, or
    /// [`ClipboardError::File`] if the file cannot be written.
    pub fn read_to_file(&self, path: impl AsRef<Path>) -> ClipboardResult<()> {
        let path = path.as_ref();
        let data = self.read_bytes()?;
        fs::write(path, data).map_err(|source| ClipboardError::File {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Write for Clipboard {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        Ok(self.write_bytes(data)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(Clipboard::flush(self)?)
    }
}

fn check_status(program: &str, output: &std::process::Output) -> ClipboardResult<()> {
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    tracing::debug!(program, status = ?output.status, %stderr, "clipboard program failed");
    Err(ClipboardError::ExitStatus {
        program: program.to_string(),
        code: output.status.code(),
        stderr,
    })
}

// ============================================================================
// Default Instance
// ============================================================================

static STD_CLIPBOARD: OnceLock<Mutex<Clipboard>> = OnceLock::new();

/// Installs the process-wide clipboard with an explicit program table.
///
/// Call once at startup, before any of the free functions in this module.
///
/// # Errors
///
/// Returns the rejected clipboard if the default instance already exists.
pub fn init_std_clipboard(programs: ClipboardPrograms) -> Result<(), Clipboard> {
    STD_CLIPBOARD
        .set(Mutex::new(Clipboard::with_programs(programs)))
        .map_err(Mutex::into_inner)
}

/// The process-wide clipboard used by the free functions in this module.
///
/// Uses the table given to [`init_std_clipboard`], or the host's programs
/// if nothing was installed before first use. The lock gives one caller at
/// a time ownership of its pending buffer.
pub fn std_clipboard() -> &'static Mutex<Clipboard> {
    STD_CLIPBOARD.get_or_init(|| Mutex::new(Clipboard::new()))
}

/// Writes text to the clipboard and flushes it immediately.
///
/// # Errors
///
/// Returns an execution error from the writer program.
pub fn write_string(s: &str) -> ClipboardResult<()> {
    let mut clipboard = std_clipboard().lock();
    clipboard.write_string(s)?;
    clipboard.flush()
}

/// Reads the clipboard as text using the default instance.
///
/// # Errors
///
/// Returns an execution error from the reader program.
pub fn read_string() -> ClipboardResult<String> {
    std_clipboard().lock().read_string()
}

/// Clears pending content on the default instance.
///
/// # Errors
///
/// Never fails in practice.
pub fn reset() -> ClipboardResult<()> {
    std_clipboard().lock().reset()
}

/// Returns `true` if the host's clipboard programs are installed.
#[must_use]
pub fn available() -> bool {
    std_clipboard().lock().available()
}

// ============================================================================
// Tests
// ============================================================================
