//! Shared test utilities and Mother pattern factories.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::platform::programs::ClipboardPrograms;

static SCRATCH_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Unique path in the system temp directory. The file is not created.
#[must_use]
pub fn scratch_path(tag: &str) -> PathBuf {
    let n = SCRATCH_COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("stackclip-{}-{tag}-{n}", process::id()))
}

// ============================================================================
// Mother Pattern Factories
// ============================================================================

pub struct ProgramsMother;

impl ProgramsMother {
    /// Programs that do not exist on any host.
    #[must_use]
    pub fn missing() -> ClipboardPrograms {
        ClipboardPrograms::new("stackclip-no-such-writer", "stackclip-no-such-reader")
    }

    /// A clipboard stored in a plain file, driven through `sh`.
    #[must_use]
    pub fn file_backed(store: impl AsRef<Path>) -> ClipboardPrograms {
        let store = store.as_ref().to_string_lossy().into_owned();
        ClipboardPrograms::new("sh", "sh")
            .with_writer_args(["-c", "cat > \"$0\"", store.as_str()])
            .with_reader_args(["-c", "cat \"$0\"", store.as_str()])
    }

    /// Programs that print `boom` to stderr and exit with status 3.
    #[must_use]
    pub fn failing() -> ClipboardPrograms {
        ClipboardPrograms::new("sh", "sh")
            .with_writer_args(["-c", "cat > /dev/null; echo boom >&2; exit 3"])
            .with_reader_args(["-c", "echo boom >&2; exit 3"])
    }

    /// A writer that fails without reading any of its input.
    #[must_use]
    pub fn exits_early() -> ClipboardPrograms {
        ClipboardPrograms::new("sh", "sh")
            .with_writer_args(["-c", "echo boom >&2; exit 3"])
            .with_reader_args(["-c", "exit 0"])
    }
}
