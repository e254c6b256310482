//! Caller descriptions of the form `path::to::function(),file.rs:42`.
//!
//! Frame indices are counted from the caller of [`callers_info`]: index 0 is
//! whoever called it. Inlined functions count as frames of their own.

use std::path::{Path, PathBuf, is_separator};

// ============================================================================
// Resolved Frames
// ============================================================================

/// Owned copy of the metadata resolved for one logical frame.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedFrame {
    name: Option<String>,
    file: Option<PathBuf>,
    line: Option<u32>,
}

impl ResolvedFrame {
    fn from_symbol(symbol: &backtrace::Symbol) -> Self {
        Self {
            // Alternate formatting drops the trailing `::h0123abcd` hash.
            name: symbol.name().map(|name| format!("{name:#}")),
            file: symbol.filename().map(Path::to_path_buf),
            line: symbol.lineno(),
        }
    }

    fn is_anchor(&self) -> bool {
        self.name.as_deref() == Some(ANCHOR_NAME)
    }
}

/// What to do with a frame inside the requested window.
#[derive(Debug, PartialEq, Eq)]
enum FrameOutcome {
    Emit(String),
    Skip,
    Stop,
}

const ANCHOR_NAME: &str = concat!(module_path!(), "::callers_info");

/// Formats one frame, or decides to skip it or stop walking.
fn describe(frame: &ResolvedFrame) -> FrameOutcome {
    let (Some(name), Some(file), Some(line)) = (&frame.name, &frame.file, frame.line) else {
        return FrameOutcome::Stop;
    };

    let file_text = file.to_string_lossy();
    if file_text.starts_with('<') {
        return FrameOutcome::Stop;
    }
    if !file_text.chars().any(is_separator) {
        return FrameOutcome::Skip;
    }

    let base = file
        .file_name()
        .map_or_else(|| file_text.to_string(), |base| base.to_string_lossy().into_owned());
    FrameOutcome::Emit(format!("{name}(),{base}:{line}"))
}

/// Resolves the logical frames that follow the `callers_info` frame.
///
/// Returns an empty list when the anchor frame cannot be located, which
/// happens when symbols are stripped.
fn frames_after_anchor(anchor: usize, limit: usize) -> Vec<ResolvedFrame> {
    let mut raw = Vec::new();
    backtrace::trace(|frame| {
        raw.push(frame.clone());
        true
    });

    let mut frames = Vec::new();
    let mut found = false;
    for frame in &raw {
        let mut symbols = Vec::new();
        backtrace::resolve_frame(frame, |symbol| symbols.push(ResolvedFrame::from_symbol(symbol)));

        if !found {
            found = frame.symbol_address() as usize == anchor
                || symbols.iter().any(ResolvedFrame::is_anchor);
            continue;
        }

        if symbols.is_empty() {
            // Unresolvable frame: keep a placeholder so the walk stops here.
            frames.push(ResolvedFrame {
                name: None,
                file: None,
                line: None,
            });
        } else {
            frames.extend(symbols);
        }
        if frames.len() >= limit {
            frames.truncate(limit);
            break;
        }
    }

    if !found {
        tracing::debug!("caller frame lookup failed: anchor frame not found");
    }
    frames
}

// ============================================================================
// Public API
// ============================================================================

/// Describes the frames in `skip..end`, counted from the caller of this
/// function.
///
/// Walking stops early at a frame whose symbol, function name, file or line
/// cannot be resolved, or whose file name is synthetic (starts with `<`).
/// Frames whose file name has no directory separator are left out, so the
/// result can be shorter than `end - skip`.
#[inline(never)]
#[must_use]
pub fn callers_info(skip: usize, end: usize) -> Vec<String> {
    if end <= skip {
        return Vec::new();
    }

    let anchor = callers_info as fn(usize, usize) -> Vec<String> as usize;
    let frames = frames_after_anchor(anchor, end);

    let mut callers = Vec::with_capacity((end - skip).min(frames.len()));
    for frame in frames.iter().skip(skip) {
        match describe(frame) {
            FrameOutcome::Emit(caller) => callers.push(caller),
            FrameOutcome::Skip => {}
            FrameOutcome::Stop => break,
        }
    }
    callers
}

/// Describes `num` frames starting `skip` frames above the caller.
#[inline(never)]
#[must_use]
pub fn simple_callers_info(skip: usize, num: usize) -> Vec<String> {
    let skip = skip.saturating_add(1);
    callers_info(skip, skip.saturating_add(num))
}

/// Describes the frame `skip` levels above the caller; `0` is the caller
/// itself. Returns an empty string when the frame cannot be described.
///
/// ```ignore
/// // stackclip::report::emit(),report.rs:26
/// let here = stackclip::stack::caller_info(0);
/// ```
#[inline(never)]
#[must_use]
pub fn caller_info(skip: usize) -> String {
    let skip = skip.saturating_add(1);
    callers_info(skip, skip.saturating_add(1))
        .into_iter()
        .next()
        .unwrap_or_default()
}

// ============================================================================
// Tests
// ============================================================================
