//! Shared constants for stack capture and clipboard program selection.
//!
//! Grouping these values keeps the capture policy and the platform program
//! table in one place.

// ============================================================================
// Stack Capture Constants
// ============================================================================

/// Starting buffer size (in bytes) when capturing the current thread's trace.
pub const DEF_STACK_LEN: usize = 10_000;

/// Starting buffer size (in bytes) when capturing in "all threads" mode.
pub const MAX_STACK_LEN: usize = 100_000;

/// Hard cap on how many times the capture buffer is grown.
pub const MAX_GROW_ATTEMPTS: u32 = 10;

// ============================================================================
// Clipboard Program Names
// ============================================================================

/// Clipboard writer on macOS.
pub const WRITER_ON_MAC: &str = "pbcopy";
/// Clipboard writer on Windows.
pub const WRITER_ON_WIN: &str = "clip";
/// Clipboard writer on Linux and other Unix hosts.
pub const WRITER_ON_LIN: &str = "xsel";

/// Clipboard reader on macOS.
pub const READER_ON_MAC: &str = "pbpaste";
/// Clipboard reader on Windows.
pub const READER_ON_WIN: &str = "clip";
/// Clipboard reader on Linux and other Unix hosts.
pub const READER_ON_LIN: &str = "xclip";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_mode_starts_larger() {
        assert!(MAX_STACK_LEN >= DEF_STACK_LEN);
    }

    #[test]
    fn test_program_names() {
        assert_eq!(WRITER_ON_MAC, "pbcopy");
        assert_eq!(READER_ON_MAC, "pbpaste");
        assert_eq!(WRITER_ON_WIN, READER_ON_WIN);
        assert_eq!(WRITER_ON_LIN, "xsel");
        assert_eq!(READER_ON_LIN, "xclip");
    }
}
