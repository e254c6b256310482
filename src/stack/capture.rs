//! Raw call-stack dumps sized with [`GrowthPolicy`].

use std::fmt::Write as _;
use std::thread;

use super::growth::GrowthPolicy;

// ============================================================================
// TraceSource
// ============================================================================

/// Something that can dump trace text into a caller-provided buffer.
pub trait TraceSource {
    /// Writes as much of the trace as fits into `buf` and returns the
    /// number of bytes written.
    fn dump(&mut self, buf: &mut [u8]) -> usize;
}

/// Trace of the calling thread, rendered once and then served from memory.
///
/// In "all" mode the text is prefixed with a header naming the thread. Only
/// the calling thread can be walked, so "all" changes the header and the
/// starting buffer size, not the set of stacks.
#[derive(Debug)]
pub struct ThreadTrace {
    all: bool,
    rendered: Option<String>,
}

impl ThreadTrace {
    /// Creates a source for the calling thread.
    #[must_use]
    pub fn new(all: bool) -> Self {
        Self {
            all,
            rendered: None,
        }
    }

    fn render(&self) -> String {
        let trace = backtrace::Backtrace::new();
        let mut text = String::new();
        if self.all {
            let current = thread::current();
            let _ = writeln!(
                text,
                "thread '{}' ({:?}):",
                current.name().unwrap_or("<unnamed>"),
                current.id()
            );
        }
        let _ = write!(text, "{trace:?}");
        text
    }
}

impl TraceSource for ThreadTrace {
    fn dump(&mut self, buf: &mut [u8]) -> usize {
        if self.rendered.is_none() {
            self.rendered = Some(self.render());
        }
        let bytes = self.rendered.as_deref().unwrap_or_default().as_bytes();
        let n = bytes.len().min(buf.len());
        buf[..n].copy_from_slice(&bytes[..n]);
        n
    }
}

// ============================================================================
// Capture
// ============================================================================

/// Captures the calling thread's stack as text.
///
/// The buffer starts at [`crate::constants::DEF_STACK_LEN`] bytes, or
/// [`crate::constants::MAX_STACK_LEN`] when `all` is set, and doubles while
/// the dump fills it, for at most
/// [`crate::constants::MAX_GROW_ATTEMPTS`] attempts.
#[must_use]
pub fn call_stacks(all: bool) -> Vec<u8> {
    call_stacks_with(GrowthPolicy::for_stack(all), &mut ThreadTrace::new(all))
}

/// Dumps `source` using an explicit growth policy.
pub fn call_stacks_with<S>(policy: GrowthPolicy, source: &mut S) -> Vec<u8>
where
    S: TraceSource + ?Sized,
{
    policy.grow_until_fits(|buf| source.dump(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEF_STACK_LEN;

    struct FixedTrace(Vec<u8>);

    impl TraceSource for FixedTrace {
        fn dump(&mut self, buf: &mut [u8]) -> usize {
            let n = self.0.len().min(buf.len());
            buf[..n].copy_from_slice(&self.0[..n]);
            n
        }
    }

    #[inline(never)]
    fn capture_here() -> Vec<u8> {
        call_stacks(false)
    }

    #[test]
    #[cfg_attr(not(debug_assertions), ignore = "optimized builds fold and inline frames")]
    fn test_call_stacks_mentions_caller() {
        let text = String::from_utf8_lossy(&capture_here()).into_owned();
        assert!(!text.is_empty());
        assert!(text.contains("capture_here"), "trace was:\n{text}");
    }

    #[test]
    fn test_all_mode_has_thread_header() {
        let text = String::from_utf8_lossy(&call_stacks(true)).into_owned();
        assert!(text.starts_with("thread '"), "trace was:\n{text}");
    }

    #[test]
    fn test_fake_source_is_trimmed() {
        let mut source = FixedTrace(b"hello".to_vec());
        let out = call_stacks_with(GrowthPolicy::for_stack(false), &mut source);
        assert_eq!(out, b"hello");
    }

    #[test]
    fn test_long_trace_grows_past_default() {
        let long = vec![b'z'; DEF_STACK_LEN * 3];
        let mut source = FixedTrace(long.clone());
        let out = call_stacks_with(GrowthPolicy::for_stack(false), &mut source);
        assert_eq!(out, long);
    }

    #[test]
    fn test_thread_trace_renders_once() {
        let mut source = ThreadTrace::new(false);
        let mut small = [0u8; 4];
        assert_eq!(source.dump(&mut small), 4);
        let first = source.rendered.clone();
        let mut large = vec![0u8; 1 << 20];
        source.dump(&mut large);
        assert_eq!(source.rendered, first);
    }
}
