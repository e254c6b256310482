//! Call-stack capture helpers and a process-backed system clipboard.
//!
//! The two halves are independent:
//!
//! - [`stack`] captures trace text and formats caller frames
//! - [`platform`] reads and writes the clipboard through external programs

pub mod constants;
pub mod error;
pub mod platform;
pub mod stack;

#[cfg(test)]
mod test_utils;

pub use error::{ClipboardError, ClipboardResult};
pub use platform::{Clipboard, ClipboardPrograms, HostPlatform};
pub use stack::{GrowthPolicy, call_stacks, caller_info, callers_info, simple_callers_info};
