//! Platform-specific clipboard access.
//!
//! - [`programs`] - which executables read and write the clipboard on each host
//! - [`clipboard`] - buffered writes, reads, and the default instance
//!
//! # Platform Support
//!
//! - Linux (X11, through `xsel` and `xclip`)
//! - macOS (`pbcopy` and `pbpaste`)
//! - Windows (`clip`)

pub mod clipboard;
pub mod programs;

pub use clipboard::{Clipboard, init_std_clipboard, std_clipboard};
pub use programs::{ClipboardPrograms, HostPlatform};
