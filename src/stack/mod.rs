//! Call-stack capture for diagnostics.
//!
//! - [`capture`] - raw trace text sized by a bounded growth loop
//! - [`frames`] - one-line caller descriptions
//! - [`growth`] - the growth loop itself, usable with any fill source
//!
//! Nothing here returns an error. When frames cannot be resolved or the
//! trace does not fit, the output is shorter.

pub mod capture;
pub mod frames;
pub mod growth;

pub use capture::{ThreadTrace, TraceSource, call_stacks, call_stacks_with};
pub use frames::{caller_info, callers_info, simple_callers_info};
pub use growth::GrowthPolicy;
