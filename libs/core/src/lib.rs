//! Typed builders and validation for Microsoft Teams incoming webhook payloads.
//!
//! The [`adaptivecard`] module models Adaptive Card documents wrapped in a
//! webhook message envelope; [`botapi`] covers the plain text message with
//! mentions. Both validate fail-fast and serialize to the exact JSON Teams
//! expects.
pub mod adaptivecard;
pub mod botapi;
pub mod error;

pub use adaptivecard::{Card, Element, Message, TopLevelCard, Validate};
pub use error::{CardError, ErrorKind, ValidationError, ValidationResult};

/// Returns the semantic version advertised by this crate.
///
/// ```
/// assert_eq!(tnotify_core::version(), env!("CARGO_PKG_VERSION"));
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
