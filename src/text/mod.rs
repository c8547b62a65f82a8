/// Escape-sequence encoding for arbitrary special characters.
pub mod escape;

/// Quote wrapping built on escaping, plus the strict inverse.
pub mod quote;

pub use escape::escape;
pub use quote::{DEFAULT_ESCAPE, DEFAULT_QUOTE, quote, quote_with, unquote, unquote_with};
