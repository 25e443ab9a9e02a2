//! Basic low-level log parsing functionality.
pub mod annotation_scanner;
pub(crate) mod defs;
pub mod line_source;
pub mod parsing_error;

pub use line_source::InMemoryLineSource;
pub use parsing_error::{ParsingError, ParsingErrorType};
