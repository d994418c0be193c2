//! Stylesheet parsing: errors, source loading, and the parser itself.

mod error;
#[allow(clippy::module_inception)]
mod parser;
mod source;

pub use error::{ErrorOffset, ParseError};
pub use parser::StylesheetParser;
pub use source::{MemoryLoader, NoLoader, SourceLoader, SourceStack};
