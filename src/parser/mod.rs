//! Markup front end.
//!
//! A single pass over wikitext using:
//! - **logos** for fast lexing
//! - a balanced-brace scanner extracting `{{#name: …}}` invocations
//!
//! Everything that is not a registered parser function passes through
//! untouched; malformed invocations degrade to plain text, never to a parse
//! failure.

pub mod functions;
mod lexer;
mod magic;
mod params;
mod scan;

pub use functions::{FunctionRegistry, ParserFunction, render_errors};
pub use lexer::{Lexer, MarkupToken, Token};
pub use magic::{MAGIC_WORDS, strip_magic_words};
pub use params::ParamList;
pub use scan::{Invocation, process_text, scan_functions};
