//! Protocol commands and their parser.
//!
//! Each input line maps to exactly one [`Command`] variant, which the
//! executor turns into a single store call.

mod ast;
mod error;
mod parser;

pub use ast::Command;
pub use error::{ParseError, ParseResult};
pub use parser::Parser;
