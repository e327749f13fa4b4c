//! Frontend: lexing, parsing and inheritance resolution
//!
//! The frontend turns record-definition source text into a populated
//! [`RecordKeeper`]: lex -> parse -> resolve.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod resolve;

pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;
pub use resolve::Resolver;

use crate::common::CompileResult;
use crate::records::RecordKeeper;

/// Compile record-definition source into a populated record keeper
pub fn build_records(source: &str) -> CompileResult<RecordKeeper> {
    let items = Parser::new(source)?.parse()?;
    Resolver::new().resolve(&items)
}
