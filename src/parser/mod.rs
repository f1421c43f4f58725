//! Parser for session scripts and prompt lines

pub mod ast;
pub mod grammar;

pub use ast::*;
pub use grammar::{parse_line, parse_script};
