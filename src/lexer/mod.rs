//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that turns source bytes
//! into tokens for the parser. It handles:
//!
//! - On-demand scanning, one token per call
//! - Recognition of keywords, identifiers, integer and boolean literals
//! - Single and double character operators (`=`/`==`, `!`/`!=`)
//! - Token span tracking for error reporting

pub mod lexer;
pub mod tokens;
