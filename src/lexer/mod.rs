//! Lexical analysis module.
//!
//! This module contains the lexer that converts source text into tokens for
//! the parser. It handles:
//!
//! - Tokenization driven by a table of anchored regex patterns
//! - Recognition of keywords, identifiers, numbers, strings and operators
//! - Significant newlines (statement terminators)
//! - Line/column tracking for error reporting
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;
