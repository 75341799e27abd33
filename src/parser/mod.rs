//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms the token stream
//! into an Abstract Syntax Tree. It uses a Pratt parser for expressions
//! with proper operator precedence and handles:
//!
//! - The package clause and top-level declarations
//! - Statement parsing (variables, functions, control flow, calls)
//! - Expression parsing (binary and unary ops, calls, literals)
//! - Conditions for `if` and `for`
//! - Type parsing for declarations and parameters
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
