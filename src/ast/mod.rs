//! Abstract Syntax Tree definitions.
//!
//! Every node kind is a variant of a closed enum ([`statements::Stmt`],
//! [`expressions::Expr`]) or a plain struct, so the analyzer and the
//! interpreter handle each kind through exhaustive `match`es.
//!
//! - `ast` - program, top-level block, function and variable declarations
//! - `statements` - statement variants and statement lists
//! - `expressions` - expressions, conditions and call sites
//! - `types` - builtin type names and literal values

pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
