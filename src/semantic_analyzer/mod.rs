//! Semantic analysis over the parsed program.
//!
//! Builds the chain of scoped symbol tables (builtin, global, one per
//! function), reports duplicate and undefined identifiers, and records which
//! function each call site resolves to. The result, a [`semantic_analyzer::SemanticModel`],
//! borrows the program and is what the interpreter runs against.

pub mod semantic_analyzer;
pub mod symbols;
