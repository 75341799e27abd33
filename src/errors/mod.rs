//! Error types and error handling for the pipeline.
//!
//! Every phase reports failures through the same [`errors::Error`] type:
//!
//! - A closed set of error kinds (`ILLEGAL_CHAR`, `UNEXPECTED_TOKEN`, ...)
//! - Concrete error variants carrying the details of each failure
//! - An optional source position (always present for lexer and parser errors)
//! - Helpful suggestions for common mistakes

pub mod errors;
