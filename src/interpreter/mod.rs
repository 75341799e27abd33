//! Tree-walking interpreter.
//!
//! - `value` - runtime numbers and their arithmetic
//! - `call_stack` - activation records and the call stack
//! - `interpreter` - statement execution and expression evaluation

pub mod call_stack;
pub mod interpreter;
pub mod value;

#[cfg(test)]
mod tests;
