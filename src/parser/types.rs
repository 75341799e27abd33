//! Type annotation parsing.
//!
//! Only the two builtin types exist, so a type is a single `int` or
//! `float` keyword token.

use crate::{
    ast::types::TypeName,
    errors::errors::{Error, ErrorImpl},
};

use super::parser::Parser;

/// Consumes a type keyword, or fails with `UNEXPECTED_TOKEN` at the current token.
pub fn parse_type(parser: &mut Parser) -> Result<TypeName, Error> {
    match TypeName::from_token_kind(parser.current_token_kind()) {
        Some(type_name) => {
            parser.advance()?;
            Ok(type_name)
        }
        None => Err(Error::at(
            ErrorImpl::ExpectedType {
                found: parser.current_token().describe(),
            },
            parser.get_position(),
        )),
    }
}
