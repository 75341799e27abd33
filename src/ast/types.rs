use std::fmt::Display;

use crate::lexer::tokens::TokenKind;

/// The builtin types a declaration can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeName {
    Int,
    Float,
}

impl TypeName {
    pub fn from_token_kind(kind: TokenKind) -> Option<TypeName> {
        match kind {
            TokenKind::Int => Some(TypeName::Int),
            TokenKind::Float => Some(TypeName::Float),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeName::Int => "int",
            TypeName::Float => "float",
        }
    }
}

impl Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Numeric literal value as written in the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
}
