use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("package", TokenKind::Package);
        map.insert("label", TokenKind::Label);
        map.insert("goto", TokenKind::Goto);
        map.insert("var", TokenKind::Var);
        map.insert("if", TokenKind::If);
        map.insert("for", TokenKind::For);
        map.insert("func", TokenKind::Func);
        map.insert("return", TokenKind::Return);
        map.insert("int", TokenKind::Int);
        map.insert("float", TokenKind::Float);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Newline,

    IntNum,
    FloatNum,
    String,
    Ident,

    // Reserved
    Package,
    Label,
    Goto,
    Var,
    If,
    For,
    Func,
    Return,
    Int,
    Float,

    Eq,     // =
    Plus,
    Minus,
    Multi,
    Divide,
    EqEq,   // ==
    NotEq,  // !=
    Lt,
    LtEq,
    Gt,
    GtEq,

    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::EOF => "EOF",
            TokenKind::Newline => "NEWLINE",
            TokenKind::IntNum => "INT_NUM",
            TokenKind::FloatNum => "FLOAT_NUM",
            TokenKind::String => "STRING",
            TokenKind::Ident => "IDENT",
            TokenKind::Package => "PACKAGE",
            TokenKind::Label => "LABEL",
            TokenKind::Goto => "GOTO",
            TokenKind::Var => "VAR",
            TokenKind::If => "IF",
            TokenKind::For => "FOR",
            TokenKind::Func => "FUNC",
            TokenKind::Return => "RETURN",
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
            TokenKind::Eq => "EQ",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multi => "MULTI",
            TokenKind::Divide => "DIVIDE",
            TokenKind::EqEq => "EQEQ",
            TokenKind::NotEq => "NOTEQ",
            TokenKind::Lt => "LT",
            TokenKind::LtEq => "LTEQ",
            TokenKind::Gt => "GT",
            TokenKind::GtEq => "GTEQ",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Comma => "COMMA",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Token({}, {:?}, position={}:{})",
            self.kind, self.value, self.span.start.line, self.span.start.column
        )
    }
}

impl Token {
    pub fn line(&self) -> u32 {
        self.span.start.line
    }

    pub fn column(&self) -> u32 {
        self.span.start.column
    }

    /// Text used when the token shows up in a diagnostic.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::EOF => String::from("EOF"),
            TokenKind::Newline => String::from("NEWLINE"),
            _ => self.value.clone(),
        }
    }
}
