use std::fmt::Display;

use crate::{Position, Span};

use super::types::Literal;

/// Identity of a call site, unique within one parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallId(pub u32);

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Num(Num),
    Ident(Ident),
    Call(FuncCall),
    Unary(Box<UnaryOp>),
    Binary(Box<BinOp>),
}

impl Expr {
    /// Where the expression starts, taken from its leftmost leaf.
    pub fn start(&self) -> &Position {
        match self {
            Expr::Num(num) => &num.span.start,
            Expr::Ident(ident) => &ident.span.start,
            Expr::Call(call) => &call.span.start,
            Expr::Unary(unary) => unary.operand.start(),
            Expr::Binary(binary) => binary.left.start(),
        }
    }
}

// LITERALS

/// Number literal with its static type tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Num {
    pub value: Literal,
    pub span: Span,
}

/// Identifier reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

// COMPLEX

/// Function call, in expression or statement position.
///
/// The callee is resolved by the semantic analyzer and looked up by `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncCall {
    pub id: CallId,
    pub name: String,
    pub args: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Minus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    pub op: UnaryOperator,
    pub operand: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOperator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Display for BinOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            BinOperator::Add => "+",
            BinOperator::Sub => "-",
            BinOperator::Mul => "*",
            BinOperator::Div => "/",
        };
        write!(f, "{}", symbol)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinOp {
    pub left: Expr,
    pub op: BinOperator,
    pub right: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl Display for CmpOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            CmpOp::Eq => "==",
            CmpOp::NotEq => "!=",
            CmpOp::Lt => "<",
            CmpOp::LtEq => "<=",
            CmpOp::Gt => ">",
            CmpOp::GtEq => ">=",
        };
        write!(f, "{}", symbol)
    }
}

/// Comparison used by `if` and `for`. Only these produce booleans.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionOp {
    pub left: Expr,
    pub op: CmpOp,
    pub right: Expr,
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Num(num) => match num.value {
                Literal::Int(value) => write!(f, "{}", value),
                Literal::Float(value) => write!(f, "{:?}", value),
            },
            Expr::Ident(ident) => write!(f, "{}", ident.name),
            Expr::Call(call) => {
                let args: Vec<String> = call.args.iter().map(|arg| arg.to_string()).collect();
                write!(f, "{}({})", call.name, args.join(", "))
            }
            Expr::Unary(unary) => match unary.op {
                UnaryOperator::Plus => write!(f, "+{}", unary.operand),
                UnaryOperator::Minus => write!(f, "-{}", unary.operand),
            },
            Expr::Binary(binary) => write!(f, "({} {} {})", binary.left, binary.op, binary.right),
        }
    }
}

impl Display for ConditionOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}
