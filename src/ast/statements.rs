use crate::Span;

use super::{
    ast::{FuncBlock, VarDecl},
    expressions::{ConditionOp, Expr, FuncCall},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl(VarDecl),
    FuncBlock(FuncBlock),
    If(IfStatement),
    For(ForStatement),
    Goto(GotoDecl),
    Label(LabelDecl),
    Return(RetDecl),
    Assign(AssignOp),
    Call(FuncCall),
}

/// Ordered statement sequence forming a function or control-flow body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatesList {
    pub statements: Vec<Stmt>,
}

impl StatesList {
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: ConditionOp,
    pub body: StatesList,
}

/// `for cond { ... }`, evaluated like a while loop.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub condition: ConditionOp,
    pub body: StatesList,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignOp {
    pub ident: String,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetDecl {
    pub value: Expr,
}

// Parsed and analyzed, never executed.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelDecl {
    pub ident: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GotoDecl {
    pub ident: String,
}
