use std::fmt::Display;

use crate::Span;

use super::{statements::StatesList, types::TypeName};

/// Root of the tree: the package clause and its top-level declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub package: String,
    pub block: Block,
}

/// Top-level container. Variables and functions are kept apart, each in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub var_decls: Vec<VarDecl>,
    pub functions: Vec<FuncBlock>,
}

/// `var ident type`, also used for function parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub ident: String,
    pub var_type: TypeName,
    pub span: Span,
}

/// Function declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncBlock {
    pub name: String,
    pub params: Vec<VarDecl>,
    pub return_type: Option<TypeName>,
    pub body: StatesList,
    pub span: Span,
}

impl FuncBlock {
    /// Renders the declared signature, e.g. `func add(a int, b int) int`.
    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|param| format!("{} {}", param.ident, param.var_type))
            .collect();

        match self.return_type {
            Some(return_type) => format!("func {}({}) {}", self.name, params.join(", "), return_type),
            None => format!("func {}({})", self.name, params.join(", ")),
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "package {}", self.package)?;
        for var in &self.block.var_decls {
            writeln!(f, "var {} {}", var.ident, var.var_type)?;
        }
        for function in &self.block.functions {
            writeln!(f, "{}", function.signature())?;
        }
        Ok(())
    }
}
