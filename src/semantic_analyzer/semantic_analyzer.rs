use std::collections::HashMap;

use la_arena::Arena;

use crate::{ast::{ast::{FuncBlock, Program, VarDecl}, expressions::{CallId, ConditionOp, Expr, FuncCall}, statements::{StatesList, Stmt}, types::TypeName}, config::Config, errors::errors::{Error, ErrorImpl}, Position};

use super::symbols::{BuiltinTypeSymbol, FuncId, FuncSymbol, ScopeId, ScopeTree, ScopedSymbolTable, Symbol, VarSymbol};

/// Everything the interpreter needs from analysis: the scope arena, the
/// function symbols and which function each call site resolved to.
#[derive(Debug)]
pub struct SemanticModel<'a> {
    scopes: ScopeTree<'a>,
    functions: Arena<FuncSymbol<'a>>,
    calls: HashMap<CallId, FuncId<'a>>,
    global: ScopeId<'a>,
}

impl<'a> SemanticModel<'a> {
    /// The function a call site resolved to, if any. Unresolved calls fail at runtime.
    pub fn resolve_call(&self, call: &FuncCall) -> Option<&FuncSymbol<'a>> {
        self.calls.get(&call.id).map(|id| &self.functions[*id])
    }

    /// Looks a function up by name in the global scope.
    pub fn global_function(&self, name: &str) -> Option<&FuncSymbol<'a>> {
        match self.scopes.get(self.global).get_local(name) {
            Some(Symbol::Func(id)) => Some(&self.functions[*id]),
            _ => None,
        }
    }

    pub fn global_scope(&self) -> ScopeId<'a> {
        self.global
    }

    pub fn scopes(&self) -> &ScopeTree<'a> {
        &self.scopes
    }

    pub fn functions(&self) -> &Arena<FuncSymbol<'a>> {
        &self.functions
    }

    pub fn resolved_calls(&self) -> usize {
        self.calls.len()
    }
}

pub struct SemanticAnalyzer<'a> {
    scopes: ScopeTree<'a>,
    functions: Arena<FuncSymbol<'a>>,
    calls: HashMap<CallId, FuncId<'a>>,
    strict_arity: bool,
}

impl<'a> SemanticAnalyzer<'a> {
    pub fn new(config: &Config) -> Self {
        SemanticAnalyzer {
            scopes: ScopeTree::new(),
            functions: Arena::new(),
            calls: HashMap::new(),
            strict_arity: config.strict_arity,
        }
    }

    pub fn analyze(mut self, program: &'a Program) -> Result<SemanticModel<'a>, Error> {
        let global = self.visit_program(program)?;

        Ok(SemanticModel {
            scopes: self.scopes,
            functions: self.functions,
            calls: self.calls,
            global,
        })
    }

    fn visit_program(&mut self, program: &'a Program) -> Result<ScopeId<'a>, Error> {
        let builtin = self.scopes.alloc(ScopedSymbolTable::new("builtin", 0, None));
        for type_name in [TypeName::Int, TypeName::Float] {
            self.scopes.get_mut(builtin).insert(
                type_name.as_str(),
                Symbol::BuiltinType(BuiltinTypeSymbol { name: type_name }),
            );
        }

        let global = self.open_scope("global", builtin);

        for var in &program.block.var_decls {
            self.visit_var_decl(global, var)?;
        }

        // Every global function is visible from every body, wherever it is declared
        let mut declared = Vec::with_capacity(program.block.functions.len());
        for function in &program.block.functions {
            declared.push(self.declare_function(global, function)?);
        }

        for (function, id) in program.block.functions.iter().zip(declared) {
            self.visit_func_body(global, function, id)?;
        }

        self.close_scope(global);

        Ok(global)
    }

    fn open_scope(&mut self, name: &str, enclosing: ScopeId<'a>) -> ScopeId<'a> {
        let level = self.scopes.get(enclosing).level + 1;
        tracing::debug!(scope = name, level, "enter scope");

        self.scopes.alloc(ScopedSymbolTable::new(name, level, Some(enclosing)))
    }

    fn close_scope(&self, scope: ScopeId<'a>) {
        tracing::trace!("\n{}", self.scopes.describe(scope, &self.functions));
        tracing::debug!(scope = %self.scopes.get(scope).name, "leave scope");
    }

    /// Resolves a declared type through the scope chain.
    fn resolve_type(&self, scope: ScopeId<'a>, decl: &VarDecl) -> Result<TypeName, Error> {
        match self.scopes.lookup(scope, decl.var_type.as_str()) {
            Some(Symbol::BuiltinType(builtin)) => Ok(builtin.name),
            _ => Err(Error::at(
                ErrorImpl::UnknownType { type_: decl.var_type.to_string() },
                decl.span.start.clone(),
            )),
        }
    }

    fn check_duplicate(&self, scope: ScopeId<'a>, name: &str, position: &Position) -> Result<(), Error> {
        if self.scopes.get(scope).get_local(name).is_some() {
            return Err(Error::at(
                ErrorImpl::DuplicateIdentifier { identifier: name.to_string() },
                position.clone(),
            ));
        }

        Ok(())
    }

    fn visit_var_decl(&mut self, scope: ScopeId<'a>, var: &'a VarDecl) -> Result<(), Error> {
        self.check_duplicate(scope, &var.ident, &var.span.start)?;
        let var_type = self.resolve_type(scope, var)?;

        self.scopes.get_mut(scope).insert(
            var.ident.as_str(),
            Symbol::Var(VarSymbol { name: var.ident.clone(), var_type }),
        );

        Ok(())
    }

    /// Binds the function's symbol in `scope`, before its body is looked at.
    fn declare_function(&mut self, scope: ScopeId<'a>, function: &'a FuncBlock) -> Result<FuncId<'a>, Error> {
        self.check_duplicate(scope, &function.name, &function.span.start)?;

        let id = self.functions.alloc(FuncSymbol {
            name: function.name.clone(),
            params: &function.params,
            return_type: function.return_type,
            body: None,
        });
        self.scopes.get_mut(scope).insert(function.name.as_str(), Symbol::Func(id));

        Ok(id)
    }

    fn visit_func_body(&mut self, scope: ScopeId<'a>, function: &'a FuncBlock, id: FuncId<'a>) -> Result<(), Error> {
        let function_scope = self.open_scope(&function.name, scope);

        for param in &function.params {
            self.visit_var_decl(function_scope, param)?;
        }

        self.visit_states_list(function_scope, &function.body)?;
        self.close_scope(function_scope);

        self.functions[id].body = Some(&function.body);

        Ok(())
    }

    fn visit_states_list(&mut self, scope: ScopeId<'a>, list: &'a StatesList) -> Result<(), Error> {
        for stmt in &list.statements {
            self.visit_stmt(scope, stmt)?;
        }

        Ok(())
    }

    fn visit_stmt(&mut self, scope: ScopeId<'a>, stmt: &'a Stmt) -> Result<(), Error> {
        match stmt {
            Stmt::VarDecl(var) => self.visit_var_decl(scope, var),
            Stmt::FuncBlock(function) => {
                let id = self.declare_function(scope, function)?;
                self.visit_func_body(scope, function, id)
            }
            Stmt::If(if_stmt) => {
                self.visit_condition(scope, &if_stmt.condition)?;
                self.visit_states_list(scope, &if_stmt.body)
            }
            Stmt::For(for_stmt) => {
                self.visit_condition(scope, &for_stmt.condition)?;
                self.visit_states_list(scope, &for_stmt.body)
            }
            Stmt::Goto(_) | Stmt::Label(_) => Ok(()),
            Stmt::Return(ret) => self.visit_expr(scope, &ret.value),
            // The target is bound at runtime, only the value is checked
            Stmt::Assign(assign) => self.visit_expr(scope, &assign.value),
            Stmt::Call(call) => self.visit_call(scope, call),
        }
    }

    fn visit_condition(&mut self, scope: ScopeId<'a>, condition: &'a ConditionOp) -> Result<(), Error> {
        self.visit_expr(scope, &condition.left)?;
        self.visit_expr(scope, &condition.right)
    }

    fn visit_expr(&mut self, scope: ScopeId<'a>, expr: &'a Expr) -> Result<(), Error> {
        match expr {
            Expr::Num(_) => Ok(()),
            Expr::Ident(ident) => {
                if self.scopes.lookup(scope, &ident.name).is_none() {
                    return Err(Error::at(
                        ErrorImpl::UndefinedVariable { variable: ident.name.clone() },
                        ident.span.start.clone(),
                    ));
                }
                Ok(())
            }
            Expr::Call(call) => self.visit_call(scope, call),
            Expr::Unary(unary) => self.visit_expr(scope, &unary.operand),
            Expr::Binary(binary) => {
                self.visit_expr(scope, &binary.left)?;
                self.visit_expr(scope, &binary.right)
            }
        }
    }

    fn visit_call(&mut self, scope: ScopeId<'a>, call: &'a FuncCall) -> Result<(), Error> {
        for arg in &call.args {
            self.visit_expr(scope, arg)?;
        }

        let resolved = match self.scopes.lookup(scope, &call.name) {
            Some(Symbol::Func(id)) => *id,
            _ => {
                tracing::trace!(function = %call.name, "call left unresolved");
                return Ok(());
            }
        };

        let expected = self.functions[resolved].params.len();
        if self.strict_arity && expected != call.args.len() {
            return Err(Error::at(
                ErrorImpl::ArgumentCountMismatch {
                    function: call.name.clone(),
                    expected,
                    received: call.args.len(),
                },
                call.span.start.clone(),
            ));
        }

        self.calls.insert(call.id, resolved);

        Ok(())
    }
}

/// Checks `program` and builds the model the interpreter runs against.
pub fn analyze<'a>(program: &'a Program, config: &Config) -> Result<SemanticModel<'a>, Error> {
    SemanticAnalyzer::new(config).analyze(program)
}
