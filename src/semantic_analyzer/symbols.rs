use std::{collections::HashMap, fmt::Display};

use la_arena::{Arena, Idx};

use crate::ast::{ast::VarDecl, statements::StatesList, types::TypeName};

pub type ScopeId<'a> = Idx<ScopedSymbolTable<'a>>;
pub type FuncId<'a> = Idx<FuncSymbol<'a>>;

#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinTypeSymbol {
    pub name: TypeName,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarSymbol {
    pub name: String,
    pub var_type: TypeName,
}

/// A declared function. `body` is filled in once the body has been analyzed.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncSymbol<'a> {
    pub name: String,
    pub params: &'a [VarDecl],
    pub return_type: Option<TypeName>,
    pub body: Option<&'a StatesList>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Symbol<'a> {
    BuiltinType(BuiltinTypeSymbol),
    Var(VarSymbol),
    Func(FuncId<'a>),
}

impl Symbol<'_> {
    pub fn is_func(&self) -> bool {
        matches!(self, Symbol::Func(_))
    }
}

#[derive(Debug)]
pub struct ScopedSymbolTable<'a> {
    pub name: String,
    pub level: u32,
    pub enclosing: Option<ScopeId<'a>>,
    symbols: HashMap<String, Symbol<'a>>,
    /// Insertion order, for dumps
    order: Vec<String>,
}

impl<'a> ScopedSymbolTable<'a> {
    pub fn new(name: impl Into<String>, level: u32, enclosing: Option<ScopeId<'a>>) -> Self {
        ScopedSymbolTable {
            name: name.into(),
            level,
            enclosing,
            symbols: HashMap::new(),
            order: vec![],
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, symbol: Symbol<'a>) {
        let name = name.into();
        if self.symbols.insert(name.clone(), symbol).is_none() {
            self.order.push(name);
        }
    }

    /// Looks `name` up in this scope only.
    pub fn get_local(&self, name: &str) -> Option<&Symbol<'a>> {
        self.symbols.get(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Arena of every scope opened during analysis, linked through `enclosing`.
#[derive(Debug, Default)]
pub struct ScopeTree<'a> {
    scopes: Arena<ScopedSymbolTable<'a>>,
}

impl<'a> ScopeTree<'a> {
    pub fn new() -> Self {
        ScopeTree {
            scopes: Arena::new(),
        }
    }

    pub fn alloc(&mut self, scope: ScopedSymbolTable<'a>) -> ScopeId<'a> {
        self.scopes.alloc(scope)
    }

    pub fn get(&self, id: ScopeId<'a>) -> &ScopedSymbolTable<'a> {
        &self.scopes[id]
    }

    pub fn get_mut(&mut self, id: ScopeId<'a>) -> &mut ScopedSymbolTable<'a> {
        &mut self.scopes[id]
    }

    /// Walks the chain from `scope` outwards and returns the first match.
    pub fn lookup(&self, scope: ScopeId<'a>, name: &str) -> Option<&Symbol<'a>> {
        let mut current = Some(scope);

        while let Some(id) = current {
            let table = &self.scopes[id];
            if let Some(symbol) = table.get_local(name) {
                return Some(symbol);
            }
            current = table.enclosing;
        }

        None
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Renders one scope the way `--verbose` dumps it on exit.
    pub fn describe(&self, id: ScopeId<'a>, functions: &Arena<FuncSymbol<'a>>) -> String {
        let table = &self.scopes[id];
        let enclosing = table
            .enclosing
            .map(|parent| self.scopes[parent].name.clone())
            .unwrap_or_else(|| String::from("None"));

        let header = "SCOPE (SCOPED SYMBOL TABLE)";
        let contents = "Scope (Scoped symbol table) contents";

        let mut lines = vec![
            header.to_string(),
            "=".repeat(header.len()),
            format!("{:<15}: {}", "Scope name", table.name),
            format!("{:<15}: {}", "Scope level", table.level),
            format!("{:<15}: {}", "Enclosing scope", enclosing),
            contents.to_string(),
            "-".repeat(contents.len()),
        ];

        for name in &table.order {
            let Some(symbol) = table.symbols.get(name) else {
                continue;
            };
            let rendered = match symbol {
                Symbol::BuiltinType(builtin) => builtin.to_string(),
                Symbol::Var(var) => var.to_string(),
                Symbol::Func(func) => functions[*func].to_string(),
            };
            lines.push(format!("{:>7}: {}", name, rendered));
        }

        lines.join("\n")
    }
}

impl Display for BuiltinTypeSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<BuiltinTypeSymbol(name='{}')>", self.name)
    }
}

impl Display for VarSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<VarSymbol(name='{}', type='{}')>", self.name, self.var_type)
    }
}

impl Display for FuncSymbol<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|param| format!("{} {}", param.ident, param.var_type))
            .collect();
        let return_type = self.return_type.map(|ty| ty.as_str()).unwrap_or("");

        write!(
            f,
            "<FuncSymbol(name={}, parameters=[{}], return={})>",
            self.name,
            params.join(", "),
            return_type
        )
    }
}
