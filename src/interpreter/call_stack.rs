use std::{collections::HashMap, fmt::Display};

use super::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ARType {
    Program,
    Function,
}

impl Display for ARType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ARType::Program => write!(f, "PROGRAM"),
            ARType::Function => write!(f, "FUNCTION"),
        }
    }
}

/// Storage for one program or function activation.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationRecord {
    pub name: String,
    pub kind: ARType,
    pub nesting_level: u32,
    members: HashMap<String, Value>,
}

impl ActivationRecord {
    pub fn new(name: impl Into<String>, kind: ARType, nesting_level: u32) -> Self {
        ActivationRecord {
            name: name.into(),
            kind,
            nesting_level,
            members: HashMap::new(),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.members.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.members.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Display for ActivationRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}: {} {}", self.nesting_level, self.kind, self.name)?;

        let mut names: Vec<&String> = self.members.keys().collect();
        names.sort();
        for name in names {
            writeln!(f, "   {:<20}: {}", name, self.members[name])?;
        }

        Ok(())
    }
}

/// LIFO of activation records. The top record is the only one the running code sees.
#[derive(Debug, Default)]
pub struct CallStack {
    records: Vec<ActivationRecord>,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack { records: vec![] }
    }

    pub fn push(&mut self, record: ActivationRecord) {
        self.records.push(record);
    }

    pub fn pop(&mut self) -> Option<ActivationRecord> {
        self.records.pop()
    }

    pub fn peek(&self) -> Option<&ActivationRecord> {
        self.records.last()
    }

    pub fn peek_mut(&mut self) -> Option<&mut ActivationRecord> {
        self.records.last_mut()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of function records currently on the stack.
    pub fn function_depth(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.kind == ARType::Function)
            .count()
    }
}

impl Display for CallStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "CALL STACK")?;
        writeln!(f, "{}", "=".repeat(40))?;

        for record in self.records.iter().rev() {
            write!(f, "{}", record)?;
        }

        Ok(())
    }
}
