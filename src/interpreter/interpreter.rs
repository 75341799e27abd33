use std::io::Write;

use crate::{
    ast::{
        ast::Program,
        expressions::{ConditionOp, Expr, FuncCall, UnaryOperator},
        statements::{StatesList, Stmt},
    },
    config::Config,
    errors::errors::{Error, ErrorImpl},
    semantic_analyzer::{semantic_analyzer::SemanticModel, symbols::FuncSymbol},
    Position,
};

use super::{
    call_stack::{ARType, ActivationRecord, CallStack},
    value::Value,
};

/// Host stack that must remain before an interpreted call runs in place.
const STACK_RED_ZONE: usize = 256 * 1024;

/// Size of each extra host stack segment allocated for deep recursion.
const STACK_SEGMENT_SIZE: usize = 4 * 1024 * 1024;

/// Tree-walking evaluator. Runs `main` against the analyzed program and
/// writes its result, if any, to `output`.
pub struct Interpreter<'a, 'm, W: Write> {
    program: &'a Program,
    model: &'m SemanticModel<'a>,
    call_stack: CallStack,
    output: W,
    max_call_depth: usize,
}

impl<'a, 'm, W: Write> Interpreter<'a, 'm, W> {
    pub fn new(program: &'a Program, model: &'m SemanticModel<'a>, config: &Config, output: W) -> Self {
        Interpreter {
            program,
            model,
            call_stack: CallStack::new(),
            output,
            max_call_depth: config.max_call_depth,
        }
    }

    pub fn interpret(&mut self) -> Result<Option<Value>, Error> {
        let result = self.run();

        if let Err(error) = &result {
            tracing::debug!(%error, "interpreter aborted\n{}", self.call_stack);
        }

        result
    }

    fn run(&mut self) -> Result<Option<Value>, Error> {
        let program = self.program;
        let model = self.model;

        let mut record = ActivationRecord::new(program.package.as_str(), ARType::Program, 1);
        for var in &program.block.var_decls {
            record.set(var.ident.as_str(), Value::zero(var.var_type));
        }
        self.call_stack.push(record);

        let Some(main) = model.global_function("main") else {
            return Err(Error::new(ErrorImpl::FunctionNotFound { function: String::from("main") }, None));
        };

        let value = self.call_function(main, &[], None)?;

        if let Some(value) = value {
            writeln!(self.output, "{}", value)
                .and_then(|_| self.output.flush())
                .map_err(|error| Error::new(ErrorImpl::OutputFailure { reason: error.to_string() }, None))?;
        }

        self.call_stack.pop();

        Ok(value)
    }

    /// Runs `function` in a fresh record. Arguments are evaluated in the
    /// caller's record and bound to parameters pairwise; extras are dropped
    /// and unmatched parameters stay unbound.
    fn call_function(&mut self, function: &'m FuncSymbol<'a>, args: &'a [Expr], position: Option<&Position>) -> Result<Option<Value>, Error> {
        if self.call_stack.function_depth() >= self.max_call_depth {
            return Err(Error::new(ErrorImpl::CallDepthExceeded { limit: self.max_call_depth }, position.cloned()));
        }

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_value(arg)?);
        }

        let nesting_level = self.call_stack.len() as u32 + 1;
        let mut record = ActivationRecord::new(function.name.as_str(), ARType::Function, nesting_level);
        for (param, value) in function.params.iter().zip(values) {
            record.set(param.ident.as_str(), value);
        }

        tracing::trace!(function = %function.name, nesting_level, "enter");
        self.call_stack.push(record);

        let result = match function.body {
            Some(body) => self.execute_states_list(body)?,
            None => None,
        };

        self.call_stack.pop();
        tracing::trace!(function = %function.name, "leave");

        Ok(result)
    }

    fn eval_call(&mut self, call: &'a FuncCall) -> Result<Option<Value>, Error> {
        let model = self.model;

        let Some(function) = model.resolve_call(call) else {
            return Err(Error::at(ErrorImpl::FunctionNotFound { function: call.name.clone() }, call.span.start.clone()));
        };

        // Recursion depth is bounded by max_call_depth, not by the host stack
        stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || {
            self.call_function(function, &call.args, Some(&call.span.start))
        })
    }

    /// Executes statements in order and stops at the first one producing a value.
    fn execute_states_list(&mut self, list: &'a StatesList) -> Result<Option<Value>, Error> {
        for stmt in &list.statements {
            if let Some(value) = self.execute_stmt(stmt)? {
                return Ok(Some(value));
            }
        }

        Ok(None)
    }

    fn execute_stmt(&mut self, stmt: &'a Stmt) -> Result<Option<Value>, Error> {
        match stmt {
            Stmt::VarDecl(var) => {
                self.assign(var.ident.as_str(), Value::zero(var.var_type));
                Ok(None)
            }
            Stmt::FuncBlock(_) | Stmt::Label(_) | Stmt::Goto(_) => Ok(None),
            Stmt::If(if_stmt) => {
                if self.eval_condition(&if_stmt.condition)? {
                    return self.execute_states_list(&if_stmt.body);
                }
                Ok(None)
            }
            Stmt::For(for_stmt) => {
                while self.eval_condition(&for_stmt.condition)? {
                    if let Some(value) = self.execute_states_list(&for_stmt.body)? {
                        return Ok(Some(value));
                    }
                }
                Ok(None)
            }
            Stmt::Return(ret) => Ok(Some(self.eval_value(&ret.value)?)),
            Stmt::Assign(assign) => {
                let value = self.eval_value(&assign.value)?;
                self.assign(assign.ident.as_str(), value);
                Ok(None)
            }
            // A value returned here ends the enclosing list, like a return would
            Stmt::Call(call) => self.eval_call(call),
        }
    }

    fn assign(&mut self, name: &str, value: Value) {
        if let Some(record) = self.call_stack.peek_mut() {
            record.set(name, value);
        }
    }

    fn eval_condition(&mut self, condition: &'a ConditionOp) -> Result<bool, Error> {
        let left = self.eval_value(&condition.left)?;
        let right = self.eval_value(&condition.right)?;

        Ok(left.compare(condition.op, right))
    }

    fn eval_value(&mut self, expr: &'a Expr) -> Result<Value, Error> {
        match expr {
            Expr::Num(num) => Ok(Value::from(num.value)),
            Expr::Ident(ident) => {
                let record = self.call_stack.peek();
                match record.and_then(|record| record.get(&ident.name)) {
                    Some(value) => Ok(value),
                    None => Err(Error::at(
                        ErrorImpl::VariableNotInFrame {
                            variable: ident.name.clone(),
                            record: record.map(|record| record.name.clone()).unwrap_or_default(),
                        },
                        ident.span.start.clone(),
                    )),
                }
            }
            Expr::Call(call) => match self.eval_call(call)? {
                Some(value) => Ok(value),
                None => Err(Error::at(ErrorImpl::MissingReturnValue { function: call.name.clone() }, call.span.start.clone())),
            },
            Expr::Unary(unary) => {
                let operand = self.eval_value(&unary.operand)?;
                match unary.op {
                    UnaryOperator::Plus => Ok(operand),
                    UnaryOperator::Minus => Ok(operand.negate()),
                }
            }
            Expr::Binary(binary) => {
                let left = self.eval_value(&binary.left)?;
                let right = self.eval_value(&binary.right)?;

                left.binary(binary.op, right)
                    .map_err(|error| Error::at(error, binary.right.start().clone()))
            }
        }
    }
}
