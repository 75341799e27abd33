use std::fmt::Display;

use crate::{
    ast::{
        expressions::{BinOperator, CmpOp},
        types::{Literal, TypeName},
    },
    errors::errors::ErrorImpl,
};

/// A runtime number. Comparisons produce plain `bool`s and never become values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
}

impl Value {
    /// The value a freshly declared variable of `type_name` holds.
    pub fn zero(type_name: TypeName) -> Value {
        match type_name {
            TypeName::Int => Value::Int(0),
            TypeName::Float => Value::Float(0.0),
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Value::Int(value) => value as f64,
            Value::Float(value) => value,
        }
    }

    pub fn negate(self) -> Value {
        match self {
            Value::Int(value) => Value::Int(value.wrapping_neg()),
            Value::Float(value) => Value::Float(-value),
        }
    }

    /// Applies an arithmetic operator. Two ints stay int (wrapping, truncating
    /// division); anything involving a float is computed in floating point.
    pub fn binary(self, op: BinOperator, rhs: Value) -> Result<Value, ErrorImpl> {
        match (self, rhs) {
            (Value::Int(left), Value::Int(right)) => match op {
                BinOperator::Add => Ok(Value::Int(left.wrapping_add(right))),
                BinOperator::Sub => Ok(Value::Int(left.wrapping_sub(right))),
                BinOperator::Mul => Ok(Value::Int(left.wrapping_mul(right))),
                BinOperator::Div => {
                    if right == 0 {
                        return Err(ErrorImpl::DivisionByZero);
                    }
                    Ok(Value::Int(left.wrapping_div(right)))
                }
            },
            (left, right) => {
                let (left, right) = (left.as_f64(), right.as_f64());
                match op {
                    BinOperator::Add => Ok(Value::Float(left + right)),
                    BinOperator::Sub => Ok(Value::Float(left - right)),
                    BinOperator::Mul => Ok(Value::Float(left * right)),
                    BinOperator::Div => {
                        if right == 0.0 {
                            return Err(ErrorImpl::DivisionByZero);
                        }
                        Ok(Value::Float(left / right))
                    }
                }
            }
        }
    }

    pub fn compare(self, op: CmpOp, rhs: Value) -> bool {
        match (self, rhs) {
            (Value::Int(left), Value::Int(right)) => match op {
                CmpOp::Eq => left == right,
                CmpOp::NotEq => left != right,
                CmpOp::Lt => left < right,
                CmpOp::LtEq => left <= right,
                CmpOp::Gt => left > right,
                CmpOp::GtEq => left >= right,
            },
            (left, right) => {
                let (left, right) = (left.as_f64(), right.as_f64());
                match op {
                    CmpOp::Eq => left == right,
                    CmpOp::NotEq => left != right,
                    CmpOp::Lt => left < right,
                    CmpOp::LtEq => left <= right,
                    CmpOp::Gt => left > right,
                    CmpOp::GtEq => left >= right,
                }
            }
        }
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Int(value) => Value::Int(value),
            Literal::Float(value) => Value::Float(value),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{}", value),
            // Debug keeps the decimal point on whole floats
            Value::Float(value) => write!(f, "{:?}", value),
        }
    }
}
