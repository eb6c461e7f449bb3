use std::io::Write;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::{Object, ObjectHolder},
    },
};

impl<W: Write> Context<W> {
    /// Evaluates an arithmetic operation between two values.
    ///
    /// Numbers use checked 32-bit arithmetic; division by zero and overflow
    /// are runtime errors. `+` additionally concatenates two strings, and
    /// an instance on the left-hand side delegates to its `__add__` method
    /// when one with a single parameter exists. Every other combination of
    /// operand types is a type error.
    ///
    /// # Errors
    /// Returns `DivisionByZero`, `Overflow` or `TypeError` as described
    /// above, or any error raised by an `__add__` body.
    pub fn eval_arithmetic(
        &mut self,
        op: BinaryOperator,
        left: &ObjectHolder,
        right: &ObjectHolder,
        line: usize,
    ) -> EvalResult<ObjectHolder> {
        use BinaryOperator::{Add, Div, Mul, Sub};

        if let (Some(lhs), Some(rhs)) = (left.try_as_number(), right.try_as_number()) {
            let result = match op {
                Add => lhs.checked_add(rhs),
                Sub => lhs.checked_sub(rhs),
                Mul => lhs.checked_mul(rhs),
                Div => {
                    if rhs == 0 {
                        return Err(RuntimeError::DivisionByZero { line });
                    }
                    lhs.checked_div(rhs)
                }
                _ => unreachable!("logical operators never reach arithmetic evaluation"),
            };
            return result
                .map(|value| ObjectHolder::own(Object::Number(value)))
                .ok_or(RuntimeError::Overflow { line });
        }

        if op == Add {
            if let (Some(lhs), Some(rhs)) = (left.try_as_str(), right.try_as_str()) {
                return Ok(ObjectHolder::own(Object::Str(format!("{lhs}{rhs}"))));
            }
            if let Some(instance) = left.try_as_instance() {
                if instance.has_method("__add__", 1) {
                    return self.call_method(left, "__add__", vec![right.clone()], line);
                }
            }
        }

        Err(RuntimeError::TypeError {
            details: format!("unsupported operand types for '{op}'"),
            line,
        })
    }
}
