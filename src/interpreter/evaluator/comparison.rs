use std::io::Write;

use crate::{
    ast::Comparator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::{Object, ObjectHolder},
    },
};

impl<W: Write> Context<W> {
    /// Evaluates a comparison and wraps the result as a fresh boolean.
    ///
    /// `==` and `<` are the primitives; the remaining four comparators
    /// derive from them, so a class instance only ever needs `__eq__` and
    /// `__lt__` to participate in all six. Derived comparators may invoke
    /// both primitives, and therefore both methods, on the same operands.
    ///
    /// # Errors
    /// Propagates any error from the primitives, including errors raised
    /// inside comparison methods.
    pub fn eval_comparison(
        &mut self,
        op: Comparator,
        left: &ObjectHolder,
        right: &ObjectHolder,
        line: usize,
    ) -> EvalResult<ObjectHolder> {
        let result = match op {
            Comparator::Equal => self.equal(left, right, line)?,
            Comparator::NotEqual => !self.equal(left, right, line)?,
            Comparator::Less => self.less(left, right, line)?,
            Comparator::Greater => {
                !self.less(left, right, line)? && !self.equal(left, right, line)?
            }
            Comparator::LessOrEqual => {
                self.less(left, right, line)? || self.equal(left, right, line)?
            }
            Comparator::GreaterOrEqual => !self.less(left, right, line)?,
        };
        Ok(ObjectHolder::own(Object::Bool(result)))
    }

    /// Structural equality over the value domain.
    ///
    /// Two `None` holders are equal. Numbers, strings and booleans compare
    /// by value. An instance on the left-hand side dispatches to its
    /// `__eq__` method. Everything else is a type error.
    ///
    /// # Errors
    /// Returns `TypeError` for incomparable operands, `UnknownMethod` when
    /// an instance has no matching `__eq__`, and `ExpectedBoolean` when the
    /// method returns a non-boolean.
    pub fn equal(
        &mut self,
        left: &ObjectHolder,
        right: &ObjectHolder,
        line: usize,
    ) -> EvalResult<bool> {
        if left.is_none() && right.is_none() {
            return Ok(true);
        }
        match (left.get(), right.get()) {
            (Some(Object::Number(lhs)), Some(Object::Number(rhs))) => Ok(lhs == rhs),
            (Some(Object::Str(lhs)), Some(Object::Str(rhs))) => Ok(lhs == rhs),
            (Some(Object::Bool(lhs)), Some(Object::Bool(rhs))) => Ok(lhs == rhs),
            (Some(Object::Instance(_)), _) => self.dunder_compare(left, "__eq__", right, line),
            _ => Err(RuntimeError::TypeError {
                details: "operands cannot be compared for equality".to_owned(),
                line,
            }),
        }
    }

    /// Strict ordering over the value domain.
    ///
    /// Numbers and booleans compare by value, strings lexicographically.
    /// An instance on the left-hand side dispatches to its `__lt__` method.
    /// A `None` holder on either side is a type error; `None` supports
    /// equality but not ordering.
    ///
    /// # Errors
    /// Returns `TypeError` for unordered operands, `UnknownMethod` when an
    /// instance has no matching `__lt__`, and `ExpectedBoolean` when the
    /// method returns a non-boolean.
    pub fn less(
        &mut self,
        left: &ObjectHolder,
        right: &ObjectHolder,
        line: usize,
    ) -> EvalResult<bool> {
        match (left.get(), right.get()) {
            (Some(Object::Number(lhs)), Some(Object::Number(rhs))) => Ok(lhs < rhs),
            (Some(Object::Str(lhs)), Some(Object::Str(rhs))) => Ok(lhs < rhs),
            (Some(Object::Bool(lhs)), Some(Object::Bool(rhs))) => Ok(lhs < rhs),
            (Some(Object::Instance(_)), _) => self.dunder_compare(left, "__lt__", right, line),
            _ => Err(RuntimeError::TypeError {
                details: "operands cannot be ordered".to_owned(),
                line,
            }),
        }
    }

    fn dunder_compare(
        &mut self,
        receiver: &ObjectHolder,
        method: &str,
        argument: &ObjectHolder,
        line: usize,
    ) -> EvalResult<bool> {
        let result = self.call_method(receiver, method, vec![argument.clone()], line)?;
        result
            .try_as_bool()
            .ok_or(RuntimeError::ExpectedBoolean { line })
    }
}
