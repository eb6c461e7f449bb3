use std::{io::Write, rc::Rc};

use crate::{
    ast::{BinaryOperator, Expr, Statement},
    error::RuntimeError,
    interpreter::value::core::{is_true, Closure, Object, ObjectHolder},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The control-flow outcome of executing a statement.
///
/// `return` does not unwind; it surfaces as `Flow::Return` and every
/// enclosing block passes it upward until a method-call boundary converts
/// it back into a plain value.
#[derive(Debug)]
pub enum Flow {
    /// Execution ran to completion.
    Normal,
    /// A `return` statement fired with this value.
    Return(ObjectHolder),
}

/// Stores the runtime evaluation context.
///
/// The context owns the output sink that `print` (and `__str__` rendering)
/// writes to. Scopes are not stored here: the global closure and each
/// method-call closure are passed explicitly through `exec` and `eval`.
pub struct Context<W: Write> {
    pub(in crate::interpreter::evaluator) output: W,
}

impl<W: Write> Context<W> {
    /// Creates a context writing program output to `output`.
    pub fn new(output: W) -> Self {
        Self { output }
    }

    /// Executes a whole program in a fresh global scope.
    ///
    /// # Errors
    /// Returns the first `RuntimeError` raised, including a `return` that
    /// reaches the program root.
    pub fn run(&mut self, program: &[Statement]) -> EvalResult<()> {
        let mut globals = Closure::new();
        for statement in program {
            if let Flow::Return(_) = self.exec(statement, &mut globals)? {
                return Err(RuntimeError::ReturnOutsideMethod {
                    line: statement.line_number(),
                });
            }
        }
        Ok(())
    }

    /// Executes a single statement in the given scope.
    ///
    /// # Errors
    /// Returns a `RuntimeError` if any evaluated expression fails or if the
    /// statement itself is invalid at runtime.
    pub fn exec(&mut self, statement: &Statement, closure: &mut Closure) -> EvalResult<Flow> {
        match statement {
            Statement::Assignment { name, value, .. } => {
                let value = self.eval(value, closure)?;
                closure.insert(name.clone(), value);
                Ok(Flow::Normal)
            }
            Statement::FieldAssignment {
                receiver,
                field,
                value,
                line,
            } => {
                let target = self.eval(receiver, closure)?;
                match target.try_as_instance() {
                    Some(instance) => {
                        let value = self.eval(value, closure)?;
                        instance.fields_mut().insert(field.clone(), value);
                        Ok(Flow::Normal)
                    }
                    None => Err(RuntimeError::NotAnInstance { line: *line }),
                }
            }
            Statement::Print { arguments, line } => {
                let mut rendered = String::new();
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        rendered.push(' ');
                    }
                    let value = self.eval(argument, closure)?;
                    self.render_value(&value, &mut rendered, *line)?;
                }
                rendered.push('\n');
                self.output
                    .write_all(rendered.as_bytes())
                    .map_err(|_| RuntimeError::OutputFailed { line: *line })?;
                Ok(Flow::Normal)
            }
            Statement::Expression { expr, .. } => {
                self.eval(expr, closure)?;
                Ok(Flow::Normal)
            }
            Statement::Compound { statements, .. } => {
                for statement in statements {
                    if let Flow::Return(value) = self.exec(statement, closure)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            }
            Statement::IfElse {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                let condition = self.eval(condition, closure)?;
                if is_true(&condition) {
                    self.exec(then_branch, closure)
                } else if let Some(else_branch) = else_branch {
                    self.exec(else_branch, closure)
                } else {
                    Ok(Flow::Normal)
                }
            }
            Statement::Return { expr, .. } => Ok(Flow::Return(self.eval(expr, closure)?)),
            Statement::ClassDefinition { class, .. } => {
                closure.insert(
                    class.name().to_owned(),
                    ObjectHolder::own(Object::Class(Rc::clone(class))),
                );
                Ok(Flow::Normal)
            }
        }
    }

    /// Evaluates an expression in the given scope.
    ///
    /// Operands are always evaluated left to right; `and` and `or`
    /// short-circuit on the left operand's truthiness and always produce a
    /// fresh boolean.
    ///
    /// # Errors
    /// Returns a `RuntimeError` describing the first failure.
    pub fn eval(&mut self, expr: &Expr, closure: &mut Closure) -> EvalResult<ObjectHolder> {
        match expr {
            Expr::Number { value, .. } => Ok(ObjectHolder::own(Object::Number(*value))),
            Expr::Str { value, .. } => Ok(ObjectHolder::own(Object::Str(value.clone()))),
            Expr::Bool { value, .. } => Ok(ObjectHolder::own(Object::Bool(*value))),
            Expr::None { .. } => Ok(ObjectHolder::none()),
            Expr::Variable { path, line } => eval_variable(path, closure, *line),
            Expr::BinaryOp {
                op: BinaryOperator::And,
                left,
                right,
                ..
            } => {
                let left = self.eval(left, closure)?;
                if !is_true(&left) {
                    return Ok(ObjectHolder::own(Object::Bool(false)));
                }
                let right = self.eval(right, closure)?;
                Ok(ObjectHolder::own(Object::Bool(is_true(&right))))
            }
            Expr::BinaryOp {
                op: BinaryOperator::Or,
                left,
                right,
                ..
            } => {
                let left = self.eval(left, closure)?;
                if is_true(&left) {
                    return Ok(ObjectHolder::own(Object::Bool(true)));
                }
                let right = self.eval(right, closure)?;
                Ok(ObjectHolder::own(Object::Bool(is_true(&right))))
            }
            Expr::BinaryOp {
                op,
                left,
                right,
                line,
            } => {
                let left = self.eval(left, closure)?;
                let right = self.eval(right, closure)?;
                self.eval_arithmetic(*op, &left, &right, *line)
            }
            Expr::Comparison {
                op,
                left,
                right,
                line,
            } => {
                let left = self.eval(left, closure)?;
                let right = self.eval(right, closure)?;
                self.eval_comparison(*op, &left, &right, *line)
            }
            Expr::Not { expr, .. } => {
                let value = self.eval(expr, closure)?;
                Ok(ObjectHolder::own(Object::Bool(!is_true(&value))))
            }
            Expr::Stringify { expr, line } => {
                let value = self.eval(expr, closure)?;
                let mut rendered = String::new();
                self.render_value(&value, &mut rendered, *line)?;
                Ok(ObjectHolder::own(Object::Str(rendered)))
            }
            Expr::NewInstance {
                class,
                arguments,
                line,
            } => self.instantiate(class, arguments, closure, *line),
            Expr::MethodCall {
                receiver,
                method,
                arguments,
                line,
            } => {
                let target = self.eval(receiver, closure)?;
                let mut values = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    values.push(self.eval(argument, closure)?);
                }
                self.call_method(&target, method, values, *line)
            }
        }
    }
}

/// Resolves a dotted name: the first segment in the scope, every further
/// segment in the fields of the instance reached so far.
fn eval_variable(path: &[String], closure: &Closure, line: usize) -> EvalResult<ObjectHolder> {
    let (first, rest) = match path.split_first() {
        Some(parts) => parts,
        None => unreachable!("the parser never produces an empty path"),
    };
    let mut value = match closure.get(first) {
        Some(value) => value.clone(),
        None => {
            return Err(RuntimeError::UnknownVariable {
                name: first.clone(),
                line,
            })
        }
    };
    for segment in rest {
        let next = match value.try_as_instance() {
            Some(instance) => instance.fields().get(segment).cloned(),
            None => return Err(RuntimeError::NotAnInstance { line }),
        };
        value = match next {
            Some(next) => next,
            None => {
                return Err(RuntimeError::UnknownField {
                    name: segment.clone(),
                    line,
                })
            }
        };
    }
    Ok(value)
}
