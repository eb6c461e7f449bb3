use std::{io::Write, rc::Rc};

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, Flow},
        value::core::{Class, Closure, Instance, Object, ObjectHolder},
    },
};

impl<W: Write> Context<W> {
    /// Invokes a method on a class instance.
    ///
    /// The method is resolved along the receiver's class chain and must
    /// take exactly as many parameters as there are arguments. The body
    /// runs in a fresh closure binding `self` to a share of the receiver
    /// and each parameter to its argument. This is the boundary where a
    /// `Return` flow is converted back into a value; a body that finishes
    /// without returning yields a `None` holder.
    ///
    /// # Errors
    /// Returns `NotAnInstance` for a receiver that is not an instance
    /// (including `None`), `UnknownMethod` when resolution fails,
    /// `ArgumentCountMismatch` on a wrong arity, and any error the body
    /// raises.
    pub fn call_method(
        &mut self,
        receiver: &ObjectHolder,
        method: &str,
        arguments: Vec<ObjectHolder>,
        line: usize,
    ) -> EvalResult<ObjectHolder> {
        let resolved = match receiver.try_as_instance() {
            Some(instance) => instance.class().get_method(method).cloned(),
            None => return Err(RuntimeError::NotAnInstance { line }),
        };
        let resolved = match resolved {
            Some(resolved) => resolved,
            None => {
                return Err(RuntimeError::UnknownMethod {
                    name: method.to_owned(),
                    line,
                })
            }
        };
        if resolved.formal_params.len() != arguments.len() {
            return Err(RuntimeError::ArgumentCountMismatch {
                method: method.to_owned(),
                expected: resolved.formal_params.len(),
                found: arguments.len(),
                line,
            });
        }

        let mut method_closure = Closure::new();
        method_closure.insert("self".to_owned(), receiver.clone());
        for (param, argument) in resolved.formal_params.iter().zip(arguments) {
            method_closure.insert(param.clone(), argument);
        }

        match self.exec(&resolved.body, &mut method_closure)? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(ObjectHolder::none()),
        }
    }

    /// Allocates a new instance of `class`.
    ///
    /// When the class chain resolves an `__init__` whose arity matches the
    /// argument count, the arguments are evaluated left to right and the
    /// initializer runs on the new instance; otherwise the arguments are
    /// left unevaluated. The instance holder is returned either way.
    ///
    /// # Errors
    /// Propagates errors from argument evaluation and from the `__init__`
    /// body.
    pub fn instantiate(
        &mut self,
        class: &Rc<Class>,
        arguments: &[Expr],
        closure: &mut Closure,
        line: usize,
    ) -> EvalResult<ObjectHolder> {
        let instance = ObjectHolder::own(Object::Instance(Instance::new(Rc::clone(class))));
        let initializer = class
            .get_method("__init__")
            .is_some_and(|method| method.formal_params.len() == arguments.len());
        if initializer {
            let mut values = Vec::with_capacity(arguments.len());
            for argument in arguments {
                values.push(self.eval(argument, closure)?);
            }
            self.call_method(&instance, "__init__", values, line)?;
        }
        Ok(instance)
    }

    /// Appends the printed form of a value to `buffer`.
    ///
    /// Numbers print in decimal, booleans as `True`/`False`, strings as
    /// their raw bytes, the null holder as `None` and classes as
    /// `Class <name>`. An instance renders through its zero-parameter
    /// `__str__` when it has one and as `<name> instance` otherwise.
    ///
    /// # Errors
    /// Propagates errors raised inside a `__str__` body.
    pub fn render_value(
        &mut self,
        value: &ObjectHolder,
        buffer: &mut String,
        line: usize,
    ) -> EvalResult<()> {
        match value.get() {
            None => buffer.push_str("None"),
            Some(Object::Number(number)) => buffer.push_str(&number.to_string()),
            Some(Object::Bool(true)) => buffer.push_str("True"),
            Some(Object::Bool(false)) => buffer.push_str("False"),
            Some(Object::Str(text)) => buffer.push_str(text),
            Some(Object::Class(class)) => {
                buffer.push_str("Class ");
                buffer.push_str(class.name());
            }
            Some(Object::Instance(instance)) => {
                if instance.has_method("__str__", 0) {
                    let rendered = self.call_method(value, "__str__", Vec::new(), line)?;
                    self.render_value(&rendered, buffer, line)?;
                } else {
                    buffer.push_str(instance.class().name());
                    buffer.push_str(" instance");
                }
            }
        }
        Ok(())
    }
}
