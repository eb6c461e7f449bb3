use std::{
    cell::{Ref, RefCell, RefMut},
    collections::HashMap,
    rc::Rc,
};

use crate::ast::Statement;

/// A mapping from names to values.
///
/// Closures serve two purposes: they are the lexical scopes in which
/// statements execute (the global scope, and one fresh closure per method
/// call), and they are the field tables of class instances. Assignments
/// mutate a closure in place.
pub type Closure = HashMap<String, ObjectHolder>;

/// A shareable handle to a runtime value.
///
/// Holders are reference counted: cloning a holder shares the underlying
/// object rather than copying it, which is what gives instances their
/// sharing semantics (`y = x` makes `y.field = ...` visible through `x`).
/// A holder may also hold nothing at all; that is the `None` value of the
/// language. Reference cycles built through instance fields are never
/// collected.
#[derive(Debug, Clone, Default)]
pub struct ObjectHolder(Option<Rc<Object>>);

impl ObjectHolder {
    /// Wraps a freshly built object into a new allocation.
    #[must_use]
    pub fn own(object: Object) -> Self {
        Self(Some(Rc::new(object)))
    }

    /// The null-valued holder, printed as `None` and falsy.
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }

    /// Borrows the held object, or `None` for the null holder.
    #[must_use]
    pub fn get(&self) -> Option<&Object> {
        self.0.as_deref()
    }

    /// Returns `true` if the holder holds no object.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    /// Returns the held number, if the holder holds one.
    #[must_use]
    pub fn try_as_number(&self) -> Option<i32> {
        match self.get() {
            Some(Object::Number(value)) => Some(*value),
            _ => None,
        }
    }

    /// Returns the held boolean, if the holder holds one.
    #[must_use]
    pub fn try_as_bool(&self) -> Option<bool> {
        match self.get() {
            Some(Object::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    /// Returns the held string, if the holder holds one.
    #[must_use]
    pub fn try_as_str(&self) -> Option<&str> {
        match self.get() {
            Some(Object::Str(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the held class instance, if the holder holds one.
    #[must_use]
    pub fn try_as_instance(&self) -> Option<&Instance> {
        match self.get() {
            Some(Object::Instance(instance)) => Some(instance),
            _ => None,
        }
    }
}

/// A runtime value.
///
/// This enum models every type a program can manipulate: numbers, booleans,
/// strings, class objects and class instances.
#[derive(Debug)]
pub enum Object {
    /// A 32-bit signed integer.
    Number(i32),
    /// A boolean, printed as `True` or `False`.
    Bool(bool),
    /// An immutable string.
    Str(String),
    /// A class object, installed into scope by its defining statement.
    Class(Rc<Class>),
    /// An instance of a class.
    Instance(Instance),
}

/// A method record: its name, its formal parameters in declaration order,
/// and a shared handle to its body.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    /// The method name.
    pub name: String,
    /// Formal parameter names, bound positionally at call time.
    pub formal_params: Vec<String>,
    /// The statements executed when the method is called.
    pub body: Rc<Statement>,
}

/// Class metadata: a name, an optional parent and a method table.
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    name: String,
    parent: Option<Rc<Class>>,
    methods: HashMap<String, Method>,
}

impl Class {
    /// Builds a class from its parsed methods. Method names are unique
    /// within one class; the parser enforces that before calling this.
    #[must_use]
    pub fn new(name: String, methods: Vec<Method>, parent: Option<Rc<Self>>) -> Self {
        let methods = methods
            .into_iter()
            .map(|method| (method.name.clone(), method))
            .collect();
        Self {
            name,
            parent,
            methods,
        }
    }

    /// The class name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolves a method by name, walking the parent chain on a miss.
    ///
    /// A method defined on the class itself shadows any same-named method
    /// further up the chain.
    #[must_use]
    pub fn get_method(&self, name: &str) -> Option<&Method> {
        self.methods
            .get(name)
            .or_else(|| self.parent.as_ref().and_then(|parent| parent.get_method(name)))
    }
}

/// An instance of a class: a handle to the class plus a field table.
///
/// The field table sits behind a `RefCell` so that field assignment can
/// mutate an instance reached through any of its shared holders.
#[derive(Debug)]
pub struct Instance {
    class: Rc<Class>,
    fields: RefCell<Closure>,
}

impl Instance {
    /// Creates an instance with an empty field table.
    #[must_use]
    pub fn new(class: Rc<Class>) -> Self {
        Self {
            class,
            fields: RefCell::new(Closure::new()),
        }
    }

    /// The class this instance was built from.
    #[must_use]
    pub fn class(&self) -> &Class {
        &self.class
    }

    /// Borrows the field table for reading.
    #[must_use]
    pub fn fields(&self) -> Ref<'_, Closure> {
        self.fields.borrow()
    }

    /// Borrows the field table for writing.
    #[must_use]
    pub fn fields_mut(&self) -> RefMut<'_, Closure> {
        self.fields.borrow_mut()
    }

    /// Returns `true` iff a method with this name resolves along the class
    /// chain and takes exactly `argument_count` parameters.
    #[must_use]
    pub fn has_method(&self, name: &str, argument_count: usize) -> bool {
        self.class
            .get_method(name)
            .is_some_and(|method| method.formal_params.len() == argument_count)
    }
}

/// The truthiness rule: a non-zero number, a non-empty string and `True`
/// are truthy; everything else, including `None` and every class instance,
/// is falsy.
///
/// # Examples
/// ```
/// use snakelet::interpreter::value::core::{is_true, Object, ObjectHolder};
///
/// assert!(is_true(&ObjectHolder::own(Object::Number(3))));
/// assert!(is_true(&ObjectHolder::own(Object::Str("x".to_string()))));
/// assert!(!is_true(&ObjectHolder::own(Object::Number(0))));
/// assert!(!is_true(&ObjectHolder::none()));
/// ```
#[must_use]
pub fn is_true(value: &ObjectHolder) -> bool {
    match value.get() {
        Some(Object::Number(value)) => *value != 0,
        Some(Object::Bool(value)) => *value,
        Some(Object::Str(value)) => !value.is_empty(),
        _ => false,
    }
}
