#[derive(Debug)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// Tried to use an undefined variable.
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Read a field that the instance does not have.
    UnknownField {
        /// The name of the field.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a method that does not resolve along the class chain.
    UnknownMethod {
        /// The name of the method.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a method with the wrong number of arguments.
    ArgumentCountMismatch {
        /// The name of the method.
        method: String,
        /// How many parameters the method declares.
        expected: usize,
        /// How many arguments the call supplied.
        found: usize,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A class instance was required, but the value is something else.
    NotAnInstance {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A comparison method returned something other than a boolean.
    ExpectedBoolean {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Operand types do not support the attempted operation.
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted division by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Arithmetic operation overflowed.
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `return` executed outside of any method body.
    ReturnOutsideMethod {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Writing to the program's output stream failed.
    OutputFailed {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name, line } => {
                write!(f, "Error on line {line}: Unknown variable '{name}'.")
            }
            Self::UnknownField { name, line } => {
                write!(f, "Error on line {line}: Unknown field '{name}'.")
            }
            Self::UnknownMethod { name, line } => {
                write!(f, "Error on line {line}: Unknown method '{name}'.")
            }
            Self::ArgumentCountMismatch {
                method,
                expected,
                found,
                line,
            } => write!(
                f,
                "Error on line {line}: Method '{method}' takes {expected} arguments, found {found}."
            ),
            Self::NotAnInstance { line } => {
                write!(f, "Error on line {line}: Value is not a class instance.")
            }
            Self::ExpectedBoolean { line } => write!(
                f,
                "Error on line {line}: Comparison method did not return a boolean."
            ),
            Self::TypeError { details, line } => {
                write!(f, "Error on line {line}: Type error: {details}.")
            }
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),
            Self::Overflow { line } => write!(
                f,
                "Error on line {line}: Integer overflow while trying to compute result."
            ),
            Self::ReturnOutsideMethod { line } => {
                write!(f, "Error on line {line}: 'return' outside of a method.")
            }
            Self::OutputFailed { line } => write!(
                f,
                "Error on line {line}: Failed to write to the output stream."
            ),
        }
    }
}

impl std::error::Error for RuntimeError {}
