use crate::error::LexerError;

#[derive(Debug)]
/// Represents all errors that can occur while parsing the token stream.
pub enum ParseError {
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Referenced a class that has not been declared.
    UnknownClass {
        /// The name of the class.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Declared a class under a name that is already taken.
    ClassAlreadyDefined {
        /// The name of the class.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Declared two methods with the same name in one class.
    MethodAlreadyDefined {
        /// The name of the method.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Used `def` anywhere other than directly inside a class body.
    MethodOutsideClass {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A method did not declare `self` as its first parameter.
    MethodWithoutSelf {
        /// The name of the method.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a bare name that is neither a declared class nor `str`.
    UnknownCallable {
        /// The name that was called.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The left-hand side of `=` is not assignable.
    InvalidAssignmentTarget {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `str(...)` takes exactly one argument.
    StringifyArity {
        /// The number of arguments actually supplied.
        found: usize,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A token-level failure surfaced through the lexer's assertions.
    Lexer(LexerError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected token: {token}.")
            }
            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: Unexpected end of input.")
            }
            Self::UnknownClass { name, line } => {
                write!(f, "Error on line {line}: Unknown class '{name}'.")
            }
            Self::ClassAlreadyDefined { name, line } => {
                write!(f, "Error on line {line}: Class '{name}' is already defined.")
            }
            Self::MethodAlreadyDefined { name, line } => write!(
                f,
                "Error on line {line}: Method '{name}' is already defined in this class."
            ),
            Self::MethodOutsideClass { line } => write!(
                f,
                "Error on line {line}: Method definitions are only allowed inside a class."
            ),
            Self::MethodWithoutSelf { name, line } => write!(
                f,
                "Error on line {line}: Method '{name}' must take 'self' as its first parameter."
            ),
            Self::UnknownCallable { name, line } => write!(
                f,
                "Error on line {line}: '{name}' is not a class and cannot be called."
            ),
            Self::InvalidAssignmentTarget { line } => write!(
                f,
                "Error on line {line}: Only variables and fields can be assigned to."
            ),
            Self::StringifyArity { found, line } => write!(
                f,
                "Error on line {line}: str() takes exactly one argument, found {found}."
            ),
            Self::Lexer(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<LexerError> for ParseError {
    fn from(error: LexerError) -> Self {
        Self::Lexer(error)
    }
}
