#[derive(Debug)]
/// Represents all errors that can occur during tokenization.
pub enum LexerError {
    /// A string literal was unterminated or contained an unrecognized
    /// escape sequence.
    MalformedString {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An integer literal does not fit a 32-bit signed integer.
    NumberOutOfRange {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A line was indented by something other than a multiple of two
    /// spaces.
    OddIndentation {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A token assertion failed.
    UnexpectedToken {
        /// What the caller required.
        expected: String,
        /// The token actually found.
        found: String,
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for LexerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedString { line } => {
                write!(f, "Error on line {line}: Malformed string literal.")
            }
            Self::NumberOutOfRange { line } => write!(
                f,
                "Error on line {line}: Integer literal does not fit a 32-bit integer."
            ),
            Self::OddIndentation { line } => write!(
                f,
                "Error on line {line}: Indentation is not a multiple of two spaces."
            ),
            Self::UnexpectedToken {
                expected,
                found,
                line,
            } => write!(
                f,
                "Error on line {line}: Expected {expected}, found {found}."
            ),
        }
    }
}

impl std::error::Error for LexerError {}
