use std::error;
use std::fmt;
use std::result;

/// A type alias for `Result<T, csv_dialect::Error>`.
pub type Result<T> = result::Result<T, Error>;

/// An error that can occur when reading or writing CSV data.
///
/// Every error aborts the row or field operation that triggered it; there is
/// no partial-result-plus-error mode. Reader errors carry the 1-based number
/// of the physical input line being consumed when they occurred.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// A NUL byte was encountered while scanning a line.
    NullByte {
        /// The line on which the NUL byte was found.
        line: u64,
    },
    /// In strict mode, an unexpected character followed a closing quote.
    MalformedQuote {
        /// The configured field delimiter.
        delimiter: char,
        /// The configured quote character.
        quote: char,
        /// The line on which the stray character was found.
        line: u64,
    },
    /// In strict mode, the input was exhausted in the middle of a field or
    /// of a quoted field.
    UnexpectedEndOfData {
        /// The number of the last line consumed.
        line: u64,
    },
    /// Under `NonNumeric` quoting, an unquoted field did not parse as a
    /// number.
    NumberConversion {
        /// The offending field text.
        text: String,
        /// The line on which the field ended.
        line: u64,
    },
    /// The writer needed to escape a character, but no escape character is
    /// configured.
    EscapeRequired,
    /// A record consisting of a single empty field must be quoted to stay
    /// distinguishable from a blank line, which `Quoting::None` forbids.
    SingleEmptyFieldMustQuote,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::NullByte { line } => {
                write!(f, "line contains NUL, at line {}", line)
            }
            Error::MalformedQuote { delimiter, quote, line } => {
                write!(
                    f,
                    "'{}' expected after '{}', at line {}",
                    delimiter, quote, line
                )
            }
            Error::UnexpectedEndOfData { line } => {
                write!(f, "unexpected end of data, at line {}", line)
            }
            Error::NumberConversion { ref text, line } => {
                write!(
                    f,
                    "could not convert string to number: {}, at line {}",
                    text, line
                )
            }
            Error::EscapeRequired => {
                write!(f, "need to escape, but no escape character is set")
            }
            Error::SingleEmptyFieldMustQuote => {
                write!(f, "single empty field record must be quoted")
            }
        }
    }
}

impl error::Error for Error {}

impl Error {
    /// The 1-based input line the error occurred on, if the error came from
    /// the reader.
    pub fn line(&self) -> Option<u64> {
        match *self {
            Error::NullByte { line }
            | Error::MalformedQuote { line, .. }
            | Error::UnexpectedEndOfData { line }
            | Error::NumberConversion { line, .. } => Some(line),
            Error::EscapeRequired | Error::SingleEmptyFieldMustQuote => None,
        }
    }
}
