use std::mem;
use std::vec;

use crate::dialect::{Dialect, Quoting};
use crate::error::{Error, Result};
use crate::field::{Field, Row};
use crate::lookahead::Lookahead;

use self::ParseState::*;

/// A CSV reader.
///
/// The reader parses in-memory text into rows of [`Field`] values, one row
/// per pull, driven by a [`Dialect`]. A quoted field may embed raw newlines,
/// so a single row can consume several physical lines; the number of lines
/// consumed so far is observable via [`Reader::line`].
///
/// The reader is exhausted after one full pass; re-reading requires
/// constructing a new reader over the source text.
///
/// ### Example
///
/// ```rust
/// use csv_dialect::Reader;
///
/// let mut rdr = Reader::from_string("a,b\n1,\"x,y\"\n");
/// let rows = rdr.rows().collect::<csv_dialect::Result<Vec<_>>>().unwrap();
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[1][1], "x,y");
/// ```
#[derive(Clone, Debug)]
pub struct Reader {
    dialect: Dialect,
    lines: Lookahead<vec::IntoIter<String>>,
    line: u64,
}

impl Reader {
    /// Creates a reader over the given text using the
    /// [`Dialect::excel`] preset.
    pub fn from_string<S: AsRef<str>>(source: S) -> Reader {
        Reader::with_dialect(source, Dialect::excel())
    }

    /// Creates a reader over the given text using the dialect given.
    pub fn with_dialect<S: AsRef<str>>(source: S, dialect: Dialect) -> Reader {
        Reader {
            dialect: dialect,
            lines: Lookahead::new(split_lines(source.as_ref()).into_iter()),
            line: 0,
        }
    }

    /// The dialect this reader parses with.
    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// The number of physical input lines consumed so far.
    ///
    /// Incremented once per line, not per row: a quoted field spanning
    /// lines advances this by more than one for a single row. Monotonic and
    /// never reset.
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Reads the next row, or returns `None` once the input is exhausted.
    ///
    /// A blank input line yields an empty row.
    pub fn read_row(&mut self) -> Result<Option<Row>> {
        if !self.lines.has_next() {
            return Ok(None);
        }
        let mut row = RowParse::new();
        loop {
            let line = match self.lines.next() {
                Some(line) => line,
                // Input ran out mid-row: a quoted field was left open at
                // the true end of the data.
                None => {
                    if self.dialect.strict {
                        return Err(Error::UnexpectedEndOfData {
                            line: self.line,
                        });
                    }
                    row.save_field(self.line)?;
                    return Ok(Some(row.fields));
                }
            };
            self.line += 1;
            if line.contains('\0') {
                return Err(Error::NullByte { line: self.line });
            }
            let mut chars = Lookahead::new(line.chars());
            while let Some(c) = chars.next() {
                let end_of_data =
                    !chars.has_next() && !self.lines.has_next();
                row.step(&self.dialect, c, end_of_data, self.line)?;
            }
            if let StartRecord = row.state {
                return Ok(Some(row.fields));
            }
        }
    }

    /// Returns an iterator over all remaining rows.
    ///
    /// The iterator stops after yielding an error.
    pub fn rows(&mut self) -> Rows {
        Rows { rdr: self, errored: false }
    }
}

/// An iterator over the rows of a [`Reader`].
pub struct Rows<'a> {
    rdr: &'a mut Reader,
    errored: bool,
}

impl<'a> Iterator for Rows<'a> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Result<Row>> {
        if self.errored {
            return None;
        }
        match self.rdr.read_row() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => None,
            Err(err) => {
                self.errored = true;
                Some(Err(err))
            }
        }
    }
}

/// Splits source text into physical lines, each with its terminator
/// normalized to a single retained `\n` so the state machine sees a uniform
/// end-of-record signal. Non-empty text missing a final terminator gets one
/// appended.
fn split_lines(source: &str) -> Vec<String> {
    let mut lines = vec![];
    let mut cur = String::new();
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                cur.push('\n');
                lines.push(mem::replace(&mut cur, String::new()));
            }
            '\n' => {
                cur.push('\n');
                lines.push(mem::replace(&mut cur, String::new()));
            }
            c => cur.push(c),
        }
    }
    if !cur.is_empty() {
        cur.push('\n');
        lines.push(cur);
    }
    lines
}

/// The state of one row's construction. Reset to `StartRecord` before each
/// row.
#[derive(Clone, Copy, Debug)]
enum ParseState {
    StartRecord,
    StartField,
    EscapedChar,
    InField,
    InQuotedField,
    EscapeInQuotedField,
    QuoteInQuotedField,
    AfterEscapedCrlf,
}

/// Per-row parse context: the accumulating field buffer, the fields saved
/// so far and the machine state. Keeping this separate from the reader
/// keeps the transition function reentrant and testable on its own.
#[derive(Debug)]
struct RowParse {
    state: ParseState,
    fields: Vec<Field>,
    buf: String,
    numeric: bool,
}

impl RowParse {
    fn new() -> RowParse {
        RowParse {
            state: StartRecord,
            fields: vec![],
            buf: String::new(),
            numeric: false,
        }
    }

    /// Feeds one character to the state machine. `end_of_data` is true when
    /// `c` sits at the very end of all input, which is what lets a dangling
    /// quote close gracefully instead of erroring.
    fn step(
        &mut self,
        d: &Dialect,
        c: char,
        end_of_data: bool,
        line: u64,
    ) -> Result<()> {
        match self.state {
            StartRecord => {
                if c == '\n' {
                    // Blank line: the row completes with no fields.
                } else {
                    self.state = StartField;
                    self.step(d, c, end_of_data, line)?;
                }
            }
            StartField => {
                if c == '\n' {
                    self.save_field(line)?;
                    self.state = StartRecord;
                } else if d.is_quote(c) {
                    self.state = InQuotedField;
                } else if d.is_escape(c) {
                    self.state = EscapedChar;
                } else if c == d.delimiter {
                    self.save_field(line)?;
                } else if c == ' ' && d.skip_initial_space {
                    // Leading space is not part of the field.
                } else {
                    if d.quoting == Quoting::NonNumeric {
                        self.numeric = true;
                    }
                    self.buf.push(c);
                    self.state = InField;
                }
            }
            EscapedChar => {
                // The escape always consumes the next character literally.
                self.buf.push(c);
                self.state = if c == '\n' { AfterEscapedCrlf } else { InField };
            }
            AfterEscapedCrlf => {
                if c == '\n' {
                    // Consume the terminator left over from the escaped one.
                } else {
                    self.state = InField;
                    self.step(d, c, end_of_data, line)?;
                }
            }
            InField => {
                if c == '\n' {
                    self.save_field(line)?;
                    self.state = StartRecord;
                } else if d.is_escape(c) {
                    self.state = EscapedChar;
                } else if c == d.delimiter {
                    self.save_field(line)?;
                    self.state = StartField;
                } else {
                    self.buf.push(c);
                }
            }
            InQuotedField => {
                if end_of_data {
                    // A dangling quote at the true end of input is absorbed
                    // silently; truncation recovery finishes the row.
                } else if d.is_escape(c) {
                    self.state = EscapeInQuotedField;
                } else if d.is_quote(c) {
                    self.state = if d.double_quote {
                        QuoteInQuotedField
                    } else {
                        InField
                    };
                } else {
                    self.buf.push(c);
                }
            }
            EscapeInQuotedField => {
                self.buf.push(c);
                self.state = InQuotedField;
            }
            QuoteInQuotedField => {
                if d.is_quote(c) {
                    // A doubled quote stands for one literal quote.
                    self.buf.push(c);
                    self.state = InQuotedField;
                } else if c == d.delimiter {
                    self.save_field(line)?;
                    self.state = StartField;
                } else if c == '\n' {
                    self.save_field(line)?;
                    self.state = StartRecord;
                } else if !d.strict {
                    self.buf.push(c);
                    self.state = InField;
                } else {
                    return Err(Error::MalformedQuote {
                        delimiter: d.delimiter,
                        // is_quote above implies the char is set.
                        quote: d.quote_char.unwrap_or('"'),
                        line: line,
                    });
                }
            }
        }
        Ok(())
    }

    /// Completes the pending field: converts it to a number if it was
    /// marked numeric, then appends it to the row.
    fn save_field(&mut self, line: u64) -> Result<()> {
        let text = mem::replace(&mut self.buf, String::new());
        let field = if self.numeric {
            self.numeric = false;
            match Field::from_numeric_text(&text) {
                Some(field) => field,
                None => {
                    return Err(Error::NumberConversion {
                        text: text,
                        line: line,
                    });
                }
            }
        } else {
            Field::Text(text)
        };
        self.fields.push(field);
        Ok(())
    }
}
