use crate::dialect::{Dialect, Quoting};
use crate::error::{Error, Result};
use crate::field::Field;

/// A CSV writer.
///
/// The writer renders rows of [`Field`] values into terminated lines of
/// text, one line per row, in input order. Which fields get quoted, and how
/// embedded quotes are represented, is decided per field by the dialect's
/// [`Quoting`] policy.
///
/// Output accumulates in an in-memory buffer available through
/// [`Writer::as_string`]; for a lazy line-at-a-time sequence, map rows
/// through the pure [`Writer::format_row`] instead.
///
/// ### Example
///
/// ```rust
/// use csv_dialect::Writer;
///
/// let mut wtr = Writer::from_memory();
/// wtr.write_row(vec!["a", "p,q"]).unwrap();
/// assert_eq!(wtr.as_string(), "a,\"p,q\"\r\n");
/// ```
#[derive(Clone, Debug)]
pub struct Writer {
    dialect: Dialect,
    buf: String,
}

impl Writer {
    /// Creates a writer accumulating into memory, using the
    /// [`Dialect::excel`] preset.
    pub fn from_memory() -> Writer {
        Writer::with_dialect(Dialect::excel())
    }

    /// Creates a writer using the dialect given.
    pub fn with_dialect(dialect: Dialect) -> Writer {
        Writer { dialect: dialect, buf: String::new() }
    }

    /// The dialect this writer renders with.
    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Renders one row and appends the terminated line to the buffer.
    pub fn write_row<I>(&mut self, row: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Field>,
    {
        let line = self.format_row(row)?;
        self.buf.push_str(&line);
        Ok(())
    }

    /// Renders one row as a single terminated line, without touching the
    /// buffer.
    pub fn format_row<I>(&self, row: I) -> Result<String>
    where
        I: IntoIterator,
        I::Item: Into<Field>,
    {
        let fields: Vec<Field> = row.into_iter().map(Into::into).collect();
        let d = &self.dialect;
        let quoting = d.effective_quoting();
        // A lone empty field must render quoted, or the line would be
        // indistinguishable from a blank one.
        let single_empty = fields.len() == 1
            && fields[0].as_str().map_or(false, str::is_empty);
        if single_empty && quoting == Quoting::None {
            return Err(Error::SingleEmptyFieldMustQuote);
        }
        let mut out = String::new();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                out.push(d.delimiter);
            }
            let text = field.to_text();
            let wants_quotes = match quoting {
                Quoting::All => true,
                Quoting::NonNumeric => !field.is_number(),
                Quoting::Minimal => single_empty || self.needs_quotes(&text),
                Quoting::None => false,
            };
            match d.quote_char {
                Some(q) if wants_quotes => {
                    self.push_quoted(&mut out, &text, q)?;
                }
                _ => {
                    if quoting == Quoting::None {
                        self.push_escaped(&mut out, &text)?;
                    } else {
                        out.push_str(&text);
                    }
                }
            }
        }
        out.push_str(&d.line_terminator);
        Ok(out)
    }

    /// The written CSV data accumulated so far.
    pub fn as_string(&self) -> &str {
        &self.buf
    }

    /// Consumes the writer, returning the written CSV data.
    pub fn into_string(self) -> String {
        self.buf
    }

    /// Whether minimal quoting requires wrapping this field text.
    fn needs_quotes(&self, text: &str) -> bool {
        let d = &self.dialect;
        text.chars().any(|c| {
            c == d.delimiter
                || d.quote_char == Some(c)
                || d.escape_char == Some(c)
                || d.line_terminator.contains(c)
        })
    }

    /// Appends the field wrapped in quotes, with embedded quotes doubled
    /// or escaped according to the dialect.
    fn push_quoted(&self, out: &mut String, text: &str, q: char) -> Result<()> {
        let d = &self.dialect;
        out.push(q);
        for c in text.chars() {
            if c == q {
                if d.double_quote {
                    out.push(q);
                    out.push(q);
                } else {
                    match d.escape_char {
                        Some(e) => {
                            out.push(e);
                            out.push(q);
                        }
                        None => return Err(Error::EscapeRequired),
                    }
                }
            } else {
                out.push(c);
            }
        }
        out.push(q);
        Ok(())
    }

    /// Appends the field unquoted, escaping every special character, as
    /// `Quoting::None` requires.
    fn push_escaped(&self, out: &mut String, text: &str) -> Result<()> {
        let d = &self.dialect;
        for c in text.chars() {
            let special = c == d.delimiter
                || d.quote_char == Some(c)
                || d.line_terminator.contains(c);
            if special {
                match d.escape_char {
                    Some(e) => out.push(e),
                    None => return Err(Error::EscapeRequired),
                }
            }
            out.push(c);
        }
        Ok(())
    }
}
