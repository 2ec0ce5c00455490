/// The quoting policy to apply to fields.
///
/// On write, this selects which fields get wrapped in quote characters. On
/// read, `NonNumeric` additionally converts unquoted fields to numbers, and
/// `None` disables quote recognition entirely.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Quoting {
    /// Quote fields only when their text contains the delimiter, the quote
    /// character, any character of the line terminator or the escape
    /// character.
    ///
    /// This is the default.
    Minimal,
    /// Quote every field. Always.
    All,
    /// Quote every field that is not a number.
    ///
    /// On read, unquoted fields are converted to numbers.
    NonNumeric,
    /// Never quote; escape special characters instead.
    ///
    /// If a field requires escaping and no escape character is configured,
    /// the writer reports an error.
    None,
}

impl Default for Quoting {
    fn default() -> Quoting {
        Quoting::Minimal
    }
}

/// A dialect describes one concrete CSV format.
///
/// A dialect bundles the delimiter, quote character, escape character,
/// quoting policy, line terminator and strictness into a single immutable
/// configuration value consumed by [`Reader`](crate::Reader) and
/// [`Writer`](crate::Writer). Once a reader or writer is constructed, its
/// dialect cannot change.
///
/// Two presets are provided: [`Dialect::excel`] (the default) and
/// [`Dialect::unix`].
///
/// ### Example
///
/// ```rust
/// use csv_dialect::{Dialect, Quoting};
///
/// let d = Dialect::excel()
///     .delimiter(';')
///     .quoting(Quoting::All)
///     .strict(true);
/// assert_eq!(d.delimiter, ';');
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Dialect {
    /// The character that separates fields. The default is `,`.
    pub delimiter: char,
    /// The quote character. The default is `"`.
    ///
    /// When set to `None`, no character is ever recognized as a quote
    /// delimiter, regardless of the `quoting` policy; quote marks become
    /// ordinary field characters on read, and the writer treats the
    /// effective quoting policy as [`Quoting::None`].
    pub quote_char: Option<char>,
    /// The escape character. There is no default.
    ///
    /// On read, the character following an escape is always taken literally.
    /// On write, it is used to escape special characters under
    /// [`Quoting::None`], and to escape embedded quotes when `double_quote`
    /// is disabled.
    pub escape_char: Option<char>,
    /// Whether an embedded quote character is represented by doubling it.
    /// Enabled by default. When disabled, embedded quotes are escaped with
    /// `escape_char` instead.
    pub double_quote: bool,
    /// Whether whitespace immediately following the delimiter is ignored
    /// on read. Disabled by default.
    pub skip_initial_space: bool,
    /// The string terminating each written row. The default is `\r\n`.
    ///
    /// This field is writer-only: the reader always recognizes any of
    /// `\r\n`, `\r` or `\n` as a row terminator.
    pub line_terminator: String,
    /// The quoting policy. The default is [`Quoting::Minimal`].
    pub quoting: Quoting,
    /// Whether to error on malformed input instead of recovering
    /// best-effort. Disabled by default.
    pub strict: bool,
}

impl Default for Dialect {
    fn default() -> Dialect {
        Dialect::excel()
    }
}

impl Dialect {
    /// The dialect commonly produced by spreadsheet exports: comma
    /// delimited, `"` quoted, doubled embedded quotes, minimal quoting,
    /// CRLF terminated.
    pub fn excel() -> Dialect {
        Dialect {
            delimiter: ',',
            quote_char: Some('"'),
            escape_char: None,
            double_quote: true,
            skip_initial_space: false,
            line_terminator: "\r\n".to_string(),
            quoting: Quoting::Minimal,
            strict: false,
        }
    }

    /// Like [`Dialect::excel`], but LF terminated and with every field
    /// quoted.
    pub fn unix() -> Dialect {
        Dialect {
            line_terminator: "\n".to_string(),
            quoting: Quoting::All,
            ..Dialect::excel()
        }
    }

    /// Set the field delimiter.
    pub fn delimiter(mut self, delimiter: char) -> Dialect {
        self.delimiter = delimiter;
        self
    }

    /// Set the quote character, or disable quote recognition with `None`.
    pub fn quote_char(mut self, quote: Option<char>) -> Dialect {
        self.quote_char = quote;
        self
    }

    /// Set the escape character.
    pub fn escape_char(mut self, escape: Option<char>) -> Dialect {
        self.escape_char = escape;
        self
    }

    /// Enable or disable doubled-quote escaping.
    pub fn double_quote(mut self, yes: bool) -> Dialect {
        self.double_quote = yes;
        self
    }

    /// Enable or disable skipping whitespace after the delimiter.
    pub fn skip_initial_space(mut self, yes: bool) -> Dialect {
        self.skip_initial_space = yes;
        self
    }

    /// Set the line terminator used when writing. The reader is unaffected.
    pub fn line_terminator<S: Into<String>>(mut self, term: S) -> Dialect {
        self.line_terminator = term.into();
        self
    }

    /// Set the quoting policy.
    pub fn quoting(mut self, quoting: Quoting) -> Dialect {
        self.quoting = quoting;
        self
    }

    /// Enable or disable strict parsing.
    pub fn strict(mut self, yes: bool) -> Dialect {
        self.strict = yes;
        self
    }

    /// The quoting policy actually in force.
    ///
    /// With `quote_char` unset there is nothing to quote with, so any
    /// configured policy degrades to [`Quoting::None`].
    pub(crate) fn effective_quoting(&self) -> Quoting {
        if self.quote_char.is_none() {
            Quoting::None
        } else {
            self.quoting
        }
    }

    #[inline]
    pub(crate) fn is_quote(&self, c: char) -> bool {
        self.quote_char == Some(c) && self.quoting != Quoting::None
    }

    #[inline]
    pub(crate) fn is_escape(&self, c: char) -> bool {
        self.escape_char == Some(c)
    }
}
