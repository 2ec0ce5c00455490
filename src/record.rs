use std::slice;

use crate::dialect::Dialect;
use crate::error::Result;
use crate::field::Field;
use crate::reader::Reader;
use crate::writer::Writer;

/// The default rest key.
///
/// When a row carries more fields than there are headers and no explicit
/// rest key was configured, the surplus is gathered under this literal
/// placeholder name.
pub const DEFAULT_REST_KEY: &str = "undefined";

/// A value bound to a header name in a [`Record`].
#[derive(Clone, Debug, PartialEq)]
pub enum RecordValue {
    /// A single field bound to one header.
    Field(Field),
    /// Surplus fields from a row longer than the header list, gathered
    /// under the rest key.
    Rest(Vec<Field>),
}

/// A keyed view of a row: header names associated with positional field
/// values, in header order.
///
/// Entries keep their insertion order, which is what lets
/// [`RecordWriter`] infer a header list from the first record it sees.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record(Vec<(String, RecordValue)>);

impl Record {
    /// Create a new empty `Record`.
    pub fn new() -> Record {
        Record(Vec::new())
    }

    /// Append a named value.
    pub fn push<K: Into<String>>(&mut self, key: K, value: RecordValue) {
        self.0.push((key.into(), value));
    }

    /// Return the value bound to `key`, if any.
    pub fn get(&self, key: &str) -> Option<&RecordValue> {
        self.0.iter().find(|&&(ref k, _)| k == key).map(|&(_, ref v)| v)
    }

    /// Returns true if and only if this record has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of entries in this record.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns an iterator over the entries, in insertion order.
    pub fn iter(&self) -> RecordIter {
        RecordIter(self.0.iter())
    }
}

impl<'a> IntoIterator for &'a Record {
    type IntoIter = RecordIter<'a>;
    type Item = (&'a str, &'a RecordValue);
    fn into_iter(self) -> RecordIter<'a> {
        self.iter()
    }
}

/// An iterator over the entries of a [`Record`].
pub struct RecordIter<'a>(slice::Iter<'a, (String, RecordValue)>);

impl<'a> Iterator for RecordIter<'a> {
    type Item = (&'a str, &'a RecordValue);

    fn next(&mut self) -> Option<(&'a str, &'a RecordValue)> {
        self.0.next().map(|&(ref k, ref v)| (k.as_str(), v))
    }
}

/// A reader that maps rows to keyed [`Record`]s.
///
/// Header names come either from an explicit list or from the first row of
/// the input. Blank rows are skipped. A row longer than the header list
/// gathers its surplus under the rest key (default: the literal
/// `"undefined"`); a row shorter than the header list fills the missing
/// headers with the rest value (default: the empty string).
///
/// ### Example
///
/// ```rust
/// use csv_dialect::{RecordReader, RecordValue};
///
/// let mut rdr = RecordReader::from_string("name,age\nfred,32\n");
/// let rec = rdr.read_record().unwrap().unwrap();
/// assert_eq!(rec.get("age"), Some(&RecordValue::Field("32".into())));
/// ```
pub struct RecordReader {
    rdr: Reader,
    headers: Option<Vec<String>>,
    rest_key: String,
    rest_value: Field,
}

impl RecordReader {
    /// Creates a record reader over the given text using the
    /// [`Dialect::excel`] preset.
    pub fn from_string<S: AsRef<str>>(source: S) -> RecordReader {
        RecordReader::with_dialect(source, Dialect::excel())
    }

    /// Creates a record reader over the given text using the dialect given.
    pub fn with_dialect<S: AsRef<str>>(
        source: S,
        dialect: Dialect,
    ) -> RecordReader {
        RecordReader {
            rdr: Reader::with_dialect(source, dialect),
            headers: None,
            rest_key: DEFAULT_REST_KEY.to_string(),
            rest_value: Field::Text(String::new()),
        }
    }

    /// Supply header names explicitly instead of taking them from the
    /// first row. The first row is then treated as data.
    pub fn headers(mut self, headers: Vec<String>) -> RecordReader {
        self.headers = Some(headers);
        self
    }

    /// Set the key that gathers surplus values when a row is longer than
    /// the header list. The default is [`DEFAULT_REST_KEY`].
    pub fn rest_key<S: Into<String>>(mut self, key: S) -> RecordReader {
        self.rest_key = key.into();
        self
    }

    /// Set the fill value for headers missing from a short row. The
    /// default is the empty string.
    pub fn rest_value<F: Into<Field>>(mut self, value: F) -> RecordReader {
        self.rest_value = value.into();
        self
    }

    /// The number of physical input lines consumed so far.
    pub fn line(&self) -> u64 {
        self.rdr.line()
    }

    /// The header names in use, reading them from the first row if
    /// necessary. Returns `None` for empty input.
    pub fn field_names(&mut self) -> Result<Option<&[String]>> {
        if self.headers.is_none() {
            match self.rdr.read_row()? {
                None => return Ok(None),
                Some(row) => {
                    let names =
                        row.iter().map(|f| f.to_text()).collect();
                    self.headers = Some(names);
                }
            }
        }
        Ok(self.headers.as_ref().map(|h| h.as_slice()))
    }

    /// Reads the next non-blank row as a record, or returns `None` once
    /// the input is exhausted.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        if self.field_names()?.is_none() {
            return Ok(None);
        }
        loop {
            let row = match self.rdr.read_row()? {
                None => return Ok(None),
                Some(row) => row,
            };
            if row.is_empty() {
                continue;
            }
            let headers = match self.headers {
                Some(ref headers) => headers,
                None => return Ok(None),
            };
            let mut record = Record::new();
            let mut fields = row.into_iter();
            for header in headers {
                let value = match fields.next() {
                    Some(field) => field,
                    None => self.rest_value.clone(),
                };
                record.push(header.clone(), RecordValue::Field(value));
            }
            let rest: Vec<Field> = fields.collect();
            if !rest.is_empty() {
                record.push(self.rest_key.clone(), RecordValue::Rest(rest));
            }
            return Ok(Some(record));
        }
    }

    /// Returns an iterator over all remaining records.
    ///
    /// The iterator stops after yielding an error.
    pub fn records(&mut self) -> Records {
        Records { rdr: self, errored: false }
    }
}

/// An iterator over the records of a [`RecordReader`].
pub struct Records<'a> {
    rdr: &'a mut RecordReader,
    errored: bool,
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Result<Record>> {
        if self.errored {
            return None;
        }
        match self.rdr.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(err) => {
                self.errored = true;
                Some(Err(err))
            }
        }
    }
}

/// A writer that maps keyed [`Record`]s back to rows.
///
/// The header list is either supplied explicitly or inferred from the keys
/// of the first record written, in insertion order. Headers missing from a
/// record render as empty fields; a [`RecordValue::Rest`] entry appends all
/// of its fields in place.
pub struct RecordWriter {
    wtr: Writer,
    headers: Option<Vec<String>>,
}

impl RecordWriter {
    /// Creates a record writer accumulating into memory, using the
    /// [`Dialect::excel`] preset.
    pub fn from_memory() -> RecordWriter {
        RecordWriter::with_dialect(Dialect::excel())
    }

    /// Creates a record writer using the dialect given.
    pub fn with_dialect(dialect: Dialect) -> RecordWriter {
        RecordWriter { wtr: Writer::with_dialect(dialect), headers: None }
    }

    /// Supply the header list explicitly.
    pub fn headers(mut self, headers: Vec<String>) -> RecordWriter {
        self.headers = Some(headers);
        self
    }

    /// Writes the header row. Does nothing if no header list is known yet.
    pub fn write_headers(&mut self) -> Result<()> {
        let row: Vec<Field> = match self.headers {
            Some(ref headers) => {
                headers.iter().map(|h| Field::Text(h.clone())).collect()
            }
            None => return Ok(()),
        };
        self.wtr.write_row(row)
    }

    /// Renders one record as a row and appends the terminated line to the
    /// buffer.
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        if self.headers.is_none() {
            let inferred =
                record.iter().map(|(k, _)| k.to_string()).collect();
            self.headers = Some(inferred);
        }
        let mut row: Vec<Field> = vec![];
        if let Some(ref headers) = self.headers {
            for header in headers {
                match record.get(header) {
                    Some(&RecordValue::Field(ref field)) => {
                        row.push(field.clone());
                    }
                    Some(&RecordValue::Rest(ref fields)) => {
                        row.extend(fields.iter().cloned());
                    }
                    None => row.push(Field::Text(String::new())),
                }
            }
        }
        self.wtr.write_row(row)
    }

    /// The written CSV data accumulated so far.
    pub fn as_string(&self) -> &str {
        self.wtr.as_string()
    }

    /// Consumes the writer, returning the written CSV data.
    pub fn into_string(self) -> String {
        self.wtr.into_string()
    }
}
