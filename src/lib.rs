/*!
Dialect-driven CSV parsing and writing.

This crate reads and writes delimiter-separated text according to a
configurable [`Dialect`] (delimiter, quote character, escape character,
quoting policy, line terminator, strictness), reproducing the semantics of
the well-known `excel` and `unix` dialect presets byte for byte.

The parsing core is a character-level state machine that handles quoting,
escaping, embedded delimiters and newlines, numeric coercion and
truncated-input recovery; the writing core is the mirrored per-field
quoting policy engine. Both rely on a one-element [`Lookahead`] over lines
and characters to tell "more input is coming" apart from "this is truly the
end of the data".

### Example

```rust
use csv_dialect::{Dialect, Quoting, Reader, Writer};

let mut rdr = Reader::from_string("a,\"p,q\"\r\nb,c\r\n");
let rows = rdr.rows().collect::<csv_dialect::Result<Vec<_>>>().unwrap();
assert_eq!(rows[0][1], "p,q");

let mut wtr = Writer::with_dialect(Dialect::excel().quoting(Quoting::All));
wtr.write_row(vec!["a", "p,q"]).unwrap();
assert_eq!(wtr.as_string(), "\"a\",\"p,q\"\r\n");
```
*/

#![deny(missing_docs)]

pub use crate::dialect::{Dialect, Quoting};
pub use crate::error::{Error, Result};
pub use crate::field::{Field, Row};
pub use crate::lookahead::Lookahead;
pub use crate::reader::{Reader, Rows};
pub use crate::record::{
    Record, RecordIter, RecordReader, RecordValue, RecordWriter, Records,
    DEFAULT_REST_KEY,
};
pub use crate::writer::Writer;

mod dialect;
mod error;
mod field;
mod lookahead;
mod reader;
mod record;
mod writer;

#[cfg(test)]
mod tests;
