use std::fmt;

/// A single CSV field.
///
/// Fields are strings unless they were read under
/// [`Quoting::NonNumeric`](crate::Quoting::NonNumeric), in which case
/// unquoted tokens are converted to numbers. Integers and floats are kept
/// apart so that a number round-trips through write byte-for-byte (`3`
/// stays `3` rather than becoming `3.0`).
#[derive(Clone, Debug, PartialEq)]
pub enum Field {
    /// Field text, exactly as accumulated by the parser.
    Text(String),
    /// An integral number.
    Int(i64),
    /// A floating point number.
    Float(f64),
}

/// A single row of CSV data.
///
/// An empty row denotes a blank input line. The reader emits blank rows;
/// consumers that do not care about them (such as
/// [`RecordReader`](crate::RecordReader)) filter them out.
pub type Row = Vec<Field>;

impl Field {
    /// Returns true if and only if this field holds a number.
    pub fn is_number(&self) -> bool {
        match *self {
            Field::Text(_) => false,
            Field::Int(_) | Field::Float(_) => true,
        }
    }

    /// Returns the field text if this field is a string.
    pub fn as_str(&self) -> Option<&str> {
        match *self {
            Field::Text(ref s) => Some(s),
            _ => None,
        }
    }

    /// The textual form of this field, as the writer renders it.
    ///
    /// Integers are formatted with `itoa` and floats with `ryu`, so numeric
    /// output is locale independent and shortest round-trip.
    pub fn to_text(&self) -> String {
        match *self {
            Field::Text(ref s) => s.clone(),
            Field::Int(n) => itoa::Buffer::new().format(n).to_string(),
            Field::Float(n) => ryu::Buffer::new().format(n).to_string(),
        }
    }

    /// Convert accumulated field text to a number, as `NonNumeric` reading
    /// requires. Surrounding whitespace is ignored. Returns `None` when the
    /// text is not a number.
    pub(crate) fn from_numeric_text(text: &str) -> Option<Field> {
        let t = text.trim();
        if let Ok(n) = t.parse::<i64>() {
            return Some(Field::Int(n));
        }
        t.parse::<f64>().ok().map(Field::Float)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Field::Text(ref s) => f.write_str(s),
            Field::Int(n) => f.write_str(itoa::Buffer::new().format(n)),
            Field::Float(n) => f.write_str(ryu::Buffer::new().format(n)),
        }
    }
}

impl From<String> for Field {
    fn from(s: String) -> Field {
        Field::Text(s)
    }
}

impl<'a> From<&'a str> for Field {
    fn from(s: &'a str) -> Field {
        Field::Text(s.to_string())
    }
}

impl From<i64> for Field {
    fn from(n: i64) -> Field {
        Field::Int(n)
    }
}

impl From<i32> for Field {
    fn from(n: i32) -> Field {
        Field::Int(n as i64)
    }
}

impl From<f64> for Field {
    fn from(n: f64) -> Field {
        Field::Float(n)
    }
}

impl<'a> PartialEq<&'a str> for Field {
    fn eq(&self, other: &&'a str) -> bool {
        match *self {
            Field::Text(ref s) => s == other,
            _ => false,
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use std::fmt;

    use serde::de::{self, Deserialize, Deserializer, Visitor};
    use serde::ser::{Serialize, Serializer};

    use super::Field;

    impl Serialize for Field {
        fn serialize<S: Serializer>(
            &self,
            ser: S,
        ) -> Result<S::Ok, S::Error> {
            match *self {
                Field::Text(ref s) => ser.serialize_str(s),
                Field::Int(n) => ser.serialize_i64(n),
                Field::Float(n) => ser.serialize_f64(n),
            }
        }
    }

    struct FieldVisitor;

    impl<'de> Visitor<'de> for FieldVisitor {
        type Value = Field;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string or a number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Field, E> {
            Ok(Field::Text(v.to_string()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Field, E> {
            Ok(Field::Text(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Field, E> {
            Ok(Field::Int(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Field, E> {
            Ok(Field::Int(v as i64))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Field, E> {
            Ok(Field::Float(v))
        }
    }

    impl<'de> Deserialize<'de> for Field {
        fn deserialize<D: Deserializer<'de>>(
            de: D,
        ) -> Result<Field, D::Error> {
            de.deserialize_any(FieldVisitor)
        }
    }
}
