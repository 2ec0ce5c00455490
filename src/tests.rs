use crate::{
    Dialect, Error, Field, Quoting, Reader, RecordReader, RecordValue,
    RecordWriter, Writer, DEFAULT_REST_KEY,
};

macro_rules! row {
    ($($field:expr),* $(,)*) => ({
        let row: Vec<Field> = vec![$(Field::from($field)),*];
        row
    });
}

macro_rules! parses_to {
    ($name:ident, $csv:expr, $rows:expr) => (
        parses_to!($name, $csv, $rows, Dialect::excel());
    );
    ($name:ident, $csv:expr, $rows:expr, $dialect:expr) => (
        #[test]
        fn $name() {
            let mut rdr = Reader::with_dialect($csv, $dialect);
            let rows = rdr
                .rows()
                .collect::<crate::Result<Vec<_>>>()
                .unwrap();
            let expected: Vec<Vec<Field>> = $rows;
            assert_eq!(rows, expected);
        }
    );
}

macro_rules! fail_parses_to {
    ($name:ident, $csv:expr, $err:expr) => (
        fail_parses_to!($name, $csv, $err, Dialect::excel());
    );
    ($name:ident, $csv:expr, $err:expr, $dialect:expr) => (
        #[test]
        fn $name() {
            let mut rdr = Reader::with_dialect($csv, $dialect);
            let err = rdr
                .rows()
                .collect::<crate::Result<Vec<_>>>()
                .unwrap_err();
            assert_eq!(err, $err);
        }
    );
}

macro_rules! writes_as {
    ($name:ident, $rows:expr, $csv:expr) => (
        writes_as!($name, $rows, $csv, Dialect::excel());
    );
    ($name:ident, $rows:expr, $csv:expr, $dialect:expr) => (
        #[test]
        fn $name() {
            let mut wtr = Writer::with_dialect($dialect);
            for row in $rows {
                wtr.write_row(row).unwrap();
            }
            assert_eq!(wtr.as_string(), $csv);
        }
    );
}

macro_rules! fail_writes_as {
    ($name:ident, $rows:expr, $err:expr, $dialect:expr) => (
        #[test]
        fn $name() {
            let mut wtr = Writer::with_dialect($dialect);
            let mut result = Ok(());
            for row in $rows {
                result = wtr.write_row(row);
                if result.is_err() {
                    break;
                }
            }
            assert_eq!(result.unwrap_err(), $err);
        }
    );
}

// Basic shapes and terminators.
parses_to!(one_row_one_field, "a", vec![row!["a"]]);
parses_to!(one_row_many_fields, "a,b,c", vec![row!["a", "b", "c"]]);
parses_to!(one_row_trailing_comma, "a,b,", vec![row!["a", "b", ""]]);
parses_to!(one_row_one_field_lf, "a\n", vec![row!["a"]]);
parses_to!(one_row_many_fields_lf, "a,b,c\n", vec![row!["a", "b", "c"]]);
parses_to!(one_row_one_field_crlf, "a\r\n", vec![row!["a"]]);
parses_to!(one_row_one_field_cr, "a\r", vec![row!["a"]]);
parses_to!(
    many_rows_mixed_terminators,
    "a,b\nc,d\r\ne,f\r",
    vec![row!["a", "b"], row!["c", "d"], row!["e", "f"]]
);
parses_to!(empty_input, "", Vec::<Vec<Field>>::new());
parses_to!(one_blank_line, "\n", vec![row![]]);
parses_to!(
    blank_lines_become_empty_rows,
    "a\n\nb\n",
    vec![row!["a"], row![], row!["b"]]
);
parses_to!(empty_fields_only, ",,", vec![row!["", "", ""]]);

// Quoting.
parses_to!(quoted_field, "\"a\"", vec![row!["a"]]);
parses_to!(
    quoted_field_with_delimiter,
    "1,\",3,\",5",
    vec![row!["1", ",3,", "5"]]
);
parses_to!(four_quotes_is_one_literal_quote, "\"\"\"\"", vec![row!["\""]]);
parses_to!(six_quotes_is_two_literal_quotes, "\"\"\"\"\"\"", vec![row!["\"\""]]);
parses_to!(
    quoted_field_spans_lines,
    "\"a\nb\",c\n",
    vec![row!["a\nb", "c"]]
);
parses_to!(
    quoted_field_spans_crlf_lines,
    "\"a\r\nb\",c\r\n",
    vec![row!["a\nb", "c"]]
);
parses_to!(quote_inside_unquoted_field, "a\"b", vec![row!["a\"b"]]);
parses_to!(stray_char_after_quote_non_strict, "\"a\"b", vec![row!["ab"]]);
parses_to!(
    no_quote_char_means_no_quoting,
    "\"a\",b",
    vec![row!["\"a\"", "b"]],
    Dialect::excel().quote_char(None)
);
parses_to!(
    double_quote_disabled_closes_field,
    "\"a\"b\"",
    vec![row!["ab\""]],
    Dialect::excel().double_quote(false)
);
fail_parses_to!(
    stray_char_after_quote_strict,
    "\"a\"b",
    Error::MalformedQuote { delimiter: ',', quote: '"', line: 1 },
    Dialect::excel().strict(true)
);

// Truncated input.
parses_to!(dangling_quote_non_strict, "a,\"", vec![row!["a", ""]]);
parses_to!(open_quoted_field_at_eof, "a,\"bc", vec![row!["a", "bc"]]);
fail_parses_to!(
    dangling_quote_strict,
    "a,\"",
    Error::UnexpectedEndOfData { line: 1 },
    Dialect::excel().strict(true)
);
fail_parses_to!(
    open_quoted_field_at_eof_strict,
    "a,\"bc\ndef",
    Error::UnexpectedEndOfData { line: 2 },
    Dialect::excel().strict(true)
);

// NUL bytes are rejected outright.
fail_parses_to!(
    nul_byte_in_line,
    "a,\0b",
    Error::NullByte { line: 1 }
);
fail_parses_to!(
    nul_byte_line_number,
    "a,b\nc,\0",
    Error::NullByte { line: 2 }
);

// Escape characters on read.
parses_to!(
    escaped_delimiter,
    "a\\,b",
    vec![row!["a,b"]],
    Dialect::excel().escape_char(Some('\\'))
);
parses_to!(
    escaped_quote_in_quoted_field,
    "\"a\\\"b\"",
    vec![row!["a\"b"]],
    Dialect::excel().escape_char(Some('\\')).double_quote(false)
);
parses_to!(
    escaped_newline_joins_lines,
    "a\\\nb",
    vec![row!["a\nb"]],
    Dialect::excel().escape_char(Some('\\'))
);
parses_to!(
    escaped_crlf_joins_lines,
    "a\\\r\nb,c",
    vec![row!["a\nb", "c"]],
    Dialect::excel().escape_char(Some('\\'))
);

// Initial space skipping and alternate delimiters.
parses_to!(
    skip_initial_space,
    "a, b, c",
    vec![row!["a", "b", "c"]],
    Dialect::excel().skip_initial_space(true)
);
parses_to!(
    keep_initial_space_by_default,
    "a, b",
    vec![row!["a", " b"]]
);
parses_to!(
    semicolon_delimiter,
    "a;b;c",
    vec![row!["a", "b", "c"]],
    Dialect::excel().delimiter(';')
);

// Numeric coercion under NonNumeric quoting.
parses_to!(
    non_numeric_converts_unquoted,
    ",3,\"5\",7.3, 9",
    vec![row!["", 3, "5", 7.3, 9]],
    Dialect::excel().quoting(Quoting::NonNumeric)
);
fail_parses_to!(
    non_numeric_conversion_failure,
    "1,abc",
    Error::NumberConversion { text: "abc".to_string(), line: 1 },
    Dialect::excel().quoting(Quoting::NonNumeric)
);

#[test]
fn line_counter_counts_physical_lines() {
    let mut rdr = Reader::from_string("line,1\r\nline,2\r\nline,3");
    assert_eq!(rdr.line(), 0);
    assert_eq!(rdr.read_row().unwrap(), Some(row!["line", "1"]));
    assert_eq!(rdr.line(), 1);
    assert_eq!(rdr.read_row().unwrap(), Some(row!["line", "2"]));
    assert_eq!(rdr.line(), 2);
    assert_eq!(rdr.read_row().unwrap(), Some(row!["line", "3"]));
    assert_eq!(rdr.line(), 3);
    assert_eq!(rdr.read_row().unwrap(), None);
    assert_eq!(rdr.line(), 3);
}

#[test]
fn line_counter_spans_multi_line_rows() {
    let mut rdr = Reader::from_string("\"a\nb\nc\",d\ne,f\n");
    assert_eq!(rdr.read_row().unwrap(), Some(row!["a\nb\nc", "d"]));
    assert_eq!(rdr.line(), 3);
    assert_eq!(rdr.read_row().unwrap(), Some(row!["e", "f"]));
    assert_eq!(rdr.line(), 4);
}

#[test]
fn rows_iterator_fuses_after_error() {
    let mut rdr = Reader::with_dialect(
        "a,\"\nb,c\n",
        Dialect::excel().strict(true),
    );
    let mut rows = rdr.rows();
    assert!(rows.next().unwrap().is_err());
    assert!(rows.next().is_none());
}

// Writing under each quoting policy.
writes_as!(
    write_minimal,
    vec![row!["a", 1, "p,q"]],
    "a,1,\"p,q\"\r\n"
);
writes_as!(
    write_all,
    vec![row!["a", 1, "p,q"]],
    "\"a\",\"1\",\"p,q\"\r\n",
    Dialect::excel().quoting(Quoting::All)
);
writes_as!(
    write_non_numeric,
    vec![row![1, "a", 7.3]],
    "1,\"a\",7.3\r\n",
    Dialect::excel().quoting(Quoting::NonNumeric)
);
writes_as!(
    write_none_with_escape,
    vec![row!["a", "p,q"]],
    "a,p\\,q\r\n",
    Dialect::excel().quoting(Quoting::None).escape_char(Some('\\'))
);
fail_writes_as!(
    write_none_without_escape,
    vec![row!["a", 1, "p,q"]],
    Error::EscapeRequired,
    Dialect::excel().quoting(Quoting::None)
);

// Minimal quoting triggers.
writes_as!(write_plain_unquoted, vec![row!["a", "b"]], "a,b\r\n");
writes_as!(
    write_embedded_quote,
    vec![row!["sm\"th"]],
    "\"sm\"\"th\"\r\n"
);
writes_as!(
    write_embedded_newline,
    vec![row!["a\nb"]],
    "\"a\nb\"\r\n"
);
writes_as!(
    write_escape_char_forces_quotes,
    vec![row!["a\\b"]],
    "\"a\\b\"\r\n",
    Dialect::excel().escape_char(Some('\\'))
);
writes_as!(
    write_escaped_quote_no_doubling,
    vec![row!["sm\"th"]],
    "\"sm\\\"th\"\r\n",
    Dialect::excel().double_quote(false).escape_char(Some('\\'))
);
fail_writes_as!(
    write_embedded_quote_no_doubling_no_escape,
    vec![row!["sm\"th"]],
    Error::EscapeRequired,
    Dialect::excel().double_quote(false)
);

// The single-empty-field record edge case.
writes_as!(write_single_empty_field, vec![row![""]], "\"\"\r\n");
writes_as!(
    write_single_empty_field_all,
    vec![row![""]],
    "\"\"\r\n",
    Dialect::excel().quoting(Quoting::All)
);
writes_as!(
    write_two_empty_fields_stay_bare,
    vec![row!["", ""]],
    ",\r\n"
);
fail_writes_as!(
    write_single_empty_field_none,
    vec![row![""]],
    Error::SingleEmptyFieldMustQuote,
    Dialect::excel().quoting(Quoting::None).escape_char(Some('\\'))
);

// Presets and terminators.
writes_as!(
    write_unix_preset,
    vec![row!["a", "b"]],
    "\"a\",\"b\"\n",
    Dialect::unix()
);
writes_as!(
    write_custom_terminator,
    vec![row!["a"], row!["b"]],
    "a|b|",
    Dialect::excel().line_terminator("|")
);

// With no quote character, any quoting policy degrades to None.
writes_as!(
    write_no_quote_char_plain,
    vec![row!["a", "b"]],
    "a,b\r\n",
    Dialect::excel().quote_char(None).quoting(Quoting::All)
);
fail_writes_as!(
    write_no_quote_char_needs_escape,
    vec![row!["p,q"]],
    Error::EscapeRequired,
    Dialect::excel().quote_char(None).quoting(Quoting::All)
);

#[test]
fn write_no_rows_yields_no_output() {
    let wtr = Writer::from_memory();
    assert_eq!(wtr.as_string(), "");
}

#[test]
fn format_row_does_not_touch_buffer() {
    let wtr = Writer::from_memory();
    assert_eq!(wtr.format_row(vec!["a", "b"]).unwrap(), "a,b\r\n");
    assert_eq!(wtr.as_string(), "");
}

#[test]
fn round_trip_is_idempotent_for_safe_content() {
    let rows = vec![row!["a", "b", "c"], row!["d", "e", "f"]];
    let mut wtr = Writer::from_memory();
    for row in &rows {
        wtr.write_row(row.clone()).unwrap();
    }
    let first = wtr.into_string();

    let mut rdr = Reader::from_string(&first);
    let reread = rdr.rows().collect::<crate::Result<Vec<_>>>().unwrap();
    let mut wtr = Writer::from_memory();
    for row in reread {
        wtr.write_row(row).unwrap();
    }
    assert_eq!(wtr.as_string(), first);
}

#[test]
fn round_trip_quoted_content() {
    let rows = vec![row!["p,q", "sm\"th", "a\nb"]];
    let mut wtr = Writer::from_memory();
    for row in &rows {
        wtr.write_row(row.clone()).unwrap();
    }
    let text = wtr.into_string();
    assert_eq!(text, "\"p,q\",\"sm\"\"th\",\"a\nb\"\r\n");

    let mut rdr = Reader::from_string(&text);
    let reread = rdr.rows().collect::<crate::Result<Vec<_>>>().unwrap();
    assert_eq!(reread, rows);
}

// Record mapping.

#[test]
fn record_reader_headers_from_first_row() {
    let mut rdr = RecordReader::from_string("name,age\nfred,32\nwilma,31\n");
    let rec = rdr.read_record().unwrap().unwrap();
    assert_eq!(rec.get("name"), Some(&RecordValue::Field("fred".into())));
    assert_eq!(rec.get("age"), Some(&RecordValue::Field("32".into())));
    let rec = rdr.read_record().unwrap().unwrap();
    assert_eq!(rec.get("name"), Some(&RecordValue::Field("wilma".into())));
    assert!(rdr.read_record().unwrap().is_none());
}

#[test]
fn record_reader_explicit_headers() {
    let mut rdr = RecordReader::from_string("fred,32\n")
        .headers(vec!["name".to_string(), "age".to_string()]);
    let rec = rdr.read_record().unwrap().unwrap();
    assert_eq!(rec.get("name"), Some(&RecordValue::Field("fred".into())));
}

#[test]
fn record_reader_skips_blank_rows() {
    let mut rdr = RecordReader::from_string("name\n\nfred\n\n");
    let rec = rdr.read_record().unwrap().unwrap();
    assert_eq!(rec.get("name"), Some(&RecordValue::Field("fred".into())));
    assert!(rdr.read_record().unwrap().is_none());
}

#[test]
fn record_reader_short_row_uses_rest_value() {
    let mut rdr = RecordReader::from_string("a,b,c\n1\n");
    let rec = rdr.read_record().unwrap().unwrap();
    assert_eq!(rec.get("a"), Some(&RecordValue::Field("1".into())));
    assert_eq!(rec.get("b"), Some(&RecordValue::Field("".into())));
    assert_eq!(rec.get("c"), Some(&RecordValue::Field("".into())));
}

#[test]
fn record_reader_custom_rest_value() {
    let mut rdr = RecordReader::from_string("a,b\n1\n").rest_value("n/a");
    let rec = rdr.read_record().unwrap().unwrap();
    assert_eq!(rec.get("b"), Some(&RecordValue::Field("n/a".into())));
}

#[test]
fn record_reader_long_row_overflows_to_rest_key() {
    let mut rdr = RecordReader::from_string("a,b\n1,2,3,4\n");
    let rec = rdr.read_record().unwrap().unwrap();
    assert_eq!(rec.len(), 3);
    assert_eq!(
        rec.get(DEFAULT_REST_KEY),
        Some(&RecordValue::Rest(vec!["3".into(), "4".into()]))
    );
}

#[test]
fn record_reader_custom_rest_key() {
    let mut rdr =
        RecordReader::from_string("a\n1,2\n").rest_key("extras");
    let rec = rdr.read_record().unwrap().unwrap();
    assert_eq!(
        rec.get("extras"),
        Some(&RecordValue::Rest(vec!["2".into()]))
    );
}

#[test]
fn record_reader_empty_input() {
    let mut rdr = RecordReader::from_string("");
    assert!(rdr.field_names().unwrap().is_none());
    assert!(rdr.read_record().unwrap().is_none());
}

#[test]
fn record_reader_exposes_line_counter() {
    let mut rdr = RecordReader::from_string("h\na\nb\n");
    rdr.read_record().unwrap().unwrap();
    assert_eq!(rdr.line(), 2);
}

#[test]
fn record_writer_explicit_headers() {
    let mut wtr = RecordWriter::from_memory()
        .headers(vec!["name".to_string(), "age".to_string()]);
    wtr.write_headers().unwrap();
    let mut rec = crate::Record::new();
    rec.push("age", RecordValue::Field("32".into()));
    rec.push("name", RecordValue::Field("fred".into()));
    wtr.write_record(&rec).unwrap();
    assert_eq!(wtr.as_string(), "name,age\r\nfred,32\r\n");
}

#[test]
fn record_writer_missing_field_renders_empty() {
    let mut wtr = RecordWriter::from_memory()
        .headers(vec!["a".to_string(), "b".to_string()]);
    let mut rec = crate::Record::new();
    rec.push("a", RecordValue::Field("1".into()));
    wtr.write_record(&rec).unwrap();
    assert_eq!(wtr.as_string(), "1,\r\n");
}

#[test]
fn record_writer_infers_headers_from_first_record() {
    let mut wtr = RecordWriter::from_memory();
    let mut rec = crate::Record::new();
    rec.push("x", RecordValue::Field("1".into()));
    rec.push("y", RecordValue::Field("2".into()));
    wtr.write_record(&rec).unwrap();
    let mut rec = crate::Record::new();
    rec.push("y", RecordValue::Field("4".into()));
    rec.push("x", RecordValue::Field("3".into()));
    wtr.write_record(&rec).unwrap();
    assert_eq!(wtr.as_string(), "1,2\r\n3,4\r\n");
}

#[test]
fn record_round_trip() {
    let source = "name,age\nfred,32\nwilma,31\n";
    let mut rdr = RecordReader::with_dialect(source, Dialect::excel());
    let headers: Vec<String> =
        rdr.field_names().unwrap().unwrap().to_vec();
    let mut wtr = RecordWriter::with_dialect(
        Dialect::excel().line_terminator("\n"),
    )
    .headers(headers);
    wtr.write_headers().unwrap();
    for rec in rdr.records() {
        wtr.write_record(&rec.unwrap()).unwrap();
    }
    assert_eq!(wtr.as_string(), source);
}

// Error messages are part of the contract.

#[test]
fn error_messages() {
    assert_eq!(
        Error::NullByte { line: 2 }.to_string(),
        "line contains NUL, at line 2"
    );
    assert_eq!(
        Error::MalformedQuote { delimiter: ',', quote: '"', line: 1 }
            .to_string(),
        "',' expected after '\"', at line 1"
    );
    assert_eq!(
        Error::UnexpectedEndOfData { line: 3 }.to_string(),
        "unexpected end of data, at line 3"
    );
    assert_eq!(
        Error::NumberConversion { text: "abc".to_string(), line: 1 }
            .to_string(),
        "could not convert string to number: abc, at line 1"
    );
    assert_eq!(
        Error::EscapeRequired.to_string(),
        "need to escape, but no escape character is set"
    );
    assert_eq!(
        Error::SingleEmptyFieldMustQuote.to_string(),
        "single empty field record must be quoted"
    );
    assert_eq!(Error::UnexpectedEndOfData { line: 3 }.line(), Some(3));
    assert_eq!(Error::EscapeRequired.line(), None);
}
