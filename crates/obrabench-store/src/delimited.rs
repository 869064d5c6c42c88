//! Delimited text (`;`-separated by default) to and from all-`Utf8` batches.

use std::io::Cursor;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray};
use arrow::csv::reader::Format;
use arrow::csv::{ReaderBuilder, WriterBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::StoreError;

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Render a batch as delimited text with a header row.
pub fn render_delimited(batch: &RecordBatch, delimiter: char) -> Result<Vec<u8>, StoreError> {
    let delimiter = delimiter_byte(delimiter)?;
    let mut buf = Vec::new();
    {
        let mut writer = WriterBuilder::new()
            .with_header(true)
            .with_delimiter(delimiter)
            .build(&mut buf);
        writer.write(batch)?;
    }
    Ok(buf)
}

/// Parse delimited text with a header row. Every column is read as `Utf8`,
/// named after the header. A leading UTF-8 BOM is ignored.
pub fn parse_delimited(bytes: &[u8], delimiter: char) -> Result<Vec<RecordBatch>, StoreError> {
    let delimiter = delimiter_byte(delimiter)?;
    let bytes = bytes.strip_prefix(BOM).unwrap_or(bytes);

    let (inferred, _) = Format::default()
        .with_header(true)
        .with_delimiter(delimiter)
        .infer_schema(Cursor::new(bytes), Some(0))?;
    let schema = Schema::new(
        inferred
            .fields()
            .iter()
            .map(|f| Field::new(f.name().trim(), DataType::Utf8, true))
            .collect::<Vec<_>>(),
    );

    let reader = ReaderBuilder::new(Arc::new(schema))
        .with_header(true)
        .with_delimiter(delimiter)
        .build(Cursor::new(bytes))?;
    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    Ok(batches)
}

/// String value of `column` at `row`; nulls read as "".
pub(crate) fn cell<'a>(column: &'a StringArray, row: usize) -> &'a str {
    if column.is_null(row) {
        ""
    } else {
        column.value(row)
    }
}

/// Look up a `Utf8` column by name.
pub(crate) fn string_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a StringArray, StoreError> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<StringArray>())
        .ok_or_else(|| StoreError::MissingColumn(name.to_string()))
}

/// Collect strings into a `Utf8` column.
pub(crate) fn utf8(values: impl Iterator<Item = String>) -> ArrayRef {
    Arc::new(StringArray::from(values.collect::<Vec<_>>()))
}

fn delimiter_byte(delimiter: char) -> Result<u8, StoreError> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(StoreError::Delimiter(delimiter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(rows: &[(&str, &str)]) -> RecordBatch {
        let schema = Schema::new(vec![
            Field::new("Nome", DataType::Utf8, false),
            Field::new("Valor", DataType::Utf8, false),
        ]);
        let names: ArrayRef = Arc::new(StringArray::from(
            rows.iter().map(|r| r.0).collect::<Vec<_>>(),
        ));
        let values: ArrayRef = Arc::new(StringArray::from(
            rows.iter().map(|r| r.1).collect::<Vec<_>>(),
        ));
        RecordBatch::try_new(Arc::new(schema), vec![names, values]).unwrap()
    }

    #[test]
    fn renders_semicolon_table() {
        let out = render_delimited(&batch(&[("obra", "1500,50")]), ';').unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Nome;Valor\nobra;1500,50\n");
    }

    #[test]
    fn quotes_fields_containing_delimiter() {
        let out = render_delimited(&batch(&[("a;b", "1")]), ';').unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"a;b\";1"));
    }

    #[test]
    fn parse_reads_back_rendered_table() {
        let rendered = render_delimited(&batch(&[("a;b", "1,5"), ("c", "")]), ';').unwrap();
        let batches = parse_delimited(&rendered, ';').unwrap();
        let total: usize = batches.iter().map(|b| b.num_rows()).sum();
        assert_eq!(total, 2);

        let names = string_column(&batches[0], "Nome").unwrap();
        let values = string_column(&batches[0], "Valor").unwrap();
        assert_eq!(cell(names, 0), "a;b");
        assert_eq!(cell(values, 0), "1,5");
        assert_eq!(cell(values, 1), "");
    }

    #[test]
    fn parse_skips_bom_and_trims_header() {
        let mut bytes = BOM.to_vec();
        bytes.extend_from_slice(" Nome ;Valor\r\nx;2\r\n".as_bytes());
        let batches = parse_delimited(&bytes, ';').unwrap();
        let names = string_column(&batches[0], "Nome").unwrap();
        assert_eq!(cell(names, 0), "x");
    }

    #[test]
    fn missing_column_is_reported() {
        let batches = parse_delimited(b"Nome\nx\n", ';').unwrap();
        assert!(matches!(
            string_column(&batches[0], "Valor"),
            Err(StoreError::MissingColumn(c)) if c == "Valor"
        ));
    }

    #[test]
    fn non_ascii_delimiter_rejected() {
        assert!(matches!(
            render_delimited(&batch(&[]), '§'),
            Err(StoreError::Delimiter('§'))
        ));
    }
}
