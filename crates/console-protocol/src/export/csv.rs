//! RFC 4180 CSV writer

use super::Table;
use ::csv::{QuoteStyle, Terminator, WriterBuilder};
use console_types::{AppError, AppResult};

/// Write the table as CSV
///
/// Cells containing the delimiter, a quote or a line break are quoted, with
/// inner quotes doubled.
///
/// # Errors
///
/// Returns [`AppError::Export`] if a row cannot be written.
pub fn write(table: &Table) -> AppResult<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(&table.headers).map_err(csv_error)?;
    for row in &table.rows {
        writer.write_record(row).map_err(csv_error)?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Export(format!("csv flush failed: {e}")))
}

fn csv_error(error: ::csv::Error) -> AppError {
    AppError::Export(format!("csv write failed: {error}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn read_back(bytes: &[u8]) -> Vec<Vec<String>> {
        ::csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(bytes)
            .records()
            .map(|record| record.unwrap().iter().map(ToString::to_string).collect())
            .collect()
    }

    #[test]
    fn test_special_characters_are_quoted() {
        let table = Table {
            headers: vec!["Name", "Note"],
            rows: vec![
                vec!["Smith, Jane".into(), "said \"hi\"".into()],
                vec!["Plain".into(), "two\nlines".into()],
            ],
        };
        let text = String::from_utf8(write(&table).unwrap()).unwrap();

        assert_eq!(
            text,
            "Name,Note\r\n\"Smith, Jane\",\"said \"\"hi\"\"\"\r\nPlain,\"two\nlines\"\r\n"
        );
    }

    #[test]
    fn test_header_only_for_empty_table() {
        let table = Table {
            headers: vec!["Code"],
            rows: vec![],
        };
        assert_eq!(write(&table).unwrap(), b"Code\r\n");
    }

    proptest! {
        #[test]
        fn prop_round_trip(rows in proptest::collection::vec(
            proptest::collection::vec("[a-zA-Z0-9 ,\"\n\r]{1,12}", 3),
            0..20,
        )) {
            let table = Table {
                headers: vec!["A", "B", "C"],
                rows: rows.clone(),
            };
            let parsed = read_back(&write(&table).unwrap());

            let header = vec!["A".to_string(), "B".to_string(), "C".to_string()];
            prop_assert_eq!(parsed.first(), Some(&header));
            prop_assert_eq!(&parsed[1..], &rows[..]);
        }
    }
}
