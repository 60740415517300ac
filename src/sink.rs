//! Record sinks: flat CSV and structured JSON.
//!
//! CSV gets one column per field observed anywhere in the collection, in
//! first-seen order, with an empty cell where a record lacks the field.
//! JSON preserves per-record nesting and emits non-ASCII text verbatim.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use indexmap::IndexSet;

use crate::error::ScrapeError;
use crate::record::{EntityRecord, FieldValue};

pub fn write_csv<W: Write>(writer: W, records: &[EntityRecord]) -> Result<(), ScrapeError> {
    if records.is_empty() {
        return Ok(());
    }
    let mut columns: IndexSet<&String> = IndexSet::new();
    for record in records {
        for key in record.keys() {
            columns.insert(key);
        }
    }

    let mut out = csv::Writer::from_writer(writer);
    out.write_record(&columns)?;
    for record in records {
        let row: Result<Vec<String>, ScrapeError> = columns
            .iter()
            .map(|column| match record.get(*column) {
                None => Ok(String::new()),
                Some(FieldValue::Text(text)) => Ok(text.clone()),
                Some(table @ FieldValue::Table(_)) => Ok(serde_json::to_string(table)?),
            })
            .collect();
        out.write_record(&row?)?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(writer: W, records: &[EntityRecord]) -> Result<(), ScrapeError> {
    serde_json::to_writer_pretty(writer, records)?;
    Ok(())
}

pub fn save_csv(path: &Path, records: &[EntityRecord]) -> Result<(), ScrapeError> {
    write_csv(File::create(path)?, records)
}

pub fn save_json(path: &Path, records: &[EntityRecord]) -> Result<(), ScrapeError> {
    write_json(File::create(path)?, records)
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;
    use crate::record::StatsTable;

    fn record(fields: &[(&str, &str)]) -> EntityRecord {
        fields
            .iter()
            .map(|(k, v)| ((*k).to_owned(), FieldValue::text(*v)))
            .collect()
    }

    #[test]
    fn csv_columns_are_the_union_in_first_seen_order() {
        let records = vec![
            record(&[("name", "Ana"), ("club", "FC Test")]),
            record(&[("name", "Bo"), ("height", "1,80 m")]),
        ];
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &records).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "name,club,height");
        assert_eq!(lines[1], "Ana,FC Test,");
        assert_eq!(lines[2], "Bo,,\"1,80 m\"");
    }

    #[test]
    fn json_preserves_nesting_and_non_ascii() {
        let mut stats = StatsTable::new();
        stats.insert(
            "LaLiga".to_owned(),
            IndexMap::from([("goals".to_owned(), "12".to_owned())]),
        );
        let mut rec = record(&[("name", "Kylian Mbappé")]);
        rec.insert("competitions".to_owned(), FieldValue::Table(stats));

        let mut buffer = Vec::new();
        write_json(&mut buffer, &[rec]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("Kylian Mbappé"));
        assert!(!text.contains("\\u"));

        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0]["competitions"]["LaLiga"]["goals"], "12");
    }

    #[test]
    fn nested_table_renders_as_json_in_csv_cells() {
        let mut stats = StatsTable::new();
        stats.insert(
            "Serie A".to_owned(),
            IndexMap::from([("matches".to_owned(), "10".to_owned())]),
        );
        let mut rec = record(&[("name", "Ana")]);
        rec.insert("competitions".to_owned(), FieldValue::Table(stats));

        let mut buffer = Vec::new();
        write_csv(&mut buffer, &[rec]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("Serie A"));
        assert!(text.contains("matches"));
    }

    #[test]
    fn empty_collection_writes_nothing() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &[]).unwrap();
        assert!(buffer.is_empty());
    }
}
