use anyhow::{Context, Result};

use super::loader::{RawRow, REQUIRED_COLUMNS};
use super::model::{SalesDataset, SalesRecord};

/// Serialize the filtered rows back to CSV text: same header as the input
/// schema, rows in filter order. Dates are written as `%Y-%m-%d` and amounts
/// with shortest-round-trip float formatting, so re-parsing the export yields
/// the same records.
pub fn to_csv(dataset: &SalesDataset, indices: &[usize]) -> Result<String> {
    // Header written by hand so an empty selection still exports the schema.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .write_record(REQUIRED_COLUMNS)
        .context("writing CSV header")?;

    for &idx in indices {
        writer
            .serialize(raw_row(&dataset.records[idx]))
            .context("serializing CSV row")?;
    }

    let bytes = writer
        .into_inner()
        .context("flushing CSV export buffer")?;
    String::from_utf8(bytes).context("CSV export is not valid UTF-8")
}

fn raw_row(rec: &SalesRecord) -> RawRow {
    RawRow {
        date: rec.order_date.format("%Y-%m-%d").to_string(),
        state: rec.state.clone(),
        category: rec.category.clone(),
        amount: rec.amount.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_csv;
    use crate::data::model::SalesRecord;
    use chrono::NaiveDate;

    fn dataset() -> SalesDataset {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        SalesDataset::from_records(vec![
            SalesRecord::new(d(2023, 1, 5), "CA".into(), "Electronics".into(), 100.0),
            SalesRecord::new(d(2023, 1, 20), "CA".into(), "Books".into(), 50.5),
            SalesRecord::new(d(2023, 2, 10), "NY".into(), "Electronics".into(), -75.25),
        ])
    }

    #[test]
    fn writes_header_and_rows_in_filter_order() {
        let ds = dataset();
        let text = to_csv(&ds, &[2, 0]).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Date,State,Category,Sale Amount"));
        assert_eq!(lines.next(), Some("2023-02-10,NY,Electronics,-75.25"));
        assert_eq!(lines.next(), Some("2023-01-05,CA,Electronics,100"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn export_then_parse_round_trips() {
        let ds = dataset();
        let indices: Vec<usize> = (0..ds.len()).collect();
        let text = to_csv(&ds, &indices).unwrap();
        let reparsed = read_csv(text.as_bytes()).unwrap();
        assert_eq!(reparsed.records, ds.records);
    }

    #[test]
    fn empty_selection_exports_header_only() {
        let ds = dataset();
        let text = to_csv(&ds, &[]).unwrap();
        assert_eq!(text.trim(), "Date,State,Category,Sale Amount");
        assert!(read_csv(text.as_bytes()).unwrap().is_empty());
    }
}
