// CSV rendering for selected todos

use crate::record::CsvRecord;
use chrono::{DateTime, Utc};

/// Render records as CSV text: a header row, then one row per record.
///
/// Rows are joined with `\n` and there is no trailing newline.
pub fn to_csv<T: CsvRecord>(records: &[T]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(T::headers().join(","));

    for record in records {
        let row: Vec<String> = record.fields().iter().map(|v| v.to_string()).collect();
        lines.push(row.join(","));
    }

    lines.join("\n")
}

/// Suggested download name, e.g. `selected-todos-1700000000000.csv`
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("selected-todos-{}.csv", now.timestamp_millis())
}
