// Generic record trait for anything exportable as a CSV row

use crate::models::{Todo, to_iso8601};
use chrono::{DateTime, Utc};

/// Core trait that any exportable record must implement
pub trait CsvRecord {
    /// Column names, in output order
    fn headers() -> &'static [&'static str]
    where
        Self: Sized;

    /// One value per header, in the same order
    fn fields(&self) -> Vec<FieldValue>;
}

/// Value types that can appear in an exported cell
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(u64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl std::fmt::Display for FieldValue {
    /// Renders the value as a CSV cell. Text is always quoted with `"`
    /// doubled; the other variants never contain separators.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "\"{}\"", s.replace('"', "\"\"")),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Timestamp(ts) => write!(f, "{}", to_iso8601(ts)),
        }
    }
}

impl CsvRecord for Todo {
    fn headers() -> &'static [&'static str] {
        &["ID", "Text", "Completed", "Created At"]
    }

    fn fields(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Int(self.id),
            FieldValue::Text(self.text.clone()),
            FieldValue::Bool(self.completed),
            FieldValue::Timestamp(self.created_at),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_todo_fields_match_headers() {
        let todo = Todo::new(1, "Test");
        assert_eq!(todo.fields().len(), Todo::headers().len());
        assert_eq!(Todo::headers().join(","), "ID,Text,Completed,Created At");
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Text("test".to_string()).to_string(), "\"test\"");
        assert_eq!(FieldValue::Int(42).to_string(), "42");
        assert_eq!(FieldValue::Bool(true).to_string(), "true");

        let ts = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(FieldValue::Timestamp(ts).to_string(), "2023-12-31T23:59:59.000Z");
    }

    #[test]
    fn test_text_quotes_are_doubled() {
        let cell = FieldValue::Text("He said \"hi\"".to_string()).to_string();
        assert_eq!(cell, "\"He said \"\"hi\"\"\"");
    }

    #[test]
    fn test_text_with_comma_stays_in_one_cell() {
        let cell = FieldValue::Text("milk, eggs".to_string()).to_string();
        assert_eq!(cell, "\"milk, eggs\"");
    }
}
