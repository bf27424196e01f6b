//! Aggregation of tabular analytics reports.
//!
//! A report is the JSON object returned by the upstream `reports` endpoint:
//! a `rows` array of cell arrays plus metadata such as `kind` and
//! `columnHeaders`. The relay forwards the metadata untouched and adds a
//! single `totalViews` field.

use serde_json::{Map, Value};

/// Report object as returned upstream and forwarded to the dashboard.
pub type ReportResult = Map<String, Value>;

/// Key holding the report rows.
pub const ROWS_FIELD: &str = "rows";

/// Key added to every aggregated report.
pub const TOTAL_VIEWS_FIELD: &str = "totalViews";

/// Sums the cell at `value_column` across all rows of `result`.
///
/// Returns a new object with the original fields plus `totalViews`. When
/// `rows` is absent, not an array, or empty, the copy carries `rows: []` and
/// `totalViews: 0`. Rows that are not arrays, missing cells and non-numeric
/// cells count as zero.
pub fn aggregate(result: &ReportResult, value_column: usize) -> ReportResult {
    let mut aggregated = result.clone();

    let total = match result.get(ROWS_FIELD) {
        Some(Value::Array(rows)) if !rows.is_empty() => rows
            .iter()
            .map(|row| cell_value(row, value_column))
            .fold(0i64, i64::saturating_add),
        _ => {
            aggregated.insert(ROWS_FIELD.to_string(), Value::Array(Vec::new()));
            0
        }
    };

    aggregated.insert(TOTAL_VIEWS_FIELD.to_string(), Value::from(total));
    aggregated
}

fn cell_value(row: &Value, column: usize) -> i64 {
    row.as_array()
        .and_then(|cells| cells.get(column))
        .and_then(numeric)
        .unwrap_or(0)
}

fn numeric(cell: &Value) -> Option<i64> {
    match cell {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        _ => None,
    }
}
