use crate::error::{Error, Result};
use crate::table::{Column, ColumnType, Table};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use tracing::debug;

/// Parse delimited text into a [`Table`].
///
/// The first record supplies the column labels verbatim; every following
/// record becomes one row. Fails with `MalformedInput` on empty input or on
/// a record whose field count differs from the header's. Re-parsing
/// identical input yields identical column order, row order, and types.
pub fn parse_delimited(text: &str, delimiter: u8) -> Result<Table> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut records = rdr.records();
    let header = match records.next() {
        Some(record) => record.map_err(|e| Error::MalformedInput(e.to_string()))?,
        None => {
            return Err(Error::MalformedInput(
                "input contains no header record".into(),
            ))
        }
    };
    let labels: Vec<String> = header.iter().map(str::to_string).collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, record) in records.enumerate() {
        let record = record
            .map_err(|e| Error::MalformedInput(format!("record {}: {}", idx + 1, e)))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    let columns = labels
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let ty = infer_column_type(rows.iter().map(|row| row[i].as_str()));
            Column::new(name, ty)
        })
        .collect::<Vec<_>>();

    debug!(
        columns = columns.len(),
        rows = rows.len(),
        "parsed delimited input"
    );
    Ok(Table { columns, rows })
}

/// Infer one column's type from its values. Missing (empty) cells are
/// skipped; a column with no non-missing values is `Text`.
fn infer_column_type<'a>(values: impl Iterator<Item = &'a str> + Clone) -> ColumnType {
    let mut present = values.filter(|v| !v.is_empty()).peekable();
    if present.peek().is_none() {
        return ColumnType::Text;
    }

    if present.clone().all(|v| v.parse::<i64>().is_ok()) {
        ColumnType::Integer
    } else if present.clone().all(|v| v.parse::<f64>().is_ok()) {
        ColumnType::Float
    } else if present.clone().all(is_date) {
        ColumnType::Date
    } else {
        ColumnType::Text
    }
}

fn is_date(s: &str) -> bool {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
        || NaiveDate::parse_from_str(s, "%Y/%m/%d").is_ok()
}
