use crate::error::{Error, Result};
use crate::table::{Column, ColumnType, Table};
use std::collections::HashMap;

/// Left-join the aggregate `lookup` onto `table` by `key`.
///
/// Every input row appears exactly once in the output, in input order, and
/// gains the lookup count for its key value as one trailing `Integer`
/// column. Lookup keys are unique by construction, so the join is
/// one-to-one and the output row count equals the input row count. A key
/// value with no lookup entry is a hard `KeyMismatch` failure, never a null
/// fill: it means aggregation and merge disagree about the same table.
pub fn merge_counts(mut table: Table, lookup: &Table, key: &str) -> Result<Table> {
    let key_idx = table
        .column_index(key)
        .ok_or_else(|| Error::KeyNotFound(key.to_string()))?;
    let lookup_key_idx = lookup
        .column_index(key)
        .ok_or_else(|| Error::KeyNotFound(key.to_string()))?;
    let count_idx = if lookup_key_idx == 0 { 1 } else { 0 };
    let count_col = lookup.columns.get(count_idx).ok_or_else(|| {
        Error::MalformedInput("aggregate lookup must have a key and a count column".into())
    })?;

    let counts: HashMap<&str, &str> = lookup
        .rows
        .iter()
        .map(|row| (row[lookup_key_idx].as_str(), row[count_idx].as_str()))
        .collect();

    let mut joined = Vec::with_capacity(table.rows.len());
    for mut row in table.rows {
        let count = counts
            .get(row[key_idx].as_str())
            .ok_or_else(|| Error::KeyMismatch(row[key_idx].clone()))?;
        row.push(count.to_string());
        joined.push(row);
    }

    table.columns.push(Column::new(&count_col.name, ColumnType::Integer));
    table.rows = joined;
    Ok(table)
}
