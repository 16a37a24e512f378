use crate::error::{Error, Result};
use crate::table::{Column, ColumnType, Table};
use std::collections::HashMap;

/// Count rows per distinct value of the `key` column.
///
/// Returns a two-column lookup table: the key column (same label and type
/// as the source) and an `Integer` count column labelled `count_label`.
/// Rows are grouped by exact cell equality; a missing (empty) key cell is
/// one more distinct group. Lookup row order is unspecified and callers
/// must not depend on it.
pub fn count_rows_per_key(table: &Table, key: &str, count_label: &str) -> Result<Table> {
    let key_idx = table
        .column_index(key)
        .ok_or_else(|| Error::KeyNotFound(key.to_string()))?;

    let mut counts: HashMap<&str, u64> = HashMap::new();
    for row in &table.rows {
        *counts.entry(row[key_idx].as_str()).or_insert(0) += 1;
    }

    let columns = vec![
        Column::new(key, table.columns[key_idx].ty),
        Column::new(count_label, ColumnType::Integer),
    ];
    let rows = counts
        .into_iter()
        .map(|(value, count)| vec![value.to_string(), count.to_string()])
        .collect();

    Ok(Table { columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::parse::parse_delimited;

    fn transactions() -> Table {
        parse_delimited("user ID,amount\n1,10.0\n1,5.0\n2,7.0\n", b',').unwrap()
    }

    #[test]
    fn counts_rows_per_distinct_key_value() {
        let lookup = count_rows_per_key(&transactions(), "user ID", "number of meals").unwrap();

        assert_eq!(lookup.num_rows(), 2);
        assert_eq!(lookup.columns[0], Column::new("user ID", ColumnType::Integer));
        assert_eq!(
            lookup.columns[1],
            Column::new("number of meals", ColumnType::Integer)
        );

        let mut rows = lookup.rows.clone();
        rows.sort();
        assert_eq!(rows, vec![vec!["1", "2"], vec!["2", "1"]]);
    }

    #[test]
    fn counts_conserve_the_source_row_count() {
        let table = transactions();
        let lookup = count_rows_per_key(&table, "user ID", "n").unwrap();
        let total: u64 = lookup
            .rows
            .iter()
            .map(|row| row[1].parse::<u64>().unwrap())
            .sum();
        assert_eq!(total, table.num_rows() as u64);
    }

    #[test]
    fn missing_key_cells_form_their_own_group() {
        let table = parse_delimited("user ID,amount\n1,10.0\n,5.0\n,7.0\n", b',').unwrap();
        let lookup = count_rows_per_key(&table, "user ID", "n").unwrap();

        let empty_group = lookup
            .rows
            .iter()
            .find(|row| row[0].is_empty())
            .expect("empty key group should exist");
        assert_eq!(empty_group[1], "2");
    }

    #[test]
    fn absent_key_column_fails_with_key_not_found() {
        let err = count_rows_per_key(&transactions(), "customer", "n").unwrap_err();
        assert!(matches!(err, Error::KeyNotFound(ref k) if k == "customer"));
    }
}
