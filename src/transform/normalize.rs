use crate::error::{Error, Result};
use crate::table::Table;
use std::collections::HashSet;

/// Canonicalize one column label: lowercase, spaces to underscores.
/// Idempotent; no other characters are altered.
pub fn normalize_label(label: &str) -> String {
    label.to_lowercase().replace(' ', "_")
}

/// Rewrite every column label of `table` to its normalized form.
///
/// Labels must stay unique afterwards; two distinct labels collapsing to
/// the same string is a defect in the source data and fails with
/// `MalformedInput`.
pub fn normalize_columns(table: &mut Table) -> Result<()> {
    let mut seen = HashSet::with_capacity(table.num_columns());
    for column in &mut table.columns {
        let label = normalize_label(&column.name);
        if !seen.insert(label.clone()) {
            return Err(Error::MalformedInput(format!(
                "column labels collide after normalization: `{label}`"
            )));
        }
        column.name = label;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, ColumnType};

    #[test]
    fn lowercases_and_replaces_spaces() {
        assert_eq!(normalize_label("user ID"), "user_id");
        assert_eq!(normalize_label("number of meals"), "number_of_meals");
    }

    #[test]
    fn leaves_other_characters_alone() {
        assert_eq!(normalize_label("Total-Price ($)"), "total-price_($)");
    }

    #[test]
    fn is_idempotent() {
        for label in ["user ID", "user_id", "Amount", "a b  c"] {
            let once = normalize_label(label);
            assert_eq!(normalize_label(&once), once);
        }
    }

    #[test]
    fn rejects_labels_that_collide_after_normalization() {
        let mut table = Table {
            columns: vec![
                Column::new("user ID", ColumnType::Integer),
                Column::new("User id", ColumnType::Text),
            ],
            rows: vec![],
        };

        let err = normalize_columns(&mut table).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn rewrites_every_label_in_place() {
        let mut table = Table {
            columns: vec![
                Column::new("user ID", ColumnType::Integer),
                Column::new("amount", ColumnType::Float),
            ],
            rows: vec![],
        };

        normalize_columns(&mut table).unwrap();
        let labels: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(labels, vec!["user_id", "amount"]);
    }
}
