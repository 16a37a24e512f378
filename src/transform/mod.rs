pub mod aggregate;
pub mod merge;
pub mod normalize;

use crate::error::Result;
use crate::table::Table;
use tracing::info;

/// The full transform step: derive the per-key count lookup, left-join it
/// back onto the source rows, then normalize every column label.
pub fn apply(table: Table, key: &str, count_label: &str) -> Result<Table> {
    let lookup = aggregate::count_rows_per_key(&table, key, count_label)?;
    info!(groups = lookup.num_rows(), key, "aggregated row counts");

    let mut merged = merge::merge_counts(table, &lookup, key)?;
    normalize::normalize_columns(&mut merged)?;
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::parse::parse_delimited;

    #[test]
    fn apply_matches_the_reference_example() {
        let table = parse_delimited(
            "user ID,amount\n1,10.0\n1,5.0\n2,7.0\n",
            b',',
        )
        .unwrap();

        let out = apply(table, "user ID", "number of meals").unwrap();

        let labels: Vec<&str> = out.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(labels, vec!["user_id", "amount", "number_of_meals"]);
        assert_eq!(
            out.rows,
            vec![
                vec!["1", "10.0", "2"],
                vec!["1", "5.0", "2"],
                vec!["2", "7.0", "1"],
            ]
        );
    }
}
