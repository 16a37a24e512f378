pub mod parse;

/// Scalar type of a column, decided once at parse time and carried in the
/// schema. Downstream stages consult the tag instead of re-inferring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Date,
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Column {
            name: name.into(),
            ty,
        }
    }
}

/// An ordered collection of rows sharing one fixed, ordered set of typed
/// columns. Cells are kept in source text form; an empty cell is a missing
/// value. Invariant: every row holds exactly one value per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Position of the column named `name`, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Re-serialize the table as delimited text, header first.
    ///
    /// Inverse of [`parse::parse_delimited`]: parsing the output yields a
    /// table with identical labels, rows, and inferred types.
    pub fn to_csv(&self, delimiter: u8) -> String {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(Vec::new());

        // Row width is fixed by the Table invariant, so writing into an
        // in-memory buffer cannot fail.
        wtr.write_record(self.columns.iter().map(|c| c.name.as_str()))
            .expect("header record should serialize");
        for row in &self.rows {
            wtr.write_record(row).expect("data record should serialize");
        }

        let bytes = wtr.into_inner().expect("csv buffer should flush");
        String::from_utf8(bytes).expect("csv output should be valid UTF-8")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_column_table() -> Table {
        Table {
            columns: vec![
                Column::new("user ID", ColumnType::Integer),
                Column::new("amount", ColumnType::Float),
            ],
            rows: vec![
                vec!["1".into(), "10.0".into()],
                vec!["2".into(), "7.0".into()],
            ],
        }
    }

    #[test]
    fn column_index_finds_exact_label() {
        let table = two_column_table();
        assert_eq!(table.column_index("amount"), Some(1));
        assert_eq!(table.column_index("Amount"), None);
    }

    #[test]
    fn to_csv_emits_header_then_rows() {
        let table = two_column_table();
        assert_eq!(table.to_csv(b','), "user ID,amount\n1,10.0\n2,7.0\n");
    }
}
