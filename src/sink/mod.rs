use crate::error::Result;
use crate::table::{ColumnType, Table};
use rusqlite::types::Value;
use rusqlite::Connection;
use tracing::info;

/// Write `table` to the SQLite table `table_name`, replacing any prior
/// contents, then read back and return the persisted row count.
///
/// Replace means replace: the existing table is dropped and recreated from
/// the current schema inside one transaction, never appended to. The count
/// query runs against the same name after commit so the caller can compare
/// it to the in-memory row count.
pub fn load_replace(conn: &Connection, table: &Table, table_name: &str) -> Result<u64> {
    let ident = quote_ident(table_name);

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(&format!("DROP TABLE IF EXISTS {ident};"))?;

    let column_defs: Vec<String> = table
        .columns
        .iter()
        .map(|c| format!("{} {}", quote_ident(&c.name), sql_affinity(c.ty)))
        .collect();
    tx.execute(
        &format!("CREATE TABLE {ident} ({})", column_defs.join(", ")),
        [],
    )?;

    let placeholders: Vec<String> = (1..=table.num_columns()).map(|i| format!("?{i}")).collect();
    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {ident} VALUES ({})",
            placeholders.join(", ")
        ))?;
        for row in &table.rows {
            let values = row
                .iter()
                .zip(&table.columns)
                .map(|(cell, col)| bind_value(cell, col.ty));
            stmt.execute(rusqlite::params_from_iter(values))?;
        }
    }
    tx.commit()?;

    let count: u64 = conn.query_row(&format!("SELECT COUNT(*) FROM {ident}"), [], |row| {
        row.get(0)
    })?;
    info!(table = table_name, rows = count, "loaded table");
    Ok(count)
}

/// Convert one cell through its schema tag. Missing cells become NULL; a
/// cell that no longer matches its tag is bound as text and left to SQLite
/// column affinity.
fn bind_value(cell: &str, ty: ColumnType) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    match ty {
        ColumnType::Integer => cell
            .parse::<i64>()
            .map(Value::Integer)
            .unwrap_or_else(|_| Value::Text(cell.to_string())),
        ColumnType::Float => cell
            .parse::<f64>()
            .map(Value::Real)
            .unwrap_or_else(|_| Value::Text(cell.to_string())),
        ColumnType::Date | ColumnType::Text => Value::Text(cell.to_string()),
    }
}

fn sql_affinity(ty: ColumnType) -> &'static str {
    match ty {
        ColumnType::Integer => "INTEGER",
        ColumnType::Float => "REAL",
        ColumnType::Date | ColumnType::Text => "TEXT",
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
