use crate::error::Result;
use crate::table::parse::parse_delimited;
use crate::{fetch, sink, transform};
use chrono::{DateTime, Utc};
use reqwest::Client;
use rusqlite::Connection;
use serde::Serialize;
use tracing::{info, warn};

/// Everything one run needs: where the source lives, how to read it, what
/// to derive, and where to put the result.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// URL of the delimited source resource.
    pub url: String,
    /// Field delimiter of the source.
    pub delimiter: u8,
    /// Column to group and join by.
    pub key_column: String,
    /// Label for the derived per-key count column.
    pub count_column: String,
    /// Destination table name in the sink database.
    pub table_name: String,
}

/// Outcome of a completed run. `verified` is the externally observable
/// success signal: persisted row count == in-memory row count.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub table_name: String,
    pub rows_in_memory: u64,
    pub rows_persisted: u64,
    pub verified: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Run the pipeline once: fetch → parse → aggregate+merge → normalize →
/// load → verify. Stages execute strictly in order, each consuming its
/// predecessor's return value; the first failing stage aborts the run, so
/// nothing is written to the sink unless every transform succeeded.
///
/// A row-count mismatch at the end is not an error; it is recorded on the
/// summary as `verified: false`, turning silent data loss into an explicit
/// signal for the caller.
pub async fn run(
    client: &Client,
    conn: &Connection,
    config: &PipelineConfig,
) -> Result<RunSummary> {
    let started_at = Utc::now();

    info!(url = %config.url, "fetching source");
    let body = fetch::fetch_text(client, &config.url).await?;

    let table = parse_delimited(&body, config.delimiter)?;
    info!(
        rows = table.num_rows(),
        columns = table.num_columns(),
        "parsed source"
    );

    let table = transform::apply(table, &config.key_column, &config.count_column)?;
    let rows_in_memory = table.num_rows() as u64;

    let rows_persisted = sink::load_replace(conn, &table, &config.table_name)?;

    let verified = rows_persisted == rows_in_memory;
    if verified {
        info!(rows = rows_persisted, table = %config.table_name, "run verified");
    } else {
        warn!(
            rows_in_memory,
            rows_persisted,
            table = %config.table_name,
            "persisted row count diverged from in-memory table"
        );
    }

    Ok(RunSummary {
        table_name: config.table_name.clone(),
        rows_in_memory,
        rows_persisted,
        verified,
        started_at,
        finished_at: Utc::now(),
    })
}
