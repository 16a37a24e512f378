use anyhow::{Context, Result};
use clap::Parser;
use mealpipe::pipeline::{self, PipelineConfig};
use reqwest::Client;
use rusqlite::Connection;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_URL: &str =
    "https://raw.githubusercontent.com/mage-ai/datasets/master/restaurant_user_transactions.csv";

/// Fetch a delimited resource, derive per-key row counts, and load the
/// result into SQLite.
#[derive(Parser, Debug)]
#[command(name = "mealpipe", version, about)]
struct Cli {
    /// URL of the source CSV
    #[arg(long, default_value = DEFAULT_URL)]
    url: String,

    /// SQLite database path; use ":memory:" for an ephemeral database
    #[arg(long, default_value = "mealpipe.db")]
    database: String,

    /// Destination table name
    #[arg(long, default_value = "user_transactions")]
    table: String,

    /// Column to group and join by
    #[arg(long, default_value = "user ID")]
    key: String,

    /// Label for the derived count column
    #[arg(long, default_value = "number of meals")]
    count_column: String,

    /// Field delimiter
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Whole-request timeout for the fetch, in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    let cli = Cli::parse();
    info!(url = %cli.url, database = %cli.database, "startup");

    // ─── 2) external collaborators: HTTP client + sink connection ───
    let client = Client::builder()
        .timeout(Duration::from_secs(cli.timeout_secs))
        .build()
        .context("building HTTP client")?;
    let conn = if cli.database == ":memory:" {
        Connection::open_in_memory()
    } else {
        Connection::open(&cli.database)
    }
    .with_context(|| format!("opening database {}", cli.database))?;

    let delimiter =
        u8::try_from(cli.delimiter).context("delimiter must be a single ASCII character")?;
    let config = PipelineConfig {
        url: cli.url,
        delimiter,
        key_column: cli.key,
        count_column: cli.count_column,
        table_name: cli.table,
    };

    // ─── 3) run the pipeline once ────────────────────────────────────
    let summary = pipeline::run(&client, &conn, &config).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if !summary.verified {
        anyhow::bail!(
            "persisted row count {} does not match in-memory row count {}",
            summary.rows_persisted,
            summary.rows_in_memory
        );
    }
    Ok(())
}
