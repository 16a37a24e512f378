//! Batch pipeline: fetch a delimited resource over HTTP, derive a per-key
//! row count, merge it back onto the source rows, normalize column labels,
//! and load the result into SQLite with a row-count read-back.

pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod sink;
pub mod table;
pub mod transform;

pub use error::{Error, Result};
pub use table::{Column, ColumnType, Table};
