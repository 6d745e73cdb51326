//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, which
//! makes it awkward to share small helpers without copy/paste. Each suite
//! declares `mod support;` and uses what it needs.

#![allow(dead_code)]

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{provision_template_database, shared_cluster};

/// Render a `postgres` error with enough detail to be useful in CI logs.
///
/// The `postgres::Error` `Display` implementation often collapses database
/// errors to a generic `db error`, which hides the message and SQLSTATE.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// Count rows in `table` through a plain `postgres` client.
pub fn count_rows(url: &str, table: &str) -> Result<i64, String> {
    let mut client = postgres::Client::connect(url, postgres::NoTls)
        .map_err(|err| format_postgres_error(&err))?;
    let escaped = table.replace('"', "\"\"");
    let row = client
        .query_one(format!(r#"SELECT COUNT(*) FROM "{escaped}""#).as_str(), &[])
        .map_err(|err| format_postgres_error(&err))?;
    Ok(row.get(0))
}
