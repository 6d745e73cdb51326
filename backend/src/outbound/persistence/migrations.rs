//! Embedded Diesel migrations.
//!
//! Migrations run over a synchronous `PgConnection`; async callers should
//! wrap these functions in `spawn_blocking`.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations from `backend/migrations`, compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failures raised while applying or reverting migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// The database could not be reached.
    #[error("failed to connect for migrations: {message}")]
    Connection { message: String },
    /// A migration failed to apply or revert.
    #[error("migration failed: {message}")]
    Migration { message: String },
}

fn connect(database_url: &str) -> Result<PgConnection, MigrationError> {
    PgConnection::establish(database_url).map_err(|err| MigrationError::Connection {
        message: err.to_string(),
    })
}

/// Apply every pending migration and return how many ran.
pub fn run_pending_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let mut conn = connect(database_url)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Migration {
            message: err.to_string(),
        })?;
    info!(applied = applied.len(), "database migrations applied");
    Ok(applied.len())
}

/// Drop every table by reverting all migrations, then recreate the schema.
///
/// All users and calculations are lost.
pub fn reset_schema(database_url: &str) -> Result<(), MigrationError> {
    let mut conn = connect(database_url)?;
    let reverted = conn
        .revert_all_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Migration {
            message: err.to_string(),
        })?;
    info!(reverted = reverted.len(), "database migrations reverted");
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Migration {
            message: err.to_string(),
        })?;
    info!(applied = applied.len(), "database schema recreated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::migration::MigrationSource;
    use diesel::pg::Pg;

    #[test]
    fn embeds_users_before_calculations() {
        let migrations = MigrationSource::<Pg>::migrations(&MIGRATIONS).expect("embedded");
        let mut names: Vec<String> = migrations
            .iter()
            .map(|migration| migration.name().to_string())
            .collect();
        names.sort();

        assert_eq!(names.len(), 2);
        assert!(names[0].ends_with("create_users"));
        assert!(names[1].ends_with("create_calculations"));
    }

    #[test]
    fn unreachable_database_is_a_connection_error() {
        let error = run_pending_migrations("not a url").expect_err("invalid url");
        assert!(matches!(error, MigrationError::Connection { .. }));
    }
}
