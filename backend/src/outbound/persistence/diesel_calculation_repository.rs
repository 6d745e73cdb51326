//! PostgreSQL-backed `CalculationRepository` implementation using Diesel ORM.
//!
//! Each record is an `INSERT ... RETURNING` inside its own transaction, so a
//! row is either fully committed or absent. A missing owner shows up as a foreign key violation
//! and is reported as [`CalculationPersistenceError::UserNotFound`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::warn;

use crate::domain::operations::Operation;
use crate::domain::ports::{CalculationPersistenceError, CalculationRepository};
use crate::domain::{Calculation, CalculationId, NewCalculation, Operands, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{CalculationRow, NewCalculationRow};
use super::pool::{DbPool, PoolError};
use super::schema::calculations;

/// Diesel-backed implementation of the [`CalculationRepository`] port.
#[derive(Clone)]
pub struct DieselCalculationRepository {
    pool: DbPool,
}

impl DieselCalculationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CalculationPersistenceError {
    CalculationPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, user_id: i64) -> CalculationPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => CalculationPersistenceError::connection(message),
        DieselFailure::ForeignKeyViolation(_) => CalculationPersistenceError::user_not_found(user_id),
        DieselFailure::UniqueViolation(_) => {
            CalculationPersistenceError::query("unexpected unique violation")
        }
        DieselFailure::Query(message) => CalculationPersistenceError::query(message),
    }
}

fn map_read_error(error: diesel::result::Error) -> CalculationPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => CalculationPersistenceError::connection(message),
        DieselFailure::ForeignKeyViolation(constraint)
        | DieselFailure::UniqueViolation(constraint) => {
            CalculationPersistenceError::query(format!("unexpected constraint violation: {constraint}"))
        }
        DieselFailure::Query(message) => CalculationPersistenceError::query(message),
    }
}

fn row_to_calculation(row: CalculationRow) -> Result<Calculation, CalculationPersistenceError> {
    let operation = row.operation.parse::<Operation>().map_err(|err| {
        warn!(calculation_id = row.id, "unrecognised operation in calculations row");
        CalculationPersistenceError::query(format!("corrupt calculation row: {err}"))
    })?;

    Ok(Calculation {
        id: CalculationId::from_db(row.id),
        operation,
        operands: Operands::new(row.operand_a, row.operand_b),
        result: row.result,
        timestamp: row.timestamp,
        user_id: UserId::from_db(row.user_id),
    })
}

#[async_trait]
impl CalculationRepository for DieselCalculationRepository {
    async fn record(
        &self,
        calculation: &NewCalculation,
    ) -> Result<Calculation, CalculationPersistenceError> {
        let evaluation = calculation.evaluation();
        let operands = evaluation.operands();
        let user_id = calculation.user_id().get();
        let row = NewCalculationRow {
            operation: evaluation.operation().as_str(),
            operand_a: operands.x,
            operand_b: operands.y,
            result: evaluation.result(),
            user_id,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let stored = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::insert_into(calculations::table)
                        .values(&row)
                        .returning(CalculationRow::as_returning())
                        .get_result(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_diesel_error(err, user_id))?;

        row_to_calculation(stored)
    }

    async fn find_by_id(
        &self,
        id: CalculationId,
    ) -> Result<Option<Calculation>, CalculationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        calculations::table
            .find(id.get())
            .select(CalculationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?
            .map(row_to_calculation)
            .transpose()
    }
}
