//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, NewUser, User, UserId, Username};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const UPSERT_BLOCKED_MESSAGE: &str = "username absent but insert skipped by another constraint";

/// Diesel-backed implementation of the [`UserRepository`] port.
///
/// # Examples
///
/// ```rust,no_run
/// use calculator_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = DbPool::new(PoolConfig::new("postgres://localhost/calculator")).await?;
/// let repository = DieselUserRepository::new(pool);
/// # let _ = repository;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::UniqueViolation(constraint) => UserPersistenceError::duplicate(constraint),
        DieselFailure::ForeignKeyViolation(_) => {
            UserPersistenceError::query("unexpected foreign key violation")
        }
        DieselFailure::Query(message) => UserPersistenceError::query(message),
    }
}

fn row_to_user(row: UserRow) -> User {
    User::new(
        UserId::from_db(row.id),
        Username::from_db(row.username),
        EmailAddress::from_db(row.email),
        row.created_at,
    )
}

fn new_user_row(user: &NewUser) -> NewUserRow<'_> {
    NewUserRow {
        username: user.username.as_ref(),
        email: user.email.as_ref(),
        password_hash: user.password_hash.as_ref(),
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(row_to_user))
            .map_err(map_diesel_error)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(row_to_user))
            .map_err(map_diesel_error)
    }

    async fn find_by_username_or_email(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .filter(
                users::username
                    .eq(username.as_ref())
                    .or(users::email.eq(email.as_ref())),
            )
            .order(users::id.asc())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(row_to_user))
            .map_err(map_diesel_error)
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = new_user_row(user);

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::insert_into(users::table)
                    .values(&row)
                    .returning(UserRow::as_returning())
                    .get_result(conn)
                    .await
            }
            .scope_boxed()
        })
        .await
        .map(row_to_user)
        .map_err(map_diesel_error)
    }

    async fn upsert_by_username(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = new_user_row(user);

        let stored = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::insert_into(users::table)
                        .values(&row)
                        .on_conflict_do_nothing()
                        .execute(conn)
                        .await?;

                    users::table
                        .filter(users::username.eq(row.username))
                        .select(UserRow::as_select())
                        .first(conn)
                        .await
                        .optional()
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        stored
            .map(row_to_user)
            .ok_or_else(|| UserPersistenceError::query(UPSERT_BLOCKED_MESSAGE))
    }
}
