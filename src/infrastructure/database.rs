//! Connection setup and the statement gateway every repository goes through.
use crate::config::AppConfig;
use crate::domain::errors::{DomainError, DomainResult};
use crate::infrastructure::repositories::{map_commit, map_sqlx};
use futures::future::BoxFuture;
use futures::stream::{BoxStream, StreamExt};
use sqlx::postgres::{PgArguments, PgPoolOptions, PgRow};
use sqlx::query::{Query, QueryAs};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use std::future::Future;
use std::time::Duration;

pub async fn init_pool(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    let mut options = config.connect_options().clone();
    if let Some(timeout) = config.statement_timeout() {
        let millis = timeout.as_millis().to_string();
        options = options.options([("statement_timeout", millis)]);
    }

    PgPoolOptions::new()
        .max_connections(config.max_connections())
        .acquire_timeout(config.acquire_timeout())
        .connect_with(options)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Handle to the relational store. Cloning is cheap; all clones share one pool.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs a statement and returns the number of rows it affected.
    pub async fn execute(&self, query: Query<'_, Postgres, PgArguments>) -> DomainResult<u64> {
        query
            .execute(&self.pool)
            .await
            .map(|result| result.rows_affected())
            .map_err(map_sqlx)
    }

    pub async fn query_row<'q, O>(
        &self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> DomainResult<Option<O>>
    where
        O: Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        query.fetch_optional(&self.pool).await.map_err(map_sqlx)
    }

    /// Lazily streams rows. The stream is finite and cannot be restarted.
    pub fn query_rows<'q, O>(
        &'q self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> BoxStream<'q, DomainResult<O>>
    where
        O: Send + Unpin + for<'r> FromRow<'r, PgRow> + 'q,
    {
        query
            .fetch(&self.pool)
            .map(|row| row.map_err(map_sqlx))
            .boxed()
    }

    /// Runs `work` inside a transaction.
    ///
    /// Commits when `work` returns `Ok`, rolls back when it returns `Err`. If the
    /// returned future is dropped before completion the open transaction is
    /// dropped with it, which rolls it back. Errors raised by `work` are returned
    /// unchanged; a failed commit surfaces as `TransactionAborted` unless the
    /// store reported something more specific.
    pub async fn with_transaction<T, F>(&self, work: F) -> DomainResult<T>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut Tx) -> BoxFuture<'c, DomainResult<T>> + Send,
    {
        let inner = self.pool.begin().await.map_err(map_sqlx)?;
        let mut tx = Tx { inner };

        match work(&mut tx).await {
            Ok(value) => {
                tx.inner.commit().await.map_err(map_commit)?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.inner.rollback().await {
                    tracing::warn!(error = %rollback_err, "transaction rollback failed");
                }
                tracing::debug!(error = %err, "transaction rolled back");
                Err(err)
            }
        }
    }
}

/// Transaction-scoped handle passed to units of work.
pub struct Tx {
    inner: Transaction<'static, Postgres>,
}

impl Tx {
    pub async fn execute(&mut self, query: Query<'_, Postgres, PgArguments>) -> DomainResult<u64> {
        query
            .execute(&mut *self.inner)
            .await
            .map(|result| result.rows_affected())
            .map_err(map_sqlx)
    }

    pub async fn query_row<'q, O>(
        &mut self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> DomainResult<Option<O>>
    where
        O: Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        query
            .fetch_optional(&mut *self.inner)
            .await
            .map_err(map_sqlx)
    }

    pub fn query_rows<'q, O>(
        &'q mut self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> BoxStream<'q, DomainResult<O>>
    where
        O: Send + Unpin + for<'r> FromRow<'r, PgRow> + 'q,
    {
        query
            .fetch(&mut *self.inner)
            .map(|row| row.map_err(map_sqlx))
            .boxed()
    }
}

/// Fails with `Cancelled` when `operation` does not finish within `deadline`.
///
/// The operation's future is dropped on expiry, which aborts the in-flight
/// statement and rolls back any transaction it had open.
pub async fn with_deadline<T, F>(deadline: Duration, operation: F) -> DomainResult<T>
where
    F: Future<Output = DomainResult<T>>,
{
    tokio::time::timeout(deadline, operation)
        .await
        .unwrap_or_else(|_| {
            Err(DomainError::Cancelled(format!(
                "deadline of {} ms exceeded",
                deadline.as_millis()
            )))
        })
}
