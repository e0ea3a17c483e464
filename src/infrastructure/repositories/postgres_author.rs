// src/infrastructure/repositories/postgres_author.rs
use super::RepositoryContext;
use super::rows::AuthorRow;
use crate::domain::author::{Author, AuthorId, AuthorRepository, Email, NewAuthor, ValidatedAuthor};
use crate::domain::errors::{DomainError, DomainResult};
use crate::infrastructure::database::Tx;
use crate::ports::DomainEvent;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;

#[derive(Clone)]
pub struct PostgresAuthorRepository {
    ctx: RepositoryContext,
}

impl PostgresAuthorRepository {
    pub fn new(ctx: RepositoryContext) -> Self {
        Self { ctx }
    }
}

fn duplicate_email(err: DomainError, email: &Email) -> DomainError {
    match err {
        DomainError::DuplicateKey(_) => {
            DomainError::DuplicateKey(format!("author with email {email} already exists"))
        }
        other => other,
    }
}

pub(super) async fn find_by_email_tx(tx: &mut Tx, email: &Email) -> DomainResult<Option<Author>> {
    let row = tx
        .query_row(
            sqlx::query_as::<_, AuthorRow>(
                "SELECT id, email, name, created_at, updated_at
                 FROM authors WHERE email = $1",
            )
            .bind(email.as_str()),
        )
        .await?;

    row.map(Author::try_from).transpose()
}

/// Inserts the author unless the email is already taken. `None` means another
/// writer owns the email; the caller re-reads it.
pub(super) async fn insert_if_absent_tx(
    tx: &mut Tx,
    author: &ValidatedAuthor,
    now: DateTime<Utc>,
) -> DomainResult<Option<Author>> {
    let row = tx
        .query_row(
            sqlx::query_as::<_, AuthorRow>(
                "INSERT INTO authors (email, name, created_at, updated_at)
                 VALUES ($1, $2, $3, $3)
                 ON CONFLICT (email) DO NOTHING
                 RETURNING id, email, name, created_at, updated_at",
            )
            .bind(author.email.as_str())
            .bind(author.name.as_str())
            .bind(now),
        )
        .await?;

    row.map(Author::try_from).transpose()
}

#[async_trait]
impl AuthorRepository for PostgresAuthorRepository {
    async fn create(&self, author: NewAuthor) -> DomainResult<Author> {
        let ValidatedAuthor { email, name } = author.validate()?;
        let now = self.ctx.clock.now();

        let row = self
            .ctx
            .db
            .query_row(
                sqlx::query_as::<_, AuthorRow>(
                    "INSERT INTO authors (email, name, created_at, updated_at)
                     VALUES ($1, $2, $3, $3)
                     RETURNING id, email, name, created_at, updated_at",
                )
                .bind(email.as_str())
                .bind(name.as_str())
                .bind(now),
            )
            .await
            .map_err(|err| duplicate_email(err, &email))?
            .ok_or_else(|| DomainError::Persistence("insert returned no row".into()))?;

        let created = Author::try_from(row)?;
        self.ctx.emit(&DomainEvent::AuthorCreated {
            id: created.id,
            email: created.email.to_string(),
            at: created.created_at,
        });
        Ok(created)
    }

    async fn get_by_id(&self, id: AuthorId) -> DomainResult<Author> {
        let row = self
            .ctx
            .db
            .query_row(
                sqlx::query_as::<_, AuthorRow>(
                    "SELECT id, email, name, created_at, updated_at
                     FROM authors WHERE id = $1",
                )
                .bind(i64::from(id)),
            )
            .await?
            .ok_or_else(|| DomainError::not_found(format!("author {id} not found")))?;

        Author::try_from(row)
    }

    async fn get_by_email(&self, email: &str) -> DomainResult<Option<Author>> {
        // A malformed address cannot match a stored one.
        let Ok(email) = Email::new(email) else {
            return Ok(None);
        };

        let row = self
            .ctx
            .db
            .query_row(
                sqlx::query_as::<_, AuthorRow>(
                    "SELECT id, email, name, created_at, updated_at
                     FROM authors WHERE email = $1",
                )
                .bind(email.as_str()),
            )
            .await?;

        row.map(Author::try_from).transpose()
    }

    async fn get_all(&self) -> DomainResult<Vec<Author>> {
        let rows: Vec<AuthorRow> = self
            .ctx
            .db
            .query_rows(sqlx::query_as::<_, AuthorRow>(
                "SELECT id, email, name, created_at, updated_at
                 FROM authors ORDER BY id ASC",
            ))
            .try_collect()
            .await?;

        rows.into_iter()
            .map(Author::try_from)
            .collect::<Result<Vec<_>, _>>()
    }

    async fn update(&self, author: &Author) -> DomainResult<Author> {
        let ValidatedAuthor { email, name } = author.validate()?;
        let now = self.ctx.clock.now();

        // RETURNING yields the matched row even when nothing changed, so an
        // empty result can only mean the id does not exist.
        let row = self
            .ctx
            .db
            .query_row(
                sqlx::query_as::<_, AuthorRow>(
                    "UPDATE authors SET email = $1, name = $2, updated_at = $3
                     WHERE id = $4
                     RETURNING id, email, name, created_at, updated_at",
                )
                .bind(email.as_str())
                .bind(name.as_str())
                .bind(now)
                .bind(i64::from(author.id)),
            )
            .await
            .map_err(|err| duplicate_email(err, &email))?
            .ok_or_else(|| {
                DomainError::not_found(format!("author {} not found", author.id))
            })?;

        Author::try_from(row)
    }

    async fn delete(&self, id: AuthorId) -> DomainResult<()> {
        let affected = self
            .ctx
            .db
            .execute(
                sqlx::query("DELETE FROM authors WHERE id = $1")
                    .bind(i64::from(id)),
            )
            .await?;
        if affected == 0 {
            return Err(DomainError::not_found(format!("author {id} not found")));
        }
        Ok(())
    }
}
