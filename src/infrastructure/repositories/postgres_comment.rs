// src/infrastructure/repositories/postgres_comment.rs
use super::RepositoryContext;
use super::rows::CommentRow;
use crate::domain::article::ArticleId;
use crate::domain::comment::entity::ensure_same_article;
use crate::domain::comment::{Comment, CommentId, CommentRepository, CommentThread, NewComment};
use crate::domain::errors::{DomainError, DomainResult};
use crate::ports::DomainEvent;
use async_trait::async_trait;
use futures::TryStreamExt;

#[derive(Clone)]
pub struct PostgresCommentRepository {
    ctx: RepositoryContext,
}

impl PostgresCommentRepository {
    pub fn new(ctx: RepositoryContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(&self, comment: NewComment) -> DomainResult<Comment> {
        let draft = comment.validate()?;
        let now = self.ctx.clock.now();

        let row = self
            .ctx
            .db
            .with_transaction(move |tx| {
                Box::pin(async move {
                    // Holds the article against a concurrent delete until commit.
                    let article = tx
                        .query_row(
                            sqlx::query_as::<_, (i64,)>(
                                "SELECT id FROM articles
                                 WHERE id = $1 AND deleted_at IS NULL
                                 FOR SHARE",
                            )
                            .bind(i64::from(draft.article_id)),
                        )
                        .await?;
                    if article.is_none() {
                        return Err(DomainError::not_found(format!(
                            "article {} not found",
                            draft.article_id
                        )));
                    }

                    if let Some(parent_id) = draft.parent_id {
                        let (parent_article,) = tx
                            .query_row(
                                sqlx::query_as::<_, (i64,)>(
                                    "SELECT article_id FROM comments
                                     WHERE id = $1 AND deleted_at IS NULL",
                                )
                                .bind(i64::from(parent_id)),
                            )
                            .await?
                            .ok_or_else(|| {
                                DomainError::not_found(format!(
                                    "parent comment {parent_id} not found"
                                ))
                            })?;
                        ensure_same_article(draft.article_id, ArticleId::new(parent_article)?)?;
                    }

                    let row = tx
                        .query_row(
                            sqlx::query_as::<_, CommentRow>(
                                "INSERT INTO comments (content, article_id, author_id, parent_id,
                                                       created_at, updated_at)
                                 VALUES ($1, $2, $3, $4, $5, $5)
                                 RETURNING id, content, article_id, author_id, parent_id,
                                           created_at, updated_at, deleted_at",
                            )
                            .bind(draft.content.as_str())
                            .bind(i64::from(draft.article_id))
                            .bind(i64::from(draft.author_id))
                            .bind(draft.parent_id.map(i64::from))
                            .bind(now),
                        )
                        .await?
                        .ok_or_else(|| DomainError::Persistence("insert returned no row".into()))?;

                    Ok::<_, DomainError>(row)
                })
            })
            .await?;

        let created = Comment::try_from(row)?;
        self.ctx.emit(&DomainEvent::CommentCreated {
            id: created.id,
            article_id: created.article_id,
            parent_id: created.parent_id,
            at: created.created_at,
        });
        Ok(created)
    }

    async fn get_by_article_id(&self, article_id: ArticleId) -> DomainResult<Vec<Comment>> {
        let rows: Vec<CommentRow> = self
            .ctx
            .db
            .query_rows(
                sqlx::query_as::<_, CommentRow>(
                    "SELECT id, content, article_id, author_id, parent_id,
                            created_at, updated_at, deleted_at
                     FROM comments
                     WHERE article_id = $1 AND deleted_at IS NULL
                     ORDER BY created_at ASC, id ASC",
                )
                .bind(i64::from(article_id)),
            )
            .try_collect()
            .await?;

        rows.into_iter()
            .map(Comment::try_from)
            .collect::<Result<Vec<_>, _>>()
    }

    async fn get_replies(&self, parent_id: CommentId) -> DomainResult<Vec<Comment>> {
        let rows: Vec<CommentRow> = self
            .ctx
            .db
            .query_rows(
                sqlx::query_as::<_, CommentRow>(
                    "SELECT id, content, article_id, author_id, parent_id,
                            created_at, updated_at, deleted_at
                     FROM comments
                     WHERE parent_id = $1 AND deleted_at IS NULL
                     ORDER BY created_at ASC, id ASC",
                )
                .bind(i64::from(parent_id)),
            )
            .try_collect()
            .await?;

        rows.into_iter()
            .map(Comment::try_from)
            .collect::<Result<Vec<_>, _>>()
    }

    async fn get_thread(&self, article_id: ArticleId) -> DomainResult<CommentThread> {
        let comments = self.get_by_article_id(article_id).await?;
        Ok(CommentThread::from_flat(comments))
    }

    async fn delete(&self, id: CommentId) -> DomainResult<()> {
        let now = self.ctx.clock.now();

        self.ctx
            .db
            .with_transaction(move |tx| {
                Box::pin(async move {
                    let (article_id,) = tx
                        .query_row(
                            sqlx::query_as::<_, (i64,)>(
                                "SELECT article_id FROM comments
                                 WHERE id = $1 AND deleted_at IS NULL",
                            )
                            .bind(i64::from(id)),
                        )
                        .await?
                        .ok_or_else(|| DomainError::not_found(format!("comment {id} not found")))?;

                    // Conflicts with the FOR SHARE lock taken by create, so a reply either
                    // commits before the subtree is collected or sees its parent gone.
                    tx.query_row(
                        sqlx::query_as::<_, (i64,)>(
                            "SELECT id FROM articles WHERE id = $1 FOR NO KEY UPDATE",
                        )
                        .bind(article_id),
                    )
                    .await?;

                    // Separate statement: under READ COMMITTED it sees replies committed
                    // while the lock above was awaited.
                    let affected = tx
                        .execute(
                            sqlx::query(
                                r#"
                                WITH RECURSIVE subtree AS (
                                    SELECT id FROM comments
                                    WHERE id = $1 AND deleted_at IS NULL
                                    UNION ALL
                                    SELECT c.id FROM comments c
                                    JOIN subtree s ON c.parent_id = s.id
                                    WHERE c.deleted_at IS NULL
                                )
                                UPDATE comments SET deleted_at = $2, updated_at = $2
                                WHERE id IN (SELECT id FROM subtree)
                                "#,
                            )
                            .bind(i64::from(id))
                            .bind(now),
                        )
                        .await?;

                    if affected == 0 {
                        return Err(DomainError::not_found(format!("comment {id} not found")));
                    }
                    Ok::<_, DomainError>(())
                })
            })
            .await
    }
}
