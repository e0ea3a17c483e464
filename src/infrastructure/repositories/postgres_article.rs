// src/infrastructure/repositories/postgres_article.rs
use super::RepositoryContext;
use super::postgres_author::{find_by_email_tx, insert_if_absent_tx};
use super::rows::{ArticleAuthorRow, ArticleAuthorViewRow, ArticleRow};
use crate::domain::article::services::derive_slug;
use crate::domain::article::{
    Article, ArticleAuthorView, ArticleContent, ArticleId, ArticleRepository, ArticleSlug,
    ArticleTitle, ArticleWithAuthor, NewArticle, PublishOutcome, ValidatedArticle,
};
use crate::domain::author::{Author, AuthorId, NewAuthor};
use crate::domain::errors::{DomainError, DomainResult};
use crate::ports::DomainEvent;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use sqlx::Postgres;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;

#[derive(Clone)]
pub struct PostgresArticleRepository {
    ctx: RepositoryContext,
}

impl PostgresArticleRepository {
    pub fn new(ctx: RepositoryContext) -> Self {
        Self { ctx }
    }

    fn emit_created(&self, article: &Article) {
        self.ctx.emit(&DomainEvent::ArticleCreated {
            id: article.id,
            author_id: article.author_id,
            slug: article.slug.to_string(),
            at: article.created_at,
        });
    }
}

fn insert_article_query(
    draft: &ValidatedArticle,
    now: DateTime<Utc>,
) -> QueryAs<'_, Postgres, ArticleRow, PgArguments> {
    sqlx::query_as::<_, ArticleRow>(
        "INSERT INTO articles (title, slug, content, published, views, author_id, category_id,
                               created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
         RETURNING id, title, slug, content, published, views, author_id, category_id,
                   created_at, updated_at, deleted_at",
    )
    .bind(draft.title.as_str())
    .bind(draft.slug.as_str())
    .bind(draft.content.as_str())
    .bind(draft.published)
    .bind(draft.views)
    .bind(i64::from(draft.author_id))
    .bind(draft.category_id.map(i64::from))
    .bind(now)
}

fn article_not_found(id: ArticleId) -> DomainError {
    DomainError::not_found(format!("article {id} not found"))
}

#[async_trait]
impl ArticleRepository for PostgresArticleRepository {
    async fn create(&self, article: NewArticle) -> DomainResult<Article> {
        let draft = article.validate(self.ctx.slugger.as_ref())?;
        let now = self.ctx.clock.now();

        let row = self
            .ctx
            .db
            .query_row(insert_article_query(&draft, now))
            .await?
            .ok_or_else(|| DomainError::Persistence("insert returned no row".into()))?;

        let created = Article::try_from(row)?;
        self.emit_created(&created);
        Ok(created)
    }

    async fn get_by_id(&self, id: ArticleId) -> DomainResult<ArticleWithAuthor> {
        let row = self
            .ctx
            .db
            .query_row(
                sqlx::query_as::<_, ArticleAuthorRow>(
                    "SELECT a.id, a.title, a.slug, a.content, a.published, a.views, a.author_id,
                            a.category_id, a.created_at, a.updated_at, a.deleted_at,
                            u.email AS author_email, u.name AS author_name,
                            u.created_at AS author_created_at, u.updated_at AS author_updated_at
                     FROM articles a
                     JOIN authors u ON u.id = a.author_id
                     WHERE a.id = $1 AND a.deleted_at IS NULL",
                )
                .bind(i64::from(id)),
            )
            .await?
            .ok_or_else(|| article_not_found(id))?;

        ArticleWithAuthor::try_from(row)
    }

    async fn get_by_id_including_deleted(&self, id: ArticleId) -> DomainResult<Article> {
        let row = self
            .ctx
            .db
            .query_row(
                sqlx::query_as::<_, ArticleRow>(
                    "SELECT id, title, slug, content, published, views, author_id, category_id,
                            created_at, updated_at, deleted_at
                     FROM articles WHERE id = $1",
                )
                .bind(i64::from(id)),
            )
            .await?
            .ok_or_else(|| article_not_found(id))?;

        Article::try_from(row)
    }

    async fn get_by_slug(&self, slug: &str) -> DomainResult<ArticleWithAuthor> {
        let row = self
            .ctx
            .db
            .query_row(
                sqlx::query_as::<_, ArticleAuthorRow>(
                    "SELECT a.id, a.title, a.slug, a.content, a.published, a.views, a.author_id,
                            a.category_id, a.created_at, a.updated_at, a.deleted_at,
                            u.email AS author_email, u.name AS author_name,
                            u.created_at AS author_created_at, u.updated_at AS author_updated_at
                     FROM articles a
                     JOIN authors u ON u.id = a.author_id
                     WHERE a.slug = $1 AND a.deleted_at IS NULL",
                )
                .bind(slug),
            )
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("article '{slug}' not found"))
            })?;

        ArticleWithAuthor::try_from(row)
    }

    async fn get_by_author_id(&self, author_id: AuthorId) -> DomainResult<Vec<Article>> {
        let rows: Vec<ArticleRow> = self
            .ctx
            .db
            .query_rows(
                sqlx::query_as::<_, ArticleRow>(
                    "SELECT id, title, slug, content, published, views, author_id, category_id,
                            created_at, updated_at, deleted_at
                     FROM articles
                     WHERE author_id = $1 AND deleted_at IS NULL
                     ORDER BY created_at DESC, id DESC",
                )
                .bind(i64::from(author_id)),
            )
            .try_collect()
            .await?;

        rows.into_iter()
            .map(Article::try_from)
            .collect::<Result<Vec<_>, _>>()
    }

    async fn get_published(&self) -> DomainResult<Vec<ArticleWithAuthor>> {
        let rows: Vec<ArticleAuthorRow> = self
            .ctx
            .db
            .query_rows(sqlx::query_as::<_, ArticleAuthorRow>(
                "SELECT a.id, a.title, a.slug, a.content, a.published, a.views, a.author_id,
                        a.category_id, a.created_at, a.updated_at, a.deleted_at,
                        u.email AS author_email, u.name AS author_name,
                        u.created_at AS author_created_at, u.updated_at AS author_updated_at
                 FROM articles a
                 JOIN authors u ON u.id = a.author_id
                 WHERE a.published = TRUE AND a.deleted_at IS NULL
                 ORDER BY a.created_at DESC, a.id DESC",
            ))
            .try_collect()
            .await?;

        rows.into_iter()
            .map(ArticleWithAuthor::try_from)
            .collect::<Result<Vec<_>, _>>()
    }

    async fn update(&self, article: &Article) -> DomainResult<Article> {
        let id = article.id;
        let author_id = article.author_id;
        let category_id = article.category_id.map(i64::from);
        let title = ArticleTitle::new(article.title.as_str())?;
        let content = ArticleContent::new(article.content.as_str())?;
        let now = self.ctx.clock.now();

        let row = self
            .ctx
            .db
            .with_transaction(move |tx| {
                Box::pin(async move {
                    let stored = tx
                        .query_row(
                            sqlx::query_as::<_, (i64,)>(
                                "SELECT author_id FROM articles
                                 WHERE id = $1 AND deleted_at IS NULL
                                 FOR UPDATE",
                            )
                            .bind(i64::from(id)),
                        )
                        .await?;

                    let Some((stored_author,)) = stored else {
                        return Err(article_not_found(id));
                    };
                    if stored_author != i64::from(author_id) {
                        return Err(DomainError::ImmutableFieldViolation(format!(
                            "article {id} belongs to author {stored_author}; \
                             author cannot change to {author_id}"
                        )));
                    }

                    // The slug, publish state and view counter have their own operations.
                    let row = tx
                        .query_row(
                            sqlx::query_as::<_, ArticleRow>(
                                "UPDATE articles
                                 SET title = $1, content = $2, category_id = $3, updated_at = $4
                                 WHERE id = $5
                                 RETURNING id, title, slug, content, published, views, author_id,
                                           category_id, created_at, updated_at, deleted_at",
                            )
                            .bind(title.as_str())
                            .bind(content.as_str())
                            .bind(category_id)
                            .bind(now)
                            .bind(i64::from(id)),
                        )
                        .await?
                        .ok_or_else(|| article_not_found(id))?;

                    Ok::<_, DomainError>(row)
                })
            })
            .await?;

        Article::try_from(row)
    }

    async fn publish(&self, id: ArticleId) -> DomainResult<PublishOutcome> {
        let now = self.ctx.clock.now();

        // Conditional update: of two concurrent callers only one can flip the flag.
        let affected = self
            .ctx
            .db
            .execute(
                sqlx::query(
                    "UPDATE articles SET published = TRUE, updated_at = $2
                     WHERE id = $1 AND published = FALSE AND deleted_at IS NULL",
                )
                .bind(i64::from(id))
                .bind(now),
            )
            .await?;

        if affected > 0 {
            let event = DomainEvent::ArticlePublished { id, at: now };
            self.ctx.emit(&event);
            return Ok(PublishOutcome::Published);
        }

        let exists = self
            .ctx
            .db
            .query_row(
                sqlx::query_as::<_, (bool,)>(
                    "SELECT EXISTS(SELECT 1 FROM articles WHERE id = $1 AND deleted_at IS NULL)",
                )
                .bind(i64::from(id)),
            )
            .await?
            .is_some_and(|(exists,)| exists);

        if exists {
            Ok(PublishOutcome::AlreadyPublished)
        } else {
            Err(article_not_found(id))
        }
    }

    async fn increment_views(&self, id: ArticleId) -> DomainResult<i64> {
        let row = self
            .ctx
            .db
            .query_row(
                sqlx::query_as::<_, (i64,)>(
                    "UPDATE articles SET views = views + 1
                     WHERE id = $1 AND deleted_at IS NULL
                     RETURNING views",
                )
                .bind(i64::from(id)),
            )
            .await?;

        row.map(|(views,)| views)
            .ok_or_else(|| article_not_found(id))
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let now = self.ctx.clock.now();

        self.ctx
            .db
            .with_transaction(move |tx| {
                Box::pin(async move {
                    let affected = tx
                        .execute(
                            sqlx::query(
                                "UPDATE articles SET deleted_at = $2, updated_at = $2
                                 WHERE id = $1 AND deleted_at IS NULL",
                            )
                            .bind(i64::from(id))
                            .bind(now),
                        )
                        .await?;
                    if affected == 0 {
                        return Err(article_not_found(id));
                    }

                    // article_id covers every level of the reply tree.
                    tx.execute(
                        sqlx::query(
                            "UPDATE comments SET deleted_at = $2, updated_at = $2
                             WHERE article_id = $1 AND deleted_at IS NULL",
                        )
                        .bind(i64::from(id))
                        .bind(now),
                    )
                    .await?;

                    Ok::<_, DomainError>(())
                })
            })
            .await
    }

    async fn create_with_author(
        &self,
        author_name: &str,
        author_email: &str,
        title: &str,
        content: &str,
    ) -> DomainResult<ArticleWithAuthor> {
        let author = NewAuthor::new(author_email, author_name).validate()?;
        let title = ArticleTitle::new(title)?;
        let content = ArticleContent::new(content)?;
        let slug = ArticleSlug::new(derive_slug(
            self.ctx.slugger.as_ref(),
            "article",
            title.as_str(),
        ))?;
        let now = self.ctx.clock.now();

        let (resolved, author_created, article) = self
            .ctx
            .db
            .with_transaction(move |tx| {
                Box::pin(async move {
                    let (resolved, created): (Author, bool) =
                        match find_by_email_tx(tx, &author.email).await? {
                            Some(existing) => (existing, false),
                            None => match insert_if_absent_tx(tx, &author, now).await? {
                                Some(inserted) => (inserted, true),
                                // A concurrent transaction committed the same email
                                // between our read and our insert.
                                None => {
                                    let existing = find_by_email_tx(tx, &author.email)
                                        .await?
                                        .ok_or_else(|| {
                                            DomainError::DuplicateKey(format!(
                                                "author with email {} already exists",
                                                author.email
                                            ))
                                        })?;
                                    (existing, false)
                                }
                            },
                        };

                    let draft = ValidatedArticle {
                        author_id: resolved.id,
                        category_id: None,
                        title,
                        slug,
                        content,
                        published: false,
                        views: 0,
                    };
                    let row = tx
                        .query_row(insert_article_query(&draft, now))
                        .await?
                        .ok_or_else(|| DomainError::Persistence("insert returned no row".into()))?;
                    let article = Article::try_from(row)?;

                    Ok::<_, DomainError>((resolved, created, article))
                })
            })
            .await?;

        if author_created {
            self.ctx.emit(&DomainEvent::AuthorCreated {
                id: resolved.id,
                email: resolved.email.to_string(),
                at: resolved.created_at,
            });
        }
        self.emit_created(&article);

        Ok(ArticleWithAuthor {
            article,
            author: resolved,
        })
    }

    async fn get_with_author(&self, id: ArticleId) -> DomainResult<ArticleAuthorView> {
        let row = self
            .ctx
            .db
            .query_row(
                sqlx::query_as::<_, ArticleAuthorViewRow>(
                    "SELECT a.id, a.title, a.slug, a.content, a.published, a.views, a.author_id,
                            a.category_id, a.created_at, a.updated_at, a.deleted_at,
                            u.name AS author_name, u.email AS author_email
                     FROM articles a
                     JOIN authors u ON u.id = a.author_id
                     WHERE a.id = $1 AND a.deleted_at IS NULL",
                )
                .bind(i64::from(id)),
            )
            .await?
            .ok_or_else(|| article_not_found(id))?;

        ArticleAuthorView::try_from(row)
    }
}
