// src/infrastructure/repositories/postgres_category.rs
use super::RepositoryContext;
use super::rows::{CategoryRow, CategoryStatsRow};
use crate::domain::category::{
    Category, CategoryId, CategoryRepository, CategoryStats, NewCategory, ValidatedCategory,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::ports::DomainEvent;
use async_trait::async_trait;
use futures::TryStreamExt;

#[derive(Clone)]
pub struct PostgresCategoryRepository {
    ctx: RepositoryContext,
}

impl PostgresCategoryRepository {
    pub fn new(ctx: RepositoryContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn create(&self, category: NewCategory) -> DomainResult<Category> {
        let ValidatedCategory {
            name,
            slug,
            description,
        } = category.validate(self.ctx.slugger.as_ref())?;
        let now = self.ctx.clock.now();

        let row = self
            .ctx
            .db
            .query_row(
                sqlx::query_as::<_, CategoryRow>(
                    "INSERT INTO categories (name, slug, description, created_at, updated_at)
                     VALUES ($1, $2, $3, $4, $4)
                     RETURNING id, name, slug, description, created_at, updated_at",
                )
                .bind(name.as_str())
                .bind(slug.as_str())
                .bind(description.as_str())
                .bind(now),
            )
            .await?
            .ok_or_else(|| DomainError::Persistence("insert returned no row".into()))?;

        let created = Category::try_from(row)?;
        self.ctx.emit(&DomainEvent::CategoryCreated {
            id: created.id,
            slug: created.slug.to_string(),
            at: created.created_at,
        });
        Ok(created)
    }

    async fn get_all(&self) -> DomainResult<Vec<Category>> {
        let rows: Vec<CategoryRow> = self
            .ctx
            .db
            .query_rows(sqlx::query_as::<_, CategoryRow>(
                "SELECT id, name, slug, description, created_at, updated_at
                 FROM categories ORDER BY created_at DESC, id DESC",
            ))
            .try_collect()
            .await?;

        rows.into_iter()
            .map(Category::try_from)
            .collect::<Result<Vec<_>, _>>()
    }

    async fn get_by_id(&self, id: CategoryId) -> DomainResult<Category> {
        let row = self
            .ctx
            .db
            .query_row(
                sqlx::query_as::<_, CategoryRow>(
                    "SELECT id, name, slug, description, created_at, updated_at
                     FROM categories WHERE id = $1",
                )
                .bind(i64::from(id)),
            )
            .await?
            .ok_or_else(|| DomainError::not_found("category not found"))?;

        Category::try_from(row)
    }

    async fn get_by_slug(&self, slug: &str) -> DomainResult<Category> {
        let row = self
            .ctx
            .db
            .query_row(
                sqlx::query_as::<_, CategoryRow>(
                    "SELECT id, name, slug, description, created_at, updated_at
                     FROM categories WHERE slug = $1",
                )
                .bind(slug),
            )
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("category '{slug}' not found"))
            })?;

        Category::try_from(row)
    }

    async fn delete(&self, id: CategoryId) -> DomainResult<()> {
        let affected = self
            .ctx
            .db
            .execute(
                sqlx::query("DELETE FROM categories WHERE id = $1")
                    .bind(i64::from(id)),
            )
            .await?;
        if affected == 0 {
            return Err(DomainError::not_found("category not found"));
        }
        Ok(())
    }

    async fn get_with_article_counts(&self) -> DomainResult<Vec<CategoryStats>> {
        // Comments are counted per article first; joining them directly would
        // repeat each article's views once per comment.
        let rows: Vec<CategoryStatsRow> = self
            .ctx
            .db
            .query_rows(sqlx::query_as::<_, CategoryStatsRow>(
                r#"
                SELECT
                    c.id AS category_id,
                    c.name AS category_name,
                    COUNT(a.id) AS articles_count,
                    COALESCE(SUM(a.views), 0)::BIGINT AS total_views,
                    COALESCE(SUM(cc.comment_count), 0)::BIGINT AS total_comments,
                    COALESCE(AVG(a.views), 0)::DOUBLE PRECISION AS avg_views
                FROM categories c
                LEFT JOIN articles a
                    ON a.category_id = c.id AND a.deleted_at IS NULL
                LEFT JOIN (
                    SELECT article_id, COUNT(*) AS comment_count
                    FROM comments
                    WHERE deleted_at IS NULL
                    GROUP BY article_id
                ) cc ON cc.article_id = a.id
                GROUP BY c.id, c.name
                ORDER BY articles_count DESC, c.id ASC
                "#,
            ))
            .try_collect()
            .await?;

        rows.into_iter()
            .map(CategoryStats::try_from)
            .collect::<Result<Vec<_>, _>>()
    }
}
