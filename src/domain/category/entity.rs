// src/domain/category/entity.rs
use crate::domain::article::services::derive_slug;
use crate::domain::category::value_objects::{CategoryId, CategoryName, CategorySlug};
use crate::domain::errors::ValidationError;
use crate::ports::SlugGenerator;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub slug: CategorySlug,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct ValidatedCategory {
    pub name: CategoryName,
    pub slug: CategorySlug,
    pub description: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Validates the name and derives the slug from it.
    pub fn validate(
        &self,
        slugger: &dyn SlugGenerator,
    ) -> Result<ValidatedCategory, ValidationError> {
        let name = CategoryName::new(&self.name)?;
        let slug = CategorySlug::new(derive_slug(slugger, "category", name.as_str()))?;
        Ok(ValidatedCategory {
            name,
            slug,
            description: self.description.trim().to_string(),
        })
    }
}

/// Per-category reporting row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    pub category_id: CategoryId,
    pub category_name: String,
    pub articles_count: i64,
    pub total_views: i64,
    pub total_comments: i64,
    pub avg_views: f64,
}
