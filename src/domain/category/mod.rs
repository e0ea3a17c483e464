// src/domain/category/mod.rs
pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{Category, CategoryStats, NewCategory, ValidatedCategory};
pub use repository::CategoryRepository;
pub use value_objects::{CategoryId, CategoryName, CategorySlug};
