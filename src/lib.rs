//! Persistence and domain layer for a publishing platform.
//!
//! Authors, categories, articles and threaded comments live in PostgreSQL.
//! Each entity has a repository trait in [`domain`] and a Postgres
//! implementation in [`infrastructure::repositories`]; every statement goes
//! through the [`infrastructure::database::Database`] gateway.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ports;
