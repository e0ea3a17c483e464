// src/domain/comment/mod.rs
pub mod entity;
pub mod repository;
pub mod thread;
pub mod value_objects;

pub use entity::{Comment, NewComment, ValidatedComment};
pub use repository::CommentRepository;
pub use thread::CommentThread;
pub use value_objects::{CommentContent, CommentId};
