pub mod article;
pub mod author;
pub mod category;
pub mod comment;
pub mod errors;
