//! Resource models: validate request input, call the store, shape the result.

mod articles;
mod comments;
mod endpoints;
mod existence;
mod topics;
mod users;
mod validation;

pub use articles::ArticleService;
pub use comments::CommentService;
pub use endpoints::load_catalog;
pub use existence::{ensure_article_exists, ensure_topic_exists};
pub use topics::TopicService;
pub use users::UserService;
pub use validation::*;
