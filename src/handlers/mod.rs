//! HTTP handlers: extract request fields, call the service, wrap the result.

pub mod api;
pub mod articles;
pub mod comments;
pub mod topics;
pub mod users;
