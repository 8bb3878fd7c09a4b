//! Typed errors and HTTP mapping.

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Postgres SQLSTATE codes that mean the request carried bad input rather than
/// the server failing: invalid text representation, numeric out of range,
/// not-null, foreign-key and unique violations.
const CLIENT_SQLSTATES: &[&str] = &["22P02", "22003", "23502", "23503", "23505"];

/// Resource kinds that can be looked up by a well-formed identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Topic,
    Article,
    Comment,
    User,
}

impl Resource {
    fn missing_message(self) -> &'static str {
        match self {
            Resource::Topic => "Topic does not exist",
            Resource::Article => "Article does not exist",
            Resource::Comment => "Comment does not exist",
            Resource::User => "Username does not exist",
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid sort_by query")]
    InvalidSortColumn,
    #[error("Invalid order query")]
    InvalidOrder,
    #[error("Bad request")]
    InvalidLimitOrPage,
    #[error("Bad request")]
    InvalidId,
    #[error("Bad request")]
    InvalidValue,
    #[error("No {0} specified")]
    MissingField(&'static str),
    /// Missing or dangling reference on write, malformed body.
    #[error("Bad request")]
    BadRequest,
    #[error("{}", .0.missing_message())]
    NotFound(Resource),
    #[error("Invalid path")]
    InvalidPath,
    #[error("Payload too large")]
    PayloadTooLarge,
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("internal: {0}")]
    Internal(String),
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected query string");
        AppError::BadRequest
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub msg: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidSortColumn
            | AppError::InvalidOrder
            | AppError::InvalidLimitOrPage
            | AppError::InvalidId
            | AppError::InvalidValue
            | AppError::MissingField(_)
            | AppError::BadRequest => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::InvalidPath => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Db(e) => {
                if is_client_db_error(e) {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message written to the client. Store and internal failures never leak
    /// their details.
    pub fn message(&self) -> String {
        match self {
            AppError::Db(_) | AppError::Internal(_) => {
                if self.status().is_client_error() {
                    "Bad request".to_string()
                } else {
                    "Internal server error".to_string()
                }
            }
            _ => self.to_string(),
        }
    }
}

fn is_client_db_error(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db) => db
            .code()
            .map(|code| CLIENT_SQLSTATES.contains(&code.as_ref()))
            .unwrap_or(false),
        _ => false,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }
        let body = ErrorBody {
            msg: self.message(),
        };
        (status, Json(body)).into_response()
    }
}
