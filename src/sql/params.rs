//! Values bound to composed statements.

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;

/// A bind parameter of a composed statement. Only the shapes the listing
/// queries need: bigint counts and text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SqlParam {
    Int(i64),
    Text(String),
}

impl From<i64> for SqlParam {
    fn from(n: i64) -> Self {
        SqlParam::Int(n)
    }
}

impl From<i32> for SqlParam {
    fn from(n: i32) -> Self {
        SqlParam::Int(n.into())
    }
}

impl From<&str> for SqlParam {
    fn from(s: &str) -> Self {
        SqlParam::Text(s.to_string())
    }
}

/// Bind `params` in order, so `$1` receives `params[0]`.
pub fn bind_params<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    params: &'q [SqlParam],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for p in params {
        query = match p {
            SqlParam::Int(n) => query.bind(*n),
            SqlParam::Text(s) => query.bind(s.as_str()),
        };
    }
    query
}
