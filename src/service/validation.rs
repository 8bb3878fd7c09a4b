//! Request validation: path ids, listing query parameters and JSON bodies.
//!
//! Everything here is pure; a request that fails validation never reaches the store.

use crate::error::AppError;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Page size used when `p` is given without `limit`.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Columns an article listing may be sorted by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortColumn {
    #[default]
    CreatedAt,
    Topic,
    Title,
    Author,
    Votes,
    ArticleId,
}

impl SortColumn {
    pub const ALL: [SortColumn; 6] = [
        SortColumn::CreatedAt,
        SortColumn::Topic,
        SortColumn::Title,
        SortColumn::Author,
        SortColumn::Votes,
        SortColumn::ArticleId,
    ];

    /// Name as accepted in `sort_by` and as the column is called in `articles`.
    pub fn name(self) -> &'static str {
        match self {
            SortColumn::CreatedAt => "created_at",
            SortColumn::Topic => "topic",
            SortColumn::Title => "title",
            SortColumn::Author => "author",
            SortColumn::Votes => "votes",
            SortColumn::ArticleId => "article_id",
        }
    }

    pub fn parse(s: &str) -> Result<Self, AppError> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or(AppError::InvalidSortColumn)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    pub fn parse(s: &str) -> Result<Self, AppError> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Desc)
        } else {
            Err(AppError::InvalidOrder)
        }
    }
}

/// Resolved LIMIT/OFFSET pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

/// Raw `?limit=&p=` query string.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<String>,
    pub p: Option<String>,
}

impl PageParams {
    pub fn resolve(&self) -> Result<Option<Page>, AppError> {
        parse_page(self.limit.as_deref(), self.p.as_deref())
    }
}

/// Raw query string of `GET /api/articles`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ArticleListParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub topic: Option<String>,
    pub limit: Option<String>,
    pub p: Option<String>,
}

/// A validated article listing request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArticleQuery {
    pub sort_by: SortColumn,
    pub order: SortOrder,
    pub topic: Option<String>,
    pub page: Option<Page>,
}

impl ArticleQuery {
    pub fn from_params(params: &ArticleListParams) -> Result<Self, AppError> {
        let sort_by = match non_empty(params.sort_by.as_deref()) {
            Some(s) => SortColumn::parse(s)?,
            None => SortColumn::default(),
        };
        let order = match non_empty(params.order.as_deref()) {
            Some(s) => SortOrder::parse(s)?,
            None => SortOrder::default(),
        };
        let page = parse_page(params.limit.as_deref(), params.p.as_deref())?;
        Ok(ArticleQuery {
            sort_by,
            order,
            topic: non_empty(params.topic.as_deref()).map(str::to_string),
            page,
        })
    }
}

fn non_empty(v: Option<&str>) -> Option<&str> {
    v.filter(|s| !s.is_empty())
}

fn parse_count(v: Option<&str>) -> Result<Option<i64>, AppError> {
    let Some(s) = non_empty(v) else {
        return Ok(None);
    };
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::InvalidLimitOrPage);
    }
    s.parse::<i64>()
        .map(Some)
        .map_err(|_| AppError::InvalidLimitOrPage)
}

/// `limit` alone: first `limit` rows. `p` (1-based) skips `limit * (p - 1)` rows,
/// with `limit` defaulting to [`DEFAULT_PAGE_SIZE`]. `p=0` reads as page 1.
pub fn parse_page(limit: Option<&str>, p: Option<&str>) -> Result<Option<Page>, AppError> {
    let limit = parse_count(limit)?;
    let page = parse_count(p)?;
    match (limit, page) {
        (None, None) => Ok(None),
        (Some(limit), None) => Ok(Some(Page { limit, offset: 0 })),
        (limit, Some(page)) => {
            let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);
            let offset = limit
                .checked_mul(page.saturating_sub(1))
                .ok_or(AppError::InvalidLimitOrPage)?;
            Ok(Some(Page { limit, offset }))
        }
    }
}

/// Article and comment ids are positive integers.
pub fn parse_id(s: &str) -> Result<i32, AppError> {
    match s.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::InvalidId),
    }
}

pub fn body_object(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest),
    }
}

/// A required, non-empty string field. Anything else is a bad request.
pub fn required_str(body: &Map<String, Value>, field: &str) -> Result<String, AppError> {
    match body.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        _ => Err(AppError::BadRequest),
    }
}

pub fn optional_str(body: &Map<String, Value>, field: &str) -> Result<Option<String>, AppError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(AppError::BadRequest),
    }
}

/// `inc_votes` as a signed delta. Integer strings are accepted like the store would coerce them.
pub fn parse_inc_votes(body: &Map<String, Value>) -> Result<i32, AppError> {
    match body.get("inc_votes") {
        None | Some(Value::Null) => Err(AppError::MissingField("inc_votes")),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or(AppError::InvalidValue),
        Some(Value::String(s)) => s.trim().parse::<i32>().map_err(|_| AppError::InvalidValue),
        Some(_) => Err(AppError::InvalidValue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> ArticleListParams {
        let mut p = ArticleListParams::default();
        for (k, v) in pairs {
            let v = Some(v.to_string());
            match *k {
                "sort_by" => p.sort_by = v,
                "order" => p.order = v,
                "topic" => p.topic = v,
                "limit" => p.limit = v,
                "p" => p.p = v,
                other => panic!("unknown param {other}"),
            }
        }
        p
    }

    fn obj(v: Value) -> Map<String, Value> {
        body_object(v).unwrap()
    }

    #[test]
    fn defaults_to_created_at_desc_unpaged() {
        let q = ArticleQuery::from_params(&ArticleListParams::default()).unwrap();
        assert_eq!(q.sort_by, SortColumn::CreatedAt);
        assert_eq!(q.order, SortOrder::Desc);
        assert_eq!(q.topic, None);
        assert_eq!(q.page, None);
    }

    #[test]
    fn sort_by_accepts_every_allowed_column_in_any_case() {
        for c in SortColumn::ALL {
            assert_eq!(SortColumn::parse(c.name()).unwrap(), c);
            assert_eq!(SortColumn::parse(&c.name().to_uppercase()).unwrap(), c);
        }
        assert!(matches!(
            SortColumn::parse("body"),
            Err(AppError::InvalidSortColumn)
        ));
        assert!(matches!(
            SortColumn::parse("votes; DROP TABLE articles"),
            Err(AppError::InvalidSortColumn)
        ));
    }

    #[test]
    fn order_is_case_insensitive() {
        assert_eq!(SortOrder::parse("asc").unwrap(), SortOrder::Asc);
        assert_eq!(SortOrder::parse("ASC").unwrap(), SortOrder::Asc);
        assert_eq!(SortOrder::parse("Desc").unwrap(), SortOrder::Desc);
        assert!(matches!(SortOrder::parse("up"), Err(AppError::InvalidOrder)));
    }

    #[test]
    fn empty_values_read_as_absent() {
        let q = ArticleQuery::from_params(&params(&[
            ("sort_by", ""),
            ("order", ""),
            ("topic", ""),
            ("limit", ""),
        ]))
        .unwrap();
        assert_eq!(q, ArticleQuery::default());
    }

    #[test]
    fn pagination_combinations() {
        assert_eq!(parse_page(None, None).unwrap(), None);
        assert_eq!(
            parse_page(Some("8"), None).unwrap(),
            Some(Page { limit: 8, offset: 0 })
        );
        assert_eq!(
            parse_page(Some("2"), Some("2")).unwrap(),
            Some(Page { limit: 2, offset: 2 })
        );
        assert_eq!(
            parse_page(None, Some("2")).unwrap(),
            Some(Page {
                limit: 10,
                offset: 10
            })
        );
        assert_eq!(
            parse_page(Some("5"), Some("0")).unwrap(),
            Some(Page { limit: 5, offset: 0 })
        );
    }

    #[test]
    fn non_digit_limit_or_page_is_rejected() {
        for (limit, p) in [
            (Some("hello"), None),
            (None, Some("hi")),
            (Some("-1"), None),
            (Some("2"), Some("1.5")),
            (Some("99999999999999999999"), None),
            (Some("9223372036854775807"), Some("3")),
        ] {
            assert!(
                matches!(parse_page(limit, p), Err(AppError::InvalidLimitOrPage)),
                "{limit:?} {p:?}"
            );
        }
    }

    #[test]
    fn ids_must_be_positive_integers() {
        assert_eq!(parse_id("1").unwrap(), 1);
        assert_eq!(parse_id("100000").unwrap(), 100000);
        for bad in ["lol", "", "0", "-3", "1.0", "99999999999"] {
            assert!(matches!(parse_id(bad), Err(AppError::InvalidId)), "{bad}");
        }
    }

    #[test]
    fn inc_votes_parsing() {
        assert_eq!(parse_inc_votes(&obj(json!({"inc_votes": 100}))).unwrap(), 100);
        assert_eq!(parse_inc_votes(&obj(json!({"inc_votes": -15}))).unwrap(), -15);
        assert_eq!(parse_inc_votes(&obj(json!({"inc_votes": "7"}))).unwrap(), 7);
        assert!(matches!(
            parse_inc_votes(&obj(json!({"username": "x"}))),
            Err(AppError::MissingField("inc_votes"))
        ));
        assert!(matches!(
            parse_inc_votes(&obj(json!({"inc_votes": null}))),
            Err(AppError::MissingField(_))
        ));
        for bad in [json!("hello"), json!(1.5), json!(true), json!([1])] {
            assert!(matches!(
                parse_inc_votes(&obj(json!({ "inc_votes": bad }))),
                Err(AppError::InvalidValue)
            ));
        }
    }

    #[test]
    fn required_strings() {
        let body = obj(json!({"slug": "friday", "description": "", "n": 3}));
        assert_eq!(required_str(&body, "slug").unwrap(), "friday");
        assert!(matches!(required_str(&body, "description"), Err(AppError::BadRequest)));
        assert!(matches!(required_str(&body, "n"), Err(AppError::BadRequest)));
        assert!(matches!(required_str(&body, "missing"), Err(AppError::BadRequest)));
        assert!(body_object(json!([1, 2])).is_err());
    }

    #[test]
    fn optional_strings() {
        let body = obj(json!({"a": "x", "b": null, "c": 1, "d": ""}));
        assert_eq!(optional_str(&body, "a").unwrap().as_deref(), Some("x"));
        assert_eq!(optional_str(&body, "b").unwrap(), None);
        assert_eq!(optional_str(&body, "d").unwrap(), None);
        assert_eq!(optional_str(&body, "zzz").unwrap(), None);
        assert!(optional_str(&body, "c").is_err());
    }
}
