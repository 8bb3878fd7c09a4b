//! Builds the parameterized SELECTs whose shape depends on the request.

use crate::service::{ArticleQuery, Page, SortColumn};
use crate::sql::params::SqlParam;

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: impl Into<SqlParam>) -> usize {
        self.params.push(v.into());
        self.params.len()
    }

    fn push_page(&mut self, page: Option<Page>) {
        if let Some(page) = page {
            let limit = self.push_param(page.limit);
            let offset = self.push_param(page.offset);
            self.sql
                .push_str(&format!(" LIMIT ${} OFFSET ${}", limit, offset));
        }
    }
}

/// Article columns without the body.
const SUMMARY_COLUMNS: &str = "articles.article_id, articles.title, articles.topic, articles.author, \
     articles.created_at, articles.votes, articles.article_img_url";

/// Every article column.
pub const ARTICLE_COLUMNS: &str = "articles.article_id, articles.title, articles.topic, articles.author, \
     articles.body, articles.created_at, articles.votes, articles.article_img_url";

pub const COMMENT_COLUMNS: &str = "comment_id, body, article_id, author, votes, created_at";

/// Qualified column for ORDER BY. Never derived from request text.
fn sort_column_sql(c: SortColumn) -> &'static str {
    match c {
        SortColumn::CreatedAt => "articles.created_at",
        SortColumn::Topic => "articles.topic",
        SortColumn::Title => "articles.title",
        SortColumn::Author => "articles.author",
        SortColumn::Votes => "articles.votes",
        SortColumn::ArticleId => "articles.article_id",
    }
}

/// Article listing: comment counts via right join, optional case-insensitive
/// topic filter, ORDER BY the chosen column (article_id breaks ties), optional page.
pub fn select_articles(query: &ArticleQuery) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {}, COUNT(comments.comment_id) AS comment_count \
         FROM comments RIGHT JOIN articles ON comments.article_id = articles.article_id",
        SUMMARY_COLUMNS
    );
    if let Some(topic) = &query.topic {
        let n = q.push_param(topic.as_str());
        q.sql
            .push_str(&format!(" WHERE LOWER(articles.topic) = LOWER(${})", n));
    }
    let direction = query.order.keyword();
    q.sql.push_str(&format!(
        " GROUP BY articles.article_id ORDER BY {} {}",
        sort_column_sql(query.sort_by),
        direction
    ));
    if query.sort_by != SortColumn::ArticleId {
        q.sql
            .push_str(&format!(", articles.article_id {}", direction));
    }
    q.push_page(query.page);
    q
}

/// One article with its comment count.
pub fn select_article_by_id(article_id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(article_id);
    q.sql = format!(
        "SELECT {}, COUNT(comments.comment_id) AS comment_count \
         FROM articles LEFT JOIN comments ON comments.article_id = articles.article_id \
         WHERE articles.article_id = ${} GROUP BY articles.article_id",
        ARTICLE_COLUMNS, n
    );
    q
}

/// Comments of one article, newest first, optionally paged.
pub fn select_comments_for_article(article_id: i32, page: Option<Page>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(article_id);
    q.sql = format!(
        "SELECT {} FROM comments WHERE article_id = ${} ORDER BY created_at DESC, comment_id DESC",
        COMMENT_COLUMNS, n
    );
    q.push_page(page);
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::SortOrder;

    #[test]
    fn default_listing_sorts_by_created_at_desc_without_params() {
        let q = select_articles(&ArticleQuery::default());
        assert!(q.params.is_empty());
        assert!(!q.sql.contains("WHERE"));
        assert!(!q.sql.contains("articles.body"));
        assert!(q.sql.contains("RIGHT JOIN articles"));
        assert!(q.sql.ends_with(
            "GROUP BY articles.article_id ORDER BY articles.created_at DESC, articles.article_id DESC"
        ));
    }

    #[test]
    fn topic_is_bound_not_interpolated() {
        let q = select_articles(&ArticleQuery {
            topic: Some("Mitch'; --".into()),
            ..Default::default()
        });
        assert!(q.sql.contains("WHERE LOWER(articles.topic) = LOWER($1)"));
        assert!(!q.sql.contains("Mitch"));
        assert_eq!(q.params, vec![SqlParam::Text("Mitch'; --".into())]);
    }

    #[test]
    fn page_numbers_follow_topic_param() {
        let q = select_articles(&ArticleQuery {
            sort_by: SortColumn::ArticleId,
            order: SortOrder::Asc,
            topic: Some("mitch".into()),
            page: Some(Page { limit: 2, offset: 4 }),
        });
        assert!(q
            .sql
            .ends_with("ORDER BY articles.article_id ASC LIMIT $2 OFFSET $3"));
        assert_eq!(
            q.params,
            vec![
                SqlParam::Text("mitch".into()),
                SqlParam::Int(2),
                SqlParam::Int(4)
            ]
        );
    }

    #[test]
    fn every_sort_column_maps_to_an_articles_column() {
        for c in SortColumn::ALL {
            let q = select_articles(&ArticleQuery {
                sort_by: c,
                order: SortOrder::Asc,
                ..Default::default()
            });
            assert!(q
                .sql
                .contains(&format!("ORDER BY articles.{} ASC", c.name())));
        }
    }

    #[test]
    fn article_by_id_counts_comments() {
        let q = select_article_by_id(3);
        assert!(q.sql.contains("articles.body"));
        assert!(q.sql.contains("COUNT(comments.comment_id) AS comment_count"));
        assert!(q.sql.contains("WHERE articles.article_id = $1"));
        assert_eq!(q.params, vec![SqlParam::Int(3)]);
    }

    #[test]
    fn comments_are_newest_first_and_pageable() {
        let q = select_comments_for_article(1, Some(Page { limit: 10, offset: 0 }));
        assert!(q
            .sql
            .contains("ORDER BY created_at DESC, comment_id DESC LIMIT $2 OFFSET $3"));
        assert_eq!(
            q.params,
            vec![SqlParam::Int(1), SqlParam::Int(10), SqlParam::Int(0)]
        );
        let q = select_comments_for_article(1, None);
        assert!(!q.sql.contains("LIMIT"));
    }
}
