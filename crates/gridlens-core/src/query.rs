//! Browsing query composition.
//!
//! [`build_queries`] turns browsing intent into a row query and a count query
//! over the same filter. Queries are kept as structure (table, filter, order,
//! page) and only rendered to SQL by [`SelectQuery::statement`], which quotes
//! every identifier and binds the search needle as a parameter.

use std::fmt::Write as _;

use crate::error::QueryError;
use crate::model::{Column, SortDirection, SortSpec};

/// A bound parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Text(String),
    Integer(i64),
}

/// SQL text plus positional parameters, ready for an executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl Statement {
    /// Ad-hoc SQL, passed through untouched.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }
}

/// Case-sensitive substring match of `needle` against any of `columns`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub columns: Vec<String>,
    pub needle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    AllColumns,
    Count,
}

/// One SELECT, described by its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    pub table: String,
    pub projection: Projection,
    pub filter: Option<SearchFilter>,
    pub order: Option<OrderBy>,
    pub page: Option<Pagination>,
}

/// Row query and count query built from the same browsing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPair {
    pub rows: SelectQuery,
    pub count: SelectQuery,
}

/// Build the row/count query pair for one browsing request.
///
/// `page` is 1-based; 0 is treated as 1. An empty `columns` list disables the
/// search filter instead of producing an empty predicate. The sort column must
/// be one of `columns` when the column list is known.
pub fn build_queries(
    table: &str,
    columns: &[Column],
    search: &str,
    sort: Option<&SortSpec>,
    page: u32,
    page_size: u32,
) -> Result<QueryPair, QueryError> {
    if table.is_empty() {
        return Err(QueryError::EmptyTableName);
    }
    if page_size == 0 {
        return Err(QueryError::InvalidPageSize);
    }

    let filter = if search.is_empty() || columns.is_empty() {
        None
    } else {
        Some(SearchFilter {
            columns: columns.iter().map(|c| c.name.clone()).collect(),
            needle: search.to_string(),
        })
    };

    let order = match sort {
        Some(spec) => {
            if !columns.is_empty() && !columns.iter().any(|c| c.name == spec.column) {
                return Err(QueryError::UnknownColumn {
                    table: table.to_string(),
                    column: spec.column.clone(),
                });
            }
            Some(OrderBy {
                column: spec.column.clone(),
                direction: spec.direction,
            })
        }
        None => None,
    };

    let offset = u64::from(page.max(1) - 1) * u64::from(page_size);

    Ok(QueryPair {
        rows: SelectQuery {
            table: table.to_string(),
            projection: Projection::AllColumns,
            filter: filter.clone(),
            order,
            page: Some(Pagination {
                limit: page_size,
                offset,
            }),
        },
        count: SelectQuery {
            table: table.to_string(),
            projection: Projection::Count,
            filter,
            order: None,
            page: None,
        },
    })
}

/// Quote an identifier for SQLite, doubling embedded quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

impl SelectQuery {
    /// Render to SQL with bound parameters.
    ///
    /// Parameter layout: `?1` is the search needle (reused by every predicate),
    /// followed by limit and offset when paginated.
    pub fn statement(&self) -> Statement {
        let mut sql = String::from("SELECT ");
        let mut params = Vec::new();

        match self.projection {
            Projection::AllColumns => sql.push('*'),
            Projection::Count => sql.push_str("COUNT(*)"),
        }
        let _ = write!(sql, " FROM {}", quote_ident(&self.table));

        if let Some(filter) = &self.filter {
            params.push(SqlParam::Text(filter.needle.clone()));
            let predicates: Vec<String> = filter
                .columns
                .iter()
                .map(|col| format!("instr(CAST({} AS TEXT), ?1) > 0", quote_ident(col)))
                .collect();
            let _ = write!(sql, " WHERE {}", predicates.join(" OR "));
        }

        if let Some(order) = &self.order {
            let _ = write!(
                sql,
                " ORDER BY {} {}",
                quote_ident(&order.column),
                order.direction.sql_keyword()
            );
        }

        if let Some(page) = self.page {
            let limit_idx = params.len() + 1;
            let _ = write!(sql, " LIMIT ?{} OFFSET ?{}", limit_idx, limit_idx + 1);
            params.push(SqlParam::Integer(i64::from(page.limit)));
            params.push(SqlParam::Integer(
                i64::try_from(page.offset).unwrap_or(i64::MAX),
            ));
        }

        Statement { sql, params }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<Column> {
        names.iter().map(|n| Column::named(*n)).collect()
    }

    #[test]
    fn test_empty_search_has_no_predicate() {
        let pair = build_queries("users", &cols(&["name", "email"]), "", None, 1, 50).unwrap();
        assert!(pair.rows.filter.is_none());
        assert!(pair.count.filter.is_none());

        let rows = pair.rows.statement();
        let count = pair.count.statement();
        assert!(!rows.sql.contains("WHERE"));
        assert!(!count.sql.contains("WHERE"));
        assert_eq!(rows.sql, "SELECT * FROM \"users\" LIMIT ?1 OFFSET ?2");
        assert_eq!(count.sql, "SELECT COUNT(*) FROM \"users\"");
        assert_eq!(rows.params, vec![SqlParam::Integer(50), SqlParam::Integer(0)]);
        assert!(count.params.is_empty());
    }

    #[test]
    fn test_search_is_disjunctive_and_shared() {
        let pair =
            build_queries("users", &cols(&["name", "email"]), "bob", None, 1, 50).unwrap();
        assert_eq!(pair.rows.filter, pair.count.filter);

        let expected_where = "WHERE instr(CAST(\"name\" AS TEXT), ?1) > 0 \
                              OR instr(CAST(\"email\" AS TEXT), ?1) > 0";
        let rows = pair.rows.statement();
        let count = pair.count.statement();
        assert!(rows.sql.contains(expected_where));
        assert!(count.sql.contains(expected_where));
        assert_eq!(rows.params[0], SqlParam::Text("bob".to_string()));
        assert_eq!(count.params, vec![SqlParam::Text("bob".to_string())]);
        // the needle is bound, never spliced in
        assert!(!rows.sql.contains("bob"));
    }

    #[test]
    fn test_search_without_columns_is_ignored() {
        let pair = build_queries("users", &[], "bob", None, 1, 50).unwrap();
        assert!(pair.rows.filter.is_none());
        assert!(!pair.count.statement().sql.contains("WHERE"));
    }

    #[test]
    fn test_sort_only_on_row_query() {
        let sort = SortSpec::descending("email");
        let pair =
            build_queries("users", &cols(&["name", "email"]), "", Some(&sort), 1, 50).unwrap();
        assert!(pair.rows.statement().sql.contains("ORDER BY \"email\" DESC"));
        assert!(pair.count.order.is_none());
        assert!(!pair.count.statement().sql.contains("ORDER BY"));
    }

    #[test]
    fn test_unknown_sort_column_rejected() {
        let sort = SortSpec::ascending("password; DROP TABLE users");
        let err = build_queries("users", &cols(&["name"]), "", Some(&sort), 1, 50).unwrap_err();
        assert!(matches!(err, QueryError::UnknownColumn { .. }));
    }

    #[test]
    fn test_pagination_offset() {
        let pair = build_queries("t", &cols(&["a"]), "x", None, 3, 50).unwrap();
        assert_eq!(
            pair.rows.page,
            Some(Pagination {
                limit: 50,
                offset: 100
            })
        );
        assert!(pair.count.page.is_none());
        let rows = pair.rows.statement();
        assert!(rows.sql.ends_with("LIMIT ?2 OFFSET ?3"));
        assert_eq!(
            rows.params,
            vec![
                SqlParam::Text("x".to_string()),
                SqlParam::Integer(50),
                SqlParam::Integer(100)
            ]
        );
    }

    #[test]
    fn test_page_zero_treated_as_first() {
        let pair = build_queries("t", &cols(&["a"]), "", None, 0, 10).unwrap();
        assert_eq!(pair.rows.page.map(|p| p.offset), Some(0));
    }

    #[test]
    fn test_identifiers_are_quoted() {
        assert_eq!(quote_ident("plain"), "\"plain\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
        let pair = build_queries("my table", &cols(&["a\"b"]), "", None, 1, 5).unwrap();
        assert!(pair.count.statement().sql.contains("FROM \"my table\""));
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            build_queries("", &[], "", None, 1, 10).unwrap_err(),
            QueryError::EmptyTableName
        );
        assert_eq!(
            build_queries("t", &[], "", None, 1, 0).unwrap_err(),
            QueryError::InvalidPageSize
        );
    }
}
