//! Fluent SELECT statement builder.
//!
//! ```
//! use arrangement_query::prelude::*;
//!
//! let sql = QueryBuilder::create()
//!     .select("*")
//!     .from("groups")
//!     .filter(Filter::group_name("rust"))
//!     .order_by(Sorting::start_day(SortDirection::Desc))
//!     .paginate(Pagination::new(2, 25).unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     sql,
//!     "SELECT * FROM groups WHERE name ILIKE '%rust%' ORDER BY scheduled_for DESC LIMIT 25 OFFSET 25"
//! );
//! ```

use serde::Serialize;
use tracing::{debug, trace};

use crate::ast::{Filter, Pagination, Param, Sorting};
use crate::error::{QueryError, QueryResult};
use crate::transpiler::{normalize_whitespace, ParamContext, ToSql};

/// Accumulates the parts of one SELECT statement.
///
/// Create one per statement. Rendering borrows the builder, so `build()` may
/// be called repeatedly and always yields the same text.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    select: Option<String>,
    from: Option<String>,
    filters: Vec<Filter>,
    sorting: Option<Sorting>,
    pagination: Option<Pagination>,
}

/// A statement whose caller-supplied values are carried separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterizedQuery {
    pub sql: String,
    pub params: Vec<Param>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create() -> Self {
        Self::new()
    }

    /// Set the SELECT list, e.g. `*` or `id, name`.
    pub fn select(mut self, fields: impl Into<String>) -> Self {
        self.select = Some(fields.into());
        self
    }

    /// Set the source table.
    pub fn from(mut self, table: impl Into<String>) -> Self {
        self.from = Some(table.into());
        self
    }

    /// Append filters; they are ANDed in the order supplied.
    pub fn filters<F: Into<Filter>>(mut self, filters: impl IntoIterator<Item = F>) -> Self {
        self.filters.extend(filters.into_iter().map(Into::into));
        self
    }

    /// Append a single filter.
    pub fn filter(mut self, filter: impl Into<Filter>) -> Self {
        self.filters.push(filter.into());
        self
    }

    /// Set the ordering. A later call replaces an earlier one.
    pub fn order_by(mut self, sorting: Sorting) -> Self {
        self.sorting = Some(sorting);
        self
    }

    /// Set the page window. A later call replaces an earlier one.
    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Validate and set the page window in one step.
    pub fn page(self, page: u64, size: u64) -> QueryResult<Self> {
        Ok(self.paginate(Pagination::new(page, size)?))
    }

    pub fn conditions(&self) -> &[Filter] {
        &self.filters
    }

    pub fn sorting(&self) -> Option<&Sorting> {
        self.sorting.as_ref()
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    /// Render the statement with values interpolated as literals.
    ///
    /// Text values are inserted verbatim. Use [`Self::build_parameterized`]
    /// when they come from untrusted input.
    pub fn build(&self) -> QueryResult<String> {
        self.render(|node| node.to_sql())
    }

    /// Render the statement with `$n` placeholders and the bound values.
    pub fn build_parameterized(&self) -> QueryResult<ParameterizedQuery> {
        let mut params = ParamContext::new();
        let sql = self.render(|node| node.to_sql_parameterized(&mut params))?;
        Ok(ParameterizedQuery {
            sql,
            params: params.into_params(),
        })
    }

    fn render(&self, mut fragment: impl FnMut(&dyn ToSql) -> String) -> QueryResult<String> {
        let select = required(&self.select, "select")?;
        let from = required(&self.from, "from")?;

        let mut sql = format!("SELECT {} FROM {}", select, from);

        // WHERE
        if !self.filters.is_empty() {
            let conditions: Vec<String> = self
                .filters
                .iter()
                .map(|f| fragment(f as &dyn ToSql))
                .collect();
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        // ORDER BY
        if let Some(sorting) = &self.sorting {
            sql.push_str(" ORDER BY ");
            sql.push_str(&fragment(sorting as &dyn ToSql));
        }

        // LIMIT / OFFSET
        if let Some(pagination) = &self.pagination {
            sql.push(' ');
            sql.push_str(&fragment(pagination as &dyn ToSql));
        }

        let sql = normalize_whitespace(&sql);
        debug!(
            filters = self.filters.len(),
            sorted = self.sorting.is_some(),
            paginated = self.pagination.is_some(),
            "built select statement"
        );
        trace!(sql = %sql, "rendered statement");
        Ok(sql)
    }
}

fn required<'a>(slot: &'a Option<String>, name: &'static str) -> QueryResult<&'a str> {
    match slot.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(QueryError::missing(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{DateExpression, MemberRole, SortDirection};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn base() -> QueryBuilder {
        QueryBuilder::create().select("*").from("test_table")
    }

    #[test]
    fn test_plain_select() {
        assert_eq!(base().build().unwrap(), "SELECT * FROM test_table");
    }

    #[test]
    fn test_missing_select() {
        let err = QueryBuilder::new().from("t").build().unwrap_err();
        assert!(matches!(err, QueryError::Configuration(_)));
    }

    #[test]
    fn test_missing_from() {
        let err = QueryBuilder::new().select("*").build().unwrap_err();
        assert!(matches!(err, QueryError::Configuration(_)));
    }

    #[test]
    fn test_blank_from_is_missing() {
        let err = QueryBuilder::new().select("*").from("  ").build().unwrap_err();
        assert!(matches!(err, QueryError::Configuration(_)));
    }

    #[test]
    fn test_filters_joined_in_order() {
        let sql = base()
            .filters([Filter::group_name("a"), Filter::group_name("b")])
            .filter(Filter::group_name("c"))
            .build()
            .unwrap();
        assert_eq!(
            sql,
            "SELECT * FROM test_table WHERE name ILIKE '%a%' AND name ILIKE '%b%' AND name ILIKE '%c%'"
        );
        assert_eq!(sql.matches(" AND ").count(), 2);
    }

    #[test]
    fn test_second_sorting_replaces_first() {
        let sql = base()
            .order_by(Sorting::mentor(SortDirection::Asc))
            .order_by(Sorting::start_day(SortDirection::Desc))
            .build()
            .unwrap();
        assert_eq!(sql, "SELECT * FROM test_table ORDER BY scheduled_for DESC");
    }

    #[test]
    fn test_page_helper_validates() {
        assert!(matches!(
            base().page(0, 10),
            Err(QueryError::InvalidPagination(_))
        ));
        let sql = base().page(1, 10).unwrap().build().unwrap();
        assert_eq!(sql, "SELECT * FROM test_table LIMIT 10 OFFSET 0");
    }

    #[test]
    fn test_accessors_reflect_configuration() {
        let empty = base();
        assert!(empty.conditions().is_empty());
        assert!(empty.sorting().is_none());
        assert!(empty.pagination().is_none());

        let builder = base()
            .filter(Filter::group_name("a"))
            .filter(Filter::group_name("b"))
            .order_by(Sorting::mentor(SortDirection::Desc))
            .page(2, 5)
            .unwrap();
        assert_eq!(
            builder.conditions(),
            [Filter::group_name("a"), Filter::group_name("b")]
        );
        assert_eq!(builder.sorting(), Some(&Sorting::mentor(SortDirection::Desc)));
        let page = builder.pagination().unwrap();
        assert_eq!((page.page(), page.size(), page.offset()), (2, 5, 5));
    }

    #[test]
    fn test_build_is_idempotent() {
        let builder = base()
            .filter(Filter::member(["g1"], MemberRole::Teacher).unwrap())
            .order_by(Sorting::mentor(SortDirection::Desc))
            .page(2, 5)
            .unwrap();
        assert_eq!(builder.build().unwrap(), builder.build().unwrap());
        assert_eq!(
            builder.build_parameterized().unwrap(),
            builder.build_parameterized().unwrap()
        );
    }

    #[test]
    fn test_output_is_single_line() {
        let sql = base()
            .filter(Filter::member(["g1", "g2"], MemberRole::Intern).unwrap())
            .build()
            .unwrap();
        assert!(!sql.contains('\n'));
        assert!(!sql.contains("  "));
    }

    #[test]
    fn test_parameterized_statement() {
        let at = Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap();
        let query = base()
            .filter(Filter::group_name("rust"))
            .filter(Filter::start_date(at, DateExpression::From))
            .order_by(Sorting::start_day(SortDirection::Asc))
            .page(3, 15)
            .unwrap()
            .build_parameterized()
            .unwrap();

        assert_eq!(
            query.sql,
            "SELECT * FROM test_table WHERE name ILIKE '%' || $1 || '%' AND scheduled_for >= $2 \
             ORDER BY scheduled_for ASC LIMIT 15 OFFSET 30"
        );
        assert_eq!(
            query.params,
            vec![Param::Text("rust".to_string()), Param::Timestamp(at)]
        );
    }
}
