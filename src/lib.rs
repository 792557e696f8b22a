//! # arrangement-query
//!
//! Builds one Postgres SELECT statement over a table of group arrangements,
//! where membership lives in a JSONB document column (`group_data`).
//!
//! ## Quick Example
//!
//! ```rust
//! use arrangement_query::prelude::*;
//!
//! let sql = QueryBuilder::create()
//!     .select("*")
//!     .from("groups")
//!     .filters([
//!         Filter::group_name("spring"),
//!         Filter::member(["4f1c"], MemberRole::Teacher)?,
//!     ])
//!     .order_by(Sorting::mentor(SortDirection::Desc))
//!     .paginate(Pagination::new(1, 20)?)
//!     .build()?;
//!
//! assert!(sql.starts_with("SELECT * FROM groups WHERE name ILIKE '%spring%' AND EXISTS"));
//! assert!(sql.ends_with("DESC LIMIT 20 OFFSET 0"));
//! # Ok::<(), QueryError>(())
//! ```
//!
//! ## Fragments
//!
//! | Node                      | SQL                                                   |
//! |---------------------------|-------------------------------------------------------|
//! | `Filter::GroupName`       | `name ILIKE '%term%'`                                 |
//! | `Filter::StartDate`       | `scheduled_for >= / <= / = 'instant'`                 |
//! | `Filter::Member`          | `EXISTS (... jsonb_array_elements(group_data->'members') ...)` |
//! | `Sorting::StartDay`       | `scheduled_for ASC/DESC`                              |
//! | `Sorting::Mentor`         | `jsonb_path_query_first(...lastName)::text ASC/DESC`  |
//! | `Pagination`              | `LIMIT size OFFSET (page-1)*size`                     |
//!
//! Literal rendering inserts text values verbatim. For untrusted input use
//! [`QueryBuilder::build_parameterized`], which emits `$n` placeholders and
//! returns the values separately.

pub mod ast;
pub mod builder;
pub mod config;
pub mod error;
pub mod parser;
pub mod transpiler;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::builder::{ParameterizedQuery, QueryBuilder};
    pub use crate::config::QueryConfig;
    pub use crate::error::*;
    pub use crate::parser::{parse_filter, parse_sorting};
    pub use crate::transpiler::ToSql;
}

pub use builder::QueryBuilder;
pub use error::{QueryError, QueryResult};

/// Parse a filter expression like `name~spring` or `member[teacher]=g1,g2`.
///
/// # Example
///
/// ```
/// use arrangement_query::parse_filter;
/// use arrangement_query::transpiler::ToSql;
///
/// let filter = parse_filter("name~spring").unwrap();
/// assert_eq!(filter.to_sql(), "name ILIKE '%spring%'");
/// ```
pub fn parse_filter(input: &str) -> QueryResult<ast::Filter> {
    parser::parse_filter(input)
}
