//! SQL rendering for filters, sortings and pagination.
//!
//! Each node renders one fragment. Fragments may span several lines; the
//! builder collapses whitespace once the statement is assembled.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::ast::*;

/// Column holding the group's display name.
pub const NAME_COLUMN: &str = "name";
/// Column holding the group's start timestamp.
pub const SCHEDULED_FOR_COLUMN: &str = "scheduled_for";
/// JSONB document column with the `members` array.
pub const DOCUMENT_COLUMN: &str = "group_data";

/// Trait for converting query nodes to SQL.
pub trait ToSql {
    /// Render with values interpolated as literals.
    fn to_sql(&self) -> String;

    /// Render with caller-supplied values replaced by `$n` placeholders.
    fn to_sql_parameterized(&self, params: &mut ParamContext) -> String;
}

/// Context for parameterized rendering.
#[derive(Debug, Default)]
pub struct ParamContext {
    /// Current parameter index (1-based for Postgres $1, $2, etc.)
    pub index: usize,
    /// Collected parameter values in order
    pub params: Vec<Param>,
}

impl ParamContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value and return the placeholder for it.
    pub fn add_param(&mut self, value: Param) -> String {
        self.index += 1;
        self.params.push(value);
        format!("${}", self.index)
    }

    pub fn into_params(self) -> Vec<Param> {
        self.params
    }
}

/// RFC-3339 in UTC with a `Z` suffix and only the fractional digits needed.
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Collapse every whitespace run into a single space and trim the ends.
pub fn normalize_whitespace(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl ToSql for Filter {
    fn to_sql(&self) -> String {
        match self {
            Filter::GroupName(f) => f.to_sql(),
            Filter::StartDate(f) => f.to_sql(),
            Filter::Member(f) => f.to_sql(),
        }
    }

    fn to_sql_parameterized(&self, params: &mut ParamContext) -> String {
        match self {
            Filter::GroupName(f) => f.to_sql_parameterized(params),
            Filter::StartDate(f) => f.to_sql_parameterized(params),
            Filter::Member(f) => f.to_sql_parameterized(params),
        }
    }
}

impl ToSql for GroupNameFilter {
    fn to_sql(&self) -> String {
        format!("{} ILIKE '%{}%'", NAME_COLUMN, self.search_term())
    }

    fn to_sql_parameterized(&self, params: &mut ParamContext) -> String {
        let placeholder = params.add_param(Param::Text(self.search_term().to_string()));
        format!("{} ILIKE '%' || {} || '%'", NAME_COLUMN, placeholder)
    }
}

impl ToSql for StartDateFilter {
    fn to_sql(&self) -> String {
        format!(
            "{} {} '{}'",
            SCHEDULED_FOR_COLUMN,
            self.expression().operator(),
            format_instant(&self.instant())
        )
    }

    fn to_sql_parameterized(&self, params: &mut ParamContext) -> String {
        let placeholder = params.add_param(Param::Timestamp(self.instant()));
        format!(
            "{} {} {}",
            SCHEDULED_FOR_COLUMN,
            self.expression().operator(),
            placeholder
        )
    }
}

impl MemberFilter {
    fn exists_clause(guid_array: &str, role: &str) -> String {
        format!(
            "EXISTS (SELECT * FROM jsonb_array_elements({doc}->'members') AS member
                     WHERE member->>'guid' = ANY({guids})
                     AND member->>'role' = {role})",
            doc = DOCUMENT_COLUMN,
            guids = guid_array,
            role = role,
        )
    }
}

impl ToSql for MemberFilter {
    fn to_sql(&self) -> String {
        let guids: Vec<String> = self.guids().iter().map(|g| format!("'{}'", g)).collect();
        Self::exists_clause(
            &format!("ARRAY[{}]", guids.join(", ")),
            &format!("'{}'", self.role()),
        )
    }

    fn to_sql_parameterized(&self, params: &mut ParamContext) -> String {
        let guids = params.add_param(Param::TextArray(self.guids().to_vec()));
        let role = params.add_param(Param::Text(self.role().to_string()));
        Self::exists_clause(&guids, &role)
    }
}

impl ToSql for Sorting {
    fn to_sql(&self) -> String {
        match self {
            Sorting::StartDay(dir) => format!("{} {}", SCHEDULED_FOR_COLUMN, dir),
            Sorting::Mentor(dir) => format!(
                "(SELECT jsonb_path_query_first({doc},'$.members[*] ? (@.role == \"{role}\").lastName')::text) {dir}",
                doc = DOCUMENT_COLUMN,
                role = MemberRole::Teacher,
                dir = dir,
            ),
        }
    }

    // Sortings carry no caller text.
    fn to_sql_parameterized(&self, _params: &mut ParamContext) -> String {
        self.to_sql()
    }
}

impl ToSql for Pagination {
    fn to_sql(&self) -> String {
        format!("LIMIT {} OFFSET {}", self.limit(), self.offset())
    }

    fn to_sql_parameterized(&self, _params: &mut ParamContext) -> String {
        self.to_sql()
    }
}
