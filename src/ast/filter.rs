//! Filter predicates for the WHERE clause.
//!
//! Every variant renders one self-contained boolean fragment (see
//! [`crate::transpiler`]); the builder joins them with `AND`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DateExpression, MemberRole};
use crate::error::{QueryError, QueryResult};

/// A single WHERE predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Filter {
    /// `name ILIKE '%term%'`
    GroupName(GroupNameFilter),
    /// `scheduled_for <op> 'instant'`
    StartDate(StartDateFilter),
    /// EXISTS over `group_data->'members'`
    Member(MemberFilter),
}

impl Filter {
    pub fn group_name(search_term: impl Into<String>) -> Self {
        Filter::GroupName(GroupNameFilter::new(search_term))
    }

    pub fn start_date(instant: DateTime<Utc>, expression: DateExpression) -> Self {
        Filter::StartDate(StartDateFilter::new(instant, expression))
    }

    /// Fails with [`QueryError::InvalidFilter`] when `guids` is empty.
    pub fn member<S: Into<String>>(
        guids: impl IntoIterator<Item = S>,
        role: MemberRole,
    ) -> QueryResult<Self> {
        MemberFilter::new(guids, role).map(Filter::Member)
    }
}

/// Case-insensitive containment match on the group name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupNameFilter {
    search_term: String,
}

impl GroupNameFilter {
    pub fn new(search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }
}

/// Compares the scheduling timestamp against a fixed instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartDateFilter {
    instant: DateTime<Utc>,
    expression: DateExpression,
}

impl StartDateFilter {
    pub fn new(instant: DateTime<Utc>, expression: DateExpression) -> Self {
        Self {
            instant,
            expression,
        }
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn expression(&self) -> DateExpression {
        self.expression
    }
}

/// Matches groups with at least one member whose guid is listed and whose
/// role equals `role`.
///
/// The guid list is never empty; deserialization goes through the same check
/// as [`MemberFilter::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMemberFilter")]
pub struct MemberFilter {
    guids: Vec<String>,
    role: MemberRole,
}

impl MemberFilter {
    pub fn new<S: Into<String>>(
        guids: impl IntoIterator<Item = S>,
        role: MemberRole,
    ) -> QueryResult<Self> {
        let guids: Vec<String> = guids.into_iter().map(Into::into).collect();
        if guids.is_empty() {
            return Err(QueryError::InvalidFilter(format!(
                "member filter for role {} needs at least one guid",
                role
            )));
        }
        Ok(Self { guids, role })
    }

    pub fn guids(&self) -> &[String] {
        &self.guids
    }

    pub fn role(&self) -> MemberRole {
        self.role
    }
}

#[derive(Deserialize)]
struct RawMemberFilter {
    guids: Vec<String>,
    role: MemberRole,
}

impl TryFrom<RawMemberFilter> for MemberFilter {
    type Error = QueryError;

    fn try_from(raw: RawMemberFilter) -> Result<Self, Self::Error> {
        MemberFilter::new(raw.guids, raw.role)
    }
}

impl From<GroupNameFilter> for Filter {
    fn from(f: GroupNameFilter) -> Self {
        Filter::GroupName(f)
    }
}

impl From<StartDateFilter> for Filter {
    fn from(f: StartDateFilter) -> Self {
        Filter::StartDate(f)
    }
}

impl From<MemberFilter> for Filter {
    fn from(f: MemberFilter) -> Self {
        Filter::Member(f)
    }
}
