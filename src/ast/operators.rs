use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison applied by a start date filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DateExpression {
    /// scheduled_for >= instant
    From,
    /// scheduled_for <= instant
    To,
    /// scheduled_for = instant
    Equal,
}

impl DateExpression {
    pub fn operator(&self) -> &'static str {
        match self {
            DateExpression::From => ">=",
            DateExpression::To => "<=",
            DateExpression::Equal => "=",
        }
    }
}

/// Direction of an ORDER BY fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}
