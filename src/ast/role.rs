use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::QueryError;

/// Role a member holds inside a group's `members` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MemberRole {
    Teacher,
    Mentor,
    Intern,
}

impl MemberRole {
    /// The value stored in `group_data->'members'[*].role`.
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Teacher => "TEACHER",
            MemberRole::Mentor => "MENTOR",
            MemberRole::Intern => "INTERN",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TEACHER" => Ok(MemberRole::Teacher),
            "MENTOR" => Ok(MemberRole::Mentor),
            "INTERN" => Ok(MemberRole::Intern),
            other => Err(QueryError::InvalidFilter(format!(
                "Unknown member role: '{}'. Expected: TEACHER, MENTOR, or INTERN",
                other
            ))),
        }
    }
}
