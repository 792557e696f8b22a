use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// A value bound to a `$n` placeholder in a parameterized statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Param {
    Text(String),
    Timestamp(DateTime<Utc>),
    TextArray(Vec<String>),
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Text(s) => write!(f, "'{}'", s),
            Param::Timestamp(t) => write!(f, "'{}'", crate::transpiler::format_instant(t)),
            Param::TextArray(items) => {
                write!(f, "{{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "\"{}\"", item.replace('\\', "\\\\").replace('"', "\\\""))?;
                }
                write!(f, "}}")
            }
        }
    }
}
