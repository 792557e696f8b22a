use serde::{Deserialize, Serialize};

use super::SortDirection;

/// The single ORDER BY rule of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "direction", rename_all = "snake_case")]
pub enum Sorting {
    /// Order by `scheduled_for`.
    StartDay(SortDirection),
    /// Order by the teacher's `lastName` inside `group_data`.
    Mentor(SortDirection),
}

impl Sorting {
    pub fn start_day(direction: SortDirection) -> Self {
        Sorting::StartDay(direction)
    }

    pub fn mentor(direction: SortDirection) -> Self {
        Sorting::Mentor(direction)
    }

    pub fn direction(&self) -> SortDirection {
        match self {
            Sorting::StartDay(d) | Sorting::Mentor(d) => *d,
        }
    }
}
