use serde::{Deserialize, Serialize};

/// Completion state of one habit on one day.
///
/// Only two states exist: an explicit positive mark, or nothing. A stored
/// `false` and a missing entry are the same `Unmarked` day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    Completed,
    #[default]
    Unmarked,
}

impl DayStatus {
    /// Transition applied on a click, both in the calendar and on quick-mark.
    pub fn next(self) -> Self {
        match self {
            DayStatus::Unmarked => DayStatus::Completed,
            DayStatus::Completed => DayStatus::Unmarked,
        }
    }

    pub fn from_completed(completed: bool) -> Self {
        if completed {
            DayStatus::Completed
        } else {
            DayStatus::Unmarked
        }
    }

    pub fn is_completed(self) -> bool {
        self == DayStatus::Completed
    }

    pub fn symbol(self) -> &'static str {
        match self {
            DayStatus::Completed => "X",
            DayStatus::Unmarked => ".",
        }
    }
}
