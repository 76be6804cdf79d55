use crate::date_key::DateKey;
use crate::status::DayStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MAX_NAME_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Sparse per-day record. Only completed days are kept.
    #[serde(default)]
    pub data: BTreeMap<DateKey, bool>,
}

impl Habit {
    pub fn new(id: String, name: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            created_at,
            data: BTreeMap::new(),
        }
    }

    pub fn status_on(&self, day: DateKey) -> DayStatus {
        DayStatus::from_completed(self.data.get(&day).copied().unwrap_or(false))
    }

    pub fn set_status(&mut self, day: DateKey, status: DayStatus) {
        match status {
            DayStatus::Completed => {
                self.data.insert(day, true);
            }
            DayStatus::Unmarked => {
                self.data.remove(&day);
            }
        }
    }

    /// Drops `false` entries left by older data, which read as unmarked anyway.
    pub fn normalize(&mut self) {
        self.data.retain(|_, completed| *completed);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: DateKey,
    pub day_of_month: u32,
    pub is_current_month: bool,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyProgress {
    /// Oldest first, ending today.
    pub days: Vec<bool>,
    pub dates: Vec<DateKey>,
    pub completed: u32,
    pub total: u32,
    pub percentage: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct HabitSummary {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub today: DayStatus,
    pub streak: u32,
    pub week: WeeklyProgress,
}

#[derive(Debug, Deserialize)]
pub struct NewHabitRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct ToggleRequest {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub completed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayStatusResponse {
    pub date: String,
    pub status: DayStatus,
}

#[derive(Debug, Serialize)]
pub struct CalendarHabitRow {
    pub id: String,
    pub name: String,
    pub streak: u32,
    pub statuses: Vec<DayStatus>,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub month: String,
    pub label: String,
    pub previous: String,
    pub next: String,
    pub weekdays: Vec<&'static str>,
    pub days: Vec<CalendarDay>,
    pub habits: Vec<CalendarHabitRow>,
}
