use crate::date_key::DateKey;
use crate::errors::StoreError;
use crate::models::{CalendarDay, CalendarHabitRow, CalendarResponse, Habit};
use crate::stats::streak_at;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::fmt;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Some(WeekStart::Sunday),
            "monday" | "mon" => Some(WeekStart::Monday),
            _ => None,
        }
    }

    pub fn first_weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// Header labels, in the same order the grid columns are laid out.
    pub fn labels(self) -> [&'static str; 7] {
        match self {
            WeekStart::Sunday => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            WeekStart::Monday => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        }
    }

    /// Column of `date` in a week starting on this day, 0..7.
    pub fn column(self, date: NaiveDate) -> i64 {
        let weekday = date.weekday();
        let column = match self {
            WeekStart::Sunday => weekday.num_days_from_sunday(),
            WeekStart::Monday => weekday.num_days_from_monday(),
        };
        i64::from(column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parses `YYYY-MM`.
    pub fn parse(value: &str) -> Result<Self, StoreError> {
        let invalid = || StoreError::validation(format!("invalid month {value:?}, expected YYYY-MM"));
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        let digits =
            |part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(year, 4) || !digits(month, 2) {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Display label, e.g. "October 2026".
    pub fn label(self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Builds the visible cells for `month`, padded to whole weeks on both ends.
pub fn build_grid(month: CalendarMonth, today: DateKey, week_start: WeekStart) -> Vec<CalendarDay> {
    let first = month.first_day();
    let last = month.last_day();
    let start = first - Duration::days(week_start.column(first));
    let end = last + Duration::days(6 - week_start.column(last));

    start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| CalendarDay {
            date: DateKey::new(date),
            day_of_month: date.day(),
            is_current_month: date.year() == month.year && date.month() == month.month,
            is_today: DateKey::new(date) == today,
        })
        .collect()
}

/// Grid plus each habit's status per cell, ready for rendering.
pub fn month_view(
    habits: &[Habit],
    month: CalendarMonth,
    today: DateKey,
    week_start: WeekStart,
) -> CalendarResponse {
    let days = build_grid(month, today, week_start);
    let habits = habits
        .iter()
        .map(|habit| CalendarHabitRow {
            id: habit.id.clone(),
            name: habit.name.clone(),
            streak: streak_at(habit, today),
            statuses: days.iter().map(|day| habit.status_on(day.date)).collect(),
        })
        .collect();

    CalendarResponse {
        month: month.to_string(),
        label: month.label(),
        previous: month.previous().to_string(),
        next: month.next().to_string(),
        weekdays: week_start.labels().to_vec(),
        days,
        habits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    #[test]
    fn grid_is_whole_weeks_for_every_month() {
        for year in [1999, 2000, 2023, 2024, 2026, 2100] {
            for m in 1..=12 {
                let month = CalendarMonth::new(year, m).unwrap();
                for week_start in [WeekStart::Sunday, WeekStart::Monday] {
                    let grid = build_grid(month, key("2026-10-18"), week_start);
                    assert_eq!(grid.len() % 7, 0, "{month} {week_start:?}");
                    assert!((28..=42).contains(&grid.len()));
                    assert_eq!(
                        grid[0].date.date().weekday(),
                        week_start.first_weekday()
                    );
                    let in_month = grid.iter().filter(|d| d.is_current_month).count();
                    assert_eq!(in_month as u32, month.last_day().day());
                }
            }
        }
    }

    #[test]
    fn october_2026_sunday_first() {
        let month = CalendarMonth::parse("2026-10").unwrap();
        let grid = build_grid(month, key("2026-10-18"), WeekStart::Sunday);

        // Oct 1 2026 is a Thursday, Oct 31 a Saturday.
        assert_eq!(grid.len(), 35);
        assert_eq!(grid[0].date, key("2026-09-27"));
        assert!(!grid[0].is_current_month);
        assert_eq!(grid[4].date, key("2026-10-01"));
        assert!(grid[4].is_current_month);
        assert_eq!(grid.last().unwrap().date, key("2026-10-31"));

        let today: Vec<_> = grid.iter().filter(|d| d.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].day_of_month, 18);
    }

    #[test]
    fn monday_first_pads_differently() {
        let month = CalendarMonth::parse("2026-10").unwrap();
        let grid = build_grid(month, key("2026-10-18"), WeekStart::Monday);
        assert_eq!(grid[0].date, key("2026-09-28"));
        assert_eq!(grid.last().unwrap().date, key("2026-11-01"));
        assert!(!grid.last().unwrap().is_current_month);
        assert_eq!(WeekStart::Monday.labels()[0], "Mon");
        assert_eq!(WeekStart::Sunday.labels()[0], "Sun");
    }

    #[test]
    fn february_starting_on_week_start_has_no_padding() {
        // Feb 2015: starts Sunday, 28 days.
        let grid = build_grid(
            CalendarMonth::new(2015, 2).unwrap(),
            key("2015-02-10"),
            WeekStart::Sunday,
        );
        assert_eq!(grid.len(), 28);
        assert!(grid.iter().all(|d| d.is_current_month));
    }

    #[test]
    fn today_outside_month_is_never_flagged() {
        let grid = build_grid(
            CalendarMonth::new(2026, 3).unwrap(),
            key("2026-10-18"),
            WeekStart::Sunday,
        );
        assert!(grid.iter().all(|d| !d.is_today));
    }

    #[test]
    fn month_navigation_and_labels() {
        let dec = CalendarMonth::new(2025, 12).unwrap();
        assert_eq!(dec.next().to_string(), "2026-01");
        assert_eq!(dec.next().previous(), dec);
        assert_eq!(CalendarMonth::new(2026, 1).unwrap().previous(), dec);
        assert_eq!(dec.label(), "December 2025");
        assert_eq!(dec.last_day(), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        assert_eq!(
            CalendarMonth::new(2024, 2).unwrap().last_day().day(),
            29
        );
    }

    #[test]
    fn month_parse_rejects_bad_input() {
        for bad in [
            "2026-13", "2026-1", "26-01", "2026/01", "", "abcd-ef", "+026-01", "2026-+1", "-026-01",
        ] {
            assert!(CalendarMonth::parse(bad).is_err(), "{bad}");
        }
        assert_eq!(
            CalendarMonth::containing(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()),
            CalendarMonth::parse("2026-10").unwrap()
        );
    }

    #[test]
    fn month_view_lines_statuses_up_with_cells() {
        use crate::status::DayStatus;

        let mut habit = Habit::new("1".into(), "Read".into(), chrono::Utc::now());
        habit.set_status(key("2026-10-17"), DayStatus::Completed);
        habit.set_status(key("2026-10-18"), DayStatus::Completed);
        habit.set_status(key("2026-09-27"), DayStatus::Completed);

        let view = month_view(
            std::slice::from_ref(&habit),
            CalendarMonth::parse("2026-10").unwrap(),
            key("2026-10-18"),
            WeekStart::Sunday,
        );
        assert_eq!(view.month, "2026-10");
        assert_eq!(view.label, "October 2026");
        assert_eq!(view.previous, "2026-09");
        assert_eq!(view.next, "2026-11");
        assert_eq!(view.weekdays.len(), 7);

        let row = &view.habits[0];
        assert_eq!(row.streak, 2);
        assert_eq!(row.statuses.len(), view.days.len());
        let completed: Vec<String> = view
            .days
            .iter()
            .zip(&row.statuses)
            .filter(|(_, status)| status.is_completed())
            .map(|(day, _)| day.date.to_string())
            .collect();
        assert_eq!(completed, ["2026-09-27", "2026-10-17", "2026-10-18"]);
    }

    #[test]
    fn week_start_parse() {
        assert_eq!(WeekStart::parse("Monday"), Some(WeekStart::Monday));
        assert_eq!(WeekStart::parse(" sun "), Some(WeekStart::Sunday));
        assert_eq!(WeekStart::parse("friday"), None);
    }
}
