use crate::date_key::DateKey;
use crate::models::{Habit, HabitSummary, WeeklyProgress};

const WEEK_DAYS: u32 = 7;

pub fn streak(habit: &Habit) -> u32 {
    streak_at(habit, DateKey::today())
}

/// Consecutive completed days walking backward from `today`.
///
/// An unmarked `today` breaks the chain immediately, even when earlier days
/// are completed.
pub fn streak_at(habit: &Habit, today: DateKey) -> u32 {
    let mut streak = 0;
    let mut cursor = Some(today);
    while let Some(day) = cursor {
        if !habit.status_on(day).is_completed() {
            break;
        }
        streak += 1;
        cursor = day.pred();
    }
    streak
}

pub fn weekly_progress(habit: &Habit) -> WeeklyProgress {
    weekly_progress_at(habit, DateKey::today())
}

pub fn weekly_progress_at(habit: &Habit, today: DateKey) -> WeeklyProgress {
    let mut dates = Vec::with_capacity(WEEK_DAYS as usize);
    let mut cursor = Some(today);
    while let Some(day) = cursor {
        dates.push(day);
        if dates.len() == WEEK_DAYS as usize {
            break;
        }
        cursor = day.pred();
    }
    dates.reverse();

    let days: Vec<bool> = dates
        .iter()
        .map(|day| habit.status_on(*day).is_completed())
        .collect();
    let completed = days.iter().filter(|done| **done).count() as u32;

    WeeklyProgress {
        days,
        dates,
        completed,
        total: WEEK_DAYS,
        percentage: percentage(completed, WEEK_DAYS),
    }
}

pub fn habit_summary(habit: &Habit) -> HabitSummary {
    habit_summary_at(habit, DateKey::today())
}

pub fn habit_summary_at(habit: &Habit, today: DateKey) -> HabitSummary {
    HabitSummary {
        id: habit.id.clone(),
        name: habit.name.clone(),
        created_at: habit.created_at,
        today: habit.status_on(today),
        streak: streak_at(habit, today),
        week: weekly_progress_at(habit, today),
    }
}

fn percentage(completed: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(completed) / f64::from(total) * 100.0).round() as u32
}
