use crate::calendar::{month_view, CalendarMonth};
use crate::date_key::{DateKey, ParseDateKeyError};
use crate::errors::{AppError, StoreError};
use crate::models::{
    CalendarResponse, DayStatusResponse, Habit, HabitSummary, NewHabitRequest, SetStatusRequest,
    ToggleRequest,
};
use crate::state::AppState;
use crate::stats::{habit_summary, habit_summary_at};
use crate::status::DayStatus;
use crate::storage::HabitPersistence;
use crate::store::HabitStore;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct MonthQuery {
    pub month: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewHabitForm {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    pub date: Option<String>,
    pub month: Option<String>,
}

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Html<String>, AppError> {
    let today = DateKey::today();
    let month = resolve_month(query.month.as_deref(), today)?;
    let store = state.store.lock().await;
    let summaries: Vec<HabitSummary> = store
        .habits()
        .iter()
        .map(|habit| habit_summary_at(habit, today))
        .collect();
    let calendar = month_view(store.habits(), month, today, state.week_start);
    Ok(Html(render_index(today, &summaries, &calendar)))
}

pub async fn list_habits(State(state): State<AppState>) -> Json<Vec<HabitSummary>> {
    let store = state.store.lock().await;
    Json(store.habits().iter().map(habit_summary).collect())
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(payload): Json<NewHabitRequest>,
) -> Result<(StatusCode, Json<Habit>), AppError> {
    let habit = state.mutate(move |store| store.add(&payload.name)).await?;
    Ok((StatusCode::CREATED, Json(habit)))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.mutate(move |store| store.remove(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_day(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Option<Json<ToggleRequest>>,
) -> Result<Json<DayStatusResponse>, AppError> {
    let Json(payload) = payload.unwrap_or_default();
    let day = parse_optional_day(payload.date.as_deref())?;
    let (day, status) = state
        .mutate(move |store| apply_toggle(store, &id, day))
        .await?;
    Ok(Json(DayStatusResponse {
        date: day.to_string(),
        status,
    }))
}

pub async fn set_day(
    State(state): State<AppState>,
    Path((id, date)): Path<(String, String)>,
    Json(payload): Json<SetStatusRequest>,
) -> Result<Json<DayStatusResponse>, AppError> {
    let day = parse_day(&date)?;
    let status = DayStatus::from_completed(payload.completed);
    state
        .mutate(move |store| store.set_status(&id, day, status))
        .await?;
    Ok(Json(DayStatusResponse {
        date: day.to_string(),
        status,
    }))
}

pub async fn calendar(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<CalendarResponse>, AppError> {
    let today = DateKey::today();
    let month = resolve_month(query.month.as_deref(), today)?;
    let store = state.store.lock().await;
    Ok(Json(month_view(store.habits(), month, today, state.week_start)))
}

pub async fn form_add(
    State(state): State<AppState>,
    Form(form): Form<NewHabitForm>,
) -> Result<Redirect, AppError> {
    state.mutate(move |store| store.add(&form.name)).await?;
    Ok(Redirect::to("/"))
}

pub async fn form_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state.mutate(move |store| store.remove(&id)).await?;
    Ok(Redirect::to("/"))
}

pub async fn form_toggle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ToggleForm>,
) -> Result<Redirect, AppError> {
    let day = parse_optional_day(form.date.as_deref())?;
    state
        .mutate(move |store| apply_toggle(store, &id, day))
        .await?;

    let target = match form.month.as_deref().map(CalendarMonth::parse) {
        Some(Ok(month)) => format!("/?month={month}"),
        _ => "/".to_string(),
    };
    Ok(Redirect::to(&target))
}

/// Toggles an explicit day, or quick-marks whatever day it is at click time.
fn apply_toggle<P: HabitPersistence>(
    store: &mut HabitStore<P>,
    id: &str,
    day: Option<DateKey>,
) -> Result<(DateKey, DayStatus), StoreError> {
    match day {
        Some(day) => store.toggle(id, day).map(|status| (day, status)),
        None => store.toggle_today(id),
    }
}

fn resolve_month(raw: Option<&str>, today: DateKey) -> Result<CalendarMonth, StoreError> {
    match raw.filter(|value| !value.trim().is_empty()) {
        Some(value) => CalendarMonth::parse(value),
        None => Ok(CalendarMonth::containing(today.date())),
    }
}

fn parse_optional_day(raw: Option<&str>) -> Result<Option<DateKey>, StoreError> {
    raw.filter(|value| !value.trim().is_empty())
        .map(parse_day)
        .transpose()
}

fn parse_day(raw: &str) -> Result<DateKey, StoreError> {
    raw.trim()
        .parse()
        .map_err(|err: ParseDateKeyError| StoreError::validation(err.to_string()))
}
