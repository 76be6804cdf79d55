use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/habits", post(handlers::form_add))
        .route("/habits/:id/delete", post(handlers::form_delete))
        .route("/habits/:id/toggle", post(handlers::form_toggle))
        .route(
            "/api/habits",
            get(handlers::list_habits).post(handlers::create_habit),
        )
        .route(
            "/api/habits/:id",
            axum::routing::delete(handlers::delete_habit),
        )
        .route("/api/habits/:id/toggle", post(handlers::toggle_day))
        .route("/api/habits/:id/days/:date", put(handlers::set_day))
        .route("/api/calendar", get(handlers::calendar))
        .with_state(state)
}
