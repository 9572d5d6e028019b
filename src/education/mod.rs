use axum::{
    routing::{delete, get},
    Router,
};

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/education/entries",
            get(handlers::list_entries).post(handlers::add_entry),
        )
        .route(
            "/education/entries/:entry_id",
            delete(handlers::delete_entry),
        )
        .route(
            "/education/summary/monthly",
            get(handlers::monthly_summary),
        )
}
