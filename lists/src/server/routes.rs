//! Router configuration for the todo lists service.

use super::state::AppState;
use crate::api::{lists, todos};
use crate::session::ListSession;
use axum::{
    Router,
    routing::{get, post},
};
use todo_lists_web::{
    correlation_id_layer,
    handlers::{health_check, readiness_check},
    session_layer,
};
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// List and todo routes run behind the session cookie layer; health checks do
/// not, so health checks never create sessions.
pub fn build_router(state: AppState) -> Router {
    let list_routes = Router::new()
        .route("/", get(lists::root))
        .route("/lists", get(lists::index).post(lists::create_list))
        .route("/lists/new", get(lists::new_list_form))
        .route("/lists/:id", get(lists::show_list).post(lists::rename_list))
        .route("/lists/:id/edit", get(lists::edit_list_form))
        .route("/lists/:id/destroy", post(lists::delete_list))
        .route("/lists/:id/complete_all", post(todos::complete_all))
        .route("/lists/:id/todos", post(todos::add_todo))
        .route("/lists/:id/todos/:todo_id", post(todos::update_todo))
        .route("/lists/:id/todos/:todo_id/destroy", post(todos::delete_todo))
        .layer(session_layer(state.sessions.ttl()));

    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check::<ListSession>))
        .merge(list_routes)
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
        .with_state(state)
}
