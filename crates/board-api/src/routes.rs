use axum::{
    Json, Router,
    extract::State,
    routing::{delete, get},
};

use board_types::api::HealthResponse;

use crate::state::AppState;
use crate::{comments, users};

/// JSON API plus health check. The server binary adds static files, the
/// rendered board page and the HTTP layers on top.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route("/api/comments/{id}", delete(comments::delete_comment))
        .route("/api/users", get(users::list_users))
        .route("/health", get(health))
        .with_state(state)
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        store: state.store.kind().as_str().into(),
    })
}
