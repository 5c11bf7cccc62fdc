use axum::{Json, extract::State};
use tracing::debug;

use board_types::models::User;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/users
///
/// Unauthenticated, unfiltered and unredacted, passwords included. This
/// is the access-control gap the board demonstrates; do not put this
/// route in front of real data.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.run(|store| store.list_users()).await?;
    debug!("Listing {} users", users.len());
    Ok(Json(users))
}
