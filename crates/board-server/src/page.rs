use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{debug, info, warn};

use board_api::comments::CommentInput;
use board_api::{ApiError, AppState};
use board_client::dom::Node;
use board_client::render::{self, CONTENT_SECURITY_POLICY, EncodingPolicy, PageView};
use board_client::validate::validate_input;

#[derive(Debug, Deserialize)]
pub struct BoardQuery {
    #[serde(default)]
    pub policy: EncodingPolicy,
    /// Include the user table, as if "Fetch Users" had been pressed.
    #[serde(default)]
    pub users: bool,
}

/// GET /board: the board rendered server-side with the requested policy.
pub async fn board_page(
    State(state): State<AppState>,
    Query(query): Query<BoardQuery>,
) -> Result<Response, ApiError> {
    let BoardQuery { policy, users } = query;

    let (comments, users) = state
        .run(move |store| {
            let comments = store.list_comments()?;
            let users = if users { Some(store.list_users()?) } else { None };
            Ok((comments, users))
        })
        .await?;
    debug!("Rendering board with {} comments ({})", comments.len(), policy);

    let nodes: Vec<Node> = comments
        .iter()
        .map(|c| render::render_comment(c, policy))
        .collect();
    let users = users.map(|u| render::render_users(&u, policy));

    let html = render::render_page(&PageView {
        comments: &nodes,
        users: users.as_ref(),
        status: None,
        policy,
    });

    Ok(match policy {
        EncodingPolicy::Escaped => (
            [(header::CONTENT_SECURITY_POLICY, CONTENT_SECURITY_POLICY)],
            Html(html),
        )
            .into_response(),
        EncodingPolicy::Raw => Html(html).into_response(),
    })
}

/// POST /board: the comment form.
///
/// Mirrors the controller's submit: the escaped board filters script-bearing
/// input first, the raw board comes back with the user table showing.
pub async fn post_comment(
    State(state): State<AppState>,
    Query(query): Query<BoardQuery>,
    CommentInput(req): CommentInput,
) -> Result<Redirect, ApiError> {
    let policy = query.policy;

    if !req.is_complete() {
        warn!("Missing required fields in board form");
        return Err(ApiError::Validation);
    }
    if policy == EncodingPolicy::Escaped
        && !(validate_input(&req.author) && validate_input(&req.body))
    {
        warn!("Rejected script-bearing board input");
        return Err(ApiError::Rejected);
    }

    let (author, body) = (req.author, req.body);
    let comment = state
        .run(move |store| store.create_comment(&author, &body))
        .await?;
    info!("Comment {} added from board ({})", comment.id, policy);

    Ok(Redirect::to(&match policy {
        EncodingPolicy::Raw => render::users_link(policy),
        EncodingPolicy::Escaped => render::submit_action(policy),
    }))
}

/// POST /board/comments/{id}/remove: a remove button.
///
/// Always returns to the board. A comment that was already gone is only
/// logged, as the controller does.
pub async fn remove_comment(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<BoardQuery>,
) -> Result<Redirect, ApiError> {
    match raw_id.parse::<i64>() {
        Ok(id) => match state.run(move |store| store.delete_comment(id)).await {
            Ok(()) => info!("Comment {} deleted from board", id),
            Err(ApiError::NotFound) => warn!("Comment {} was already gone", id),
            Err(e) => return Err(e),
        },
        Err(_) => warn!("Remove requested for non-numeric id '{}'", raw_id),
    }

    Ok(Redirect::to(&render::submit_action(query.policy)))
}
