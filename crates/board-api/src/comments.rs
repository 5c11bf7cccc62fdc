use axum::{
    Form, Json,
    extract::{FromRequest, Path, Request, State, rejection::{FormRejection, JsonRejection}},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, info, warn};

use board_types::api::{CreateCommentRequest, MessageResponse};
use board_types::models::Comment;

use crate::error::ApiError;
use crate::state::AppState;

/// Comment submission from either a JSON body or an HTML form post.
///
/// A body that parses but has the wrong shape (`null`, a number where a
/// string belongs) is a validation failure like a missing field. Syntax
/// errors and unsupported content types keep axum's own rejection.
pub struct CommentInput(pub CreateCommentRequest);

impl<S: Send + Sync> FromRequest<S> for CommentInput {
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            match Form::<CreateCommentRequest>::from_request(req, state).await {
                Ok(Form(input)) => Ok(Self(input)),
                Err(FormRejection::FailedToDeserializeFormBody(e)) => {
                    warn!("Malformed comment form: {}", e);
                    Err(ApiError::Validation.into_response())
                }
                Err(e) => Err(e.into_response()),
            }
        } else {
            match Json::<CreateCommentRequest>::from_request(req, state).await {
                Ok(Json(input)) => Ok(Self(input)),
                Err(JsonRejection::JsonDataError(e)) => {
                    warn!("Malformed comment body: {}", e);
                    Err(ApiError::Validation.into_response())
                }
                Err(e) => Err(e.into_response()),
            }
        }
    }
}

/// GET /api/comments, newest first.
pub async fn list_comments(State(state): State<AppState>) -> Result<Json<Vec<Comment>>, ApiError> {
    let comments = state.run(|store| store.list_comments()).await?;
    debug!("Listing {} comments", comments.len());
    Ok(Json(comments))
}

/// POST /api/comments
///
/// Author and body are stored exactly as received. Nothing here escapes
/// or filters markup; output encoding is the renderer's job.
pub async fn create_comment(
    State(state): State<AppState>,
    CommentInput(req): CommentInput,
) -> Result<impl IntoResponse, ApiError> {
    debug!("Received comment data: {:?}", req);

    if !req.is_complete() {
        warn!("Missing required fields in comment request");
        return Err(ApiError::Validation);
    }

    let CreateCommentRequest { author, body } = req;
    let comment = state
        .run(move |store| store.create_comment(&author, &body))
        .await?;

    info!("Comment {} added", comment.id);
    Ok((StatusCode::CREATED, Json(comment)))
}

/// DELETE /api/comments/{id}
///
/// An id that is not an integer cannot name a comment, so it is reported
/// as not found rather than as a bad request.
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id: i64 = raw_id.parse().map_err(|_| {
        warn!("Delete requested for non-numeric id '{}'", raw_id);
        ApiError::NotFound
    })?;

    state.run(move |store| store.delete_comment(id)).await?;

    info!("Comment {} deleted", id);
    Ok(Json(MessageResponse {
        message: "Comment deleted successfully".into(),
    }))
}
