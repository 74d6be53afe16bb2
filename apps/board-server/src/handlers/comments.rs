//! Comment handlers.

use actix_web::{HttpResponse, web};

use board_core::domain::{CommentId, PostId};
use board_shared::dto::{CommentCreateRequest, CreatedResponse};
use board_shared::{ApiResponse, Validate};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/posts/{id}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<CommentCreateRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let id = state
        .comments
        .add(PostId(path.into_inner()), req.content, req.nickname)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(CreatedResponse { id: id.get() })))
}

/// DELETE /api/posts/{id}/comments/{comment_id}
pub async fn remove_comment(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();

    state
        .comments
        .remove(PostId(post_id), CommentId(comment_id))
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
