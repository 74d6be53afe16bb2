//! Post handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use board_core::domain::PostId;
use board_core::service::post_detail;
use board_shared::dto::{CreatedResponse, PostCreateRequest, PostUpdateRequest};
use board_shared::{ApiResponse, Validate};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Query parameters of the post list.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_size() -> i64 {
    10
}

/// GET /api/posts?page=0&size=10
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let page = state.posts.list(query.page, query.size).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(page)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_detail(PostId(path.into_inner())).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_detail(&post)?)))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<PostCreateRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let id = state
        .posts
        .create(req.title, req.content, req.nickname)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(CreatedResponse { id: id.get() })))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<PostUpdateRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    state
        .posts
        .update(PostId(path.into_inner()), req.title, req.content)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    state.posts.delete(PostId(path.into_inner())).await?;
    Ok(HttpResponse::NoContent().finish())
}
