use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};

use super::configure_routes;
use crate::state::AppState;

macro_rules! board_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::in_memory()))
                .configure(configure_routes),
        )
        .await
    };
}

fn post_body(title: &str, nickname: &str) -> Value {
    json!({ "title": title, "content": "World", "nickname": nickname })
}

#[actix_rt::test]
async fn test_health_reports_memory_store() {
    let app = board_app!();

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
}

#[actix_rt::test]
async fn test_create_then_read_post() {
    let app = board_app!();

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(post_body("Hello", "alice"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(res).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["title"], "Hello");
    assert_eq!(body["data"]["authorNickname"], "alice");
    assert_eq!(body["data"]["comments"], json!([]));
}

#[actix_rt::test]
async fn test_list_uses_defaults_and_clamps() {
    let app = board_app!();
    for title in ["one", "two", "three"] {
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(post_body(title, "alice"))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["page"], 0);
    assert_eq!(body["data"]["size"], 10);
    assert_eq!(body["data"]["totalElements"], 3);
    assert_eq!(body["data"]["items"][0]["title"], "three");

    let req = test::TestRequest::get()
        .uri("/api/posts?page=-1&size=500")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["page"], 0);
    assert_eq!(body["data"]["size"], 50);
}

#[actix_rt::test]
async fn test_invalid_post_is_unprocessable() {
    let app = board_app!();

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({ "title": "x".repeat(201), "content": "", "nickname": "alice" }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], 422);
    assert_eq!(body["errors"].as_array().unwrap().len(), 2);
}

#[actix_rt::test]
async fn test_title_of_200_chars_is_accepted() {
    let app = board_app!();

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(post_body(&"가".repeat(200), "alice"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CREATED);
}

#[actix_rt::test]
async fn test_malformed_requests_are_bad_requests() {
    let app = board_app!();

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"title\":")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/api/posts/abc").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/posts?page=first")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_missing_post_is_not_found() {
    let app = board_app!();

    let req = test::TestRequest::get().uri("/api/posts/42").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["detail"], "Post with id 42 not found");

    let req = test::TestRequest::put()
        .uri("/api/posts/42")
        .set_json(json!({ "title": "t", "content": "c" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/posts/42/comments")
        .set_json(json!({ "content": "hi", "nickname": "bob" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_comment_update_and_delete_flow() {
    let app = board_app!();

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(post_body("Hello", "alice"))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{id}/comments"))
        .set_json(json!({ "content": "Nice!", "nickname": "bob" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let comment: Value = test::read_body_json(res).await;
    let comment_id = comment["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{id}"))
        .set_json(json!({ "title": "Title 2", "content": "Content 2" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "Title 2");
    assert_eq!(body["data"]["comments"][0]["authorNickname"], "bob");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{id}/comments/{comment_id}"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{id}"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{id}"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}
