mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use sitetrack::api::{self, AppState};
use sitetrack::config::Config;
use sitetrack::storage::repository::{
    DistrictRepository, SiteRepository, UserDto, UserPatch, UserRepository,
};
use std::sync::Arc;
use tower::ServiceExt;

use common::{district_payload, site_payload, test_db, user_payload, TEST_BCRYPT_COST};

const SECRET: &str = "test-secret";

async fn test_app() -> (Router, DatabaseConnection) {
    let db = test_db().await;
    let config = Config {
        database_url: String::new(),
        bind_addr: String::new(),
        jwt_secret: SECRET.to_string(),
        bcrypt_cost: TEST_BCRYPT_COST,
    };
    let state = AppState {
        db: db.clone(),
        config: Arc::new(config),
    };
    (api::router(state), db)
}

async fn seed_admin(db: &DatabaseConnection) -> UserDto {
    let mut new = user_payload("boss", "admin123");
    new.role = "Admin".to_string();
    UserRepository::create(db, new, TEST_BCRYPT_COST).await.unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "username": username, "password": password })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn protected_routes_require_a_bearer_token() {
    let (app, _db) = test_app().await;

    let resp = app
        .clone()
        .oneshot(json_request("GET", "/districts", None, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app
        .clone()
        .oneshot(json_request("GET", "/districts", Some("not-a-jwt"), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn suspension_invalidates_an_already_issued_token() {
    let (app, db) = test_app().await;
    let user = UserRepository::create(&db, user_payload("nomsa", "secret123"), TEST_BCRYPT_COST)
        .await
        .unwrap();

    let token = login(&app, "nomsa", "secret123").await;
    let resp = app
        .clone()
        .oneshot(json_request("GET", "/districts", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // 签名仍然有效，但状态按库里的现值判
    let patch: UserPatch = serde_json::from_value(json!({ "status": "suspended" })).unwrap();
    UserRepository::update(&db, user.id, patch, TEST_BCRYPT_COST)
        .await
        .unwrap();

    let resp = app
        .clone()
        .oneshot(json_request("GET", "/districts", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn user_administration_is_admin_only() {
    let (app, db) = test_app().await;
    let admin = seed_admin(&db).await;
    let viewer = UserRepository::create(&db, user_payload("nomsa", "secret123"), TEST_BCRYPT_COST)
        .await
        .unwrap();
    let token = login(&app, "nomsa", "secret123").await;

    let resp = app
        .clone()
        .oneshot(json_request("GET", "/users", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 自己的资料可以看
    let resp = app
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/users/{}", viewer.id),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // 别人的不行
    let resp = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/users/{}", admin.id),
            Some(&token),
            Some(json!({ "role": "Viewer" })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 自己的角色也不行
    let resp = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/users/{}", viewer.id),
            Some(&token),
            Some(json!({ "role": "Admin" })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let unchanged = UserRepository::get(&db, viewer.id).await.unwrap().unwrap();
    assert_eq!(unchanged.role, "Viewer");
}

#[tokio::test]
async fn image_index_out_of_range_is_a_client_error() {
    let (app, db) = test_app().await;
    seed_admin(&db).await;
    DistrictRepository::create(&db, district_payload("North")).await.unwrap();
    let site = SiteRepository::create(&db, site_payload("ST-001", "North"))
        .await
        .unwrap();
    let token = login(&app, "boss", "admin123").await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/sites/{}/images", site.id),
            Some(&token),
            Some(json!({ "urls": ["a.jpg", "b.jpg"] })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/sites/{}/images/5", site.id),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert!(body["errors"]["index"].is_string());

    let resp = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/sites/{}/images/0", site.id),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["images"], json!(["b.jpg"]));
}

#[tokio::test]
async fn missing_required_fields_are_a_structured_400() {
    let (app, db) = test_app().await;
    seed_admin(&db).await;
    let token = login(&app, "boss", "admin123").await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/sites",
            Some(&token),
            Some(json!({ "siteId": "ST-001" })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Validation error");
    assert!(body["errors"]["name"].is_string());
    assert!(body["errors"]["district"].is_string());

    assert!(SiteRepository::list(&db).await.unwrap().is_empty());
}
