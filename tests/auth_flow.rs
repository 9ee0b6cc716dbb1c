mod common;

use common::{test_db, user_payload, TEST_BCRYPT_COST};
use serde_json::json;
use sitetrack::auth::{self, INVALID_CREDENTIALS};
use sitetrack::error::AppError;
use sitetrack::storage::repository::{UserPatch, UserRepository};

const SECRET: &str = "test-secret";

fn unauthorized_message(err: AppError) -> String {
    match err {
        AppError::Unauthorized(msg) => msg,
        other => panic!("expected Unauthorized, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_user_and_wrong_password_are_indistinguishable() {
    let db = test_db().await;
    UserRepository::create(&db, user_payload("nomsa", "secret123"), TEST_BCRYPT_COST)
        .await
        .unwrap();

    let unknown = auth::login(&db, SECRET, "ghost", "whatever1").await.unwrap_err();
    let wrong = auth::login(&db, SECRET, "nomsa", "wrongpass").await.unwrap_err();

    assert_eq!(unauthorized_message(unknown), INVALID_CREDENTIALS);
    assert_eq!(unauthorized_message(wrong), INVALID_CREDENTIALS);
}

#[tokio::test]
async fn successful_login_issues_token_and_stamps_last_login() {
    let db = test_db().await;
    let created = UserRepository::create(&db, user_payload("nomsa", "secret123"), TEST_BCRYPT_COST)
        .await
        .unwrap();
    assert_eq!(created.last_login, None);

    let outcome = auth::login(&db, SECRET, "nomsa", "secret123").await.unwrap();
    assert!(!outcome.token.is_empty());
    assert_eq!(outcome.user.username, "nomsa");
    assert!(outcome.user.last_login.is_some());

    let claims = sitetrack::auth::token::verify(SECRET, &outcome.token).unwrap();
    assert_eq!(claims.sub, created.id);
    assert_eq!(claims.role, "Viewer");
}

#[tokio::test]
async fn suspended_and_inactive_accounts_cannot_log_in() {
    let db = test_db().await;
    let user = UserRepository::create(&db, user_payload("nomsa", "secret123"), TEST_BCRYPT_COST)
        .await
        .unwrap();

    for status in ["suspended", "inactive"] {
        let patch: UserPatch = serde_json::from_value(json!({ "status": status })).unwrap();
        UserRepository::update(&db, user.id, patch, TEST_BCRYPT_COST)
            .await
            .unwrap();
        let err = auth::login(&db, SECRET, "nomsa", "secret123").await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)), "status {status}");
    }
}

#[tokio::test]
async fn wrong_password_on_suspended_account_stays_unauthorized() {
    // 凭证先于状态检查，避免用状态探测密码
    let db = test_db().await;
    let user = UserRepository::create(&db, user_payload("nomsa", "secret123"), TEST_BCRYPT_COST)
        .await
        .unwrap();
    let patch: UserPatch = serde_json::from_value(json!({ "status": "suspended" })).unwrap();
    UserRepository::update(&db, user.id, patch, TEST_BCRYPT_COST)
        .await
        .unwrap();

    let err = auth::login(&db, SECRET, "nomsa", "wrongpass").await.unwrap_err();
    assert_eq!(unauthorized_message(err), INVALID_CREDENTIALS);
}

#[tokio::test]
async fn empty_password_in_patch_keeps_the_old_hash() {
    let db = test_db().await;
    let user = UserRepository::create(&db, user_payload("nomsa", "secret123"), TEST_BCRYPT_COST)
        .await
        .unwrap();

    let patch: UserPatch =
        serde_json::from_value(json!({ "name": "Nomsa D.", "password": "" })).unwrap();
    let updated = UserRepository::update(&db, user.id, patch, TEST_BCRYPT_COST)
        .await
        .unwrap();
    assert_eq!(updated.name, "Nomsa D.");

    // 旧密码仍然有效
    auth::login(&db, SECRET, "nomsa", "secret123").await.unwrap();
}

#[tokio::test]
async fn new_password_rotates_the_hash() {
    let db = test_db().await;
    let user = UserRepository::create(&db, user_payload("nomsa", "secret123"), TEST_BCRYPT_COST)
        .await
        .unwrap();

    let patch: UserPatch = serde_json::from_value(json!({ "password": "newpass456" })).unwrap();
    UserRepository::update(&db, user.id, patch, TEST_BCRYPT_COST)
        .await
        .unwrap();

    let err = auth::login(&db, SECRET, "nomsa", "secret123").await.unwrap_err();
    assert_eq!(unauthorized_message(err), INVALID_CREDENTIALS);
    auth::login(&db, SECRET, "nomsa", "newpass456").await.unwrap();
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() {
    let db = test_db().await;
    UserRepository::create(&db, user_payload("nomsa", "secret123"), TEST_BCRYPT_COST)
        .await
        .unwrap();
    let err = UserRepository::create(&db, user_payload("nomsa", "other456"), TEST_BCRYPT_COST)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn seed_admin_only_fills_an_empty_table() {
    let db = test_db().await;
    UserRepository::ensure_seed_admin(&db, TEST_BCRYPT_COST).await.unwrap();

    let users = UserRepository::list(&db).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "admin");
    assert_eq!(users[0].role, "Admin");

    auth::login(&db, SECRET, "admin", "admin123").await.unwrap();

    // 再跑一次不会重复播种
    UserRepository::ensure_seed_admin(&db, TEST_BCRYPT_COST).await.unwrap();
    assert_eq!(UserRepository::list(&db).await.unwrap().len(), 1);
}

#[tokio::test]
async fn user_dto_never_exposes_the_password_hash() {
    let db = test_db().await;
    let user = UserRepository::create(&db, user_payload("nomsa", "secret123"), TEST_BCRYPT_COST)
        .await
        .unwrap();
    let value = serde_json::to_value(&user).unwrap();
    assert!(value.get("password").is_none());
    assert!(value.get("username").is_some());
}
