mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{send, setup_app};
use invoice_backend::util::password::{PasswordUtils, PasswordUtilsImpl};

fn new_user(email: &str, password: &str) -> Value {
    json!({
        "username": "jdoe",
        "first_name": "Jane",
        "last_name": "Doe",
        "email": email,
        "password": password
    })
}

#[tokio::test]
async fn test_create_user_hashes_password_and_defaults_role() {
    let app = setup_app();
    let (status, body) = send(&app.router, "POST", "/users", Some(new_user("jane@example.com", "Abcdef12"))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], "user");
    assert!(body.get("password_hash").is_none());
    assert!(body.get("password").is_none());

    let users = app.users.users.lock().unwrap();
    assert_eq!(users.len(), 1);
    assert!(PasswordUtilsImpl::verify_password("Abcdef12", &users[0].password_hash).unwrap());
}

#[tokio::test]
async fn test_create_user_rejects_weak_password() {
    let app = setup_app();
    let (status, body) = send(&app.router, "POST", "/users", Some(new_user("jane@example.com", "abcdef12"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("uppercase"));
    assert!(app.users.users.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_user_rejects_unknown_role_and_bad_email() {
    let app = setup_app();
    let mut body = new_user("jane@example.com", "Abcdef12");
    body["role"] = json!("superuser");
    let (status, resp) = send(&app.router, "POST", "/users", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["error"], "Validation");

    let (status, _) = send(&app.router, "POST", "/users", Some(new_user("not-an-email", "Abcdef12"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = setup_app();
    send(&app.router, "POST", "/users", Some(new_user("jane@example.com", "Abcdef12"))).await;
    let (status, body) = send(&app.router, "POST", "/users", Some(new_user("jane@example.com", "Xyzabc34"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");
}

#[tokio::test]
async fn test_get_update_list_delete_user() {
    let app = setup_app();
    let (_, created) = send(&app.router, "POST", "/users", Some(new_user("jane@example.com", "Abcdef12"))).await;
    let id = created["id"]["$oid"].as_str().unwrap().to_string();
    let uri = format!("/users/{}", id);

    let (status, fetched) = send(&app.router, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["email"], "jane@example.com");

    let (status, updated) = send(&app.router, "PUT", &uri, Some(json!({ "role": "admin", "last_name": "Smith" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["role"], "admin");
    assert_eq!(updated["last_name"], "Smith");
    assert_eq!(updated["first_name"], "Jane");

    let (status, weak) = send(&app.router, "PUT", &uri, Some(json!({ "password": "short" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(weak["error"], "BadRequest");

    let (status, list) = send(&app.router, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, _) = send(&app.router, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app.router, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
