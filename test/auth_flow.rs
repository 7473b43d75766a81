use axum::http::{Method, StatusCode};
use bloglist_backend::use_cases::ownership::OwnershipPolicy;
use serde_json::json;

#[path = "common/mod.rs"]
mod common;

use common::{memory_app, send, signup_and_login};

#[tokio::test]
async fn signup_then_login() {
    let app = memory_app(OwnershipPolicy::Lenient);

    let (status, user) = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({ "username": "root", "name": "Superuser", "password": "sekret" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["username"], "root");
    assert_eq!(user["name"], "Superuser");
    assert!(user["id"].is_string());
    assert!(user.get("passwordHash").is_none());
    assert!(user.get("password").is_none());

    let (status, session) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "username": "root", "password": "sekret" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(session["token"].as_str().is_some_and(|token| !token.is_empty()));
    assert_eq!(session["username"], "root");
    assert_eq!(session["name"], "Superuser");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "username": "root", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid credentials");
}

#[tokio::test]
async fn login_of_unknown_user_is_unauthorized() {
    let app = memory_app(OwnershipPolicy::Lenient);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "username": "ghost", "password": "sekret" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid credentials");
}

#[tokio::test]
async fn short_credentials_are_rejected() {
    let app = memory_app(OwnershipPolicy::Lenient);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({ "username": "ro", "password": "sekret" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "username must be at least 3 characters long");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({ "username": "root", "password": "se" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "password must be at least 3 characters long");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({ "name": "nobody" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(common::count(&app, "/api/users").await, 0);
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let app = memory_app(OwnershipPolicy::Lenient);
    signup_and_login(&app, "root", "sekret").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({ "username": "root", "password": "another" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "expected `username` to be unique");
    assert_eq!(common::count(&app, "/api/users").await, 1);
}

#[tokio::test]
async fn users_list_their_resources() {
    let app = memory_app(OwnershipPolicy::Lenient);
    let (token, user_id) = signup_and_login(&app, "mluukkai", "salainen").await;
    signup_and_login(&app, "hellas", "salainen").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/blogs",
        Some(&token),
        Some(json!({
            "title": "Type wars",
            "author": "Robert C. Martin",
            "url": "http://blog.cleancoder.com/uncle-bob/2016/05/01/TypeWars.html",
            "likes": 2
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/notes",
        Some(&token),
        Some(json!({ "content": "HTML is easy", "important": true })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, users) = send(&app, Method::GET, "/api/users", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 2);

    let owner = users.iter().find(|user| user["id"] == user_id.as_str()).unwrap();
    assert_eq!(owner["blogs"].as_array().unwrap().len(), 1);
    assert_eq!(owner["blogs"][0]["title"], "Type wars");
    assert_eq!(owner["notes"][0]["content"], "HTML is easy");
    assert!(owner.get("passwordHash").is_none());

    let other = users.iter().find(|user| user["username"] == "hellas").unwrap();
    assert!(other["blogs"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_endpoint_answers_json() {
    let app = memory_app(OwnershipPolicy::Lenient);

    let (status, body) = send(&app, Method::GET, "/api/nothing-here", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "unknown endpoint");
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let app = memory_app(OwnershipPolicy::Lenient);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!("just a string")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
