use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;
use workwise_server::{api::app_router, build_state, config::Config};

fn test_config(tmp: &TempDir) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: tmp.path().join("test.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        jwt_secret: "0123456789abcdef0123456789abcde!".to_string(),
        jwt_issuer: "workwise".to_string(),
        access_token_ttl: Duration::from_secs(600),
        auth_iterations: Some(1),
        genai_base_url: None,
        genai_api_key: None,
    }
}

async fn build_test_router() -> (Router, TempDir) {
    let tmp = tempdir().unwrap();
    let config = test_config(&tmp);
    let state = build_state(&config).await.unwrap();
    (app_router(state, &config).unwrap(), tmp)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn sign_up_and_login(app: &Router, email: &str) -> (String, String) {
    let (status, created) = send(
        app,
        Method::POST,
        "/api/user",
        None,
        Some(json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": email,
            "phone_number": "555-0100"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let user_id = created["id"].as_str().unwrap().to_string();

    let (status, token) = send(
        app,
        Method::POST,
        "/api/user/login",
        None,
        Some(json!({ "user_name": email, "password": "welcome1234" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(token["token_type"], "Bearer");
    (user_id, token["access_token"].as_str().unwrap().to_string())
}

#[tokio::test]
async fn healthz_is_public() {
    let (app, _tmp) = build_test_router().await;
    let (status, _) = send(&app, Method::GET, "/api/healthz", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let (app, _tmp) = build_test_router().await;

    let (status, body) = send(&app, Method::GET, "/api/goal", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status_code"], 401);

    let (status, _) = send(&app, Method::GET, "/api/goal", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_failures_map_to_structured_errors() {
    let (app, _tmp) = build_test_router().await;
    sign_up_and_login(&app, "ada@example.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/user/login",
        None,
        Some(json!({ "user_name": "ada@example.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["status_code"], 403);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/user/login",
        None,
        Some(json!({ "user_name": "nobody@example.com", "password": "welcome1234" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/user",
        None,
        Some(json!({
            "first_name": "Ada",
            "last_name": "Again",
            "email": "ada@example.com"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn goal_lifecycle() {
    let (app, _tmp) = build_test_router().await;
    let (_, token) = sign_up_and_login(&app, "ada@example.com").await;
    let token = Some(token.as_str());

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/goal",
        token,
        Some(json!({
            "title": "Learn Rust",
            "status": "In Progress",
            "priority": "High",
            "task_list": [
                { "title": "Read the book", "status": "Completed" },
                { "title": "Write a CLI" }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let goal_id = created["id"].as_str().unwrap().to_string();
    let goal_uri = format!("/api/goal/{}", goal_id);

    let (status, goal) = send(&app, Method::GET, &goal_uri, token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(goal["status"], "In Progress");
    assert_eq!(goal["progress"].as_f64(), Some(50.0));
    assert_eq!(goal["task_list"].as_array().unwrap().len(), 2);
    assert!(goal["task_list"]
        .as_array()
        .unwrap()
        .iter()
        .all(|t| t["task_type"] == "GoalRelated"));

    let (status, insights) = send(
        &app,
        Method::GET,
        "/api/dashboard/goal-dashboard-insights",
        token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(insights["goal_insights"]["total_goals"], 1);
    assert_eq!(insights["task_insights"]["total_tasks"], 2);
    assert_eq!(insights["task_insights"]["goal_related_tasks_percentage"], 100);

    let (status, _) = send(&app, Method::DELETE, &goal_uri, token, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &goal_uri, token, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Goal not found.");
}

#[tokio::test]
async fn goals_are_invisible_to_other_users() {
    let (app, _tmp) = build_test_router().await;
    let (_, ada) = sign_up_and_login(&app, "ada@example.com").await;
    let (_, bob) = sign_up_and_login(&app, "bob@example.com").await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/goal",
        Some(&ada),
        Some(json!({ "title": "Private goal" })),
    )
    .await;
    let goal_uri = format!("/api/goal/{}", created["id"].as_str().unwrap());

    let (status, _) = send(&app, Method::GET, &goal_uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, &goal_uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, goals) = send(&app, Method::GET, "/api/goal", Some(&bob), None).await;
    assert_eq!(goals.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn individual_task_endpoints() {
    let (app, _tmp) = build_test_router().await;
    let (_, token) = sign_up_and_login(&app, "ada@example.com").await;
    let token = Some(token.as_str());

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/tasks",
        token,
        Some(json!([{ "title": "Buy milk" }, { "title": "Call mum", "priority": "Urgent" }])),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["created"], 2);

    let (_, tasks) = send(&app, Method::GET, "/api/tasks", token, None).await;
    let tasks = tasks.as_array().unwrap().clone();
    assert_eq!(tasks.len(), 2);
    let task_uri = format!("/api/task/{}", tasks[0]["id"].as_str().unwrap());

    let (status, updated) = send(
        &app,
        Method::PUT,
        &task_uri,
        token,
        Some(json!({ "title": "Buy oat milk", "status": "Completed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "Completed");

    let (status, _) = send(&app, Method::DELETE, &task_uri, token, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, tasks) = send(&app, Method::GET, "/api/tasks", token, None).await;
    assert_eq!(tasks.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn suggestions_without_endpoint_are_internal_errors() {
    let (app, _tmp) = build_test_router().await;
    let (_, token) = sign_up_and_login(&app, "ada@example.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/goal/get-suggestions",
        Some(&token),
        Some(json!({
            "goal": "Learn Spanish",
            "importance": "Moving abroad",
            "time_frame": 6,
            "time_per_week": 5
        })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal Server Error - Key Not Found");
}

#[tokio::test]
async fn user_account_management() {
    let (app, _tmp) = build_test_router().await;
    let (ada_id, ada) = sign_up_and_login(&app, "ada@example.com").await;
    let (_, bob) = sign_up_and_login(&app, "bob@example.com").await;
    let ada_uri = format!("/api/user/{}", ada_id);

    let (status, user) = send(&app, Method::GET, &ada_uri, Some(&ada), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["email"], "ada@example.com");

    let (status, _) = send(&app, Method::GET, &ada_uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/user/reset-password",
        Some(&ada),
        Some(json!({
            "email": "ada@example.com",
            "current_password": "welcome1234",
            "new_password": "n3w-secret"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/user/login",
        None,
        Some(json!({ "user_name": "ada@example.com", "password": "n3w-secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::POST, "/api/user/logout", Some(&ada), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::DELETE, &ada_uri, Some(&ada), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/user/login",
        None,
        Some(json!({ "user_name": "ada@example.com", "password": "n3w-secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
