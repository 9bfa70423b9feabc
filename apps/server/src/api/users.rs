use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use workwise_core::users::{LoginRequest, ResetPassword, Token, User, UserInput};

use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<Token>> {
    let token = state
        .user_service
        .login(&body.user_name, &body.password)
        .await?;
    tracing::info!("Authentication successful for {}", body.user_name);
    Ok(Json(token))
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(input): Json<UserInput>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let id = state.user_service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<StatusCode> {
    state.user_service.logout(&user.user_id).await?;
    Ok(StatusCode::OK)
}

async fn reset_password(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<ResetPassword>,
) -> ApiResult<StatusCode> {
    state
        .user_service
        .reset_password(body, &user.user_id)
        .await?;
    Ok(StatusCode::OK)
}

async fn get_user(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.user_service.get_user(&user_id, &user.user_id)?))
}

async fn update_user(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<UserInput>,
) -> ApiResult<Json<User>> {
    let updated = state
        .user_service
        .update_user(&user_id, input, &user.user_id)
        .await?;
    Ok(Json(updated))
}

async fn delete_user(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<StatusCode> {
    state
        .user_service
        .delete_user(&user_id, &user.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Routes reachable without a token.
pub fn public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user/login", post(login))
        .route("/user", post(create_user))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user/logout", post(logout))
        .route("/user/reset-password", post(reset_password))
        .route(
            "/user/{user_id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
