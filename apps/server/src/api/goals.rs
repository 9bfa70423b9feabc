use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use workwise_core::goals::{Goal, NewGoal};
use workwise_core::suggestions::{GoalDetails, GoalSuggestions};

use super::users::CreatedResponse;
use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState};

async fn get_goals(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<Goal>>> {
    Ok(Json(state.goal_service.get_all_goals(&user.user_id)?))
}

async fn get_goal(
    Path(goal_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Goal>> {
    Ok(Json(
        state.goal_service.get_goal_by_id(&goal_id, &user.user_id)?,
    ))
}

async fn create_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(goal): Json<NewGoal>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let id = state.goal_service.create_goal(goal, &user.user_id).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

async fn update_goal(
    Path(goal_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(goal): Json<NewGoal>,
) -> ApiResult<Json<Goal>> {
    let g = state
        .goal_service
        .update_goal(&goal_id, goal, &user.user_id)
        .await?;
    Ok(Json(g))
}

async fn delete_goal(
    Path(goal_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<StatusCode> {
    state
        .goal_service
        .delete_goal(&goal_id, &user.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_suggestions(
    State(state): State<Arc<AppState>>,
    Json(details): Json<GoalDetails>,
) -> ApiResult<Json<GoalSuggestions>> {
    Ok(Json(
        state.suggestion_service.get_goal_suggestions(details).await?,
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goal/get-suggestions", post(get_suggestions))
        .route("/goal", get(get_goals).post(create_goal))
        .route(
            "/goal/{goal_id}",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
}
