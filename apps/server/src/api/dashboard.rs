use std::sync::Arc;

use axum::{extract::State, routing::get, Extension, Json, Router};
use workwise_core::insights::DashboardInsights;
use workwise_core::suggestions::DashboardInfo;

use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState};

async fn get_dashboard_insights(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<DashboardInsights>> {
    Ok(Json(
        state
            .insights_service
            .get_dashboard_insights(&user.user_id)?,
    ))
}

async fn get_dashboard_info(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<DashboardInfo>> {
    Ok(Json(
        state
            .suggestion_service
            .get_dashboard_info(&user.user_id)
            .await?,
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/dashboard/goal-dashboard-insights",
            get(get_dashboard_insights),
        )
        .route("/dashboard/dashboard-info", get(get_dashboard_info))
}
