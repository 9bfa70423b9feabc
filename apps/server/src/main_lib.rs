use std::sync::Arc;

use crate::{
    auth::{decode_secret_key, AuthManager},
    config::Config,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use workwise_core::{
    goals::{GoalService, GoalServiceTrait},
    insights::{InsightsService, InsightsServiceTrait},
    suggestions::{GenAiClient, SuggestionService, SuggestionServiceTrait},
    tasks::{TaskService, TaskServiceTrait},
    users::{UserService, UserServiceTrait},
};
use workwise_storage_sqlite::{
    db, goals::GoalRepository, tasks::TaskRepository, users::UserRepository,
};

pub struct AppState {
    pub goal_service: Arc<dyn GoalServiceTrait>,
    pub task_service: Arc<dyn TaskServiceTrait>,
    pub insights_service: Arc<dyn InsightsServiceTrait>,
    pub suggestion_service: Arc<dyn SuggestionServiceTrait>,
    pub user_service: Arc<dyn UserServiceTrait>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing() {
    let log_format = std::env::var("WW_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // `try_init` also installs the `log` bridge; a second call is a no-op.
    let installed = if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .try_init()
    };
    if let Err(e) = installed {
        eprintln!("Tracing already initialised: {e}");
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer(&pool)?;

    let goal_repo = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let task_repo = Arc::new(TaskRepository::new(pool.clone(), writer.clone()));
    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer));

    let jwt_secret = decode_secret_key(&config.jwt_secret)?;
    let auth = Arc::new(AuthManager::new(
        &jwt_secret,
        &config.jwt_issuer,
        config.access_token_ttl,
    ));

    if config.auth_iterations.is_none() {
        tracing::warn!("WW_AUTH_ITERATIONS is not set; password operations will fail");
    }
    if config.genai_base_url.is_none() {
        tracing::warn!("WW_GENAI_BASE_URL is not set; suggestion calls will fail");
    }

    let goal_service = Arc::new(GoalService::new(goal_repo.clone(), task_repo.clone()));
    let task_service = Arc::new(TaskService::new(task_repo.clone(), goal_repo.clone()));
    let insights_service: Arc<dyn InsightsServiceTrait> =
        Arc::new(InsightsService::new(goal_repo, task_repo));
    let genai_client = Arc::new(GenAiClient::new(
        config.genai_base_url.clone(),
        config.genai_api_key.clone(),
    ));
    let suggestion_service = Arc::new(SuggestionService::new(
        genai_client,
        insights_service.clone(),
    ));
    let user_service = Arc::new(UserService::new(
        user_repo,
        auth.clone(),
        config.auth_iterations,
    ));

    Ok(Arc::new(AppState {
        goal_service,
        task_service,
        insights_service,
        suggestion_service,
        user_service,
        auth,
    }))
}
