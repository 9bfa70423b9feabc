use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use workwise_core::constants::{AUTH_ITERATIONS_KEY, GENAI_BASE_URL_KEY};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Raw HMAC secret; see [`crate::auth::decode_secret_key`].
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub access_token_ttl: Duration,
    pub auth_iterations: Option<u32>,
    pub genai_base_url: Option<String>,
    pub genai_api_key: Option<String>,
}

fn optional_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("WW_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid WW_LISTEN_ADDR")?;
        let db_path = std::env::var("WW_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let cors_allow = std::env::var("WW_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("WW_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let jwt_secret = std::env::var("WW_JWT_SECRET").context("WW_JWT_SECRET must be set")?;
        let jwt_issuer = std::env::var("WW_JWT_ISSUER").unwrap_or_else(|_| "workwise".into());
        let ttl_secs: u64 = std::env::var("WW_ACCESS_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "86400".into())
            .parse()
            .unwrap_or(86400);
        let auth_iterations = match optional_var(AUTH_ITERATIONS_KEY) {
            Some(raw) => Some(
                raw.parse::<u32>()
                    .with_context(|| format!("Invalid {}", AUTH_ITERATIONS_KEY))?,
            ),
            None => None,
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            jwt_secret,
            jwt_issuer,
            access_token_ttl: Duration::from_secs(ttl_secs),
            auth_iterations,
            genai_base_url: optional_var(GENAI_BASE_URL_KEY),
            genai_api_key: optional_var("WW_GENAI_API_KEY"),
        })
    }
}
