//! HTTP client for the generative text endpoint.

use async_trait::async_trait;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::constants::GENAI_BASE_URL_KEY;
use crate::errors::{Error, Result};
use crate::suggestions::suggestions_model::{GenerateContentRequest, GenerateContentResponse};
use crate::suggestions::suggestions_traits::CompletionProviderTrait;

/// Client for a `generateContent`-style completion endpoint.
///
/// One POST per call. No retries and no timeout beyond the reqwest default.
#[derive(Debug, Clone)]
pub struct GenAiClient {
    client: reqwest::Client,
    base_url: Option<String>,
    api_key: Option<String>,
}

impl GenAiClient {
    pub fn new(base_url: Option<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.filter(|u| !u.trim().is_empty()),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Configured URL with `?key=` appended when an API key is present.
    pub fn endpoint_url(&self) -> Result<String> {
        let base_url = self.base_url.as_deref().ok_or_else(|| {
            log::error!("{} is not configured", GENAI_BASE_URL_KEY);
            Error::missing_config(GENAI_BASE_URL_KEY)
        })?;
        Ok(match &self.api_key {
            Some(key) => format!("{}?key={}", base_url, key),
            None => base_url.to_string(),
        })
    }

    /// POSTs `body` as JSON and decodes the reply.
    ///
    /// Any transport failure, non-success status or undecodable body yields
    /// `T::default()`.
    pub async fn post_completion<T, B>(&self, endpoint_url: &str, body: &B) -> T
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let response = match self.client.post(endpoint_url).json(body).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Completion request failed: {}", e);
                return T::default();
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Completion endpoint returned {}", status);
            return T::default();
        }

        match response.text().await {
            Ok(text) => {
                debug!("Completion response ({}): {} bytes", status, text.len());
                serde_json::from_str(&text).unwrap_or_else(|e| {
                    warn!("Failed to decode completion response: {}", e);
                    T::default()
                })
            }
            Err(e) => {
                warn!("Failed to read completion response: {}", e);
                T::default()
            }
        }
    }
}

#[async_trait]
impl CompletionProviderTrait for GenAiClient {
    async fn generate(&self, prompt: &str) -> Result<GenerateContentResponse> {
        let url = self.endpoint_url()?;
        let request = GenerateContentRequest::from_prompt(prompt);
        Ok(self.post_completion(&url, &request).await)
    }
}
