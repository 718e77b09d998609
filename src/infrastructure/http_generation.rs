// HTTP generation client implementation
use crate::application::generation_client::{GenerationClient, GenerationContext};
use crate::domain::specification::DashboardSpecification;
use anyhow::{Context, Result};
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct HttpGenerationClient {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl HttpGenerationClient {
    pub fn new(base_url: String, token: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl GenerationClient for HttpGenerationClient {
    async fn generate(&self, context: &GenerationContext) -> Result<DashboardSpecification> {
        let url = format!("{}/generate", self.base_url);
        let mut request = self.client.post(&url).json(context);
        if !self.token.is_empty() {
            request = request.header("Authorization", format!("Bearer {}", self.token));
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to send generation request to {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Generation failed with status {}: {}", status, body);
        }

        response
            .json::<DashboardSpecification>()
            .await
            .context("Failed to parse generated specification")
    }
}
