use crate::config::toml_config::TargetConfig;
use crate::domain::model::TargetPayload;
use crate::domain::ports::CatalogTarget;
use crate::utils::error::{Result, SyncError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// 目標商品服務：建立 / 更新商品與其變體
pub struct TargetCatalogClient {
    client: Client,
    products_url: String,
    api_token: Option<String>,
}

impl TargetCatalogClient {
    pub fn new(config: &TargetConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            products_url: format!(
                "{}/{}",
                config.base_url.trim_end_matches('/'),
                config.products_path().trim_start_matches('/')
            ),
            api_token: config.api_token.clone(),
        })
    }
}

#[async_trait]
impl CatalogTarget for TargetCatalogClient {
    async fn save_product(&self, payload: &TargetPayload) -> Result<()> {
        let mut request = self.client.post(&self.products_url).json(payload);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("POST {} -> {}", self.products_url, status);

        if !status.is_success() {
            return Err(SyncError::UnexpectedStatus {
                url: self.products_url.clone(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
