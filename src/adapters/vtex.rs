use crate::config::toml_config::SourceConfig;
use crate::domain::model::{
    InventoryRecord, PriceRecord, ProductId, ProductRecord, ProductSkuIdsPage, SkuId, SkuImage,
    SkuRecord,
};
use crate::domain::ports::CatalogSource;
use crate::utils::error::{Result, SyncError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// VTEX 目錄 / 庫存 / 價格 API 客戶端
pub struct VtexCatalogClient {
    client: Client,
    base_url: String,
    pricing_base_url: String,
}

impl VtexCatalogClient {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let (Some(key), Some(token)) = (&config.app_key, &config.app_token) {
            insert_header(&mut headers, "x-vtex-api-appkey", key)?;
            insert_header(&mut headers, "x-vtex-api-apptoken", token)?;
        }
        if let Some(cookie) = &config.auth_cookie {
            insert_header(&mut headers, "vtexidclientautcookie", cookie)?;
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            pricing_base_url: config.pricing_base_url().trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::UnexpectedStatus {
                url,
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

fn insert_header(headers: &mut HeaderMap, name: &'static str, value: &str) -> Result<()> {
    let mut value = HeaderValue::from_str(value).map_err(|e| SyncError::ConfigError {
        message: format!("Invalid value for header {}: {}", name, e),
    })?;
    value.set_sensitive(true);
    headers.insert(HeaderName::from_static(name), value);
    Ok(())
}

#[async_trait]
impl CatalogSource for VtexCatalogClient {
    async fn product_and_sku_ids(&self, from: u64, to: u64) -> Result<ProductSkuIdsPage> {
        self.get_json(format!(
            "{}/api/catalog_system/pvt/products/GetProductAndSkuIds?_from={}&_to={}",
            self.base_url, from, to
        ))
        .await
    }

    async fn product(&self, id: ProductId) -> Result<ProductRecord> {
        self.get_json(format!("{}/api/catalog/pvt/product/{}", self.base_url, id))
            .await
    }

    async fn skus_by_product(&self, id: ProductId) -> Result<Vec<SkuRecord>> {
        self.get_json(format!(
            "{}/api/catalog_system/pvt/sku/stockkeepingunitByProductId/{}",
            self.base_url, id
        ))
        .await
    }

    async fn inventory(&self, sku: SkuId) -> Result<InventoryRecord> {
        self.get_json(format!(
            "{}/api/logistics/pvt/inventory/skus/{}",
            self.base_url, sku
        ))
        .await
    }

    async fn price(&self, sku: SkuId) -> Result<Option<PriceRecord>> {
        let url = format!("{}/pricing/prices/{}", self.pricing_base_url, sku);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        // 404 代表此 SKU 尚未設定價格
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(response.json().await?),
            status => Err(SyncError::UnexpectedStatus {
                url,
                status: status.as_u16(),
            }),
        }
    }

    async fn images(&self, sku: SkuId) -> Result<Vec<SkuImage>> {
        self.get_json(format!(
            "{}/api/catalog/pvt/stockkeepingunit/{}/file",
            self.base_url, sku
        ))
        .await
    }
}
