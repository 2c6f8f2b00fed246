use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkuId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for SkuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 分頁查詢商品與 SKU ID 的回應 (`GetProductAndSkuIds`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSkuIdsPage {
    #[serde(default)]
    pub data: HashMap<u64, Vec<u64>>,
    pub range: PageRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub total: u64,
    pub from: u64,
    pub to: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub brand_id: Option<u64>,
    #[serde(default)]
    pub category_id: Option<u64>,
    #[serde(default)]
    pub ref_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub description_short: Option<String>,
    #[serde(default)]
    pub meta_tag_description: Option<String>,
    #[serde(default)]
    pub is_visible: Option<bool>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SkuRecord {
    pub id: SkuId,
    pub product_id: ProductId,
    pub name: String,
    #[serde(default)]
    pub ref_id: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub packaged_height: Option<f64>,
    #[serde(default)]
    pub packaged_length: Option<f64>,
    #[serde(default)]
    pub packaged_width: Option<f64>,
    #[serde(default)]
    pub packaged_weight_kg: Option<f64>,
    #[serde(default)]
    pub commercial_condition_id: Option<u64>,
    #[serde(default)]
    pub measurement_unit: Option<String>,
    #[serde(default)]
    pub unit_multiplier: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    #[serde(default)]
    pub sku_id: Option<String>,
    #[serde(default)]
    pub balance: Option<Vec<WarehouseBalance>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseBalance {
    #[serde(default)]
    pub warehouse_id: Option<String>,
    #[serde(default)]
    pub warehouse_name: Option<String>,
    #[serde(default)]
    pub total_quantity: i64,
    #[serde(default)]
    pub reserved_quantity: i64,
    #[serde(default)]
    pub has_unlimited_quantity: Option<bool>,
}

impl InventoryRecord {
    /// 各倉庫 `totalQuantity` 加總，缺少 balance 視為 0。
    /// 負數 (超賣) 的倉庫以 0 計，加總飽和於 `u64::MAX`。
    pub fn total_quantity(&self) -> u64 {
        self.balance
            .iter()
            .flatten()
            .fold(0u64, |acc, entry| {
                acc.saturating_add(entry.total_quantity.max(0) as u64)
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub cost_price: Option<f64>,
    #[serde(default)]
    pub list_price: Option<f64>,
    #[serde(default)]
    pub base_price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuImage {
    #[serde(rename = "FileLocation", alias = "fileLocation", default)]
    pub file_location: Option<String>,
    #[serde(rename = "Name", alias = "name", default)]
    pub name: Option<String>,
    #[serde(rename = "IsMain", alias = "isMain", default)]
    pub is_main: Option<bool>,
}

/// 子資源查詢結果：成功取得，或失敗後以預設值代替
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Success(T),
    Fallback(T),
}

impl<T> Fetched<T> {
    pub fn value(&self) -> &T {
        match self {
            Fetched::Success(value) | Fetched::Fallback(value) => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Fetched::Fallback(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedSku {
    pub sku: SkuRecord,
    pub inventory: Fetched<u64>,
    pub cost_price: Fetched<Option<f64>>,
    pub image_urls: Fetched<Vec<String>>,
}

impl EnrichedSku {
    pub fn total_inventory(&self) -> u64 {
        *self.inventory.value()
    }

    pub fn cost_price(&self) -> Option<f64> {
        *self.cost_price.value()
    }

    pub fn image_urls(&self) -> &[String] {
        self.image_urls.value()
    }

    pub fn is_degraded(&self) -> bool {
        self.inventory.is_fallback() || self.cost_price.is_fallback() || self.image_urls.is_fallback()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductAggregate {
    pub product_id: ProductId,
    pub product: Option<ProductRecord>,
    pub skus: Vec<EnrichedSku>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetPayload {
    pub code: u64,
    pub name: String,
    pub brand_name: String,
    pub short_description: String,
    pub detailed_description: String,
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub code: u64,
    pub name: String,
    pub price: f64,
    pub stock: u64,
    pub attributes: Vec<VariantAttribute>,
    pub images: Vec<VariantImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantAttribute {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantImage {
    pub url: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products_processed: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_skus: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synced_with_target: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward_failures: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped_products: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batches: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SyncReport {
    /// 致命錯誤時的摘要：只帶 `success`、`error` 與時間戳
    pub fn failed(error: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            success: false,
            products_processed: None,
            total_skus: None,
            synced_with_target: None,
            forward_failures: None,
            skipped_products: None,
            batches: None,
            dry_run: None,
            error: Some(error.into()),
            started_at,
            finished_at: Utc::now(),
        }
    }
}
