use crate::domain::model::{
    InventoryRecord, PriceRecord, ProductId, ProductRecord, ProductSkuIdsPage, SkuId, SkuImage,
    SkuRecord, TargetPayload,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 來源電商平台 (唯讀)
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// `from`/`to` 為 1 起算的閉區間
    async fn product_and_sku_ids(&self, from: u64, to: u64) -> Result<ProductSkuIdsPage>;
    async fn product(&self, id: ProductId) -> Result<ProductRecord>;
    async fn skus_by_product(&self, id: ProductId) -> Result<Vec<SkuRecord>>;
    async fn inventory(&self, sku: SkuId) -> Result<InventoryRecord>;
    /// 沒有價格時回傳 `Ok(None)`
    async fn price(&self, sku: SkuId) -> Result<Option<PriceRecord>>;
    async fn images(&self, sku: SkuId) -> Result<Vec<SkuImage>>;
}

/// 目標商品目錄 (唯寫)
#[async_trait]
pub trait CatalogTarget: Send + Sync {
    async fn save_product(&self, payload: &TargetPayload) -> Result<()>;
}

pub trait SyncSettings: Send + Sync {
    fn account(&self) -> &str;
    fn page_size(&self) -> u64;
    fn batch_size(&self) -> usize;
    fn sku_concurrency(&self) -> usize;
    fn max_products(&self) -> Option<usize>;
    fn dry_run(&self) -> bool;
}
