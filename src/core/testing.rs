//! In-memory ports shared by the core unit tests.

use crate::domain::model::{
    InventoryRecord, PageRange, PriceRecord, ProductId, ProductRecord, ProductSkuIdsPage, SkuId,
    SkuImage, SkuRecord, TargetPayload, WarehouseBalance,
};
use crate::domain::ports::{CatalogSource, CatalogTarget, SyncSettings};
use crate::utils::error::{Result, SyncError};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Failure {
    Page { from: u64 },
    Product(ProductId),
    Skus(ProductId),
    Inventory(SkuId),
    Price(SkuId),
    Images(SkuId),
}

fn not_found(what: &str) -> SyncError {
    SyncError::UnexpectedStatus {
        url: format!("fake://{}", what),
        status: 404,
    }
}

fn injected(what: &str) -> SyncError {
    SyncError::UnexpectedStatus {
        url: format!("fake://{}", what),
        status: 500,
    }
}

#[derive(Default)]
pub struct FakeSource {
    pub id_map: BTreeMap<u64, Vec<u64>>,
    pub products: HashMap<ProductId, ProductRecord>,
    pub skus: HashMap<ProductId, Vec<SkuRecord>>,
    pub inventory: HashMap<SkuId, InventoryRecord>,
    pub prices: HashMap<SkuId, PriceRecord>,
    pub images: HashMap<SkuId, Vec<SkuImage>>,
    pub failures: HashSet<Failure>,
    pub page_calls: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 商品、其 SKU 及 ID 清單一次建好，每個 SKU 各有 1 件庫存
    pub fn with_product(mut self, id: u64, name: &str, sku_ids: &[u64]) -> Self {
        let product_id = ProductId(id);
        self.id_map.insert(id, sku_ids.to_vec());
        self.products.insert(product_id, product_record(id, name));
        self.skus.insert(
            product_id,
            sku_ids
                .iter()
                .map(|sku| sku_record(*sku, id, &format!("{} #{}", name, sku)))
                .collect(),
        );
        for sku in sku_ids {
            self.inventory.insert(SkuId(*sku), inventory_record(&[1]));
        }
        self
    }

    pub fn with_inventory(mut self, sku: u64, quantities: &[i64]) -> Self {
        self.inventory.insert(SkuId(sku), inventory_record(quantities));
        self
    }

    pub fn with_price(mut self, sku: u64, cost_price: f64) -> Self {
        self.prices.insert(
            SkuId(sku),
            PriceRecord {
                item_id: Some(sku.to_string()),
                cost_price: Some(cost_price),
                list_price: None,
                base_price: None,
            },
        );
        self
    }

    pub fn with_images(mut self, sku: u64, locations: &[&str]) -> Self {
        self.images.insert(
            SkuId(sku),
            locations
                .iter()
                .map(|location| SkuImage {
                    file_location: Some(location.to_string()),
                    name: None,
                    is_main: None,
                })
                .collect(),
        );
        self
    }

    pub fn failing(mut self, failure: Failure) -> Self {
        self.failures.insert(failure);
        self
    }

    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    fn check(&self, failure: Failure, what: &str) -> Result<()> {
        if self.failures.contains(&failure) {
            Err(injected(what))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CatalogSource for FakeSource {
    async fn product_and_sku_ids(&self, from: u64, to: u64) -> Result<ProductSkuIdsPage> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        self.check(Failure::Page { from }, "page")?;

        let data = self
            .id_map
            .iter()
            .skip(from.saturating_sub(1) as usize)
            .take((to + 1).saturating_sub(from) as usize)
            .map(|(product, skus)| (*product, skus.clone()))
            .collect();

        Ok(ProductSkuIdsPage {
            data,
            range: PageRange {
                total: self.id_map.len() as u64,
                from,
                to,
            },
        })
    }

    async fn product(&self, id: ProductId) -> Result<ProductRecord> {
        self.check(Failure::Product(id), "product")?;
        self.products
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("product"))
    }

    async fn skus_by_product(&self, id: ProductId) -> Result<Vec<SkuRecord>> {
        self.check(Failure::Skus(id), "skus")?;
        Ok(self.skus.get(&id).cloned().unwrap_or_default())
    }

    async fn inventory(&self, sku: SkuId) -> Result<InventoryRecord> {
        self.check(Failure::Inventory(sku), "inventory")?;
        self.inventory
            .get(&sku)
            .cloned()
            .ok_or_else(|| not_found("inventory"))
    }

    async fn price(&self, sku: SkuId) -> Result<Option<PriceRecord>> {
        self.check(Failure::Price(sku), "price")?;
        Ok(self.prices.get(&sku).cloned())
    }

    async fn images(&self, sku: SkuId) -> Result<Vec<SkuImage>> {
        self.check(Failure::Images(sku), "images")?;
        Ok(self.images.get(&sku).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct RecordingTarget {
    pub saved: Mutex<Vec<TargetPayload>>,
    pub failing_codes: HashSet<u64>,
}

impl RecordingTarget {
    pub fn failing_for(codes: &[u64]) -> Self {
        Self {
            saved: Mutex::new(Vec::new()),
            failing_codes: codes.iter().copied().collect(),
        }
    }

    pub fn saved_codes(&self) -> Vec<u64> {
        let mut codes: Vec<u64> = self
            .saved
            .lock()
            .map(|saved| saved.iter().map(|p| p.code).collect())
            .unwrap_or_default();
        codes.sort_unstable();
        codes
    }
}

#[async_trait]
impl CatalogTarget for RecordingTarget {
    async fn save_product(&self, payload: &TargetPayload) -> Result<()> {
        if self.failing_codes.contains(&payload.code) {
            return Err(injected("target"));
        }
        if let Ok(mut saved) = self.saved.lock() {
            saved.push(payload.clone());
        }
        Ok(())
    }
}

pub struct TestSettings {
    pub account: String,
    pub page_size: u64,
    pub batch_size: usize,
    pub sku_concurrency: usize,
    pub max_products: Option<usize>,
    pub dry_run: bool,
}

impl Default for TestSettings {
    fn default() -> Self {
        Self {
            account: "mystore".to_string(),
            page_size: 250,
            batch_size: 10,
            sku_concurrency: 5,
            max_products: None,
            dry_run: false,
        }
    }
}

impl SyncSettings for TestSettings {
    fn account(&self) -> &str {
        &self.account
    }

    fn page_size(&self) -> u64 {
        self.page_size
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn sku_concurrency(&self) -> usize {
        self.sku_concurrency
    }

    fn max_products(&self) -> Option<usize> {
        self.max_products
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }
}

pub fn product_record(id: u64, name: &str) -> ProductRecord {
    ProductRecord {
        id: ProductId(id),
        name: name.to_string(),
        brand_id: Some(2000001),
        category_id: None,
        ref_id: None,
        title: Some(format!("{} title", name)),
        description: Some(format!("{} description", name)),
        description_short: None,
        meta_tag_description: None,
        is_visible: Some(true),
        is_active: Some(true),
    }
}

pub fn sku_record(id: u64, product_id: u64, name: &str) -> SkuRecord {
    SkuRecord {
        id: SkuId(id),
        product_id: ProductId(product_id),
        name: name.to_string(),
        ref_id: None,
        is_active: Some(true),
        packaged_height: None,
        packaged_length: None,
        packaged_width: None,
        packaged_weight_kg: None,
        commercial_condition_id: None,
        measurement_unit: Some("un".to_string()),
        unit_multiplier: Some(1.0),
    }
}

pub fn inventory_record(quantities: &[i64]) -> InventoryRecord {
    InventoryRecord {
        sku_id: None,
        balance: Some(
            quantities
                .iter()
                .enumerate()
                .map(|(index, quantity)| WarehouseBalance {
                    warehouse_id: Some(format!("1_{}", index + 1)),
                    warehouse_name: None,
                    total_quantity: *quantity,
                    reserved_quantity: 0,
                    has_unlimited_quantity: None,
                })
                .collect(),
        ),
    }
}
