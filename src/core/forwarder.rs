use crate::domain::model::{ProductAggregate, ProductId, SyncReport, TargetPayload};
use crate::domain::ports::CatalogTarget;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardOutcome {
    Synced,
    Failed,
    /// 沒有商品資料或沒有任何變體
    Skipped,
    DryRun,
}

/// 將一筆轉換結果送往目標服務。失敗只記錄，不中斷批次。
pub async fn forward<T>(
    target: &T,
    product_id: ProductId,
    payload: Option<TargetPayload>,
    dry_run: bool,
) -> ForwardOutcome
where
    T: CatalogTarget + ?Sized,
{
    let payload = match payload {
        Some(payload) if !payload.variants.is_empty() => payload,
        Some(_) => {
            tracing::info!("⏭️ Product {}: no variants, not forwarded", product_id);
            return ForwardOutcome::Skipped;
        }
        None => {
            tracing::info!("⏭️ Product {}: metadata unavailable, not forwarded", product_id);
            return ForwardOutcome::Skipped;
        }
    };

    if dry_run {
        tracing::debug!(
            "🔍 DRY RUN product {}: {}",
            product_id,
            serde_json::to_string(&payload).unwrap_or_default()
        );
        return ForwardOutcome::DryRun;
    }

    match target.save_product(&payload).await {
        Ok(()) => ForwardOutcome::Synced,
        Err(e) => {
            tracing::error!("❌ Product {}: forwarding to target failed: {}", product_id, e);
            ForwardOutcome::Failed
        }
    }
}

/// 單一批次的統計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub products: usize,
    pub skus: usize,
    pub synced: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl BatchOutcome {
    pub fn record(&mut self, aggregate: &ProductAggregate, outcome: ForwardOutcome) {
        self.products += 1;
        self.skus += aggregate.skus.len();
        match outcome {
            ForwardOutcome::Synced => self.synced += 1,
            ForwardOutcome::Failed => self.failed += 1,
            ForwardOutcome::Skipped => self.skipped += 1,
            ForwardOutcome::DryRun => {}
        }
    }
}

/// 跨批次累計，執行結束時產生唯一的 [`SyncReport`]
#[derive(Debug, Default)]
pub struct SyncReporter {
    products_processed: usize,
    total_skus: usize,
    synced_with_target: usize,
    forward_failures: usize,
    skipped_products: usize,
    batches: usize,
}

impl SyncReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn absorb(&mut self, batch: BatchOutcome) {
        self.products_processed += batch.products;
        self.total_skus += batch.skus;
        self.synced_with_target += batch.synced;
        self.forward_failures += batch.failed;
        self.skipped_products += batch.skipped;
        self.batches += 1;
    }

    pub fn finish(self, started_at: DateTime<Utc>, dry_run: bool) -> SyncReport {
        SyncReport {
            success: true,
            products_processed: Some(self.products_processed),
            total_skus: Some(self.total_skus),
            synced_with_target: Some(self.synced_with_target),
            forward_failures: Some(self.forward_failures),
            skipped_products: Some(self.skipped_products),
            batches: Some(self.batches),
            dry_run: Some(dry_run),
            error: None,
            started_at,
            finished_at: Utc::now(),
        }
    }
}
