use crate::core::forwarder::{forward, BatchOutcome, SyncReporter};
use crate::core::paginator::{fetch_all_product_sku_ids, ProductSkuMap};
use crate::core::product_processor::process_product;
use crate::core::translator::{translate_with, AttributeDeriver, NoAttributes};
use crate::domain::model::{ProductAggregate, ProductId, SkuId, SyncReport};
use crate::domain::ports::{CatalogSource, CatalogTarget, SyncSettings};
use crate::utils::error::{Result, SyncError};
use crate::utils::monitor::SystemMonitor;
use chrono::Utc;
use futures::future::join_all;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Init,
    DiscoveringIds,
    ProcessingBatch { index: usize, total: usize },
    Reporting,
    Done,
    Failed,
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncPhase::Init => write!(f, "INIT"),
            SyncPhase::DiscoveringIds => write!(f, "DISCOVERING_IDS"),
            SyncPhase::ProcessingBatch { index, total } => {
                write!(f, "PROCESSING_BATCH {}/{}", index, total)
            }
            SyncPhase::Reporting => write!(f, "REPORTING"),
            SyncPhase::Done => write!(f, "DONE"),
            SyncPhase::Failed => write!(f, "FAILED"),
        }
    }
}

/// 目錄同步引擎：列出 ID → 分批處理商品 → 轉換 → 轉送 → 彙總
///
/// 批次內的商品全部並行處理，批次之間嚴格依序執行；
/// 下一批要等上一批 (含轉送) 完成才開始，藉此限制同時對外的請求數。
pub struct CatalogSync<S: CatalogSource, T: CatalogTarget, C: SyncSettings> {
    source: S,
    target: T,
    settings: C,
    attributes: Box<dyn AttributeDeriver>,
    monitor: SystemMonitor,
}

impl<S: CatalogSource, T: CatalogTarget, C: SyncSettings> CatalogSync<S, T, C> {
    pub fn new(source: S, target: T, settings: C) -> Self {
        Self {
            source,
            target,
            settings,
            attributes: Box::new(NoAttributes),
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn with_monitoring(mut self, enabled: bool) -> Self {
        self.monitor = SystemMonitor::new(enabled);
        self
    }

    pub fn with_attribute_deriver(mut self, attributes: Box<dyn AttributeDeriver>) -> Self {
        self.attributes = attributes;
        self
    }

    fn enter(&self, phase: SyncPhase) {
        tracing::info!("🔄 Sync phase: {}", phase);
    }

    /// 執行一次完整同步，永遠回傳結構化的摘要
    pub async fn run(&self) -> SyncReport {
        let started_at = Utc::now();
        let dry_run = self.settings.dry_run();

        self.enter(SyncPhase::Init);
        tracing::info!(
            "🚀 Starting catalog sync for account '{}'{}",
            self.settings.account(),
            if dry_run { " (dry run)" } else { "" }
        );

        self.enter(SyncPhase::DiscoveringIds);
        let ids = match self.discover().await {
            Ok(ids) => ids,
            Err(e) => {
                self.enter(SyncPhase::Failed);
                tracing::error!("❌ Catalog sync aborted: {}", e);
                return SyncReport::failed(e.to_string(), started_at);
            }
        };

        let products: Vec<(ProductId, BTreeSet<SkuId>)> = match self.settings.max_products() {
            Some(max) => ids.into_iter().take(max).collect(),
            None => ids.into_iter().collect(),
        };

        let batch_size = self.settings.batch_size().max(1);
        let total_batches = products.len().div_ceil(batch_size);
        let mut reporter = SyncReporter::new();

        for (index, batch) in products.chunks(batch_size).enumerate() {
            self.enter(SyncPhase::ProcessingBatch {
                index: index + 1,
                total: total_batches,
            });
            tracing::info!(
                "Processing batch {}, products {} to {}",
                index + 1,
                index * batch_size,
                index * batch_size + batch.len() - 1
            );

            let outcome = self.run_batch(batch, index == 0).await;
            tracing::info!(
                "✅ Batch {}/{}: {} products, {} SKUs, {} synced, {} failed",
                index + 1,
                total_batches,
                outcome.products,
                outcome.skus,
                outcome.synced,
                outcome.failed
            );
            reporter.absorb(outcome);

            self.monitor.record_batch(index + 1, total_batches, batch.len());
        }

        self.enter(SyncPhase::Reporting);
        let report = reporter.finish(started_at, dry_run);
        tracing::info!(
            "📊 Processed {} products, {} SKUs, {} synced with target",
            report.products_processed.unwrap_or_default(),
            report.total_skus.unwrap_or_default(),
            report.synced_with_target.unwrap_or_default()
        );

        self.monitor.log_summary();
        self.enter(SyncPhase::Done);
        report
    }

    /// 列出全部商品 ID；分頁失敗或目錄為空都是致命錯誤
    pub async fn discover(&self) -> Result<ProductSkuMap> {
        let ids = fetch_all_product_sku_ids(&self.source, self.settings.page_size()).await?;
        if ids.is_empty() {
            return Err(SyncError::EmptyCatalog);
        }
        tracing::info!("Retrieved {} product IDs", ids.len());
        Ok(ids)
    }

    async fn run_batch(&self, batch: &[(ProductId, BTreeSet<SkuId>)], log_sample: bool) -> BatchOutcome {
        let account = self.settings.account();
        let sku_concurrency = self.settings.sku_concurrency();
        let dry_run = self.settings.dry_run();

        let aggregates: Vec<ProductAggregate> = join_all(batch.iter().map(|(product_id, sku_ids)| {
            process_product(&self.source, *product_id, sku_ids, account, sku_concurrency)
        }))
        .await;

        if log_sample {
            if let Some(sample) = aggregates.first() {
                log_sample_product(sample);
            }
        }

        let outcomes = join_all(aggregates.iter().map(|aggregate| {
            let payload = translate_with(aggregate, self.attributes.as_ref());
            forward(&self.target, aggregate.product_id, payload, dry_run)
        }))
        .await;

        let mut batch_outcome = BatchOutcome::default();
        for (aggregate, outcome) in aggregates.iter().zip(outcomes) {
            batch_outcome.record(aggregate, outcome);
        }
        batch_outcome
    }
}

fn log_sample_product(sample: &ProductAggregate) {
    let json = serde_json::to_string(&sample.product).unwrap_or_default();
    let preview: String = json.chars().take(200).collect();
    tracing::debug!("Sample product data for ID {}: {}...", sample.product_id, preview);
}
