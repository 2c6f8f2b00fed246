use crate::core::enricher::enrich;
use crate::domain::model::{ProductAggregate, ProductId, SkuId, SkuRecord};
use crate::domain::ports::CatalogSource;
use futures::stream::{self, StreamExt};
use std::collections::BTreeSet;

/// 取得單一商品的資料與 SKU 清單並逐一補齊。整體不會失敗：
/// 商品查詢失敗時 `product` 為 `None`，SKU 清單查詢失敗時視為沒有 SKU。
///
/// SKU 以 `sku_concurrency` 為上限並行補齊，結果維持來源回傳的順序。
pub async fn process_product<S>(
    source: &S,
    product_id: ProductId,
    known_sku_ids: &BTreeSet<SkuId>,
    account: &str,
    sku_concurrency: usize,
) -> ProductAggregate
where
    S: CatalogSource + ?Sized,
{
    let (product, skus) = tokio::join!(source.product(product_id), async {
        if known_sku_ids.is_empty() {
            Ok(Vec::new())
        } else {
            source.skus_by_product(product_id).await
        }
    });

    let product = match product {
        Ok(product) => Some(product),
        Err(e) => {
            tracing::warn!("⚠️ Product {}: metadata fetch failed: {}", product_id, e);
            None
        }
    };

    let skus: Vec<SkuRecord> = match skus {
        Ok(skus) => skus
            .into_iter()
            .filter(|sku| {
                let owned = sku.product_id == product_id;
                if !owned {
                    tracing::warn!(
                        "SKU {} reports product {}, expected {}; skipping",
                        sku.id,
                        sku.product_id,
                        product_id
                    );
                }
                owned
            })
            .collect(),
        Err(e) => {
            tracing::warn!("⚠️ Product {}: SKU list fetch failed: {}", product_id, e);
            Vec::new()
        }
    };

    if skus.len() != known_sku_ids.len() {
        tracing::debug!(
            "Product {}: listing reported {} SKUs, SKU list returned {}",
            product_id,
            known_sku_ids.len(),
            skus.len()
        );
    }

    let enriched = stream::iter(skus)
        .map(|sku| enrich(source, sku, account))
        .buffered(sku_concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

    let degraded = enriched.iter().filter(|sku| sku.is_degraded()).count();
    tracing::debug!(
        "Product {}: Found {} SKUs ({} with fallback values)",
        product_id,
        enriched.len(),
        degraded
    );

    ProductAggregate {
        product_id,
        product,
        skus: enriched,
    }
}
