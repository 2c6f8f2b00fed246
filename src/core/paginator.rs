use crate::domain::model::{ProductId, SkuId};
use crate::domain::ports::CatalogSource;
use crate::utils::error::{Result, SyncError};
use std::collections::{BTreeMap, BTreeSet};

pub type ProductSkuMap = BTreeMap<ProductId, BTreeSet<SkuId>>;

/// 逐頁列出來源目錄的所有商品 ID 及其 SKU ID，每次呼叫都從第 1 頁開始。
///
/// 任何一頁失敗都會讓整個分頁失敗：只拿到部分 ID 會讓同步默默漏掉商品。
pub async fn fetch_all_product_sku_ids<S>(source: &S, page_size: u64) -> Result<ProductSkuMap>
where
    S: CatalogSource + ?Sized,
{
    let page_size = page_size.max(1);
    let mut ids = ProductSkuMap::new();
    let mut from = 1;
    let mut pages = 0usize;

    loop {
        let to = from + page_size - 1;
        let page = source
            .product_and_sku_ids(from, to)
            .await
            .map_err(|e| SyncError::PaginationError {
                message: format!("page [{}, {}] failed: {}", from, to, e),
            })?;
        pages += 1;

        tracing::debug!(
            "📄 Page {} [{}, {}]: {} products (total {})",
            pages,
            page.range.from,
            page.range.to,
            page.data.len(),
            page.range.total
        );

        for (product_id, sku_ids) in page.data {
            let product_id = ProductId(product_id);
            if ids.contains_key(&product_id) {
                tracing::warn!("Product {} listed again on page {}, keeping first", product_id, pages);
                continue;
            }
            ids.insert(product_id, sku_ids.into_iter().map(SkuId).collect());
        }

        if page.range.to >= page.range.total {
            break;
        }
        if page.range.to < from {
            return Err(SyncError::PaginationError {
                message: format!(
                    "range did not advance: requested from {}, source reported to {}",
                    from, page.range.to
                ),
            });
        }
        from = page.range.to + 1;
    }

    tracing::info!("📋 Discovered {} products in {} pages", ids.len(), pages);
    Ok(ids)
}
