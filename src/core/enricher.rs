use crate::domain::model::{EnrichedSku, Fetched, SkuImage, SkuRecord};
use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;

/// 為單一 SKU 補上庫存、成本價與圖片。
///
/// 三個子查詢並行執行、各自處理失敗；失敗的欄位以預設值 (0 / None / 空) 代替，
/// 基本 SKU 資料永遠保留。
pub async fn enrich<S>(source: &S, sku: SkuRecord, account: &str) -> EnrichedSku
where
    S: CatalogSource + ?Sized,
{
    let sku_id = sku.id;
    let (inventory, price, images) = tokio::join!(
        source.inventory(sku_id),
        source.price(sku_id),
        source.images(sku_id)
    );

    let inventory = settle(&sku, "inventory", inventory, |record| record.total_quantity(), 0);
    let cost_price = settle(
        &sku,
        "price",
        price,
        |record| {
            record
                .and_then(|price| price.cost_price)
                .filter(|cost| cost.is_finite() && *cost >= 0.0)
        },
        None,
    );
    let image_urls = settle(
        &sku,
        "images",
        images,
        |images| build_image_urls(account, &images),
        Vec::new(),
    );

    EnrichedSku {
        sku,
        inventory,
        cost_price,
        image_urls,
    }
}

fn settle<T, U>(
    sku: &SkuRecord,
    resource: &str,
    result: Result<T>,
    map: impl FnOnce(T) -> U,
    default: U,
) -> Fetched<U> {
    match result {
        Ok(value) => Fetched::Success(map(value)),
        Err(e) => {
            tracing::warn!(
                "⚠️ SKU {} (product {}): {} fetch failed, using default: {}",
                sku.id,
                sku.product_id,
                resource,
                e
            );
            Fetched::Fallback(default)
        }
    }
}

/// `https://{account}.{fileLocation}`，維持來源順序
pub fn build_image_urls(account: &str, images: &[SkuImage]) -> Vec<String> {
    images
        .iter()
        .filter_map(|image| image.file_location.as_deref())
        .map(|location| format!("https://{}.{}", account, location))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{sku_record, Failure, FakeSource};
    use crate::domain::model::SkuId;

    fn source() -> FakeSource {
        FakeSource::new()
            .with_product(1, "Shirt", &[10])
            .with_inventory(10, &[3, 2])
            .with_price(10, 12.5)
            .with_images(10, &["vteximg.com.br/arquivos/ids/155392", "vteximg.com.br/arquivos/ids/155393"])
    }

    #[tokio::test]
    async fn test_enrich_aggregates_all_sub_resources() {
        let enriched = enrich(&source(), sku_record(10, 1, "Shirt M"), "mystore").await;

        assert_eq!(enriched.sku.id, SkuId(10));
        assert_eq!(enriched.total_inventory(), 5);
        assert_eq!(enriched.cost_price(), Some(12.5));
        assert_eq!(
            enriched.image_urls().to_vec(),
            vec![
                "https://mystore.vteximg.com.br/arquivos/ids/155392",
                "https://mystore.vteximg.com.br/arquivos/ids/155393"
            ]
        );
        assert!(!enriched.is_degraded());
    }

    #[tokio::test]
    async fn test_inventory_failure_is_isolated() {
        let source = source().failing(Failure::Inventory(SkuId(10)));
        let enriched = enrich(&source, sku_record(10, 1, "Shirt M"), "mystore").await;

        assert_eq!(enriched.inventory, Fetched::Fallback(0));
        assert_eq!(enriched.cost_price, Fetched::Success(Some(12.5)));
        assert_eq!(enriched.image_urls().len(), 2);
        assert!(!enriched.image_urls.is_fallback());
    }

    #[tokio::test]
    async fn test_extreme_inventory_balances_do_not_abort() {
        let source = source().with_inventory(10, &[i64::MAX, 1, -4]);
        let enriched = enrich(&source, sku_record(10, 1, "Shirt M"), "mystore").await;

        assert_eq!(enriched.inventory, Fetched::Success(i64::MAX as u64 + 1));
        assert!(!enriched.is_degraded());
    }

    #[tokio::test]
    async fn test_all_sub_fetches_failing_keeps_base_record() {
        let source = source()
            .failing(Failure::Inventory(SkuId(10)))
            .failing(Failure::Price(SkuId(10)))
            .failing(Failure::Images(SkuId(10)));
        let sku = sku_record(10, 1, "Shirt M");
        let enriched = enrich(&source, sku.clone(), "mystore").await;

        assert_eq!(enriched.sku, sku);
        assert_eq!(enriched.inventory, Fetched::Fallback(0));
        assert_eq!(enriched.cost_price, Fetched::Fallback(None));
        assert_eq!(enriched.image_urls, Fetched::Fallback(Vec::new()));
    }

    #[tokio::test]
    async fn test_missing_price_is_not_a_fallback() {
        let source = FakeSource::new().with_product(1, "Shirt", &[10]);
        let enriched = enrich(&source, sku_record(10, 1, "Shirt M"), "mystore").await;

        assert_eq!(enriched.cost_price, Fetched::Success(None));
        assert_eq!(enriched.image_urls, Fetched::Success(Vec::new()));
    }

    #[tokio::test]
    async fn test_negative_cost_price_is_treated_as_absent() {
        let source = source().with_price(10, -1.0);
        let enriched = enrich(&source, sku_record(10, 1, "Shirt M"), "mystore").await;

        assert_eq!(enriched.cost_price(), None);
    }

    #[test]
    fn test_image_urls_skip_descriptors_without_location() {
        let images = vec![
            SkuImage {
                file_location: Some("a.com/1".to_string()),
                name: None,
                is_main: Some(true),
            },
            SkuImage {
                file_location: None,
                name: Some("broken".to_string()),
                is_main: None,
            },
            SkuImage {
                file_location: Some("a.com/2".to_string()),
                name: None,
                is_main: None,
            },
        ];

        assert_eq!(
            build_image_urls("acct", &images),
            vec!["https://acct.a.com/1", "https://acct.a.com/2"]
        );
    }
}
