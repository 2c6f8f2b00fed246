use crate::domain::model::{
    EnrichedSku, ProductAggregate, ProductRecord, TargetPayload, Variant, VariantAttribute,
    VariantImage,
};

/// 變體屬性的擴充點，目前沒有定義任何推導規則
pub trait AttributeDeriver: Send + Sync {
    fn derive(&self, product: &ProductRecord, sku: &EnrichedSku) -> Vec<VariantAttribute>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoAttributes;

impl AttributeDeriver for NoAttributes {
    fn derive(&self, _product: &ProductRecord, _sku: &EnrichedSku) -> Vec<VariantAttribute> {
        Vec::new()
    }
}

pub fn translate(aggregate: &ProductAggregate) -> Option<TargetPayload> {
    translate_with(aggregate, &NoAttributes)
}

/// 沒有商品資料時回傳 `None`
pub fn translate_with(
    aggregate: &ProductAggregate,
    attributes: &dyn AttributeDeriver,
) -> Option<TargetPayload> {
    let product = aggregate.product.as_ref()?;

    let short_description = non_empty(&product.description_short)
        .or_else(|| non_empty(&product.title))
        .unwrap_or_default();
    let detailed_description = non_empty(&product.description)
        .or_else(|| non_empty(&product.meta_tag_description))
        .unwrap_or_default();

    let variants = aggregate
        .skus
        .iter()
        .map(|sku| Variant {
            code: sku.sku.id.0,
            name: sku.sku.name.clone(),
            price: sku.cost_price().unwrap_or(0.0),
            stock: sku.total_inventory(),
            attributes: attributes.derive(product, sku),
            images: sku
                .image_urls()
                .iter()
                .enumerate()
                .map(|(index, url)| VariantImage {
                    url: url.clone(),
                    alt: format!("{} image {}", sku.sku.name, index + 1),
                })
                .collect(),
        })
        .collect();

    Some(TargetPayload {
        code: product.id.0,
        name: product.name.clone(),
        brand_name: brand_name(product),
        short_description: short_description.to_string(),
        detailed_description: detailed_description.to_string(),
        variants,
    })
}

// 來源商品只有品牌 ID，不另外查詢品牌名稱
fn brand_name(product: &ProductRecord) -> String {
    match product.brand_id {
        Some(id) => format!("Brand {}", id),
        None => String::new(),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.trim().is_empty())
}
