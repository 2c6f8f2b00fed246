pub mod enricher;
pub mod forwarder;
pub mod paginator;
pub mod product_processor;
pub mod sync;
pub mod translator;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::{EnrichedSku, Fetched, ProductAggregate, SyncReport, TargetPayload};
pub use crate::domain::ports::{CatalogSource, CatalogTarget, SyncSettings};
pub use crate::utils::error::Result;
