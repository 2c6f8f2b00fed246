// Adapters layer: concrete HTTP implementations of the domain ports.

pub mod target;
pub mod vtex;

pub use target::TargetCatalogClient;
pub use vtex::VtexCatalogClient;
