//! Asset variant catalog: finds the interchangeable pre-authored assets of each
//! part and picks one at random.

mod catalog;

pub use catalog::{AssetHandle, CatalogError, NoVariantError, VariantCatalog, VariantIndex};
