//! Catalog indexing: turns directories of numbered product photos into
//! purchasable product groups with lazy image loaders.

pub mod error;
pub mod group;
pub mod index;
pub mod loader;
pub mod registry;
pub mod scan;

pub use error::CatalogError;
pub use group::{ProductGroup, ProductSummary};
pub use index::{
    index_assets, index_catalog, IndexReport, IndexWarning, IndexedCatalog, MISSING_SAMPLE,
};
pub use loader::{load_gallery, load_primary_image, ImageLoader, LoadedImage, PLACEHOLDER_IMAGE};
pub use registry::{Catalog, Route};
pub use scan::{scan_assets, ImageAsset};
