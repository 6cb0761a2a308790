pub mod loaders;
pub mod product;
pub mod resolution;
pub mod search;

pub use loaders::read_products;
pub use product::{InventoryRow, ProductCard, ProductIdentity, GENERIC_BRAND};
pub use resolution::ResolutionEntry;
pub use search::{ImageCandidate, ImageItem, ScoredCandidate, SearchResponse, SearchResultLink};
