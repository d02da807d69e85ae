pub mod assets;
pub mod catalog;
pub mod client;
pub mod error;
mod lenient;
pub mod normalize;
pub mod pagination;
pub mod types;

pub use assets::{resolve_fetched, resolve_inline};
pub use catalog::Catalog;
pub use client::CmsClient;
pub use error::{CatalogError, CmsError};
pub use normalize::normalize_entry;
pub use pagination::EntriesQuery;
pub use types::{AssetRecord, EntriesResponse, ImageField, RawEntry};
