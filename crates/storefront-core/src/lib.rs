pub mod app_config;
pub mod config;
pub mod navigation;
pub mod products;
pub mod session;

use thiserror::Error;

pub use app_config::{AppConfig, CmsCredentials, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use navigation::{
    absolute_image_url, category_label, CategoryFilter, CategoryOption, LinkQuery,
    ListingNavigation, ListingQuery, Pager, PagerLinks, ProductImage, ALL_CATEGORIES,
    ALL_CATEGORIES_LABEL,
};
pub use products::{Listing, ListingPage, Product, PAGE_SIZE, UNTITLED_PRODUCT};
pub use session::ProductCache;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
