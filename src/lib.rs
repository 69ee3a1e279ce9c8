pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::http::create_router;
pub use adapters::storage::{JsonRepository, LocalStorage, MemoryStorage};
pub use app::AppState;
pub use domain::ranking::{PriceOrder, Rankable, VendorRanking, VendorRecord};
pub use utils::error::{MarketError, Result};
