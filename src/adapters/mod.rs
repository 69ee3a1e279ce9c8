// Adapters layer: concrete implementations for external systems (storage, export, http)

pub mod export;
pub mod http;
pub mod storage;
