// Adapters layer: concrete implementations for external systems (files, CSV datasets, http).

pub mod datasets;
pub mod http;
pub mod storage;

pub use datasets::{DatasetFiles, DatasetKind, Datasets};
pub use http::HttpTranslator;
pub use storage::LocalStorage;
