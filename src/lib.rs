pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{Datasets, HttpTranslator, LocalStorage};
pub use app::{build_service, OutputFormat};
pub use config::AppConfig;
pub use self::core::{PageRequest, PageService, RoiCalculator, TextResolver, TranslationTable};
pub use domain::model::{Locale, RoiForm, RoiInputs, RoiResult};
pub use utils::error::{AppError, Result};
