use crate::adapters::datasets::DatasetFiles;
use crate::adapters::http::DEFAULT_ENDPOINT;
use crate::core::page::DEFAULT_SITE_NAME;
use crate::core::roi::RoiAssumptions;
use crate::core::text::{TranslationTable, DEFAULT_PROVIDER_TIMEOUT};
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

/// File configuration. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub site: SiteConfig,
    pub data: DataConfig,
    pub translation: TranslationConfig,
    pub roi: RoiAssumptions,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_SITE_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub dir: String,
    #[serde(flatten)]
    pub files: DatasetFiles,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: "./static".to_string(),
            files: DatasetFiles::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub timeout_ms: u64,
    /// Extra phrase table merged over the built-in phrases.
    pub phrases: Option<String>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_ms: DEFAULT_PROVIDER_TIMEOUT.as_millis() as u64,
            phrases: None,
        }
    }
}

/// Settings of the `--serve` mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    /// Directory served under `/static`; also holds `favicon.ico`.
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
            static_dir: "./static".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads and parses a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AppError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("site.name", &self.site.name)?;
        validation::validate_path("data.dir", &self.data.dir)?;
        validation::validate_file_extensions("data", &self.data.files.all(), &["csv"])?;

        if self.translation.enabled {
            validation::validate_url("translation.endpoint", &self.translation.endpoint)?;
            validation::validate_positive_number(
                "translation.timeout_ms",
                self.translation.timeout_ms,
                1,
            )?;
        }
        if let Some(phrases) = &self.translation.phrases {
            validation::validate_path("translation.phrases", phrases)?;
        }

        validation::validate_range("roi.capture_factor", self.roi.capture_factor, 0.0, 1.0)?;
        validation::validate_range("roi.weeks_per_year", self.roi.weeks_per_year, 1.0, 53.0)?;

        if self.server.bind.parse::<SocketAddr>().is_err() {
            return Err(AppError::InvalidConfigValueError {
                field: "server.bind".to_string(),
                value: self.server.bind.clone(),
                reason: "Expected a socket address such as 127.0.0.1:8000".to_string(),
            });
        }
        validation::validate_path("server.static_dir", &self.server.static_dir)?;

        Ok(())
    }

    pub fn translation_timeout(&self) -> Duration {
        Duration::from_millis(self.translation.timeout_ms)
    }

    /// Built-in phrases, overlaid with the configured phrase file if any.
    pub fn translation_table(&self) -> Result<TranslationTable> {
        let mut table = TranslationTable::builtin();
        if let Some(path) = &self.translation.phrases {
            let extra = TranslationTable::from_file(path)?;
            tracing::info!("Loaded {} extra phrases from {}", extra.len(), path);
            table.merge(extra);
        }
        Ok(table)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
