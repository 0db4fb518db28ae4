pub mod toml_config;

pub use toml_config::{AppConfig, ServerConfig};

#[cfg(feature = "cli")]
use crate::app::render::OutputFormat;
#[cfg(feature = "cli")]
use crate::core::page::PageRequest;
#[cfg(feature = "cli")]
use crate::domain::model::RoiForm;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "datasolutions")]
#[command(about = "Render the DataSolutions Pro page with its ROI simulator")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Page language (exactly en or pt); anything else falls back to en
    #[arg(long, default_value = "en")]
    pub lang: String,

    #[arg(long)]
    pub employees: Option<String>,

    #[arg(long)]
    pub hours_weekly: Option<String>,

    #[arg(long)]
    pub cost_per_hour: Option<String>,

    #[arg(long)]
    pub investment: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    /// Write the page to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Override the dataset directory from the configuration
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Do not call the remote translation provider
    #[arg(long)]
    pub no_translate: bool,

    /// Serve the pages over HTTP instead of rendering one page
    #[arg(long)]
    pub serve: bool,

    /// Listen address for --serve, overrides the configuration
    #[arg(long)]
    pub bind: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// The calculator form, present when any of its fields was given.
    pub fn form(&self) -> Option<RoiForm> {
        let form = RoiForm {
            employees: self.employees.clone(),
            hours_weekly: self.hours_weekly.clone(),
            cost_per_hour: self.cost_per_hour.clone(),
            investment: self.investment.clone(),
        };
        (!form.is_empty()).then_some(form)
    }

    pub fn page_request(&self) -> PageRequest {
        let request = PageRequest::new(self.lang.clone());
        match self.form() {
            Some(form) => request.with_form(form),
            None => request,
        }
    }

    /// Loads the configuration file, if any, and applies command line
    /// overrides on top of it.
    pub fn load_app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(dir) = &self.data_dir {
            config.data.dir = dir.clone();
        }
        if self.no_translate {
            config.translation.enabled = false;
        }
        if let Some(bind) = &self.bind {
            config.server.bind = bind.clone();
        }

        Ok(config)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(config) = &self.config {
            validation::validate_path("config", config)?;
        }
        if let Some(output) = &self.output {
            validation::validate_path("output", output)?;
        }
        if let Some(dir) = &self.data_dir {
            validation::validate_path("data_dir", dir)?;
        }
        Ok(())
    }
}
