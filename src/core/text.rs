//! Bilingual text layer.
//!
//! Phrase keys are the English UI strings themselves. A lookup that misses
//! the key or the requested locale returns the key unchanged, so every
//! lookup yields displayable text.

use crate::domain::model::{Locale, PhraseKey};
use crate::domain::ports::TranslationProvider;
use crate::utils::error::{AppError, Result, TranslationError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Phrase keys used by the page.
pub mod keys {
    pub const MARKET_OPPORTUNITIES: &str = "Market Opportunities by Sector";
    pub const SECTOR: &str = "Sector";
    pub const ROI_SIMULATOR: &str = "ROI Simulator";
    pub const EMPLOYEES: &str = "Employees";
    pub const HOURS_WEEKLY: &str = "Manual Hours / Week per Employee";
    pub const COST_PER_HOUR: &str = "Cost per Hour (BRL)";
    pub const INVESTMENT: &str = "Initial Investment (BRL)";
    pub const CALCULATE: &str = "Calculate";
    pub const ANNUAL_SAVING: &str = "Annual Saving";
    pub const PAYBACK: &str = "Payback";
    pub const YEARS: &str = "years";
}

const BUILTIN_PHRASES: &[(&str, &str)] = &[
    (keys::MARKET_OPPORTUNITIES, "Oportunidades de Mercado por Setor"),
    (keys::SECTOR, "Setor"),
    (keys::ROI_SIMULATOR, "Simulador de ROI"),
    (keys::EMPLOYEES, "Funcionários"),
    (keys::HOURS_WEEKLY, "Horas Manuais / Semana por Funcionário"),
    (keys::COST_PER_HOUR, "Custo por Hora (BRL)"),
    (keys::INVESTMENT, "Investimento Inicial (BRL)"),
    (keys::CALCULATE, "Calcular"),
    (keys::ANNUAL_SAVING, "Economia Anual"),
    (keys::PAYBACK, "Retorno do Investimento"),
    (keys::YEARS, "anos"),
];

/// Per-locale strings of one phrase. Either side may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub en: Option<String>,
    #[serde(default)]
    pub pt: Option<String>,
}

impl LocalizedText {
    pub fn get(&self, locale: Locale) -> Option<&str> {
        match locale {
            Locale::En => self.en.as_deref(),
            Locale::Pt => self.pt.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationTable {
    entries: HashMap<String, LocalizedText>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The phrases of the page, in English and Portuguese.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (key, pt) in BUILTIN_PHRASES {
            table.insert(
                *key,
                LocalizedText {
                    en: Some((*key).to_string()),
                    pt: Some((*pt).to_string()),
                },
            );
        }
        table
    }

    /// Parses a TOML phrase file of the form
    ///
    /// ```toml
    /// ["Calculate"]
    /// en = "Calculate"
    /// pt = "Calcular"
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AppError::ConfigValidationError {
            field: "translation.phrases".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn insert(&mut self, key: impl Into<String>, text: LocalizedText) {
        self.entries.insert(key.into(), text);
    }

    /// Adds `other`'s entries, replacing existing keys.
    pub fn merge(&mut self, other: TranslationTable) {
        self.entries.extend(other.entries);
    }

    pub fn lookup(&self, key: &PhraseKey, locale: Locale) -> Option<&str> {
        self.entries.get(key)?.get(locale)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_millis(2000);

#[derive(Clone)]
pub struct TextResolver {
    table: Arc<TranslationTable>,
    provider: Option<Arc<dyn TranslationProvider>>,
    timeout: Duration,
}

impl std::fmt::Debug for TextResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextResolver")
            .field("phrases", &self.table.len())
            .field("provider", &self.provider.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl TextResolver {
    pub fn new(table: Arc<TranslationTable>) -> Self {
        Self {
            table,
            provider: None,
            timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn TranslationProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Static lookup with identity fallback.
    pub fn resolve(&self, key: &PhraseKey, locale: Locale) -> String {
        self.table
            .lookup(key, locale)
            .unwrap_or(key)
            .to_string()
    }

    /// Like [`resolve`](Self::resolve), but asks the provider for text the
    /// table cannot localize. Provider failures yield `text` unchanged.
    pub async fn resolve_text(&self, text: &str, locale: Locale) -> String {
        match self.try_resolve_text(text, locale).await {
            Ok(resolved) => resolved,
            Err(_) => text.to_string(),
        }
    }

    /// Starts the text pass of one request.
    pub fn session(&self, locale: Locale) -> TextSession<'_> {
        TextSession {
            resolver: self,
            locale,
            provider_failed: false,
        }
    }

    async fn try_resolve_text(
        &self,
        text: &str,
        locale: Locale,
    ) -> std::result::Result<String, TranslationError> {
        if let Some(found) = self.table.lookup(text, locale) {
            return Ok(found.to_string());
        }

        let provider = match &self.provider {
            Some(provider) if locale != Locale::SOURCE => provider,
            _ => return Ok(text.to_string()),
        };

        tracing::debug!("Asking translation provider for '{}' ({})", text, locale);
        let attempt = tokio::time::timeout(self.timeout, provider.translate(text, locale)).await;

        let outcome = match attempt {
            Ok(result) => result,
            Err(_) => Err(TranslationError::Timeout(self.timeout.as_millis() as u64)),
        };

        match outcome {
            Ok(translated) if !translated.trim().is_empty() => Ok(translated),
            Ok(_) => {
                let e = TranslationError::MalformedResponse("empty translation".to_string());
                tracing::warn!("Translation of '{}' to {} failed: {}", text, locale, e);
                Err(e)
            }
            Err(e) => {
                tracing::warn!("Translation of '{}' to {} failed: {}", text, locale, e);
                Err(e)
            }
        }
    }
}

/// Text resolution for a single request.
///
/// After the first provider failure the remaining phrases skip the
/// provider.
#[derive(Debug)]
pub struct TextSession<'a> {
    resolver: &'a TextResolver,
    locale: Locale,
    provider_failed: bool,
}

impl TextSession<'_> {
    pub fn provider_failed(&self) -> bool {
        self.provider_failed
    }

    pub async fn text(&mut self, key: &PhraseKey) -> String {
        if self.provider_failed {
            return self.resolver.resolve(key, self.locale);
        }

        match self.resolver.try_resolve_text(key, self.locale).await {
            Ok(resolved) => resolved,
            Err(_) => {
                self.provider_failed = true;
                key.to_string()
            }
        }
    }
}
