use crate::domain::model::Locale;
use crate::utils::error::{Result, TranslationError};
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

/// Best-effort translation of arbitrary English text.
///
/// Callers treat every error as "keep the source text".
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        target: Locale,
    ) -> std::result::Result<String, TranslationError>;
}
