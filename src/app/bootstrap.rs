use crate::adapters::{Datasets, HttpTranslator, LocalStorage};
use crate::config::AppConfig;
use crate::core::page::PageService;
use crate::core::roi::RoiCalculator;
use crate::core::text::TextResolver;
use crate::utils::error::Result;
use std::sync::Arc;

/// Loads datasets and phrases once and wires the page service.
pub async fn build_service(config: &AppConfig) -> Result<PageService> {
    let storage = LocalStorage::new(&config.data.dir);
    let datasets = Datasets::load(&storage, &config.data.files).await?;
    let table = config.translation_table()?;

    let mut resolver =
        TextResolver::new(Arc::new(table)).with_timeout(config.translation_timeout());
    if config.translation.enabled {
        tracing::debug!(
            "Remote translation enabled via {}",
            config.translation.endpoint
        );
        resolver = resolver.with_provider(Arc::new(HttpTranslator::new(
            config.translation.endpoint.clone(),
            config.translation_timeout(),
        )));
    }

    Ok(PageService::new(
        Arc::new(datasets),
        resolver,
        RoiCalculator::new(config.roi),
    )
    .with_site_name(config.site.name.clone()))
}
