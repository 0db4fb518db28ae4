use crate::adapters::datasets::Datasets;
use crate::core::roi::RoiCalculator;
use crate::core::text::{keys, TextResolver, TextSession};
use crate::domain::model::{Locale, RoiForm, RoiResult, SectorRow};
use chrono::Datelike;
use std::sync::Arc;

pub const DEFAULT_SITE_NAME: &str = "DataSolutions Pro";

/// What a visitor asked for: a locale tag and, if the calculator form was
/// submitted, its raw fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub lang: String,
    pub form: Option<RoiForm>,
}

impl PageRequest {
    pub fn new(lang: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            form: None,
        }
    }

    pub fn with_form(mut self, form: RoiForm) -> Self {
        self.form = Some(form);
        self
    }
}

/// Every UI string of the page, already localized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLabels {
    pub opportunities_heading: String,
    pub sector: String,
    pub roi_heading: String,
    pub employees: String,
    pub hours_weekly: String,
    pub cost_per_hour: String,
    pub investment: String,
    pub calculate: String,
    pub annual_saving: String,
    pub payback: String,
    pub years: String,
}

impl PageLabels {
    async fn resolve(session: &mut TextSession<'_>) -> Self {
        Self {
            opportunities_heading: session.text(keys::MARKET_OPPORTUNITIES).await,
            sector: session.text(keys::SECTOR).await,
            roi_heading: session.text(keys::ROI_SIMULATOR).await,
            employees: session.text(keys::EMPLOYEES).await,
            hours_weekly: session.text(keys::HOURS_WEEKLY).await,
            cost_per_hour: session.text(keys::COST_PER_HOUR).await,
            investment: session.text(keys::INVESTMENT).await,
            calculate: session.text(keys::CALCULATE).await,
            annual_saving: session.text(keys::ANNUAL_SAVING).await,
            payback: session.text(keys::PAYBACK).await,
            years: session.text(keys::YEARS).await,
        }
    }
}

/// Presentation-ready page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageModel<'a> {
    pub locale: Locale,
    pub site_name: &'a str,
    pub labels: PageLabels,
    pub sectors: &'a [SectorRow],
    pub form: Option<RoiForm>,
    pub roi: Option<RoiResult>,
    pub year: i32,
}

impl PageModel<'_> {
    pub fn html_lang(&self) -> &'static str {
        self.locale.html_lang()
    }
}

#[derive(Debug, Clone)]
pub struct PageService {
    datasets: Arc<Datasets>,
    resolver: TextResolver,
    calculator: RoiCalculator,
    site_name: String,
}

impl PageService {
    pub fn new(datasets: Arc<Datasets>, resolver: TextResolver, calculator: RoiCalculator) -> Self {
        Self {
            datasets,
            resolver,
            calculator,
            site_name: DEFAULT_SITE_NAME.to_string(),
        }
    }

    pub fn with_site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = site_name.into();
        self
    }

    pub fn datasets(&self) -> &Datasets {
        &self.datasets
    }

    pub async fn build(&self, request: PageRequest) -> PageModel<'_> {
        let locale = Locale::normalize(&request.lang);
        if locale.as_str() != request.lang {
            tracing::debug!("Locale '{}' normalized to '{}'", request.lang, locale);
        }

        let mut session = self.resolver.session(locale);
        let labels = PageLabels::resolve(&mut session).await;
        if session.provider_failed() {
            tracing::info!("Translation provider unavailable, serving untranslated text");
        }

        let form = request.form;
        let roi = form.as_ref().map(|form| self.calculator.compute_form(form));

        PageModel {
            locale,
            site_name: &self.site_name,
            labels,
            sectors: self.datasets.sectors(),
            form,
            roi,
            year: chrono::Local::now().year(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::text::TranslationTable;

    fn service() -> PageService {
        let datasets = Datasets::new(vec![
            SectorRow {
                sector: "Varejo".to_string(),
                opportunity_score: 85.0,
            },
            SectorRow {
                sector: "Agronegócio".to_string(),
                opportunity_score: 78.0,
            },
        ]);
        PageService::new(
            Arc::new(datasets),
            TextResolver::new(Arc::new(TranslationTable::builtin())),
            RoiCalculator::default(),
        )
    }

    fn reference_form() -> RoiForm {
        RoiForm {
            employees: Some("10".to_string()),
            hours_weekly: Some("40".to_string()),
            cost_per_hour: Some("35".to_string()),
            investment: Some("150000".to_string()),
        }
    }

    #[tokio::test]
    async fn test_build_without_form_has_no_result() {
        let service = service();
        let page = service.build(PageRequest::new("en")).await;

        assert_eq!(page.locale, Locale::En);
        assert_eq!(page.labels.calculate, "Calculate");
        assert_eq!(page.sectors.len(), 2);
        assert!(page.roi.is_none());
        assert_eq!(page.site_name, DEFAULT_SITE_NAME);
    }

    #[tokio::test]
    async fn test_build_in_portuguese() {
        let service = service();
        let page = service.build(PageRequest::new("pt")).await;

        assert_eq!(page.html_lang(), "pt-BR");
        assert_eq!(page.labels.roi_heading, "Simulador de ROI");
        assert_eq!(page.labels.sector, "Setor");
        assert_eq!(page.labels.years, "anos");
    }

    #[tokio::test]
    async fn test_unknown_locale_defaults_to_english() {
        let service = service();
        let page = service.build(PageRequest::new("fr")).await;

        assert_eq!(page.locale, Locale::En);
        assert_eq!(page.labels.employees, "Employees");
    }

    #[tokio::test]
    async fn test_submitted_form_is_computed_once() {
        let service = service();
        let page = service
            .build(PageRequest::new("en").with_form(reference_form()))
            .await;

        let roi = page.roi.expect("form was submitted");
        assert!((roi.annual_saving - 509600.0).abs() < 1e-6);
        assert!((roi.roi_percent - 239.73).abs() < 1e-2);
        assert_eq!(page.form, Some(reference_form()));
    }

    #[tokio::test]
    async fn test_form_with_bad_value_yields_zero_result() {
        let service = service();
        let mut form = reference_form();
        form.hours_weekly = Some(String::new());

        let page = service.build(PageRequest::new("pt").with_form(form)).await;

        let roi = page.roi.unwrap();
        assert_eq!(roi.annual_saving, 0.0);
        assert_eq!(roi.payback_years, 0.0);
        assert_eq!(roi.roi_percent, 0.0);
    }

    #[tokio::test]
    async fn test_submitted_form_without_fields_yields_zero_result() {
        let service = service();
        let page = service
            .build(PageRequest::new("en").with_form(RoiForm::default()))
            .await;

        let roi = page.roi.unwrap();
        assert_eq!(roi.annual_saving, 0.0);
        assert_eq!(roi.roi_percent, 0.0);
    }
}
