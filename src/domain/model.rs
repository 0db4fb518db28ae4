use serde::{Deserialize, Serialize};
use std::fmt;

/// Display language of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Pt,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Pt];

    /// Language every phrase key is written in.
    pub const SOURCE: Locale = Locale::En;

    /// Exact match on a supported tag. `PT`, ` pt` and `pt-BR` are not
    /// supported tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "en" => Some(Locale::En),
            "pt" => Some(Locale::Pt),
            _ => None,
        }
    }

    /// Normalizes a requested locale tag. Anything other than `en` or `pt`
    /// becomes `en`.
    pub fn normalize(tag: &str) -> Self {
        Self::from_tag(tag).unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Pt => "pt",
        }
    }

    /// Value for the `lang` attribute of the rendered page.
    pub fn html_lang(self) -> &'static str {
        match self {
            Locale::En => "en-GB",
            Locale::Pt => "pt-BR",
        }
    }

    /// Label shown in the language switcher.
    pub fn display_name(self) -> &'static str {
        match self {
            Locale::En => "English (UK)",
            Locale::Pt => "Português (BR)",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical identifier of a piece of UI text.
pub type PhraseKey = str;

/// Raw calculator fields exactly as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoiForm {
    pub employees: Option<String>,
    pub hours_weekly: Option<String>,
    pub cost_per_hour: Option<String>,
    pub investment: Option<String>,
}

impl RoiForm {
    /// True when none of the four fields was supplied.
    pub fn is_empty(&self) -> bool {
        self.employees.is_none()
            && self.hours_weekly.is_none()
            && self.cost_per_hour.is_none()
            && self.investment.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RoiInputs {
    pub employees: f64,
    pub hours_per_week: f64,
    pub cost_per_hour: f64,
    pub investment: f64,
}

impl RoiInputs {
    pub const ZERO: RoiInputs = RoiInputs {
        employees: 0.0,
        hours_per_week: 0.0,
        cost_per_hour: 0.0,
        investment: 0.0,
    };

    /// Coerces submitted text into numbers.
    ///
    /// If any field is missing or not a number the whole set is zeroed,
    /// never just the offending field.
    pub fn from_form(form: &RoiForm) -> Self {
        let parsed = (|| {
            Some(RoiInputs {
                employees: parse_field(form.employees.as_deref())?,
                hours_per_week: parse_field(form.hours_weekly.as_deref())?,
                cost_per_hour: parse_field(form.cost_per_hour.as_deref())?,
                investment: parse_field(form.investment.as_deref())?,
            })
        })();

        match parsed {
            Some(inputs) => inputs,
            None => {
                tracing::debug!("Calculator form incomplete or not numeric, using zeros");
                RoiInputs::ZERO
            }
        }
    }
}

fn parse_field(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiResult {
    pub annual_saving: f64,
    /// `0.0` means no saving was computed, not an instant payback.
    pub payback_years: f64,
    pub roi_percent: f64,
}

/// One row of the sector opportunity table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorRow {
    #[serde(rename = "Setor")]
    pub sector: String,
    #[serde(rename = "Oportunidade_Score")]
    pub opportunity_score: f64,
}

/// A CSV table kept as plain text cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Cell values of the named column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.headers.iter().position(|h| h == name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(index).map(String::as_str).unwrap_or(""))
                .collect(),
        )
    }
}
