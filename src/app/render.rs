use crate::core::page::PageModel;
use crate::domain::model::{Locale, RoiForm};
use crate::utils::error::Result;
use std::fmt::{self, Write};

/// Value pre-filled in the investment field before anything is submitted.
pub const DEFAULT_INVESTMENT: &str = "150000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Html,
    Text,
}

/// Column header of the score column. Printed as is in every locale.
pub const SCORE_HEADER: &str = "Score";

pub fn render(page: &PageModel<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Html => render_html(page),
        OutputFormat::Text => render_text(page),
    }
}

/// Whole number with `,` thousands separators, e.g. `509,600`. Negative
/// values keep their sign even when they round to zero (`-0`).
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3 + 1);
    if value.is_sign_negative() {
        grouped.push('-');
    }
    for (i, digit) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

pub fn format_currency(value: f64) -> String {
    format!("R$ {}", format_thousands(value))
}

pub fn format_one_decimal(value: f64) -> String {
    format!("{:.1}", value)
}

/// `85.0` prints as `85`, `72.5` as `72.5`.
pub fn format_score(value: f64) -> String {
    value.to_string()
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn field_value<'a>(
    page: &'a PageModel<'_>,
    pick: fn(&RoiForm) -> &Option<String>,
) -> Option<&'a str> {
    page.form.as_ref().and_then(|form| pick(form).as_deref())
}

pub fn render_html(page: &PageModel<'_>) -> Result<String> {
    let mut html = String::new();
    write_html(&mut html, page)?;
    Ok(html)
}

pub fn render_text(page: &PageModel<'_>) -> Result<String> {
    let mut out = String::new();
    write_text(&mut out, page)?;
    Ok(out)
}

fn write_html(html: &mut String, page: &PageModel<'_>) -> fmt::Result {
    let labels = &page.labels;
    let site = escape_html(page.site_name);

    writeln!(html, "<!doctype html>")?;
    writeln!(html, "<html lang=\"{}\">", page.html_lang())?;
    writeln!(html, "<head>")?;
    writeln!(html, "  <meta charset=\"utf-8\">")?;
    writeln!(html, "  <title>{}</title>", site)?;
    writeln!(html, "  <link rel=\"stylesheet\" href=\"/static/style.css\">")?;
    writeln!(html, "</head>")?;
    writeln!(html, "<body>")?;
    writeln!(html, "<header class=\"header\">")?;
    writeln!(html, "  <div class=\"container flex justify-between items-center py-8\">")?;
    writeln!(html, "     <h1>{}</h1>", site)?;
    let links: Vec<String> = Locale::ALL
        .iter()
        .map(|locale| {
            format!(
                "<a href=\"/{}\">{}</a>",
                locale,
                escape_html(locale.display_name()).replace(' ', "&nbsp;")
            )
        })
        .collect();
    writeln!(html, "     <nav>{}</nav>", links.join(" | "))?;
    writeln!(html, "  </div>")?;
    writeln!(html, "</header>")?;
    writeln!(html)?;
    writeln!(html, "<main class=\"container my-16\">")?;

    writeln!(html, "<h2>{}</h2>", escape_html(&labels.opportunities_heading))?;
    writeln!(html, "<table>")?;
    writeln!(
        html,
        "  <thead><tr><th>{}</th><th>{}</th></tr></thead>",
        escape_html(&labels.sector),
        SCORE_HEADER
    )?;
    writeln!(html, "  <tbody>")?;
    for row in page.sectors {
        writeln!(
            html,
            "    <tr><td>{}</td><td>{}</td></tr>",
            escape_html(&row.sector),
            format_score(row.opportunity_score)
        )?;
    }
    writeln!(html, "  </tbody>")?;
    writeln!(html, "</table>")?;
    writeln!(html)?;

    writeln!(html, "<h2 class=\"mt-16\">{}</h2>", escape_html(&labels.roi_heading))?;
    writeln!(
        html,
        "<form method=\"post\" action=\"/{}\" class=\"grid-form\">",
        page.locale
    )?;
    let inputs = [
        (&labels.employees, "employees", field_value(page, |f| &f.employees)),
        (&labels.hours_weekly, "hours_weekly", field_value(page, |f| &f.hours_weekly)),
        (&labels.cost_per_hour, "cost_per_hour", field_value(page, |f| &f.cost_per_hour)),
        (
            &labels.investment,
            "investment",
            field_value(page, |f| &f.investment).or(Some(DEFAULT_INVESTMENT)),
        ),
    ];
    for (label, name, value) in inputs {
        let value_attr = value
            .map(|v| format!(" value=\"{}\"", escape_html(v)))
            .unwrap_or_default();
        writeln!(
            html,
            "  <label>{}<br><input name=\"{}\"{} required></label>",
            escape_html(label),
            name,
            value_attr
        )?;
    }
    writeln!(
        html,
        "  <button type=\"submit\" class=\"btn btn--primary\">{}</button>",
        escape_html(&labels.calculate)
    )?;
    writeln!(html, "</form>")?;

    if let Some(roi) = &page.roi {
        writeln!(html)?;
        writeln!(html, "<div class=\"roi__resultado\">")?;
        writeln!(
            html,
            "  <p>{}: {}</p>",
            escape_html(&labels.annual_saving),
            format_currency(roi.annual_saving)
        )?;
        writeln!(
            html,
            "  <p>{}: {} {}</p>",
            escape_html(&labels.payback),
            format_one_decimal(roi.payback_years),
            escape_html(&labels.years)
        )?;
        writeln!(html, "  <p>ROI: {} %</p>", format_one_decimal(roi.roi_percent))?;
        writeln!(html, "</div>")?;
    }

    writeln!(html, "</main>")?;
    writeln!(html)?;
    writeln!(html, "<footer class=\"footer text-center py-16\">")?;
    writeln!(html, "  &copy; {} {}", page.year, site)?;
    writeln!(html, "</footer>")?;
    writeln!(html, "</body>")?;
    writeln!(html, "</html>")
}

fn write_text(out: &mut String, page: &PageModel<'_>) -> fmt::Result {
    let labels = &page.labels;

    writeln!(out, "{} [{}]", page.site_name, page.locale.display_name())?;
    writeln!(out)?;
    writeln!(out, "{}", labels.opportunities_heading)?;

    let width = page
        .sectors
        .iter()
        .map(|row| row.sector.chars().count())
        .chain(std::iter::once(labels.sector.chars().count()))
        .max()
        .unwrap_or(0);
    writeln!(out, "  {:<width$}  {}", labels.sector, SCORE_HEADER, width = width)?;
    for row in page.sectors {
        writeln!(
            out,
            "  {:<width$}  {}",
            row.sector,
            format_score(row.opportunity_score),
            width = width
        )?;
    }

    if let Some(roi) = &page.roi {
        writeln!(out)?;
        writeln!(out, "{}", labels.roi_heading)?;
        writeln!(out, "  {}: {}", labels.annual_saving, format_currency(roi.annual_saving))?;
        writeln!(
            out,
            "  {}: {} {}",
            labels.payback,
            format_one_decimal(roi.payback_years),
            labels.years
        )?;
        writeln!(out, "  ROI: {} %", format_one_decimal(roi.roi_percent))?;
    }

    writeln!(out)?;
    writeln!(out, "(c) {} {}", page.year, page.site_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::page::PageLabels;
    use crate::domain::model::{RoiResult, SectorRow};

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(509600.0), "509,600");
        assert_eq!(format_thousands(509599.99999999994), "509,600");
        assert_eq!(format_thousands(999.4), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(1234567.0), "1,234,567");
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(-150000.0), "-150,000");
        assert_eq!(format_thousands(-0.2), "-0");
        assert_eq!(format_thousands(-0.0), "-0");
        assert_eq!(format_thousands(-999.6), "-1,000");
    }

    #[test]
    fn test_format_one_decimal() {
        assert_eq!(format_one_decimal(150000.0 / 509600.0), "0.3");
        assert_eq!(format_one_decimal(239.7174), "239.7");
        assert_eq!(format_one_decimal(-100.0), "-100.0");
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(85.0), "85");
        assert_eq!(format_score(72.5), "72.5");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"R&D\"</b>"),
            "&lt;b&gt;&quot;R&amp;D&quot;&lt;/b&gt;"
        );
    }

    fn page<'a>(sectors: &'a [SectorRow], roi: Option<RoiResult>) -> PageModel<'a> {
        PageModel {
            locale: Locale::Pt,
            site_name: "DataSolutions Pro",
            labels: PageLabels {
                opportunities_heading: "Oportunidades".to_string(),
                sector: "Setor".to_string(),
                roi_heading: "Simulador de ROI".to_string(),
                employees: "Funcionários".to_string(),
                hours_weekly: "Horas".to_string(),
                cost_per_hour: "Custo".to_string(),
                investment: "Investimento".to_string(),
                calculate: "Calcular".to_string(),
                annual_saving: "Economia Anual".to_string(),
                payback: "Retorno".to_string(),
                years: "anos".to_string(),
            },
            sectors,
            form: roi.map(|_| RoiForm {
                employees: Some("10".to_string()),
                hours_weekly: Some("40".to_string()),
                cost_per_hour: Some("35".to_string()),
                investment: Some("150000".to_string()),
            }),
            roi,
            year: 2026,
        }
    }

    #[test]
    fn test_render_html_without_result() {
        let sectors = vec![SectorRow {
            sector: "Saúde & Bem-estar".to_string(),
            opportunity_score: 72.5,
        }];
        let html = render_html(&page(&sectors, None)).unwrap();

        assert!(html.contains("<html lang=\"pt-BR\">"));
        assert!(html.contains("<th>Setor</th><th>Score</th>"));
        assert!(html.contains("<td>Saúde &amp; Bem-estar</td><td>72.5</td>"));
        assert!(html.contains("<input name=\"investment\" value=\"150000\" required>"));
        assert!(html.contains("<input name=\"employees\" required>"));
        assert!(!html.contains("roi__resultado"));
        assert!(html.contains("&copy; 2026 DataSolutions Pro"));
        assert!(html.contains("<a href=\"/pt\">Português&nbsp;(BR)</a>"));
    }

    #[test]
    fn test_render_html_with_result() {
        let roi = RoiResult {
            annual_saving: 509600.0,
            payback_years: 150000.0 / 509600.0,
            roi_percent: 239.73333,
        };
        let html = render_html(&page(&[], Some(roi))).unwrap();

        assert!(html.contains("<p>Economia Anual: R$ 509,600</p>"));
        assert!(html.contains("<p>Retorno: 0.3 anos</p>"));
        assert!(html.contains("<p>ROI: 239.7 %</p>"));
        assert!(html.contains("<input name=\"employees\" value=\"10\" required>"));
    }

    #[test]
    fn test_render_text() {
        let sectors = vec![
            SectorRow {
                sector: "Varejo".to_string(),
                opportunity_score: 85.0,
            },
            SectorRow {
                sector: "Logística".to_string(),
                opportunity_score: 64.0,
            },
        ];
        let roi = RoiResult {
            annual_saving: 0.0,
            payback_years: 0.0,
            roi_percent: -100.0,
        };
        let text = render_text(&page(&sectors, Some(roi))).unwrap();

        assert!(text.contains("  Setor      Score"));
        assert!(text.contains("  Varejo     85"));
        assert!(text.contains("  Logística  64"));
        assert!(text.contains("Economia Anual: R$ 0"));
        assert!(text.contains("ROI: -100.0 %"));
    }
}
