use crate::domain::model::{Dataset, SectorRow};
use crate::domain::ports::Storage;
use crate::utils::error::{AppError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Sectors,
    SaasMarket,
    SalesFunnel,
    AutomationRoi,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 4] = [
        DatasetKind::Sectors,
        DatasetKind::SaasMarket,
        DatasetKind::SalesFunnel,
        DatasetKind::AutomationRoi,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DatasetKind::Sectors => "sectors",
            DatasetKind::SaasMarket => "saas_market",
            DatasetKind::SalesFunnel => "sales_funnel",
            DatasetKind::AutomationRoi => "automation_roi",
        }
    }

    /// Only the sector table is needed to build a page.
    pub fn is_required(self) -> bool {
        matches!(self, DatasetKind::Sectors)
    }
}

/// CSV file name of each dataset, relative to the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetFiles {
    pub sectors: String,
    pub saas_market: String,
    pub sales_funnel: String,
    pub automation_roi: String,
}

impl Default for DatasetFiles {
    fn default() -> Self {
        Self {
            sectors: "oportunidades_por_setor.csv".to_string(),
            saas_market: "mercado_saas_brasil.csv".to_string(),
            sales_funnel: "funil_vendas_meddic.csv".to_string(),
            automation_roi: "roi_por_automacao.csv".to_string(),
        }
    }
}

impl DatasetFiles {
    pub fn file_name(&self, kind: DatasetKind) -> &str {
        match kind {
            DatasetKind::Sectors => &self.sectors,
            DatasetKind::SaasMarket => &self.saas_market,
            DatasetKind::SalesFunnel => &self.sales_funnel,
            DatasetKind::AutomationRoi => &self.automation_roi,
        }
    }

    pub fn all(&self) -> Vec<&str> {
        DatasetKind::ALL.iter().map(|kind| self.file_name(*kind)).collect()
    }
}

/// Tables loaded once at startup and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Datasets {
    sectors: Vec<SectorRow>,
    saas_market: Dataset,
    sales_funnel: Dataset,
    automation_roi: Dataset,
}

impl Datasets {
    pub fn new(sectors: Vec<SectorRow>) -> Self {
        Self {
            sectors,
            ..Self::default()
        }
    }

    pub async fn load<S: Storage>(storage: &S, files: &DatasetFiles) -> Result<Self> {
        let mut datasets = Datasets::default();

        for kind in DatasetKind::ALL {
            let file_name = files.file_name(kind);

            if !kind.is_required() && !storage.exists(file_name).await {
                tracing::warn!(
                    "Optional dataset '{}' not found at {}, using an empty table",
                    kind.name(),
                    file_name
                );
                continue;
            }

            let bytes = storage.read_file(file_name).await.map_err(|e| {
                AppError::DatasetError {
                    name: kind.name().to_string(),
                    message: format!("{}: {}", file_name, e),
                }
            })?;

            match kind {
                DatasetKind::Sectors => datasets.sectors = parse_sectors(&bytes)?,
                DatasetKind::SaasMarket => datasets.saas_market = parse_dataset(kind, &bytes)?,
                DatasetKind::SalesFunnel => datasets.sales_funnel = parse_dataset(kind, &bytes)?,
                DatasetKind::AutomationRoi => {
                    datasets.automation_roi = parse_dataset(kind, &bytes)?
                }
            }
        }

        tracing::info!(
            "Loaded {} sector rows ({} market, {} funnel, {} automation rows)",
            datasets.sectors.len(),
            datasets.saas_market.len(),
            datasets.sales_funnel.len(),
            datasets.automation_roi.len()
        );

        Ok(datasets)
    }

    pub fn sectors(&self) -> &[SectorRow] {
        &self.sectors
    }

    /// Generic view of the tables other than sectors.
    pub fn dataset(&self, kind: DatasetKind) -> Option<&Dataset> {
        match kind {
            DatasetKind::Sectors => None,
            DatasetKind::SaasMarket => Some(&self.saas_market),
            DatasetKind::SalesFunnel => Some(&self.sales_funnel),
            DatasetKind::AutomationRoi => Some(&self.automation_roi),
        }
    }
}

fn reader(bytes: &[u8]) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes)
}

pub fn parse_sectors(bytes: &[u8]) -> Result<Vec<SectorRow>> {
    let mut rdr = reader(bytes);
    let mut rows = Vec::new();

    for (line, record) in rdr.deserialize::<SectorRow>().enumerate() {
        let row = record.map_err(|e| AppError::DatasetError {
            name: DatasetKind::Sectors.name().to_string(),
            message: format!("row {}: {}", line + 1, e),
        })?;
        rows.push(row);
    }

    Ok(rows)
}

pub fn parse_dataset(kind: DatasetKind, bytes: &[u8]) -> Result<Dataset> {
    let mut rdr = reader(bytes);
    let headers = rdr
        .headers()?
        .iter()
        .map(str::to_string)
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| AppError::DatasetError {
            name: kind.name().to_string(),
            message: e.to_string(),
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Dataset { headers, rows })
}
