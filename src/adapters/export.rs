use crate::domain::model::Vendor;
use crate::utils::error::{MarketError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Tsv => "text/tab-separated-values; charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            "json" => Ok(ExportFormat::Json),
            other => Err(MarketError::validation(format!(
                "Unsupported export format '{}'. Valid formats: csv, tsv, json",
                other
            ))),
        }
    }
}

const HEADER: [&str; 8] = [
    "rank",
    "id",
    "name",
    "businessName",
    "vendorType",
    "rating",
    "basePrice",
    "status",
];

/// Renders vendors, already in ranked order, as a table or JSON array.
pub fn render_ranking(vendors: &[Vendor], format: ExportFormat) -> Result<String> {
    let delimiter = match format {
        ExportFormat::Json => {
            let redacted: Vec<Vendor> = vendors.iter().cloned().map(Vendor::redacted).collect();
            return Ok(serde_json::to_string_pretty(&redacted)?);
        }
        ExportFormat::Csv => b',',
        ExportFormat::Tsv => b'\t',
    };

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for (index, vendor) in vendors.iter().enumerate() {
        let vendor_type = vendor
            .vendor_type
            .and_then(|t| serde_json::to_value(t).ok())
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        let status = serde_json::to_value(vendor.status)?
            .as_str()
            .unwrap_or_default()
            .to_string();

        writer.write_record([
            (index + 1).to_string(),
            vendor.account.id.clone(),
            vendor.account.name.clone(),
            vendor.business_name.clone().unwrap_or_default(),
            vendor_type,
            format!("{:.2}", vendor.rating),
            format!("{:.2}", vendor.base_price),
            status,
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| MarketError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| {
        MarketError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
