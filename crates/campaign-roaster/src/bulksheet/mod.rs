//! Sponsored Products bulk-sheet import, from CSV exports or bulk-download workbooks.

mod normalizer;
mod parser;
mod workbook;

pub use workbook::CAMPAIGNS_SHEET;

use crate::audit::{Column, LineItemTable};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Columns whose absence disables part of the audit.
const ANALYZER_COLUMNS: [Column; 5] = [
    Column::CampaignId,
    Column::Entity,
    Column::ProductTargetingExpression,
    Column::Percentage,
    Column::Spend,
];

#[derive(Debug)]
pub enum BulkSheetImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Workbook(calamine::Error),
    MissingWorksheet,
}

impl std::fmt::Display for BulkSheetImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BulkSheetImportError::Io(err) => write!(f, "failed to read bulk sheet: {}", err),
            BulkSheetImportError::Csv(err) => write!(f, "invalid bulk sheet CSV data: {}", err),
            BulkSheetImportError::Workbook(err) => write!(f, "failed to read workbook: {}", err),
            BulkSheetImportError::MissingWorksheet => write!(f, "workbook has no worksheets"),
        }
    }
}

impl std::error::Error for BulkSheetImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BulkSheetImportError::Io(err) => Some(err),
            BulkSheetImportError::Csv(err) => Some(err),
            BulkSheetImportError::Workbook(err) => Some(err),
            BulkSheetImportError::MissingWorksheet => None,
        }
    }
}

impl From<std::io::Error> for BulkSheetImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BulkSheetImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<calamine::Error> for BulkSheetImportError {
    fn from(err: calamine::Error) -> Self {
        Self::Workbook(err)
    }
}

pub struct BulkSheetImporter;

impl BulkSheetImporter {
    /// Reads a workbook when the extension names one, CSV otherwise.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<LineItemTable, BulkSheetImportError> {
        let path = path.as_ref();
        if is_workbook(path) {
            Self::from_workbook_path(path)
        } else {
            Self::from_path(path)
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<LineItemTable, BulkSheetImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<LineItemTable, BulkSheetImportError> {
        let sheet = parser::parse_sheet(reader)?;
        Ok(Self::into_table(sheet))
    }

    /// Reads the campaigns sheet of a bulk-download workbook, or its first sheet when the
    /// campaigns sheet is missing.
    pub fn from_workbook_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<LineItemTable, BulkSheetImportError> {
        let sheet = workbook::parse_workbook(path.as_ref())?;
        Ok(Self::into_table(sheet))
    }

    fn into_table(sheet: parser::ParsedSheet) -> LineItemTable {
        let missing: Vec<&'static str> = ANALYZER_COLUMNS
            .iter()
            .filter(|column| !sheet.columns.contains(*column))
            .map(|column| column.header())
            .collect();
        if !missing.is_empty() {
            warn!(?missing, "bulk sheet is missing columns; affected metrics read as zero");
        }

        let orphaned = sheet
            .items
            .iter()
            .filter(|item| item.campaign_id.is_none())
            .count();
        if orphaned > 0 {
            warn!(orphaned, "rows without a campaign id are excluded from grouping");
        }

        info!(
            rows = sheet.items.len(),
            columns = sheet.columns.len(),
            "bulk sheet imported"
        );

        LineItemTable::with_columns(sheet.items, sheet.columns)
    }
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            workbook::WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(extension))
        })
}
