use super::parser::{ParsedSheet, SheetBuilder};
use super::BulkSheetImportError;
use calamine::{open_workbook_auto, Data, Range, Reader};
use csv::StringRecord;
use std::path::Path;
use tracing::{debug, warn};

/// Sheet holding Sponsored Products entities in Amazon bulk downloads.
pub const CAMPAIGNS_SHEET: &str = "Sponsored Products Campaigns";

/// Extensions read through the workbook reader rather than as CSV.
pub(crate) const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

pub(crate) fn parse_workbook(path: &Path) -> Result<ParsedSheet, BulkSheetImportError> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names();
    let sheet_name = resolve_sheet(&sheet_names)
        .ok_or(BulkSheetImportError::MissingWorksheet)?
        .to_string();

    let range = workbook.worksheet_range(&sheet_name)?;
    debug!(sheet = %sheet_name, rows = range.height(), "reading workbook sheet");
    Ok(parse_range(&range)?)
}

/// Picks the campaigns sheet, falling back to the first sheet in the workbook.
pub(crate) fn resolve_sheet(sheet_names: &[String]) -> Option<&str> {
    if let Some(name) = sheet_names.iter().find(|name| *name == CAMPAIGNS_SHEET) {
        return Some(name.as_str());
    }

    let first = sheet_names.first()?;
    warn!(
        expected = CAMPAIGNS_SHEET,
        using = %first,
        "campaigns sheet not found; reading the first sheet"
    );
    Some(first.as_str())
}

fn parse_range(range: &Range<Data>) -> Result<ParsedSheet, csv::Error> {
    let mut rows = range.rows().map(row_record);
    let headers = rows.next().unwrap_or_default();

    let mut builder = SheetBuilder::new(&headers);
    for record in rows {
        builder.push(&record)?;
    }
    Ok(builder.finish())
}

fn row_record(row: &[Data]) -> StringRecord {
    let mut record: StringRecord = row.iter().map(cell_text).collect();
    record.trim();
    record
}

/// Whole-number floats print without a fraction, so numeric ids keep their text form.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
