use super::super::campaign::CampaignAggregate;
use super::super::structure::StructureType;
use super::views::CampaignBreakdownRow;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, thiserror::Error)]
pub enum BreakdownExportError {
    #[error("failed to encode campaign breakdown: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush campaign breakdown: {0}")]
    Io(#[from] std::io::Error),
}

/// Campaigns that carry a `Campaign` row, in the order those rows appear in the sheet.
pub(crate) fn build_breakdown(campaigns: &[CampaignAggregate]) -> Vec<CampaignBreakdownRow> {
    let mut with_rows: Vec<(usize, &CampaignAggregate)> = campaigns
        .iter()
        .filter_map(|campaign| campaign.first_campaign_row().map(|row| (row, campaign)))
        .collect();
    with_rows.sort_by_key(|(row, _)| *row);

    with_rows
        .into_iter()
        .map(|(_, campaign)| {
            let performance = campaign.performance();
            CampaignBreakdownRow {
                campaign_name: campaign.campaign_name().map(str::to_string),
                structure_type: campaign.structure_type(),
                spend: performance.spend,
                sales: performance.sales,
                acos: performance.acos(),
                roas: performance.roas(),
                orders: performance.orders,
                clicks: performance.clicks,
                impressions: performance.impressions,
                campaign_id: campaign.campaign_id().clone(),
            }
        })
        .collect()
}

#[derive(Serialize)]
struct BreakdownRecord<'a> {
    #[serde(rename = "Campaign Name (Informational only)")]
    campaign_name: &'a str,
    #[serde(rename = "Type")]
    structure_type: StructureType,
    #[serde(rename = "Spend")]
    spend: f64,
    #[serde(rename = "Sales")]
    sales: f64,
    #[serde(rename = "ACOS")]
    acos: f64,
    #[serde(rename = "ROAS")]
    roas: f64,
    #[serde(rename = "Orders")]
    orders: f64,
    #[serde(rename = "Clicks")]
    clicks: f64,
    #[serde(rename = "Impressions")]
    impressions: f64,
    #[serde(rename = "Campaign ID")]
    campaign_id: &'a str,
}

impl<'a> From<&'a CampaignBreakdownRow> for BreakdownRecord<'a> {
    fn from(row: &'a CampaignBreakdownRow) -> Self {
        Self {
            campaign_name: row.campaign_name.as_deref().unwrap_or_default(),
            structure_type: row.structure_type,
            spend: row.spend,
            sales: row.sales,
            acos: row.acos,
            roas: row.roas,
            orders: row.orders,
            clicks: row.clicks,
            impressions: row.impressions,
            campaign_id: row.campaign_id.as_str(),
        }
    }
}

/// Writes the breakdown as CSV with a header row, even when there are no campaigns.
pub fn write_breakdown_csv<W: Write>(
    rows: &[CampaignBreakdownRow],
    writer: W,
) -> Result<(), BreakdownExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record([
        "Campaign Name (Informational only)",
        "Type",
        "Spend",
        "Sales",
        "ACOS",
        "ROAS",
        "Orders",
        "Clicks",
        "Impressions",
        "Campaign ID",
    ])?;
    for row in rows {
        csv_writer.serialize(BreakdownRecord::from(row))?;
    }
    csv_writer.flush()?;
    Ok(())
}
