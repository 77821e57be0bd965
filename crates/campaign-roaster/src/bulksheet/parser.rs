use super::normalizer::{clean_cell, parse_number};
use crate::audit::{CampaignId, Column, EntityType, LineItem};
use csv::StringRecord;
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeSet, HashMap};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct ParsedSheet {
    pub(crate) items: Vec<LineItem>,
    pub(crate) columns: BTreeSet<Column>,
}

pub(crate) fn parse_sheet<R: Read>(reader: R) -> Result<ParsedSheet, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut builder = SheetBuilder::new(csv_reader.headers()?);
    for record in csv_reader.records() {
        builder.push(&record?)?;
    }

    Ok(builder.finish())
}

/// Turns a header record plus data records into line items. Shared by the CSV and workbook
/// readers so both map cells identically.
pub(crate) struct SheetBuilder {
    headers: StringRecord,
    columns: BTreeSet<Column>,
    items: Vec<LineItem>,
}

impl SheetBuilder {
    pub(crate) fn new(headers: &StringRecord) -> Self {
        let headers = dedupe_headers(headers);
        let columns = headers.iter().filter_map(Column::from_header).collect();
        Self {
            headers,
            columns,
            items: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, record: &StringRecord) -> Result<(), csv::Error> {
        let row: BulkSheetRow = record.deserialize(Some(&self.headers))?;
        self.items.push(row.into_line_item());
        Ok(())
    }

    pub(crate) fn finish(self) -> ParsedSheet {
        ParsedSheet {
            items: self.items,
            columns: self.columns,
        }
    }
}

/// Repeated headers keep the first column; later copies become `Header.1`, `Header.2`, ...
/// and are ignored.
fn dedupe_headers(headers: &StringRecord) -> StringRecord {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    headers
        .iter()
        .map(|header| {
            let header = header.trim();
            let count = seen.entry(header).or_insert(0);
            let renamed = if *count == 0 {
                header.to_string()
            } else {
                format!("{header}.{count}")
            };
            *count += 1;
            renamed
        })
        .collect()
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BulkSheetRow {
    #[serde(rename = "Campaign ID", deserialize_with = "cell")]
    campaign_id: Option<String>,
    #[serde(rename = "Ad Group ID", deserialize_with = "cell")]
    ad_group_id: Option<String>,
    #[serde(rename = "Ad ID", deserialize_with = "cell")]
    ad_id: Option<String>,
    #[serde(rename = "Entity", deserialize_with = "cell")]
    entity: Option<String>,
    #[serde(rename = "Campaign Name (Informational only)", deserialize_with = "cell")]
    campaign_name_informational: Option<String>,
    #[serde(rename = "Campaign Name", deserialize_with = "cell")]
    campaign_name: Option<String>,
    #[serde(rename = "ASIN (Informational only)", deserialize_with = "cell")]
    asin_informational: Option<String>,
    #[serde(rename = "ASIN", deserialize_with = "cell")]
    asin: Option<String>,
    #[serde(rename = "Keyword Text", deserialize_with = "cell")]
    keyword_text: Option<String>,
    #[serde(rename = "Match Type", deserialize_with = "cell")]
    match_type: Option<String>,
    #[serde(rename = "Product Targeting Expression", deserialize_with = "cell")]
    product_targeting_expression: Option<String>,
    #[serde(rename = "Percentage", deserialize_with = "cell")]
    percentage: Option<String>,
    #[serde(rename = "Spend", deserialize_with = "cell")]
    spend: Option<String>,
    #[serde(rename = "Sales", deserialize_with = "cell")]
    sales: Option<String>,
    #[serde(rename = "Orders", deserialize_with = "cell")]
    orders: Option<String>,
    #[serde(rename = "Clicks", deserialize_with = "cell")]
    clicks: Option<String>,
    #[serde(rename = "Impressions", deserialize_with = "cell")]
    impressions: Option<String>,
}

impl BulkSheetRow {
    fn into_line_item(self) -> LineItem {
        LineItem {
            campaign_id: self.campaign_id.map(CampaignId),
            ad_group_id: self.ad_group_id,
            ad_id: self.ad_id,
            entity: self.entity.as_deref().and_then(EntityType::parse),
            campaign_name: self.campaign_name_informational.or(self.campaign_name),
            asin: self.asin_informational.or(self.asin),
            keyword_text: self.keyword_text,
            match_type: self.match_type,
            product_targeting_expression: self.product_targeting_expression,
            percentage: parse_number(self.percentage.as_deref()),
            spend: parse_number(self.spend.as_deref()),
            sales: parse_number(self.sales.as_deref()),
            orders: parse_number(self.orders.as_deref()),
            clicks: parse_number(self.clicks.as_deref()),
            impressions: parse_number(self.impressions.as_deref()),
        }
    }
}

fn cell<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.as_deref().and_then(clean_cell))
}
