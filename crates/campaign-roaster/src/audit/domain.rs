use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identifier shared by every row that belongs to one campaign.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignId(pub String);

impl CampaignId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CampaignId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Kind of entity a bulk-sheet row describes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityType {
    Campaign,
    AdGroup,
    ProductAd,
    Keyword,
    ProductTargeting,
    BiddingAdjustment,
    /// Negative keyword / negative product targeting rows, kept verbatim since the
    /// naming varies between exports.
    Negative(String),
    Other(String),
}

impl EntityType {
    /// Parses the `Entity` cell. Returns `None` for blank text.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let entity = match trimmed {
            "Campaign" => Self::Campaign,
            "Ad Group" => Self::AdGroup,
            "Product Ad" => Self::ProductAd,
            "Keyword" => Self::Keyword,
            "Product Targeting" => Self::ProductTargeting,
            "Bidding Adjustment" => Self::BiddingAdjustment,
            other if other.to_lowercase().contains("negative") => Self::Negative(other.to_string()),
            other => Self::Other(other.to_string()),
        };
        Some(entity)
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Campaign => "Campaign",
            Self::AdGroup => "Ad Group",
            Self::ProductAd => "Product Ad",
            Self::Keyword => "Keyword",
            Self::ProductTargeting => "Product Targeting",
            Self::BiddingAdjustment => "Bidding Adjustment",
            Self::Negative(text) | Self::Other(text) => text,
        }
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, Self::Negative(_))
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Columns of the bulk-sheet schema the engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    CampaignId,
    AdGroupId,
    AdId,
    Entity,
    CampaignName,
    Asin,
    KeywordText,
    MatchType,
    ProductTargetingExpression,
    Percentage,
    Spend,
    Sales,
    Orders,
    Clicks,
    Impressions,
}

impl Column {
    pub const fn all() -> [Self; 15] {
        [
            Self::CampaignId,
            Self::AdGroupId,
            Self::AdId,
            Self::Entity,
            Self::CampaignName,
            Self::Asin,
            Self::KeywordText,
            Self::MatchType,
            Self::ProductTargetingExpression,
            Self::Percentage,
            Self::Spend,
            Self::Sales,
            Self::Orders,
            Self::Clicks,
            Self::Impressions,
        ]
    }

    /// Header used by Sponsored Products bulk-sheet exports.
    pub const fn header(self) -> &'static str {
        match self {
            Self::CampaignId => "Campaign ID",
            Self::AdGroupId => "Ad Group ID",
            Self::AdId => "Ad ID",
            Self::Entity => "Entity",
            Self::CampaignName => "Campaign Name (Informational only)",
            Self::Asin => "ASIN (Informational only)",
            Self::KeywordText => "Keyword Text",
            Self::MatchType => "Match Type",
            Self::ProductTargetingExpression => "Product Targeting Expression",
            Self::Percentage => "Percentage",
            Self::Spend => "Spend",
            Self::Sales => "Sales",
            Self::Orders => "Orders",
            Self::Clicks => "Clicks",
            Self::Impressions => "Impressions",
        }
    }

    const fn alias(self) -> Option<&'static str> {
        match self {
            Self::CampaignName => Some("Campaign Name"),
            Self::Asin => Some("ASIN"),
            _ => None,
        }
    }

    /// Resolves a header cell to a column, accepting the short aliases some exports use.
    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.trim();
        Self::all().into_iter().find(|column| {
            column.header() == header || column.alias().is_some_and(|alias| alias == header)
        })
    }
}

/// One row of the bulk sheet. Numeric cells that failed to parse are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineItem {
    pub campaign_id: Option<CampaignId>,
    pub ad_group_id: Option<String>,
    pub ad_id: Option<String>,
    pub entity: Option<EntityType>,
    pub campaign_name: Option<String>,
    pub asin: Option<String>,
    pub keyword_text: Option<String>,
    pub match_type: Option<String>,
    pub product_targeting_expression: Option<String>,
    pub percentage: Option<f64>,
    pub spend: Option<f64>,
    pub sales: Option<f64>,
    pub orders: Option<f64>,
    pub clicks: Option<f64>,
    pub impressions: Option<f64>,
}

impl LineItem {
    pub fn new(campaign_id: impl Into<String>, entity: EntityType) -> Self {
        Self {
            campaign_id: Some(CampaignId(campaign_id.into())),
            entity: Some(entity),
            ..Self::default()
        }
    }

    pub fn is(&self, entity: &EntityType) -> bool {
        self.entity.as_ref() == Some(entity)
    }

    pub fn is_negative(&self) -> bool {
        self.entity.as_ref().is_some_and(EntityType::is_negative)
    }

    /// True when the row carries a non-blank product targeting expression, which marks the
    /// whole campaign as auto-targeted.
    pub fn has_targeting_expression(&self) -> bool {
        self.product_targeting_expression
            .as_deref()
            .is_some_and(|expr| !expr.trim().is_empty())
    }

    pub fn with_ad_group(mut self, ad_group_id: impl Into<String>) -> Self {
        self.ad_group_id = Some(ad_group_id.into());
        self
    }

    pub fn with_ad(mut self, ad_id: impl Into<String>, asin: impl Into<String>) -> Self {
        self.ad_id = Some(ad_id.into());
        self.asin = Some(asin.into());
        self
    }

    pub fn with_keyword(mut self, text: impl Into<String>, match_type: impl Into<String>) -> Self {
        self.keyword_text = Some(text.into());
        self.match_type = Some(match_type.into());
        self
    }

    pub fn with_targeting_expression(mut self, expression: impl Into<String>) -> Self {
        self.product_targeting_expression = Some(expression.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.campaign_name = Some(name.into());
        self
    }

    pub fn with_percentage(mut self, percentage: f64) -> Self {
        self.percentage = Some(percentage);
        self
    }

    pub fn with_spend(mut self, spend: f64) -> Self {
        self.spend = Some(spend);
        self
    }

    pub fn with_sales(mut self, sales: f64) -> Self {
        self.sales = Some(sales);
        self
    }
}

/// Immutable, fully materialized input to an audit run.
#[derive(Debug, Clone, Default)]
pub struct LineItemTable {
    items: Vec<LineItem>,
    columns: BTreeSet<Column>,
}

impl LineItemTable {
    /// Builds a table whose source carried every column.
    pub fn new(items: Vec<LineItem>) -> Self {
        Self::with_columns(items, Column::all())
    }

    /// Builds a table that remembers which columns the source actually had; cells of absent
    /// columns read as empty.
    pub fn with_columns(items: Vec<LineItem>, columns: impl IntoIterator<Item = Column>) -> Self {
        Self {
            items,
            columns: columns.into_iter().collect(),
        }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    pub fn has_columns(&self, columns: &[Column]) -> bool {
        columns.iter().all(|column| self.has_column(*column))
    }

    /// Distinct campaign ids. Rows without one are malformed and never grouped.
    pub fn campaign_ids(&self) -> BTreeSet<&CampaignId> {
        self.items
            .iter()
            .filter_map(|item| item.campaign_id.as_ref())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_parse_matches_negatives_loosely() {
        assert_eq!(EntityType::parse("Campaign"), Some(EntityType::Campaign));
        assert_eq!(
            EntityType::parse(" Product Targeting "),
            Some(EntityType::ProductTargeting)
        );
        assert!(EntityType::parse("Negative Keyword")
            .expect("entity")
            .is_negative());
        assert!(EntityType::parse("Campaign negative product targeting")
            .expect("entity")
            .is_negative());
        assert_eq!(
            EntityType::parse("Product Ad Group Shelf"),
            Some(EntityType::Other("Product Ad Group Shelf".to_string()))
        );
        assert_eq!(EntityType::parse("   "), None);
    }

    #[test]
    fn column_headers_resolve_with_aliases() {
        assert_eq!(Column::from_header("Campaign ID"), Some(Column::CampaignId));
        assert_eq!(Column::from_header("Campaign Name"), Some(Column::CampaignName));
        assert_eq!(Column::from_header("ASIN"), Some(Column::Asin));
        assert_eq!(
            Column::from_header("ASIN (Informational only)"),
            Some(Column::Asin)
        );
        assert_eq!(Column::from_header("Bid"), None);
    }

    #[test]
    fn table_groups_only_rows_with_campaign_ids() {
        let mut orphan = LineItem::new("ignored", EntityType::Keyword);
        orphan.campaign_id = None;
        let table = LineItemTable::new(vec![
            LineItem::new("c-2", EntityType::Campaign),
            LineItem::new("c-1", EntityType::Campaign),
            LineItem::new("c-1", EntityType::AdGroup),
            orphan,
        ]);

        let ids: Vec<_> = table.campaign_ids().into_iter().map(CampaignId::as_str).collect();
        assert_eq!(ids, vec!["c-1", "c-2"]);
        assert!(table.has_columns(&[Column::Spend, Column::Percentage]));
    }

    #[test]
    fn blank_targeting_expression_is_not_auto() {
        let row = LineItem::new("c-1", EntityType::ProductTargeting).with_targeting_expression("  ");
        assert!(!row.has_targeting_expression());
        let row = row.with_targeting_expression("close-match");
        assert!(row.has_targeting_expression());
    }
}
