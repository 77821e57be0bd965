use super::domain::{CampaignId, EntityType, LineItem, LineItemTable};
use super::structure::{classify, StructureType};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Distinct-value counts that drive structure classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StructureCounts {
    pub ad_groups: usize,
    pub ads: usize,
    pub asins: usize,
    pub keywords: usize,
    pub targets: usize,
    pub match_types: usize,
}

impl StructureCounts {
    /// Keywords plus product targets.
    pub const fn targeting(&self) -> usize {
        self.keywords + self.targets
    }
}

/// Performance totals read from a campaign's `Campaign` rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CampaignPerformance {
    pub spend: f64,
    pub sales: f64,
    pub orders: f64,
    pub clicks: f64,
    pub impressions: f64,
}

impl CampaignPerformance {
    fn absorb(&mut self, item: &LineItem) {
        self.spend += item.spend.unwrap_or(0.0);
        self.sales += item.sales.unwrap_or(0.0);
        self.orders += item.orders.unwrap_or(0.0);
        self.clicks += item.clicks.unwrap_or(0.0);
        self.impressions += item.impressions.unwrap_or(0.0);
    }

    /// Advertising cost of sales as a ratio; 0 without sales.
    pub fn acos(&self) -> f64 {
        if self.sales > 0.0 {
            self.spend / self.sales
        } else {
            0.0
        }
    }

    /// Return on ad spend; 0 without spend.
    pub fn roas(&self) -> f64 {
        if self.spend > 0.0 {
            self.sales / self.spend
        } else {
            0.0
        }
    }
}

/// Everything derived for one campaign during an audit run. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct CampaignAggregate {
    campaign_id: CampaignId,
    campaign_name: Option<String>,
    counts: StructureCounts,
    structure_type: StructureType,
    performance: CampaignPerformance,
    first_campaign_row: Option<usize>,
}

impl CampaignAggregate {
    pub fn campaign_id(&self) -> &CampaignId {
        &self.campaign_id
    }

    pub fn campaign_name(&self) -> Option<&str> {
        self.campaign_name.as_deref()
    }

    pub fn counts(&self) -> StructureCounts {
        self.counts
    }

    pub fn structure_type(&self) -> StructureType {
        self.structure_type
    }

    pub fn performance(&self) -> CampaignPerformance {
        self.performance
    }

    /// Position of the first `Campaign` row in the source table, if the campaign has one.
    pub fn first_campaign_row(&self) -> Option<usize> {
        self.first_campaign_row
    }
}

#[derive(Default)]
struct Accumulator<'a> {
    name: Option<&'a str>,
    ad_groups: HashSet<&'a str>,
    ads: HashSet<&'a str>,
    asins: HashSet<&'a str>,
    keywords: HashSet<&'a str>,
    match_types: HashSet<&'a str>,
    targets: HashSet<&'a str>,
    performance: CampaignPerformance,
    first_campaign_row: Option<usize>,
}

impl<'a> Accumulator<'a> {
    fn absorb(&mut self, index: usize, item: &'a LineItem) {
        if self.name.is_none() {
            self.name = item.campaign_name.as_deref();
        }
        if let Some(ad_group) = item.ad_group_id.as_deref() {
            self.ad_groups.insert(ad_group);
        }

        match item.entity {
            Some(EntityType::ProductAd) => {
                self.ads.extend(item.ad_id.as_deref());
                self.asins.extend(item.asin.as_deref());
            }
            Some(EntityType::Keyword) => {
                self.keywords.extend(item.keyword_text.as_deref());
                self.match_types.extend(item.match_type.as_deref());
            }
            Some(EntityType::ProductTargeting) => {
                self.targets
                    .extend(item.product_targeting_expression.as_deref());
            }
            Some(EntityType::Campaign) => {
                self.performance.absorb(item);
                self.first_campaign_row.get_or_insert(index);
            }
            _ => {}
        }
    }

    fn finish(self, campaign_id: CampaignId) -> CampaignAggregate {
        let counts = StructureCounts {
            ad_groups: self.ad_groups.len(),
            ads: self.ads.len(),
            asins: self.asins.len(),
            keywords: self.keywords.len(),
            targets: self.targets.len(),
            match_types: self.match_types.len(),
        };

        CampaignAggregate {
            campaign_id,
            campaign_name: self.name.map(str::to_string),
            counts,
            structure_type: classify(&counts),
            performance: self.performance,
            first_campaign_row: self.first_campaign_row,
        }
    }
}

/// Groups the table by campaign id, ordered by id. Rows without an id are skipped.
pub fn aggregate_campaigns(table: &LineItemTable) -> Vec<CampaignAggregate> {
    let mut groups: BTreeMap<&CampaignId, Accumulator<'_>> = BTreeMap::new();

    for (index, item) in table.items().iter().enumerate() {
        let Some(campaign_id) = item.campaign_id.as_ref() else {
            continue;
        };
        groups.entry(campaign_id).or_default().absorb(index, item);
    }

    groups
        .into_iter()
        .map(|(campaign_id, acc)| acc.finish(campaign_id.clone()))
        .collect()
}
