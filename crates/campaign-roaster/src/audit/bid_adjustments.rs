use super::domain::{Column, EntityType, LineItemTable};
use serde::Serialize;
use std::collections::BTreeSet;

const REQUIRED_COLUMNS: [Column; 3] = [Column::CampaignId, Column::Entity, Column::Percentage];

/// Share of campaigns using placement / bid modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BidAdjustmentAnalysis {
    pub total_campaigns: usize,
    pub adjustment_usage_percent: f64,
}

pub fn analyze_bid_adjustments(table: &LineItemTable) -> BidAdjustmentAnalysis {
    if !table.has_columns(&REQUIRED_COLUMNS) {
        return BidAdjustmentAnalysis::default();
    }

    let total_campaigns = table.campaign_ids().len();
    if total_campaigns == 0 {
        return BidAdjustmentAnalysis::default();
    }

    let adjusted: BTreeSet<_> = table
        .items()
        .iter()
        .filter(|item| item.is(&EntityType::BiddingAdjustment))
        .filter(|item| item.percentage.unwrap_or(0.0) != 0.0)
        .filter_map(|item| item.campaign_id.as_ref())
        .collect();

    BidAdjustmentAnalysis {
        total_campaigns,
        adjustment_usage_percent: adjusted.len() as f64 / total_campaigns as f64 * 100.0,
    }
}
