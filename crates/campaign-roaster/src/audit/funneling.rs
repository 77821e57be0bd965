use super::domain::{Column, LineItemTable};
use serde::Serialize;
use std::collections::BTreeSet;

const REQUIRED_COLUMNS: [Column; 2] = [Column::CampaignId, Column::Entity];

/// Negative-targeting coverage across campaigns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelingAnalysis {
    pub total_campaigns: usize,
    pub campaigns_with_negatives_percent: f64,
    pub avg_negatives_per_campaign: f64,
}

pub fn analyze_funneling(table: &LineItemTable) -> FunnelingAnalysis {
    if !table.has_columns(&REQUIRED_COLUMNS) {
        return FunnelingAnalysis::default();
    }

    let total_campaigns = table.campaign_ids().len();
    if total_campaigns == 0 {
        return FunnelingAnalysis::default();
    }

    let mut with_negatives = BTreeSet::new();
    let mut negative_rows = 0usize;
    for item in table.items().iter().filter(|item| item.is_negative()) {
        let Some(campaign_id) = item.campaign_id.as_ref() else {
            continue;
        };
        negative_rows += 1;
        with_negatives.insert(campaign_id);
    }

    FunnelingAnalysis {
        total_campaigns,
        campaigns_with_negatives_percent: with_negatives.len() as f64 / total_campaigns as f64
            * 100.0,
        avg_negatives_per_campaign: negative_rows as f64 / total_campaigns as f64,
    }
}
