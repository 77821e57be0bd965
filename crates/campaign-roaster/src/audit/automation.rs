use super::domain::{CampaignId, Column, EntityType, LineItemTable};
use serde::Serialize;
use std::collections::HashSet;

const REQUIRED_COLUMNS: [Column; 3] = [
    Column::CampaignId,
    Column::ProductTargetingExpression,
    Column::Spend,
];

/// Split of campaign spend between auto-targeted and manually targeted campaigns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationAnalysis {
    pub total_spend: f64,
    pub auto_percent: f64,
    pub manual_percent: f64,
    pub auto_spend: f64,
    pub manual_spend: f64,
}

/// Campaigns with a product targeting expression on any of their rows.
fn auto_campaign_ids(table: &LineItemTable) -> HashSet<&CampaignId> {
    table
        .items()
        .iter()
        .filter(|item| item.has_targeting_expression())
        .filter_map(|item| item.campaign_id.as_ref())
        .collect()
}

pub fn analyze_automation(table: &LineItemTable) -> AutomationAnalysis {
    if !table.has_columns(&REQUIRED_COLUMNS) {
        return AutomationAnalysis::default();
    }

    let auto_ids = auto_campaign_ids(table);
    let mut auto_spend = 0.0;
    let mut manual_spend = 0.0;

    for item in table.items() {
        if !item.is(&EntityType::Campaign) {
            continue;
        }
        let Some(campaign_id) = item.campaign_id.as_ref() else {
            continue;
        };

        let spend = item.spend.unwrap_or(0.0);
        if auto_ids.contains(campaign_id) {
            auto_spend += spend;
        } else {
            manual_spend += spend;
        }
    }

    let total_spend = auto_spend + manual_spend;
    let share = |spend: f64| {
        if total_spend > 0.0 {
            spend / total_spend * 100.0
        } else {
            0.0
        }
    };

    AutomationAnalysis {
        total_spend,
        auto_percent: share(auto_spend),
        manual_percent: share(manual_spend),
        auto_spend,
        manual_spend,
    }
}
