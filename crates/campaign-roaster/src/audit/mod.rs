//! Campaign structure classification and account health scoring.
//!
//! Every analyzer reads the same immutable [`LineItemTable`] independently; the score is a
//! pure function of their outputs.

mod automation;
mod bid_adjustments;
mod campaign;
pub mod domain;
mod funneling;
pub mod report;
mod score;
mod structure;

pub use automation::{analyze_automation, AutomationAnalysis};
pub use bid_adjustments::{analyze_bid_adjustments, BidAdjustmentAnalysis};
pub use campaign::{aggregate_campaigns, CampaignAggregate, CampaignPerformance, StructureCounts};
pub use domain::{CampaignId, Column, EntityType, LineItem, LineItemTable};
pub use funneling::{analyze_funneling, FunnelingAnalysis};
pub use report::{AuditSummary, AuditVerdicts, CampaignBreakdownRow};
pub use score::{automation_points, score_account, ScoreBreakdown, MAX_SCORE};
pub use structure::{analyze_structure, classify, StructureAnalysis, StructureRating, StructureType};

use tracing::{debug, info};

/// Result of one audit run over a bulk sheet.
#[derive(Debug, Clone)]
pub struct AccountAudit {
    campaigns: Vec<CampaignAggregate>,
    structure: StructureAnalysis,
    automation: AutomationAnalysis,
    funneling: FunnelingAnalysis,
    bid_adjustments: BidAdjustmentAnalysis,
    score: ScoreBreakdown,
}

impl AccountAudit {
    pub fn run(table: &LineItemTable) -> Self {
        let campaigns = aggregate_campaigns(table);
        debug!(
            rows = table.len(),
            campaigns = campaigns.len(),
            "aggregated campaigns"
        );

        let structure = analyze_structure(&campaigns);
        let automation = analyze_automation(table);
        let funneling = analyze_funneling(table);
        let bid_adjustments = analyze_bid_adjustments(table);
        let score = score_account(&structure, &automation, &funneling, &bid_adjustments);

        info!(
            campaigns = structure.total_campaigns,
            good_structure_percent = structure.good_structure_percent,
            auto_percent = automation.auto_percent,
            overall_score = score.overall,
            "account audit complete"
        );

        Self {
            campaigns,
            structure,
            automation,
            funneling,
            bid_adjustments,
            score,
        }
    }

    pub fn campaigns(&self) -> &[CampaignAggregate] {
        &self.campaigns
    }

    pub fn structure(&self) -> &StructureAnalysis {
        &self.structure
    }

    pub fn automation(&self) -> &AutomationAnalysis {
        &self.automation
    }

    pub fn funneling(&self) -> &FunnelingAnalysis {
        &self.funneling
    }

    pub fn bid_adjustments(&self) -> &BidAdjustmentAnalysis {
        &self.bid_adjustments
    }

    pub fn score(&self) -> &ScoreBreakdown {
        &self.score
    }

    pub fn overall_score(&self) -> u8 {
        self.score.overall
    }

    pub fn summary(&self) -> AuditSummary {
        AuditSummary {
            structure: self.structure.clone(),
            automation: self.automation,
            funneling: self.funneling,
            bid_adjustments: self.bid_adjustments,
            overall_score: self.score.overall,
            score_breakdown: self.score,
        }
    }

    pub fn verdicts(&self) -> AuditVerdicts {
        report::generate_verdicts(&self.summary())
    }

    pub fn breakdown(&self) -> Vec<CampaignBreakdownRow> {
        report::build_breakdown(&self.campaigns)
    }
}
