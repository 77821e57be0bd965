use super::super::automation::AutomationAnalysis;
use super::super::bid_adjustments::BidAdjustmentAnalysis;
use super::super::domain::CampaignId;
use super::super::funneling::FunnelingAnalysis;
use super::super::score::ScoreBreakdown;
use super::super::structure::{StructureAnalysis, StructureRating, StructureType};
use serde::Serialize;

/// Output contract handed to presentation: one entry per analyzer plus the score.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummary {
    pub structure: StructureAnalysis,
    pub automation: AutomationAnalysis,
    pub funneling: FunnelingAnalysis,
    pub bid_adjustments: BidAdjustmentAnalysis,
    pub overall_score: u8,
    pub score_breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    Structure,
    Automation,
    Funneling,
    BidAdjustments,
}

impl Pillar {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Structure,
            Self::Automation,
            Self::Funneling,
            Self::BidAdjustments,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Structure => "Structure",
            Self::Automation => "Automation",
            Self::Funneling => "Funneling",
            Self::BidAdjustments => "Bid Adjustments",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictLevel {
    Success,
    Warning,
    Critical,
}

impl VerdictLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PillarVerdict {
    pub pillar: Pillar,
    pub pillar_label: &'static str,
    pub level: VerdictLevel,
    pub level_label: &'static str,
    pub metric: String,
    pub headline: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallGrade {
    Excellent,
    Solid,
    NeedsOverhaul,
}

impl OverallGrade {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Solid => "Solid",
            Self::NeedsOverhaul => "Needs Overhaul",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OverallVerdict {
    pub score: u8,
    pub grade: OverallGrade,
    pub grade_label: &'static str,
    pub headline: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditVerdicts {
    pub overall: OverallVerdict,
    pub pillars: Vec<PillarVerdict>,
}

impl AuditVerdicts {
    pub fn pillar(&self, pillar: Pillar) -> Option<&PillarVerdict> {
        self.pillars.iter().find(|verdict| verdict.pillar == pillar)
    }
}

/// One campaign in the detailed breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignBreakdownRow {
    pub campaign_name: Option<String>,
    pub structure_type: StructureType,
    pub spend: f64,
    pub sales: f64,
    pub acos: f64,
    pub roas: f64,
    pub orders: f64,
    pub clicks: f64,
    pub impressions: f64,
    pub campaign_id: CampaignId,
}

#[derive(Debug, Clone, Serialize)]
pub struct StructureTypeDefinitionView {
    pub code: StructureType,
    pub title: &'static str,
    pub conditions: &'static str,
    pub verdict: &'static str,
    pub rating: StructureRating,
    pub counts_as_good: bool,
}

impl StructureTypeDefinitionView {
    pub fn all() -> Vec<Self> {
        StructureType::ordered()
            .into_iter()
            .map(|code| Self {
                code,
                title: code.title(),
                conditions: code.conditions(),
                verdict: code.verdict(),
                rating: code.rating(),
                counts_as_good: code.is_good(),
            })
            .collect()
    }
}
