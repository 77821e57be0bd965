use super::automation::AutomationAnalysis;
use super::bid_adjustments::BidAdjustmentAnalysis;
use super::funneling::FunnelingAnalysis;
use super::structure::StructureAnalysis;
use serde::Serialize;

const STRUCTURE_POINTS: f64 = 50.0;
const FUNNELING_POINTS: f64 = 15.0;
const BID_ADJUSTMENT_POINTS: f64 = 15.0;

const AUTOMATION_IDEAL_POINTS: f64 = 20.0;
const AUTOMATION_TOLERATED_POINTS: f64 = 10.0;
const AUTOMATION_IDEAL_MIN: f64 = 10.0;
const AUTOMATION_IDEAL_MAX: f64 = 30.0;
const AUTOMATION_TOLERATED_MAX: f64 = 50.0;

pub const MAX_SCORE: u8 = 100;

/// Points contributed by each pillar plus the final integer score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub structure: f64,
    pub automation: f64,
    pub funneling: f64,
    pub bid_adjustments: f64,
    pub overall: u8,
}

/// Automation is banded: 10-30% auto spend is ideal, under 10% or up to 50% is tolerated,
/// anything above 50% earns nothing.
pub fn automation_points(auto_percent: f64) -> f64 {
    if (AUTOMATION_IDEAL_MIN..=AUTOMATION_IDEAL_MAX).contains(&auto_percent) {
        AUTOMATION_IDEAL_POINTS
    } else if auto_percent < AUTOMATION_IDEAL_MIN
        || (auto_percent > AUTOMATION_IDEAL_MAX && auto_percent <= AUTOMATION_TOLERATED_MAX)
    {
        AUTOMATION_TOLERATED_POINTS
    } else {
        0.0
    }
}

pub fn score_account(
    structure: &StructureAnalysis,
    automation: &AutomationAnalysis,
    funneling: &FunnelingAnalysis,
    bid_adjustments: &BidAdjustmentAnalysis,
) -> ScoreBreakdown {
    let structure_points = structure.good_structure_percent / 100.0 * STRUCTURE_POINTS;
    let automation = automation_points(automation.auto_percent);
    let funneling = funneling.campaigns_with_negatives_percent / 100.0 * FUNNELING_POINTS;
    let bid_adjustments =
        bid_adjustments.adjustment_usage_percent / 100.0 * BID_ADJUSTMENT_POINTS;

    let total = structure_points + automation + funneling + bid_adjustments;
    let overall = total.trunc().clamp(0.0, f64::from(MAX_SCORE)) as u8;

    ScoreBreakdown {
        structure: structure_points,
        automation,
        funneling,
        bid_adjustments,
        overall,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_with(good: f64, auto: f64, negatives: f64, adjustments: f64) -> ScoreBreakdown {
        let structure = StructureAnalysis {
            total_campaigns: 10,
            good_structure_percent: good,
            bad_structure_percent: 100.0 - good,
            ..StructureAnalysis::default()
        };
        let automation = AutomationAnalysis {
            auto_percent: auto,
            ..AutomationAnalysis::default()
        };
        let funneling = FunnelingAnalysis {
            total_campaigns: 10,
            campaigns_with_negatives_percent: negatives,
            avg_negatives_per_campaign: 0.0,
        };
        let bids = BidAdjustmentAnalysis {
            total_campaigns: 10,
            adjustment_usage_percent: adjustments,
        };
        score_account(&structure, &automation, &funneling, &bids)
    }

    #[test]
    fn automation_bands() {
        assert_eq!(automation_points(20.0), 20.0);
        assert_eq!(automation_points(10.0), 20.0);
        assert_eq!(automation_points(30.0), 20.0);
        assert_eq!(automation_points(35.0), 10.0);
        assert_eq!(automation_points(50.0), 10.0);
        assert_eq!(automation_points(9.99), 10.0);
        assert_eq!(automation_points(0.0), 10.0);
        assert_eq!(automation_points(60.0), 0.0);
        assert_eq!(automation_points(50.01), 0.0);
    }

    #[test]
    fn perfect_account_scores_one_hundred() {
        let score = score_with(100.0, 20.0, 100.0, 100.0);
        assert_eq!(score.overall, 100);
        assert_eq!(score.structure, 50.0);
        assert_eq!(score.funneling, 15.0);
        assert_eq!(score.bid_adjustments, 15.0);
    }

    #[test]
    fn overall_is_truncated_not_rounded() {
        // 49.95 + 10 + 7.5 + 1.5 = 68.95
        let score = score_with(99.9, 0.0, 50.0, 10.0);
        assert_eq!(score.overall, 68);
    }

    #[test]
    fn empty_account_still_earns_tolerated_automation_points() {
        let score = score_with(0.0, 0.0, 0.0, 0.0);
        assert_eq!(score.overall, 10);
    }
}
