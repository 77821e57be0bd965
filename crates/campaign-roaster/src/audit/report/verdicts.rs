use super::views::{
    AuditSummary, AuditVerdicts, OverallGrade, OverallVerdict, Pillar, PillarVerdict,
    VerdictLevel,
};

pub(crate) fn generate_verdicts(summary: &AuditSummary) -> AuditVerdicts {
    let pillars = Pillar::ordered()
        .into_iter()
        .map(|pillar| {
            let (level, headline) = grade_pillar(pillar, summary);
            PillarVerdict {
                pillar,
                pillar_label: pillar.label(),
                level,
                level_label: level.label(),
                metric: pillar_metric(pillar, summary),
                headline,
            }
        })
        .collect();

    AuditVerdicts {
        overall: overall_verdict(summary.overall_score),
        pillars,
    }
}

fn overall_verdict(score: u8) -> OverallVerdict {
    let (grade, headline) = if score >= 80 {
        (
            OverallGrade::Excellent,
            "Excellent structure! You're running a tight ship.",
        )
    } else if score >= 60 {
        (
            OverallGrade::Solid,
            "A solid foundation, but key areas need optimization.",
        )
    } else {
        (
            OverallGrade::NeedsOverhaul,
            "Your account needs a serious structural overhaul.",
        )
    };

    OverallVerdict {
        score,
        grade,
        grade_label: grade.label(),
        headline,
    }
}

fn grade_pillar(pillar: Pillar, summary: &AuditSummary) -> (VerdictLevel, &'static str) {
    match pillar {
        Pillar::Structure => {
            let bad = summary.structure.bad_structure_percent;
            if bad > 50.0 {
                (
                    VerdictLevel::Critical,
                    "Over half your campaigns have problematic structures, leaking efficiency.",
                )
            } else if bad > 20.0 {
                (
                    VerdictLevel::Warning,
                    "A decent foundation, but messy campaigns are holding you back.",
                )
            } else {
                (
                    VerdictLevel::Success,
                    "Excellent discipline! This organization gives you maximum control.",
                )
            }
        }
        Pillar::Automation => {
            let auto = summary.automation.auto_percent;
            let has_spend = summary.automation.total_spend > 0.0;
            if auto > 40.0 {
                (
                    VerdictLevel::Critical,
                    "Auto targeting controls your budget. Use Auto for discovery, not for burning cash.",
                )
            } else if auto > 30.0 || (auto < 10.0 && has_spend) {
                (
                    VerdictLevel::Warning,
                    "Your Auto spend is outside the ideal 10-30% range.",
                )
            } else {
                (
                    VerdictLevel::Success,
                    "Smart balance! Automation is a tool here, not a crutch.",
                )
            }
        }
        Pillar::Funneling => {
            let covered = summary.funneling.campaigns_with_negatives_percent;
            if covered < 50.0 {
                (
                    VerdictLevel::Critical,
                    "You are bleeding money on irrelevant searches. Add negatives to your Auto/Broad campaigns.",
                )
            } else if covered < 80.0 {
                (
                    VerdictLevel::Warning,
                    "Inconsistent negative hygiene means your campaigns are wasting spend.",
                )
            } else {
                (
                    VerdictLevel::Success,
                    "Excellent funneling discipline! You know what NOT to target.",
                )
            }
        }
        Pillar::BidAdjustments => {
            let usage = summary.bid_adjustments.adjustment_usage_percent;
            if usage < 20.0 {
                (
                    VerdictLevel::Critical,
                    "A flat bid is a rookie move. Analyze placement reports and start adjusting bids.",
                )
            } else if usage < 60.0 {
                (
                    VerdictLevel::Warning,
                    "You're starting to optimize, but you could be more aggressive.",
                )
            } else {
                (
                    VerdictLevel::Success,
                    "Excellent! Granular bid control separates the pros from the amateurs.",
                )
            }
        }
    }
}

fn pillar_metric(pillar: Pillar, summary: &AuditSummary) -> String {
    match pillar {
        Pillar::Structure => format!(
            "{:.1}% good structures ({:.1}% bad)",
            summary.structure.good_structure_percent, summary.structure.bad_structure_percent
        ),
        Pillar::Automation => format!(
            "{:.1}% auto-targeting spend ({:.2} of {:.2})",
            summary.automation.auto_percent,
            summary.automation.auto_spend,
            summary.automation.total_spend
        ),
        Pillar::Funneling => format!(
            "{:.1}% of campaigns with negatives (avg {:.1} per campaign)",
            summary.funneling.campaigns_with_negatives_percent,
            summary.funneling.avg_negatives_per_campaign
        ),
        Pillar::BidAdjustments => format!(
            "{:.1}% of campaigns using adjustments",
            summary.bid_adjustments.adjustment_usage_percent
        ),
    }
}
