use campaign_roaster::audit::report::{
    write_breakdown_csv, AuditSummary, AuditVerdicts, CampaignBreakdownRow,
    StructureTypeDefinitionView,
};
use campaign_roaster::audit::{AccountAudit, StructureType};
use campaign_roaster::bulksheet::BulkSheetImporter;
use campaign_roaster::config::AppConfig;
use campaign_roaster::error::AppError;
use campaign_roaster::telemetry;
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AuditArgs {
    /// Sponsored Products bulk-sheet export: CSV, or a bulk-download workbook (.xlsx)
    #[arg(long, alias = "bulk-csv")]
    pub(crate) bulk_sheet: PathBuf,
    /// Print the full report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
    /// Include the per-campaign breakdown in the output
    #[arg(long)]
    pub(crate) list_campaigns: bool,
    /// Write the per-campaign breakdown to a CSV file
    #[arg(long)]
    pub(crate) export_csv: Option<PathBuf>,
}

/// Report shared by the HTTP endpoint and the `--json` CLI output.
#[derive(Debug, Serialize)]
pub(crate) struct AuditReport {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) summary: AuditSummary,
    pub(crate) verdicts: AuditVerdicts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) campaigns: Option<Vec<CampaignBreakdownRow>>,
}

impl AuditReport {
    pub(crate) fn from_audit(audit: &AccountAudit, include_campaigns: bool) -> Self {
        Self {
            generated_at: Utc::now(),
            summary: audit.summary(),
            verdicts: audit.verdicts(),
            campaigns: include_campaigns.then(|| audit.breakdown()),
        }
    }
}

pub(crate) fn run_audit(args: AuditArgs) -> Result<(), AppError> {
    let AuditArgs {
        bulk_sheet,
        json,
        list_campaigns,
        export_csv,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let table = BulkSheetImporter::open(&bulk_sheet)?;
    let audit = AccountAudit::run(&table);

    if let Some(path) = export_csv.as_ref() {
        let file = std::fs::File::create(path)?;
        write_breakdown_csv(&audit.breakdown(), file)?;
    }

    let report = AuditReport::from_audit(&audit, list_campaigns);
    if json {
        let rendered = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        render_audit_report(&bulk_sheet, &report);
    }

    if let Some(path) = export_csv {
        println!("\nCampaign breakdown written to {}", path.display());
    }

    Ok(())
}

pub(crate) fn run_structure_types() {
    println!("Campaign structure types");
    for definition in StructureTypeDefinitionView::all() {
        let marker = if definition.counts_as_good {
            " (counts as good)"
        } else {
            ""
        };
        println!("\n{}: {}{}", definition.code, definition.title, marker);
        println!("  When: {}", definition.conditions);
        println!("  Verdict: {}", definition.verdict);
    }
}

fn render_audit_report(source: &std::path::Path, report: &AuditReport) {
    let summary = &report.summary;
    let verdicts = &report.verdicts;

    println!("Sponsored Products account audit");
    println!("Source: {}", source.display());
    println!(
        "Campaigns analyzed: {}",
        summary.structure.total_campaigns
    );

    println!(
        "\nOverall score: {}/100 ({})",
        verdicts.overall.score, verdicts.overall.grade_label
    );
    println!("{}", verdicts.overall.headline);

    let points = &summary.score_breakdown;
    println!(
        "Points: structure {:.1}/50 | automation {:.0}/20 | funneling {:.1}/15 | bid adjustments {:.1}/15",
        points.structure, points.automation, points.funneling, points.bid_adjustments
    );

    println!("\nPillars");
    for verdict in &verdicts.pillars {
        println!(
            "- [{}] {} ({}): {}",
            verdict.level_label, verdict.pillar_label, verdict.metric, verdict.headline
        );
    }

    println!(
        "\nAutomation spend: {:.2} auto / {:.2} manual of {:.2} total",
        summary.automation.auto_spend,
        summary.automation.manual_spend,
        summary.automation.total_spend
    );
    println!(
        "Negatives: {:.1} per campaign on average",
        summary.funneling.avg_negatives_per_campaign
    );

    let distribution = distribution_lines(summary);
    if distribution.is_empty() {
        println!("\nStructure types: none");
    } else {
        println!("\nStructure types");
        for line in distribution {
            println!("- {line}");
        }
    }

    if let Some(campaigns) = &report.campaigns {
        if campaigns.is_empty() {
            println!("\nCampaigns: none");
        } else {
            println!("\nCampaigns");
            for row in campaigns {
                println!(
                    "- {} [{}] type {} | spend {:.2} | sales {:.2} | ACOS {:.1}% | ROAS {:.2}",
                    row.campaign_name.as_deref().unwrap_or("(unnamed)"),
                    row.campaign_id,
                    row.structure_type,
                    row.spend,
                    row.sales,
                    row.acos * 100.0,
                    row.roas
                );
            }
        }
    }
}

fn distribution_lines(summary: &AuditSummary) -> Vec<String> {
    StructureType::ordered()
        .into_iter()
        .filter_map(|structure_type| {
            summary
                .structure
                .type_distribution
                .get(&structure_type)
                .map(|count| format!("{}: {} ({})", structure_type, count, structure_type.title()))
        })
        .collect()
}
