mod breakdown;
mod verdicts;
pub mod views;

pub use breakdown::{write_breakdown_csv, BreakdownExportError};
pub use views::{
    AuditSummary, AuditVerdicts, CampaignBreakdownRow, OverallGrade, OverallVerdict, Pillar,
    PillarVerdict, StructureTypeDefinitionView, VerdictLevel,
};

pub(crate) use breakdown::build_breakdown;
pub(crate) use verdicts::generate_verdicts;
