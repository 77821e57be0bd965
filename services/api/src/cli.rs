use crate::report::{run_audit, run_structure_types, AuditArgs};
use crate::server;
use campaign_roaster::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Campaign Roaster",
    about = "Audit Sponsored Products bulk sheets from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Classify campaigns and score a bulk-sheet export
    Audit(AuditArgs),
    /// Print the campaign structure archetypes
    StructureTypes,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Audit(args) => run_audit(args),
        Command::StructureTypes => {
            run_structure_types();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn no_subcommand_falls_back_to_serve() {
        let cli = Cli::try_parse_from(["campaign-roaster"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn audit_flags_parse() {
        let cli = Cli::try_parse_from([
            "campaign-roaster",
            "audit",
            "--bulk-sheet",
            "bulk.xlsx",
            "--list-campaigns",
            "--export-csv",
            "out.csv",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Audit(args)) => {
                assert_eq!(args.bulk_sheet, PathBuf::from("bulk.xlsx"));
                assert!(args.list_campaigns);
                assert!(!args.json);
                assert_eq!(args.export_csv, Some(PathBuf::from("out.csv")));
            }
            other => panic!("expected audit command, got {other:?}"),
        }
    }

    #[test]
    fn bulk_csv_flag_still_names_the_sheet() {
        let cli = Cli::try_parse_from(["campaign-roaster", "audit", "--bulk-csv", "bulk.csv"])
            .expect("parses");

        match cli.command {
            Some(Command::Audit(args)) => assert_eq!(args.bulk_sheet, PathBuf::from("bulk.csv")),
            other => panic!("expected audit command, got {other:?}"),
        }
    }

    #[test]
    fn audit_requires_a_bulk_sheet() {
        assert!(Cli::try_parse_from(["campaign-roaster", "audit"]).is_err());
    }
}
