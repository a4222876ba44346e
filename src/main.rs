//! Queries each configured project-tracking site for user-account activity
//! and writes a cross-site usage report.

mod date_window;
mod report;
mod run_logger;
mod settings;
mod site;

use std::path::Path;

use anyhow::Result;
use clap::Parser;

use date_window::DateWindow;
use report::display::print_summary;
use report::generate::generate;
use report::snapshot::{read_report, write_report, REPORT_FILENAME};
use run_logger::{RunLogger, LOGS_DIR};
use settings::{Settings, SETTINGS_FILENAME};
use site::client::SiteSession;

#[derive(Parser)]
#[command(name = "usage-report")]
#[command(about = "Reports user-account activity across the sites in settings.yml")]
#[command(version)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Query every configured site and write a fresh report.json
    #[arg(short, long)]
    generate: bool,

    /// Start of the reporting window, YYYY-MM-DD
    #[arg(short, long)]
    start_date: Option<String>,

    /// End of the reporting window, YYYY-MM-DD (requires a start date)
    #[arg(short, long)]
    end_date: Option<String>,

    /// Print the summary from the existing report.json without querying
    #[arg(short, long)]
    display: bool,

    /// Keep per-site detail in report.json and list accounts in the summary
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let logger = match RunLogger::create(Path::new(LOGS_DIR)) {
        Ok(logger) => logger,
        Err(error) => {
            eprintln!("Failed to set up run logging: {:#}", error);
            return;
        }
    };
    if let Err(error) = run(&cli, &logger) {
        logger.error(format!("{:#}", error));
    }
}

fn run(cli: &Cli, logger: &RunLogger) -> Result<()> {
    let wants_generate = cli.generate || cli.start_date.is_some() || cli.end_date.is_some();
    if !wants_generate && !cli.display {
        logger.info("No generate, start_date, or display args specified, exiting.");
        return Ok(());
    }

    let report_path = Path::new(REPORT_FILENAME);
    if wants_generate {
        logger.info(format!("Reading {}...", SETTINGS_FILENAME));
        let settings = Settings::load(Path::new(SETTINGS_FILENAME))?;

        let today = chrono::Utc::now().date_naive();
        if cli.start_date.is_some() && cli.end_date.is_none() {
            logger.warn(format!(
                "No end date specified, using today ({}).",
                today.format("%Y-%m-%d")
            ));
        }
        let window =
            DateWindow::resolve(cli.start_date.as_deref(), cli.end_date.as_deref(), today)?;

        let mut sessions = Vec::new();
        for (url, credentials) in settings.into_sites() {
            logger.info(format!("Connecting to {}...", url));
            sessions.push(SiteSession::connect(url, credentials));
        }

        let report = generate(&sessions, &window, logger)?;
        logger.info(format!("Writing {}...", REPORT_FILENAME));
        write_report(report_path, &report, cli.verbose)?;
        print_summary(&report.combined, cli.verbose, logger);
    }

    if cli.display && !wants_generate {
        let report = read_report(report_path)?;
        print_summary(&report.combined, cli.verbose, logger);
    }

    Ok(())
}
