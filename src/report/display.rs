//! Human-readable summary output.

use crate::report::types::CombinedSummary;
use crate::run_logger::RunLogger;

/// Prints the cross-site summary through the logger so it reaches both the
/// terminal and the run's log file. Verbose adds the account lists behind
/// the counts.
pub fn print_summary(summary: &CombinedSummary, verbose: bool, logger: &RunLogger) {
    logger.info("\nUSAGE REPORT:\n");
    logger.info(format!(
        "Number of unique user accounts that logged in between {}: {}\n",
        summary.date_range, summary.num_logged_in_users
    ));
    logger.info(format!(
        "Total number of user accounts with \"active\" status: {}\n",
        summary.num_active_users
    ));
    logger.info(format!("Sites included:\n{}\n", summary.sites.join("\n")));
    if verbose {
        logger.info(format!(
            "Accounts that logged in between {}:\n{}\n",
            summary.date_range,
            summary.logged_in_users.join("\n")
        ));
        logger.info(format!(
            "Accounts with \"active\" status:\n{}\n",
            summary.active_users.join("\n")
        ));
    }
}
