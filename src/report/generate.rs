//! Per-site fetch and cross-site aggregation.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::{Context, Result};

use crate::date_window::DateWindow;
use crate::report::types::{CombinedSummary, SiteActivity, UsageReport, UserAccount};
use crate::run_logger::RunLogger;
use crate::site::client::SiteSession;
use crate::site::query;

/// Queries every site for active accounts and login events inside `window`,
/// then unions the per-site results into the cross-site summary. Any site
/// failure aborts the whole run; a partial union would silently understate
/// usage.
pub fn generate(
    sessions: &[SiteSession],
    window: &DateWindow,
    logger: &RunLogger,
) -> Result<UsageReport> {
    let mut sites = BTreeMap::new();
    let mut site_urls = BTreeSet::new();
    let mut all_active = BTreeSet::new();
    let mut all_logged_in = BTreeSet::new();

    for session in sessions {
        site_urls.insert(session.url.clone());

        logger.info(format!(
            "Fetching active user accounts on {}...",
            session.url
        ));
        let records = session
            .client
            .find(
                query::HUMAN_USER,
                &query::active_account_filters(),
                &query::ACCOUNT_FIELDS,
            )
            .with_context(|| format!("Active account query failed for {}", session.url))?;
        let mut active_users = Vec::with_capacity(records.len());
        for record in records {
            let account: UserAccount = serde_json::from_value(record)
                .with_context(|| format!("Malformed account record from {}", session.url))?;
            all_active.insert(account.email.clone());
            active_users.push(account);
        }
        active_users.sort_by(|a, b| a.email.cmp(&b.email).then_with(|| a.login.cmp(&b.login)));

        logger.info(format!(
            "Fetching login events on {} between {}...",
            session.url,
            window.label()
        ));
        let events = session
            .client
            .find(
                query::EVENT_LOG_ENTRY,
                &query::login_event_filters(window),
                &query::LOGIN_EVENT_FIELDS,
            )
            .with_context(|| format!("Login event query failed for {}", session.url))?;
        let mut logged_in = BTreeSet::new();
        for event in &events {
            if let Some(email) = event[query::LOGIN_EMAIL_FIELD].as_str() {
                logged_in.insert(email.to_string());
                all_logged_in.insert(email.to_string());
            }
        }

        let activity = SiteActivity {
            num_active_users: active_users.len(),
            active_users,
            num_logged_in_users: logged_in.len(),
            logged_in_users: logged_in.into_iter().collect(),
        };
        sites.insert(session.url.clone(), activity);
    }

    let combined = CombinedSummary {
        sites: site_urls.into_iter().collect(),
        date_range: window.label(),
        num_active_users: all_active.len(),
        active_users: all_active.into_iter().collect(),
        num_logged_in_users: all_logged_in.len(),
        logged_in_users: all_logged_in.into_iter().collect(),
    };

    Ok(UsageReport { sites, combined })
}

#[cfg(test)]
#[path = "tests/generate_tests.rs"]
mod tests;
