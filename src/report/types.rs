//! Report data model.
//!
//! Account records are typed down to the fields the account query projects;
//! anything else a site returns is dropped at parse time. The snapshot
//! document has two shapes, picked at generate time: the cross-site summary
//! alone, or one entry per site URL plus the summary under the reserved
//! `multi_site` key.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reserved top-level key holding the cross-site summary in verbose
/// snapshots. Site URLs can never collide with it.
pub const MULTI_SITE_KEY: &str = "multi_site";

/// Link to another entity (department, group, project, permission set) as
/// the site returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One account record as projected by the account query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub email: String,
    pub login: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<EntityRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_rule_set: Option<EntityRef>,
}

/// Activity block for one site.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SiteActivity {
    pub active_users: Vec<UserAccount>,
    pub num_active_users: usize,
    pub logged_in_users: Vec<String>,
    pub num_logged_in_users: usize,
}

/// Cross-site union summary. The account lists hold emails and are always
/// sorted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CombinedSummary {
    pub sites: Vec<String>,
    pub date_range: String,
    pub active_users: Vec<String>,
    pub num_active_users: usize,
    pub logged_in_users: Vec<String>,
    pub num_logged_in_users: usize,
}

/// Everything one run learns: per-site activity plus the cross-site summary.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageReport {
    pub sites: BTreeMap<String, SiteActivity>,
    pub combined: CombinedSummary,
}

impl UsageReport {
    /// Converts to the snapshot document. Verbose keeps every site's block
    /// beside the reserved `multi_site` summary; otherwise the summary alone
    /// is the document.
    pub fn to_value(&self, verbose: bool) -> Result<Value> {
        let combined = serde_json::to_value(&self.combined)
            .context("Failed to serialize cross-site summary")?;
        if !verbose {
            return Ok(combined);
        }
        let mut doc = serde_json::Map::new();
        for (url, activity) in &self.sites {
            let entry = serde_json::to_value(activity)
                .with_context(|| format!("Failed to serialize activity for {}", url))?;
            doc.insert(url.clone(), entry);
        }
        doc.insert(MULTI_SITE_KEY.to_string(), combined);
        Ok(Value::Object(doc))
    }

    /// Rebuilds a report from either snapshot shape. A document carrying the
    /// reserved key is a verbose snapshot; anything else is read as a bare
    /// summary.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut doc) = value else {
            anyhow::bail!("Report snapshot is not a JSON object");
        };
        match doc.remove(MULTI_SITE_KEY) {
            Some(summary) => {
                let combined: CombinedSummary = serde_json::from_value(summary)
                    .context("Malformed multi_site summary in report snapshot")?;
                let mut sites = BTreeMap::new();
                for (url, entry) in doc {
                    let activity: SiteActivity = serde_json::from_value(entry)
                        .with_context(|| format!("Malformed site entry for {}", url))?;
                    sites.insert(url, activity);
                }
                Ok(Self { sites, combined })
            }
            None => {
                let combined: CombinedSummary = serde_json::from_value(Value::Object(doc))
                    .context("Malformed report snapshot")?;
                Ok(Self {
                    sites: BTreeMap::new(),
                    combined,
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
