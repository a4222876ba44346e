use super::*;

use std::collections::BTreeMap;

use serde_json::Value;
use tempfile::TempDir;

use crate::report::types::{CombinedSummary, SiteActivity, UserAccount, MULTI_SITE_KEY};

fn sample_report() -> UsageReport {
    let account = UserAccount {
        email: "amy@studio.example.com".to_string(),
        login: "amy".to_string(),
        name: Some("Amy Artist".to_string()),
        firstname: None,
        lastname: None,
        department: None,
        groups: Vec::new(),
        projects: Vec::new(),
        permission_rule_set: None,
    };
    let mut sites = BTreeMap::new();
    sites.insert(
        "https://one.example.com".to_string(),
        SiteActivity {
            active_users: vec![account],
            num_active_users: 1,
            logged_in_users: vec!["amy@studio.example.com".to_string()],
            num_logged_in_users: 1,
        },
    );
    UsageReport {
        sites,
        combined: CombinedSummary {
            sites: vec!["https://one.example.com".to_string()],
            date_range: "2017-05-01 and 2017-05-31".to_string(),
            active_users: vec!["amy@studio.example.com".to_string()],
            num_active_users: 1,
            logged_in_users: vec!["amy@studio.example.com".to_string()],
            num_logged_in_users: 1,
        },
    }
}

#[test]
fn verbose_snapshot_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(REPORT_FILENAME);
    let report = sample_report();
    write_report(&path, &report, true).unwrap();
    let restored = read_report(&path).unwrap();
    assert_eq!(restored, report);
}

#[test]
fn summary_snapshot_drops_site_detail() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(REPORT_FILENAME);
    let report = sample_report();
    write_report(&path, &report, false).unwrap();
    let restored = read_report(&path).unwrap();
    assert!(restored.sites.is_empty());
    assert_eq!(restored.combined, report.combined);
}

#[test]
fn snapshot_bytes_are_stable_across_round_trips() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");
    let report = sample_report();
    write_report(&first, &report, true).unwrap();
    let restored = read_report(&first).unwrap();
    write_report(&second, &restored, true).unwrap();
    assert_eq!(
        fs::read_to_string(&first).unwrap(),
        fs::read_to_string(&second).unwrap()
    );
}

#[test]
fn snapshot_uses_sorted_keys_and_four_space_indent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(REPORT_FILENAME);
    let report = UsageReport {
        sites: BTreeMap::new(),
        combined: CombinedSummary {
            sites: vec!["https://one.example.com".to_string()],
            date_range: "2017-05-01 and 2017-05-31".to_string(),
            active_users: Vec::new(),
            num_active_users: 0,
            logged_in_users: Vec::new(),
            num_logged_in_users: 0,
        },
    };
    write_report(&path, &report, false).unwrap();
    let written = fs::read_to_string(&path).unwrap();
    let expected = concat!(
        "{\n",
        "    \"active_users\": [],\n",
        "    \"date_range\": \"2017-05-01 and 2017-05-31\",\n",
        "    \"logged_in_users\": [],\n",
        "    \"num_active_users\": 0,\n",
        "    \"num_logged_in_users\": 0,\n",
        "    \"sites\": [\n",
        "        \"https://one.example.com\"\n",
        "    ]\n",
        "}\n",
    );
    assert_eq!(written, expected);
}

#[test]
fn verbose_snapshot_carries_the_reserved_key() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(REPORT_FILENAME);
    write_report(&path, &sample_report(), true).unwrap();
    let doc: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(doc.get(MULTI_SITE_KEY).is_some());
    assert!(doc.get("https://one.example.com").is_some());
}

#[test]
fn missing_snapshot_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = read_report(&dir.path().join(REPORT_FILENAME)).unwrap_err();
    assert!(err.to_string().contains("Did not find report snapshot"));
}

#[test]
fn unparseable_snapshot_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(REPORT_FILENAME);
    fs::write(&path, "{not json").unwrap();
    let err = read_report(&path).unwrap_err();
    assert!(err.to_string().contains("Could not parse report snapshot"));
}

#[test]
fn non_object_snapshot_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(REPORT_FILENAME);
    fs::write(&path, "[]").unwrap();
    let err = read_report(&path).unwrap_err();
    assert!(err.to_string().contains("not a JSON object"));
}
