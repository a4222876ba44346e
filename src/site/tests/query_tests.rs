use super::*;

use chrono::NaiveDate;
use serde_json::json;

fn may_2017() -> DateWindow {
    let today = NaiveDate::from_ymd_opt(2017, 6, 30).unwrap();
    DateWindow::resolve(Some("2017-05-01"), Some("2017-05-31"), today).unwrap()
}

#[test]
fn filters_serialize_as_triples() {
    let filter = Filter::is("sg_status_list", "act");
    assert_eq!(
        serde_json::to_value(&filter).unwrap(),
        json!(["sg_status_list", "is", "act"])
    );
}

#[test]
fn account_filters_keep_active_real_accounts_only() {
    let filters = serde_json::to_value(active_account_filters()).unwrap();
    assert_eq!(
        filters,
        json!([
            ["sg_status_list", "is", "act"],
            [
                "email",
                "not_in",
                ["support@shotgunsoftware.com", "changeme@email.com"]
            ],
            ["login", "is_not", "shotgun_template_user"],
        ])
    );
}

#[test]
fn login_event_filters_bound_the_window_and_exclude_placeholders() {
    let filters = serde_json::to_value(login_event_filters(&may_2017())).unwrap();
    assert_eq!(
        filters,
        json!([
            ["event_type", "is", "Shotgun_User_Login"],
            [
                "user.HumanUser.email",
                "not_in",
                ["support@shotgunsoftware.com", "changeme@email.com"]
            ],
            ["user.HumanUser.login", "is_not", "shotgun_template_user"],
            [
                "created_at",
                "between",
                ["2017-05-01T00:00:00Z", "2017-05-31T00:00:00Z"]
            ],
        ])
    );
}
