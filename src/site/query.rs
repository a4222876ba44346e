//! Canned query vocabulary for the site API.
//!
//! Entity type names, projected fields, and filter triples mirror the site
//! schema. Placeholder accounts (the vendor support address, the signup
//! placeholder, and the template user every site is seeded with) are
//! excluded in the queries themselves so they never reach the report.

use serde::Serialize;
use serde_json::Value;

use crate::date_window::DateWindow;

/// Entity type holding one record per user account.
pub const HUMAN_USER: &str = "HumanUser";
/// Entity type holding one record per audited site event.
pub const EVENT_LOG_ENTRY: &str = "EventLogEntry";
/// Event type recorded when an account logs in.
pub const LOGIN_EVENT_TYPE: &str = "Shotgun_User_Login";

/// Addresses that never belong to a real person.
pub const EXCLUDED_EMAILS: [&str; 2] = ["support@shotgunsoftware.com", "changeme@email.com"];
/// Login of the template account.
pub const TEMPLATE_LOGIN: &str = "shotgun_template_user";

/// Fields projected from account records into the report.
pub const ACCOUNT_FIELDS: [&str; 9] = [
    "email",
    "login",
    "name",
    "department",
    "groups",
    "projects",
    "firstname",
    "lastname",
    "permission_rule_set",
];

/// Linked-account email on a login event. The only event field the report
/// needs.
pub const LOGIN_EMAIL_FIELD: &str = "user.HumanUser.email";
pub const LOGIN_EVENT_FIELDS: [&str; 1] = [LOGIN_EMAIL_FIELD];

/// One `(field, relation, value)` condition, serialized as a JSON triple.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filter(String, String, Value);

impl Filter {
    pub fn is(field: &str, value: &str) -> Self {
        Self(field.to_string(), "is".to_string(), Value::from(value))
    }

    pub fn is_not(field: &str, value: &str) -> Self {
        Self(field.to_string(), "is_not".to_string(), Value::from(value))
    }

    pub fn not_in(field: &str, values: &[&str]) -> Self {
        Self(
            field.to_string(),
            "not_in".to_string(),
            Value::from(values.to_vec()),
        )
    }

    pub fn between(field: &str, lower: &str, upper: &str) -> Self {
        Self(
            field.to_string(),
            "between".to_string(),
            Value::from(vec![lower, upper]),
        )
    }
}

/// Filters selecting real user accounts whose status is currently active.
pub fn active_account_filters() -> Vec<Filter> {
    vec![
        Filter::is("sg_status_list", "act"),
        Filter::not_in("email", &EXCLUDED_EMAILS),
        Filter::is_not("login", TEMPLATE_LOGIN),
    ]
}

/// Filters selecting login events inside the window, excluding the same
/// placeholder accounts through their linked-account fields.
pub fn login_event_filters(window: &DateWindow) -> Vec<Filter> {
    vec![
        Filter::is("event_type", LOGIN_EVENT_TYPE),
        Filter::not_in(LOGIN_EMAIL_FIELD, &EXCLUDED_EMAILS),
        Filter::is_not("user.HumanUser.login", TEMPLATE_LOGIN),
        Filter::between(
            "created_at",
            &window.start_timestamp(),
            &window.end_timestamp(),
        ),
    ]
}

#[cfg(test)]
#[path = "tests/query_tests.rs"]
mod tests;
