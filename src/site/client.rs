//! HTTP access to a site's JSON API endpoint.

use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use ureq::Agent;

use crate::settings::SiteCredentials;
use crate::site::query::Filter;

/// Path of the JSON API endpoint under every site URL.
pub const API_PATH: &str = "api3/json";

/// Query seam against one site. The HTTP client implements this for real
/// sites; tests substitute canned records.
pub trait SiteClient {
    /// Returns the raw entity records matching `filters`, projected down to
    /// `fields`.
    fn find(&self, entity_type: &str, filters: &[Filter], fields: &[&str]) -> Result<Vec<Value>>;
}

/// One connected site: its URL plus the client used to query it.
pub struct SiteSession {
    pub url: String,
    pub client: Box<dyn SiteClient>,
}

impl SiteSession {
    pub fn connect(url: String, credentials: SiteCredentials) -> Self {
        let client = HttpSiteClient::connect(&url, credentials);
        Self {
            url,
            client: Box::new(client),
        }
    }
}

pub struct HttpSiteClient {
    agent: Agent,
    endpoint: String,
    script_name: String,
    script_key: String,
}

impl HttpSiteClient {
    /// Builds a client for `site_url`, taking ownership of the credentials
    /// so they live nowhere but inside the client after setup.
    pub fn connect(site_url: &str, credentials: SiteCredentials) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .build()
            .into();
        let endpoint = format!("{}/{}", site_url.trim_end_matches('/'), API_PATH);
        Self {
            agent,
            endpoint,
            script_name: credentials.script_name,
            script_key: credentials.script_key,
        }
    }
}

impl SiteClient for HttpSiteClient {
    fn find(&self, entity_type: &str, filters: &[Filter], fields: &[&str]) -> Result<Vec<Value>> {
        let request = read_request(
            &self.script_name,
            &self.script_key,
            entity_type,
            filters,
            fields,
        );
        let body = serde_json::to_string(&request).context("Failed to serialize query payload")?;
        let text: String = self
            .agent
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .send(&body)
            .with_context(|| format!("{} query against {} failed", entity_type, self.endpoint))?
            .body_mut()
            .read_to_string()
            .with_context(|| {
                format!(
                    "Failed to read {} response from {}",
                    entity_type, self.endpoint
                )
            })?;
        parse_find_response(&text).with_context(|| {
            format!(
                "{} query against {} returned an error",
                entity_type, self.endpoint
            )
        })
    }
}

/// Builds the `read` call envelope: authentication params first, then the
/// query description.
fn read_request(
    script_name: &str,
    script_key: &str,
    entity_type: &str,
    filters: &[Filter],
    fields: &[&str],
) -> Value {
    json!({
        "method_name": "read",
        "params": [
            {
                "script_name": script_name,
                "script_key": script_key,
            },
            {
                "type": entity_type,
                "filters": filters,
                "fields": fields,
            },
        ],
    })
}

/// Unpacks a `read` response to its entity records, surfacing server-side
/// exceptions as errors.
fn parse_find_response(body: &str) -> Result<Vec<Value>> {
    let parsed: Value = serde_json::from_str(body).context("Response is not valid JSON")?;
    if parsed["exception"].as_bool() == Some(true) {
        let message = parsed["message"].as_str().unwrap_or("unknown server error");
        anyhow::bail!("Server raised an exception: {}", message);
    }
    parsed["results"]["entities"]
        .as_array()
        .cloned()
        .context("Response has no results.entities array")
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
