use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tracing::{debug, error};

use crate::error::HelperError;

pub const WIKIDATA_ENDPOINT: &str = "https://query.wikidata.org/sparql";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BindingValue {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub value: String,
}

pub type Binding = BTreeMap<String, BindingValue>;

#[derive(Debug, Deserialize)]
struct AskResponse {
    boolean: bool,
}

#[derive(Debug, Deserialize)]
struct SelectResponse {
    results: SelectResults,
}

#[derive(Debug, Deserialize)]
struct SelectResults {
    bindings: Vec<Binding>,
}

pub trait SparqlClient: Send + Sync {
    fn ask(&self, query: &str) -> Result<bool, HelperError>;
    fn select(&self, query: &str) -> Result<Vec<Binding>, HelperError>;
}

#[derive(Clone)]
pub struct SparqlHttpClient {
    client: Client,
    endpoint: String,
}

impl SparqlHttpClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, HelperError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("wd-ontology/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| HelperError::SparqlHttp(err.to_string()))?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/sparql-results+json"),
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|err| HelperError::SparqlHttp(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn execute(&self, query: &str) -> Result<String, HelperError> {
        debug!(endpoint = %self.endpoint, "sending SPARQL query");
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("query", query), ("format", "json")])
            .send()
            .map_err(|err| HelperError::SparqlHttp(err.to_string()))?;
        let response = Self::handle_status(response)?;
        response
            .text()
            .map_err(|err| HelperError::SparqlHttp(err.to_string()))
    }

    fn handle_status(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, HelperError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response
            .text()
            .unwrap_or_else(|_| "SPARQL request failed".to_string());
        Err(HelperError::SparqlStatus { status, message })
    }
}

impl SparqlClient for SparqlHttpClient {
    fn ask(&self, query: &str) -> Result<bool, HelperError> {
        let body = self.execute(query)?;
        parse_ask_response(&body)
    }

    fn select(&self, query: &str) -> Result<Vec<Binding>, HelperError> {
        let body = self.execute(query)?;
        parse_select_response(&body)
    }
}

pub fn parse_ask_response(body: &str) -> Result<bool, HelperError> {
    let response: AskResponse =
        serde_json::from_str(body).map_err(|err| HelperError::SparqlParse(err.to_string()))?;
    Ok(response.boolean)
}

pub fn parse_select_response(body: &str) -> Result<Vec<Binding>, HelperError> {
    let response: SelectResponse =
        serde_json::from_str(body).map_err(|err| HelperError::SparqlParse(err.to_string()))?;
    Ok(response.results.bindings)
}

pub fn ask_or_false<C: SparqlClient + ?Sized>(client: &C, query: &str, context: &str) -> bool {
    match client.ask(query) {
        Ok(value) => value,
        Err(err) => {
            error!(error = %err, "{context}");
            false
        }
    }
}

pub fn select_or_empty<C: SparqlClient + ?Sized>(
    client: &C,
    query: &str,
    context: &str,
) -> Vec<Binding> {
    match client.select(query) {
        Ok(rows) => {
            debug!(rows = rows.len(), "{context}: received bindings");
            rows
        }
        Err(err) => {
            error!(error = %err, "{context}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl SparqlClient for Failing {
        fn ask(&self, _query: &str) -> Result<bool, HelperError> {
            Err(HelperError::SparqlHttp("connection refused".to_string()))
        }

        fn select(&self, _query: &str) -> Result<Vec<Binding>, HelperError> {
            Err(HelperError::SparqlStatus {
                status: 503,
                message: "unavailable".to_string(),
            })
        }
    }

    #[test]
    fn failures_degrade_quietly() {
        assert!(!ask_or_false(&Failing, "ASK {}", "checking"));
        assert!(select_or_empty(&Failing, "SELECT * {}", "fetching").is_empty());
    }
}
