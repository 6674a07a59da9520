//! HTTP client for the Anteater catalog API.
//!
//! One GET per search against the websoc endpoint; the response tree is
//! flattened into raw sessions on the way out. Anything other than the
//! agreed `{ ok: true, data: { schools: [...] } }` envelope is a structural
//! error, not a data-quality problem.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use super::{flatten_schools, RawSession, SchoolsEnvelope, Term};
use crate::error::CatalogError;

/// Production base URL for the catalog API.
const ANTEATER_BASE_URL: &str = "https://anteaterapi.com/v2/rest";

/// Configuration for the catalog client.
#[derive(Debug, Clone)]
pub struct CatalogClientConfig {
    /// Base URL, without the trailing `/websoc`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Connect timeout.
    pub connect_timeout: Duration,
}

impl Default for CatalogClientConfig {
    fn default() -> Self {
        Self {
            base_url: ANTEATER_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Optional search filters forwarded to the websoc endpoint. Empty fields
/// are omitted from the query string.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub department: Option<String>,
    pub ge: Option<String>,
    pub instructor_name: Option<String>,
    pub course_number: Option<String>,
    pub course_title: Option<String>,
    pub section_codes: Option<String>,
    pub days: Option<String>,
    pub building: Option<String>,
    pub room: Option<String>,
    pub division: Option<String>,
    pub section_type: Option<String>,
}

impl SearchOptions {
    fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let fields = [
            ("department", &self.department),
            ("ge", &self.ge),
            ("instructorName", &self.instructor_name),
            ("courseNumber", &self.course_number),
            ("courseTitle", &self.course_title),
            ("sectionCodes", &self.section_codes),
            ("days", &self.days),
            ("building", &self.building),
            ("room", &self.room),
            ("division", &self.division),
            ("sectionType", &self.section_type),
        ];
        fields
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .map(|v| (key, v))
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    ok: bool,
    data: Option<Value>,
}

/// Client for fetching raw class sessions from the catalog API.
pub struct CatalogClient {
    client: reqwest::Client,
    config: CatalogClientConfig,
}

impl CatalogClient {
    /// Creates a client with default configuration.
    pub fn new() -> Result<Self, CatalogError> {
        Self::with_config(CatalogClientConfig::default())
    }

    /// Creates a client with custom configuration.
    pub fn with_config(config: CatalogClientConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// Fetches all class sessions matching the term and filters, flattened
    /// to one raw session per section meeting.
    pub async fn fetch_sessions(
        &self,
        term: Term,
        options: &SearchOptions,
    ) -> Result<Vec<RawSession>, CatalogError> {
        let url = format!("{}/websoc", self.config.base_url);
        let year = term.year.to_string();
        let mut params: Vec<(&str, &str)> =
            vec![("year", &year), ("quarter", term.quarter.as_str())];
        params.extend(options.query_pairs());

        info!(%term, ?options, "fetching catalog sessions");
        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;

        let body: ApiResponse = response.json().await?;
        if !body.ok {
            return Err(CatalogError::UnexpectedShape(
                "response envelope has ok != true".to_string(),
            ));
        }
        let data = body.data.ok_or_else(|| {
            CatalogError::UnexpectedShape("response envelope is missing 'data'".to_string())
        })?;
        let envelope: SchoolsEnvelope = serde_json::from_value(data).map_err(|e| {
            CatalogError::UnexpectedShape(format!("'data' is not a schools tree: {e}"))
        })?;

        let sessions = flatten_schools(envelope, &term.to_string());
        debug!(count = sessions.len(), "flattened catalog sessions");
        Ok(sessions)
    }

    /// Fetches the department codes offered since the given term.
    pub async fn fetch_departments(&self, since: Term) -> Result<Vec<String>, CatalogError> {
        let url = format!("{}/websoc/departments", self.config.base_url);
        let year = since.year.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[("sinceYear", year.as_str()), ("sinceQuarter", since.quarter.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let body: ApiResponse = response.json().await?;
        match body.data {
            Some(Value::Array(items)) if body.ok => Ok(items
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    Value::Object(mut o) => o
                        .remove("deptCode")
                        .and_then(|d| d.as_str().map(str::to_string)),
                    _ => None,
                })
                .collect()),
            _ => Err(CatalogError::UnexpectedShape(
                "departments response is not an ok list".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: String) -> CatalogClient {
        CatalogClient::with_config(CatalogClientConfig {
            base_url,
            ..CatalogClientConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn fetch_sessions_flattens_the_tree() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/websoc")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("year".into(), "2025".into()),
                mockito::Matcher::UrlEncoded("quarter".into(), "Fall".into()),
                mockito::Matcher::UrlEncoded("department".into(), "I&C SCI".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "ok": true,
                    "data": {
                        "schools": [{
                            "departments": [{
                                "deptCode": "I&C SCI",
                                "deptName": "Information and Computer Science",
                                "courses": [{
                                    "courseNumber": "46",
                                    "courseTitle": "Data Structures",
                                    "sections": [{
                                        "sectionCode": "35200",
                                        "sectionType": "Lec",
                                        "sectionNum": "A",
                                        "meetings": [
                                            {"days": "MWF", "time": "10:00-10:50", "bldg": "HIB 100"}
                                        ]
                                    }]
                                }]
                            }]
                        }]
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = test_client(server.url());
        let options = SearchOptions {
            department: Some("I&C SCI".to_string()),
            ..SearchOptions::default()
        };
        let sessions = client
            .fetch_sessions("2025 Fall".parse().unwrap(), &options)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].course_code.as_deref(), Some("I&C SCI 46"));
        assert_eq!(sessions[0].location.as_deref(), Some("HIB 100"));
        assert_eq!(sessions[0].term.as_deref(), Some("2025 Fall"));
    }

    #[tokio::test]
    async fn fetch_departments_lists_codes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/websoc/departments")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("sinceYear".into(), "2024".into()),
                mockito::Matcher::UrlEncoded("sinceQuarter".into(), "Fall".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                // Both item shapes the endpoint has been seen to return.
                r#"{"ok": true, "data": ["COMPSCI", {"deptCode": "I&C SCI"}, 7]}"#,
            )
            .create_async()
            .await;

        let client = test_client(server.url());
        let depts = client
            .fetch_departments("2024 Fall".parse().unwrap())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(depts, ["COMPSCI", "I&C SCI"]);
    }

    #[tokio::test]
    async fn bad_envelope_is_a_structural_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/websoc")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": false}"#)
            .create_async()
            .await;

        let client = test_client(server.url());
        let err = client
            .fetch_sessions("2025 Fall".parse().unwrap(), &SearchOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnexpectedShape(_)));
    }
}
