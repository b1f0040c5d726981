//! Jira REST client backing the `IssueTrackerService` seam.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client, Method, Response,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::Deserialize;
use serde_json::json;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::domain::ticket::RemoteTicket;
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

const JIRA_HTTP_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ATTEMPTS: u32 = 5;
const RETRY_STATUS_CODES: [u16; 4] = [429, 500, 503, 504];

pub struct JiraClient {
    http: Client,
    base_url: String,
    token: String,
    dry_run: bool,
}

impl JiraClient {
    pub fn new(base_url: String, token: String, dry_run: bool) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(JIRA_HTTP_TIMEOUT)
            .build()
            .map_err(|err| {
                AppError::Configuration(format!("failed to build HTTP client: {err}"))
            })?;

        Ok(Self {
            http,
            base_url,
            token,
            dry_run,
        })
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/rest/api/2/{endpoint}",
            self.base_url.trim_end_matches('/')
        )
    }

    fn backoff_delay(attempt: u32) -> Duration {
        Duration::from_millis((500 * 2u64.pow(attempt - 1)).min(5_000))
    }

    /// Sends one request, retrying transport failures and transient status
    /// codes with capped exponential backoff. Non-2xx responses surface as
    /// `AppError::Service` carrying the endpoint, status, and body.
    async fn call_api(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&serde_json::Value>,
    ) -> AppResult<Response> {
        let url = self.api_url(endpoint);
        let mut attempt = 0;

        loop {
            attempt += 1;
            let mut request = self
                .http
                .request(method.clone(), &url)
                .header(AUTHORIZATION, format!("Bearer {}", self.token))
                .header(ACCEPT, "application/json")
                .header(CONTENT_TYPE, "application/json");
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = match request.send().await {
                Ok(response) => response,
                Err(err) => {
                    if attempt < MAX_ATTEMPTS {
                        warn!(
                            "Request to {url} failed: {err}, retrying (attempt \
                             {attempt}/{MAX_ATTEMPTS})"
                        );
                        sleep(Self::backoff_delay(attempt)).await;
                        continue;
                    }
                    return Err(AppError::Transport {
                        endpoint: url,
                        reason: err.to_string(),
                    });
                }
            };

            let status = response.status();
            if RETRY_STATUS_CODES.contains(&status.as_u16()) && attempt < MAX_ATTEMPTS {
                warn!(
                    "JIRA returned {status} for {url}, retrying (attempt \
                     {attempt}/{MAX_ATTEMPTS})"
                );
                sleep(Self::backoff_delay(attempt)).await;
                continue;
            }

            if !status.is_success() {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<unable to read response>".to_string());
                return Err(AppError::Service {
                    endpoint: url,
                    status: status.as_u16(),
                    body,
                });
            }

            return Ok(response);
        }
    }
}

#[async_trait]
impl IssueTrackerService for JiraClient {
    async fn fetch_ticket(&self, key: &str) -> AppResult<RemoteTicket> {
        let endpoint = format!("issue/{key}");
        let response = self.call_api(Method::GET, &endpoint, None).await?;

        let payload: JiraIssueResponse = response.json().await.map_err(|err| AppError::Decode {
            endpoint: self.api_url(&endpoint),
            reason: err.to_string(),
        })?;

        Ok(RemoteTicket {
            status: payload.fields.status.name,
            labels: payload.fields.labels.unwrap_or_default(),
        })
    }

    async fn update_labels(&self, key: &str, remove: &str, add: &str) -> AppResult<()> {
        if self.dry_run {
            info!(
                "Running in dry run mode label change would have been applied for \
                 {key}: - {remove} + {add}"
            );
            return Ok(());
        }

        let mut labels = Vec::new();
        if !remove.is_empty() {
            labels.push(json!({ "remove": remove }));
        }
        if !add.is_empty() {
            labels.push(json!({ "add": add }));
        }
        let payload = json!({ "update": { "labels": labels } });

        self.call_api(Method::PUT, &format!("issue/{key}"), Some(&payload))
            .await?;
        info!("Label change applied for {key}: - {remove} + {add}");
        Ok(())
    }

    async fn add_comment(&self, key: &str, body: &str) -> AppResult<()> {
        if self.dry_run {
            info!("Running in dry run mode comment would have been added for {key}: {body}");
            return Ok(());
        }

        let payload = json!({ "body": body });

        self.call_api(Method::POST, &format!("issue/{key}/comment"), Some(&payload))
            .await?;
        info!("Comment added for {key}: {body}");
        Ok(())
    }
}

// Jira issue responses are decoded leniently: absent status or labels fall
// back to an empty status and no labels rather than failing the run.
#[derive(Deserialize, Default)]
#[serde(default)]
struct JiraIssueResponse {
    fields: JiraIssueFields,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct JiraIssueFields {
    status: JiraIssueStatus,
    labels: Option<Vec<String>>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct JiraIssueStatus {
    name: String,
}
