//! Webhook client — the single HTTP call that drives the conversation.
//!
//! The endpoint has historically answered in two shapes: a plain object
//! `{output, report?, agents?, example_answers?}` and an array of tagged
//! fragments `[{output}, {agents}]`. Both are accepted on the wire and
//! normalized into one [`WebhookReply`] immediately after decoding.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::WebhookError;
use crate::report::{AgentRanking, ReportData};

/// Request body sent to the webhook on every user submission.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookRequest {
    /// The user's answer (or free-form question).
    #[serde(rename = "userInput")]
    pub user_input: String,
    /// Stable id for the whole conversation.
    #[serde(rename = "sessionId")]
    pub session_id: Uuid,
    /// The question being answered — the last bot message.
    pub question: String,
}

/// Normalized webhook reply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WebhookReply {
    /// Bot text: the next question, or the report body once `report` is set.
    pub output: String,
    /// Whether `output` is the final report rather than another question.
    pub report: bool,
    /// Ranked agents accompanying a report.
    pub agents: Vec<AgentRanking>,
    /// Suggested answers the user can pick instead of typing.
    pub example_answers: Vec<String>,
}

impl WebhookReply {
    /// Extract report data, if this reply qualifies as one.
    ///
    /// A reply carries a report only when it signals `report` AND the agents
    /// list is non-empty; a bare flag with no rankings is not a report.
    pub fn report_data(&self) -> Option<ReportData> {
        if self.report && !self.agents.is_empty() && !self.output.is_empty() {
            Some(ReportData {
                output: self.output.clone(),
                agents: self.agents.clone(),
            })
        } else {
            None
        }
    }
}

// ── Wire shapes ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawReply {
    Fragments(Vec<Fragment>),
    Object(ObjectReply),
}

#[derive(Debug, Default, Deserialize)]
struct ObjectReply {
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    report: Option<bool>,
    #[serde(default)]
    agents: Option<Vec<AgentRanking>>,
    #[serde(default)]
    example_answers: Option<Vec<String>>,
}

/// One element of the array reply shape. Each element carries either the
/// report text or the agent rankings.
#[derive(Debug, Default, Deserialize)]
struct Fragment {
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    agents: Option<Vec<AgentRanking>>,
}

impl From<RawReply> for WebhookReply {
    fn from(raw: RawReply) -> Self {
        match raw {
            RawReply::Object(obj) => WebhookReply {
                output: obj.output.unwrap_or_default(),
                report: obj.report.unwrap_or(false),
                agents: obj.agents.unwrap_or_default(),
                example_answers: obj.example_answers.unwrap_or_default(),
            },
            RawReply::Fragments(fragments) => {
                let output = fragments
                    .iter()
                    .find_map(|f| f.output.clone())
                    .unwrap_or_default();
                let agents: Vec<AgentRanking> = fragments
                    .into_iter()
                    .find_map(|f| f.agents)
                    .unwrap_or_default();
                // The array shape is only ever used for the final report.
                let report = !output.is_empty() && !agents.is_empty();
                WebhookReply {
                    output,
                    report,
                    agents,
                    example_answers: Vec::new(),
                }
            }
        }
    }
}

/// Decode a raw JSON reply body into the normalized form.
pub fn decode_reply(body: &str) -> Result<WebhookReply, WebhookError> {
    let raw: RawReply = serde_json::from_str(body)?;
    Ok(raw.into())
}

// ── Client ──────────────────────────────────────────────────────────

/// Seam for the webhook call, so the session can be driven by a mock in tests.
#[async_trait]
pub trait WebhookClient: Send + Sync {
    async fn send(&self, request: &WebhookRequest) -> Result<WebhookReply, WebhookError>;
}

/// Production webhook client — a single POST per submission.
///
/// No retry, no backoff, no client-side timeout: a send cannot be aborted
/// once issued, and the session layer maps any failure to the fallback
/// message.
pub struct HttpWebhookClient {
    url: String,
    client: reqwest::Client,
}

impl HttpWebhookClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl WebhookClient for HttpWebhookClient {
    async fn send(&self, request: &WebhookRequest) -> Result<WebhookReply, WebhookError> {
        tracing::debug!(session_id = %request.session_id, "Sending webhook request");

        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| WebhookError::RequestFailed {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "Webhook returned non-success status");
            return Err(WebhookError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| WebhookError::InvalidResponse {
                reason: e.to_string(),
            })?;
        decode_reply(&body)
    }
}
