//! Chat session — conversation state and the send/reply transitions.
//!
//! The session is an explicit application-state struct: transcript, session
//! id, current suggestions, and the report (once one arrives). Every user
//! submission flows through [`ChatSession::submit`], which performs exactly
//! one webhook call and appends at most one bot message.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::DiscoveryConfig;
use crate::report::ReportData;
use crate::webhook::{WebhookClient, WebhookRequest};

/// Who authored a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// One transcript entry. Lives only in memory for the session's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
        }
    }
}

/// What a submission did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Nothing changed (empty input, or an empty reply).
    Ignored,
    /// A bot message was appended to the transcript.
    BotReply,
    /// A report arrived and the report affordance is now available.
    ReportReady,
}

/// Conversation state plus the webhook that drives it.
pub struct ChatSession {
    session_id: Uuid,
    transcript: Vec<Message>,
    example_answers: Vec<String>,
    report: Option<ReportData>,
    awaiting_reply: bool,
    config: DiscoveryConfig,
    webhook: Arc<dyn WebhookClient>,
}

impl ChatSession {
    /// Start a session: fresh id, greeting seeded as the first bot message.
    pub fn new(config: DiscoveryConfig, webhook: Arc<dyn WebhookClient>) -> Self {
        let transcript = vec![Message::bot(config.greeting.clone())];
        Self {
            session_id: Uuid::new_v4(),
            transcript,
            example_answers: Vec::new(),
            report: None,
            awaiting_reply: false,
            config,
            webhook,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Suggested answers for the current question, if the webhook offered any.
    pub fn example_answers(&self) -> &[String] {
        &self.example_answers
    }

    pub fn report(&self) -> Option<&ReportData> {
        self.report.as_ref()
    }

    /// Whether a webhook call is in flight (input is disabled during the wait).
    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    /// The question the user is currently answering: the last bot message.
    pub fn last_question(&self) -> String {
        self.transcript
            .iter()
            .rev()
            .find(|m| m.sender == Sender::Bot)
            .map(|m| m.text.clone())
            .unwrap_or_default()
    }

    /// Submit user input: append one user message, call the webhook, and
    /// apply the reply.
    ///
    /// Empty or whitespace-only input changes nothing. A webhook failure is
    /// surfaced as the fallback bot message rather than an error — the
    /// conversation stays usable.
    pub async fn submit(&mut self, input: &str) -> SessionEvent {
        let input = input.trim();
        if input.is_empty() {
            return SessionEvent::Ignored;
        }

        let question = self.last_question();
        self.transcript.push(Message::user(input));
        self.example_answers.clear();
        self.awaiting_reply = true;

        let request = WebhookRequest {
            user_input: input.to_string(),
            session_id: self.session_id,
            question,
        };
        let result = self.webhook.send(&request).await;
        self.awaiting_reply = false;

        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "Webhook call failed");
                self.transcript
                    .push(Message::bot(self.config.fallback_message.clone()));
                return SessionEvent::BotReply;
            }
        };

        if let Some(report) = reply.report_data() {
            self.report = Some(report);
            self.transcript
                .push(Message::bot(self.config.report_ready_message.clone()));
            return SessionEvent::ReportReady;
        }

        if reply.output.is_empty() {
            // Nothing displayable came back (e.g. a report-shaped reply with
            // no rankings). Leave the transcript as-is.
            return SessionEvent::Ignored;
        }

        self.transcript.push(Message::bot(reply.output));
        self.example_answers = reply.example_answers;
        SessionEvent::BotReply
    }

    /// Submit one of the current suggestions as if the user had typed it.
    /// Indices are 0-based; an out-of-range index changes nothing.
    pub async fn choose_suggestion(&mut self, index: usize) -> SessionEvent {
        let Some(answer) = self.example_answers.get(index).cloned() else {
            return SessionEvent::Ignored;
        };
        self.submit(&answer).await
    }

    /// Close the report view: the report is cleared and the affordance
    /// disappears until a new qualifying reply arrives.
    pub fn close_report(&mut self) {
        self.report = None;
    }
}
