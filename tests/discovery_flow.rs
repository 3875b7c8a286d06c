//! Integration tests for the discovery conversation end-to-end.
//!
//! Each test drives a real `ChatSession` against a scripted webhook stub and
//! checks the transcript, report, hand-off, and PDF surfaces together.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use ai_discovery::channels::cli::render_report_view;
use ai_discovery::config::DiscoveryConfig;
use ai_discovery::error::WebhookError;
use ai_discovery::report::{AgentInfo, AgentRanking, PdfExporter, ReportHandoff, REPORT_TITLE};
use ai_discovery::session::{ChatSession, Sender, SessionEvent};
use ai_discovery::webhook::{decode_reply, WebhookClient, WebhookReply, WebhookRequest};

/// Webhook stub that decodes scripted raw JSON bodies, so the tests exercise
/// the same wire normalization the production client uses.
struct ScriptedWebhook {
    bodies: Mutex<Vec<&'static str>>,
}

impl ScriptedWebhook {
    fn new(bodies: Vec<&'static str>) -> Arc<Self> {
        Arc::new(Self {
            bodies: Mutex::new(bodies),
        })
    }
}

#[async_trait]
impl WebhookClient for ScriptedWebhook {
    async fn send(&self, _request: &WebhookRequest) -> Result<WebhookReply, WebhookError> {
        let mut bodies = self.bodies.lock().unwrap();
        if bodies.is_empty() {
            return Err(WebhookError::Status { status: 503 });
        }
        decode_reply(bodies.remove(0))
    }
}

fn session_with(bodies: Vec<&'static str>) -> ChatSession {
    ChatSession::new(DiscoveryConfig::default(), ScriptedWebhook::new(bodies))
}

#[tokio::test]
async fn full_discovery_conversation() {
    let mut session = session_with(vec![
        r#"{"output": "Question 1: What industry are you in?", "example_answers": ["A", "B"]}"#,
        r#"{"output": "Question 2: How many employees?"}"#,
        r####"{
            "output": "## AI Solutions Report {.h1}\n\nSummary paragraph.\n\n### 1st. Task Management Agent {.h2}\nDetails.",
            "report": true,
            "agents": [
                {"agent": {"name": "Task Management Agent", "ranking_position": "1st"}},
                {"agent": {"name": "Team Coordination Assistant", "ranking_position": "2nd"}}
            ]
        }"####,
    ]);

    // Greeting is already on the transcript
    assert_eq!(session.transcript().len(), 1);

    // Turn 1: question with suggestion buttons
    let event = session.submit("yes let's start").await;
    assert_eq!(event, SessionEvent::BotReply);
    assert_eq!(session.transcript().len(), 3);
    assert_eq!(session.example_answers(), &["A", "B"]);

    // Turn 2: pick suggestion "A"
    let event = session.choose_suggestion(0).await;
    assert_eq!(event, SessionEvent::BotReply);
    assert_eq!(session.transcript().len(), 5);
    assert_eq!(
        session
            .transcript()
            .iter()
            .filter(|m| m.sender == Sender::User)
            .map(|m| m.text.as_str())
            .collect::<Vec<_>>(),
        vec!["yes let's start", "A"]
    );
    assert!(session.example_answers().is_empty());

    // Turn 3: report arrives
    let event = session.submit("about 20").await;
    assert_eq!(event, SessionEvent::ReportReady);
    let report = session.report().expect("report should be available");
    assert_eq!(report.agents.len(), 2);

    // The report view shows the title, agents, and the stripped heading
    let view = render_report_view(report, 4);
    assert!(view.contains(REPORT_TITLE));
    assert!(view.contains("[1st] Task Management Agent"));
    assert!(view.contains("AI Solutions Report"));
    assert!(!view.contains("{.h1}"));
}

#[tokio::test]
async fn array_shaped_report_reply() {
    let mut session = session_with(vec![
        r###"[
            {"output": "## Report body\n\nText."},
            {"agents": [{"agent": {"name": "Doc Agent", "ranking_position": "1st"}}]}
        ]"###,
    ]);

    let event = session.submit("last answer").await;
    assert_eq!(event, SessionEvent::ReportReady);
    assert_eq!(session.report().unwrap().agents[0].agent.name, "Doc Agent");
}

#[tokio::test]
async fn webhook_failure_keeps_the_conversation_alive() {
    let mut session = session_with(vec![]); // every call fails with 503

    let event = session.submit("hello").await;
    assert_eq!(event, SessionEvent::BotReply);
    assert_eq!(
        session.transcript().last().unwrap().text,
        DiscoveryConfig::default().fallback_message
    );
    assert!(session.report().is_none());
}

#[tokio::test]
async fn report_handoff_and_pdf_export() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_with(vec![
        r##"{
            "output": "# Opportunities\n\nA paragraph.\n\n- benefit one\n- benefit two",
            "report": true,
            "agents": [{"agent": {"name": "Task Management Agent", "ranking_position": "1st"}}]
        }"##,
    ]);

    session.submit("done").await;
    let report = session.report().unwrap().clone();

    // Hand-off roundtrip (the /report viewer path)
    let handoff = ReportHandoff::new(dir.path().join("report.json"));
    handoff.save(&report).await.unwrap();
    let loaded = handoff.load().await.unwrap().unwrap();
    assert_eq!(loaded.report, report);

    // PDF export
    let pdf_path = dir.path().join("AI_Opportunity_Report.pdf");
    PdfExporter::default().export(&report, &pdf_path).unwrap();
    assert!(std::fs::read(&pdf_path).unwrap().starts_with(b"%PDF"));

    // Closing the view clears both the session report and the hand-off
    session.close_report();
    handoff.clear().await.unwrap();
    assert!(session.report().is_none());
    assert!(handoff.load().await.unwrap().is_none());
}

#[tokio::test]
async fn report_flag_without_agents_is_a_plain_reply() {
    let mut session = session_with(vec![r#"{"output": "Thanks!", "report": true}"#]);

    let event = session.submit("answer").await;

    // Falls back to a normal bot message — the affordance never appears
    assert_eq!(event, SessionEvent::BotReply);
    assert!(session.report().is_none());
    assert_eq!(session.transcript().last().unwrap().text, "Thanks!");
}

#[tokio::test]
async fn agents_preserve_ranking_order() {
    let mut session = session_with(vec![
        r###"{
            "output": "## Report",
            "report": true,
            "agents": [
                {"agent": {"name": "B", "ranking_position": "1st"}},
                {"agent": {"name": "A", "ranking_position": "2nd"}}
            ]
        }"###,
    ]);

    session.submit("done").await;
    let expected = vec![
        AgentRanking {
            agent: AgentInfo {
                name: "B".to_string(),
                ranking_position: "1st".to_string(),
            },
        },
        AgentRanking {
            agent: AgentInfo {
                name: "A".to_string(),
                ranking_position: "2nd".to_string(),
            },
        },
    ];
    assert_eq!(session.report().unwrap().agents, expected);
}
