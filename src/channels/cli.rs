//! CLI channel — stdin/stdout REPL around a [`ChatSession`].

use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::DiscoveryConfig;
use crate::error::ChannelError;
use crate::report::{parse_blocks, render_plain, PdfExporter, ReportData, ReportHandoff, REPORT_TITLE};
use crate::session::{ChatSession, Message, Sender, SessionEvent};

/// Render the report view body: title, ranked agents, then the summary.
pub fn render_report_view(report: &ReportData, max_agents: usize) -> String {
    let mut out = String::new();
    out.push_str(REPORT_TITLE);
    out.push_str("\n\n");
    for agent in report.top_agents(max_agents) {
        out.push_str(&format!("  [{}] {}\n", agent.ranking_position, agent.name));
    }
    out.push('\n');
    out.push_str(&render_plain(&parse_blocks(&report.output)));
    out
}

/// Interactive terminal chat. Input is not read while a webhook call is in
/// flight, mirroring the disabled input box of the web build.
pub struct CliChannel {
    pdf_path: PathBuf,
    handoff: ReportHandoff,
    max_report_agents: usize,
}

impl CliChannel {
    pub fn new(config: &DiscoveryConfig) -> Self {
        Self {
            pdf_path: PathBuf::from(&config.pdf_path),
            handoff: ReportHandoff::new(&config.handoff_path),
            max_report_agents: config.max_report_agents,
        }
    }

    /// Run the REPL until EOF or `/quit`.
    pub async fn run(&self, session: &mut ChatSession) -> Result<(), ChannelError> {
        print_message(&session.transcript()[0]);
        print_help_hint();
        eprint!("> ");

        let stdin = tokio::io::stdin();
        let reader = BufReader::new(stdin);
        let mut lines = reader.lines();

        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line.trim().to_string(),
                Ok(None) => break, // EOF
                Err(e) => return Err(ChannelError::Read(e.to_string())),
            };

            if line.is_empty() {
                eprint!("> ");
                continue;
            }

            match line.as_str() {
                "/quit" => break,
                "/report" => self.show_report(session).await,
                "/close" => self.close_report(session).await,
                "/pdf" => self.export_pdf(session),
                _ => self.send(session, &line).await,
            }
            eprint!("> ");
        }
        Ok(())
    }

    async fn send(&self, session: &mut ChatSession, line: &str) {
        // A bare number picks the matching suggestion button
        let event = if let Ok(n) = line.parse::<usize>() {
            if n >= 1 && n <= session.example_answers().len() {
                let label = session.example_answers()[n - 1].clone();
                println!("\n[you] {label}");
                eprintln!("⏳ ...");
                session.choose_suggestion(n - 1).await
            } else {
                eprintln!("⏳ ...");
                session.submit(line).await
            }
        } else {
            eprintln!("⏳ ...");
            session.submit(line).await
        };

        match event {
            SessionEvent::Ignored => {}
            SessionEvent::BotReply | SessionEvent::ReportReady => {
                if let Some(msg) = session.transcript().last() {
                    if msg.sender == Sender::Bot {
                        print_message(msg);
                    }
                }
                print_suggestions(session.example_answers());
                if event == SessionEvent::ReportReady {
                    eprintln!("📄 VIEW REPORT available — type /report");
                }
            }
        }
    }

    async fn show_report(&self, session: &ChatSession) {
        let Some(report) = session.report() else {
            eprintln!("No report available yet.");
            return;
        };

        // Hand the report off for `ai-discovery report`; if that fails the
        // inline view below is the manual fallback.
        if let Err(e) = self.handoff.save(report).await {
            tracing::warn!(error = %e, "Report hand-off failed");
            println!("\n[bot] Could not open the report in a separate viewer — showing it here instead.");
        }

        println!("\n{}", render_report_view(report, self.max_report_agents));
        eprintln!("(/pdf to download, /close to dismiss)");
    }

    async fn close_report(&self, session: &mut ChatSession) {
        session.close_report();
        if let Err(e) = self.handoff.clear().await {
            tracing::warn!(error = %e, "Failed to clear report hand-off");
        }
        eprintln!("Report closed.");
    }

    fn export_pdf(&self, session: &ChatSession) {
        let Some(report) = session.report() else {
            eprintln!("No report available yet.");
            return;
        };
        let exporter = PdfExporter::new(self.max_report_agents);
        match exporter.export(report, &self.pdf_path) {
            Ok(()) => eprintln!("✅ Saved {}", self.pdf_path.display()),
            Err(e) => eprintln!("❌ PDF export failed: {e}"),
        }
    }
}

fn print_message(msg: &Message) {
    let who = match msg.sender {
        Sender::User => "you",
        Sender::Bot => "bot",
    };
    println!("\n[{who}] {}\n", msg.text);
}

fn print_suggestions(answers: &[String]) {
    if answers.is_empty() {
        return;
    }
    eprintln!("Suggestions:");
    for (i, answer) in answers.iter().enumerate() {
        eprintln!("  [{}] {}", i + 1, answer);
    }
    eprintln!("(type a number to pick one)");
}

fn print_help_hint() {
    eprintln!("Commands: /report, /pdf, /close, /quit\n");
}
