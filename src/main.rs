use std::sync::Arc;

use ai_discovery::channels::cli::{render_report_view, CliChannel};
use ai_discovery::config::DiscoveryConfig;
use ai_discovery::report::{PdfExporter, ReportHandoff};
use ai_discovery::session::ChatSession;
use ai_discovery::webhook::HttpWebhookClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(String::as_str) == Some("report") {
        let export_pdf = args.iter().any(|a| a == "--pdf");
        return view_report(export_pdf).await;
    }

    let config = DiscoveryConfig::from_env().unwrap_or_else(|| {
        eprintln!("Error: DISCOVERY_WEBHOOK_URL not set");
        eprintln!("  export DISCOVERY_WEBHOOK_URL=https://.../webhook/<id>/chat");
        std::process::exit(1);
    });

    eprintln!("💬 AI Discovery v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Webhook: {}", config.webhook_url);
    eprintln!("   PDF: {}", config.pdf_path);
    eprintln!("   Type a message and press Enter. /quit to exit.\n");

    let webhook = Arc::new(HttpWebhookClient::new(config.webhook_url.clone()));
    let mut session = ChatSession::new(config.clone(), webhook);

    let cli = CliChannel::new(&config);
    cli.run(&mut session).await?;

    Ok(())
}

/// `ai-discovery report [--pdf]` — render a previously handed-off report.
async fn view_report(export_pdf: bool) -> anyhow::Result<()> {
    let config = DiscoveryConfig::from_env().unwrap_or_default();
    let handoff = ReportHandoff::new(&config.handoff_path);

    let Some(payload) = handoff.load().await? else {
        eprintln!("No report has been handed off yet. Run a discovery chat first.");
        std::process::exit(1);
    };

    println!(
        "{}",
        render_report_view(&payload.report, config.max_report_agents)
    );
    eprintln!("(generated {})", payload.generated_at.to_rfc3339());

    if export_pdf {
        let exporter = PdfExporter::new(config.max_report_agents);
        exporter.export(&payload.report, std::path::Path::new(&config.pdf_path))?;
        eprintln!("✅ Saved {}", config.pdf_path);
    }

    Ok(())
}
