//! Configuration types.

/// Default greeting shown before the first user message.
pub const DEFAULT_GREETING: &str = "Hi, welcome to the AI Business Acceleration Discovery. \
If you answer a few questions for me, I can evaluate the areas of your business that could \
benefit from using AI! This should take 5-10 mins. Let me know if you are ready and we can \
get started. Otherwise, if you have any more questions, feel free to ask.";

/// Fallback bot message shown when the webhook call fails.
pub const FALLBACK_MESSAGE: &str = "Sorry, something went wrong. Please try again.";

/// Bot message announcing that a report became available.
pub const REPORT_READY_MESSAGE: &str =
    "Your report is ready! Use /report to see it.";

/// Discovery client configuration.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// External webhook endpoint that drives the conversation.
    pub webhook_url: String,
    /// Greeting seeded as the first bot message.
    pub greeting: String,
    /// Bot message substituted when the webhook call fails.
    pub fallback_message: String,
    /// Bot message appended when a report becomes available.
    pub report_ready_message: String,
    /// Maximum agents shown in the report view.
    pub max_report_agents: usize,
    /// Output path for the exported PDF.
    pub pdf_path: String,
    /// Path where the report is handed off for a separate viewer invocation.
    pub handoff_path: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            greeting: DEFAULT_GREETING.to_string(),
            fallback_message: FALLBACK_MESSAGE.to_string(),
            report_ready_message: REPORT_READY_MESSAGE.to_string(),
            max_report_agents: 4,
            pdf_path: "AI_Opportunity_Report.pdf".to_string(),
            handoff_path: "./data/report.json".to_string(),
        }
    }
}

impl DiscoveryConfig {
    /// Build a config from `DISCOVERY_*` environment variables.
    ///
    /// Returns `None` if `DISCOVERY_WEBHOOK_URL` is not set — the client
    /// cannot do anything useful without an endpoint.
    pub fn from_env() -> Option<Self> {
        let webhook_url = std::env::var("DISCOVERY_WEBHOOK_URL").ok()?;
        let mut config = Self {
            webhook_url,
            ..Self::default()
        };
        if let Ok(greeting) = std::env::var("DISCOVERY_GREETING") {
            config.greeting = greeting;
        }
        if let Ok(pdf_path) = std::env::var("DISCOVERY_PDF_PATH") {
            config.pdf_path = pdf_path;
        }
        if let Ok(handoff_path) = std::env::var("DISCOVERY_HANDOFF_PATH") {
            config.handoff_path = handoff_path;
        }
        Some(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.max_report_agents, 4);
        assert_eq!(config.pdf_path, "AI_Opportunity_Report.pdf");
        assert!(config.greeting.contains("AI Business Acceleration Discovery"));
        assert_eq!(config.fallback_message, FALLBACK_MESSAGE);
    }
}
