//! Report data model.

use serde::{Deserialize, Serialize};

/// Title shown at the top of the report view and the PDF.
pub const REPORT_TITLE: &str = "YOUR AI OPPORTUNITY REPORT";

/// A recommended agent with its ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentInfo {
    pub name: String,
    /// Ordinal label as produced by the webhook ("1st", "2nd", ...).
    pub ranking_position: String,
}

/// One entry of the ranked agent list. The webhook nests each agent under an
/// `agent` key; the wire shape is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRanking {
    pub agent: AgentInfo,
}

/// A completed opportunity report: markdown summary plus ranked agents.
///
/// Only constructed from a qualifying webhook reply, so `agents` is always
/// non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    /// Markdown report body.
    pub output: String,
    /// Ranked agent list, best first.
    pub agents: Vec<AgentRanking>,
}

impl ReportData {
    /// The top `n` agents for display. The report view shows at most four.
    pub fn top_agents(&self, n: usize) -> impl Iterator<Item = &AgentInfo> {
        self.agents.iter().take(n).map(|ranking| &ranking.agent)
    }
}
