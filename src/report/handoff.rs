//! Report hand-off — persists the current report so a separate viewer
//! invocation can render it.
//!
//! Plays the role the browser build gave `localStorage`: the chat process
//! writes the report here, `ai-discovery report` reads it back, and closing
//! the report view clears it.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::ReportError;
use crate::report::model::ReportData;

/// What gets written to the hand-off file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandoffPayload {
    pub report: ReportData,
    pub generated_at: DateTime<Utc>,
}

/// File-backed hand-off for the current report.
pub struct ReportHandoff {
    path: PathBuf,
}

impl ReportHandoff {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the report, creating parent directories as needed.
    pub async fn save(&self, report: &ReportData) -> Result<(), ReportError> {
        let payload = HandoffPayload {
            report: report.clone(),
            generated_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&payload)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.path, json).await?;
        tracing::debug!(path = %self.path.display(), "Report handed off");
        Ok(())
    }

    /// Load a previously handed-off report, or `None` if there is none.
    pub async fn load(&self) -> Result<Option<HandoffPayload>, ReportError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path).await?;
        let payload: HandoffPayload = serde_json::from_str(&json)?;
        Ok(Some(payload))
    }

    /// Remove the hand-off file. Clearing an already-clear hand-off is a no-op.
    pub async fn clear(&self) -> Result<(), ReportError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::model::{AgentInfo, AgentRanking};

    fn sample_report() -> ReportData {
        ReportData {
            output: "## Summary".to_string(),
            agents: vec![AgentRanking {
                agent: AgentInfo {
                    name: "Task Management Agent".to_string(),
                    ranking_position: "1st".to_string(),
                },
            }],
        }
    }

    #[tokio::test]
    async fn save_load_clear_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let handoff = ReportHandoff::new(dir.path().join("nested/report.json"));

        assert!(handoff.load().await.unwrap().is_none());

        handoff.save(&sample_report()).await.unwrap();
        let loaded = handoff.load().await.unwrap().unwrap();
        assert_eq!(loaded.report, sample_report());

        handoff.clear().await.unwrap();
        assert!(handoff.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let handoff = ReportHandoff::new(dir.path().join("report.json"));
        handoff.clear().await.unwrap();
        handoff.clear().await.unwrap();
    }
}
