//! Default sink: structured log line plus optional JSON-lines outbox

use super::package::{SubmissionPackage, SubmissionReceipt};
use super::traits::SubmissionSink;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

/// Logs every package and, when configured, appends it to an outbox file
#[derive(Debug, Clone, Default)]
pub struct LogSubmissionSink {
    outbox: Option<PathBuf>,
}

impl LogSubmissionSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outbox(path: impl Into<PathBuf>) -> Self {
        Self {
            outbox: Some(path.into()),
        }
    }

    async fn append(&self, path: &PathBuf, package: &SubmissionPackage) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let mut line = serde_json::to_string(package)?;
        line.push('\n');
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .with_context(|| format!("opening outbox {}", path.display()))?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl SubmissionSink for LogSubmissionSink {
    async fn submit(&self, package: &SubmissionPackage) -> Result<SubmissionReceipt> {
        tracing::info!(
            id = %package.id,
            tab = package.payload.active_tab.key(),
            respuesta = %package.payload.respuesta,
            files = package.files.len(),
            "verification submitted"
        );
        if let Some(path) = &self.outbox {
            self.append(path, package).await?;
        }
        Ok(SubmissionReceipt {
            id: package.id,
            accepted_at: Utc::now(),
        })
    }
}
