//! Trait abstraction for submission delivery to enable mocking in tests

use super::package::{SubmissionPackage, SubmissionReceipt};
use anyhow::Result;
use async_trait::async_trait;

/// Destination for confirmed verifications
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Deliver a package
    async fn submit(&self, package: &SubmissionPackage) -> Result<SubmissionReceipt>;
}
