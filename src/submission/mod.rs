//! Final submission of a confirmed verification
//!
//! The page hands a [`SubmissionPackage`] to a [`SubmissionSink`]. The
//! default sink logs the package and can append it to a local outbox file.

mod package;
mod sink;
mod traits;

pub use package::{SubmissionPackage, SubmissionReceipt};
pub use sink::LogSubmissionSink;
pub use traits::SubmissionSink;

#[cfg(test)]
pub use traits::MockSubmissionSink;
