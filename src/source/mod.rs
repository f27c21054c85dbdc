// Job sources: where the snapshot comes from.

pub mod remotive;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::job::JobRecord;

pub use remotive::RemotiveSource;

/// A remote collection of job postings.
///
/// Implementations fetch the whole collection in one call and return it in
/// the source's own order. Failures of any kind come back as
/// [`AppError::Fetch`]; retrying is the caller's decision.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    async fn fetch_all(&self) -> Result<Vec<JobRecord>, AppError>;
}
