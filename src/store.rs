use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::facets::Facets;
use crate::models::job::JobRecord;
use crate::source::JobSource;

/// One successful fetch. Shared read-only between requests.
#[derive(Debug)]
pub struct Snapshot {
    pub jobs: Vec<JobRecord>,
    pub facets: Facets,
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(jobs: Vec<JobRecord>) -> Self {
        let facets = Facets::from_jobs(&jobs);
        Self {
            jobs,
            facets,
            fetched_at: Utc::now(),
        }
    }

    pub fn find(&self, id: i64) -> Result<&JobRecord, AppError> {
        self.jobs
            .iter()
            .find(|j| j.id == id)
            .ok_or_else(|| AppError::NotFound("Job not found".to_string()))
    }
}

#[derive(Debug, Clone)]
pub enum SnapshotStatus {
    Loading,
    Ready(Arc<Snapshot>),
    Failed(AppError),
}

/// Holds the current snapshot for every view of the application.
///
/// A refresh replaces the snapshot wholesale; readers keep whatever
/// `Arc<Snapshot>` they already cloned. Only the most recently started
/// refresh may install its result.
pub struct JobStore {
    source: Arc<dyn JobSource>,
    status: RwLock<SnapshotStatus>,
    generation: AtomicU64,
}

impl JobStore {
    pub fn new(source: Arc<dyn JobSource>) -> Self {
        Self {
            source,
            status: RwLock::new(SnapshotStatus::Loading),
            generation: AtomicU64::new(0),
        }
    }

    pub async fn status(&self) -> SnapshotStatus {
        self.status.read().await.clone()
    }

    /// The loaded snapshot, or the error that prevented loading it.
    /// `Ok(None)` while the first fetch is still running.
    pub async fn snapshot(&self) -> Result<Option<Arc<Snapshot>>, AppError> {
        match self.status().await {
            SnapshotStatus::Loading => Ok(None),
            SnapshotStatus::Ready(snapshot) => Ok(Some(snapshot)),
            SnapshotStatus::Failed(err) => Err(err),
        }
    }

    /// Like [`snapshot`](Self::snapshot), but a pending first fetch is an
    /// [`AppError::Loading`] error.
    pub async fn ready_snapshot(&self) -> Result<Arc<Snapshot>, AppError> {
        self.snapshot().await?.ok_or(AppError::Loading)
    }

    pub async fn is_ready(&self) -> bool {
        matches!(*self.status.read().await, SnapshotStatus::Ready(_))
    }

    /// Fetch the whole collection once and install it.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>, AppError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut status = self.status.write().await;
            if matches!(*status, SnapshotStatus::Failed(_)) {
                *status = SnapshotStatus::Loading;
            }
        }

        tracing::info!("Fetching jobs from '{}' (generation {generation})", self.source.name());
        let result = self.source.fetch_all().await.map(|jobs| Arc::new(Snapshot::new(jobs)));

        let mut status = self.status.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Discarding stale fetch result (generation {generation})");
            return result;
        }

        match &result {
            Ok(snapshot) => {
                tracing::info!("Loaded {} jobs", snapshot.jobs.len());
                *status = SnapshotStatus::Ready(Arc::clone(snapshot));
            }
            Err(e) => {
                tracing::error!("Job fetch failed: {e}");
                *status = SnapshotStatus::Failed(e.clone());
            }
        }
        result
    }

    /// Run [`refresh`](Self::refresh) on a background task.
    pub fn spawn_refresh(self: &Arc<Self>) {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            // outcome is recorded in the store status
            let _ = store.refresh().await;
        });
    }
}
