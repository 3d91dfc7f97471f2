//! Tracks the background jobs behind URL imports and data-source analyses.
//!
//! - `JobsState` is the clonable shared map of job statuses, registered as
//!   `web::Data` in `main.rs` and read by `GET /api/jobs/{job_id}`.
//! - Workers never write the map directly. They send a `JobUpdate` over the
//!   channel and `start_job_updater` applies it, so a slow poller holding a
//!   read lock never blocks a worker.
//! - A finished job stays readable for the configured retention, then is
//!   dropped the next time the map is written.

use common::jobs::JobStatus;
use log::debug;
use std::time::{Duration, Instant};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

const CHANNEL_CAPACITY: usize = 100;

#[derive(Clone)]
pub struct JobsState {
    /// Job id to its latest status.
    pub jobs: Arc<RwLock<HashMap<String, JobEntry>>>,
    /// Where workers report progress.
    pub tx: mpsc::Sender<JobUpdate>,
    /// How long a completed or failed job stays readable.
    retention: Duration,
}

#[derive(Debug, Clone)]
pub struct JobEntry {
    status: JobStatus,
    finished_at: Option<Instant>,
}

impl JobEntry {
    fn new(status: JobStatus) -> Self {
        let finished_at = status.is_finished().then(Instant::now);
        JobEntry { status, finished_at }
    }

    fn expired(&self, now: Instant, retention: Duration) -> bool {
        self.finished_at
            .is_some_and(|at| now.saturating_duration_since(at) >= retention)
    }
}

#[derive(Debug)]
pub struct JobUpdate {
    pub(crate) job_id: String,
    pub(crate) status: JobStatus,
}

impl JobsState {
    /// A fresh state and the receiver `start_job_updater` must drain.
    pub fn new(retention: Duration) -> (Self, mpsc::Receiver<JobUpdate>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let state = JobsState {
            jobs: Arc::new(RwLock::new(HashMap::new())),
            tx,
            retention,
        };
        (state, rx)
    }

    /// Registers a new job as pending and returns its id.
    pub async fn register(&self) -> String {
        let job_id = Uuid::new_v4().to_string();
        let mut jobs = self.jobs.write().await;
        self.evict_expired(&mut jobs);
        jobs.insert(job_id.clone(), JobEntry::new(JobStatus::Pending));
        job_id
    }

    /// Queues a status change for `job_id`.
    pub async fn report(&self, job_id: &str, status: JobStatus) {
        let update = JobUpdate {
            job_id: job_id.to_string(),
            status,
        };
        if self.tx.send(update).await.is_err() {
            debug!("job updater stopped; dropping update for {}", job_id);
        }
    }

    /// The job's latest status; `None` once it is unknown or expired.
    pub async fn status(&self, job_id: &str) -> Option<JobStatus> {
        let jobs = self.jobs.read().await;
        jobs.get(job_id)
            .filter(|entry| !entry.expired(Instant::now(), self.retention))
            .map(|entry| entry.status.clone())
    }

    fn evict_expired(&self, jobs: &mut HashMap<String, JobEntry>) {
        let now = Instant::now();
        let before = jobs.len();
        jobs.retain(|_, entry| !entry.expired(now, self.retention));
        let evicted = before - jobs.len();
        if evicted > 0 {
            debug!("evicted {} finished jobs", evicted);
        }
    }
}

/// Applies queued updates until every sender is gone.
pub async fn start_job_updater(state: JobsState, mut rx: mpsc::Receiver<JobUpdate>) {
    while let Some(update) = rx.recv().await {
        let mut jobs = state.jobs.write().await;
        state.evict_expired(&mut jobs);
        jobs.insert(update.job_id, JobEntry::new(update.status));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn wait_until_finished(state: &JobsState, job_id: &str) {
        for _ in 0..100 {
            if state.status(job_id).await.is_some_and(|s| s.is_finished()) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    #[actix_web::test]
    async fn updates_reach_the_map() {
        let (state, rx) = JobsState::new(Duration::from_secs(60));
        let updater = tokio::spawn(start_job_updater(state.clone(), rx));

        let job_id = state.register().await;
        assert_eq!(state.status(&job_id).await, Some(JobStatus::Pending));

        state.report(&job_id, JobStatus::InProgress(50)).await;
        state
            .report(&job_id, JobStatus::Completed("done".into()))
            .await;

        // The updater runs concurrently; wait for the last update to land.
        wait_until_finished(&state, &job_id).await;
        assert_eq!(
            state.status(&job_id).await,
            Some(JobStatus::Completed("done".into()))
        );
        assert_eq!(state.status("missing").await, None);
        updater.abort();
    }

    #[actix_web::test]
    async fn finished_jobs_are_evicted_after_retention() {
        let (state, rx) = JobsState::new(Duration::ZERO);
        let updater = tokio::spawn(start_job_updater(state.clone(), rx));

        let running = state.register().await;
        state.report(&running, JobStatus::InProgress(10)).await;
        let done = state.register().await;
        state.report(&done, JobStatus::Failed("boom".into())).await;

        // Expired entries are hidden at once and dropped on the next write.
        for _ in 0..100 {
            if state.status(&done).await.is_none()
                && state.status(&running).await == Some(JobStatus::InProgress(10))
            {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(state.status(&done).await, None);

        state.register().await;
        let jobs = state.jobs.read().await;
        assert!(!jobs.contains_key(&done));
        assert!(jobs.contains_key(&running));
        assert_eq!(jobs.len(), 2);
        drop(jobs);
        updater.abort();
    }
}
