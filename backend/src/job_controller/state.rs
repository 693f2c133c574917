//! Tracks the state of bulk card-generation jobs.
//!
//! Jobs are keyed by a UUID so a new submission never clobbers the tracking
//! of a still-running one. The endpoints that predate job IDs keep working
//! through the `latest` pointer. Workers report status changes over an MPSC
//! channel consumed by `start_job_updater`; the finished output archive is
//! written into the job entry directly before the terminal status lands.

use common::jobs::BatchStatus;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

/// One bulk job: its reported status, the cooperative cancellation flag the
/// worker checks between rows, and the output archive once the worker is done
/// (partial archives after cancellation included).
pub struct BatchJob {
    pub status: BatchStatus,
    pub cancel: Arc<AtomicBool>,
    pub archive: Option<Vec<u8>>,
}

/// A thread-safe, shareable container for the state of all bulk jobs,
/// injected into the Actix application state in `main.rs`.
#[derive(Clone)]
pub struct JobsState {
    pub jobs: Arc<RwLock<HashMap<String, BatchJob>>>,
    /// The most recently submitted job; default target for the ID-less
    /// status/cancel/download endpoints.
    pub latest: Arc<RwLock<Option<String>>>,
    pub tx: mpsc::Sender<JobUpdate>,
}

impl JobsState {
    pub fn new() -> (Self, mpsc::Receiver<JobUpdate>) {
        let (tx, rx) = mpsc::channel(100);
        let state = Self {
            jobs: Arc::new(RwLock::new(HashMap::new())),
            latest: Arc::new(RwLock::new(None)),
            tx,
        };
        (state, rx)
    }

    /// Resolve the job a request refers to: an explicit ID wins, otherwise
    /// the most recent submission.
    pub async fn resolve_job_id(&self, job_id: Option<String>) -> Option<String> {
        match job_id {
            Some(id) => Some(id),
            None => self.latest.read().await.clone(),
        }
    }
}

/// A status update for a specific bulk job, sent by workers via `JobsState.tx`.
#[derive(Debug)]
pub struct JobUpdate {
    pub(crate) job_id: String,
    pub(crate) status: BatchStatus,
}

impl JobUpdate {
    pub fn new(job_id: String, status: BatchStatus) -> Self {
        Self { job_id, status }
    }
}

/// Central updater task: applies `JobUpdate` messages to the registry. Spawn
/// once at startup.
pub async fn start_job_updater(state: JobsState, mut rx: mpsc::Receiver<JobUpdate>) {
    while let Some(update) = rx.recv().await {
        let mut jobs = state.jobs.write().await;
        if let Some(job) = jobs.get_mut(&update.job_id) {
            job.status = update.status;
        }
    }
}
