use std::future::Future;
use tokio::sync::Mutex;
use tokio::task::JoinSet;

/// Cancellable group of background backup jobs
///
/// Jobs are tracked so that everything still in flight can be torn down
/// together when the owning state is shut down, instead of outliving it.
pub struct JobSet {
    inner: Mutex<JoinSet<()>>,
}

impl Default for JobSet {
    fn default() -> Self {
        Self::new()
    }
}

impl JobSet {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(JoinSet::new()),
        }
    }

    /// Spawn a job into the group, reaping any jobs that already finished
    pub async fn spawn<F>(&self, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut jobs = self.inner.lock().await;
        while jobs.try_join_next().is_some() {}
        jobs.spawn(job);
    }

    /// Number of jobs still tracked (finished but unreaped jobs included)
    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    /// Abort every in-flight job and wait for them to wind down
    pub async fn shutdown(&self) {
        let mut jobs = self.inner.lock().await;
        jobs.shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_shutdown_aborts_pending_jobs() {
        let jobs = JobSet::new();
        let finished = Arc::new(AtomicBool::new(false));

        let flag = finished.clone();
        jobs.spawn(async move {
            tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
            flag.store(true, Ordering::SeqCst);
        })
        .await;

        assert_eq!(jobs.len().await, 1);
        jobs.shutdown().await;
        assert_eq!(jobs.len().await, 0);
        assert!(!finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_finished_jobs_are_reaped_on_spawn() {
        let jobs = JobSet::new();

        jobs.spawn(async {}).await;
        // Give the no-op job a chance to complete
        tokio::task::yield_now().await;
        jobs.spawn(async {}).await;

        assert!(jobs.len().await <= 2);
        jobs.shutdown().await;
    }
}
