//! Fixed-size worker pool
//!
//! Workers are long-lived tasks sharing one job queue. Each worker runs a
//! job to completion before taking the next, so at most `size` connections
//! are handled at once and the rest wait in the queue.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, mpsc};
use tokio::task::{AbortHandle, JoinHandle};

/// How long `shutdown` waits for running jobs before aborting them.
pub const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

type Job = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

pub struct WorkerPool {
    workers: Vec<Worker>,
    sender: Option<mpsc::UnboundedSender<Job>>,
    drain_timeout: Duration,
}

impl WorkerPool {
    /// Spawns `size` workers on the current runtime.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero, or if called outside a Tokio runtime.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "worker pool needs at least one worker");

        let (sender, receiver) = mpsc::unbounded_channel();
        let receiver = Arc::new(Mutex::new(receiver));

        let workers = (0..size)
            .map(|id| Worker::new(id, Arc::clone(&receiver)))
            .collect();

        Self {
            workers,
            sender: Some(sender),
            drain_timeout: DEFAULT_DRAIN_TIMEOUT,
        }
    }

    /// Sets how long `shutdown` lets queued and running jobs finish.
    pub fn drain_timeout(mut self, timeout: Duration) -> Self {
        self.drain_timeout = timeout;
        self
    }

    /// Queues a job. Never waits for a free worker.
    pub fn execute<F>(&self, job: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let sender = self
            .sender
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("worker pool is shut down"))?;

        sender
            .send(Box::pin(job))
            .map_err(|_| anyhow::anyhow!("all workers have exited"))
    }

    /// Closes the queue and waits for queued and running jobs to finish.
    ///
    /// Jobs still running after the drain timeout are aborted, so a stalled
    /// client cannot hold shutdown open.
    pub async fn shutdown(mut self) {
        drop(self.sender.take());

        let workers = std::mem::take(&mut self.workers);
        let aborts: Vec<AbortHandle> = workers.iter().map(|w| w.handle.abort_handle()).collect();

        let drain = async {
            for worker in workers {
                tracing::debug!(worker = worker.id, "Waiting for worker to finish");
                if let Err(e) = worker.handle.await {
                    tracing::error!(worker = worker.id, error = %e, "Worker exited abnormally");
                }
            }
        };

        if tokio::time::timeout(self.drain_timeout, drain).await.is_err() {
            tracing::warn!(
                timeout = ?self.drain_timeout,
                "Drain timed out, aborting remaining connections"
            );
            for abort in aborts {
                abort.abort();
            }
        }
    }
}

struct Worker {
    id: usize,
    handle: JoinHandle<()>,
}

/// Aborts the wrapped task when dropped, tying a job to its worker.
struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

impl Worker {
    fn new(id: usize, receiver: Arc<Mutex<mpsc::UnboundedReceiver<Job>>>) -> Self {
        let handle = tokio::spawn(async move {
            loop {
                let job = receiver.lock().await.recv().await;

                let Some(job) = job else {
                    tracing::debug!(worker = id, "Queue closed, worker exiting");
                    break;
                };

                // Run on its own task so a panicking job cannot take the worker down.
                let task = tokio::spawn(job);
                let _guard = AbortOnDrop(task.abort_handle());

                if let Err(e) = task.await {
                    tracing::error!(worker = id, error = %e, "Job panicked");
                }
            }
        });

        Self { id, handle }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn runs_every_job() {
        let pool = WorkerPool::new(3);
        let (tx, mut rx) = mpsc::unbounded_channel();

        for i in 0..10 {
            let tx = tx.clone();
            pool.execute(async move {
                tx.send(i).unwrap();
            })
            .unwrap();
        }
        drop(tx);

        let mut results = Vec::new();
        while let Some(i) = rx.recv().await {
            results.push(i);
        }
        results.sort();

        assert_eq!(results, (0..10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn never_exceeds_pool_size() {
        let pool = WorkerPool::new(2);
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        for _ in 0..8 {
            let running = running.clone();
            let peak = peak.clone();
            pool.execute(async move {
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                running.fetch_sub(1, Ordering::SeqCst);
            })
            .unwrap();
        }

        pool.shutdown().await;

        assert_eq!(peak.load(Ordering::SeqCst), 2);
        assert_eq!(running.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn shutdown_drains_queued_jobs() {
        let pool = WorkerPool::new(1);
        let done = Arc::new(AtomicUsize::new(0));

        for _ in 0..5 {
            let done = done.clone();
            pool.execute(async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                done.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        }

        pool.shutdown().await;
        assert_eq!(done.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn survives_panicking_job() {
        let pool = WorkerPool::new(1);
        let (tx, mut rx) = mpsc::unbounded_channel();

        pool.execute(async {
            if true {
                panic!("boom");
            }
        })
        .unwrap();
        pool.execute(async move {
            tx.send("still alive").unwrap();
        })
        .unwrap();

        assert_eq!(rx.recv().await, Some("still alive"));
        pool.shutdown().await;
    }

    #[tokio::test]
    async fn shutdown_aborts_stalled_job_after_timeout() {
        let pool = WorkerPool::new(2).drain_timeout(Duration::from_millis(50));
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        pool.execute(async move {
            let _tx = tx;
            // Never completes on its own
            std::future::pending::<()>().await;
        })
        .unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        tokio::time::timeout(Duration::from_secs(2), pool.shutdown())
            .await
            .expect("shutdown must not wait on a stalled job");

        // Aborting the job drops its sender
        assert!(
            tokio::time::timeout(Duration::from_secs(2), rx).await.is_ok(),
            "stalled job was not aborted"
        );
    }

    #[test]
    #[should_panic]
    fn zero_workers_panics() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            WorkerPool::new(0);
        });
    }
}
