use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    sync::Arc,
    thread,
};

use thiserror::Error;
use tokio::sync::{
    mpsc::{self, error::TrySendError},
    oneshot,
};

/// Lane errors
#[derive(Error, Debug)]
pub enum LaneError {
    /// The worker behind the lane has stopped
    #[error("Lane '{0}' is closed and no longer accepts work")]
    Closed(String),

    /// The submitted task panicked, so no output was produced
    #[error("A task on lane '{0}' panicked before completing")]
    Panicked(String),

    /// The dedicated worker thread could not be started
    #[error("Unable to start the worker for lane '{name}': {reason}")]
    Spawn {
        /// Name of the lane
        name: String,
        /// Reason reported by the operating system
        reason: String,
    },
}

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A [Lane] is a bounded task queue drained by exactly one dedicated worker
/// thread. Every task submitted to a lane runs to completion before the next
/// one starts, in submission order, which makes a lane the single writer for
/// whatever state its tasks touch.
///
/// Tasks are plain blocking closures. Callers on an async executor submit them
/// with [Lane::run] and await the output without ever blocking the executor
/// themselves.
///
/// ```rust
/// # use simek_common::Lane;
/// #
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let lane = Lane::new("analysis", 32)?;
/// let sum = lane.run(|| (1..=10).sum::<u32>()).await?;
/// assert_eq!(sum, 55);
/// #   Ok(())
/// # }
/// ```
///
/// The worker thread exits once every clone of the lane has been dropped and
/// the queued tasks have drained.
#[derive(Clone)]
pub struct Lane {
    name: Arc<str>,
    jobs: mpsc::Sender<Job>,
}

impl Lane {
    /// Start a new lane with its own worker thread. At most `capacity` tasks
    /// may be waiting at any one time.
    pub fn new(name: &str, capacity: usize) -> Result<Self, LaneError> {
        let (jobs, mut queue) = mpsc::channel::<Job>(capacity.max(1));
        let worker_name = name.to_owned();

        thread::Builder::new()
            .name(format!("lane-{name}"))
            .spawn(move || {
                tracing::debug!("Lane '{worker_name}' started");
                while let Some(job) = queue.blocking_recv() {
                    job();
                }
                tracing::debug!("Lane '{worker_name}' stopped");
            })
            .map_err(|error| LaneError::Spawn {
                name: name.to_owned(),
                reason: format!("{error}"),
            })?;

        Ok(Self {
            name: Arc::from(name),
            jobs,
        })
    }

    /// The name this lane was started with
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Submit a task and wait for its output. Waits for queue capacity if the
    /// lane is saturated.
    pub async fn run<F, T>(&self, task: F) -> Result<T, LaneError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let job: Job = Box::new(move || {
            if let Ok(output) = catch_unwind(AssertUnwindSafe(task)) {
                // Caller stopped waiting; the output is simply dropped
                let _ = tx.send(output);
            }
        });

        self.jobs
            .send(job)
            .await
            .map_err(|_| LaneError::Closed(self.name.to_string()))?;

        rx.await
            .map_err(|_| LaneError::Panicked(self.name.to_string()))
    }

    /// Submit a task without waiting for it. Returns `false` when the task was
    /// not accepted because the queue is full or the lane is closed.
    pub fn spawn_detached<F>(&self, task: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        let name = self.name.clone();
        let job: Job = Box::new(move || {
            if catch_unwind(AssertUnwindSafe(task)).is_err() {
                tracing::error!("Detached task on lane '{name}' panicked");
            }
        });

        match self.jobs.try_send(job) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::warn!("Lane '{}' is saturated, dropping task", self.name);
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }

    /// The number of additional tasks the lane can accept right now
    pub fn available(&self) -> usize {
        self.jobs.capacity()
    }
}

impl std::fmt::Debug for Lane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lane")
            .field("name", &self.name)
            .field("available", &self.jobs.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use anyhow::Result;

    use super::*;

    #[tokio::test]
    async fn it_returns_the_output_of_a_task() -> Result<()> {
        let lane = Lane::new("test", 4)?;
        let output = lane.run(|| "done".to_string()).await?;
        assert_eq!(output, "done");
        Ok(())
    }

    #[tokio::test]
    async fn it_runs_tasks_in_submission_order() -> Result<()> {
        let lane = Lane::new("test", 16)?;
        let seen = Arc::new(Mutex::new(Vec::new()));

        for i in 0..10 {
            let seen = seen.clone();
            assert!(lane.spawn_detached(move || {
                std::thread::sleep(Duration::from_millis(1));
                seen.lock().unwrap().push(i);
            }));
        }

        // A lane is sequential, so awaiting one more task drains the queue
        lane.run(|| ()).await?;

        assert_eq!(*seen.lock().unwrap(), (0..10).collect::<Vec<_>>());
        Ok(())
    }

    #[tokio::test]
    async fn it_runs_every_task_on_the_same_thread() -> Result<()> {
        let lane = Lane::new("test", 4)?;
        let first = lane.run(|| std::thread::current().id()).await?;
        let second = lane.run(|| std::thread::current().id()).await?;

        assert_eq!(first, second);
        assert_ne!(first, std::thread::current().id());
        Ok(())
    }

    #[tokio::test]
    async fn it_survives_a_panicking_task() -> Result<()> {
        let lane = Lane::new("test", 4)?;

        let result = lane.run(|| -> u32 { panic!("boom") }).await;
        assert!(matches!(result, Err(LaneError::Panicked(name)) if name == "test"));

        assert_eq!(lane.run(|| 7).await?, 7);
        Ok(())
    }

    #[tokio::test]
    async fn it_drops_detached_tasks_when_saturated() -> Result<()> {
        let lane = Lane::new("test", 1)?;
        let (release, gate) = std::sync::mpsc::channel::<()>();

        // Occupy the worker, then fill the single queue slot
        assert!(lane.spawn_detached(move || {
            let _ = gate.recv();
        }));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(lane.spawn_detached(|| ()));
        assert!(!lane.spawn_detached(|| ()));

        release.send(())?;
        lane.run(|| ()).await?;
        Ok(())
    }
}
