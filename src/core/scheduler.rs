// ============================================================================
// XliffMerge - Async Task Scheduler
// ============================================================================
//
// File: src/core/scheduler.rs
// Responsibility: bounded concurrent execution of per-language merge tasks
// Boundaries:
//   - ✅ Async task scheduling and execution
//   - ✅ Concurrency limiting
//   - ✅ Result aggregation in launch order
//   - ✅ Panic isolation
//   - ❌ Should not contain merge logic
//   - ❌ Should not contain UI display logic
//   - ❌ Should not contain configuration management
//
// ============================================================================

use crate::tf;
use crate::utils::logger::Logger;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Outcome of one scheduled task
#[derive(Debug)]
pub enum TaskResult<T, E> {
    /// The task returned `Ok`
    Success(T),
    /// The task returned `Err`
    Failed(E),
    /// The task panicked or could not be joined
    Panicked(String),
}

impl<T, E> TaskResult<T, E> {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskResult::Success(_))
    }
}

/// Scheduler configuration
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Maximum number of tasks running at the same time
    pub max_concurrency: usize,
    /// Log task start and completion
    pub verbose: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_concurrency: num_cpus::get(),
            verbose: false,
        }
    }
}

/// Runs futures on the tokio runtime with a concurrency bound.
///
/// Every spawned task is awaited; a failing or panicking task never
/// cancels its siblings.
pub struct AsyncTaskScheduler {
    config: SchedulerConfig,
    semaphore: Arc<Semaphore>,
}

impl AsyncTaskScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        let permits = config.max_concurrency.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(permits)),
            config,
        }
    }

    /// Run a single task once a permit is available
    async fn execute_task<T, E, F>(
        semaphore: Arc<Semaphore>,
        verbose: bool,
        task_id: String,
        task: F,
    ) -> TaskResult<T, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        // The semaphore is never closed, acquiring only waits
        let _permit = match semaphore.acquire_owned().await {
            Ok(permit) => permit,
            Err(e) => return TaskResult::Panicked(e.to_string()),
        };

        let start_time = Instant::now();
        if verbose {
            Logger::debug(tf!("scheduler.task_start", &task_id));
        }

        let result = match task.await {
            Ok(value) => TaskResult::Success(value),
            Err(e) => TaskResult::Failed(e),
        };

        if verbose {
            let duration = start_time.elapsed();
            if result.is_success() {
                Logger::debug(tf!("scheduler.task_success", &task_id, format!("{:.2}", duration.as_secs_f64())));
            } else {
                Logger::debug(tf!("scheduler.task_failed", &task_id, format!("{:.2}", duration.as_secs_f64())));
            }
        }

        result
    }

    /// Run all tasks concurrently; results come back in launch order.
    pub async fn execute_batch<T, E, F>(&self, tasks: Vec<(String, F)>) -> Vec<(String, TaskResult<T, E>)>
    where
        T: Send + 'static,
        E: Send + 'static,
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        if tasks.is_empty() {
            return Vec::new();
        }

        if self.config.verbose {
            Logger::debug(tf!("scheduler.batch_start", tasks.len(), self.config.max_concurrency));
        }

        let mut handles: Vec<(String, JoinHandle<TaskResult<T, E>>)> = Vec::new();
        for (task_id, task) in tasks {
            let semaphore = Arc::clone(&self.semaphore);
            let verbose = self.config.verbose;
            let id = task_id.clone();
            let handle = tokio::spawn(Self::execute_task(semaphore, verbose, id, task));
            handles.push((task_id, handle));
        }

        let mut results = Vec::with_capacity(handles.len());
        for (task_id, handle) in handles {
            match handle.await {
                Ok(result) => results.push((task_id, result)),
                Err(e) => {
                    Logger::error(tf!("scheduler.task_join_error", &task_id, e.to_string()));
                    results.push((task_id, TaskResult::Panicked(e.to_string())));
                }
            }
        }

        if self.config.verbose {
            let success_count = results.iter().filter(|(_, result)| result.is_success()).count();
            Logger::debug(tf!("scheduler.batch_complete", success_count, results.len()));
        }

        results
    }
}
