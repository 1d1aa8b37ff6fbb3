//! Transaction driver: a fixed worker pool with a bounded wait
//!
//! This module provides the `TransactionDriver` struct, which submits one task
//! per transaction record to a fixed-size worker pool and waits for them for at
//! most a configured timeout.
//!
//! # Design
//!
//! The pool is a tokio multi-threaded runtime with exactly `workers` threads.
//! Each task applies one record through the shared [`AccountRegistry`] and then
//! increments the completed counter atomically. A failed withdrawal still counts
//! as completed.
//!
//! # Shutdown Protocol
//!
//! ```text
//! submit all tasks ──► wait (Condvar, deadline) ──┬─► all finished ──► drop runtime
//!                                                 └─► timeout: raise abandon flag
//!                                                     ──► shutdown_background
//!                                    ──► read counters
//! ```
//!
//! The deadline is the only point where the driver waits. On timeout the
//! runtime is shut down in the background, so `run_records` returns right
//! after the deadline even if a worker is stuck inside a critical section.
//!
//! Abandonment is not cancellation: a task that already entered its mutation
//! is no longer waited upon, but still finishes it on its detached worker.
//! Such a task is counted as abandoned in the report even though its record
//! may commit afterwards. Any task that has not started yet checks the abandon
//! flag and never runs, and tasks still queued at shutdown are discarded
//! unpolled. Because each task performs a single mutation, every record is
//! either fully applied or never applied.

use super::generator::TransactionGenerator;
use super::registry::AccountRegistry;
use crate::types::{BankError, TransactionRecord};
use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Worker pool configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverConfig {
    /// Number of worker threads
    pub workers: usize,
    /// How long to wait for submitted tasks before abandoning the rest
    pub timeout: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            workers: 5,
            timeout: Duration::from_secs(5),
        }
    }
}

impl DriverConfig {
    /// Create a DriverConfig with custom values
    ///
    /// Zero workers falls back to the number of CPU cores.
    pub fn new(workers: usize, timeout: Duration) -> Self {
        let workers = if workers == 0 {
            let fallback = num_cpus::get();
            warn!("Invalid worker count (0), using CPU count ({})", fallback);
            fallback
        } else {
            workers
        };

        Self { workers, timeout }
    }
}

/// Summary of one driver run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DriverReport {
    /// Tasks handed to the pool
    pub submitted: usize,
    /// Tasks whose mutation ran to completion, successful or not
    pub completed: usize,
    /// Tasks whose mutation returned an error
    pub failed: usize,
    /// Tasks that had not finished when the wait timed out
    pub abandoned: usize,
    /// Whether the bounded wait expired before all tasks finished
    pub timed_out: bool,
}

/// Submits transactions to a fixed worker pool
#[derive(Clone, Debug, Default)]
pub struct TransactionDriver {
    config: DriverConfig,
}

/// Shared bookkeeping between the orchestrating thread and the tasks
#[derive(Debug, Default)]
struct TaskCounters {
    completed: AtomicUsize,
    failed: AtomicUsize,
    abandon: AtomicBool,
    outstanding: Mutex<usize>,
    all_done: Condvar,
}

/// Marks a task as finished when dropped, whether it ran, was skipped, or was
/// discarded unpolled by the runtime
struct TaskGuard {
    counters: Arc<TaskCounters>,
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        let mut outstanding = self.counters.outstanding.lock();
        *outstanding -= 1;
        if *outstanding == 0 {
            self.counters.all_done.notify_all();
        }
    }
}

impl TransactionDriver {
    /// Create a driver with the given pool configuration
    pub fn new(config: DriverConfig) -> Self {
        Self { config }
    }

    /// Run `count` randomly generated transactions
    ///
    /// Records are drawn up front on the calling thread, so a seeded generator
    /// produces the same workload on every run.
    pub fn run(
        &self,
        registry: Arc<AccountRegistry>,
        generator: &mut TransactionGenerator,
        count: usize,
    ) -> Result<DriverReport, BankError> {
        let records = generator.records(count);
        self.run_records(registry, records)
    }

    /// Run an explicit list of transactions
    ///
    /// # Errors
    ///
    /// Returns `BankError::Runtime` if the worker pool cannot be created.
    /// Errors from individual transactions are logged and counted in
    /// [`DriverReport::failed`]; they do not abort the run.
    pub fn run_records(
        &self,
        registry: Arc<AccountRegistry>,
        records: Vec<TransactionRecord>,
    ) -> Result<DriverReport, BankError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.workers)
            .thread_name("transaction-worker")
            .build()
            .map_err(|e| BankError::runtime(format!("Failed to create worker pool: {}", e)))?;

        let submitted = records.len();
        let counters = Arc::new(TaskCounters {
            outstanding: Mutex::new(submitted),
            ..TaskCounters::default()
        });

        debug!(
            "Submitting {} transactions to {} workers",
            submitted, self.config.workers
        );

        for record in records {
            let registry = Arc::clone(&registry);
            let guard = TaskGuard {
                counters: Arc::clone(&counters),
            };
            runtime.spawn(async move {
                let counters = &guard.counters;
                if counters.abandon.load(Ordering::Acquire) {
                    return;
                }
                match registry.apply(&record) {
                    Ok(_) => {
                        counters.completed.fetch_add(1, Ordering::SeqCst);
                    }
                    Err(e) => {
                        warn!("Transaction {:?} failed: {}", record, e);
                        counters.failed.fetch_add(1, Ordering::SeqCst);
                    }
                }
            });
        }

        let timed_out = !self.wait(&counters);
        if timed_out {
            counters.abandon.store(true, Ordering::Release);
            warn!(
                "Timed out after {:?} waiting for transactions, abandoning unfinished tasks",
                self.config.timeout
            );
            runtime.shutdown_background();
        } else {
            // Every task has finished, so this does not block on a mutation.
            drop(runtime);
        }

        let completed = counters.completed.load(Ordering::SeqCst);
        let failed = counters.failed.load(Ordering::SeqCst);
        let report = DriverReport {
            submitted,
            completed,
            failed,
            abandoned: submitted.saturating_sub(completed + failed),
            timed_out,
        };

        info!(
            "Driver finished: {} submitted, {} completed, {} failed, {} abandoned",
            report.submitted, report.completed, report.failed, report.abandoned
        );

        Ok(report)
    }

    /// Wait for all tasks; returns false if the deadline passed first
    fn wait(&self, counters: &TaskCounters) -> bool {
        let deadline = Instant::now() + self.config.timeout;
        let mut outstanding = counters.outstanding.lock();
        while *outstanding > 0 {
            if counters
                .all_done
                .wait_until(&mut outstanding, deadline)
                .timed_out()
            {
                return *outstanding == 0;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transaction_log::TransactionLog;
    use rstest::rstest;
    use std::sync::mpsc;
    use std::thread;

    fn registry(count: u32) -> Arc<AccountRegistry> {
        Arc::new(AccountRegistry::new(count, &TransactionLog::disabled()))
    }

    fn driver(workers: usize) -> TransactionDriver {
        TransactionDriver::new(DriverConfig::new(workers, Duration::from_secs(10)))
    }

    #[test]
    fn test_zero_workers_falls_back_to_cpu_count() {
        let config = DriverConfig::new(0, Duration::from_secs(1));
        assert_eq!(config.workers, num_cpus::get());
    }

    #[test]
    fn test_default_config() {
        let config = DriverConfig::default();
        assert_eq!(config.workers, 5);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_scenario_three_accounts() {
        let registry = registry(3);
        let records = vec![
            TransactionRecord::deposit(1, 50),
            TransactionRecord::deposit(2, 30),
        ];
        let report = driver(2).run_records(Arc::clone(&registry), records).unwrap();
        assert_eq!(report.completed, 2);

        // Withdrawals run after the deposits committed
        let records = vec![
            TransactionRecord::withdraw(1, 10),
            TransactionRecord::withdraw(2, 100),
        ];
        let report = driver(2).run_records(Arc::clone(&registry), records).unwrap();

        assert_eq!(report.completed, 2);
        assert_eq!(report.failed, 0);
        assert!(!report.timed_out);
        let balances: Vec<_> = registry.snapshot().iter().map(|b| b.balance).collect();
        assert_eq!(balances, vec![40, 30, 0]);
    }

    #[rstest]
    #[case::single_worker(1, 100)]
    #[case::few_workers(4, 1_000)]
    #[case::many_workers(16, 5_000)]
    fn test_completed_counter_matches_submitted(
        #[case] workers: usize,
        #[case] transactions: usize,
    ) {
        let registry = registry(3);
        let mut generator = TransactionGenerator::new(3, 10..100, Some(7)).unwrap();

        let report = driver(workers)
            .run(Arc::clone(&registry), &mut generator, transactions)
            .unwrap();

        assert_eq!(report.submitted, transactions);
        assert_eq!(report.completed, transactions);
        assert_eq!(report.failed, 0);
        assert_eq!(report.abandoned, 0);
        assert!(!report.timed_out);
        for balance in registry.snapshot() {
            assert!(balance.balance >= 0);
        }
    }

    #[test]
    fn test_deposits_only_sum_exactly() {
        let registry = registry(5);
        let records: Vec<_> = (0..2_000)
            .map(|i| TransactionRecord::deposit(i % 5 + 1, 3))
            .collect();

        let report = driver(8).run_records(Arc::clone(&registry), records).unwrap();

        assert_eq!(report.completed, 2_000);
        for balance in registry.snapshot() {
            assert_eq!(balance.balance, 400 * 3);
        }
    }

    #[test]
    fn test_failed_withdrawals_still_count_as_completed() {
        let registry = registry(1);
        let records = vec![TransactionRecord::withdraw(1, 10); 20];

        let report = driver(4).run_records(Arc::clone(&registry), records).unwrap();

        assert_eq!(report.completed, 20);
        assert_eq!(registry.get(1).unwrap().balance(), 0);
    }

    #[test]
    fn test_errors_are_counted_separately() {
        let registry = registry(2);
        let records = vec![
            TransactionRecord::deposit(1, 10),
            TransactionRecord::deposit(9, 10),
            TransactionRecord::withdraw(2, -1),
        ];

        let report = driver(2).run_records(Arc::clone(&registry), records).unwrap();

        assert_eq!(report.completed, 1);
        assert_eq!(report.failed, 2);
        assert_eq!(report.abandoned, 0);
        assert_eq!(registry.get(1).unwrap().balance(), 10);
    }

    #[test]
    fn test_no_transactions() {
        let report = driver(2).run_records(registry(3), Vec::new()).unwrap();
        assert_eq!(report, DriverReport::default());
    }

    /// Runs 10 deposits of 5 on account 1 with two workers and a 50 ms
    /// timeout while the account lock is held by the test
    fn run_against_held_lock(
        registry: &Arc<AccountRegistry>,
    ) -> mpsc::Receiver<(DriverReport, Duration)> {
        let driver = TransactionDriver::new(DriverConfig::new(2, Duration::from_millis(50)));
        let (sender, receiver) = mpsc::channel();
        let registry = Arc::clone(registry);
        thread::spawn(move || {
            let records = vec![TransactionRecord::deposit(1, 5); 10];
            let started = Instant::now();
            let report = driver.run_records(registry, records).unwrap();
            let _ = sender.send((report, started.elapsed()));
        });
        receiver
    }

    #[test]
    fn test_timeout_returns_while_workers_are_blocked() {
        let registry = registry(1);
        let account = registry.get(1).unwrap();

        // Every worker blocks inside its first task for as long as this is held
        let lock = account.balance.lock();
        let receiver = run_against_held_lock(&registry);
        let result = receiver.recv_timeout(Duration::from_secs(2));
        drop(lock);

        let (report, elapsed) = result.expect("driver did not return while the lock was held");
        assert!(elapsed < Duration::from_secs(1), "returned after {:?}", elapsed);
        assert!(report.timed_out);
        assert_eq!(report.submitted, 10);
        assert_eq!(report.completed, 0);
        assert_eq!(report.failed, 0);
        assert_eq!(report.abandoned, 10);
    }

    #[test]
    fn test_timeout_abandons_unstarted_tasks() {
        let registry = registry(1);
        let account = registry.get(1).unwrap();

        let lock = account.balance.lock();
        let receiver = run_against_held_lock(&registry);
        let (report, _) = receiver.recv_timeout(Duration::from_secs(2)).unwrap();
        drop(lock);

        // Only the two tasks already inside their mutation may still commit
        thread::sleep(Duration::from_millis(200));
        assert!(report.timed_out);
        assert_eq!(report.completed + report.abandoned, 10);
        let balance = account.balance();
        assert!(balance <= 2 * 5, "unstarted tasks ran: balance {}", balance);
        assert_eq!(balance % 5, 0);
    }
}
