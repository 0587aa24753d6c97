//! Execution strategies for processing a range of numbers.
//!
//! Every strategy implements [`Scheduler`] and yields one [`ResultRecord`] per
//! number in the range. They differ only in how work is fanned out:
//!
//! - [`Pooled`]: a fixed-size rayon pool, results in input order
//! - [`PerItem`]: one OS thread per number, results in completion order
//! - [`Sequential`]: a plain loop on the calling thread

use std::ops::Range;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context, Result};
use crossbeam::channel::unbounded;
use indicatif::ProgressBar;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::{debug, info};

use crate::compute::{process_one, ResultCollection, ResultRecord};
use crate::config::{RunConfig, StrategyKind};

pub trait Scheduler {
    fn name(&self) -> &'static str;

    /// Processes every number in `range`, ticking `progress` once per record.
    fn run(&self, range: Range<u64>, progress: &ProgressBar) -> Result<ResultCollection>;
}

/// Bounded pool of long-lived workers.
pub struct Pooled {
    num_workers: usize,
}

impl Pooled {
    pub fn new(num_workers: usize) -> Self {
        Self { num_workers }
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Maps `work` over `range` on the pool. `work` receives the worker's name.
    ///
    /// A panic inside `work` resumes on the calling thread and aborts the batch.
    pub fn map_range<F>(
        &self,
        range: Range<u64>,
        progress: &ProgressBar,
        work: F,
    ) -> Result<ResultCollection>
    where
        F: Fn(u64, Option<String>) -> ResultRecord + Sync,
    {
        debug!(
            workers = self.num_workers,
            start = range.start,
            end = range.end,
            "starting worker pool"
        );

        let pool = ThreadPoolBuilder::new()
            .num_threads(self.num_workers)
            .thread_name(|index| format!("PoolWorker-{}", index + 1))
            .build()
            .with_context(|| format!("Failed to build pool of {} workers", self.num_workers))?;

        let results = pool.install(|| {
            range
                .into_par_iter()
                .map(|n| {
                    let worker = thread::current().name().map(str::to_owned);
                    let record = work(n, worker);
                    progress.inc(1);
                    record
                })
                .collect::<ResultCollection>()
        });

        Ok(results)
    }
}

impl Scheduler for Pooled {
    fn name(&self) -> &'static str {
        "pool"
    }

    fn run(&self, range: Range<u64>, progress: &ProgressBar) -> Result<ResultCollection> {
        self.map_range(range, progress, process_one)
    }
}

/// One thread per number, all feeding a shared queue.
///
/// Concurrency is unbounded: every number gets its own OS thread at once.
/// Only suitable for small ranges; kept to contrast with [`Pooled`].
pub struct PerItem;

impl PerItem {
    /// Spawns a thread per number running `work`, then drains the queue.
    ///
    /// Every spawned thread is joined before this returns, including when a
    /// spawn fails partway or a worker panics; both surface as errors.
    pub fn map_range<F>(
        &self,
        range: Range<u64>,
        progress: &ProgressBar,
        work: F,
    ) -> Result<ResultCollection>
    where
        F: Fn(u64, Option<String>) -> ResultRecord + Sync,
    {
        let expected = range.end.saturating_sub(range.start) as usize;
        debug!(
            threads = expected,
            start = range.start,
            end = range.end,
            "spawning one worker per item"
        );

        let (tx, rx) = unbounded::<ResultRecord>();
        let work = &work;

        let outcome = crossbeam::thread::scope(|s| -> Result<()> {
            let mut handles = Vec::with_capacity(expected);
            let mut spawn_error = None;

            for n in range {
                let tx = tx.clone();
                let spawned = s
                    .builder()
                    .name(format!("item-{}", n))
                    .spawn(move |_| {
                        // Receiver outlives every worker; a failed send shows up as a drain shortfall
                        if tx.send(work(n, None)).is_ok() {
                            progress.inc(1);
                        }
                    });
                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(e) => {
                        spawn_error = Some(
                            anyhow::Error::new(e)
                                .context(format!("Failed to spawn worker for {}", n)),
                        );
                        break;
                    }
                }
            }

            let mut panicked = Vec::new();
            for handle in handles {
                let name = handle.thread().name().unwrap_or("worker").to_owned();
                if handle.join().is_err() {
                    panicked.push(name);
                }
            }

            if let Some(e) = spawn_error {
                return Err(e);
            }
            if !panicked.is_empty() {
                bail!(
                    "{} worker thread(s) panicked: {}",
                    panicked.len(),
                    panicked.join(", ")
                );
            }
            Ok(())
        })
        .map_err(|_| anyhow!("Worker scope panicked"))?;
        outcome?;
        drop(tx);

        let results: ResultCollection = rx.try_iter().take(expected).collect();
        if results.len() != expected {
            bail!(
                "Result queue drained {} records, expected {}",
                results.len(),
                expected
            );
        }

        Ok(results)
    }
}

impl Scheduler for PerItem {
    fn name(&self) -> &'static str {
        "spawn"
    }

    fn run(&self, range: Range<u64>, progress: &ProgressBar) -> Result<ResultCollection> {
        self.map_range(range, progress, process_one)
    }
}

/// Processes the range in increasing order on the calling thread.
pub struct Sequential;

impl Scheduler for Sequential {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn run(&self, range: Range<u64>, progress: &ProgressBar) -> Result<ResultCollection> {
        debug!(start = range.start, end = range.end, "running sequentially");

        let results = range
            .map(|n| {
                let record = process_one(n, None);
                progress.inc(1);
                record
            })
            .collect();

        Ok(results)
    }
}

pub fn scheduler_for(config: &RunConfig) -> Box<dyn Scheduler> {
    match config.strategy {
        StrategyKind::Pool => Box::new(Pooled::new(config.worker_count())),
        StrategyKind::Spawn => Box::new(PerItem),
        StrategyKind::Sequential => Box::new(Sequential),
    }
}

/// Records of one run plus the wall-clock time spent computing them.
#[derive(Debug)]
pub struct RunReport {
    pub strategy: &'static str,
    pub records: ResultCollection,
    pub elapsed: Duration,
}

/// Validates `config` and runs the range through the selected strategy.
pub fn execute(config: &RunConfig, progress: &ProgressBar) -> Result<RunReport> {
    config.validate()?;

    let scheduler = scheduler_for(config);
    let start_time = Instant::now();
    let records = scheduler
        .run(config.start..config.end, progress)
        .with_context(|| format!("Strategy '{}' failed", scheduler.name()))?;
    let elapsed = start_time.elapsed();

    info!(
        strategy = scheduler.name(),
        records = records.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "range processed"
    );

    Ok(RunReport {
        strategy: scheduler.name(),
        records,
        elapsed,
    })
}
