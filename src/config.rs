use anyhow::{bail, Result};
use clap::ValueEnum;

use crate::compute::{DEFAULT_END, DEFAULT_START, MAX_N};

/// Which execution strategy drives the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StrategyKind {
    /// Fixed-size worker pool, results in input order
    #[default]
    Pool,
    /// One thread per number feeding a shared queue
    Spawn,
    /// Single-threaded loop
    Sequential,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub start: u64,
    pub end: u64,
    /// Pool size; `None` uses every logical CPU.
    pub jobs: Option<usize>,
    pub strategy: StrategyKind,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_START,
            end: DEFAULT_END,
            jobs: None,
            strategy: StrategyKind::default(),
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<()> {
        if self.start > self.end {
            bail!(
                "Invalid range: start ({}) is greater than end ({})",
                self.start,
                self.end
            );
        }
        if self.end > MAX_N + 1 {
            bail!(
                "Invalid range: end ({}) exceeds {}; larger sums of squares do not fit in u128",
                self.end,
                MAX_N + 1
            );
        }
        if self.jobs == Some(0) {
            bail!("Number of jobs must be at least 1");
        }
        Ok(())
    }

    pub fn range_len(&self) -> usize {
        self.end.saturating_sub(self.start) as usize
    }

    pub fn worker_count(&self) -> usize {
        self.jobs.unwrap_or_else(num_cpus::get)
    }
}
