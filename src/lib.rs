//! Sum-of-squares and perfect-number properties over an integer range, computed
//! with interchangeable execution strategies.

pub mod compute;
pub mod config;
pub mod io;
pub mod parallel;

pub use compute::{
    is_perfect, process_one, process_range, sum_of_squares, ResultCollection, ResultRecord,
};
pub use config::{RunConfig, StrategyKind};
pub use parallel::{execute, scheduler_for, PerItem, Pooled, RunReport, Scheduler, Sequential};
