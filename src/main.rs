use anyhow::Result;
use clap::Parser;
use indicatif::ProgressBar;
use tracing_subscriber::EnvFilter;

use numprops::compute::{DEFAULT_END, DEFAULT_START};
use numprops::config::{RunConfig, StrategyKind};
use numprops::io::{create_progress_bar, ReportWriter};
use numprops::parallel::execute;

#[derive(Parser, Debug)]
#[command(name = "numprops")]
#[command(about = "Compute sums of squares and perfect numbers over a range", long_about = None)]
struct Args {
    /// Execution strategy
    #[arg(value_enum, default_value_t = StrategyKind::Pool)]
    strategy: StrategyKind,

    /// First number of the range (inclusive)
    #[arg(long, default_value_t = DEFAULT_START)]
    start: u64,

    /// End of the range (exclusive)
    #[arg(long, default_value_t = DEFAULT_END)]
    end: u64,

    /// Number of pool workers (defaults to number of CPU cores)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Disable progress bar
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl From<&Args> for RunConfig {
    fn from(args: &Args) -> Self {
        Self {
            start: args.start,
            end: args.end,
            jobs: args.jobs,
            strategy: args.strategy,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = RunConfig::from(&args);
    config.validate()?;

    let progress = if !args.quiet {
        create_progress_bar(config.range_len())
    } else {
        ProgressBar::hidden()
    };

    let report = execute(&config, &progress)?;
    progress.finish_and_clear();

    let mut writer = ReportWriter::new(std::io::stdout().lock());
    writer.write_report(&report)?;

    Ok(())
}
