use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{BufWriter, Write};

use crate::compute::ResultRecord;
use crate::parallel::RunReport;

/// Writes one line per record followed by the timing line.
pub struct ReportWriter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(64 * 1024, inner),
        }
    }

    pub fn write_record(&mut self, record: &ResultRecord) -> Result<()> {
        writeln!(self.writer, "{}", record).context("Failed to write result line")?;
        Ok(())
    }

    pub fn write_report(&mut self, report: &RunReport) -> Result<()> {
        for record in &report.records {
            self.write_record(record)?;
        }
        writeln!(
            self.writer,
            "Done in {:.4} seconds",
            report.elapsed.as_secs_f64()
        )?;
        self.writer.flush().context("Failed to flush output")?;
        Ok(())
    }
}

pub fn create_progress_bar(total_items: usize) -> ProgressBar {
    let pb = ProgressBar::new(total_items as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} numbers ({eta})")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}
