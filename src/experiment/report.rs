//! Tabular experiment results and sinks.

use crate::error::{PricingError, Result};
use crate::search::Algorithm;
use std::fmt;
use std::io::Write;

/// One run: the seed it used and what it found.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetRow {
    pub seed: u64,
    pub best_revenue: f64,
    pub iterations: usize,
    pub trace: Vec<f64>,
}

/// All runs of one algorithm, one row per seed in seed order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sheet {
    pub algorithm: Algorithm,
    pub rows: Vec<SheetRow>,
}

impl Sheet {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            rows: Vec::new(),
        }
    }

    /// Highest best revenue across seeds.
    pub fn best_revenue(&self) -> Option<f64> {
        self.rows.iter().map(|r| r.best_revenue).reduce(f64::max)
    }

    /// Mean best revenue across seeds.
    pub fn mean_revenue(&self) -> Option<f64> {
        if self.rows.is_empty() {
            return None;
        }
        let total: f64 = self.rows.iter().map(|r| r.best_revenue).sum();
        Some(total / self.rows.len() as f64)
    }
}

/// Results of an experiment, one sheet per algorithm.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperimentReport {
    pub sheets: Vec<Sheet>,
}

impl ExperimentReport {
    pub fn sheet(&self, algorithm: Algorithm) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.algorithm == algorithm)
    }

    /// Writes every sheet to `sink`, then finishes it.
    pub fn write_to<S: ReportSink>(&self, sink: &mut S) -> Result<()> {
        for sheet in &self.sheets {
            sink.write_sheet(sheet)?;
        }
        sink.finish()
    }
}

/// Destination for experiment sheets.
pub trait ReportSink {
    fn write_sheet(&mut self, sheet: &Sheet) -> Result<()>;

    /// Called once after the last sheet.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes sheets as delimited records through a [`csv::Writer`].
///
/// Each sheet starts with a one-field `# <algorithm>` record, followed by
/// one record per seed: `seed`, `best_revenue`, `iterations`, then the
/// trace. Records differ in length, so the writer is flexible.
pub struct DelimitedSink<W: Write> {
    writer: csv::Writer<W>,
    delimiter: u8,
}

impl<W: Write> DelimitedSink<W> {
    /// Tab-separated output.
    pub fn new(writer: W) -> Self {
        Self::with_delimiter(writer, b'\t')
    }

    pub fn with_delimiter(writer: W, delimiter: u8) -> Self {
        let writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .has_headers(false)
            .from_writer(writer);
        Self { writer, delimiter }
    }

    /// Flushes buffered records and returns the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| PricingError::Io(e.into_error()))
    }
}

impl<W: Write> fmt::Debug for DelimitedSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelimitedSink")
            .field("delimiter", &(self.delimiter as char))
            .finish_non_exhaustive()
    }
}

impl<W: Write> ReportSink for DelimitedSink<W> {
    fn write_sheet(&mut self, sheet: &Sheet) -> Result<()> {
        self.writer.write_record([format!("# {}", sheet.algorithm)])?;
        for row in &sheet.rows {
            let mut record = vec![
                row.seed.to_string(),
                row.best_revenue.to_string(),
                row.iterations.to_string(),
            ];
            record.extend(row.trace.iter().map(f64::to_string));
            self.writer.write_record(&record)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
