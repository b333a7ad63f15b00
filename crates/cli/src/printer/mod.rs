use std::io::{self, Write};

use serde_json::json;
use shuttle_core::{CopyError, CopyReport};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text; only failures are printed.
    #[default]
    Human,
    /// One JSON object describing the outcome.
    Json,
}

#[derive(Debug, Clone, Default)]
pub struct PrinterConfig {
    pub format: OutputFormat,
    /// Print records and batches copied to the error stream.
    pub show_summary: bool,
}

/// How a copy ended, flattened for printing.
#[derive(Debug, Clone, Copy)]
struct Outcome<'a> {
    status: &'static str,
    report: CopyReport,
    error: Option<&'a CopyError>,
}

impl<'a> Outcome<'a> {
    fn of(outcome: &'a Result<CopyReport, CopyError>) -> Self {
        match outcome {
            Ok(report) => Self {
                status: "end_of_stream",
                report: *report,
                error: None,
            },
            Err(e) => Self {
                status: match e {
                    CopyError::InvalidBatch => "invalid_batch",
                    CopyError::Pull { .. } => "pull_failed",
                    CopyError::Store { .. } => "store_failed",
                },
                report: e.report().copied().unwrap_or_default(),
                error: Some(e),
            },
        }
    }
}

/// Reports the end of a copy run.
pub trait OutcomePrinter {
    fn print_outcome(&mut self, outcome: &Result<CopyReport, CopyError>) -> io::Result<()>;
}

/// Prints the terminal error, if any, the way a plain program would.
///
/// End of stream is the normal way to stop and prints nothing.
pub struct HumanPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
}

impl<W: Write, E: Write> HumanPrinter<W, E> {
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        Self { out, err, cfg }
    }

    pub fn stdout(cfg: PrinterConfig) -> HumanPrinter<io::Stdout, io::Stderr> {
        HumanPrinter {
            out: io::stdout(),
            err: io::stderr(),
            cfg,
        }
    }
}

impl<W: Write, E: Write> OutcomePrinter for HumanPrinter<W, E> {
    fn print_outcome(&mut self, outcome: &Result<CopyReport, CopyError>) -> io::Result<()> {
        let o = Outcome::of(outcome);

        if let Some(e) = o.error {
            writeln!(self.out, "{e}")?;
        }

        if self.cfg.show_summary {
            writeln!(
                self.err,
                "[copy] {}: {} records in {} batches",
                o.status, o.report.records, o.report.batches
            )?;
        }

        Ok(())
    }
}

pub struct JsonPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
}

impl<W: Write, E: Write> JsonPrinter<W, E> {
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        Self { out, err, cfg }
    }

    pub fn stdout(cfg: PrinterConfig) -> JsonPrinter<io::Stdout, io::Stderr> {
        JsonPrinter {
            out: io::stdout(),
            err: io::stderr(),
            cfg,
        }
    }
}

impl<W: Write, E: Write> OutcomePrinter for JsonPrinter<W, E> {
    fn print_outcome(&mut self, outcome: &Result<CopyReport, CopyError>) -> io::Result<()> {
        let o = Outcome::of(outcome);

        let obj = json!({
            "status": o.status,
            "records": o.report.records,
            "batches": o.report.batches,
            "error": o.error.map(|e| e.to_string()),
        });
        writeln!(self.out, "{obj}")?;

        if self.cfg.show_summary {
            let summary = json!({
                "type": "summary",
                "report": o.report,
            });
            writeln!(self.err, "{summary}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
