use std::{
    io::{self, Stdout, Write},
    time::Duration,
};

use log::trace;
use shuttle_core::{OperationError, Record, Storer};
use shuttle_runtime::DEFAULT_TIMEOUT;

const ORIGIN: &str = "Pillar";

/// Simulated sink endpoint; "persists" by printing `Out:  <line>`.
pub struct Pillar<W = Stdout> {
    pub host: String,
    /// Not consulted.
    pub timeout: Duration,
    out: W,
}

impl Pillar<Stdout> {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            timeout: DEFAULT_TIMEOUT,
            out: io::stdout(),
        }
    }
}

impl<W> Pillar<W> {
    pub fn with_output<W2: Write>(self, out: W2) -> Pillar<W2> {
        Pillar {
            host: self.host,
            timeout: self.timeout,
            out,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn output(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Storer for Pillar<W> {
    fn store(&mut self, record: &Record) -> Result<(), OperationError> {
        trace!("[pillar] {} storing {} bytes", self.host, record.line.len());
        writeln!(self.out, "Out:  {}", record.line)
            .map_err(|e| OperationError::store(ORIGIN).with_detail(e.to_string()))
    }
}

#[cfg(test)]
#[path = "pillar_tests.rs"]
mod tests;
