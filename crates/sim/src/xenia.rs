use std::{
    io::{self, Stdout, Write},
    time::Duration,
};

use log::trace;
use rand::{Rng, rngs::StdRng};
use shuttle_core::{OperationError, Pulled, Puller, Record};
use shuttle_runtime::DEFAULT_TIMEOUT;

const ORIGIN: &str = "Xenia";
const LINE: &str = "data";

/// What a single roll of the simulated source means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Roll {
    Record,
    EndOfStream,
    Failure,
}

impl Roll {
    /// Rolls are uniform over `0..10`: two faces end the stream, one fails.
    pub fn from_face(face: u32) -> Self {
        match face {
            1 | 9 => Roll::EndOfStream,
            5 => Roll::Failure,
            _ => Roll::Record,
        }
    }
}

/// Simulated source endpoint.
///
/// Every pull rolls the injected random source; successful pulls write
/// `"data"` into the slot and echo it as `In:  data`.
pub struct Xenia<R = StdRng, W = Stdout> {
    pub host: String,
    /// Not consulted.
    pub timeout: Duration,
    rng: R,
    echo: W,
}

impl<R: Rng> Xenia<R, Stdout> {
    /// Pass a seeded generator for a reproducible run.
    pub fn with_host_and_rng(host: impl Into<String>, rng: R) -> Self {
        Self {
            host: host.into(),
            timeout: DEFAULT_TIMEOUT,
            rng,
            echo: io::stdout(),
        }
    }
}

impl<R, W> Xenia<R, W> {
    pub fn with_echo<W2: Write>(self, echo: W2) -> Xenia<R, W2> {
        Xenia {
            host: self.host,
            timeout: self.timeout,
            rng: self.rng,
            echo,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn echo(&self) -> &W {
        &self.echo
    }
}

impl<R: Rng, W: Write> Puller for Xenia<R, W> {
    fn pull(&mut self, record: &mut Record) -> Result<Pulled, OperationError> {
        let face = self.rng.random_range(0..10);
        trace!("[xenia] {} rolled {face}", self.host);

        match Roll::from_face(face) {
            Roll::EndOfStream => Ok(Pulled::EndOfStream),
            Roll::Failure => Err(OperationError::pull(ORIGIN)),
            Roll::Record => {
                record.set(LINE);
                writeln!(self.echo, "In:  {}", record.line)
                    .map_err(|e| OperationError::pull(ORIGIN).with_detail(e.to_string()))?;
                Ok(Pulled::Record)
            }
        }
    }
}

#[cfg(test)]
#[path = "xenia_tests.rs"]
mod tests;
