use log::{debug, info, warn};
use serde::Serialize;

use crate::{
    capability::{PullStorer, Pulled, Puller, Storer},
    error::{CopyError, OperationError},
    record::Record,
};

/// Progress of a copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CopyReport {
    /// Records handed to the storer successfully.
    pub records: u64,
    /// Completed non-empty flushes.
    pub batches: u64,
}

/// Why a fill pass ended before the buffer was full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stop {
    EndOfStream,
    Failed(OperationError),
}

/// Result of one fill pass over the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fill {
    /// Length of the filled prefix.
    pub filled: usize,
    /// Set when the pass stopped early; `None` means the buffer is full.
    pub stop: Option<Stop>,
}

/// A flush that failed part way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFailure {
    /// Records stored before the failing one.
    pub stored: usize,
    pub error: OperationError,
}

/// Fill `buf` front to back, stopping at the first slot the puller does not
/// write.
pub fn pull<P: Puller + ?Sized>(p: &mut P, buf: &mut [Record]) -> Fill {
    for (i, slot) in buf.iter_mut().enumerate() {
        match p.pull(slot) {
            Ok(Pulled::Record) => {}
            Ok(Pulled::EndOfStream) => {
                return Fill {
                    filled: i,
                    stop: Some(Stop::EndOfStream),
                };
            }
            Err(e) => {
                return Fill {
                    filled: i,
                    stop: Some(Stop::Failed(e)),
                };
            }
        }
    }

    Fill {
        filled: buf.len(),
        stop: None,
    }
}

/// Hand every record in `buf` to the storer in order.
///
/// Returns the number stored, or where and why the flush gave up.
pub fn store<S: Storer + ?Sized>(s: &mut S, buf: &[Record]) -> Result<usize, StoreFailure> {
    for (i, record) in buf.iter().enumerate() {
        if let Err(error) = s.store(record) {
            return Err(StoreFailure { stored: i, error });
        }
    }

    Ok(buf.len())
}

/// Move records from the puller side of `ps` to its storer side, in batches
/// of at most `batch`.
///
/// Runs until the puller reports end of stream, which yields `Ok`, or until
/// either side fails. Whatever was pulled before a pull failure is flushed
/// before the failure is returned. A store failure wins over the pull
/// outcome of the same pass.
pub fn copy<PS: PullStorer + ?Sized>(ps: &mut PS, batch: usize) -> Result<CopyReport, CopyError> {
    if batch == 0 {
        return Err(CopyError::InvalidBatch);
    }

    let mut buf = vec![Record::default(); batch];
    let mut report = CopyReport::default();

    loop {
        let Fill { filled, stop } = pull(ps, &mut buf);

        if filled > 0 {
            match store(ps, &buf[..filled]) {
                Ok(stored) => {
                    report.records += stored as u64;
                    report.batches += 1;
                    debug!("[copy] flushed batch {} ({stored} records)", report.batches);
                }
                Err(StoreFailure { stored, error }) => {
                    report.records += stored as u64;
                    warn!("[copy] flush failed after {stored} of {filled} records: {error}");
                    return Err(CopyError::Store { error, report });
                }
            }
        }

        match stop {
            None => {}
            Some(Stop::EndOfStream) => {
                info!(
                    "[copy] end of stream after {} records in {} batches",
                    report.records, report.batches
                );
                return Ok(report);
            }
            Some(Stop::Failed(error)) => {
                warn!("[copy] pull failed: {error}");
                return Err(CopyError::Pull { error, report });
            }
        }
    }
}

#[cfg(test)]
#[path = "copier_tests.rs"]
mod tests;
