use std::fmt;

use thiserror::Error;

use crate::copier::CopyReport;

/// Which side of the copy an operation error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Pull,
    Store,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Pull => f.write_str("reading data from"),
            Op::Store => f.write_str("storing data to"),
        }
    }
}

/// A failed pull or store.
///
/// End of stream is not an error; pullers report it through
/// [`Pulled::EndOfStream`](crate::Pulled::EndOfStream).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct OperationError {
    pub op: Op,
    /// Name of the capability that failed, e.g. an endpoint label.
    pub origin: String,
    pub detail: Option<String>,
}

impl OperationError {
    pub fn pull(origin: impl Into<String>) -> Self {
        Self {
            op: Op::Pull,
            origin: origin.into(),
            detail: None,
        }
    }

    pub fn store(origin: impl Into<String>) -> Self {
        Self {
            op: Op::Store,
            origin: origin.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error {} {}", self.op, self.origin)?;
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        Ok(())
    }
}

/// Why a copy stopped short of the end of stream.
///
/// Failures carry the progress made before the failing operation.
#[derive(Debug, Error)]
pub enum CopyError {
    #[error("batch size must be at least 1")]
    InvalidBatch,

    #[error("{error}")]
    Pull {
        error: OperationError,
        report: CopyReport,
    },

    #[error("{error}")]
    Store {
        error: OperationError,
        report: CopyReport,
    },
}

impl CopyError {
    /// The failed operation, if the copy got as far as running.
    pub fn operation(&self) -> Option<&OperationError> {
        match self {
            CopyError::InvalidBatch => None,
            CopyError::Pull { error, .. } | CopyError::Store { error, .. } => Some(error),
        }
    }

    /// Progress made before the failure.
    pub fn report(&self) -> Option<&CopyReport> {
        match self {
            CopyError::InvalidBatch => None,
            CopyError::Pull { report, .. } | CopyError::Store { report, .. } => Some(report),
        }
    }
}
