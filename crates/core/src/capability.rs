use crate::{error::OperationError, record::Record};

/// Outcome of a single successful pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pulled {
    /// The slot was written.
    Record,
    /// The source is exhausted; the slot is untouched.
    EndOfStream,
}

/// Source capability: produces one record per call.
pub trait Puller {
    fn pull(&mut self, record: &mut Record) -> Result<Pulled, OperationError>;
}

/// Sink capability: persists one record per call.
pub trait Storer {
    fn store(&mut self, record: &Record) -> Result<(), OperationError>;
}

/// Anything that can both pull and store.
///
/// There is nothing to implement: every `Puller + Storer` is a `PullStorer`.
pub trait PullStorer: Puller + Storer {}

impl<T: Puller + Storer + ?Sized> PullStorer for T {}

impl<T: Puller + ?Sized> Puller for &mut T {
    fn pull(&mut self, record: &mut Record) -> Result<Pulled, OperationError> {
        (**self).pull(record)
    }
}

impl<T: Puller + ?Sized> Puller for Box<T> {
    fn pull(&mut self, record: &mut Record) -> Result<Pulled, OperationError> {
        (**self).pull(record)
    }
}

impl<T: Storer + ?Sized> Storer for &mut T {
    fn store(&mut self, record: &Record) -> Result<(), OperationError> {
        (**self).store(record)
    }
}

impl<T: Storer + ?Sized> Storer for Box<T> {
    fn store(&mut self, record: &Record) -> Result<(), OperationError> {
        (**self).store(record)
    }
}

/// Composes an independent puller and storer into one [`PullStorer`].
///
/// Each capability is delegated to its own part, so the two halves can be
/// swapped independently (including for `Box<dyn Puller>` and
/// `Box<dyn Storer>`).
#[derive(Debug, Default)]
pub struct System<P, S> {
    puller: P,
    storer: S,
}

impl<P: Puller, S: Storer> System<P, S> {
    pub fn new(puller: P, storer: S) -> Self {
        Self { puller, storer }
    }
}

impl<P, S> System<P, S> {
    pub fn puller(&self) -> &P {
        &self.puller
    }

    pub fn storer(&self) -> &S {
        &self.storer
    }

    pub fn into_parts(self) -> (P, S) {
        (self.puller, self.storer)
    }
}

impl<P: Puller, S> Puller for System<P, S> {
    fn pull(&mut self, record: &mut Record) -> Result<Pulled, OperationError> {
        self.puller.pull(record)
    }
}

impl<P, S: Storer> Storer for System<P, S> {
    fn store(&mut self, record: &Record) -> Result<(), OperationError> {
        self.storer.store(record)
    }
}

#[cfg(test)]
#[path = "capability_tests.rs"]
mod tests;
