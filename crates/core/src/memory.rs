//! In-memory capabilities with scripted behaviour.
//!
//! Both sides can share a [`Journal`], which records every call in the order
//! it happened. Runs of consecutive stores in the journal are exactly the
//! flushes the copier performed.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use crate::{
    capability::{Pulled, Puller, Storer},
    error::OperationError,
    record::Record,
};

const PULLER_ORIGIN: &str = "scripted puller";
const STORER_ORIGIN: &str = "collecting storer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Pulled(String),
    EndOfStream,
    PullFailed,
    Stored(String),
    StoreFailed(String),
}

/// Shared, ordered log of capability calls.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    events: Rc<RefCell<Vec<Event>>>,
}

impl Journal {
    fn push(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Successful stores grouped into flushes.
    pub fn flushes(&self) -> Vec<Vec<String>> {
        let mut groups: Vec<Vec<String>> = Vec::new();
        let mut in_flush = false;

        for event in self.events.borrow().iter() {
            match event {
                Event::Stored(line) => {
                    if in_flush && let Some(group) = groups.last_mut() {
                        group.push(line.clone());
                    } else {
                        groups.push(vec![line.clone()]);
                    }
                    in_flush = true;
                }
                _ => in_flush = false,
            }
        }

        groups
    }
}

/// Yields a fixed sequence of lines, then end of stream forever.
#[derive(Debug, Default)]
pub struct ScriptedPuller {
    lines: VecDeque<String>,
    calls: usize,
    fail_at: Option<usize>,
    journal: Option<Journal>,
}

impl ScriptedPuller {
    pub fn new<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Fail the `call`-th pull (1-based) instead of yielding.
    ///
    /// The scripted line for that call is not consumed.
    pub fn failing_at(mut self, call: usize) -> Self {
        self.fail_at = Some(call);
        self
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = Some(journal);
        self
    }

    /// Number of pulls seen so far.
    pub fn calls(&self) -> usize {
        self.calls
    }

    fn note(&self, event: Event) {
        if let Some(journal) = &self.journal {
            journal.push(event);
        }
    }
}

impl Puller for ScriptedPuller {
    fn pull(&mut self, record: &mut Record) -> Result<Pulled, OperationError> {
        self.calls += 1;

        if self.fail_at == Some(self.calls) {
            self.note(Event::PullFailed);
            return Err(OperationError::pull(PULLER_ORIGIN)
                .with_detail(format!("scripted failure on call {}", self.calls)));
        }

        match self.lines.pop_front() {
            Some(line) => {
                record.set(&line);
                self.note(Event::Pulled(line));
                Ok(Pulled::Record)
            }
            None => {
                self.note(Event::EndOfStream);
                Ok(Pulled::EndOfStream)
            }
        }
    }
}

/// Keeps every stored line in memory.
#[derive(Debug, Default)]
pub struct CollectingStorer {
    stored: Vec<String>,
    calls: usize,
    fail_at: Option<usize>,
    journal: Option<Journal>,
}

impl CollectingStorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `call`-th store (1-based); the record is not kept.
    pub fn failing_at(mut self, call: usize) -> Self {
        self.fail_at = Some(call);
        self
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = Some(journal);
        self
    }

    pub fn stored(&self) -> &[String] {
        &self.stored
    }

    fn note(&self, event: Event) {
        if let Some(journal) = &self.journal {
            journal.push(event);
        }
    }
}

impl Storer for CollectingStorer {
    fn store(&mut self, record: &Record) -> Result<(), OperationError> {
        self.calls += 1;

        if self.fail_at == Some(self.calls) {
            self.note(Event::StoreFailed(record.line.clone()));
            return Err(OperationError::store(STORER_ORIGIN)
                .with_detail(format!("scripted failure on call {}", self.calls)));
        }

        self.stored.push(record.line.clone());
        self.note(Event::Stored(record.line.clone()));
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
