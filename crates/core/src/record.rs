use std::fmt;

/// A single unit of data moved from a puller to a storer.
///
/// Records carry no identity; the copier allocates a buffer of empty
/// records and pullers overwrite the slots in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub line: String,
}

impl Record {
    pub fn new(line: impl Into<String>) -> Self {
        Self { line: line.into() }
    }

    /// Replace the contents of this slot, reusing its allocation.
    pub fn set(&mut self, line: &str) {
        self.line.clear();
        self.line.push_str(line);
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}
