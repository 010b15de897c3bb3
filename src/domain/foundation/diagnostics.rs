//! Append-only diagnostics log.
//!
//! Used by the client context for widget and signing failures and by each
//! pingback for its validation errors. Entries are never removed.

/// Ordered, append-only list of human-readable diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<String>,
}

impl Diagnostics {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn record(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    /// Returns the recorded entries in insertion order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Returns an owned copy of the entries.
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.clone()
    }

    /// Returns all entries joined by newlines.
    pub fn summary(&self) -> String {
        self.entries.join("\n")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
