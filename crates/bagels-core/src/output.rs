//! # Output Sinks
//!
//! Where a basket writes its notices and receipts.
//!
//! ```text
//! Basket ──► OutputSink::write_line ──┬──► StdoutSink  (the till)
//!                                     └──► MemorySink  (tests, JSON mode)
//! ```
//!
//! Callers that need an outcome read the return value of the basket method;
//! the sink only carries the human-facing text.

use std::fmt;
use std::sync::{Arc, Mutex};

/// Plain-text notices the basket emits, with their exact wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    CapacityExceeded,
    NotInBasket,
    ProductNotFound,
}

impl Notice {
    pub const fn text(&self) -> &'static str {
        match self {
            Notice::CapacityExceeded => "Basket size exceeded!",
            Notice::NotInBasket => "Item not in basket!",
            Notice::ProductNotFound => "Product not found!",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// A line-oriented text destination.
pub trait OutputSink: Send {
    fn write_line(&mut self, line: &str);

    fn notice(&mut self, notice: Notice) {
        self.write_line(notice.text());
    }
}

/// Writes to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_line(&mut self, line: &str) {
        println!("{}", line);
    }
}

/// Collects lines in memory.
///
/// Clones share the same buffer: hand one clone to the basket and keep one
/// to read from.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("sink mutex poisoned").clone()
    }

    /// Lines with blank ones dropped, the way a reader splitting on newlines
    /// and skipping empties would see them.
    pub fn non_empty_lines(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|l| !l.is_empty())
            .collect()
    }

    pub fn clear(&self) {
        self.lines.lock().expect("sink mutex poisoned").clear();
    }
}

impl OutputSink for MemorySink {
    fn write_line(&mut self, line: &str) {
        self.lines
            .lock()
            .expect("sink mutex poisoned")
            .push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_text_is_exact() {
        assert_eq!(Notice::CapacityExceeded.to_string(), "Basket size exceeded!");
        assert_eq!(Notice::NotInBasket.to_string(), "Item not in basket!");
        assert_eq!(Notice::ProductNotFound.to_string(), "Product not found!");
    }

    #[test]
    fn test_memory_sink_clones_share_buffer() {
        let reader = MemorySink::new();
        let mut writer = reader.clone();

        writer.write_line("first");
        writer.write_line("");
        writer.notice(Notice::NotInBasket);

        assert_eq!(reader.lines().len(), 3);
        assert_eq!(reader.non_empty_lines(), vec!["first", "Item not in basket!"]);

        reader.clear();
        assert!(writer.lines().is_empty());
    }
}
