//! Execution trace recording
//!
//! An optional observer the interpreter notifies as it executes: one event
//! per completed top-level statement and one per variable write. Useful for
//! building step-by-step execution listings or debugging evaluation order.
//! When no sink is installed the interpreter skips recording entirely.

use crate::memory::value::Value;

/// A single observed execution event
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    /// A top-level statement finished; `index` is its position in the
    /// program and `value` is the value it produced.
    Statement { index: usize, value: Value },
    /// A variable was written (assignment, declaration initializer, or
    /// increment/decrement).
    Assignment { name: String, value: Value },
}

/// Receiver for execution events
pub trait TraceSink {
    fn record(&mut self, event: TraceEvent);
}

/// A sink that keeps every event in order
#[derive(Debug, Default)]
pub struct TraceLog {
    events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn new() -> Self {
        TraceLog::default()
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }
}

impl TraceSink for TraceLog {
    fn record(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

/// Shared-handle sink, so a caller can hand the interpreter a recorder and
/// still read the events afterwards.
impl TraceSink for std::rc::Rc<std::cell::RefCell<TraceLog>> {
    fn record(&mut self, event: TraceEvent) {
        self.borrow_mut().record(event);
    }
}
