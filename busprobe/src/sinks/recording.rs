use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::{TraceRecord, TraceSink};

/// Sink that keeps every record it receives.
///
/// Clones share the same storage, so keep one clone for querying and hand
/// the other to the dispatcher:
///
/// ```ignore
/// let sink = RecordingSink::new();
/// let dispatcher = TraceDispatcher::builder(sink.clone()).build()?;
///
/// // Later, from any thread:
/// assert_eq!(sink.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct RecordingSink {
    inner: Arc<Mutex<Vec<TraceRecord<'static>>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records in arrival order.
    pub fn records(&self) -> Vec<TraceRecord<'static>> {
        self.lock().clone()
    }

    /// Number of records received.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Most recent record.
    pub fn last(&self) -> Option<TraceRecord<'static>> {
        self.lock().last().cloned()
    }

    /// Remove and return all records.
    pub fn take(&self) -> Vec<TraceRecord<'static>> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<TraceRecord<'static>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TraceSink for RecordingSink {
    fn emit(&self, record: &TraceRecord<'_>) {
        self.lock().push(record.clone().into_owned());
    }
}

impl fmt::Debug for RecordingSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingSink")
            .field("records", &self.len())
            .finish()
    }
}
