use std::sync::{Arc, PoisonError, RwLock};

use crate::clock::{Clock, SystemClock};
use crate::domain::call::{CallRecord, CallRecordInput};

/// Append-only history of completed calls for the lifetime of the process.
///
/// Appends are serialized behind the write lock so arrival order is preserved; readers get
/// a cloned snapshot and never observe a half-finished append. There is no update, delete
/// or eviction.
pub struct CallLedger {
    records: RwLock<Vec<CallRecord>>,
    clock: Arc<dyn Clock>,
}

impl Default for CallLedger {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl std::fmt::Debug for CallLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallLedger").field("len", &self.len()).finish_non_exhaustive()
    }
}

impl CallLedger {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { records: RwLock::new(Vec::new()), clock }
    }

    pub fn add(&self, input: CallRecordInput) -> CallRecord {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        // Stamp under the lock so timestamps are non-decreasing in ledger order.
        let record = CallRecord::from_input(input, self.clock.now());
        records.push(record.clone());
        record
    }

    pub fn all(&self) -> Vec<CallRecord> {
        self.records.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
