use dnsprofiler_domain::{Classification, FrequencyLevel};
use rustc_hash::FxHashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Query name to occurrence count, names kept exactly as received.
pub type FrequencyTable = FxHashMap<String, u64>;

#[derive(Debug, Default)]
struct Tables {
    internal: FrequencyTable,
    external: FrequencyTable,
}

impl Tables {
    fn table(&self, classification: Classification) -> &FrequencyTable {
        match classification {
            Classification::Internal => &self.internal,
            Classification::External => &self.external,
        }
    }

    fn table_mut(&mut self, classification: Classification) -> &mut FrequencyTable {
        match classification {
            Classification::Internal => &mut self.internal,
            Classification::External => &mut self.external,
        }
    }
}

/// Per-classification query name counters.
///
/// Both tables sit behind one exclusive lock so that increments, ranking and
/// resets are serialized against each other. Every method takes the lock for
/// its own duration only; none of them suspend while holding it.
#[derive(Debug, Default)]
pub struct FrequencyStore {
    tables: Mutex<Tables>,
}

impl FrequencyStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn increment(&self, classification: Classification, name: &str) {
        bump(self.lock().table_mut(classification), name);
    }

    /// Counts every name of one message under a single lock acquisition.
    pub fn increment_all<S: AsRef<str>>(&self, classification: Classification, names: &[S]) {
        let mut tables = self.lock();
        let table = tables.table_mut(classification);
        for name in names {
            bump(table, name.as_ref());
        }
    }

    pub fn count(&self, classification: Classification, name: &str) -> u64 {
        self.lock()
            .table(classification)
            .get(name)
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct names seen since the last reset.
    pub fn distinct_names(&self, classification: Classification) -> usize {
        self.lock().table(classification).len()
    }

    /// Ranked view of the current counts; see [`FrequencyLevel::rank`].
    pub fn snapshot(&self, classification: Classification, max_levels: usize) -> Vec<FrequencyLevel> {
        FrequencyLevel::rank(self.lock().table(classification), max_levels)
    }

    pub fn reset(&self, classification: Classification) {
        *self.lock().table_mut(classification) = FrequencyTable::default();
    }

    /// Empties both tables in one critical section and hands back what they
    /// held, internal first.
    pub fn take_all(&self) -> [(Classification, FrequencyTable); 2] {
        let mut tables = self.lock();
        Classification::ALL.map(|c| (c, std::mem::take(tables.table_mut(c))))
    }
}

fn bump(table: &mut FrequencyTable, name: &str) {
    match table.get_mut(name) {
        Some(count) => *count += 1,
        None => {
            table.insert(name.to_owned(), 1);
        }
    }
}
