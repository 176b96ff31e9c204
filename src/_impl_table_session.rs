use super::{RunId, TableError, TableRun, TableSession, TruthTable};
use log::debug;
use std::fmt::{Display, Error, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};

impl TableSession {
    /// Create a new session with no runs issued yet.
    pub fn new() -> TableSession {
        TableSession {
            issued: AtomicU64::new(0),
        }
    }

    /// Start one pipeline run for `expression`. The run is stamped with a fresh [RunId]
    /// before the pipeline executes, so even runs racing on different threads obtain
    /// identifiers in start order.
    pub fn generate(&self, expression: &str) -> TableRun {
        let id = RunId(self.issued.fetch_add(1, Ordering::SeqCst) + 1);
        TableRun {
            id,
            result: TruthTable::generate(expression),
        }
    }

    /// True if no newer run has been started since `run` was issued. A host applying
    /// "last write wins" simply drops any completed run for which this returns false.
    pub fn is_current(&self, run: &TableRun) -> bool {
        let newest = self.issued.load(Ordering::SeqCst);
        if run.id.0 != newest {
            debug!("run {} is stale (newest issued is {})", run.id, newest);
            return false;
        }
        true
    }
}

impl Default for TableSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRun {
    /// The identifier this run was stamped with when it started.
    pub fn id(&self) -> RunId {
        self.id
    }

    /// The table (or error) the run produced.
    pub fn result(&self) -> &Result<TruthTable, TableError> {
        &self.result
    }

    /// Consume the run, keeping only the produced table (or error).
    pub fn into_result(self) -> Result<TruthTable, TableError> {
        self.result
    }
}

impl Display for RunId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.0)
    }
}
