//! Session-scoped table slot.
//!
//! The UI model is one table at a time: each upload replaces the slot
//! wholesale, every later computation in the session reads it. Keeping the
//! slot explicit (instead of ambient global state) lets the server own one
//! per process behind a lock.

use crate::types::Table;

/// The table currently loaded in this session, tagged with its source name.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub source: String,
    pub table: Table,
}

/// A single mutable slot holding at most one table.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<LoadedTable>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the slot with a freshly ingested table. Any prior table (and
    /// its derived column) is discarded.
    pub fn load(&mut self, source: impl Into<String>, table: Table) {
        self.current = Some(LoadedTable {
            source: source.into(),
            table,
        });
    }

    pub fn loaded(&self) -> Option<&LoadedTable> {
        self.current.as_ref()
    }

    pub fn loaded_mut(&mut self) -> Option<&mut LoadedTable> {
        self.current.as_mut()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Column;

    fn table_with_rows(n: usize) -> Table {
        let mut table = Table::new();
        table.add_column(Column::numeric("real", vec![1.0; n]));
        table
    }

    #[test]
    fn test_empty_session() {
        let session = Session::new();
        assert!(session.loaded().is_none());
    }

    #[test]
    fn test_load_replaces_wholesale() {
        let mut session = Session::new();
        session.load("first.csv", table_with_rows(2));
        session.load("second.csv", table_with_rows(5));

        let loaded = session.loaded().unwrap();
        assert_eq!(loaded.source, "second.csv");
        assert_eq!(loaded.table.row_count(), 5);
    }

    #[test]
    fn test_clear() {
        let mut session = Session::new();
        session.load("datos.csv", table_with_rows(1));
        session.clear();
        assert!(session.loaded().is_none());
    }
}
