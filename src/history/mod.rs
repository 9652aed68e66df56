mod restore;
mod snapshot;

pub use restore::{DecodedRestore, RestoreQueue, RestoreToken};
pub use snapshot::Snapshot;

/// Snapshots retained unless configured otherwise
pub const DEFAULT_MAX_HISTORY: usize = 20;

/// Linear undo/redo over full-surface snapshots.
///
/// `cursor` is `None` only while the stack is empty; otherwise it always
/// indexes a stored snapshot.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Snapshot>,
    cursor: Option<usize>,
    max_len: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

impl History {
    /// Creates an empty history that keeps at most `max_len` snapshots
    pub fn new(max_len: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: None,
            max_len: max_len.max(1),
        }
    }

    /// Records a new state after the cursor, dropping any redo states.
    pub fn push(&mut self, snapshot: Snapshot) {
        if let Some(cursor) = self.cursor {
            self.snapshots.truncate(cursor + 1);
        }
        self.snapshots.push(snapshot);
        if self.snapshots.len() > self.max_len {
            let excess = self.snapshots.len() - self.max_len;
            self.snapshots.drain(..excess);
        }
        self.cursor = Some(self.snapshots.len() - 1);
        log::debug!(
            "History captured: {} of {} snapshots",
            self.snapshots.len(),
            self.max_len
        );
    }

    /// Steps back one state and returns the snapshot to restore
    pub fn undo(&mut self) -> Option<&Snapshot> {
        let cursor = self.cursor.filter(|c| *c > 0)?;
        self.cursor = Some(cursor - 1);
        self.current()
    }

    /// Steps forward one state and returns the snapshot to restore
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let cursor = self.cursor.filter(|c| c + 1 < self.snapshots.len())?;
        self.cursor = Some(cursor + 1);
        self.current()
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.cursor.and_then(|c| self.snapshots.get(c))
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.snapshots.len())
    }

    /// Cursor position, `None` when nothing has been captured
    pub fn position(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }
}
