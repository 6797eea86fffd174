//! In-memory exercise list with change notification.
//!
//! The store owns every record. Each record is keyed by a `RecordId`
//! handed out on insertion, so edits never depend on value equality.

use crate::domain::{AppError, Entry, ExerciseRecord, RecordId, Result};

/// Handle returned by [`ExerciseStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&[Entry])>;

/// Saved list contents, see [`ExerciseStore::snapshot`].
#[derive(Debug, Clone)]
pub struct Snapshot {
    entries: Vec<Entry>,
    selected: Option<RecordId>,
}

/// Ordered list of exercises plus the currently selected one.
#[derive(Default)]
pub struct ExerciseStore {
    entries: Vec<Entry>,
    selected: Option<RecordId>,
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl ExerciseStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `records` in order.
    #[must_use]
    pub fn with_records(records: Vec<ExerciseRecord>) -> Self {
        let mut store = Self::new();
        let entries: Vec<Entry> = records.into_iter().map(|r| store.make_entry(r)).collect();
        store.entries = entries;
        store
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn records(&self) -> impl Iterator<Item = &ExerciseRecord> {
        self.entries.iter().map(|e| &e.record)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn find(&self, id: RecordId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn position(&self, id: RecordId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Appends a record and returns its new id.
    pub fn add(&mut self, record: ExerciseRecord) -> RecordId {
        let entry = self.make_entry(record);
        let id = entry.id;
        self.entries.push(entry);
        tracing::debug!(%id, len = self.entries.len(), "Exercise added");
        self.notify();
        id
    }

    /// Removes the entry at `index`, keeping the others in order.
    ///
    /// # Errors
    /// Returns `IndexOutOfBounds` if `index` is past the end; the list is
    /// left untouched.
    pub fn remove(&mut self, index: usize) -> Result<Entry> {
        let len = self.entries.len();
        if index >= len {
            return Err(AppError::IndexOutOfBounds { index, len });
        }

        let entry = self.entries.remove(index);
        if self.selected == Some(entry.id) {
            self.selected = None;
        }
        tracing::debug!(id = %entry.id, index, "Exercise removed");
        self.notify();
        Ok(entry)
    }

    /// Removes the entry with the given id.
    ///
    /// # Errors
    /// Returns `RecordNotFound` if no entry has this id.
    pub fn remove_by_id(&mut self, id: RecordId) -> Result<Entry> {
        let index = self
            .position(id)
            .ok_or(AppError::RecordNotFound { id })?;
        self.remove(index)
    }

    /// Replaces the record stored under `id` in place, or appends it under
    /// a fresh id when `id` is not in the list. Returns the id the record
    /// ends up under.
    pub fn update(&mut self, id: RecordId, record: ExerciseRecord) -> RecordId {
        match self.position(id) {
            Some(index) => {
                self.entries[index].record = record;
                tracing::debug!(%id, "Exercise updated");
                self.notify();
                id
            }
            None => self.add(record),
        }
    }

    /// Overwrites the whole list. Every record gets a fresh id and the
    /// selection is cleared.
    pub fn replace_all(&mut self, records: Vec<ExerciseRecord>) {
        let entries: Vec<Entry> = records.into_iter().map(|r| self.make_entry(r)).collect();
        self.entries = entries;
        self.selected = None;
        tracing::debug!(len = self.entries.len(), "Exercise list replaced");
        self.notify();
    }

    /// Marks an entry as the one being edited.
    ///
    /// # Errors
    /// Returns `RecordNotFound` if no entry has this id.
    pub fn select(&mut self, id: RecordId) -> Result<()> {
        if self.find(id).is_none() {
            return Err(AppError::RecordNotFound { id });
        }
        self.selected = Some(id);
        Ok(())
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Entry> {
        self.selected.and_then(|id| self.find(id))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Registers a listener called with the full list after every mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&[Entry]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drops a listener. Returns false if it was not registered.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    /// Captures the entries and selection so a failed operation can be undone.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            entries: self.entries.clone(),
            selected: self.selected,
        }
    }

    /// Puts back a snapshot taken earlier. Ids handed out since then are
    /// not reused.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.entries = snapshot.entries;
        self.selected = snapshot.selected;
        tracing::debug!(len = self.entries.len(), "Exercise list restored");
        self.notify();
    }

    fn make_entry(&mut self, record: ExerciseRecord) -> Entry {
        self.next_id += 1;
        Entry {
            id: RecordId(self.next_id),
            record,
        }
    }

    fn notify(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener(&self.entries);
        }
    }
}
