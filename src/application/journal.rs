//! Persistent exercise journal.
//!
//! Binds an [`ExerciseStore`] to a [`PreferenceStore`]: the list is read
//! once on open and written back in full after every mutation. A mutation
//! whose write fails is undone in memory before the error is returned.

use crate::domain::{seed_records, Entry, ExerciseRecord, RecordId, Result};
use crate::infrastructure::PreferenceStore;

use super::codec::{deserialize, serialize};
use super::store::{ExerciseStore, Snapshot, SubscriptionId};

/// Outcome of loading the persisted list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records restored from storage.
    pub loaded: usize,
    /// Malformed entries that were dropped.
    pub skipped: usize,
    /// Whether the list was seeded because storage had never been written.
    pub seeded: bool,
}

/// Exercise list backed by persistent storage.
pub struct Journal<S: PreferenceStore> {
    store: ExerciseStore,
    storage: S,
    key: String,
}

impl<S: PreferenceStore> Journal<S> {
    /// Opens the journal stored under `key`.
    ///
    /// A key that was never written yields the example records when
    /// `seed_examples` is set. Malformed entries are logged and skipped.
    ///
    /// # Errors
    /// Returns error if storage cannot be read.
    pub fn open(
        storage: S,
        key: impl Into<String>,
        seed_examples: bool,
    ) -> Result<(Self, LoadReport)> {
        let key = key.into();
        let mut report = LoadReport::default();

        let records = match storage.get_string_set(&key)? {
            Some(lines) => {
                let mut records = Vec::with_capacity(lines.len());
                for line in &lines {
                    match deserialize(line) {
                        Ok(record) => records.push(record),
                        Err(e) => {
                            tracing::warn!(entry = %line, "Skipping stored exercise: {}", e);
                            report.skipped += 1;
                        }
                    }
                }
                records
            }
            None if seed_examples => {
                report.seeded = true;
                seed_records()
            }
            None => Vec::new(),
        };

        report.loaded = records.len();
        tracing::info!(
            key = %key,
            loaded = report.loaded,
            skipped = report.skipped,
            seeded = report.seeded,
            "Exercise journal opened"
        );

        let journal = Self {
            store: ExerciseStore::with_records(records),
            storage,
            key,
        };

        Ok((journal, report))
    }

    /// Read access to the in-memory list.
    #[must_use]
    pub const fn store(&self) -> &ExerciseStore {
        &self.store
    }

    /// Appends a record and persists the list.
    ///
    /// # Errors
    /// Returns error if the list cannot be written.
    pub fn add(&mut self, record: ExerciseRecord) -> Result<RecordId> {
        let before = self.store.snapshot();
        let id = self.store.add(record);
        self.commit(before, id)
    }

    /// Replaces the record under `id` (or appends it) and persists the list.
    ///
    /// # Errors
    /// Returns error if the list cannot be written.
    pub fn update(&mut self, id: RecordId, record: ExerciseRecord) -> Result<RecordId> {
        let before = self.store.snapshot();
        let id = self.store.update(id, record);
        self.commit(before, id)
    }

    /// Removes the entry at `index` and persists the list.
    ///
    /// # Errors
    /// Returns `IndexOutOfBounds` or a storage error.
    pub fn remove(&mut self, index: usize) -> Result<Entry> {
        let before = self.store.snapshot();
        let entry = self.store.remove(index)?;
        self.commit(before, entry)
    }

    /// Removes the entry with `id` and persists the list.
    ///
    /// # Errors
    /// Returns `RecordNotFound` or a storage error.
    pub fn remove_by_id(&mut self, id: RecordId) -> Result<Entry> {
        let before = self.store.snapshot();
        let entry = self.store.remove_by_id(id)?;
        self.commit(before, entry)
    }

    /// Overwrites the list and persists it.
    ///
    /// # Errors
    /// Returns error if the list cannot be written.
    pub fn replace_all(&mut self, records: Vec<ExerciseRecord>) -> Result<()> {
        let before = self.store.snapshot();
        self.store.replace_all(records);
        self.commit(before, ())
    }

    /// Marks an entry for editing.
    ///
    /// # Errors
    /// Returns `RecordNotFound` if no entry has this id.
    pub fn select(&mut self, id: RecordId) -> Result<()> {
        self.store.select(id)
    }

    pub fn clear_selection(&mut self) {
        self.store.clear_selection();
    }

    /// Registers a listener called with the full list after every change.
    pub fn subscribe(&mut self, listener: impl FnMut(&[Entry]) + 'static) -> SubscriptionId {
        self.store.subscribe(listener)
    }

    /// Saves, or restores `before` and returns the storage error.
    fn commit<T>(&mut self, before: Snapshot, value: T) -> Result<T> {
        match self.save() {
            Ok(()) => Ok(value),
            Err(e) => {
                tracing::warn!(key = %self.key, "Save failed, reverting in-memory change: {}", e);
                self.store.restore(before);
                Err(e)
            }
        }
    }

    /// Writes the serialized list back to storage.
    ///
    /// # Errors
    /// Returns error if storage cannot be written.
    pub fn save(&mut self) -> Result<()> {
        let lines: Vec<String> = self.store.records().map(serialize).collect();
        self.storage.put_string_set(&self.key, &lines)?;
        tracing::debug!(key = %self.key, count = lines.len(), "Exercise journal saved");
        Ok(())
    }

    /// Serialized form of every record, in list order.
    #[must_use]
    pub fn export_lines(&self) -> Vec<String> {
        self.store.records().map(serialize).collect()
    }
}
