//! Schedule store
//!
//! Owns the authoritative, ordered list of class entries and mirrors it to
//! a key-value store under a single key. Every mutation rewrites the whole
//! list (last write wins).

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, instrument, warn};

use crate::config::StorageConfig;
use crate::error::Result;
use crate::invariants::{assert_color_consistency, assert_unique_ids};
use crate::models::{ClassEntry, ClassForm, ColorIndex, EntryId};
use crate::storage::KeyValueStore;

/// The in-memory schedule and its persistence handle
#[derive(Debug)]
pub struct Schedule<S> {
    store: S,
    key: String,
    entries: Vec<ClassEntry>,
}

impl<S: KeyValueStore> Schedule<S> {
    /// Load the schedule stored under `key`
    ///
    /// A missing or blank value starts an empty schedule and writes it back.
    /// Unreadable data is logged and replaced by an empty schedule in memory;
    /// the stored payload stays untouched until the next save.
    #[instrument(skip(store, key), fields(key = %key.as_ref()))]
    pub fn load(store: S, key: impl AsRef<str>) -> Self {
        let key = key.as_ref().to_string();

        let raw = match store.get(&key) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to read saved schedule, starting empty");
                return Self::empty(store, key);
            }
        };

        let json = match raw.as_deref().map(str::trim) {
            Some(json) if !json.is_empty() => json,
            _ => {
                info!("No saved schedule, starting empty");
                let schedule = Self::empty(store, key);
                if let Err(e) = schedule.save() {
                    warn!(error = %e, "Failed to write empty schedule");
                }
                return schedule;
            }
        };

        match serde_json::from_str::<Vec<ClassEntry>>(json) {
            Ok(entries) => {
                let entries = repair_loaded(entries);
                info!(count = entries.len(), "Loaded schedule");
                Self {
                    store,
                    key,
                    entries,
                }
            }
            Err(e) => {
                warn!(error = %e, "Saved schedule is unreadable, starting empty");
                Self::empty(store, key)
            }
        }
    }

    /// Load according to the storage settings
    pub fn open(store: S, config: &StorageConfig) -> Self {
        if config.reset_on_startup {
            info!(key = %config.key, "Clearing saved schedule on startup");
            if let Err(e) = store.remove(&config.key) {
                warn!(error = %e, "Failed to clear saved schedule");
            }
        }
        Self::load(store, &config.key)
    }

    fn empty(store: S, key: String) -> Self {
        Self {
            store,
            key,
            entries: Vec::new(),
        }
    }

    /// Write the whole list to the store
    #[instrument(skip(self), fields(key = %self.key, count = self.entries.len()))]
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string(&self.entries)?;
        self.store.set(&self.key, &json)?;
        debug!("Schedule saved");
        Ok(())
    }

    /// Append a new entry built from the form
    #[instrument(skip(self, form), fields(name = %form.name, day = %form.day))]
    pub fn add(&mut self, form: ClassForm) -> Result<EntryId> {
        let color = self.color_for(&form.name);
        let entry = ClassEntry::from_form(form, color);
        let id = entry.id;

        self.entries.push(entry);
        self.check_invariants();
        self.save()?;

        info!(entry_id = %id, color = color.get(), "Class added");
        Ok(id)
    }

    /// Overwrite an entry in place, keeping its id and position
    ///
    /// Returns `None` if the entry no longer exists.
    #[instrument(skip(self, form), fields(name = %form.name))]
    pub fn replace(&mut self, id: EntryId, form: ClassForm) -> Result<Option<EntryId>> {
        let Some(pos) = self.position(id) else {
            debug!(entry_id = %id, "Entry to replace not found");
            return Ok(None);
        };

        let color = if self.entries[pos].name == form.name {
            self.entries[pos].color
        } else {
            self.color_excluding(&form.name, id)
        };

        let entry = &mut self.entries[pos];
        entry.name = form.name;
        entry.room = form.room;
        entry.credit = form.credit;
        entry.day = form.day;
        entry.start_time = form.start_time;
        entry.end_time = form.end_time;
        entry.color = color;

        self.check_invariants();
        self.save()?;

        info!(entry_id = %id, "Class updated");
        Ok(Some(id))
    }

    /// Remove one entry
    ///
    /// Returns `None` without saving if the entry no longer exists.
    #[instrument(skip(self))]
    pub fn remove_by_id(&mut self, id: EntryId) -> Result<Option<ClassEntry>> {
        let Some(pos) = self.position(id) else {
            debug!(entry_id = %id, "Entry to remove not found");
            return Ok(None);
        };

        let removed = self.entries.remove(pos);
        self.save()?;

        info!(entry_id = %id, name = %removed.name, "Class removed");
        Ok(Some(removed))
    }

    /// Remove every entry of a course
    ///
    /// Returns the removed entries; nothing is saved when none matched.
    #[instrument(skip(self))]
    pub fn remove_by_name(&mut self, name: &str) -> Result<Vec<ClassEntry>> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|e| e.name == name);
        self.entries = kept;

        if removed.is_empty() {
            debug!("No entries for course");
            return Ok(removed);
        }

        self.save()?;
        info!(count = removed.len(), "Course removed");
        Ok(removed)
    }

    /// Drop every entry and the stored value
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.store.remove(&self.key)?;
        info!("Schedule cleared");
        Ok(())
    }

    /// Color for a course: the existing one if the course is known,
    /// otherwise the next palette slot by entry count
    pub fn color_for(&self, name: &str) -> ColorIndex {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.color)
            .unwrap_or_else(|| ColorIndex::for_position(self.entries.len()))
    }

    /// `color_for` as if the entry `skip` were not in the list
    fn color_excluding(&self, name: &str, skip: EntryId) -> ColorIndex {
        self.entries
            .iter()
            .filter(|e| e.id != skip)
            .find(|e| e.name == name)
            .map(|e| e.color)
            .unwrap_or_else(|| ColorIndex::for_position(self.entries.len().saturating_sub(1)))
    }

    fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    fn check_invariants(&self) {
        assert_unique_ids(&self.entries);
        assert_color_consistency(&self.entries);
    }

    pub fn entries(&self) -> &[ClassEntry] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&ClassEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The persistence collaborator
    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Drop entries whose id was already seen and give every course the color
/// of its first entry
fn repair_loaded(entries: Vec<ClassEntry>) -> Vec<ClassEntry> {
    let mut seen: HashSet<EntryId> = HashSet::new();
    let mut colors: HashMap<String, ColorIndex> = HashMap::new();
    let mut repaired = Vec::with_capacity(entries.len());

    for mut entry in entries {
        if !seen.insert(entry.id) {
            warn!(entry_id = %entry.id, name = %entry.name, "Dropping entry with duplicate id");
            continue;
        }

        let color = *colors.entry(entry.name.clone()).or_insert(entry.color);
        if entry.color != color {
            warn!(
                entry_id = %entry.id,
                name = %entry.name,
                from = entry.color.get(),
                to = color.get(),
                "Aligning course color"
            );
            entry.color = color;
        }

        repaired.push(entry);
    }

    assert_unique_ids(&repaired);
    assert_color_consistency(&repaired);
    repaired
}
