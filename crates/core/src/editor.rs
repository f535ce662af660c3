//! Schedule editor
//!
//! Runs one user action to completion: validate, ask for confirmation where
//! needed, mutate the schedule (which persists), and recompute the views on
//! request.
//!
//! Editing is staged: `begin_edit` only remembers which entry is being
//! edited and hands back a prefilled form. The entry is replaced when the
//! form is submitted again, so abandoning an edit loses nothing.

use tracing::{debug, info, instrument};

use crate::error::{Error, Result};
use crate::invariants::assert_entry_invariants;
use crate::models::{ClassEntry, ClassForm, EntryId};
use crate::projection::{project, Grid};
use crate::schedule::Schedule;
use crate::storage::KeyValueStore;
use crate::summary::{group_by_name, summarize, CourseGroup, Summary};
use crate::time_grid::TimeGrid;
use crate::validation::{validate_on_grid, ValidationOutcome};

/// Answers the prompts the editor raises
pub trait Confirm {
    /// The candidate overlaps `existing`; proceed anyway?
    fn confirm_conflict(&mut self, candidate: &ClassForm, existing: &ClassEntry) -> bool;

    /// Delete all `count` entries of course `name`?
    fn confirm_delete(&mut self, name: &str, count: usize) -> bool;
}

/// Gives the same answer to every prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm_conflict(&mut self, _candidate: &ClassForm, _existing: &ClassEntry) -> bool {
        self.0
    }

    fn confirm_delete(&mut self, _name: &str, _count: usize) -> bool {
        self.0
    }
}

/// What a submission did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Added(EntryId),
    Updated(EntryId),
    /// The user declined to overlap this entry; nothing changed
    Declined { conflict_with: ClassEntry },
}

impl SubmitOutcome {
    /// Id of the stored entry, treating a declined overlap as an error
    pub fn into_result(self) -> Result<EntryId> {
        match self {
            SubmitOutcome::Added(id) | SubmitOutcome::Updated(id) => Ok(id),
            SubmitOutcome::Declined { conflict_with } => Err(Error::Conflict {
                with: conflict_with.name,
            }),
        }
    }
}

/// What a course deletion did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(usize),
    Declined,
    NotFound,
}

/// An edit in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditDraft {
    pub entry_id: EntryId,
}

/// Everything the presentation layer renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleView<'a> {
    pub grid: Grid<'a>,
    pub groups: Vec<CourseGroup>,
    pub summary: Summary,
}

/// Owns the schedule and sequences user actions against it
#[derive(Debug)]
pub struct ScheduleEditor<S> {
    schedule: Schedule<S>,
    grid: TimeGrid,
    draft: Option<EditDraft>,
}

impl<S: KeyValueStore> ScheduleEditor<S> {
    pub fn new(schedule: Schedule<S>, grid: TimeGrid) -> Self {
        Self {
            schedule,
            grid,
            draft: None,
        }
    }

    /// Validate and store a submitted form
    ///
    /// With an edit staged, the draft's entry is replaced; otherwise a new
    /// entry is added. Hard validation failures are returned as errors and
    /// leave the schedule unchanged.
    #[instrument(skip(self, form, confirm), fields(name = %form.name, editing = self.draft.is_some()))]
    pub fn submit(&mut self, form: ClassForm, confirm: &mut impl Confirm) -> Result<SubmitOutcome> {
        let editing = self.draft.map(|d| d.entry_id);
        let others = self
            .schedule
            .entries()
            .iter()
            .filter(|e| Some(e.id) != editing);

        match validate_on_grid(&form, others, &self.grid) {
            ValidationOutcome::Ok => {}
            ValidationOutcome::Invalid(reason) => {
                debug!(reason = ?reason, "Submission rejected");
                return Err(reason.into());
            }
            ValidationOutcome::Conflict { with } => {
                if !confirm.confirm_conflict(&form, &with) {
                    info!(conflict_with = %with.name, "Overlap declined");
                    return Ok(SubmitOutcome::Declined {
                        conflict_with: with,
                    });
                }
                info!(conflict_with = %with.name, "Overlap accepted");
            }
        }

        let outcome = match editing {
            Some(id) => match self.schedule.replace(id, form.clone())? {
                Some(id) => SubmitOutcome::Updated(id),
                // Entry vanished while staged; keep the user's input
                None => SubmitOutcome::Added(self.schedule.add(form)?),
            },
            None => SubmitOutcome::Added(self.schedule.add(form)?),
        };
        self.draft = None;

        if let SubmitOutcome::Added(id) | SubmitOutcome::Updated(id) = &outcome {
            if let Some(entry) = self.schedule.get(*id) {
                assert_entry_invariants(entry, &self.grid);
            }
        }

        Ok(outcome)
    }

    /// Stage an edit and return the entry's current values
    ///
    /// Returns `None` if the entry no longer exists.
    #[instrument(skip(self))]
    pub fn begin_edit(&mut self, id: EntryId) -> Option<ClassForm> {
        let Some(entry) = self.schedule.get(id) else {
            debug!(entry_id = %id, "Entry to edit not found");
            return None;
        };

        self.draft = Some(EditDraft { entry_id: id });
        Some(entry.to_form())
    }

    /// Abandon the staged edit
    pub fn cancel_edit(&mut self) {
        if let Some(draft) = self.draft.take() {
            debug!(entry_id = %draft.entry_id, "Edit cancelled");
        }
    }

    /// Look up an entry that is expected to exist
    pub fn entry(&self, id: EntryId) -> Result<&ClassEntry> {
        self.schedule
            .get(id)
            .ok_or_else(|| Error::NotFound(format!("class entry {id}")))
    }

    pub fn draft(&self) -> Option<EditDraft> {
        self.draft
    }

    /// Delete every entry of a course after confirmation
    #[instrument(skip(self, confirm))]
    pub fn delete_course(&mut self, name: &str, confirm: &mut impl Confirm) -> Result<DeleteOutcome> {
        let count = self
            .schedule
            .entries()
            .iter()
            .filter(|e| e.name == name)
            .count();
        if count == 0 {
            return Ok(DeleteOutcome::NotFound);
        }

        if !confirm.confirm_delete(name, count) {
            return Ok(DeleteOutcome::Declined);
        }

        let removed = self.schedule.remove_by_name(name)?;
        if let Some(draft) = self.draft {
            if removed.iter().any(|e| e.id == draft.entry_id) {
                self.draft = None;
            }
        }

        Ok(DeleteOutcome::Deleted(removed.len()))
    }

    /// Delete a single entry; unknown ids are ignored
    #[instrument(skip(self))]
    pub fn delete_entry(&mut self, id: EntryId) -> Result<Option<ClassEntry>> {
        let removed = self.schedule.remove_by_id(id)?;
        if removed.is_some() && self.draft.map(|d| d.entry_id) == Some(id) {
            self.draft = None;
        }
        Ok(removed)
    }

    /// Recompute grid, course list and statistics
    pub fn view(&self) -> ScheduleView<'_> {
        let entries = self.schedule.entries();
        ScheduleView {
            grid: project(entries, &self.grid),
            groups: group_by_name(entries),
            summary: summarize(entries),
        }
    }

    pub fn schedule(&self) -> &Schedule<S> {
        &self.schedule
    }

    pub fn time_grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Drop all entries and the stored schedule
    pub fn reset(&mut self) -> Result<()> {
        self.draft = None;
        self.schedule.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::time_grid::Weekday;

    const KEY: &str = "timetable-classes";

    fn editor(store: &MemoryStore) -> ScheduleEditor<&MemoryStore> {
        ScheduleEditor::new(Schedule::load(store, KEY), TimeGrid::standard())
    }

    fn form(name: &str, day: Weekday, start: &str, end: &str) -> ClassForm {
        ClassForm::new(name, day, start.parse().unwrap(), end.parse().unwrap())
    }

    /// Records prompts and answers with a fixed decision
    struct Recorder {
        answer: bool,
        prompts: Vec<String>,
    }

    impl Recorder {
        fn new(answer: bool) -> Self {
            Self {
                answer,
                prompts: Vec::new(),
            }
        }
    }

    impl Confirm for Recorder {
        fn confirm_conflict(&mut self, _candidate: &ClassForm, existing: &ClassEntry) -> bool {
            self.prompts.push(format!("conflict:{}", existing.name));
            self.answer
        }

        fn confirm_delete(&mut self, name: &str, count: usize) -> bool {
            self.prompts.push(format!("delete:{name}:{count}"));
            self.answer
        }
    }

    #[test]
    fn test_add_updates_summary() {
        let store = MemoryStore::new();
        let mut editor = editor(&store);

        let outcome = editor
            .submit(
                form("Algorithms", Weekday::Monday, "09:00", "10:30").with_credit(3),
                &mut AutoConfirm(false),
            )
            .unwrap();
        assert!(matches!(outcome, SubmitOutcome::Added(_)));

        let view = editor.view();
        assert_eq!(view.summary.total_credits, 3);
        assert_eq!(view.summary.distinct_courses, 1);
        assert_eq!(view.summary.weekly_hours(), 2);
    }

    #[test]
    fn test_second_occurrence_of_course() {
        let store = MemoryStore::new();
        let mut editor = editor(&store);
        let mut confirm = AutoConfirm(false);

        editor
            .submit(form("Algorithms", Weekday::Monday, "09:00", "10:30").with_credit(3), &mut confirm)
            .unwrap();
        editor
            .submit(form("Algorithms", Weekday::Wednesday, "14:00", "15:30").with_credit(3), &mut confirm)
            .unwrap();

        let view = editor.view();
        assert_eq!(view.groups.len(), 1);
        assert_eq!(view.groups[0].occurrences.len(), 2);
        assert_eq!(view.summary.distinct_courses, 1);
        assert_eq!(view.summary.total_credits, 6);
    }

    #[test]
    fn test_time_order_error_leaves_store_unchanged() {
        let store = MemoryStore::new();
        let mut editor = editor(&store);

        let err = editor
            .submit(form("A", Weekday::Monday, "11:00", "10:00"), &mut AutoConfirm(true))
            .unwrap_err();
        assert!(matches!(err, Error::TimeOrder { .. }));
        assert!(editor.schedule().is_empty());
        assert_eq!(store.get(KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_declined_conflict_leaves_store_unchanged() {
        let store = MemoryStore::new();
        let mut editor = editor(&store);
        editor
            .submit(form("A", Weekday::Monday, "09:00", "10:30"), &mut AutoConfirm(true))
            .unwrap();
        let before = store.get(KEY).unwrap();

        let mut recorder = Recorder::new(false);
        let outcome = editor
            .submit(form("B", Weekday::Monday, "10:00", "11:00"), &mut recorder)
            .unwrap();

        match outcome {
            SubmitOutcome::Declined { conflict_with } => assert_eq!(conflict_with.name, "A"),
            other => panic!("expected decline, got {other:?}"),
        }
        assert_eq!(recorder.prompts, vec!["conflict:A"]);
        assert_eq!(editor.schedule().len(), 1);
        assert_eq!(store.get(KEY).unwrap(), before);
    }

    #[test]
    fn test_confirmed_conflict_is_stored() {
        let store = MemoryStore::new();
        let mut editor = editor(&store);
        let mut confirm = AutoConfirm(true);
        editor
            .submit(form("A", Weekday::Monday, "09:00", "10:30"), &mut confirm)
            .unwrap();
        editor
            .submit(form("B", Weekday::Monday, "10:00", "11:00"), &mut confirm)
            .unwrap();

        assert_eq!(editor.schedule().len(), 2);
        // First entry keeps the shared slot
        let view = editor.view();
        let cell = view
            .grid
            .cell(Weekday::Monday, "10:00".parse().unwrap())
            .unwrap();
        assert_eq!(cell.entry.name, "A");
    }

    #[test]
    fn test_adjacent_classes_need_no_confirmation() {
        let store = MemoryStore::new();
        let mut editor = editor(&store);
        let mut recorder = Recorder::new(false);

        editor
            .submit(form("A", Weekday::Monday, "09:00", "10:00"), &mut recorder)
            .unwrap();
        editor
            .submit(form("B", Weekday::Monday, "10:00", "11:00"), &mut recorder)
            .unwrap();

        assert!(recorder.prompts.is_empty());
        assert_eq!(editor.schedule().len(), 2);
    }

    #[test]
    fn test_off_grid_time_rejected() {
        let store = MemoryStore::new();
        let mut editor = editor(&store);

        let err = editor
            .submit(form("A", Weekday::Monday, "08:00", "09:00"), &mut AutoConfirm(true))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_edit_keeps_original_until_resubmitted() {
        let store = MemoryStore::new();
        let mut editor = editor(&store);
        let mut confirm = AutoConfirm(false);
        let SubmitOutcome::Added(id) = editor
            .submit(form("A", Weekday::Monday, "09:00", "10:00").with_room("R1"), &mut confirm)
            .unwrap()
        else {
            panic!("expected add");
        };

        let prefilled = editor.begin_edit(id).unwrap();
        assert_eq!(prefilled.room.as_deref(), Some("R1"));
        assert_eq!(editor.schedule().len(), 1);

        editor.cancel_edit();
        assert!(editor.draft().is_none());
        assert_eq!(editor.schedule().get(id).unwrap().start_time, prefilled.start_time);
    }

    #[test]
    fn test_edit_commit_replaces_in_place() {
        let store = MemoryStore::new();
        let mut editor = editor(&store);
        let mut confirm = Recorder::new(false);
        let SubmitOutcome::Added(id) = editor
            .submit(form("A", Weekday::Monday, "09:00", "10:00"), &mut confirm)
            .unwrap()
        else {
            panic!("expected add");
        };

        let mut draft = editor.begin_edit(id).unwrap();
        // Moving within its own old slot must not conflict with itself
        draft.end_time = "10:30".parse().unwrap();

        let outcome = editor.submit(draft, &mut confirm).unwrap();
        assert_eq!(outcome, SubmitOutcome::Updated(id));
        assert!(confirm.prompts.is_empty());
        assert!(editor.draft().is_none());

        let entry = editor.schedule().get(id).unwrap();
        assert_eq!(entry.end_time.to_string(), "10:30");
        assert_eq!(editor.schedule().len(), 1);
    }

    #[test]
    fn test_invalid_edit_keeps_draft() {
        let store = MemoryStore::new();
        let mut editor = editor(&store);
        let SubmitOutcome::Added(id) = editor
            .submit(form("A", Weekday::Monday, "09:00", "10:00"), &mut AutoConfirm(true))
            .unwrap()
        else {
            panic!("expected add");
        };

        let mut draft = editor.begin_edit(id).unwrap();
        draft.end_time = "09:00".parse().unwrap();
        assert!(editor.submit(draft, &mut AutoConfirm(true)).is_err());

        assert_eq!(editor.draft(), Some(EditDraft { entry_id: id }));
        assert_eq!(editor.schedule().get(id).unwrap().end_time.to_string(), "10:00");
    }

    #[test]
    fn test_declined_outcome_as_error() {
        let store = MemoryStore::new();
        let mut editor = editor(&store);
        let id = editor
            .submit(form("A", Weekday::Monday, "09:00", "10:30"), &mut AutoConfirm(true))
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(editor.entry(id).unwrap().name, "A");

        let err = editor
            .submit(form("B", Weekday::Monday, "10:00", "11:00"), &mut AutoConfirm(false))
            .unwrap()
            .into_result()
            .unwrap_err();
        match err {
            Error::Conflict { with } => assert_eq!(with, "A"),
            other => panic!("expected conflict error, got {other:?}"),
        }
    }

    #[test]
    fn test_entry_lookup_reports_missing_id() {
        let store = MemoryStore::new();
        let editor = editor(&store);

        assert!(matches!(editor.entry(EntryId::new()), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_edit_unknown_id_is_noop() {
        let store = MemoryStore::new();
        let mut editor = editor(&store);

        assert!(editor.begin_edit(EntryId::new()).is_none());
        assert!(editor.draft().is_none());
    }

    #[test]
    fn test_delete_course() {
        let store = MemoryStore::new();
        let mut editor = editor(&store);
        let mut yes = AutoConfirm(true);
        editor.submit(form("A", Weekday::Monday, "09:00", "10:00"), &mut yes).unwrap();
        editor.submit(form("B", Weekday::Monday, "10:00", "11:00"), &mut yes).unwrap();
        editor.submit(form("A", Weekday::Friday, "09:00", "10:00"), &mut yes).unwrap();

        let mut no = Recorder::new(false);
        assert_eq!(editor.delete_course("A", &mut no).unwrap(), DeleteOutcome::Declined);
        assert_eq!(no.prompts, vec!["delete:A:2"]);
        assert_eq!(editor.schedule().len(), 3);

        assert_eq!(editor.delete_course("A", &mut yes).unwrap(), DeleteOutcome::Deleted(2));
        let names: Vec<&str> = editor
            .schedule()
            .entries()
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["B"]);

        assert_eq!(editor.delete_course("A", &mut yes).unwrap(), DeleteOutcome::NotFound);
    }

    #[test]
    fn test_delete_clears_matching_draft() {
        let store = MemoryStore::new();
        let mut editor = editor(&store);
        let mut yes = AutoConfirm(true);
        let SubmitOutcome::Added(id) = editor
            .submit(form("A", Weekday::Monday, "09:00", "10:00"), &mut yes)
            .unwrap()
        else {
            panic!("expected add");
        };

        editor.begin_edit(id).unwrap();
        editor.delete_entry(id).unwrap();
        assert!(editor.draft().is_none());
        assert!(editor.delete_entry(id).unwrap().is_none());
    }

    #[test]
    fn test_state_persists_across_sessions() {
        let store = MemoryStore::new();
        {
            let mut editor = editor(&store);
            editor
                .submit(form("A", Weekday::Tuesday, "13:00", "14:00"), &mut AutoConfirm(true))
                .unwrap();
        }

        let editor = editor(&store);
        assert_eq!(editor.schedule().len(), 1);
        assert_eq!(editor.view().groups[0].name, "A");
    }

    #[test]
    fn test_reset() {
        let store = MemoryStore::new();
        let mut editor = editor(&store);
        editor
            .submit(form("A", Weekday::Tuesday, "13:00", "14:00"), &mut AutoConfirm(true))
            .unwrap();

        editor.reset().unwrap();
        assert!(editor.schedule().is_empty());
        assert!(store.is_empty());
    }
}
