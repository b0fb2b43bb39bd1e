//! Data access layer over the in-memory snapshot.
//!
//! Mirrors the store contracts the UI layer consumes: bulk-append on event
//! creation, whole-collection replace on scoped edits, and the delete
//! cascade that unlinks (never deletes) referencing tasks. Every mutation
//! persists the full snapshot before returning.

use std::path::PathBuf;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::{
    Calendar, EditScope, Event, EventDraft, EventPatch, NewTaskData, Repetition, Task, TaskPatch,
};
use crate::storage::{Snapshot, Storage};

pub mod calendars;
pub mod events;
pub mod tasks;

/// Result of a cascading delete: the removed event ids and how many tasks
/// lost their event link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub removed: Vec<Uuid>,
    pub unlinked_tasks: usize,
}

/// Domain-specific trait for event operations
pub trait EventRepository {
    fn create_event(
        &mut self,
        draft: EventDraft,
        repetition: Repetition,
    ) -> Result<Vec<Event>, CoreError>;
    fn find_event_by_id(&self, id: Uuid) -> Option<&Event>;
    fn find_events_by_short_id_prefix(&self, prefix: &str) -> Vec<&Event>;
    fn events(&self) -> &[Event];
    fn events_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<&Event>;
    fn series_events(&self, series_id: Uuid) -> Vec<&Event>;
    fn update_event(
        &mut self,
        id: Uuid,
        patch: EventPatch,
        scope: EditScope,
    ) -> Result<Event, CoreError>;
    fn delete_event(&mut self, id: Uuid, scope: EditScope) -> Result<DeleteOutcome, CoreError>;
}

/// Domain-specific trait for task operations
pub trait TaskRepository {
    fn add_task(&mut self, data: NewTaskData) -> Result<Task, CoreError>;
    fn find_task_by_id(&self, id: Uuid) -> Option<&Task>;
    fn find_tasks_by_short_id_prefix(&self, prefix: &str) -> Vec<&Task>;
    fn tasks(&self) -> &[Task];
    fn update_task(&mut self, id: Uuid, patch: TaskPatch) -> Result<Task, CoreError>;
    fn complete_task(&mut self, id: Uuid) -> Result<Task, CoreError>;
    fn delete_task(&mut self, id: Uuid) -> Result<(), CoreError>;
}

/// Domain-specific trait for calendar operations
pub trait CalendarRepository {
    fn add_calendar(&mut self, name: String, color: String) -> Result<Calendar, CoreError>;
    fn find_calendar_by_id(&self, id: Uuid) -> Option<&Calendar>;
    fn find_calendar_by_name(&self, name: &str) -> Option<&Calendar>;
    fn calendars(&self) -> &[Calendar];
    fn delete_calendar(&mut self, name: &str) -> Result<DeleteOutcome, CoreError>;
}

/// Main repository trait that composes all domain traits
pub trait Repository: EventRepository + TaskRepository + CalendarRepository {}

/// JSON-file-backed implementation of the repository pattern
pub struct JsonRepository {
    snapshot: Snapshot,
    storage: Storage,
}

impl JsonRepository {
    /// Opens the repository, loading the snapshot at `path` (a missing
    /// file starts an empty store).
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let storage = Storage::new(path);
        let snapshot = storage.load()?;
        Ok(Self { snapshot, storage })
    }

    /// Returns the calendar with the given name, creating it if absent.
    pub fn ensure_calendar(&mut self, name: &str, color: &str) -> Result<Calendar, CoreError> {
        if let Some(calendar) = self.find_calendar_by_name(name) {
            return Ok(calendar.clone());
        }
        self.add_calendar(name.to_string(), color.to_string())
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Replaces the entire store, e.g. from an imported snapshot.
    pub fn replace_snapshot(&mut self, snapshot: Snapshot) -> Result<(), CoreError> {
        self.snapshot = snapshot;
        self.persist()
    }

    pub(crate) fn snapshot_mut(&mut self) -> &mut Snapshot {
        &mut self.snapshot
    }

    pub(crate) fn persist(&self) -> Result<(), CoreError> {
        self.storage.save(&self.snapshot)
    }
}

impl Repository for JsonRepository {}
