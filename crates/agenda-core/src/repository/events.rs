use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::{EditScope, Event, EventDraft, EventPatch, Repetition};
use crate::repository::{CalendarRepository, DeleteOutcome, EventRepository, JsonRepository};
use crate::series;

impl super::EventRepository for JsonRepository {
    fn create_event(
        &mut self,
        draft: EventDraft,
        repetition: Repetition,
    ) -> Result<Vec<Event>, CoreError> {
        if self.find_calendar_by_id(draft.calendar_id).is_none() {
            return Err(CoreError::NotFound(format!(
                "Calendar with id {} not found",
                draft.calendar_id
            )));
        }

        let created = series::expand_series(&draft, repetition)?;
        self.snapshot_mut().events.extend(created.iter().cloned());
        self.persist()?;
        Ok(created)
    }

    fn find_event_by_id(&self, id: Uuid) -> Option<&Event> {
        self.snapshot().events.iter().find(|e| e.id == id)
    }

    fn find_events_by_short_id_prefix(&self, prefix: &str) -> Vec<&Event> {
        self.snapshot()
            .events
            .iter()
            .filter(|e| e.id.to_string().starts_with(prefix))
            .collect()
    }

    fn events(&self) -> &[Event] {
        &self.snapshot().events
    }

    fn events_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<&Event> {
        let mut events: Vec<&Event> = self
            .snapshot()
            .events
            .iter()
            .filter(|e| e.date >= from && e.date <= to)
            .collect();
        events.sort_by_key(|e| (e.date, e.start_time));
        events
    }

    fn series_events(&self, series_id: Uuid) -> Vec<&Event> {
        let mut events: Vec<&Event> = self
            .snapshot()
            .events
            .iter()
            .filter(|e| e.series_id == Some(series_id))
            .collect();
        events.sort_by_key(|e| e.date);
        events
    }

    fn update_event(
        &mut self,
        id: Uuid,
        patch: EventPatch,
        scope: EditScope,
    ) -> Result<Event, CoreError> {
        if let Some(calendar_id) = patch.calendar_id {
            if self.find_calendar_by_id(calendar_id).is_none() {
                return Err(CoreError::NotFound(format!(
                    "Calendar with id {} not found",
                    calendar_id
                )));
            }
        }

        let updated = series::apply_scoped_edit(&self.snapshot().events, id, &patch, scope)?;
        self.snapshot_mut().events = updated;
        self.persist()?;

        self.find_event_by_id(id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound(format!("Event with id {} not found", id)))
    }

    fn delete_event(&mut self, id: Uuid, scope: EditScope) -> Result<DeleteOutcome, CoreError> {
        let removed = series::resolve_scoped_delete(&self.snapshot().events, id, scope)?;

        let snapshot = self.snapshot_mut();
        snapshot.events.retain(|e| !removed.contains(&e.id));

        let mut unlinked_tasks = 0;
        for task in &mut snapshot.tasks {
            if task.event_id.is_some_and(|eid| removed.contains(&eid)) {
                task.event_id = None;
                unlinked_tasks += 1;
            }
        }

        self.persist()?;
        Ok(DeleteOutcome {
            removed,
            unlinked_tasks,
        })
    }
}
