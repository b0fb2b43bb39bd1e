use uuid::Uuid;

use crate::error::CoreError;
use crate::models::Calendar;
use crate::repository::{CalendarRepository, DeleteOutcome, JsonRepository};

impl super::CalendarRepository for JsonRepository {
    fn add_calendar(&mut self, name: String, color: String) -> Result<Calendar, CoreError> {
        if name.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "Calendar name must not be empty".to_string(),
            ));
        }
        if self.find_calendar_by_name(&name).is_some() {
            return Err(CoreError::InvalidInput(format!(
                "A calendar named '{}' already exists",
                name
            )));
        }

        let calendar = Calendar {
            id: Uuid::now_v7(),
            name,
            color,
        };
        self.snapshot_mut().calendars.push(calendar.clone());
        self.persist()?;
        Ok(calendar)
    }

    fn find_calendar_by_id(&self, id: Uuid) -> Option<&Calendar> {
        self.snapshot().calendars.iter().find(|c| c.id == id)
    }

    fn find_calendar_by_name(&self, name: &str) -> Option<&Calendar> {
        self.snapshot()
            .calendars
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    fn calendars(&self) -> &[Calendar] {
        &self.snapshot().calendars
    }

    /// Removes a calendar together with every event it owns; tasks that
    /// referenced a removed event are unlinked, never deleted.
    fn delete_calendar(&mut self, name: &str) -> Result<DeleteOutcome, CoreError> {
        let calendar_id = self
            .find_calendar_by_name(name)
            .map(|c| c.id)
            .ok_or_else(|| CoreError::NotFound(format!("Calendar '{}' not found", name)))?;

        let snapshot = self.snapshot_mut();
        let removed: Vec<Uuid> = snapshot
            .events
            .iter()
            .filter(|e| e.calendar_id == calendar_id)
            .map(|e| e.id)
            .collect();

        snapshot.events.retain(|e| e.calendar_id != calendar_id);
        snapshot.calendars.retain(|c| c.id != calendar_id);

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
