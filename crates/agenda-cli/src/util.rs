use agenda_core::error::CoreError;
use agenda_core::repository::{EventRepository, TaskRepository};
use anyhow::{anyhow, Result};
use uuid::Uuid;

pub fn resolve_event_id(repo: &impl EventRepository, short_id: &str) -> Result<Uuid> {
    if short_id.len() < 2 {
        return Err(anyhow!(CoreError::InvalidInput(
            "Short ID must be at least 2 characters long.".to_string()
        )));
    }
    let events = repo.find_events_by_short_id_prefix(short_id);
    if events.len() == 1 {
        Ok(events[0].id)
    } else if events.is_empty() {
        Err(anyhow!(CoreError::NotFound(format!(
            "No event found with ID prefix '{}'",
            short_id
        ))))
    } else {
        let event_info: Vec<(String, String)> = events
            .into_iter()
            .map(|e| (e.id.to_string(), e.name.clone()))
            .collect();
        Err(anyhow!(CoreError::AmbiguousId(event_info)))
    }
}

pub fn resolve_task_id(repo: &impl TaskRepository, short_id: &str) -> Result<Uuid> {
    if short_id.len() < 2 {
        return Err(anyhow!(CoreError::InvalidInput(
            "Short ID must be at least 2 characters long.".to_string()
        )));
    }
    let tasks = repo.find_tasks_by_short_id_prefix(short_id);
    if tasks.len() == 1 {
        Ok(tasks[0].id)
    } else if tasks.is_empty() {
        Err(anyhow!(CoreError::NotFound(format!(
            "No task found with ID prefix '{}'",
            short_id
        ))))
    } else {
        let task_info: Vec<(String, String)> = tasks
            .into_iter()
            .map(|t| (t.id.to_string(), t.name.clone()))
            .collect();
        Err(anyhow!(CoreError::AmbiguousId(task_info)))
    }
}
