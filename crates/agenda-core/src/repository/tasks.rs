use chrono::Utc;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::{NewTaskData, Task, TaskPatch};
use crate::repository::{EventRepository, JsonRepository, TaskRepository};

impl super::TaskRepository for JsonRepository {
    fn add_task(&mut self, data: NewTaskData) -> Result<Task, CoreError> {
        if data.name.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "Task name must not be empty".to_string(),
            ));
        }
        if let Some(event_id) = data.event_id {
            if self.find_event_by_id(event_id).is_none() {
                return Err(CoreError::NotFound(format!(
                    "Event with id {} not found",
                    event_id
                )));
            }
        }

        let task = Task {
            id: Uuid::now_v7(),
            name: data.name,
            description: data.description,
            done: false,
            due_date: data.due_date,
            event_id: data.event_id,
            created_at: Utc::now(),
        };

        self.snapshot_mut().tasks.push(task.clone());
        self.persist()?;
        Ok(task)
    }

    fn find_task_by_id(&self, id: Uuid) -> Option<&Task> {
        self.snapshot().tasks.iter().find(|t| t.id == id)
    }

    fn find_tasks_by_short_id_prefix(&self, prefix: &str) -> Vec<&Task> {
        self.snapshot()
            .tasks
            .iter()
            .filter(|t| t.id.to_string().starts_with(prefix))
            .collect()
    }

    fn tasks(&self) -> &[Task] {
        &self.snapshot().tasks
    }

    fn update_task(&mut self, id: Uuid, patch: TaskPatch) -> Result<Task, CoreError> {
        if let Some(Some(event_id)) = patch.event_id {
            if self.find_event_by_id(event_id).is_none() {
                return Err(CoreError::NotFound(format!(
                    "Event with id {} not found",
                    event_id
                )));
            }
        }
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(CoreError::InvalidInput(
                    "Task name must not be empty".to_string(),
                ));
            }
        }

        let task = self
            .snapshot_mut()
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::NotFound(format!("Task with id {} not found", id)))?;

        if let Some(name) = patch.name {
            task.name = name;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = due_date;
        }
        if let Some(event_id) = patch.event_id {
            task.event_id = event_id;
        }
        if let Some(done) = patch.done {
            task.done = done;
        }
        let updated = task.clone();

        self.persist()?;
        Ok(updated)
    }

    fn complete_task(&mut self, id: Uuid) -> Result<Task, CoreError> {
        self.update_task(
            id,
            TaskPatch {
                done: Some(true),
                ..Default::default()
            },
        )
    }

    fn delete_task(&mut self, id: Uuid) -> Result<(), CoreError> {
        let snapshot = self.snapshot_mut();
        let before = snapshot.tasks.len();
        snapshot.tasks.retain(|t| t.id != id);
        if snapshot.tasks.len() == before {
            return Err(CoreError::NotFound(format!("Task with id {} not found", id)));
        }
        self.persist()
    }
}
