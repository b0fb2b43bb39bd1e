use agenda_core::error::CoreError;
use agenda_core::repository::Repository;
use anyhow::{anyhow, Result};
use uuid::Uuid;

use crate::cli::ListCommand;
use crate::parser::parse_date;
use crate::views::table::{display_events, ViewEvent};

pub fn list_events(repo: &impl Repository, command: ListCommand) -> Result<()> {
    let calendar_filter: Option<Uuid> = match &command.calendar {
        Some(name) => Some(
            repo.find_calendar_by_name(name)
                .map(|c| c.id)
                .ok_or_else(|| {
                    anyhow!(CoreError::NotFound(format!("Calendar '{}' not found", name)))
                })?,
        ),
        None => None,
    };

    let range = if let Some(on) = &command.on {
        let day = parse_date(on)?;
        Some((day, day))
    } else {
        match (&command.from, &command.to) {
            (None, None) => None,
            (from, to) => {
                let from = from.as_deref().map(parse_date).transpose()?;
                let to = to.as_deref().map(parse_date).transpose()?;
                Some((
                    from.unwrap_or(chrono::NaiveDate::MIN),
                    to.unwrap_or(chrono::NaiveDate::MAX),
                ))
            }
        }
    };

    let mut events: Vec<&agenda_core::models::Event> = match range {
        Some((from, to)) => repo.events_between(from, to),
        None => repo.events().iter().collect(),
    };
    if let Some(calendar_id) = calendar_filter {
        events.retain(|e| e.calendar_id == calendar_id);
    }
    events.sort_by_key(|e| (e.date, e.start_time));

    let view_events: Vec<ViewEvent> = events
        .into_iter()
        .map(|e| ViewEvent {
            id: e.id,
            name: e.name.clone(),
            date: e.date,
            start_time: e.start_time,
            end_time: e.end_time,
            calendar_name: repo
                .find_calendar_by_id(e.calendar_id)
                .map_or_else(|| "?".to_string(), |c| c.name.clone()),
            color: e.color.clone(),
            is_series: e.series_id.is_some(),
        })
        .collect();

    display_events(&view_events);

    Ok(())
}
