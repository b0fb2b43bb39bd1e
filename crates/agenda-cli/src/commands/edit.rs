use agenda_core::error::CoreError;
use agenda_core::models::{EditScope, EventPatch};
use agenda_core::repository::Repository;
use anyhow::{anyhow, Result};
use dialoguer::Select;
use owo_colors::OwoColorize;

use crate::cli::EditCommand;
use crate::parser::{parse_date, parse_time};
use crate::util::resolve_event_id;

pub fn edit_event(repo: &mut impl Repository, command: EditCommand) -> Result<()> {
    let event_id = resolve_event_id(repo, &command.id)?;

    // Check if this event is part of a series and determine scope
    let event = repo
        .find_event_by_id(event_id)
        .cloned()
        .ok_or_else(|| anyhow!(CoreError::NotFound("Event not found".to_string())))?;

    let scope = if event.series_id.is_some() {
        if let Some(scope) = command.scope {
            scope.into()
        } else if command.force_scope {
            EditScope::Single // Default for forced scope
        } else {
            prompt_scope(&event.date.format("%Y-%m-%d").to_string())?
        }
    } else {
        EditScope::Single // Not a recurring event
    };

    let description = if command.description_clear {
        Some(None)
    } else {
        command.description.map(Some)
    };

    let calendar_id = match &command.calendar {
        Some(name) => Some(
            repo.find_calendar_by_name(name)
                .map(|c| c.id)
                .ok_or_else(|| {
                    anyhow!(CoreError::NotFound(format!("Calendar '{}' not found", name)))
                })?,
        ),
        None => None,
    };

    let patch = EventPatch {
        name: command.name,
        description,
        start_time: command.from.as_deref().map(parse_time).transpose()?,
        end_time: command.to.as_deref().map(parse_time).transpose()?,
        color: command.color,
        date: command.date.as_deref().map(parse_date).transpose()?,
        calendar_id,
    };

    let updated = repo.update_event(event_id, patch, scope)?;

    match scope {
        EditScope::Single => println!("Updated event '{}'", updated.name),
        EditScope::Future => println!(
            "Updated '{}' and all future occurrences in its series",
            updated.name
        ),
        EditScope::All => println!("Updated the entire series of '{}'", updated.name),
    }

    Ok(())
}

fn prompt_scope(target_date: &str) -> Result<EditScope> {
    let scope_options = vec![
        format!("This occurrence only ({})", target_date),
        "This and future occurrences".to_string(),
        "Entire series".to_string(),
    ];

    println!("{}", "This event is part of a recurring series.".yellow());
    let selection = Select::new()
        .with_prompt("How would you like to apply your changes?")
        .items(&scope_options)
        .default(0)
        .interact()?;

    Ok(match selection {
        0 => EditScope::Single,
        1 => EditScope::Future,
        _ => EditScope::All,
    })
}
