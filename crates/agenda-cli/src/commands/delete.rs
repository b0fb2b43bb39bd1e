use agenda_core::error::CoreError;
use agenda_core::models::EditScope;
use agenda_core::repository::Repository;
use anyhow::{anyhow, Result};
use dialoguer::{Confirm, Select};
use owo_colors::OwoColorize;

use crate::cli::DeleteCommand;
use crate::util::resolve_event_id;

pub fn delete_event(repo: &mut impl Repository, command: DeleteCommand) -> Result<()> {
    let event_id = resolve_event_id(repo, &command.id)?;

    let event = repo
        .find_event_by_id(event_id)
        .cloned()
        .ok_or_else(|| anyhow!(CoreError::NotFound("Event not found".to_string())))?;

    let scope = if event.series_id.is_some() {
        if let Some(scope) = command.scope {
            scope.into()
        } else if command.force {
            EditScope::Single // Default for forced deletion
        } else {
            prompt_scope(&event.date.format("%Y-%m-%d").to_string())?
        }
    } else {
        EditScope::Single
    };

    if !command.force {
        let prompt = match scope {
            EditScope::Single => format!("Delete event '{}' on {}?", event.name, event.date),
            EditScope::Future => format!(
                "Delete '{}' and all its occurrences from {} on?",
                event.name, event.date
            ),
            EditScope::All => format!("Delete the entire series of '{}'?", event.name),
        };
        let confirmation = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    let outcome = repo.delete_event(event_id, scope)?;

    println!(
        "Deleted {} event{}.",
        outcome.removed.len(),
        if outcome.removed.len() == 1 { "" } else { "s" }
    );
    if outcome.unlinked_tasks > 0 {
        println!(
            "{} {} task{} lost an event link (the tasks themselves were kept).",
            "Note:".yellow(),
            outcome.unlinked_tasks,
            if outcome.unlinked_tasks == 1 { "" } else { "s" }
        );
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
        .with_prompt("How much of the series should be deleted?")
        .items(&scope_options)
        .default(0)
        .interact()?;

    Ok(match selection {
        0 => EditScope::Single,
        1 => EditScope::Future,
        _ => EditScope::All,
    })
}
