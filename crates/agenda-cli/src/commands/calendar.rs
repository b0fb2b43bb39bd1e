use agenda_core::repository::Repository;
use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use crate::cli::{CalendarAddCommand, CalendarCommand, CalendarDeleteCommand, CalendarSubcommand};
use crate::views::table::{display_calendars, ViewCalendar};

pub fn calendar_command(repo: &mut impl Repository, command: CalendarCommand) -> Result<()> {
    match command.command {
        CalendarSubcommand::Add(command) => add_calendar(repo, command),
        CalendarSubcommand::List => list_calendars(repo),
        CalendarSubcommand::Delete(command) => delete_calendar(repo, command),
    }
}

fn add_calendar(repo: &mut impl Repository, command: CalendarAddCommand) -> Result<()> {
    let calendar = repo.add_calendar(command.name, command.color)?;
    println!("Created calendar '{}'", calendar.name);
    Ok(())
}

fn list_calendars(repo: &impl Repository) -> Result<()> {
    let view_calendars: Vec<ViewCalendar> = repo
        .calendars()
        .iter()
        .map(|c| ViewCalendar {
            name: c.name.clone(),
            color: c.color.clone(),
            event_count: repo.events().iter().filter(|e| e.calendar_id == c.id).count(),
        })
        .collect();

    display_calendars(&view_calendars);

    Ok(())
}

fn delete_calendar(repo: &mut impl Repository, command: CalendarDeleteCommand) -> Result<()> {
    if !command.force {
        let event_count = match repo.find_calendar_by_name(&command.name) {
            Some(calendar) => {
                let id = calendar.id;
                repo.events().iter().filter(|e| e.calendar_id == id).count()
            }
            None => 0,
        };
        let confirmation = Confirm::new()
            .with_prompt(format!(
                "Delete calendar '{}' and the {} event{} it contains?",
                command.name,
                event_count,
                if event_count == 1 { "" } else { "s" }
            ))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    let outcome = repo.delete_calendar(&command.name)?;

    println!(
        "Deleted calendar '{}' and {} event{}.",
        command.name,
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
