use agenda_core::error::CoreError;
use agenda_core::models::{EventDraft, Repetition};
use agenda_core::repository::Repository;
use anyhow::{anyhow, Result};
use owo_colors::{OwoColorize, Style};

use crate::cli::AddCommand;
use crate::config::Config;
use crate::parser::{one_hour_after, parse_date, parse_time};

pub fn add_event(
    repo: &mut impl Repository,
    command: AddCommand,
    config: &Config,
) -> Result<()> {
    let date = parse_date(&command.date)?;
    let start_time = parse_time(&command.from)?;
    let end_time = match &command.to {
        Some(to) => parse_time(to)?,
        None => one_hour_after(start_time),
    };

    let calendar_name = command
        .calendar
        .as_deref()
        .unwrap_or(&config.default_calendar);
    let calendar = repo
        .find_calendar_by_name(calendar_name)
        .cloned()
        .ok_or_else(|| {
            anyhow!(CoreError::NotFound(format!(
                "Calendar '{}' not found",
                calendar_name
            )))
        })?;

    let draft = EventDraft {
        calendar_id: calendar.id,
        name: command.name,
        description: command.description,
        date,
        start_time,
        end_time,
        color: command.color.unwrap_or_else(|| calendar.color.clone()),
    };
    let repetition = command
        .repeat
        .map(Repetition::from)
        .unwrap_or(Repetition::None);

    let created = repo.create_event(draft, repetition)?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();

    if repetition == Repetition::None {
        let event = &created[0];
        println!(
            "{} Created event: {}",
            "✓".style(success_style),
            event.name.bright_white().bold()
        );
        println!(
            "  {} {} {} - {} in '{}'",
            "→".style(info_style),
            event.date.format("%Y-%m-%d"),
            event.start_time.format("%H:%M"),
            event.end_time.format("%H:%M"),
            calendar.name
        );
        println!(
            "  {} Event ID: {}",
            "→".style(info_style),
            event.id.to_string().yellow()
        );
    } else if let (Some(first), Some(last)) = (created.first(), created.last()) {
        println!(
            "{} Created recurring event: {}",
            "✓".style(success_style),
            first.name.bright_white().bold()
        );
        println!(
            "  {} {} occurrences, {} through {} ({})",
            "→".style(info_style),
            created.len(),
            first.date.format("%Y-%m-%d"),
            last.date.format("%Y-%m-%d"),
            repetition
        );
        println!(
            "  {} First occurrence ID: {}",
            "→".style(info_style),
            first.id.to_string().yellow()
        );
    }

    Ok(())
}
