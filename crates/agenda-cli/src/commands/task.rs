use agenda_core::models::NewTaskData;
use agenda_core::repository::Repository;
use anyhow::Result;
use owo_colors::{OwoColorize, Style};

use crate::cli::{TaskAddCommand, TaskCommand, TaskListCommand, TaskSubcommand};
use crate::parser::parse_date;
use crate::util::{resolve_event_id, resolve_task_id};
use crate::views::table::{display_tasks, ViewTask};

pub fn task_command(repo: &mut impl Repository, command: TaskCommand) -> Result<()> {
    match command.command {
        TaskSubcommand::Add(command) => add_task(repo, command),
        TaskSubcommand::List(command) => list_tasks(repo, command),
        TaskSubcommand::Done(command) => {
            let task_id = resolve_task_id(repo, &command.id)?;
            let task = repo.complete_task(task_id)?;
            println!("Completed task: '{}'", task.name);
            Ok(())
        }
        TaskSubcommand::Delete(command) => {
            let task_id = resolve_task_id(repo, &command.id)?;
            repo.delete_task(task_id)?;
            println!("Deleted task.");
            Ok(())
        }
    }
}

fn add_task(repo: &mut impl Repository, command: TaskAddCommand) -> Result<()> {
    let due_date = command.due.as_deref().map(parse_date).transpose()?;
    let event_id = match &command.event {
        Some(short_id) => Some(resolve_event_id(repo, short_id)?),
        None => None,
    };

    let task = repo.add_task(NewTaskData {
        name: command.name,
        description: command.description,
        due_date,
        event_id,
    })?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();
    println!(
        "{} Created task: {}",
        "✓".style(success_style),
        task.name.bright_white().bold()
    );
    println!(
        "  {} Task ID: {}",
        "→".style(info_style),
        task.id.to_string().yellow()
    );
    if let Some(due) = task.due_date {
        println!(
            "  {} Due: {}",
            "→".style(info_style),
            due.format("%Y-%m-%d").to_string().cyan()
        );
    }

    Ok(())
}

fn list_tasks(repo: &impl Repository, command: TaskListCommand) -> Result<()> {
    let view_tasks: Vec<ViewTask> = repo
        .tasks()
        .iter()
        .filter(|t| !command.pending || !t.done)
        .map(|t| ViewTask {
            id: t.id,
            name: t.name.clone(),
            done: t.done,
            due_date: t.due_date,
            event_name: t
                .event_id
                .and_then(|eid| repo.find_event_by_id(eid))
                .map(|e| e.name.clone()),
            created_at: t.created_at,
        })
        .collect();

    display_tasks(&view_tasks);

    Ok(())
}
