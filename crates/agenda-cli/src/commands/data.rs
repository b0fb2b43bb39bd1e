use agenda_core::repository::JsonRepository;
use agenda_core::storage::Snapshot;
use anyhow::Result;
use dialoguer::Confirm;
use std::fs;

use crate::cli::{ExportCommand, ImportCommand};

pub fn export_snapshot(repo: &JsonRepository, command: ExportCommand) -> Result<()> {
    let raw = serde_json::to_string_pretty(repo.snapshot())?;

    match command.path {
        Some(path) => {
            fs::write(&path, raw)?;
            println!("Exported snapshot to {}", path.display());
        }
        None => println!("{}", raw),
    }

    Ok(())
}

pub fn import_snapshot(repo: &mut JsonRepository, command: ImportCommand) -> Result<()> {
    let raw = fs::read_to_string(&command.path)?;
    let snapshot: Snapshot = serde_json::from_str(&raw)?;

    if !command.force {
        let confirmation = Confirm::new()
            .with_prompt(format!(
                "Replace all current data with the snapshot from {} ({} calendars, {} events, {} tasks)?",
                command.path.display(),
                snapshot.calendars.len(),
                snapshot.events.len(),
                snapshot.tasks.len()
            ))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Import cancelled.");
            return Ok(());
        }
    }

    repo.replace_snapshot(snapshot)?;
    let snapshot = repo.snapshot();
    println!(
        "Imported {} calendars, {} events, {} tasks.",
        snapshot.calendars.len(),
        snapshot.events.len(),
        snapshot.tasks.len()
    );

    Ok(())
}
