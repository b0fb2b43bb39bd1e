//! # Agenda Core Library
//!
//! A personal-organizer library: calendars, recurring event series, and
//! tasks that can link to events, persisted as a single JSON snapshot.
//!
//! ## Features
//!
//! - **Bounded Series Expansion**: a repetition rule is expanded into
//!   concrete dated occurrences up front, capped per kind so one
//!   submission can never grow the store unbounded
//! - **Scoped Mutations**: edits and deletes target one occurrence, the
//!   occurrence and its future siblings, or the entire series, without
//!   ever leaking outside that scope
//! - **Task Cascade**: deleting events unlinks referencing tasks instead
//!   of deleting them
//! - **Snapshot Persistence**: the whole store is one flat JSON document,
//!   replaced atomically after each mutation
//!
//! ## Core Modules
//!
//! - [`models`]: Core data structures and transfer objects
//! - [`series`]: Series expansion and scope resolution
//! - [`repository`]: Data access layer with Repository pattern
//! - [`storage`]: Snapshot load/save
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use agenda_core::error::CoreError;
//! use agenda_core::models::{EventDraft, Repetition};
//! use agenda_core::repository::{EventRepository, JsonRepository};
//! use chrono::{NaiveDate, NaiveTime};
//!
//! fn main() -> Result<(), CoreError> {
//!     let mut repo = JsonRepository::open("agenda.json")?;
//!     let calendar = repo.ensure_calendar("personal", "teal")?;
//!
//!     let draft = EventDraft {
//!         calendar_id: calendar.id,
//!         name: "Team standup".to_string(),
//!         description: None,
//!         date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
//!         start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
//!         end_time: NaiveTime::from_hms_opt(9, 15, 0).unwrap(),
//!         color: "teal".to_string(),
//!     };
//!
//!     let created = repo.create_event(draft, Repetition::Weekly)?;
//!     println!("Created {} occurrences", created.len());
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod models;
pub mod repository;
pub mod series;
pub mod storage;
