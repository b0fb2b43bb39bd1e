use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Calendar {
    pub id: Uuid,
    pub name: String,
    pub color: String,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            id: Uuid::now_v7(),
            name: "".to_string(),
            color: "teal".to_string(),
        }
    }
}

/// One dated occurrence of a calendar entry.
///
/// Events created from a repetition rule share a `series_id`; the series
/// exists only as that shared key, there is no separate series record.
/// A standalone event never gains a `series_id`, and a series member never
/// loses one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    pub id: Uuid,
    pub calendar_id: Uuid,
    /// Present iff the event was created as part of a recurring series
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    /// Calendar date in local civil time, no timezone attached
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub done: bool,
    pub due_date: Option<NaiveDate>,
    /// Link to a calendar event; cleared (never cascaded into task
    /// deletion) when the referenced event is removed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Default for Task {
    fn default() -> Self {
        Self {
            id: Uuid::now_v7(),
            name: "".to_string(),
            description: None,
            done: false,
            due_date: None,
            event_id: None,
            created_at: Utc::now(),
        }
    }
}

/// Repetition kind of an event series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Repetition {
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Repetition {
    /// Maximum number of occurrence indices generated for this kind.
    /// Bounds the series length so one submission never grows the store
    /// unbounded.
    pub fn cap(&self) -> u32 {
        match self {
            Repetition::None => 1,
            Repetition::Daily => 730,
            Repetition::Weekly => 104,
            Repetition::Monthly => 24,
            Repetition::Yearly => 5,
        }
    }
}

impl std::fmt::Display for Repetition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Repetition::None => write!(f, "none"),
            Repetition::Daily => write!(f, "daily"),
            Repetition::Weekly => write!(f, "weekly"),
            Repetition::Monthly => write!(f, "monthly"),
            Repetition::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for Repetition {
    type Err = ParseRepetitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "once" => Ok(Repetition::None),
            "daily" => Ok(Repetition::Daily),
            "weekly" => Ok(Repetition::Weekly),
            "monthly" => Ok(Repetition::Monthly),
            "yearly" | "annually" => Ok(Repetition::Yearly),
            _ => Err(ParseRepetitionError(s.to_string())),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid repetition: {0}")]
pub struct ParseRepetitionError(String);

/// Breadth of an edit or delete relative to a recurring series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditScope {
    /// Affect only the selected occurrence
    Single,
    /// Affect the selected occurrence and all later ones in its series
    Future,
    /// Affect every occurrence of the series
    All,
}

impl std::fmt::Display for EditScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditScope::Single => write!(f, "single"),
            EditScope::Future => write!(f, "future"),
            EditScope::All => write!(f, "all"),
        }
    }
}

impl FromStr for EditScope {
    type Err = ParseEditScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" | "this" | "one" => Ok(EditScope::Single),
            "future" | "this_and_future" => Ok(EditScope::Future),
            "all" | "series" | "entire" => Ok(EditScope::All),
            _ => Err(ParseEditScopeError(s.to_string())),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid edit scope: {0}")]
pub struct ParseEditScopeError(String);

/// Prototype fields for creating one event or a whole series.
/// `id` and `series_id` are assigned during expansion.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub calendar_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub color: String,
}

/// Field changes for a scoped event edit. `None` leaves a field unchanged;
/// the double-`Option` fields distinguish "unchanged" from "cleared".
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub color: Option<String>,
    /// Applied to the target event only, never propagated to the series
    pub date: Option<NaiveDate>,
    /// Applied to the target event only, never propagated to the series
    pub calendar_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct NewTaskData {
    pub name: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    /// Link the task to an existing calendar event
    pub event_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub due_date: Option<Option<NaiveDate>>,
    pub event_id: Option<Option<Uuid>>,
    pub done: Option<bool>,
}
