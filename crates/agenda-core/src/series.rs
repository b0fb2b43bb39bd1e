//! Recurring event series engine.
//!
//! A repetition rule is expanded into a bounded list of concrete event
//! occurrences at creation time; afterwards the series exists only as the
//! shared `series_id` on those rows. Edits and deletes resolve a scope
//! (`single` / `future` / `all`) against the current collection without
//! touching anything outside it.
//!
//! All three entry points are pure functions from (collection, request) to
//! a new value; the repository layer owns appending, replacing, and the
//! task-unlink cascade.

use chrono::{Datelike, Duration, NaiveDate};
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::{EditScope, Event, EventDraft, EventPatch, Repetition};

/// Expands a prototype event into the ordered list of occurrences to
/// insert.
///
/// `Repetition::None` produces exactly one standalone event with no
/// `series_id`. Every other kind allocates a fresh series id and walks the
/// occurrence index from zero up to the kind's cap, skipping indices whose
/// date does not exist (a monthly series started on the 31st emits nothing
/// for 30-day months rather than clamping or rolling over).
///
/// Occurrence ids are derived from the series id and the index, so one
/// generation run can never collide with itself.
pub fn expand_series(
    draft: &EventDraft,
    repetition: Repetition,
) -> Result<Vec<Event>, CoreError> {
    validate_draft(draft)?;

    if repetition == Repetition::None {
        return Ok(vec![instantiate(draft, Uuid::now_v7(), None, draft.date)]);
    }

    let series_id = Uuid::now_v7();
    let cap = repetition.cap();
    let mut events = Vec::with_capacity(cap as usize);

    for index in 0..cap {
        let Some(date) = occurrence_date(draft.date, repetition, index) else {
            continue;
        };
        let id = Uuid::new_v5(&series_id, &index.to_be_bytes());
        events.push(instantiate(draft, id, Some(series_id), date));
    }

    Ok(events)
}

/// Applies field changes to the target event, propagating the shared
/// subset (`name`, `description`, `start_time`, `end_time`, `color`) across
/// the series according to `scope`. `date` and `calendar_id` only ever
/// change on the target itself.
///
/// The `future` cutoff is the target's date *before* this edit: moving the
/// target's own date does not shift which events qualify.
///
/// Returns the full updated collection; events outside the scope are
/// cloned unchanged. An unknown `target_id` yields [`CoreError::NotFound`]
/// and the input is untouched.
pub fn apply_scoped_edit(
    events: &[Event],
    target_id: Uuid,
    patch: &EventPatch,
    scope: EditScope,
) -> Result<Vec<Event>, CoreError> {
    validate_patch(patch)?;

    let target = events
        .iter()
        .find(|e| e.id == target_id)
        .ok_or_else(|| CoreError::NotFound(format!("Event with id {} not found", target_id)))?;

    // A standalone event only ever supports single semantics.
    let series_id = match (scope, target.series_id) {
        (EditScope::Single, _) | (_, None) => None,
        (_, Some(sid)) => Some(sid),
    };
    let cutoff = target.date;

    let updated = events
        .iter()
        .map(|event| {
            if event.id == target_id {
                merge_full(event, patch)
            } else if in_scope(event, series_id, scope, cutoff) {
                merge_shared(event, patch)
            } else {
                event.clone()
            }
        })
        .collect();

    Ok(updated)
}

/// Computes the set of event ids a scoped delete removes.
///
/// The caller must remove exactly these rows from the event store and
/// clear the `event_id` link on every task referencing one of them; tasks
/// themselves are never deleted by this cascade. An unknown `target_id`
/// yields [`CoreError::NotFound`] and nothing may change.
pub fn resolve_scoped_delete(
    events: &[Event],
    target_id: Uuid,
    scope: EditScope,
) -> Result<Vec<Uuid>, CoreError> {
    let target = events
        .iter()
        .find(|e| e.id == target_id)
        .ok_or_else(|| CoreError::NotFound(format!("Event with id {} not found", target_id)))?;

    let ids = match (scope, target.series_id) {
        (EditScope::Single, _) | (_, None) => vec![target.id],
        (EditScope::Future, Some(sid)) => events
            .iter()
            .filter(|e| e.series_id == Some(sid) && e.date >= target.date)
            .map(|e| e.id)
            .collect(),
        (EditScope::All, Some(sid)) => events
            .iter()
            .filter(|e| e.series_id == Some(sid))
            .map(|e| e.id)
            .collect(),
    };

    Ok(ids)
}

/// The date of occurrence `index`, or `None` when that index is skipped.
///
/// Monthly advances the month and keeps the origin's day-of-month; when the
/// target month is too short the index is skipped outright. Yearly behaves
/// the same way, which only matters for a Feb 29 origin.
fn occurrence_date(origin: NaiveDate, repetition: Repetition, index: u32) -> Option<NaiveDate> {
    match repetition {
        Repetition::None => (index == 0).then_some(origin),
        Repetition::Daily => origin.checked_add_signed(Duration::days(index as i64)),
        Repetition::Weekly => origin.checked_add_signed(Duration::days(7 * index as i64)),
        Repetition::Monthly => {
            let months = origin.month0() + index;
            let year = origin.year() + (months / 12) as i32;
            let month = months % 12 + 1;
            NaiveDate::from_ymd_opt(year, month, origin.day())
        }
        Repetition::Yearly => {
            NaiveDate::from_ymd_opt(origin.year() + index as i32, origin.month(), origin.day())
        }
    }
}

fn instantiate(draft: &EventDraft, id: Uuid, series_id: Option<Uuid>, date: NaiveDate) -> Event {
    Event {
        id,
        calendar_id: draft.calendar_id,
        series_id,
        name: draft.name.clone(),
        description: draft.description.clone(),
        date,
        start_time: draft.start_time,
        end_time: draft.end_time,
        color: draft.color.clone(),
    }
}

fn in_scope(event: &Event, series_id: Option<Uuid>, scope: EditScope, cutoff: NaiveDate) -> bool {
    let Some(sid) = series_id else {
        return false;
    };
    event.series_id == Some(sid) && (scope == EditScope::All || event.date >= cutoff)
}

fn merge_shared(event: &Event, patch: &EventPatch) -> Event {
    let mut updated = event.clone();
    if let Some(name) = &patch.name {
        updated.name = name.clone();
    }
    if let Some(description) = &patch.description {
        updated.description = description.clone();
    }
    if let Some(start_time) = patch.start_time {
        updated.start_time = start_time;
    }
    if let Some(end_time) = patch.end_time {
        updated.end_time = end_time;
    }
    if let Some(color) = &patch.color {
        updated.color = color.clone();
    }
    updated
}

fn merge_full(event: &Event, patch: &EventPatch) -> Event {
    let mut updated = merge_shared(event, patch);
    if let Some(date) = patch.date {
        updated.date = date;
    }
    if let Some(calendar_id) = patch.calendar_id {
        updated.calendar_id = calendar_id;
    }
    updated
}

fn validate_draft(draft: &EventDraft) -> Result<(), CoreError> {
    if draft.name.trim().is_empty() {
        return Err(CoreError::InvalidInput(
            "Event name must not be empty".to_string(),
        ));
    }
    if draft.end_time < draft.start_time {
        return Err(CoreError::InvalidInput(format!(
            "Event ends at {} before it starts at {}",
            draft.end_time, draft.start_time
        )));
    }
    Ok(())
}

fn validate_patch(patch: &EventPatch) -> Result<(), CoreError> {
    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "Event name must not be empty".to_string(),
            ));
        }
    }
    if let (Some(start), Some(end)) = (patch.start_time, patch.end_time) {
        if end < start {
            return Err(CoreError::InvalidInput(format!(
                "Event ends at {} before it starts at {}",
                end, start
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use rstest::rstest;

    fn draft_on(date: NaiveDate) -> EventDraft {
        EventDraft {
            calendar_id: Uuid::now_v7(),
            name: "Test Event".to_string(),
            description: Some("a test".to_string()),
            date,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            color: "teal".to_string(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    mod expansion_tests {
        use super::*;

        #[test]
        fn none_yields_one_standalone_event() {
            let events = expand_series(&draft_on(date(2024, 6, 15)), Repetition::None).unwrap();
            assert_eq!(events.len(), 1);
            assert!(events[0].series_id.is_none());
            assert_eq!(events[0].date, date(2024, 6, 15));
        }

        #[rstest]
        #[case(Repetition::Daily, 730)]
        #[case(Repetition::Weekly, 104)]
        #[case(Repetition::Yearly, 5)]
        fn full_series_hits_cap_exactly(#[case] repetition: Repetition, #[case] cap: usize) {
            // Mid-month origin, so no index is ever skipped
            let events = expand_series(&draft_on(date(2024, 6, 15)), repetition).unwrap();
            assert_eq!(events.len(), cap);
        }

        #[rstest]
        #[case(Repetition::Daily)]
        #[case(Repetition::Weekly)]
        #[case(Repetition::Monthly)]
        #[case(Repetition::Yearly)]
        fn never_exceeds_cap(#[case] repetition: Repetition) {
            let events = expand_series(&draft_on(date(2024, 1, 31)), repetition).unwrap();
            assert!(events.len() <= repetition.cap() as usize);
        }

        #[test]
        fn daily_dates_are_consecutive() {
            let events = expand_series(&draft_on(date(2024, 2, 27)), Repetition::Daily).unwrap();
            assert_eq!(events[0].date, date(2024, 2, 27));
            assert_eq!(events[1].date, date(2024, 2, 28));
            // 2024 is a leap year
            assert_eq!(events[2].date, date(2024, 2, 29));
            assert_eq!(events[3].date, date(2024, 3, 1));
        }

        #[test]
        fn weekly_dates_step_seven_days() {
            let events = expand_series(&draft_on(date(2024, 6, 3)), Repetition::Weekly).unwrap();
            for (i, event) in events.iter().enumerate() {
                assert_eq!(event.date, date(2024, 6, 3) + Duration::days(7 * i as i64));
            }
        }

        #[test]
        fn monthly_skips_short_months() {
            // Origin on Jan 31: within the 24 monthly indices, only months
            // with a 31st day produce events
            let events = expand_series(&draft_on(date(2024, 1, 31)), Repetition::Monthly).unwrap();

            let expected: Vec<NaiveDate> = [
                (2024, 1),
                (2024, 3),
                (2024, 5),
                (2024, 7),
                (2024, 8),
                (2024, 10),
                (2024, 12),
                (2025, 1),
                (2025, 3),
                (2025, 5),
                (2025, 7),
                (2025, 8),
                (2025, 10),
                (2025, 12),
            ]
            .iter()
            .map(|&(y, m)| date(y, m, 31))
            .collect();

            let dates: Vec<NaiveDate> = events.iter().map(|e| e.date).collect();
            assert_eq!(dates, expected);
        }

        #[test]
        fn monthly_on_the_30th_skips_only_february() {
            let events = expand_series(&draft_on(date(2024, 1, 30)), Repetition::Monthly).unwrap();
            // 24 indices minus two Februaries
            assert_eq!(events.len(), 22);
            assert!(events.iter().all(|e| e.date.day() == 30));
            assert!(events.iter().all(|e| e.date.month() != 2));
        }

        #[test]
        fn monthly_mid_month_never_skips() {
            let events = expand_series(&draft_on(date(2024, 3, 12)), Repetition::Monthly).unwrap();
            assert_eq!(events.len(), 24);
            assert!(events.iter().all(|e| e.date.day() == 12));
        }

        #[test]
        fn yearly_from_leap_day_skips_common_years() {
            let events = expand_series(&draft_on(date(2024, 2, 29)), Repetition::Yearly).unwrap();
            // Indices 2024..=2028, only 2024 and 2028 are leap years
            let dates: Vec<NaiveDate> = events.iter().map(|e| e.date).collect();
            assert_eq!(dates, vec![date(2024, 2, 29), date(2028, 2, 29)]);
        }

        #[test]
        fn series_members_share_one_series_id() {
            let events = expand_series(&draft_on(date(2024, 6, 15)), Repetition::Weekly).unwrap();
            let sid = events[0].series_id.expect("series id assigned");
            assert!(events.iter().all(|e| e.series_id == Some(sid)));
        }

        #[test]
        fn distinct_runs_get_distinct_series_ids() {
            let a = expand_series(&draft_on(date(2024, 6, 15)), Repetition::Weekly).unwrap();
            let b = expand_series(&draft_on(date(2024, 6, 15)), Repetition::Weekly).unwrap();
            assert_ne!(a[0].series_id, b[0].series_id);
        }

        #[test]
        fn instance_ids_are_unique_within_series() {
            let events = expand_series(&draft_on(date(2024, 6, 15)), Repetition::Daily).unwrap();
            let mut ids: Vec<Uuid> = events.iter().map(|e| e.id).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), events.len());
        }

        #[test]
        fn output_is_ordered_by_date() {
            let events = expand_series(&draft_on(date(2024, 1, 31)), Repetition::Monthly).unwrap();
            assert!(events.windows(2).all(|w| w[0].date < w[1].date));
        }

        #[test]
        fn prototype_fields_copied_verbatim() {
            let draft = draft_on(date(2024, 6, 15));
            let events = expand_series(&draft, Repetition::Weekly).unwrap();
            for event in &events {
                assert_eq!(event.calendar_id, draft.calendar_id);
                assert_eq!(event.name, draft.name);
                assert_eq!(event.description, draft.description);
                assert_eq!(event.start_time, draft.start_time);
                assert_eq!(event.end_time, draft.end_time);
                assert_eq!(event.color, draft.color);
            }
        }

        #[test]
        fn empty_name_is_rejected() {
            let mut draft = draft_on(date(2024, 6, 15));
            draft.name = "   ".to_string();
            let result = expand_series(&draft, Repetition::Daily);
            assert!(matches!(result, Err(CoreError::InvalidInput(_))));
        }

        #[test]
        fn end_before_start_is_rejected() {
            let mut draft = draft_on(date(2024, 6, 15));
            draft.end_time = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
            let result = expand_series(&draft, Repetition::None);
            assert!(matches!(result, Err(CoreError::InvalidInput(_))));
        }
    }

    mod edit_tests {
        use super::*;

        fn weekly_series() -> Vec<Event> {
            expand_series(&draft_on(date(2024, 6, 3)), Repetition::Weekly).unwrap()
        }

        fn rename_patch(name: &str) -> EventPatch {
            EventPatch {
                name: Some(name.to_string()),
                ..Default::default()
            }
        }

        #[test]
        fn single_scope_touches_only_the_target() {
            let events: Vec<Event> = weekly_series().into_iter().take(5).collect();
            let target = events[2].id;

            let updated =
                apply_scoped_edit(&events, target, &rename_patch("Renamed"), EditScope::Single)
                    .unwrap();

            assert_eq!(updated.len(), events.len());
            for (before, after) in events.iter().zip(&updated) {
                if before.id == target {
                    assert_eq!(after.name, "Renamed");
                } else {
                    assert_eq!(before, after);
                }
            }
        }

        #[test]
        fn future_scope_respects_the_date_boundary() {
            let events: Vec<Event> = weekly_series().into_iter().take(5).collect();
            let target = events[2].id;

            let updated =
                apply_scoped_edit(&events, target, &rename_patch("Renamed"), EditScope::Future)
                    .unwrap();

            assert_eq!(updated[0].name, "Test Event");
            assert_eq!(updated[1].name, "Test Event");
            assert_eq!(updated[2].name, "Renamed");
            assert_eq!(updated[3].name, "Renamed");
            assert_eq!(updated[4].name, "Renamed");
        }

        #[test]
        fn future_cutoff_uses_the_pre_edit_date() {
            let events: Vec<Event> = weekly_series().into_iter().take(5).collect();
            let target = events[2].id;

            // Move the target earlier than the whole series while renaming
            let patch = EventPatch {
                name: Some("Moved".to_string()),
                date: Some(date(2024, 1, 1)),
                ..Default::default()
            };
            let updated = apply_scoped_edit(&events, target, &patch, EditScope::Future).unwrap();

            // Cutoff stays at the old date: earlier siblings keep their name
            assert_eq!(updated[0].name, "Test Event");
            assert_eq!(updated[1].name, "Test Event");
            assert_eq!(updated[2].name, "Moved");
            assert_eq!(updated[2].date, date(2024, 1, 1));
            assert_eq!(updated[3].name, "Moved");
            // Dates of the others are untouched
            assert_eq!(updated[3].date, events[3].date);
        }

        #[test]
        fn all_scope_never_moves_other_dates() {
            let events: Vec<Event> = weekly_series().into_iter().take(5).collect();
            let target = events[1].id;

            let patch = EventPatch {
                color: Some("red".to_string()),
                date: Some(date(2025, 1, 1)),
                ..Default::default()
            };
            let updated = apply_scoped_edit(&events, target, &patch, EditScope::All).unwrap();

            for (before, after) in events.iter().zip(&updated) {
                assert_eq!(after.color, "red");
                if before.id == target {
                    assert_eq!(after.date, date(2025, 1, 1));
                } else {
                    assert_eq!(after.date, before.date);
                }
            }
        }

        #[test]
        fn calendar_id_is_never_propagated() {
            let events: Vec<Event> = weekly_series().into_iter().take(3).collect();
            let target = events[0].id;
            let other_calendar = Uuid::now_v7();

            let patch = EventPatch {
                calendar_id: Some(other_calendar),
                ..Default::default()
            };
            let updated = apply_scoped_edit(&events, target, &patch, EditScope::All).unwrap();

            assert_eq!(updated[0].calendar_id, other_calendar);
            assert_eq!(updated[1].calendar_id, events[1].calendar_id);
            assert_eq!(updated[2].calendar_id, events[2].calendar_id);
        }

        #[test]
        fn description_can_be_cleared() {
            let events: Vec<Event> = weekly_series().into_iter().take(2).collect();
            let patch = EventPatch {
                description: Some(None),
                ..Default::default()
            };
            let updated =
                apply_scoped_edit(&events, events[0].id, &patch, EditScope::All).unwrap();
            assert!(updated.iter().all(|e| e.description.is_none()));
        }

        #[test]
        fn standalone_event_degrades_any_scope_to_single() {
            let mut events = weekly_series();
            let standalone =
                expand_series(&draft_on(date(2024, 6, 3)), Repetition::None).unwrap();
            let standalone_id = standalone[0].id;
            events.extend(standalone);

            let updated = apply_scoped_edit(
                &events,
                standalone_id,
                &rename_patch("Standalone"),
                EditScope::All,
            )
            .unwrap();

            // Only the standalone event changed, the series is untouched
            let renamed: Vec<&Event> =
                updated.iter().filter(|e| e.name == "Standalone").collect();
            assert_eq!(renamed.len(), 1);
            assert_eq!(renamed[0].id, standalone_id);
        }

        #[test]
        fn other_series_are_never_affected() {
            let mut events = weekly_series();
            let other = expand_series(&draft_on(date(2024, 6, 3)), Repetition::Weekly).unwrap();
            let other_first = other[0].id;
            events.extend(other);

            let updated =
                apply_scoped_edit(&events, other_first, &rename_patch("Other"), EditScope::All)
                    .unwrap();

            let untouched: Vec<&Event> =
                updated.iter().filter(|e| e.name == "Test Event").collect();
            assert_eq!(untouched.len(), weekly_series().len());
        }

        #[test]
        fn event_count_is_preserved() {
            let events = weekly_series();
            let updated = apply_scoped_edit(
                &events,
                events[0].id,
                &rename_patch("Renamed"),
                EditScope::Future,
            )
            .unwrap();
            assert_eq!(updated.len(), events.len());
        }

        #[test]
        fn unknown_target_signals_not_found() {
            let events = weekly_series();
            let result =
                apply_scoped_edit(&events, Uuid::now_v7(), &rename_patch("x"), EditScope::All);
            assert!(matches!(result, Err(CoreError::NotFound(_))));
        }
    }

    mod delete_tests {
        use super::*;

        fn weekly_series() -> Vec<Event> {
            expand_series(&draft_on(date(2024, 6, 3)), Repetition::Weekly).unwrap()
        }

        #[test]
        fn single_scope_resolves_one_id() {
            let events = weekly_series();
            let ids = resolve_scoped_delete(&events, events[3].id, EditScope::Single).unwrap();
            assert_eq!(ids, vec![events[3].id]);
        }

        #[test]
        fn future_scope_resolves_target_and_later() {
            let events: Vec<Event> = weekly_series().into_iter().take(5).collect();
            let ids = resolve_scoped_delete(&events, events[2].id, EditScope::Future).unwrap();
            let expected: Vec<Uuid> = events[2..].iter().map(|e| e.id).collect();
            assert_eq!(ids, expected);
        }

        #[test]
        fn all_scope_resolves_the_whole_series() {
            let events = weekly_series();
            let ids = resolve_scoped_delete(&events, events[50].id, EditScope::All).unwrap();
            assert_eq!(ids.len(), events.len());
        }

        #[test]
        fn all_scope_spares_other_series() {
            let mut events = weekly_series();
            let other = expand_series(&draft_on(date(2024, 6, 3)), Repetition::Daily).unwrap();
            let other_len = other.len();
            events.extend(other);

            let ids = resolve_scoped_delete(&events, events[0].id, EditScope::All).unwrap();
            assert_eq!(ids.len(), events.len() - other_len);
        }

        #[test]
        fn standalone_event_ignores_wider_scopes() {
            let standalone =
                expand_series(&draft_on(date(2024, 6, 3)), Repetition::None).unwrap();
            let ids =
                resolve_scoped_delete(&standalone, standalone[0].id, EditScope::All).unwrap();
            assert_eq!(ids, vec![standalone[0].id]);
        }

        #[test]
        fn unknown_target_signals_not_found() {
            let events = weekly_series();
            let result = resolve_scoped_delete(&events, Uuid::now_v7(), EditScope::Single);
            assert!(matches!(result, Err(CoreError::NotFound(_))));
        }

        #[test]
        fn expansion_then_delete_all_round_trips() {
            let events = expand_series(&draft_on(date(2024, 1, 31)), Repetition::Monthly).unwrap();
            let ids = resolve_scoped_delete(&events, events[5].id, EditScope::All).unwrap();
            let generated: Vec<Uuid> = events.iter().map(|e| e.id).collect();
            assert_eq!(ids, generated);
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_repetition() -> impl Strategy<Value = Repetition> {
            prop_oneof![
                Just(Repetition::Daily),
                Just(Repetition::Weekly),
                Just(Repetition::Monthly),
                Just(Repetition::Yearly),
            ]
        }

        proptest! {
            #[test]
            fn expansion_is_bounded_sorted_and_consistent(
                year in 1990i32..2100,
                month in 1u32..=12,
                day in 1u32..=31,
                repetition in arb_repetition(),
            ) {
                let Some(origin) = NaiveDate::from_ymd_opt(year, month, day) else {
                    return Ok(());
                };
                let events = expand_series(&draft_on(origin), repetition).unwrap();

                prop_assert!(events.len() <= repetition.cap() as usize);
                prop_assert!(!events.is_empty());
                prop_assert_eq!(events[0].date, origin);
                prop_assert!(events.windows(2).all(|w| w[0].date < w[1].date));

                let sid = events[0].series_id;
                prop_assert!(sid.is_some());
                prop_assert!(events.iter().all(|e| e.series_id == sid));
            }
        }
    }
}
