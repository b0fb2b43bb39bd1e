use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};
use chrono_humanize::Humanize;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ViewEvent {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub calendar_name: String,
    pub color: String,
    pub is_series: bool,
}

#[derive(Debug, Clone)]
pub struct ViewTask {
    pub id: Uuid,
    pub name: String,
    pub done: bool,
    pub due_date: Option<NaiveDate>,
    pub event_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ViewCalendar {
    pub name: String,
    pub color: String,
    pub event_count: usize,
}

pub fn display_events(events: &[ViewEvent]) {
    if events.is_empty() {
        println!("No events found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Time", "Name", "Calendar"]);

    let today = Local::now().date_naive();

    for event in events {
        let mut row = Row::new();
        row.add_cell(Cell::new(&event.id.to_string()[..7]));

        let mut date_cell = Cell::new(event.date.format("%a %Y-%m-%d").to_string());
        if event.date == today {
            date_cell = date_cell.fg(Color::Yellow);
        } else if event.date < today {
            date_cell = date_cell.fg(Color::DarkGrey);
        }
        row.add_cell(date_cell);

        row.add_cell(Cell::new(format!(
            "{} - {}",
            event.start_time.format("%H:%M"),
            event.end_time.format("%H:%M")
        )));

        // Series marker on recurring events
        let mut display_name = String::new();
        if event.is_series {
            display_name.push('↻');
            display_name.push(' ');
        }
        display_name.push_str(&event.name);

        let mut name_cell = Cell::new(display_name);
        if let Some(color) = terminal_color(&event.color) {
            name_cell = name_cell.fg(color);
        }
        if event.date < today {
            name_cell = name_cell.fg(Color::DarkGrey);
        }
        row.add_cell(name_cell);

        row.add_cell(Cell::new(&event.calendar_name));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_tasks(tasks: &[ViewTask]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Due", "Event", "Created"]);

    let today = Local::now().date_naive();

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(&task.id.to_string()[..7]));

        let mut name_cell = Cell::new(&task.name);
        if task.done {
            name_cell = name_cell
                .add_attribute(Attribute::CrossedOut)
                .fg(Color::DarkGrey);
        }
        row.add_cell(name_cell);

        let due_cell = if let Some(due) = task.due_date {
            let text = due.format("%Y-%m-%d").to_string();
            if task.done {
                Cell::new(text)
            } else if due < today {
                Cell::new(text).fg(Color::Red) // Overdue
            } else if due == today {
                Cell::new(text).fg(Color::Yellow) // Due today
            } else {
                Cell::new(text)
            }
        } else {
            Cell::new("None")
        };
        row.add_cell(due_cell);

        row.add_cell(Cell::new(task.event_name.as_deref().unwrap_or("None")));
        row.add_cell(Cell::new(task.created_at.humanize()));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_calendars(calendars: &[ViewCalendar]) {
    if calendars.is_empty() {
        println!("No calendars found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Name", "Color", "Events"]);

    for calendar in calendars {
        let mut row = Row::new();
        row.add_cell(Cell::new(&calendar.name));

        let mut color_cell = Cell::new(&calendar.color);
        if let Some(color) = terminal_color(&calendar.color) {
            color_cell = color_cell.fg(color);
        }
        row.add_cell(color_cell);

        row.add_cell(Cell::new(calendar.event_count.to_string()));
        table.add_row(row);
    }

    println!("{table}");
}

/// Best-effort mapping from stored color names to terminal colors
fn terminal_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "blue" => Some(Color::Blue),
        "yellow" => Some(Color::Yellow),
        "magenta" | "purple" => Some(Color::Magenta),
        "cyan" | "teal" => Some(Color::Cyan),
        "grey" | "gray" => Some(Color::Grey),
        "white" => Some(Color::White),
        _ => None,
    }
}
