use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::services::{CalendarCell, CalendarService, MonthCursor};
use crate::currency::{month_title, WEEKDAY_HEADERS};

use super::expect_args;

const CALENDAR_USAGE: &str = "calendar [YYYY-MM]";
const CELL_WIDTH: usize = 5;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "calendar",
            "Show the month grid with entries",
            CALENDAR_USAGE,
            cmd_calendar,
        )
        .with_aliases(&["cal"]),
        CommandEntry::new("next", "Move the calendar one month ahead", "next", cmd_next),
        CommandEntry::new("prev", "Move the calendar one month back", "prev", cmd_prev),
    ]
}

fn cmd_calendar(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    expect_args(args, 0..=1, CALENDAR_USAGE)?;
    if let Some(raw) = args.first() {
        context.cursor = parse_month(raw)?;
    }
    render(context)
}

fn cmd_next(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    expect_args(args, 0..=0, "next")?;
    context.cursor.change_month(1);
    render(context)
}

fn cmd_prev(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    expect_args(args, 0..=0, "prev")?;
    context.cursor.change_month(-1);
    render(context)
}

fn render(context: &ShellContext) -> CommandResult {
    let MonthCursor { year, month } = context.cursor;
    let today = context.store.clock().today();
    let cells = CalendarService::build_grid(year, month, context.store.snapshot(), today)?;

    output::section(month_title(year, month));
    for line in grid_lines(&cells) {
        output::info(line);
    }
    let events = event_lines(&cells);
    if !events.is_empty() {
        output::info("");
        for line in events {
            output::info(line);
        }
    }
    Ok(())
}

pub(crate) fn parse_month(raw: &str) -> Result<MonthCursor, CommandError> {
    let invalid = || CommandError::InvalidArguments(format!("`{raw}` is not a YYYY-MM month"));
    let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    Ok(MonthCursor::new(year, month)?)
}

/// Weekday header plus six rows. Today is bracketed, adjacent-month days are
/// dotted and days carrying entries get a trailing `*`.
pub(crate) fn grid_lines(cells: &[CalendarCell]) -> Vec<String> {
    let header: String = WEEKDAY_HEADERS
        .iter()
        .map(|day| format!("{day:>width$}", width = CELL_WIDTH))
        .collect();
    let mut lines = vec![header];
    for week in cells.chunks(7) {
        lines.push(week.iter().map(cell_text).collect());
    }
    lines
}

fn cell_text(cell: &CalendarCell) -> String {
    let text = if !cell.belongs_to_current_month {
        format!(".{:02}", cell.day_number)
    } else if cell.is_today {
        format!("[{:02}]", cell.day_number)
    } else {
        format!("{:02}", cell.day_number)
    };
    let marker = if cell.events.is_empty() { "" } else { "*" };
    format!("{:>width$}", format!("{text}{marker}"), width = CELL_WIDTH)
}

/// One line per day with entries: `15: + Salary, - Rent`.
pub(crate) fn event_lines(cells: &[CalendarCell]) -> Vec<String> {
    cells
        .iter()
        .filter(|cell| cell.belongs_to_current_month && !cell.events.is_empty())
        .map(|cell| {
            let events: Vec<String> = cell
                .events
                .iter()
                .map(|event| format!("{} {}", event.direction.sign(), event.label))
                .collect();
            format!("  {:02}: {}", cell.day_number, events.join(", "))
        })
        .collect()
}
