//! Month grid generation for the calendar view.
//!
//! A grid always holds six weeks (42 cells) starting on Sunday: the tail of the
//! previous month, every day of the requested month, then the head of the next
//! month. Only current-month cells carry events or the "today" marker.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::domain::{Direction, Ledger};
use crate::errors::{LedgerError, Result};

/// Cells in a rendered month: six rows of seven days.
pub const GRID_CELLS: usize = 42;

/// One cash-flow marker drawn inside a calendar cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEvent {
    pub label: String,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub day_number: u32,
    pub belongs_to_current_month: bool,
    pub is_today: bool,
    pub events: Vec<CalendarEvent>,
}

impl CalendarCell {
    fn adjacent(date: NaiveDate) -> Self {
        Self {
            date,
            day_number: date.day(),
            belongs_to_current_month: false,
            is_today: false,
            events: Vec::new(),
        }
    }
}

/// A `(year, month)` pair the calendar is focused on; `month` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthCursor {
    pub year: i32,
    pub month: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(LedgerError::InvalidInput(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Moves by `direction` months, rolling the year over as needed. Steps past
    /// the representable years stop at the first or last month.
    pub fn change_month(&mut self, direction: i32) {
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(direction);
        match i32::try_from(index.div_euclid(12)) {
            Ok(year) => {
                self.year = year;
                self.month = index.rem_euclid(12) as u32 + 1;
            }
            Err(_) if index < 0 => *self = Self { year: i32::MIN, month: 1 },
            Err(_) => *self = Self { year: i32::MAX, month: 12 },
        }
    }

    pub fn first_day(&self) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .ok_or_else(|| out_of_range(self.year, self.month))
    }
}

pub struct CalendarService;

impl CalendarService {
    /// Number of days in `month` of `year`.
    pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
        let first = MonthCursor::new(year, month)?.first_day()?;
        let mut next = MonthCursor::containing(first);
        next.change_month(1);
        let next_first = next.first_day()?;
        Ok((next_first - first).num_days() as u32)
    }

    /// Weekday of the 1st, counted from Sunday = 0.
    pub fn first_weekday(year: i32, month: u32) -> Result<u32> {
        let first = MonthCursor::new(year, month)?.first_day()?;
        Ok(first.weekday().num_days_from_sunday())
    }

    /// Builds the 42-cell grid for `year`/`month`, marking `reference` as today and
    /// attaching every ledger entry dated inside the month.
    pub fn build_grid(
        year: i32,
        month: u32,
        ledger: &Ledger,
        reference: NaiveDate,
    ) -> Result<Vec<CalendarCell>> {
        let first = MonthCursor::new(year, month)?.first_day()?;
        let leading = first.weekday().num_days_from_sunday();
        let days_in_month = Self::days_in_month(year, month)?;

        let mut cells = Vec::with_capacity(GRID_CELLS);
        for offset in (1..=leading).rev() {
            let date = first
                .checked_sub_days(Days::new(u64::from(offset)))
                .ok_or_else(|| out_of_range(year, month))?;
            cells.push(CalendarCell::adjacent(date));
        }

        for day in 1..=days_in_month {
            let date = first
                .with_day(day)
                .ok_or_else(|| out_of_range(year, month))?;
            let events = ledger
                .iter_all()
                .filter(|(_, entry)| entry.date == date)
                .map(|(category, entry)| CalendarEvent {
                    label: entry.name.clone(),
                    direction: category.direction(),
                })
                .collect();
            cells.push(CalendarCell {
                date,
                day_number: day,
                belongs_to_current_month: true,
                is_today: date == reference,
                events,
            });
        }

        let last = first
            .with_day(days_in_month)
            .ok_or_else(|| out_of_range(year, month))?;
        let trailing = GRID_CELLS - cells.len();
        for offset in 1..=trailing {
            let date = last
                .checked_add_days(Days::new(offset as u64))
                .ok_or_else(|| out_of_range(year, month))?;
            cells.push(CalendarCell::adjacent(date));
        }

        tracing::trace!(year, month, leading, days_in_month, trailing, "calendar grid built");
        Ok(cells)
    }
}

fn out_of_range(year: i32, month: u32) -> LedgerError {
    LedgerError::InvalidInput(format!(
        "{year}-{month:02} is outside the supported calendar range"
    ))
}
