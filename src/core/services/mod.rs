pub mod calendar_service;
pub mod summary_service;

pub use calendar_service::{CalendarCell, CalendarEvent, CalendarService, MonthCursor, GRID_CELLS};
pub use summary_service::{MonthlySeries, SummaryService, Totals};
