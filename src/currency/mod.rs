//! Presentation formatting for the single supported locale (pt-BR, Brazilian real).
//!
//! Amounts are carried at full precision everywhere else; rounding to cents
//! happens only here.

use chrono::NaiveDate;

use crate::domain::Direction;

pub const CURRENCY_SYMBOL: &str = "R$";

/// Column headers for a Sunday-first calendar.
pub const WEEKDAY_HEADERS: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];

const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Rounds half away from zero to two decimals, folding `-0.00` into `0.00`.
pub fn round_cents(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// `R$ 1234.56`
pub fn format_currency(value: f64) -> String {
    format!("{} {:.2}", CURRENCY_SYMBOL, round_cents(value))
}

/// `+ R$ 10.00` for inflows, `- R$ 10.00` for outflows.
pub fn format_signed(amount: f64, direction: Direction) -> String {
    format!("{} {}", direction.sign(), format_currency(amount.abs()))
}

/// `DD/MM/YYYY`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Month name for a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}

/// `Janeiro 2025`
pub fn month_title(year: i32, month: u32) -> String {
    match month_name(month) {
        Some(name) => format!("{name} {year}"),
        None => format!("{month:02}/{year}"),
    }
}
