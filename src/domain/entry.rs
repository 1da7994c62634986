use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Identifier assigned to an entry at creation time (milliseconds since the epoch).
pub type EntryId = i64;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One recorded income or expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub name: String,
    pub amount: f64,
    pub date: NaiveDate,
}

impl Entry {
    /// Builds an entry from raw user input, rejecting blank names,
    /// non-positive amounts and dates that are not `YYYY-MM-DD`.
    pub fn validated(
        id: EntryId,
        name: &str,
        amount: f64,
        date: &str,
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ValidationError::InvalidAmount(amount));
        }
        let date = parse_entry_date(date)?;
        Ok(Self {
            id,
            name: name.to_string(),
            amount,
            date,
        })
    }
}

/// Parses an ISO calendar date as stored in the ledger blob.
pub fn parse_entry_date(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(input.to_string()))
}

/// Whether money enters or leaves the household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inflow,
    Outflow,
}

impl Direction {
    pub fn sign(self) -> char {
        match self {
            Direction::Inflow => '+',
            Direction::Outflow => '-',
        }
    }
}

/// The three collections an entry can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryCategory {
    Income,
    FixedExpenses,
    VariableExpenses,
}

impl EntryCategory {
    /// Collections in display (and event) order.
    pub const ALL: [EntryCategory; 3] = [
        EntryCategory::Income,
        EntryCategory::FixedExpenses,
        EntryCategory::VariableExpenses,
    ];

    pub fn direction(self) -> Direction {
        match self {
            EntryCategory::Income => Direction::Inflow,
            EntryCategory::FixedExpenses | EntryCategory::VariableExpenses => Direction::Outflow,
        }
    }

    /// Field name used in the persisted blob.
    pub fn key(self) -> &'static str {
        match self {
            EntryCategory::Income => "income",
            EntryCategory::FixedExpenses => "fixedExpenses",
            EntryCategory::VariableExpenses => "variableExpenses",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntryCategory::Income => "Renda",
            EntryCategory::FixedExpenses => "Gastos Fixos",
            EntryCategory::VariableExpenses => "Gastos Variáveis",
        }
    }
}

impl fmt::Display for EntryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category `{0}` (expected income, fixed or variable)")]
pub struct UnknownCategory(pub String);

impl FromStr for EntryCategory {
    type Err = UnknownCategory;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "income" | "renda" => Ok(EntryCategory::Income),
            "fixed" | "fixedexpenses" | "gastos-fixos" => Ok(EntryCategory::FixedExpenses),
            "variable" | "variableexpenses" | "gastos-variaveis" => {
                Ok(EntryCategory::VariableExpenses)
            }
            _ => Err(UnknownCategory(input.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validated_trims_name_and_parses_date() {
        let entry = Entry::validated(1, "  Salary ", 1000.0, "2025-01-15").unwrap();
        assert_eq!(entry.name, "Salary");
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    }

    #[test]
    fn validated_rejects_bad_input() {
        assert_eq!(
            Entry::validated(1, "   ", 10.0, "2025-01-01").unwrap_err(),
            ValidationError::EmptyName
        );
        assert!(matches!(
            Entry::validated(1, "Rent", 0.0, "2025-01-01"),
            Err(ValidationError::InvalidAmount(_))
        ));
        assert!(matches!(
            Entry::validated(1, "Rent", f64::NAN, "2025-01-01"),
            Err(ValidationError::InvalidAmount(_))
        ));
        assert!(matches!(
            Entry::validated(1, "Rent", -5.0, "2025-01-01"),
            Err(ValidationError::InvalidAmount(_))
        ));
        assert!(matches!(
            Entry::validated(1, "Rent", 10.0, "2025-02-30"),
            Err(ValidationError::InvalidDate(_))
        ));
    }

    #[test]
    fn category_parses_english_and_portuguese_names() {
        assert_eq!("income".parse::<EntryCategory>(), Ok(EntryCategory::Income));
        assert_eq!(
            "Gastos-Fixos".parse::<EntryCategory>(),
            Ok(EntryCategory::FixedExpenses)
        );
        assert_eq!(
            "variableExpenses".parse::<EntryCategory>(),
            Ok(EntryCategory::VariableExpenses)
        );
        assert!("savings".parse::<EntryCategory>().is_err());
    }

    #[test]
    fn entry_serializes_date_as_iso_string() {
        let entry = Entry::validated(7, "Rent", 800.0, "2025-03-05").unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["date"], "2025-03-05");
        assert_eq!(json["id"], 7);
    }
}
