use serde::Serialize;

use crate::domain::{EntryCategory, Ledger};

/// Totals over the whole ledger, unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub total_income: f64,
    pub total_fixed: f64,
    pub total_variable: f64,
    pub balance: f64,
}

impl Totals {
    pub fn total_expenses(&self) -> f64 {
        self.total_fixed + self.total_variable
    }
}

/// Income and expense series aligned positionally with `labels`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySeries {
    pub labels: Vec<String>,
    pub income: Vec<f64>,
    pub expenses: Vec<f64>,
}

/// Stateless aggregation over a ledger snapshot.
pub struct SummaryService;

impl SummaryService {
    pub fn category_total(ledger: &Ledger, category: EntryCategory) -> f64 {
        ledger
            .entries(category)
            .iter()
            .map(|entry| entry.amount)
            .sum()
    }

    pub fn totals(ledger: &Ledger) -> Totals {
        let total_income = Self::category_total(ledger, EntryCategory::Income);
        let total_fixed = Self::category_total(ledger, EntryCategory::FixedExpenses);
        let total_variable = Self::category_total(ledger, EntryCategory::VariableExpenses);
        Totals {
            total_income,
            total_fixed,
            total_variable,
            balance: total_income - total_fixed - total_variable,
        }
    }

    /// `[fixed, variable]`, the two slices of the expense breakdown.
    pub fn category_split(ledger: &Ledger) -> [f64; 2] {
        [
            Self::category_total(ledger, EntryCategory::FixedExpenses),
            Self::category_total(ledger, EntryCategory::VariableExpenses),
        ]
    }

    /// Current totals placed in the last slot, every earlier slot zero.
    ///
    /// Entries are not bucketed by month; the series reflects a single
    /// snapshot of the ledger.
    pub fn monthly_series<S: AsRef<str>>(ledger: &Ledger, month_labels: &[S]) -> MonthlySeries {
        let totals = Self::totals(ledger);
        let mut income = vec![0.0; month_labels.len()];
        let mut expenses = vec![0.0; month_labels.len()];
        if let (Some(last_income), Some(last_expense)) = (income.last_mut(), expenses.last_mut()) {
            *last_income = totals.total_income;
            *last_expense = totals.total_expenses();
        }
        MonthlySeries {
            labels: month_labels
                .iter()
                .map(|label| label.as_ref().to_string())
                .collect(),
            income,
            expenses,
        }
    }
}
