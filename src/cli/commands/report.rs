use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::services::{MonthlySeries, SummaryService};
use crate::currency::format_currency;
use crate::domain::EntryCategory;

use super::expect_args;

const BAR_WIDTH: usize = 30;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("summary", "Show totals and balance", "summary", cmd_summary),
        CommandEntry::new(
            "chart",
            "Show the expense split and income vs expenses",
            "chart",
            cmd_chart,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    expect_args(args, 0..=0, "summary")?;
    let totals = SummaryService::totals(context.store.snapshot());

    output::section("Resumo");
    output::info(format!("  {:<18} {}", "Renda total", format_currency(totals.total_income)));
    output::info(format!("  {:<18} {}", "Gastos fixos", format_currency(totals.total_fixed)));
    output::info(format!(
        "  {:<18} {}",
        "Gastos variáveis",
        format_currency(totals.total_variable)
    ));
    let balance = format_currency(totals.balance);
    output::info(format!(
        "  {:<18} {}",
        "Saldo",
        output::signed_tone(&balance, totals.balance >= 0.0)
    ));
    Ok(())
}

fn cmd_chart(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    expect_args(args, 0..=0, "chart")?;
    let ledger = context.store.snapshot();

    output::section("Distribuição de gastos");
    let split = SummaryService::category_split(ledger);
    let categories = [EntryCategory::FixedExpenses, EntryCategory::VariableExpenses];
    for line in split_lines(&categories, &split) {
        output::info(line);
    }

    output::section("Renda x Gastos");
    let series = SummaryService::monthly_series(ledger, &context.config.month_labels);
    for line in series_lines(&series) {
        output::info(line);
    }
    Ok(())
}

pub(crate) fn split_lines(categories: &[EntryCategory], values: &[f64]) -> Vec<String> {
    let max = values.iter().copied().fold(0.0, f64::max);
    categories
        .iter()
        .zip(values)
        .map(|(category, value)| {
            format!(
                "  {:<18} {:>14} {}",
                category.label(),
                format_currency(*value),
                bar(*value, max, BAR_WIDTH)
            )
        })
        .collect()
}

pub(crate) fn series_lines(series: &MonthlySeries) -> Vec<String> {
    let max = series
        .income
        .iter()
        .chain(&series.expenses)
        .copied()
        .fold(0.0, f64::max);
    series
        .labels
        .iter()
        .zip(series.income.iter().zip(&series.expenses))
        .flat_map(|(label, (income, expenses))| {
            [
                format!(
                    "  {:<5} renda  {:>14} {}",
                    label,
                    format_currency(*income),
                    bar(*income, max, BAR_WIDTH)
                ),
                format!(
                    "  {:<5} gastos {:>14} {}",
                    "",
                    format_currency(*expenses),
                    bar(*expenses, max, BAR_WIDTH)
                ),
            ]
        })
        .collect()
}

/// Horizontal bar proportional to `value / max`, at most `width` cells long.
pub(crate) fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let cells = ((value / max) * width as f64).round() as usize;
    "#".repeat(cells.clamp(1, width))
}
