use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use finance_tracker::{
    core::ledger_store::{encode_ledger, load_ledger},
    core::services::{CalendarService, SummaryService},
    domain::{Entry, EntryCategory, Ledger},
    storage::{BlobStore, JsonFileStore},
};
use tempfile::tempdir;

fn build_sample_ledger(entry_count: usize) -> Ledger {
    let mut ledger = Ledger::new();
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).expect("start date");

    for idx in 0..entry_count {
        let date = start
            .checked_add_days(Days::new((idx % 365) as u64))
            .expect("date in range");
        let entry = Entry {
            id: idx as i64 + 1,
            name: format!("Entry {idx}"),
            amount: 10.0 + (idx % 100) as f64,
            date,
        };
        let category = EntryCategory::ALL[idx % EntryCategory::ALL.len()];
        match category {
            EntryCategory::Income => ledger.income.push(entry),
            EntryCategory::FixedExpenses => ledger.fixed_expenses.push(entry),
            EntryCategory::VariableExpenses => ledger.variable_expenses.push(entry),
        }
    }
    ledger
}

fn bench_aggregation(c: &mut Criterion) {
    let ledger = build_sample_ledger(10_000);
    c.bench_function("totals_10k", |b| {
        b.iter(|| black_box(SummaryService::totals(black_box(&ledger))))
    });
}

fn bench_calendar(c: &mut Criterion) {
    let ledger = build_sample_ledger(10_000);
    let today = NaiveDate::from_ymd_opt(2025, 3, 10).expect("today");
    c.bench_function("build_grid_10k", |b| {
        b.iter(|| {
            let cells = CalendarService::build_grid(2025, 3, black_box(&ledger), today)
                .expect("grid");
            black_box(cells);
        })
    });
}

fn bench_blob_io(c: &mut Criterion) {
    let ledger = build_sample_ledger(10_000);
    let dir = tempdir().expect("tempdir");
    let storage = JsonFileStore::new(dir.path().to_path_buf()).expect("json store");
    let encoded = encode_ledger(&ledger).expect("encode");

    c.bench_function("blob_save_10k", |b| {
        b.iter(|| storage.write("financeData", black_box(&encoded)).expect("write"))
    });

    c.bench_function("blob_load_10k", |b| {
        b.iter(|| black_box(load_ledger(&storage, "financeData")))
    });
}

criterion_group!(benches, bench_aggregation, bench_calendar, bench_blob_io);
criterion_main!(benches);
