use serde::{Deserialize, Serialize};

use super::entry::{Entry, EntryCategory, EntryId};

/// Aggregate root holding the three entry collections in insertion order.
///
/// The serialized form matches the persisted blob:
/// `{"income": [...], "fixedExpenses": [...], "variableExpenses": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    pub income: Vec<Entry>,
    pub fixed_expenses: Vec<Entry>,
    pub variable_expenses: Vec<Entry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self, category: EntryCategory) -> &[Entry] {
        match category {
            EntryCategory::Income => &self.income,
            EntryCategory::FixedExpenses => &self.fixed_expenses,
            EntryCategory::VariableExpenses => &self.variable_expenses,
        }
    }

    pub(crate) fn entries_mut(&mut self, category: EntryCategory) -> &mut Vec<Entry> {
        match category {
            EntryCategory::Income => &mut self.income,
            EntryCategory::FixedExpenses => &mut self.fixed_expenses,
            EntryCategory::VariableExpenses => &mut self.variable_expenses,
        }
    }

    /// Every entry tagged with its collection, income first, then fixed, then variable.
    pub fn iter_all(&self) -> impl Iterator<Item = (EntryCategory, &Entry)> + '_ {
        EntryCategory::ALL.into_iter().flat_map(move |category| {
            self.entries(category)
                .iter()
                .map(move |entry| (category, entry))
        })
    }

    pub fn len(&self) -> usize {
        self.income.len() + self.fixed_expenses.len() + self.variable_expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Highest id across all collections, if any entry exists.
    pub fn max_id(&self) -> Option<EntryId> {
        self.iter_all().map(|(_, entry)| entry.id).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: EntryId, name: &str) -> Entry {
        Entry::validated(id, name, 10.0, "2025-01-01").unwrap()
    }

    #[test]
    fn iter_all_walks_collections_in_display_order() {
        let mut ledger = Ledger::new();
        ledger.variable_expenses.push(entry(3, "Cinema"));
        ledger.income.push(entry(1, "Salary"));
        ledger.fixed_expenses.push(entry(2, "Rent"));

        let names: Vec<_> = ledger
            .iter_all()
            .map(|(_, entry)| entry.name.as_str())
            .collect();
        assert_eq!(names, ["Salary", "Rent", "Cinema"]);
        assert_eq!(ledger.max_id(), Some(3));
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn serializes_with_blob_field_names() {
        let json = serde_json::to_value(Ledger::new()).unwrap();
        assert!(json.get("income").is_some());
        assert!(json.get("fixedExpenses").is_some());
        assert!(json.get("variableExpenses").is_some());
    }
}
