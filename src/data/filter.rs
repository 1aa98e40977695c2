use std::collections::{BTreeMap, BTreeSet};

use super::category::Category;
use super::model::BenchmarkResult;

#[cfg(test)]
mod tests;

// ---------------------------------------------------------------------------
// Filter predicate: which values are selected per category
// ---------------------------------------------------------------------------

/// Per-category selection: category → set of selected tag values.
/// An empty set means "no filter" for that category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    selected: BTreeMap<Category, BTreeSet<String>>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            selected: Category::ALL
                .into_iter()
                .map(|c| (c, BTreeSet::new()))
                .collect(),
        }
    }
}

impl FilterState {
    /// Flip membership of `value` in `category`. Returns whether the value is
    /// selected afterwards.
    pub fn toggle(&mut self, category: Category, value: &str) -> bool {
        let selected = self.selected.entry(category).or_default();
        if selected.remove(value) {
            false
        } else {
            selected.insert(value.to_string());
            true
        }
    }

    /// Clear every category.
    pub fn reset(&mut self) {
        for selected in self.selected.values_mut() {
            selected.clear();
        }
    }

    pub fn selected(&self, category: Category) -> &BTreeSet<String> {
        &self.selected[&category]
    }

    pub fn is_selected(&self, category: Category, value: &str) -> bool {
        self.selected(category).contains(value)
    }

    /// True when no category constrains anything.
    pub fn is_empty(&self) -> bool {
        self.selected.values().all(BTreeSet::is_empty)
    }

    /// Whether `result` passes every category: OR within a category, AND
    /// across categories.
    pub fn matches(&self, result: &BenchmarkResult) -> bool {
        self.selected.iter().all(|(category, selected)| {
            selected.is_empty()
                || result
                    .tags
                    .get(*category)
                    .is_some_and(|value| selected.contains(value))
        })
    }
}

/// Return indices of results that pass all active filters, in input order.
pub fn filtered_indices(results: &[BenchmarkResult], filters: &FilterState) -> Vec<usize> {
    if filters.is_empty() {
        return (0..results.len()).collect();
    }
    results
        .iter()
        .enumerate()
        .filter(|(_, r)| filters.matches(r))
        .map(|(i, _)| i)
        .collect()
}

/// Return the results that pass all active filters, in input order.
pub fn apply<'a>(results: &'a [BenchmarkResult], filters: &FilterState) -> Vec<&'a BenchmarkResult> {
    results.iter().filter(|r| filters.matches(r)).collect()
}
