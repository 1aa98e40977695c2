use crate::color::SolverColors;
use crate::data::category::Category;
use crate::data::filter::{filtered_indices, FilterState};
use crate::data::loader::{spawn_load, LoadRequest, PendingLoad};
use crate::data::model::BenchmarkSet;
use crate::data::series::{aggregate, ChartData};

#[cfg(test)]
mod tests;

// ---------------------------------------------------------------------------
// Filter store
// ---------------------------------------------------------------------------

type Observer = Box<dyn FnMut(&FilterState)>;

/// Owns the current [`FilterState`]. The only write paths are [`toggle`] and
/// [`reset`]; every write bumps the revision and notifies observers before
/// returning.
///
/// [`toggle`]: FilterStore::toggle
/// [`reset`]: FilterStore::reset
#[derive(Default)]
pub struct FilterStore {
    state: FilterState,
    revision: u64,
    observers: Vec<Observer>,
}

impl FilterStore {
    pub fn read(&self) -> &FilterState {
        &self.state
    }

    /// Incremented on every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&FilterState) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Flip `value` in `category`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, category: Category, value: &str) -> bool {
        let selected = self.state.toggle(category, value);
        log::debug!(
            "filter {category}: {} '{value}'",
            if selected { "selected" } else { "deselected" }
        );
        self.changed();
        selected
    }

    pub fn reset(&mut self) {
        self.state.reset();
        log::debug!("filters reset");
        self.changed();
    }

    fn changed(&mut self) {
        self.revision += 1;
        for observer in &mut self.observers {
            observer(&self.state);
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded results (None until a load resolves).
    pub dataset: Option<BenchmarkSet>,

    /// Per-category filter selections.
    pub filters: FilterStore,

    /// Indices of results passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Aggregated chart input for `visible_indices` (cached).
    pub chart: ChartData,

    /// Colours for every solver in the dataset.
    pub colors: SolverColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Load currently running in the background.
    pub pending: Option<PendingLoad>,

    /// What was requested last, so metadata can be added to it later.
    pub source: Option<LoadRequest>,

    /// Filter revision the caches were computed for.
    computed_revision: u64,
}

impl AppState {
    /// Ingest a newly loaded dataset and recompute the views.
    pub fn set_dataset(&mut self, dataset: BenchmarkSet) {
        self.colors = SolverColors::new(dataset.results.iter().map(|r| &r.solver));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.recompute();
    }

    /// Kick off a background load. The previous dataset stays visible until
    /// the new one arrives.
    pub fn start_load(&mut self, request: LoadRequest) {
        log::info!("Loading {}", request.results.display());
        self.status_message = None;
        self.source = Some(request.clone());
        self.pending = Some(spawn_load(request));
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Check on a running load. Call once per frame.
    pub fn poll_load(&mut self) {
        let Some(result) = self.pending.as_ref().and_then(PendingLoad::poll) else {
            return;
        };
        let pending = self.pending.take();
        match result {
            Ok(dataset) => {
                log::info!("Loaded {} benchmark results", dataset.len());
                self.set_dataset(dataset);
            }
            Err(e) => {
                let path = pending
                    .map(|p| p.request.results.display().to_string())
                    .unwrap_or_default();
                log::error!("Failed to load {path}: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Toggle a single value in a category's filter and refresh the views.
    pub fn toggle_filter_value(&mut self, category: Category, value: &str) {
        self.filters.toggle(category, value);
        self.refresh();
    }

    /// Clear every filter and refresh the views.
    pub fn reset_filters(&mut self) {
        self.filters.reset();
        self.refresh();
    }

    /// Recompute cached views if the filters changed since the last time.
    pub fn refresh(&mut self) {
        if self.computed_revision != self.filters.revision() {
            self.recompute();
        }
    }

    fn recompute(&mut self) {
        self.computed_revision = self.filters.revision();
        let Some(ds) = &self.dataset else {
            self.visible_indices.clear();
            self.chart = ChartData::default();
            return;
        };
        self.visible_indices = filtered_indices(&ds.results, self.filters.read());
        self.chart = aggregate(self.visible_indices.iter().map(|&i| &ds.results[i]));
    }
}
