use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::data::loader::load_file;
use crate::data::model::Solver;

use super::*;

fn loaded_state() -> AppState {
    let mut state = AppState::default();
    let dataset = load_file(std::path::Path::new("data/test/seven_rows.csv")).unwrap();
    state.set_dataset(dataset);
    state
}

fn wait_for_load(state: &mut AppState) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while state.is_loading() {
        assert!(Instant::now() < deadline, "load did not resolve");
        state.poll_load();
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_not_loaded_yet() {
    let mut state = AppState::default();
    assert!(state.dataset.is_none());
    assert!(state.visible_indices.is_empty());
    assert!(state.chart.is_empty());
    state.toggle_filter_value(Category::Technique, "LP");
    assert!(state.visible_indices.is_empty());
}

#[test]
fn test_set_dataset_shows_everything() {
    let state = loaded_state();
    assert_eq!(state.visible_indices, [0, 1, 2, 3, 4, 5, 6]);
    assert_eq!(state.chart.series.len(), 3);
}

#[test]
fn test_toggle_recomputes_views() {
    let mut state = loaded_state();
    state.toggle_filter_value(Category::Technique, "MILP");
    assert_eq!(state.visible_indices, [2, 4, 6]);
    assert!(state.chart.series_for(&Solver::Glpk).is_none());
    assert_eq!(state.chart.runtime_domain.max, 11.0);
    assert_eq!(state.chart.memory_domain.max, 600.0);

    state.toggle_filter_value(Category::ModelName, "GenX");
    assert_eq!(state.visible_indices, [2, 4]);
    assert_eq!(state.chart.runtime_domain.max, 9.0);
    assert_eq!(state.chart.memory_domain.max, 550.0);

    state.reset_filters();
    assert_eq!(state.visible_indices.len(), 7);
}

#[test]
fn test_observers_see_every_change() {
    let seen: Rc<RefCell<Vec<usize>>> = Rc::default();
    let mut store = FilterStore::default();
    let sink = Rc::clone(&seen);
    store.subscribe(move |state| {
        sink.borrow_mut()
            .push(state.selected(Category::Sectors).len())
    });

    store.toggle(Category::Sectors, "Power");
    store.toggle(Category::Sectors, "Sector-coupled");
    store.toggle(Category::Sectors, "Power");
    store.reset();

    assert_eq!(*seen.borrow(), [1, 2, 1, 0]);
    assert_eq!(store.revision(), 4);
}

#[test]
fn test_toggle_twice_restores_state() {
    let mut store = FilterStore::default();
    store.toggle(Category::KindOfProblem, "Operational");
    let before = store.read().clone();
    store.toggle(Category::ModelName, "TIMES");
    store.toggle(Category::ModelName, "TIMES");
    assert_eq!(store.read(), &before);
}

#[test]
fn test_refresh_is_idempotent() {
    let mut state = loaded_state();
    state.toggle_filter_value(Category::Sectors, "Power");
    let chart = state.chart.clone();
    let visible = state.visible_indices.clone();
    state.refresh();
    state.refresh();
    assert_eq!(state.chart, chart);
    assert_eq!(state.visible_indices, visible);
}

#[test]
fn test_background_load() {
    let mut state = AppState::default();
    state.start_load(LoadRequest {
        results: "data/test/seven_rows.csv".into(),
        metadata: Some("data/test/metadata.json".into()),
    });
    assert!(state.is_loading());
    wait_for_load(&mut state);
    let dataset = state.dataset.as_ref().unwrap();
    assert_eq!(dataset.len(), 7);
    assert_eq!(
        dataset.results[6].tags.get(Category::ModelName),
        Some("PowerModel")
    );
    assert!(state.status_message.is_none());
}

#[test]
fn test_failed_load_reports_error_and_keeps_dataset() {
    let mut state = loaded_state();
    state.start_load(LoadRequest::results("data/test/missing.csv"));
    wait_for_load(&mut state);
    let message = state.status_message.as_deref().unwrap();
    assert!(message.starts_with("Error:"), "{message}");
    assert!(message.contains("missing.csv"), "{message}");
    assert_eq!(state.dataset.as_ref().unwrap().len(), 7);
}
