use crate::data::model::{BenchmarkTags, Metric, Solver, SolverStatus};

use super::*;

fn result(benchmark: &str, tags: [Option<&str>; 4]) -> BenchmarkResult {
    let [sectors, technique, kind_of_problem, model_name] = tags.map(|t| t.map(str::to_string));
    BenchmarkResult {
        benchmark: benchmark.to_string(),
        solver: Solver::Highs,
        solver_version: "1.7.1".to_string(),
        solver_release_year: Some(2024),
        status: SolverStatus::Ok,
        termination_condition: "optimal".to_string(),
        size: "S".to_string(),
        runtime: Metric::Valid(1.0),
        memory_usage: Metric::Valid(100.0),
        objective_value: None,
        duality_gap: None,
        max_integrality_violation: None,
        tags: BenchmarkTags {
            sectors,
            technique,
            kind_of_problem,
            model_name,
        },
    }
}

fn sample() -> Vec<BenchmarkResult> {
    vec![
        result("a", [Some("Power"), Some("LP"), Some("Operational"), Some("PyPSA")]),
        result("b", [Some("Power"), Some("MILP"), Some("Unit Commitment"), Some("GenX")]),
        result("c", [Some("Sector-coupled"), Some("LP"), Some("Operational"), Some("TIMES")]),
        result("d", [None, Some("LP"), None, Some("PyPSA")]),
        result("e", [Some("Sector-coupled"), Some("MILP"), Some("Operational"), Some("GenX")]),
    ]
}

fn names(results: &[&BenchmarkResult]) -> Vec<String> {
    results.iter().map(|r| r.benchmark.clone()).collect()
}

#[test]
fn test_no_selection_is_identity() {
    let results = sample();
    let filters = FilterState::default();
    let out = apply(&results, &filters);
    assert_eq!(out.len(), results.len());
    assert!(out.iter().zip(&results).all(|(a, b)| *a == b));
    assert_eq!(filtered_indices(&results, &filters), [0, 1, 2, 3, 4]);
}

#[test]
fn test_or_within_category() {
    let results = sample();
    let mut filters = FilterState::default();
    filters.toggle(Category::ModelName, "PyPSA");
    filters.toggle(Category::ModelName, "GenX");
    assert_eq!(names(&apply(&results, &filters)), ["a", "b", "d", "e"]);
}

#[test]
fn test_and_across_categories() {
    let results = sample();
    let mut filters = FilterState::default();
    filters.toggle(Category::Technique, "LP");
    filters.toggle(Category::Sectors, "Power");
    assert_eq!(names(&apply(&results, &filters)), ["a"]);
    assert_eq!(filtered_indices(&results, &filters), [0]);
}

#[test]
fn test_missing_tag_fails_active_category() {
    let results = sample();
    let mut filters = FilterState::default();
    filters.toggle(Category::KindOfProblem, "Operational");
    assert_eq!(names(&apply(&results, &filters)), ["a", "c", "e"]);
}

#[test]
fn test_value_outside_enumeration_is_accepted() {
    let mut results = sample();
    results.push(result("f", [None, Some("QP"), None, None]));
    let mut filters = FilterState::default();
    filters.toggle(Category::Technique, "QP");
    assert_eq!(names(&apply(&results, &filters)), ["f"]);
}

#[test]
fn test_no_match_is_empty() {
    let results = sample();
    let mut filters = FilterState::default();
    filters.toggle(Category::ModelName, "Sienna");
    assert!(apply(&results, &filters).is_empty());
    assert!(filtered_indices(&results, &filters).is_empty());
}

#[test]
fn test_enlarging_a_selection_never_shrinks_output() {
    let results = sample();
    for category in Category::ALL {
        let mut filters = FilterState::default();
        filters.toggle(Category::Technique, "LP");
        let mut previous = apply(&results, &filters).len();
        for (value, _) in category.values() {
            if filters.is_selected(category, value) {
                continue;
            }
            filters.toggle(category, value);
            let now = apply(&results, &filters).len();
            // the first value added to an empty category may narrow the output
            if filters.selected(category).len() > 1 {
                assert!(now >= previous, "{category}/{value}: {now} < {previous}");
            }
            previous = now;
        }
    }
}

#[test]
fn test_sequential_filters_equal_conjunction() {
    let results = sample();

    let mut by_sector = FilterState::default();
    by_sector.toggle(Category::Sectors, "Sector-coupled");
    let mut by_technique = FilterState::default();
    by_technique.toggle(Category::Technique, "MILP");
    by_technique.toggle(Category::Technique, "LP");

    let first: Vec<BenchmarkResult> = apply(&results, &by_sector).into_iter().cloned().collect();
    let sequential = names(&apply(&first, &by_technique));

    let mut both = by_sector.clone();
    both.toggle(Category::Technique, "MILP");
    both.toggle(Category::Technique, "LP");
    assert_eq!(sequential, names(&apply(&results, &both)));
    assert_eq!(sequential, ["c", "e"]);
}

#[test]
fn test_toggle_round_trip() {
    let mut filters = FilterState::default();
    filters.toggle(Category::Sectors, "Power");
    let before = filters.clone();
    assert!(filters.toggle(Category::ModelName, "GenX"));
    assert_ne!(filters, before);
    assert!(!filters.toggle(Category::ModelName, "GenX"));
    assert_eq!(filters, before);
}

#[test]
fn test_reset_clears_all_categories() {
    let mut filters = FilterState::default();
    filters.toggle(Category::Sectors, "Power");
    filters.toggle(Category::KindOfProblem, "Operational");
    assert!(!filters.is_empty());
    filters.reset();
    assert!(filters.is_empty());
    assert_eq!(filters, FilterState::default());
}
