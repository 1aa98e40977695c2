use crate::data::model::{BenchmarkTags, Metric, SolverStatus};

use super::*;

fn result(solver: Solver, runtime: Metric, memory_usage: Metric) -> BenchmarkResult {
    BenchmarkResult {
        benchmark: "bench".to_string(),
        solver,
        solver_version: String::new(),
        solver_release_year: None,
        status: SolverStatus::Ok,
        termination_condition: String::new(),
        size: String::new(),
        runtime,
        memory_usage,
        objective_value: None,
        duality_gap: None,
        max_integrality_violation: None,
        tags: BenchmarkTags::default(),
    }
}

fn valid(solver: Solver, runtime: f64, memory_usage: f64) -> BenchmarkResult {
    result(solver, Metric::Valid(runtime), Metric::Valid(memory_usage))
}

fn runtimes(data: &ChartData, solver: &Solver) -> Vec<f64> {
    data.series_for(solver)
        .map(|s| s.points.iter().map(|p| p.runtime).collect())
        .unwrap_or_default()
}

#[test]
fn test_domains_are_padded_maxima() {
    let results: Vec<BenchmarkResult> = [1.0, 2.0, 4.0, 6.0, 8.0, 10.0]
        .into_iter()
        .zip([100.0, 200.0, 300.0, 400.0, 500.0, 600.0])
        .map(|(rt, mem)| valid(Solver::Glpk, rt, mem))
        .collect();
    let data = aggregate(&results);
    assert_eq!(data.runtime_domain, AxisDomain { min: 0.0, max: 11.0 });
    assert_eq!(data.memory_domain, AxisDomain { min: 0.0, max: 650.0 });
}

#[test]
fn test_empty_input_degrades_to_padding() {
    let data = aggregate(&Vec::<BenchmarkResult>::new());
    assert!(data.is_empty());
    assert_eq!(data.runtime_domain, AxisDomain { min: 0.0, max: RUNTIME_PADDING });
    assert_eq!(data.memory_domain, AxisDomain { min: 0.0, max: MEMORY_PADDING });
    assert_eq!(data, ChartData::default());
}

#[test]
fn test_series_sorted_by_runtime_in_first_seen_order() {
    let results = vec![
        valid(Solver::Scip, 8.0, 500.0),
        valid(Solver::Glpk, 10.0, 600.0),
        valid(Solver::Scip, 4.0, 300.0),
        valid(Solver::Glpk, 1.0, 100.0),
    ];
    let data = aggregate(&results);
    let order: Vec<&Solver> = data.series.iter().map(|s| &s.solver).collect();
    assert_eq!(order, [&Solver::Scip, &Solver::Glpk]);
    assert_eq!(runtimes(&data, &Solver::Scip), [4.0, 8.0]);
    assert_eq!(runtimes(&data, &Solver::Glpk), [1.0, 10.0]);
}

#[test]
fn test_invalid_first_record_still_fixes_series_order() {
    let results = vec![
        result(Solver::Scip, Metric::Invalid, Metric::Valid(10.0)),
        valid(Solver::Glpk, 1.0, 100.0),
        valid(Solver::Scip, 2.0, 200.0),
        result(Solver::Cbc, Metric::Invalid, Metric::Invalid),
    ];
    let data = aggregate(&results);
    let order: Vec<&Solver> = data.series.iter().map(|s| &s.solver).collect();
    assert_eq!(order, [&Solver::Scip, &Solver::Glpk]);
    assert_eq!(runtimes(&data, &Solver::Scip), [2.0]);
    assert_eq!(data.runtime_domain.max, 3.0);
    assert_eq!(data.memory_domain.max, 250.0);
}

#[test]
fn test_runtime_ties_keep_ingestion_order() {
    let results = vec![
        valid(Solver::Highs, 5.0, 300.0),
        valid(Solver::Highs, 5.0, 100.0),
        valid(Solver::Highs, 2.0, 200.0),
    ];
    let data = aggregate(&results);
    let memory: Vec<f64> = data.series[0].points.iter().map(|p| p.memory_usage).collect();
    assert_eq!(memory, [200.0, 300.0, 100.0]);
}

#[test]
fn test_invalid_readings_are_not_plotted() {
    let results = vec![
        valid(Solver::Glpk, 2.0, 100.0),
        result(Solver::Glpk, Metric::Invalid, Metric::Valid(9000.0)),
        result(Solver::Glpk, Metric::Valid(500.0), Metric::Invalid),
        result(Solver::Cbc, Metric::Invalid, Metric::Invalid),
    ];
    let data = aggregate(&results);
    assert_eq!(data.point_count(), 1);
    assert_eq!(runtimes(&data, &Solver::Glpk), [2.0]);
    assert!(data.series_for(&Solver::Cbc).is_none());
    assert_eq!(data.runtime_domain.max, 3.0);
    assert_eq!(data.memory_domain.max, 150.0);
}

#[test]
fn test_only_invalid_readings_degrade_to_padding() {
    let results = vec![result(Solver::Scip, Metric::Invalid, Metric::Valid(10.0))];
    let data = aggregate(&results);
    assert!(data.is_empty());
    assert_eq!(data.runtime_domain.max, RUNTIME_PADDING);
    assert_eq!(data.memory_domain.max, MEMORY_PADDING);
}

#[test]
fn test_points_carry_their_solver() {
    let results = vec![valid(Solver::Other("cuOpt".to_string()), 1.0, 2.0)];
    let data = aggregate(&results);
    let point = &data.series[0].points[0];
    assert_eq!(point.solver, Solver::Other("cuOpt".to_string()));
    assert_eq!((point.runtime, point.memory_usage), (1.0, 2.0));
}
