#![allow(dead_code)]

use std::path::Path;

use solver_bench_viewer::data::loader::load_file;
use solver_bench_viewer::data::model::{BenchmarkSet, Solver};
use solver_bench_viewer::data::series::ChartData;

pub fn load_fixture(name: &str) -> BenchmarkSet {
    load_file(&Path::new("data/test").join(name)).unwrap()
}

pub fn series_runtimes(chart: &ChartData, solver: &Solver) -> Vec<f64> {
    chart
        .series_for(solver)
        .map(|s| s.points.iter().map(|p| p.runtime).collect())
        .unwrap_or_default()
}
