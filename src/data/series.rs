use super::model::{BenchmarkResult, Solver};

#[cfg(test)]
mod tests;

/// Headroom above the largest runtime on the x axis (seconds).
pub const RUNTIME_PADDING: f64 = 1.0;
/// Headroom above the largest memory usage on the y axis (MB).
pub const MEMORY_PADDING: f64 = 50.0;

// ---------------------------------------------------------------------------
// Plot-ready data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisDomain {
    pub min: f64,
    pub max: f64,
}

impl AxisDomain {
    /// `[0, max + padding]`, or `[0, padding]` when there is nothing to show.
    fn padded(max: Option<f64>, padding: f64) -> Self {
        AxisDomain {
            min: 0.0,
            max: max.unwrap_or(0.0) + padding,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub solver: Solver,
    pub runtime: f64,
    pub memory_usage: f64,
}

/// Points of one solver, ascending by runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverSeries {
    pub solver: Solver,
    pub points: Vec<SeriesPoint>,
}

/// Everything the chart needs, rebuilt on every filter change.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    /// One entry per solver, in order of first appearance.
    pub series: Vec<SolverSeries>,
    pub runtime_domain: AxisDomain,
    pub memory_domain: AxisDomain,
}

impl Default for ChartData {
    fn default() -> Self {
        aggregate(std::iter::empty::<&BenchmarkResult>())
    }
}

impl ChartData {
    pub fn series_for(&self, solver: &Solver) -> Option<&SolverSeries> {
        self.series.iter().find(|s| &s.solver == solver)
    }

    /// True when there is no plottable point.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Group filtered results into per-solver series and compute axis domains.
///
/// Results with an invalid runtime or memory reading are left out of both the
/// series and the domains. A solver with no plottable result gets no series.
pub fn aggregate<'a, I>(results: I) -> ChartData
where
    I: IntoIterator<Item = &'a BenchmarkResult>,
{
    let mut series: Vec<SolverSeries> = Vec::new();
    let mut max_runtime: Option<f64> = None;
    let mut max_memory: Option<f64> = None;

    for result in results {
        // The slot is claimed on first sight so an invalid leading record
        // still fixes the solver's position.
        let slot = match series.iter().position(|s| s.solver == result.solver) {
            Some(i) => i,
            None => {
                series.push(SolverSeries {
                    solver: result.solver.clone(),
                    points: Vec::new(),
                });
                series.len() - 1
            }
        };

        let (Some(runtime), Some(memory_usage)) =
            (result.runtime.value(), result.memory_usage.value())
        else {
            continue;
        };

        max_runtime = Some(max_runtime.map_or(runtime, |m| m.max(runtime)));
        max_memory = Some(max_memory.map_or(memory_usage, |m| m.max(memory_usage)));

        series[slot].points.push(SeriesPoint {
            solver: result.solver.clone(),
            runtime,
            memory_usage,
        });
    }

    series.retain(|s| !s.points.is_empty());

    // Stable sort: equal runtimes keep ingestion order.
    for s in &mut series {
        s.points.sort_by(|a, b| a.runtime.total_cmp(&b.runtime));
    }

    ChartData {
        series,
        runtime_domain: AxisDomain::padded(max_runtime, RUNTIME_PADDING),
        memory_domain: AxisDomain::padded(max_memory, MEMORY_PADDING),
    }
}
