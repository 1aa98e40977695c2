use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Deserialize;

use super::category::Category;

// ---------------------------------------------------------------------------
// Metric – a numeric measurement that may have failed to parse
// ---------------------------------------------------------------------------

/// A required numeric measurement (runtime, memory).
///
/// The source export sometimes carries garbage in these cells. Instead of a
/// floating-point NaN that every consumer has to remember to compare
/// specially, an unusable cell becomes [`Metric::Invalid`], which is kept on
/// the record but skipped by every aggregation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    Valid(f64),
    Invalid,
}

impl Metric {
    /// Coerce a raw cell. Anything that is not a finite, non-negative number
    /// is `Invalid`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Metric::Valid(v),
            _ => Metric::Invalid,
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Metric::Valid(v) => Some(v),
            Metric::Invalid => None,
        }
    }

    pub fn is_valid(self) -> bool {
        matches!(self, Metric::Valid(_))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Valid(v) => write!(f, "{v:.2}"),
            Metric::Invalid => write!(f, "n/a"),
        }
    }
}

// ---------------------------------------------------------------------------
// Solver / SolverStatus – categorical columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Solver {
    Glpk,
    Scip,
    Highs,
    Gurobi,
    Cbc,
    /// Any solver name the viewer has no dedicated variant for.
    Other(String),
}

impl Solver {
    pub fn name(&self) -> &str {
        match self {
            Solver::Glpk => "GLPK",
            Solver::Scip => "SCIP",
            Solver::Highs => "HiGHS",
            Solver::Gurobi => "Gurobi",
            Solver::Cbc => "CBC",
            Solver::Other(name) => name,
        }
    }
}

impl From<&str> for Solver {
    fn from(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.to_ascii_lowercase().as_str() {
            "glpk" => Solver::Glpk,
            "scip" => Solver::Scip,
            "highs" => Solver::Highs,
            "gurobi" => Solver::Gurobi,
            "cbc" => Solver::Cbc,
            _ => Solver::Other(raw.to_string()),
        }
    }
}

impl fmt::Display for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Solver termination status as reported by the benchmark runner.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SolverStatus {
    Ok,
    Warning,
    Error,
    Aborted,
    Unknown,
    Other(String),
}

impl From<&str> for SolverStatus {
    fn from(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.to_ascii_lowercase().as_str() {
            "ok" => SolverStatus::Ok,
            "warning" => SolverStatus::Warning,
            "error" => SolverStatus::Error,
            "aborted" => SolverStatus::Aborted,
            "" | "unknown" => SolverStatus::Unknown,
            _ => SolverStatus::Other(raw.to_string()),
        }
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverStatus::Ok => write!(f, "ok"),
            SolverStatus::Warning => write!(f, "warning"),
            SolverStatus::Error => write!(f, "error"),
            SolverStatus::Aborted => write!(f, "aborted"),
            SolverStatus::Unknown => write!(f, "unknown"),
            SolverStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// BenchmarkTags – the record's value in each filter category
// ---------------------------------------------------------------------------

/// Category values attached to a benchmark, either from the optional tag
/// columns of the results file or from a [`MetadataCatalog`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkTags {
    pub sectors: Option<String>,
    pub technique: Option<String>,
    pub kind_of_problem: Option<String>,
    pub model_name: Option<String>,
}

impl BenchmarkTags {
    pub fn get(&self, category: Category) -> Option<&str> {
        match category {
            Category::Sectors => self.sectors.as_deref(),
            Category::Technique => self.technique.as_deref(),
            Category::KindOfProblem => self.kind_of_problem.as_deref(),
            Category::ModelName => self.model_name.as_deref(),
        }
    }

    /// Fill every tag that `other` defines, keeping ours where it doesn't.
    pub fn overlay(&mut self, other: &BenchmarkTags) {
        for (slot, value) in [
            (&mut self.sectors, &other.sectors),
            (&mut self.technique, &other.technique),
            (&mut self.kind_of_problem, &other.kind_of_problem),
            (&mut self.model_name, &other.model_name),
        ] {
            if value.is_some() {
                slot.clone_from(value);
            }
        }
    }
}

/// Benchmark name → tags, read from a JSON object.
pub type MetadataCatalog = BTreeMap<String, BenchmarkTags>;

// ---------------------------------------------------------------------------
// BenchmarkResult – one row of the results export
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkResult {
    pub benchmark: String,
    pub solver: Solver,
    pub solver_version: String,
    /// `None` when the cell held no leading integer.
    pub solver_release_year: Option<i32>,
    pub status: SolverStatus,
    pub termination_condition: String,
    pub size: String,
    /// Seconds.
    pub runtime: Metric,
    /// Megabytes.
    pub memory_usage: Metric,
    pub objective_value: Option<f64>,
    pub duality_gap: Option<f64>,
    pub max_integrality_violation: Option<f64>,
    pub tags: BenchmarkTags,
}

// ---------------------------------------------------------------------------
// BenchmarkSet – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full ingested record set with the tag values seen per category.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkSet {
    /// All results, in source row order.
    pub results: Vec<BenchmarkResult>,
    /// For each category the sorted set of tag values present in `results`.
    pub observed_tags: BTreeMap<Category, BTreeSet<String>>,
}

impl BenchmarkSet {
    pub fn from_results(results: Vec<BenchmarkResult>) -> Self {
        let mut observed_tags: BTreeMap<Category, BTreeSet<String>> = BTreeMap::new();
        for result in &results {
            for category in Category::ALL {
                if let Some(value) = result.tags.get(category) {
                    observed_tags
                        .entry(category)
                        .or_default()
                        .insert(value.to_string());
                }
            }
        }
        BenchmarkSet {
            results,
            observed_tags,
        }
    }

    /// Re-tag every result whose benchmark appears in `catalog`.
    pub fn with_catalog(self, catalog: &MetadataCatalog) -> Self {
        let mut results = self.results;
        let mut matched = 0usize;
        for result in &mut results {
            if let Some(tags) = catalog.get(&result.benchmark) {
                result.tags.overlay(tags);
                matched += 1;
            }
        }
        log::debug!(
            "metadata catalog tagged {matched} of {} results",
            results.len()
        );
        Self::from_results(results)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
