use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use anyhow::{anyhow, bail, Context, Result};
use arrow::array::{Array, ArrayRef};
use arrow::util::display::array_value_to_string;
use csv::StringRecord;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::category::Category;
use super::model::{
    BenchmarkResult, BenchmarkSet, BenchmarkTags, MetadataCatalog, Metric, Solver, SolverStatus,
};


// ---------------------------------------------------------------------------
// Column names of the results export
// ---------------------------------------------------------------------------

pub const COL_BENCHMARK: &str = "Benchmark";
pub const COL_DUALITY_GAP: &str = "Duality Gap";
pub const COL_MAX_INTEGRALITY_VIOLATION: &str = "Max Integrality Violation";
pub const COL_MEMORY_USAGE: &str = "Memory Usage (MB)";
pub const COL_OBJECTIVE_VALUE: &str = "Objective Value";
pub const COL_RUNTIME: &str = "Runtime (s)";
pub const COL_SIZE: &str = "Size";
pub const COL_SOLVER: &str = "Solver";
pub const COL_SOLVER_RELEASE_YEAR: &str = "Solver Release Year";
pub const COL_SOLVER_VERSION: &str = "Solver Version";
pub const COL_STATUS: &str = "Status";
pub const COL_TERMINATION_CONDITION: &str = "Termination Condition";

/// Header row written by the benchmark runner, in its column order.
pub const RESULT_COLUMNS: [&str; 12] = [
    COL_BENCHMARK,
    COL_DUALITY_GAP,
    COL_MAX_INTEGRALITY_VIOLATION,
    COL_MEMORY_USAGE,
    COL_OBJECTIVE_VALUE,
    COL_RUNTIME,
    COL_SIZE,
    COL_SOLVER,
    COL_SOLVER_RELEASE_YEAR,
    COL_SOLVER_VERSION,
    COL_STATUS,
    COL_TERMINATION_CONDITION,
];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read the raw text of a results export.
pub fn fetch_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Load a benchmark result set from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – comma separated, header row with the runner's column names
/// * `.parquet` – the same columns stored as a Parquet table
pub fn load_file(path: &Path) -> Result<BenchmarkSet> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let results = match ext.as_str() {
        "csv" => ingest(&fetch_source(path)?),
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    let invalid = results
        .iter()
        .filter(|r| !r.runtime.is_valid() || !r.memory_usage.is_valid())
        .count();
    log::info!(
        "Loaded {} results from {} ({invalid} with unusable runtime/memory)",
        results.len(),
        path.display()
    );
    Ok(BenchmarkSet::from_results(results))
}

/// Read a benchmark metadata catalog:
///
/// ```json
/// {
///   "pypsa-eur-elec-op": {
///     "sectors": "Power",
///     "technique": "LP",
///     "kindOfProblem": "Operational",
///     "modelName": "PyPSA-Eur"
///   }
/// }
/// ```
pub fn load_metadata(path: &Path) -> Result<MetadataCatalog> {
    let text = std::fs::read_to_string(path).context("reading metadata file")?;
    let catalog: MetadataCatalog = serde_json::from_str(&text).context("parsing metadata JSON")?;
    log::info!("Loaded metadata for {} benchmarks", catalog.len());
    Ok(catalog)
}

// ---------------------------------------------------------------------------
// CSV ingestion
// ---------------------------------------------------------------------------

/// Turn the text of a results export into typed records.
///
/// Never fails: rows with unusable cells are kept with [`Metric::Invalid`] or
/// `None` in the affected fields, so one bad row cannot empty the dashboard.
/// Blank rows are skipped and source order is preserved.
pub fn ingest(raw_text: &str) -> Vec<BenchmarkResult> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(raw_text.as_bytes());

    let headers = match reader.headers() {
        Ok(h) => h.clone(),
        Err(e) => {
            log::warn!("results export has no readable header row: {e}");
            return Vec::new();
        }
    };
    let columns = ColumnIndex::new(&headers);
    for missing in columns.missing() {
        log::warn!("results export is missing column '{missing}'");
    }

    let mut results = Vec::new();
    for (row_no, record) in reader.records().enumerate() {
        match record {
            Ok(record) => {
                if let Some(result) = coerce_row(&columns, &record, row_no) {
                    results.push(result);
                }
            }
            Err(e) => log::warn!("CSV row {row_no}: {e}"),
        }
    }
    results
}

/// Header name → field position.
struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    fn new(headers: &StringRecord) -> Self {
        let positions = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.to_string(), i))
            .collect();
        ColumnIndex { positions }
    }

    /// The trimmed cell of `column`, or "" when the column or cell is absent.
    fn cell<'r>(&self, record: &'r StringRecord, column: &str) -> &'r str {
        self.positions
            .get(column)
            .and_then(|&i| record.get(i))
            .map(str::trim)
            .unwrap_or("")
    }

    fn missing(&self) -> impl Iterator<Item = &'static str> + '_ {
        RESULT_COLUMNS
            .into_iter()
            .filter(|c| !self.positions.contains_key(*c))
    }
}

/// Build one record. `None` only for blank rows: a single empty or
/// whitespace field. Comma-only rows are kept with empty fields.
fn coerce_row(columns: &ColumnIndex, record: &StringRecord, row_no: usize) -> Option<BenchmarkResult> {
    if record.len() <= 1 && record.iter().all(|field| field.trim().is_empty()) {
        return None;
    }

    let runtime = Metric::parse(columns.cell(record, COL_RUNTIME));
    if !runtime.is_valid() {
        log::debug!(
            "row {row_no}: unusable runtime {:?}",
            columns.cell(record, COL_RUNTIME)
        );
    }
    let memory_usage = Metric::parse(columns.cell(record, COL_MEMORY_USAGE));
    if !memory_usage.is_valid() {
        log::debug!(
            "row {row_no}: unusable memory usage {:?}",
            columns.cell(record, COL_MEMORY_USAGE)
        );
    }

    let tag = |category: Category| {
        let value = columns.cell(record, category.column());
        (!value.is_empty()).then(|| value.to_string())
    };

    Some(BenchmarkResult {
        benchmark: columns.cell(record, COL_BENCHMARK).to_string(),
        solver: Solver::from(columns.cell(record, COL_SOLVER)),
        solver_version: columns.cell(record, COL_SOLVER_VERSION).to_string(),
        solver_release_year: parse_year(columns.cell(record, COL_SOLVER_RELEASE_YEAR)),
        status: SolverStatus::from(columns.cell(record, COL_STATUS)),
        termination_condition: columns.cell(record, COL_TERMINATION_CONDITION).to_string(),
        size: columns.cell(record, COL_SIZE).to_string(),
        runtime,
        memory_usage,
        objective_value: parse_optional_float(columns.cell(record, COL_OBJECTIVE_VALUE)),
        duality_gap: parse_optional_float(columns.cell(record, COL_DUALITY_GAP)),
        max_integrality_violation: parse_optional_float(
            columns.cell(record, COL_MAX_INTEGRALITY_VIOLATION),
        ),
        tags: BenchmarkTags {
            sectors: tag(Category::Sectors),
            technique: tag(Category::Technique),
            kind_of_problem: tag(Category::KindOfProblem),
            model_name: tag(Category::ModelName),
        },
    })
}

fn parse_optional_float(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Base-10 integer prefix of `s` ("2024", "2024-rc1" → 2024); `None` when
/// there are no leading digits.
fn parse_year(s: &str) -> Option<i32> {
    let digits_start = usize::from(s.starts_with(['+', '-']));
    let digits_len = s[digits_start..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    s[..digits_start + digits_len].parse::<i32>().ok()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet table carrying the same columns as the CSV export.
///
/// Every cell is rendered to text and goes through the same coercion as a
/// CSV cell, so both formats yield identical records. Null cells are empty.
fn load_parquet(path: &Path) -> Result<Vec<BenchmarkResult>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut results = Vec::new();
    let mut row_no = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let headers: StringRecord = schema.fields().iter().map(|f| f.name().as_str()).collect();
        let columns = ColumnIndex::new(&headers);

        for row in 0..batch.num_rows() {
            let mut record = StringRecord::with_capacity(0, batch.num_columns());
            for col in batch.columns() {
                record.push_field(&cell_to_string(col, row)?);
            }
            if let Some(result) = coerce_row(&columns, &record, row_no) {
                results.push(result);
            }
            row_no += 1;
        }
    }

    Ok(results)
}

fn cell_to_string(col: &ArrayRef, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    array_value_to_string(col.as_ref(), row)
        .with_context(|| format!("formatting {:?} cell at row {row}", col.data_type()))
}

// ---------------------------------------------------------------------------
// Background loading
// ---------------------------------------------------------------------------

/// What to load: a results export plus an optional metadata catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub results: PathBuf,
    pub metadata: Option<PathBuf>,
}

impl LoadRequest {
    pub fn results(path: impl Into<PathBuf>) -> Self {
        LoadRequest {
            results: path.into(),
            metadata: None,
        }
    }
}

/// Load synchronously.
pub fn load(request: &LoadRequest) -> Result<BenchmarkSet> {
    let set = load_file(&request.results)?;
    match &request.metadata {
        Some(path) => Ok(set.with_catalog(&load_metadata(path)?)),
        None => Ok(set),
    }
}

/// A load running on a worker thread. Poll it from the UI thread; until it
/// resolves the dataset is simply not loaded yet.
pub struct PendingLoad {
    pub request: LoadRequest,
    rx: Receiver<Result<BenchmarkSet>>,
}

/// Start reading and parsing `request` off the interaction thread.
pub fn spawn_load(request: LoadRequest) -> PendingLoad {
    let (tx, rx) = mpsc::channel();
    let job = request.clone();
    thread::spawn(move || {
        // The receiver may be gone if the app closed mid-load.
        let _ = tx.send(load(&job));
    });
    PendingLoad { request, rx }
}

impl PendingLoad {
    /// `None` while the load is still running.
    pub fn poll(&self) -> Option<Result<BenchmarkSet>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(anyhow!(
                "loader for {} exited without a result",
                self.request.results.display()
            ))),
        }
    }
}
