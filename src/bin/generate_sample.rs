use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Builder, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde_json::json;

use solver_bench_viewer::data::category::Category;
use solver_bench_viewer::data::loader::{
    COL_BENCHMARK, COL_DUALITY_GAP, COL_MAX_INTEGRALITY_VIOLATION, COL_MEMORY_USAGE,
    COL_OBJECTIVE_VALUE, COL_RUNTIME, COL_SIZE, COL_SOLVER, COL_SOLVER_RELEASE_YEAR,
    COL_SOLVER_VERSION, COL_STATUS, COL_TERMINATION_CONDITION, RESULT_COLUMNS,
};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Log-normal multiplicative noise around 1.0
    fn jitter(&mut self, spread: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        (spread * z).exp()
    }
}

struct Benchmark {
    name: &'static str,
    size: &'static str,
    /// Baseline runtime (s) and memory (MB) for a mid-range solver.
    runtime: f64,
    memory: f64,
    milp: bool,
    sectors: &'static str,
    kind_of_problem: &'static str,
    model_name: &'static str,
}

const BENCHMARKS: &[Benchmark] = &[
    Benchmark { name: "pypsa-eur-elec-op", size: "S", runtime: 12.0, memory: 380.0, milp: false, sectors: "Power", kind_of_problem: "Operational", model_name: "PyPSA-Eur" },
    Benchmark { name: "pypsa-eur-sec", size: "L", runtime: 310.0, memory: 2900.0, milp: false, sectors: "Sector-coupled", kind_of_problem: "Infrastructure & Capacity Expansion", model_name: "PyPSA-Eur" },
    Benchmark { name: "genx-elec-uc", size: "M", runtime: 95.0, memory: 1100.0, milp: true, sectors: "Power", kind_of_problem: "Unit Commitment", model_name: "GenX" },
    Benchmark { name: "temoa-us", size: "L", runtime: 180.0, memory: 2100.0, milp: false, sectors: "Sector-coupled", kind_of_problem: "Infrastructure & Capacity Expansion", model_name: "TEMOA" },
    Benchmark { name: "times-nz", size: "M", runtime: 60.0, memory: 900.0, milp: false, sectors: "Sector-coupled", kind_of_problem: "Infrastructure & Capacity Expansion", model_name: "TIMES" },
    Benchmark { name: "sienna-pcm", size: "M", runtime: 140.0, memory: 1300.0, milp: true, sectors: "Power", kind_of_problem: "Production cost modelling", model_name: "Sienna" },
    Benchmark { name: "pglib-opf-dc", size: "S", runtime: 4.0, memory: 150.0, milp: false, sectors: "Power", kind_of_problem: "DC Optimal Power Flow", model_name: "PowerModel" },
];

/// (name, version, release year, runtime factor, memory factor)
const SOLVERS: &[(&str, &str, i64, f64, f64)] = &[
    ("GLPK", "5.0", 2020, 3.5, 0.8),
    ("SCIP", "8.1.0", 2023, 1.6, 1.2),
    ("HiGHS", "1.7.1", 2024, 1.0, 1.0),
    ("CBC", "2.10.11", 2022, 2.2, 0.9),
];

/// Runs slower than this are reported as aborted without measurements.
const TIME_LIMIT: f64 = 900.0;

struct Row {
    benchmark: &'static Benchmark,
    solver: &'static str,
    version: &'static str,
    year: i64,
    runtime: Option<f64>,
    memory: Option<f64>,
    objective: Option<f64>,
    duality_gap: Option<f64>,
    integrality_violation: Option<f64>,
    status: &'static str,
    termination: &'static str,
}

fn generate_rows(rng: &mut SimpleRng) -> Vec<Row> {
    let mut rows = Vec::new();
    for benchmark in BENCHMARKS {
        let objective = benchmark.memory * 1.0e4;
        for &(solver, version, year, rt_factor, mem_factor) in SOLVERS {
            let runtime = benchmark.runtime * rt_factor * rng.jitter(0.25);
            let memory = benchmark.memory * mem_factor * rng.jitter(0.1);
            let row = if runtime > TIME_LIMIT {
                Row {
                    benchmark,
                    solver,
                    version,
                    year,
                    runtime: None,
                    memory: None,
                    objective: None,
                    duality_gap: None,
                    integrality_violation: None,
                    status: "aborted",
                    termination: "time limit",
                }
            } else {
                Row {
                    benchmark,
                    solver,
                    version,
                    year,
                    runtime: Some(runtime),
                    memory: Some(memory),
                    objective: Some(objective * (1.0 + 1e-6 * rng.next_f64())),
                    duality_gap: benchmark.milp.then(|| 1e-4 * rng.next_f64()),
                    integrality_violation: benchmark.milp.then(|| 1e-9 * rng.next_f64()),
                    status: "ok",
                    termination: "optimal",
                }
            };
            rows.push(row);
        }
    }
    rows
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

fn tag(row: &Row, category: Category) -> &'static str {
    match category {
        Category::Sectors => row.benchmark.sectors,
        Category::Technique => technique(row.benchmark),
        Category::KindOfProblem => row.benchmark.kind_of_problem,
        Category::ModelName => row.benchmark.model_name,
    }
}

fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    let mut header: Vec<&str> = RESULT_COLUMNS.to_vec();
    header.extend(Category::ALL.iter().map(|c| c.column()));
    writer.write_record(&header)?;

    for row in rows {
        // Same order as RESULT_COLUMNS followed by the tag columns.
        writer.write_record([
            row.benchmark.name.to_string(),
            fmt_opt(row.duality_gap),
            fmt_opt(row.integrality_violation),
            fmt_opt(row.memory),
            fmt_opt(row.objective),
            row.runtime
                .map(|v| v.to_string())
                .unwrap_or_else(|| "timeout".to_string()),
            row.benchmark.size.to_string(),
            row.solver.to_string(),
            row.year.to_string(),
            row.version.to_string(),
            row.status.to_string(),
            row.termination.to_string(),
        ]
        .into_iter()
        .chain(Category::ALL.iter().map(|&c| tag(row, c).to_string())))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    let strings = |f: &dyn Fn(&Row) -> String| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let floats = |f: &dyn Fn(&Row) -> Option<f64>| -> ArrayRef {
        let mut builder = Float64Builder::with_capacity(rows.len());
        for row in rows {
            builder.append_option(f(row));
        }
        Arc::new(builder.finish())
    };

    let mut columns: Vec<(&str, ArrayRef)> = vec![
        (COL_BENCHMARK, strings(&|r| r.benchmark.name.to_string())),
        (COL_DUALITY_GAP, floats(&|r| r.duality_gap)),
        (COL_MAX_INTEGRALITY_VIOLATION, floats(&|r| r.integrality_violation)),
        (COL_MEMORY_USAGE, floats(&|r| r.memory)),
        (COL_OBJECTIVE_VALUE, floats(&|r| r.objective)),
        (COL_RUNTIME, floats(&|r| r.runtime)),
        (COL_SIZE, strings(&|r| r.benchmark.size.to_string())),
        (COL_SOLVER, strings(&|r| r.solver.to_string())),
        (
            COL_SOLVER_RELEASE_YEAR,
            Arc::new(Int64Array::from(rows.iter().map(|r| r.year).collect::<Vec<_>>())),
        ),
        (COL_SOLVER_VERSION, strings(&|r| r.version.to_string())),
        (COL_STATUS, strings(&|r| r.status.to_string())),
        (COL_TERMINATION_CONDITION, strings(&|r| r.termination.to_string())),
    ];
    for &category in Category::ALL.iter() {
        columns.push((category.column(), strings(&|r| tag(r, category).to_string())));
    }

    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
            .collect::<Vec<_>>(),
    ));
    let batch = RecordBatch::try_new(
        schema.clone(),
        columns.into_iter().map(|(_, array)| array).collect(),
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn technique(benchmark: &Benchmark) -> &'static str {
    if benchmark.milp {
        "MILP"
    } else {
        "LP"
    }
}

fn write_metadata(path: &Path) -> Result<()> {
    let catalog: serde_json::Map<String, serde_json::Value> = BENCHMARKS
        .iter()
        .map(|b| {
            (
                b.name.to_string(),
                json!({
                    "sectors": b.sectors,
                    "technique": technique(b),
                    "kindOfProblem": b.kind_of_problem,
                    "modelName": b.model_name,
                }),
            )
        })
        .collect();
    let text = serde_json::to_string_pretty(&catalog)?;
    std::fs::write(path, text).context("writing metadata")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng);

    write_csv(Path::new("benchmark_results.csv"), &rows)?;
    write_parquet(Path::new("benchmark_results.parquet"), &rows)?;
    write_metadata(Path::new("benchmark_metadata.json"))?;

    let aborted = rows.iter().filter(|r| r.runtime.is_none()).count();
    println!(
        "Wrote {} results ({} benchmarks × {} solvers, {aborted} aborted) to benchmark_results.{{csv,parquet}}",
        rows.len(),
        BENCHMARKS.len(),
        SOLVERS.len()
    );
    Ok(())
}
