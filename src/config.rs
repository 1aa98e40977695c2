use std::path::PathBuf;

use clap::Parser;

use crate::data::loader::LoadRequest;

/// Compare optimization solvers on runtime, memory and solution quality.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about)]
pub struct ViewerConfig {
    /// Benchmark results to open on startup (.csv or .parquet)
    pub results: Option<PathBuf>,

    /// JSON catalog mapping benchmark names to sectors, technique, kind of
    /// problem and model
    #[arg(short, long, requires = "results")]
    pub metadata: Option<PathBuf>,

    /// Initial window size in points, as WIDTHxHEIGHT
    #[arg(long, default_value = "1280x860", value_parser = parse_window_size)]
    pub window_size: [f32; 2],
}

impl ViewerConfig {
    /// The load to start with, if a results file was given.
    pub fn load_request(&self) -> Option<LoadRequest> {
        self.results.as_ref().map(|results| LoadRequest {
            results: results.clone(),
            metadata: self.metadata.clone(),
        })
    }
}

fn parse_window_size(s: &str) -> Result<[f32; 2], String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f32>()
            .ok()
            .filter(|v| *v > 0.0)
            .ok_or_else(|| format!("invalid window dimension '{v}'"))
    };
    Ok([parse(w)?, parse(h)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments() {
        let config = ViewerConfig::try_parse_from(["solver-bench-viewer"]).unwrap();
        assert_eq!(config.load_request(), None);
        assert_eq!(config.window_size, [1280.0, 860.0]);
    }

    #[test]
    fn results_with_metadata() {
        let config = ViewerConfig::try_parse_from([
            "solver-bench-viewer",
            "results/benchmark_results.csv",
            "--metadata",
            "results/metadata.json",
            "--window-size",
            "800x600",
        ])
        .unwrap();
        assert_eq!(
            config.load_request(),
            Some(LoadRequest {
                results: "results/benchmark_results.csv".into(),
                metadata: Some("results/metadata.json".into()),
            })
        );
        assert_eq!(config.window_size, [800.0, 600.0]);
    }

    #[test]
    fn metadata_requires_results() {
        assert!(ViewerConfig::try_parse_from(["solver-bench-viewer", "-m", "meta.json"]).is_err());
    }

    #[test]
    fn bad_window_size() {
        assert!(parse_window_size("800").is_err());
        assert!(parse_window_size("0x600").is_err());
        assert_eq!(parse_window_size("1024X768"), Ok([1024.0, 768.0]));
    }
}
