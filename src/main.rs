use clap::Parser;
use eframe::egui;

use solver_bench_viewer::app::SolverBenchApp;
use solver_bench_viewer::config::ViewerConfig;

fn main() -> eframe::Result {
    env_logger::init();
    let config = ViewerConfig::parse();
    log::debug!("{config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    let initial = config.load_request();
    eframe::run_native(
        "Solver Benchmark Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(SolverBenchApp::new(initial)))),
    )
}
