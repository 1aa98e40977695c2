use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Solver;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            // Offset so generated hues stay clear of the fixed solver colours.
            let hue = 30.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Solver → Color32
// ---------------------------------------------------------------------------

/// Fixed colour for each known solver.
pub fn solver_color(solver: &Solver) -> Option<Color32> {
    match solver {
        Solver::Glpk => Some(Color32::from_rgb(0x00, 0xCC, 0x96)),
        Solver::Scip => Some(Color32::from_rgb(0x62, 0x9B, 0xF8)),
        Solver::Highs => Some(Color32::from_rgb(0xB4, 0x23, 0x18)),
        Solver::Gurobi => Some(Color32::from_rgb(0xED, 0x8B, 0x00)),
        Solver::Cbc => Some(Color32::from_rgb(0x7A, 0x4E, 0xB8)),
        Solver::Other(_) => None,
    }
}

/// Colours for every solver in a dataset. Known solvers use the fixed table;
/// the rest get generated hues.
#[derive(Debug, Clone, Default)]
pub struct SolverColors {
    mapping: BTreeMap<Solver, Color32>,
}

impl SolverColors {
    pub fn new<'a>(solvers: impl IntoIterator<Item = &'a Solver>) -> Self {
        let mut mapping = BTreeMap::new();
        let mut unknown: Vec<&Solver> = Vec::new();
        for solver in solvers {
            if mapping.contains_key(solver) || unknown.contains(&solver) {
                continue;
            }
            match solver_color(solver) {
                Some(c) => {
                    mapping.insert(solver.clone(), c);
                }
                None => unknown.push(solver),
            }
        }
        let palette = generate_palette(unknown.len());
        for (solver, c) in unknown.into_iter().zip(palette) {
            mapping.insert(solver.clone(), c);
        }
        SolverColors { mapping }
    }

    pub fn color_for(&self, solver: &Solver) -> Color32 {
        self.mapping
            .get(solver)
            .copied()
            .or_else(|| solver_color(solver))
            .unwrap_or(Color32::GRAY)
    }

    /// Return the legend entries (solver name → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(s, c)| (s.to_string(), *c))
            .collect()
    }
}
