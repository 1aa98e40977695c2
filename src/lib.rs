//! Dashboard for optimization solver benchmark results.
//!
//! The [`data`] layer ingests a results export, narrows it with the
//! category filters and aggregates it into per-solver chart series; the
//! [`ui`] layer draws whatever [`state::AppState`] currently holds.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
