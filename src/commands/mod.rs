//! CLI commands for calens
//!
//! calens has a single command: collect the fragments of the selected
//! releases and turn them into a changelog. The output mode (render, check or
//! json) is part of the resolved [`GenerateConfig`](crate::core::config::GenerateConfig).

pub mod generate;

pub use generate::run_generate;
