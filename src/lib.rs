//! Health Scatter - interactive scatter chart of per-region health statistics
//!
//! The chart logic (`charts::ChartView`) is GUI-independent: it turns events
//! into render effects that the egui canvas or the plotters exporter execute.

pub mod charts;
pub mod cli;
pub mod config;
pub mod data;
pub mod gui;
