//! Equipment output prediction for injection molding machines.
//!
//! The [`ml`] module holds the prediction engine; [`api`] and [`cli`] are the
//! web and command-line front ends around it.

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod ml;
pub mod monitoring;

pub use crate::core::{PredictorError, PredictorResult};
pub use crate::ml::{MachineParameters, PerformanceBand, PredictionEngine, PredictionResult};
