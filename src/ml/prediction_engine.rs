use serde::{Deserialize, Serialize};
use std::fmt;

use super::parameters::MachineParameters;

/// Weight applied to injection temperature
pub const TEMPERATURE_WEIGHT: f64 = 0.3;

/// Weight applied to injection pressure
pub const PRESSURE_WEIGHT: f64 = 0.4;

/// Weight applied to operator experience
pub const EXPERIENCE_WEIGHT: f64 = 0.2;

/// Divisor applied to the weighted sum
pub const OUTPUT_SCALE: f64 = 10.0;

/// Lower bound of the Moderate band
pub const MODERATE_THRESHOLD: f64 = 20.0;

/// Lower bound of the High band
pub const HIGH_THRESHOLD: f64 = 50.0;

/// Qualitative classification of a predicted output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerformanceBand {
    Low,
    Moderate,
    High,
}

impl PerformanceBand {
    /// Classify a rounded output. Thresholds are checked in ascending order;
    /// anything not below a threshold (including NaN) lands in `High`.
    pub fn classify(predicted_output: f64) -> Self {
        if predicted_output < MODERATE_THRESHOLD {
            PerformanceBand::Low
        } else if predicted_output < HIGH_THRESHOLD {
            PerformanceBand::Moderate
        } else {
            PerformanceBand::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PerformanceBand::Low => "Low",
            PerformanceBand::Moderate => "Moderate",
            PerformanceBand::High => "High",
        }
    }
}

impl fmt::Display for PerformanceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Output in units/hour, rounded to 2 decimal places
    pub predicted_output: f64,

    pub band: PerformanceBand,
}

/// Anything that can turn machine parameters into a raw output estimate
pub trait OutputModel: Send + Sync {
    /// Unrounded output estimate
    fn estimate(&self, params: &MachineParameters) -> f64;

    fn name(&self) -> &str;
}

/// Fixed affine stand-in for a trained model
///
/// Only temperature, pressure and operator experience contribute. The other
/// six readings are collected but deliberately ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearOutputModel;

impl OutputModel for LinearOutputModel {
    fn estimate(&self, params: &MachineParameters) -> f64 {
        (params.injection_temperature * TEMPERATURE_WEIGHT
            + params.injection_pressure * PRESSURE_WEIGHT
            + params.operator_experience * EXPERIENCE_WEIGHT)
            / OUTPUT_SCALE
    }

    fn name(&self) -> &str {
        "linear-baseline"
    }
}

/// Prediction service
///
/// Owns rounding and band classification so the model behind it can be
/// replaced without touching callers. Holds no mutable state.
#[derive(Debug, Clone, Default)]
pub struct PredictionEngine<M: OutputModel = LinearOutputModel> {
    model: M,
}

impl PredictionEngine<LinearOutputModel> {
    /// Create an engine backed by the linear baseline
    pub fn new() -> Self {
        Self::with_model(LinearOutputModel)
    }
}

impl<M: OutputModel> PredictionEngine<M> {
    pub fn with_model(model: M) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Predict equipment output for one set of readings
    pub fn predict(&self, params: &MachineParameters) -> PredictionResult {
        let predicted_output = round_to_cents(self.model.estimate(params));

        PredictionResult {
            predicted_output,
            band: PerformanceBand::classify(predicted_output),
        }
    }
}

/// Round half away from zero to 2 decimal places
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
