// Prediction Module

pub mod parameters;
pub mod prediction_engine;

// Expose key types and functions
pub use parameters::{
    parameter_spec,
    MachineParameters,
    ParameterSpec,
    PARAMETER_CATALOG,
};
pub use prediction_engine::{
    LinearOutputModel,
    OutputModel,
    PerformanceBand,
    PredictionEngine,
    PredictionResult,
};
