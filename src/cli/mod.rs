use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::api::{band_message, prediction_message, PredictionResponse, PredictorServer};
use crate::config::Settings;
use crate::ml::{MachineParameters, PredictionEngine, PARAMETER_CATALOG};
use crate::monitoring::{self, LogLevel};
use crate::track_performance;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true, env = "PREDICTOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (overrides the configuration file)
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the dashboard, contact form and JSON API
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to bind
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Predict equipment output for one set of machine parameters
    Predict(PredictArgs),
    /// List machine parameters with their bounds and defaults
    Parameters,
}

/// Machine readings; anything left out takes its default
#[derive(Debug, Clone, Default, Args)]
pub struct PredictArgs {
    /// Injection temperature (°C)
    #[arg(long, allow_negative_numbers = true)]
    pub injection_temperature: Option<f64>,

    /// Injection pressure (bar)
    #[arg(long, allow_negative_numbers = true)]
    pub injection_pressure: Option<f64>,

    /// Cycle time (s)
    #[arg(long, allow_negative_numbers = true)]
    pub cycle_time: Option<f64>,

    /// Cooling time (s)
    #[arg(long, allow_negative_numbers = true)]
    pub cooling_time: Option<f64>,

    /// Material viscosity (Pa·s)
    #[arg(long, allow_negative_numbers = true)]
    pub viscosity: Option<f64>,

    /// Ambient temperature (°C)
    #[arg(long, allow_negative_numbers = true)]
    pub ambient_temperature: Option<f64>,

    /// Machine age (years)
    #[arg(long, allow_negative_numbers = true)]
    pub machine_age: Option<f64>,

    /// Operator experience (months)
    #[arg(long, allow_negative_numbers = true)]
    pub operator_experience: Option<f64>,

    /// Hours since last maintenance
    #[arg(long, allow_negative_numbers = true)]
    pub maintenance_hours: Option<f64>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl PredictArgs {
    pub fn to_parameters(&self) -> MachineParameters {
        let defaults = MachineParameters::default();

        MachineParameters {
            injection_temperature: self.injection_temperature.unwrap_or(defaults.injection_temperature),
            injection_pressure: self.injection_pressure.unwrap_or(defaults.injection_pressure),
            cycle_time: self.cycle_time.unwrap_or(defaults.cycle_time),
            cooling_time: self.cooling_time.unwrap_or(defaults.cooling_time),
            viscosity: self.viscosity.unwrap_or(defaults.viscosity),
            ambient_temperature: self.ambient_temperature.unwrap_or(defaults.ambient_temperature),
            machine_age: self.machine_age.unwrap_or(defaults.machine_age),
            operator_experience: self.operator_experience.unwrap_or(defaults.operator_experience),
            maintenance_hours: self.maintenance_hours.unwrap_or(defaults.maintenance_hours),
        }
    }
}

/// Load settings, install logging and run the chosen command
pub async fn run(cli: Cli) -> Result<()> {
    let (host, port) = match &cli.command {
        Commands::Serve { host, port } => (host.clone(), *port),
        _ => (None, None),
    };

    let settings = Settings::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(host, port, cli.log_level);

    monitoring::init_telemetry(&settings.telemetry())
        .context("Failed to initialize logging")?;

    match cli.command {
        Commands::Serve { .. } => {
            info!("Starting equipment output predictor");
            let server = PredictorServer::new(settings.server, PredictionEngine::new());
            server.start().await.context("Prediction server failed")?;
        }
        Commands::Predict(args) => {
            println!("{}", predict_report(&args)?);
        }
        Commands::Parameters => {
            print!("{}", parameter_table());
        }
    }

    Ok(())
}

/// Text (or JSON) printed by `predict`
pub fn predict_report(args: &PredictArgs) -> Result<String> {
    track_performance!("cli_predict");

    let params = args.to_parameters();
    let engine = PredictionEngine::new();
    let result = engine.predict(&params);

    if args.json {
        let response = PredictionResponse {
            predicted_output: result.predicted_output,
            band: result.band,
            model: engine.model_name().to_string(),
            parameters: params,
        };
        return serde_json::to_string_pretty(&response).context("Failed to serialize prediction");
    }

    Ok(format!(
        "{}\nPerformance: {} - {}",
        prediction_message(&result),
        result.band,
        band_message(result.band)
    ))
}

/// Text printed by `parameters`
pub fn parameter_table() -> String {
    let mut out = format!(
        "{:<22} {:<24} {:>8} {:>8} {:>8}\n",
        "NAME", "LABEL", "MIN", "MAX", "DEFAULT"
    );
    for spec in PARAMETER_CATALOG.iter() {
        out.push_str(&format!(
            "{:<22} {:<24} {:>8} {:>8} {:>8}\n",
            spec.name,
            format!("{} ({})", spec.label, spec.unit),
            spec.min,
            spec.max,
            spec.default
        ));
    }
    out
}
