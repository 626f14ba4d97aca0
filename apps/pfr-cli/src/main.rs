use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use pfr_app::{AppError, AppResult, RunState, Session};
use pfr_client::{ClientConfig, HttpBackend, SimulationBackend, parse_simulate_response};
use pfr_core::{kelvin_to_celsius, reactor};
use pfr_params::{ParamField, SimulationParameters};
use pfr_results::{SimulationResult, chart_series_csv, summary_metrics, to_chart_series};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pfr-cli")]
#[command(about = "PFR Simulator CLI - plug-flow reactor profiles from a simulation service", long_about = None)]
struct Cli {
    /// Simulation service root URL (overrides config file and PFR_SIM_URL)
    #[arg(long, global = true)]
    url: Option<String>,
    /// YAML file with client settings (base_url, timeout_s)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<f64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one simulation and print its summary
    Simulate {
        /// Inlet temperature [K], 273-350
        #[arg(long)]
        t_in: Option<f64>,
        /// Flow velocity [m/s], 0.5-5.0
        #[arg(long)]
        flow_velocity: Option<f64>,
        /// Cooling jacket temperature [K], 250-300
        #[arg(long)]
        t_jacket: Option<f64>,
        /// Print the full result as JSON instead of the summary
        #[arg(long)]
        json: bool,
        /// Write the chart series to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Check that the simulation service is reachable
    Ping,
    /// Show the accepted parameter ranges and defaults
    Ranges,
    /// Summarize a saved /simulate response body
    Summarize {
        /// Path to the JSON response
        response_path: PathBuf,
        /// Write the chart series to a CSV file (defaults to stdout)
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            t_in,
            flow_velocity,
            t_jacket,
            json,
            csv,
        } => {
            let defaults = SimulationParameters::default();
            let params = SimulationParameters {
                inlet_temperature: t_in.unwrap_or(defaults.inlet_temperature),
                flow_velocity: flow_velocity.unwrap_or(defaults.flow_velocity),
                jacket_temperature: t_jacket.unwrap_or(defaults.jacket_temperature),
            };
            let config = client_config(cli.config.as_deref(), cli.url, cli.timeout)?;
            cmd_simulate(&config, params, json, csv.as_deref())
        }
        Commands::Ping => {
            let config = client_config(cli.config.as_deref(), cli.url, cli.timeout)?;
            cmd_ping(&config)
        }
        Commands::Ranges => cmd_ranges(),
        Commands::Summarize { response_path, csv } => {
            cmd_summarize(&response_path, csv.as_deref())
        }
    }
}

fn client_config(
    config_path: Option<&Path>,
    url: Option<String>,
    timeout: Option<f64>,
) -> AppResult<ClientConfig> {
    let mut config = match config_path {
        Some(path) => ClientConfig::from_yaml_file(path)?,
        None => ClientConfig::default(),
    }
    .with_env_overrides();

    if let Some(url) = url {
        config.base_url = url;
    }
    if let Some(t) = timeout {
        config.timeout_s = Some(t);
    }
    config.validate()?;
    Ok(config)
}

fn cmd_simulate(
    config: &ClientConfig,
    params: SimulationParameters,
    json: bool,
    csv: Option<&Path>,
) -> AppResult<()> {
    // The command line is an input boundary: reject rather than clamp.
    params.validate()?;

    let backend = HttpBackend::new(config)?;
    let mut session = Session::with_parameters(Arc::new(backend), params);

    if !json {
        println!("Running PFR simulation via {}", session.backend().describe());
        print_parameters(&params);
    }

    if session.trigger_run().is_none() {
        return Err(AppError::InvalidInput(
            "a simulation run is already in flight".to_string(),
        ));
    }
    let started = Instant::now();
    while session.is_running() {
        if session.wait_timeout(Duration::from_millis(100)).is_none() && !json {
            render_spinner(started.elapsed().as_secs_f64());
        }
    }
    if !json {
        clear_progress_line();
    }

    let result = match session.state() {
        RunState::Succeeded(result) => result.clone(),
        RunState::Failed(failure) => return Err(AppError::RunFailed(failure.message.clone())),
        other => {
            return Err(AppError::Worker(format!(
                "run ended in unexpected state {}",
                other.label()
            )));
        }
    };

    if json {
        let text = serde_json::to_string_pretty(&result)
            .map_err(|e| AppError::Results(e.to_string()))?;
        println!("{}", text);
    } else {
        if let Some(report) = session.controller().last_report() {
            println!(
                "✓ Simulation {} completed in {:.3}s ({})",
                report.request_id,
                report.elapsed_s,
                report.finished_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
        }
        print_summary(&result)?;
    }

    if let Some(path) = csv {
        let series = to_chart_series(&result);
        pfr_results::write_chart_series_csv(path, &series)?;
        if !json {
            println!(
                "✓ Exported {} chart points to {}",
                series.len(),
                path.display()
            );
        }
    }

    Ok(())
}

fn cmd_ping(config: &ClientConfig) -> AppResult<()> {
    let backend = HttpBackend::new(config)?;
    let info = backend.service_info()?;
    println!("✓ {} is reachable", config.base_url);
    if info.version.is_empty() {
        println!("  {}", info.message);
    } else {
        println!("  {} (version {})", info.message, info.version);
    }
    Ok(())
}

fn cmd_ranges() -> AppResult<()> {
    let defaults = SimulationParameters::default();
    println!(
        "{:<20} {:<14} {:>8} {:>8} {:>6} {:>8}",
        "Parameter", "Flag", "Min", "Max", "Step", "Default"
    );
    for field in ParamField::ALL {
        let range = field.range();
        println!(
            "{:<20} {:<14} {:>8} {:>8} {:>6} {:>8}  {}",
            field.label(),
            cli_flag(field),
            range.min,
            range.max,
            range.step,
            defaults.get(field),
            range.unit
        );
    }
    println!(
        "\nReactor: length {:.2} m, tube diameter {:.2} m",
        reactor::LENGTH_M,
        reactor::TUBE_DIAMETER_M
    );
    Ok(())
}

fn cmd_summarize(response_path: &Path, csv: Option<&Path>) -> AppResult<()> {
    let text = std::fs::read_to_string(response_path)?;
    let result = parse_simulate_response(&text)?;

    let series = to_chart_series(&result);
    match csv {
        Some(path) => {
            print_summary(&result)?;
            pfr_results::write_chart_series_csv(path, &series)?;
            println!(
                "✓ Exported {} chart points to {}",
                series.len(),
                path.display()
            );
        }
        None => {
            print_summary(&result)?;
            println!();
            print!("{}", chart_series_csv(&series));
        }
    }
    Ok(())
}

fn cli_flag(field: ParamField) -> &'static str {
    match field {
        ParamField::InletTemperature => "--t-in",
        ParamField::FlowVelocity => "--flow-velocity",
        ParamField::JacketTemperature => "--t-jacket",
    }
}

fn print_parameters(params: &SimulationParameters) {
    println!(
        "  T_in     = {:.1} K ({:.1} °C)",
        params.inlet_temperature,
        kelvin_to_celsius(params.inlet_temperature)
    );
    println!(
        "  velocity = {:.2} m/s (residence time {:.1} s)",
        params.flow_velocity,
        params.residence_time_s()
    );
    println!(
        "  T_jacket = {:.1} K ({:.1} °C)",
        params.jacket_temperature,
        kelvin_to_celsius(params.jacket_temperature)
    );
}

fn print_summary(result: &SimulationResult) -> AppResult<()> {
    let summary = summary_metrics(result)?;

    println!("\nResults:");
    println!("  Final conversion:     {:.1} %", summary.final_conversion_percent);
    println!(
        "  Max temperature:      {:.1} K ({:.1} °C)",
        summary.max_temperature,
        summary.max_temperature_celsius()
    );
    println!("  Inlet temperature:    {:.1} K", summary.inlet_temperature);
    println!("  Outlet temperature:   {:.1} K", summary.outlet_temperature);
    println!("  Inlet concentration:  {:.3} mol/m³", summary.inlet_concentration);
    println!("  Outlet concentration: {:.3} mol/m³", summary.outlet_concentration);
    println!("  Reactor length:       {:.2} m", reactor::LENGTH_M);
    println!("  Samples:              {}", summary.sample_count);
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(60));
    let _ = io::stdout().flush();
}

fn render_spinner(elapsed_s: f64) {
    let spinner = ['|', '/', '-', '\\'];
    let spin_idx = ((elapsed_s * 10.0) as usize) % spinner.len();
    print!("\r{} Waiting for simulation service  elapsed={:.1}s", spinner[spin_idx], elapsed_s);
    let _ = io::stdout().flush();
}
