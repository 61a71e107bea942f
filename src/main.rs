use anyhow::Context;
use clap::Parser;
use devgate::core::report;
use devgate::utils::{logger, monitor::SystemMonitor, validation::Validate};
use devgate::{
    acquire_probe, CliConfig, ConfigProvider, DeviceId, FleetSweep, GateConfig, OutputFormat,
    StatusProbe, TableStatusProbe,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting devgate");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = cli.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(2);
    }

    let file_config = match &cli.config {
        Some(path) => {
            let config = GateConfig::from_file(path)
                .with_context(|| format!("Loading config file {}", path))?;
            config.validate_config()?;
            Some(config)
        }
        None => None,
    };

    // CLI devices override the file's device list.
    let devices: Vec<DeviceId> = if cli.devices.is_empty() {
        file_config
            .as_ref()
            .map(|c| c.devices())
            .unwrap_or_default()
    } else {
        cli.devices.iter().copied().map(DeviceId).collect()
    };

    if devices.is_empty() {
        eprintln!("❌ No devices to check; pass --device or a config file with [sweep] devices");
        std::process::exit(2);
    }

    // An explicit --format wins; the file's output.format only fills in the
    // default.
    let format = match &file_config {
        Some(config) if cli.format == OutputFormat::Text => config.output_format()?,
        _ => cli.format,
    };

    let settings: &dyn ConfigProvider = match &file_config {
        Some(config) => config,
        None => &cli,
    };

    let probe: Arc<dyn StatusProbe> = match &cli.status_table {
        Some(path) => {
            tracing::info!("Using offline status table: {}", path);
            Arc::new(
                TableStatusProbe::from_file(path)
                    .with_context(|| format!("Loading status table {}", path))?,
            )
        }
        None => acquire_probe(settings)?,
    };

    let monitor = SystemMonitor::new(cli.monitor);
    if monitor.is_enabled() {
        tracing::info!("System monitoring enabled");
    }

    let sweep = FleetSweep::new(probe, settings.concurrent_requests());
    let fleet_report = sweep.run(&devices).await;
    monitor.log_stats("Sweep complete");

    let rendered = match format {
        OutputFormat::Text => report::render_text(&fleet_report),
        OutputFormat::Json => report::render_json(&fleet_report)?,
        OutputFormat::Csv => report::render_csv(&fleet_report)?,
    };
    println!("{}", rendered);

    if fleet_report.failed > 0 {
        tracing::error!("{} devices could not be checked", fleet_report.failed);
        std::process::exit(1);
    }

    Ok(())
}
