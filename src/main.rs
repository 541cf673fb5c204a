use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{debug, warn};

use stream_settings::{
    Attenuator, BuildVariant, Channel, Coupling, DataFormat, DataType, Protocol, Resolution,
    StreamSettings,
};

#[derive(Parser)]
#[command(name = "stream-settings")]
#[command(about = "Streaming server settings\n\nCreate and inspect the JSON settings document read by the streaming server.", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every field of a settings document
    Show {
        /// Path to settings file (JSON)
        file: PathBuf,
    },
    /// Exit with success only if a settings document is complete
    Check {
        /// Path to settings file (JSON)
        file: PathBuf,
    },
    /// Write a settings document from the given values
    Write(WriteArgs),
}

#[derive(Args)]
struct WriteArgs {
    /// Path to settings file (JSON), replaced if it exists
    file: PathBuf,

    /// Sink hostname or IP address
    #[arg(long)]
    host: Option<String>,

    /// Sink port
    #[arg(long)]
    port: Option<String>,

    #[arg(long, value_enum)]
    protocol: Option<Protocol>,

    /// Samples to stream, -1 for unbounded
    #[arg(long, allow_negative_numbers = true)]
    samples: Option<i32>,

    #[arg(long, value_enum)]
    format: Option<DataFormat>,

    #[arg(long = "type", value_enum)]
    data_type: Option<DataType>,

    #[arg(long, value_enum)]
    channels: Option<Channel>,

    #[arg(long, value_enum)]
    resolution: Option<Resolution>,

    #[arg(long)]
    decimation: Option<u32>,

    #[arg(long, value_enum)]
    attenuator: Option<Attenuator>,

    #[arg(long)]
    calibration: Option<bool>,

    #[arg(long, value_enum)]
    coupling: Option<Coupling>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG still wins over --debug
    let level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    debug!("Build variant: {}", BuildVariant::ACTIVE);

    match cli.command {
        Command::Show { file } => show(&file),
        Command::Check { file } => check(&file),
        Command::Write(args) => write(args),
    }
}

fn load(file: &Path) -> Result<StreamSettings> {
    let mut settings = StreamSettings::new();
    settings
        .load(file)
        .with_context(|| format!("Failed to read settings from {}", file.display()))?;
    Ok(settings)
}

fn show(file: &Path) -> Result<()> {
    let settings = load(file)?;

    println!("{} ({} board)", file.display(), settings.variant());
    for &field in settings.variant().fields() {
        let marker = if settings.is_assigned(field) { "" } else { "  (not set)" };
        println!("  {:<12} {}{}", field.key(), settings.value_of(field), marker);
    }

    if !settings.is_complete() {
        bail!("{} is incomplete", file.display());
    }
    Ok(())
}

fn check(file: &Path) -> Result<()> {
    let settings = load(file)?;
    if !settings.is_complete() {
        let missing: Vec<&str> = settings.missing().iter().map(|f| f.key()).collect();
        bail!("{} is incomplete, missing: {}", file.display(), missing.join(", "));
    }
    println!("✓ {} is complete", file.display());
    Ok(())
}

fn write(args: WriteArgs) -> Result<()> {
    let settings = settings_from_args(&args);
    settings
        .save(&args.file)
        .with_context(|| format!("Failed to write settings to {}", args.file.display()))?;
    println!("✓ Wrote {}", args.file.display());
    Ok(())
}

fn settings_from_args(args: &WriteArgs) -> StreamSettings {
    let mut settings = StreamSettings::new();
    let variant = settings.variant();

    if let Some(host) = &args.host {
        settings.set_host(host.as_str());
    }
    if let Some(port) = &args.port {
        settings.set_port(port.as_str());
    }
    if let Some(protocol) = args.protocol {
        settings.set_protocol(protocol);
    }
    if let Some(samples) = args.samples {
        settings.set_samples(samples);
    }
    if let Some(format) = args.format {
        settings.set_format(format);
    }
    if let Some(data_type) = args.data_type {
        settings.set_data_type(data_type);
    }
    if let Some(channels) = args.channels {
        settings.set_channels(channels);
    }
    if let Some(resolution) = args.resolution {
        settings.set_resolution(resolution);
    }
    if let Some(decimation) = args.decimation {
        settings.set_decimation(decimation);
    }
    if let Some(attenuator) = args.attenuator {
        settings.set_attenuator(attenuator);
    }
    if let Some(calibration) = args.calibration {
        settings.set_calibration(calibration);
    }
    if let Some(coupling) = args.coupling {
        settings.set_coupling(coupling);
    }

    for field in settings.assigned().iter() {
        if !variant.has_field(field) {
            warn!("--{} is not used by the {} board", field.key(), variant);
        }
    }

    settings
}
