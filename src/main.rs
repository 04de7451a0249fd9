use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use phaselimiter_icon::export::{export_icon_set, pack_icns};
use phaselimiter_icon::IconConfig;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "phaselimiter-icon")]
#[command(about = "Render the PhaseLimiter app icon and export every icon size", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// YAML file overriding the default icon settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the icon folders are created in
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Also pack the iconset into an .icns file with iconutil (macOS only)
    #[arg(long)]
    icns: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default icon settings to a YAML file
    InitConfig {
        /// Where to write the settings
        #[arg(default_value = "icon.yaml")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Quiet by default so a plain run prints only the result line
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("phaselimiter_icon=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::InitConfig { path }) => init_config_command(&path),
        None => export_command(cli.config.as_deref(), &cli.out_dir, cli.icns),
    }
}

fn init_config_command(path: &Path) -> Result<()> {
    IconConfig::default().save(path)?;
    println!("Created default config at: {}", path.display());
    Ok(())
}

fn export_command(config_path: Option<&Path>, out_dir: &Path, icns: bool) -> Result<()> {
    let config = match config_path {
        Some(path) => IconConfig::load(path)?,
        None => IconConfig::default(),
    };

    let report = export_icon_set(&config, out_dir).context("Failed to export icon set")?;
    info!("Wrote {} files", report.written.len());

    if icns {
        let output = report.iconset_dir.with_extension("icns");
        pack_icns(&report.iconset_dir, &output)?;
        println!("✅ Icon created: {}", output.display());
    }

    println!("✅ Icons created successfully!");
    Ok(())
}
