//! `cotejo` — config-driven comparison of two registry reports.

mod exit_codes;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::debug;

use cotejo_recon::engine::load_csv_rows;
use cotejo_recon::{ReconConfig, ReconInput, ReconResult};

use exit_codes::{EXIT_INVALID_CONFIG, EXIT_MISMATCH, EXIT_RUNTIME};

#[derive(Debug)]
struct CliError {
    code: u8,
    message: String,
}

fn cli_err(code: u8, message: impl Into<String>) -> CliError {
    CliError { code, message: message.into() }
}

#[derive(Parser)]
#[command(name = "cotejo")]
#[command(about = "Reconcile two tabular reports of the same records")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run reconciliation from a TOML config file
    #[command(after_help = "\
Examples:
  cotejo run saf-vs-banner.toml
  cotejo run saf-vs-banner.toml --json
  cotejo run saf-vs-banner.toml --output result.json")]
    Run {
        /// Path to the .recon.toml config file
        config: PathBuf,

        /// Output JSON to stdout instead of human summary only
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate a recon config without running
    #[command(after_help = "\
Examples:
  cotejo validate saf-vs-banner.toml")]
    Validate {
        /// Path to the .recon.toml config file
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run { config, json, output } => cmd_run(config, json, output),
        Commands::Validate { config } => cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            ExitCode::from(err.code)
        }
    }
}

/// Load both sources named by the config, resolving files relative to the
/// config file's directory, and run the engine.
fn load_and_run(config: &ReconConfig, base_dir: &Path) -> Result<ReconResult, CliError> {
    let mut records = HashMap::new();
    for (source_name, source_config) in &config.sources {
        let csv_path = base_dir.join(&source_config.file);
        let csv_data = std::fs::read_to_string(&csv_path).map_err(|e| {
            cli_err(EXIT_RUNTIME, format!("cannot read {}: {e}", csv_path.display()))
        })?;
        let rows = load_csv_rows(source_name, &csv_data, source_config)
            .map_err(|e| cli_err(EXIT_RUNTIME, e.to_string()))?;
        debug!("source '{}': {} rows from {}", source_name, rows.len(), csv_path.display());
        records.insert(source_name.clone(), rows);
    }

    cotejo_recon::run(config, &ReconInput { records })
        .map_err(|e| cli_err(EXIT_RUNTIME, e.to_string()))
}

fn cmd_run(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| cli_err(EXIT_RUNTIME, format!("cannot read config: {e}")))?;
    let config = ReconConfig::from_toml(&config_str)
        .map_err(|e| cli_err(EXIT_INVALID_CONFIG, e.to_string()))?;

    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let result = load_and_run(&config, base_dir)?;

    let json_str = result
        .to_json_pretty()
        .map_err(|e| cli_err(EXIT_RUNTIME, format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| cli_err(EXIT_RUNTIME, format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    // Human summary to stderr
    let s = &result.summary;
    eprintln!(
        "recon '{}': {} keys — {} matched, {} field mismatches, {} unmatched",
        result.meta.config_name,
        s.total_rows,
        s.matched,
        s.field_mismatches,
        s.left_only + s.right_only,
    );

    if s.field_mismatches > 0 || s.left_only > 0 || s.right_only > 0 {
        return Err(cli_err(EXIT_MISMATCH, "discrepancies found"));
    }

    Ok(())
}

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| cli_err(EXIT_RUNTIME, format!("cannot read config: {e}")))?;

    match ReconConfig::from_toml(&config_str) {
        Ok(config) => {
            eprintln!(
                "valid: recon '{}' comparing '{}' against '{}'",
                config.name, config.pair.left, config.pair.right,
            );
            Ok(())
        }
        Err(e) => Err(cli_err(EXIT_INVALID_CONFIG, e.to_string())),
    }
}
