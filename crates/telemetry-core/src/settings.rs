use clap::Parser;
use std::path::PathBuf;

/// Batch processor for solar panel telemetry
#[derive(Parser, Debug, Clone)]
#[command(
    name = "solar-batch",
    about = "Validates solar panel sensor CSV batches and writes metrics reports",
    version
)]
pub struct Settings {
    /// Directory scanned for incoming CSV batches
    #[arg(long, default_value = "data/incoming")]
    pub intake_dir: PathBuf,

    /// Directory where processed JSON reports are written
    #[arg(long, default_value = "data/processed")]
    pub output_dir: PathBuf,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
