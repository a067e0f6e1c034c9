mod bootstrap;

use anyhow::Result;
use clap::Parser;
use telemetry_core::settings::Settings;
use telemetry_data::pipeline::{process_batch, BatchResult};
use telemetry_data::reader::find_csv_files;

fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Solar batch processor v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Intake: {}, Output: {}",
        settings.intake_dir.display(),
        settings.output_dir.display()
    );

    if !settings.intake_dir.exists() {
        println!(
            "Error: directory {} does not exist",
            settings.intake_dir.display()
        );
        return Ok(());
    }

    let csv_files = find_csv_files(&settings.intake_dir);
    if csv_files.is_empty() {
        println!(
            "No CSV files found in {}",
            settings.intake_dir.display()
        );
        return Ok(());
    }

    println!("{}", "=".repeat(60));
    println!("SOLAR TELEMETRY PROCESSOR");
    println!("{}", "=".repeat(60));
    println!("Found {} file(s) to process\n", csv_files.len());

    let mut results: Vec<BatchResult> = Vec::with_capacity(csv_files.len());

    for csv_file in &csv_files {
        let name = csv_file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| csv_file.display().to_string());
        println!("Processing: {}", name);

        let result = process_batch(csv_file, &settings.output_dir);

        if result.is_success() {
            println!(
                "  Success: {} records processed",
                result.records_processed
            );
            if let Some(output_file) = &result.output_file {
                println!("  Output: {}", output_file);
            }
            if result.records_invalid > 0 {
                println!(
                    "  Warning: {} invalid records skipped",
                    result.records_invalid
                );
            }
        } else {
            println!(
                "  Error: {}",
                result.error.as_deref().unwrap_or("Unknown error")
            );
        }
        println!();

        results.push(result);
    }

    let success_count = results.iter().filter(|r| r.is_success()).count();
    println!("{}", "=".repeat(60));
    println!(
        "SUMMARY: {}/{} files processed successfully",
        success_count,
        results.len()
    );
    println!("{}", "=".repeat(60));

    Ok(())
}
