//! Export command - write the JSON document for a fitted model.

use colored::Colorize;
use nbexport::{ExportConfig, Exporter};

use crate::cli::Cli;

pub fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ExportConfig {
        class_selector: cli.class_selector(),
        reader: cli.reader_config(),
    };

    tracing::debug!(selector = ?config.class_selector, "starting export");
    let summary = Exporter::with_config(config).export(&cli.model, &cli.schema, &cli.output)?;

    if cli.verbose {
        println!(
            "{} {} ({})",
            "Model".cyan().bold(),
            summary.model_variant,
            cli.model.display()
        );
        println!(
            "Class attribute {} with {} classes, {} predictor attributes",
            summary.class_attribute.white().bold(),
            summary.class_count.to_string().white().bold(),
            summary.attribute_count.to_string().white().bold()
        );
        println!("{} bytes, {}", summary.bytes_written, summary.digest.dimmed());
    }

    println!(
        "{} {}",
        "Wrote:".green().bold(),
        summary.output.display().to_string().white()
    );

    Ok(())
}
