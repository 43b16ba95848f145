use super::progress::{conversion_bar, report};
use crate::{cli::ConvertArgs, render::Renderer};
use anyhow::{Context, Result};
use journal2day1_core::{Config, Converter};
use std::path::{self, Path, PathBuf};
use tracing::debug;

pub fn convert_mode(args: &ConvertArgs, renderer: &Renderer) -> Result<()> {
    let result = run_conversion(args, renderer);
    match &result {
        Ok(output) => renderer.print_success(&format!(
            "Conversion completed successfully: {}",
            output.display()
        )),
        Err(_) => renderer.print_error("Conversion failed"),
    }
    result.map(|_| ())
}

fn run_conversion(args: &ConvertArgs, renderer: &Renderer) -> Result<PathBuf> {
    let config = Config::load();
    let input = absolute(&args.input)?;
    let output = absolute(&args.output)?;
    let journal_name = args.name.clone().unwrap_or(config.journal_name);
    let time_zone = args.timezone.clone().unwrap_or(config.time_zone);

    debug!(input = %input.display(), output = %output.display(), "resolved paths");

    let mut converter = Converter::new(&input, &journal_name);
    converter.set_time_zone(&time_zone);
    converter.journal().validate()?;

    renderer.print_header("Journal Conversion");
    renderer.print_key_value("Input", &input.display().to_string());
    renderer.print_key_value("Output", &output.display().to_string());
    renderer.print_key_value("Journal", &journal_name);
    renderer.print_key_value("Timezone", &time_zone);

    let bar = conversion_bar(renderer.use_color());
    let progress = bar.clone();
    converter.set_progress(move |current, total| report(&progress, current, total));

    let converted = converter.convert(&output);
    bar.finish_and_clear();
    converted.with_context(|| format!("failed to convert {}", input.display()))?;

    Ok(output)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    path::absolute(path).with_context(|| format!("failed to resolve {}", path.display()))
}
