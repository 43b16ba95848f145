use indicatif::{ProgressBar, ProgressStyle};

/// Bar sized lazily: the total is only known once the export has been parsed.
pub fn conversion_bar(use_color: bool) -> ProgressBar {
    let template = if use_color {
        "{msg} ({pos}/{len}) [{bar:40.green/dim}] {percent}%"
    } else {
        "{msg} ({pos}/{len}) [{bar:40}] {percent}%"
    };
    let style = ProgressStyle::default_bar()
        .template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");

    let bar = ProgressBar::new(0);
    bar.set_style(style);
    bar.set_message("Converting entries");
    bar
}

/// Feeds a `(current, total)` update from the converter into the bar.
pub fn report(bar: &ProgressBar, current: usize, total: usize) {
    let total = total as u64;
    if bar.length() != Some(total) {
        bar.set_length(total);
    }
    bar.set_position(current as u64);
}
