//! Helpers for presenting compression results on the command line.

use crate::constants::{
    COMPRESSED_SIZE_PREFIX, COMPRESSION_RATIO_PREFIX, ORIGINAL_SIZE_PREFIX,
    PROGRESS_SPINNER_TEMPLATE, SUCCESS_PREFIX,
};
use crate::CompressionReport;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while waiting on the compression service. Hidden in quiet mode.
pub fn create_progress_spinner(message: &str) -> ProgressBar {
    if crate::logger::is_quiet() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template(PROGRESS_SPINNER_TEMPLATE) {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Human-readable size of an uploaded source or downloaded artifact,
/// in binary units ("512 B", "1.5 KB").
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    match unit {
        0 => format!("{} {}", bytes, UNITS[0]),
        _ => format!("{:.1} {}", size, UNITS[unit]),
    }
}

/// Percentage saved between the source and the artifact the service sent
/// back. Negative when the service returned a larger file.
pub fn calculate_compression_ratio(original_size: u64, compressed_size: u64) -> f64 {
    match original_size {
        0 => 0.0,
        original => (original as f64 - compressed_size as f64) * 100.0 / original as f64,
    }
}

/// Print a compression report. Sizes come from the local source when there
/// is one and from the service otherwise.
pub fn print_compression_report(report: &CompressionReport) {
    let original = report.original_size.or(report.src_size);

    if let Some(original) = original {
        crate::info!(
            "{} {} ({})",
            ORIGINAL_SIZE_PREFIX,
            original,
            format_file_size(original)
        );
    }
    crate::info!(
        "{} {} ({})",
        COMPRESSED_SIZE_PREFIX,
        report.bytes_written,
        format_file_size(report.bytes_written)
    );

    let ratio = match (original, report.percent) {
        (Some(original), _) => Some(calculate_compression_ratio(original, report.bytes_written)),
        (None, Some(percent)) => Some(percent),
        (None, None) => None,
    };

    if let Some(ratio) = ratio {
        crate::info!("{} {:.1}%", COMPRESSION_RATIO_PREFIX, ratio);
        if ratio < 0.0 {
            crate::warn!("File size increased by {:.1}%", ratio.abs());
        }
    }

    crate::info!("{} Saved to {}", SUCCESS_PREFIX, report.output_path.display());
    if let Some(expires) = &report.expires {
        crate::verbose!("Service copy expires: {}", expires);
    }
}
