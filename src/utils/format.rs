//! Formatting Helpers
//!
//! Human-readable labels for byte sizes, as shown next to templates and
//! generated artifacts.

/// Format a byte count as a label like "2.4 MB".
///
/// Uses 1024-based units and trims trailing zeros from the fraction.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exponent = ((bytes as f64).ln() / 1024_f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exponent as i32);

    let rounded = (value * 100.0).round() / 100.0;
    let mut label = format!("{:.2}", rounded);
    while label.ends_with('0') {
        label.pop();
    }
    if label.ends_with('.') {
        label.pop();
    }

    format!("{} {}", label, UNITS[exponent])
}
