//! CLI output formatting and file output.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Characters of the digit string shown on the console without `--verbose`.
pub const DISPLAY_LIMIT: usize = 1000;

/// Format a digit string for display, truncating long results.
#[must_use]
pub fn format_digits(digits: &str, verbose: bool) -> String {
    if !verbose && digits.len() > DISPLAY_LIMIT {
        format!(
            "{}... ({} characters, use --verbose or --output for all)",
            &digits[..DISPLAY_LIMIT],
            format_number(digits.len() as u64)
        )
    } else {
        digits.to_string()
    }
}

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Format a number with thousand separators.
#[must_use]
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut grouped = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// File name used by `--save`, e.g. `pi_1,000.txt`.
#[must_use]
pub fn save_file_name(digits: u64) -> PathBuf {
    PathBuf::from(format!("pi_{}.txt", format_number(digits)))
}

/// Write the digit string to a file, followed by a newline.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written.
pub fn write_to_file(path: &Path, digits: &str) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    writeln!(file, "{digits}")?;
    file.flush()
}
