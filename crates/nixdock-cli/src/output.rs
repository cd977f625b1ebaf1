//! Formatted output helpers for CLI commands.

/// Binary size units from bytes up to GiB.
const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

/// Formats a byte count into a human-readable string (e.g., "128.0 MiB").
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} {}", UNITS[0])
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
