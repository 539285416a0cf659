//! Display helpers shared by renderers.

/// Format milliseconds as zero-padded `MM:SS`.
///
/// Partial seconds are truncated, so 59.9s left shows `00:59`. Minutes are
/// not capped and widen past two digits for very long periods.
pub fn clock_text(remaining_ms: u64) -> String {
    let secs = remaining_ms / 1000;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Elapsed fraction `1 - remaining/total`, clamped to `[0, 1]`.
pub fn progress(remaining_ms: u64, total_ms: u64) -> f64 {
    if total_ms == 0 {
        return 0.0;
    }
    (1.0 - remaining_ms as f64 / total_ms as f64).clamp(0.0, 1.0)
}

/// A fixed-width text progress bar, e.g. `[#####-----]`.
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
