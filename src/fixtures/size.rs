//! Human-readable upload sizes.

/// Sizes above this many bytes are shown in MB.
const MB_THRESHOLD: u64 = 999_999;

const KB: u64 = 1_000;
const MB: u64 = 1_000_000;

/// Format a byte count as `"<n> KB"` or `"<n> MB"` with one decimal place.
///
/// Rounding is half away from zero and a trailing `.0` is dropped, so
/// 1,000,000 bytes reads `1 MB` and 999,999 bytes reads `1000 KB`.
pub fn format_size(bytes: u64) -> String {
    let (divisor, unit) = if bytes > MB_THRESHOLD {
        (MB, "MB")
    } else {
        (KB, "KB")
    };

    let tenths = round_tenths(bytes, divisor);
    let whole = tenths / 10;
    let frac = tenths % 10;

    if frac == 0 {
        format!("{whole} {unit}")
    } else {
        format!("{whole}.{frac} {unit}")
    }
}

/// `bytes / divisor` in tenths, rounded half up.
fn round_tenths(bytes: u64, divisor: u64) -> u64 {
    let scaled = u128::from(bytes) * 10;
    let divisor = u128::from(divisor);
    let rounded = (scaled + divisor / 2) / divisor;
    // bytes * 10 / 1000 never exceeds u64::MAX / 100
    rounded as u64
}
