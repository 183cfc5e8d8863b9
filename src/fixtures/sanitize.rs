//! Upload filename sanitization.
//!
//! Client filenames are used both as the on-disk name and as display text,
//! so a handful of characters that are awkward in links are spelled out or
//! dropped. The replacements run in table order, each exactly once over the
//! whole string, and later rules see the output of earlier ones. Existing
//! clients compare against this exact output, so the table must not be
//! reordered.

/// Ordered (pattern, replacement) pairs.
pub const REPLACEMENTS: [(&str, &str); 7] = [
    ("#", "No."),
    ("$", "Dollar"),
    ("%", "Percent"),
    ("^", ""),
    ("&", "and"),
    ("*", ""),
    ("?", ""),
];

/// Apply the replacement table to a filename.
pub fn sanitize_filename(name: &str) -> String {
    REPLACEMENTS
        .iter()
        .fold(name.to_string(), |acc, (pattern, replacement)| {
            acc.replace(pattern, replacement)
        })
}

/// Reduce a client-reported filename to its last path component.
///
/// Browsers on some platforms send the full local path; both separators
/// are treated as directory boundaries.
pub fn base_name(reported: &str) -> &str {
    reported
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(reported)
}

/// Whether a sanitized name can be used as a file inside the upload directory.
pub fn is_storable(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".."
}
