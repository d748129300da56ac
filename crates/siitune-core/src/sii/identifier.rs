//! Identifier derivation policy
//!
//! Maps a human display name (plus optional truck context) to the dotted
//! machine identifier the game engine consumes. The mapping is a pure
//! function: identical input always yields the identical identifier.

use regex::Regex;

use super::ConfigBlockKind;

/// Derive the machine identifier for a block
///
/// When `preserve_previous` is set and a previous identifier is known, it is
/// returned unchanged; stability across repeated edits is the default for
/// round-trip mode. Otherwise the identifier is rebuilt from the display
/// name:
/// - lowercase, trailing `tuned` suffix stripped, runs of characters outside
///   `[a-z0-9_]` replaced by `_`, repeated `_` collapsed, edges trimmed;
/// - runs of 4+ digits compressed to `k` notation (`1005` -> `1k0`,
///   `1500` -> `1k5`) because the game silently rejects over-long unit
///   names;
/// - suffix: `<base>.<truck>.<kind>` when a truck context is given, else the
///   previous identifier's dot-suffix verbatim, else just `.<kind>`.
pub fn derive_identifier(
    display_name: &str,
    truck_context: Option<&str>,
    previous: Option<&str>,
    kind: ConfigBlockKind,
    preserve_previous: bool,
) -> String {
    if preserve_previous {
        if let Some(prev) = previous {
            return prev.to_string();
        }
    }

    let base = sanitize_base(display_name);

    if let Some(truck) = truck_context.map(str::trim).filter(|t| !t.is_empty()) {
        return format!("{base}.{truck}.{}", kind.id_suffix());
    }

    if let Some(prev) = previous {
        if let Some((_, suffix)) = prev.split_once('.') {
            if !suffix.is_empty() {
                return format!("{base}.{suffix}");
            }
        }
    }

    format!("{base}.{}", kind.id_suffix())
}

/// Sanitize a display name into an identifier base segment
fn sanitize_base(display_name: &str) -> String {
    let tuned_re = Regex::new(r"(?i)\s*tuned\s*$").unwrap();
    let stripped = tuned_re.replace(display_name, "");
    let lower = stripped.to_lowercase();

    let mut mapped = String::with_capacity(lower.len());
    for c in lower.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
            mapped.push(c);
        } else {
            mapped.push('_');
        }
    }

    let compressed = compress_digit_runs(&mapped);

    // Collapse repeated underscores and trim the edges
    let underscore_re = Regex::new(r"_+").unwrap();
    let collapsed = underscore_re.replace_all(&compressed, "_");
    collapsed.trim_matches('_').to_string()
}

/// Replace every run of 4+ digits with `k` notation
///
/// The value is divided by 1000 and rounded to one decimal, with the decimal
/// point spelled `k`: `1005` -> `1k0`, `1500` -> `1k5`. Runs too large for
/// u64 are left untouched.
fn compress_digit_runs(s: &str) -> String {
    let digits_re = Regex::new(r"\d{4,}").unwrap();
    digits_re
        .replace_all(s, |caps: &regex::Captures| {
            match caps[0].parse::<u64>() {
                Ok(n) => format!("{:.1}", n as f64 / 1000.0).replace('.', "k"),
                Err(_) => caps[0].to_string(),
            }
        })
        .into_owned()
}
