//! Round-trip document patching
//!
//! Rewrites only the fields that need to change inside an existing document,
//! leaving comments, indentation, line endings and unknown keys byte-for-byte
//! intact. No step here can fail: a missed pattern degrades to "field left
//! unchanged" so a partial file still exports something usable.

use regex::Regex;
use tracing::debug;

use super::block::locate_block;
use super::generate::tuned_display_name;
use super::{derive_identifier, ConfigBlockKind, Document, EngineData, FieldSet, TransmissionData};
use crate::unit_conversion::{hp_to_kw, nm_to_ft_lb};

/// Patch an existing document with the values from a field set
///
/// Locates the block for the field set's kind, rewrites present fields in
/// place, and returns the new text. When the block keyword is absent the
/// original text is returned unchanged so callers can fall back to
/// cold-start generation.
pub fn patch(doc: &Document, fields: &FieldSet) -> String {
    let text = doc.text();
    let nl = doc.line_ending().as_str();
    let kind = fields.kind();

    let Some(span) = locate_block(text, kind) else {
        debug!(
            keyword = kind.keyword(),
            "block not found, returning document unchanged"
        );
        return text.to_string();
    };

    let mut block = text[span.start..span.end].to_string();
    match fields {
        FieldSet::Engine(data) => patch_engine_block(&mut block, nl, data),
        FieldSet::Transmission(data) => patch_transmission_block(&mut block, nl, data),
    }

    let mut out = String::with_capacity(text.len() + 256);
    out.push_str(&text[..span.start]);
    out.push_str(&block);
    out.push_str(&text[span.end..]);
    collapse_blank_lines(&out, nl)
}

fn patch_engine_block(block: &mut String, nl: &str, data: &EngineData) {
    if let Some(name) = &data.name {
        set_scalar(block, nl, "name", &format!("\"{}\"", tuned_display_name(name)));
    }
    if let Some(v) = data.price {
        set_scalar(block, nl, "price", &v.to_string());
    }
    if let Some(v) = data.unlock_level {
        set_scalar(block, nl, "unlock", &v.to_string());
    }
    if let Some(v) = data.torque_nm {
        set_scalar(block, nl, "torque", &v.to_string());
    }
    if let Some(v) = data.rpm_idle {
        set_scalar(block, nl, "rpm_idle", &v.to_string());
    }
    if let Some(v) = data.rpm_limit {
        set_scalar(block, nl, "rpm_limit", &v.to_string());
    }
    if let Some(v) = data.rpm_limit_neutral {
        set_scalar(block, nl, "rpm_limit_neutral", &v.to_string());
    }
    if let Some(v) = data.engine_brake {
        set_scalar(block, nl, "engine_brake", &format!("{v:.1}"));
    }
    if let Some(v) = data.engine_brake_downshift {
        set_scalar(block, nl, "engine_brake_downshift", if v { "1" } else { "0" });
    }
    if let Some(v) = data.engine_brake_positions {
        set_scalar(block, nl, "engine_brake_positions", &v.to_string());
    }

    if let Some(r) = data.rpm_range_low_gear {
        set_range(block, nl, "rpm_range_low_gear", r.min, r.max);
    }
    if let Some(r) = data.rpm_range_high_gear {
        set_range(block, nl, "rpm_range_high_gear", r.min, r.max);
    }
    if let Some(r) = data.rpm_range_power {
        set_range(block, nl, "rpm_range_power", r.min, r.max);
    }
    if let Some(r) = data.rpm_range_engine_brake {
        set_range(block, nl, "rpm_range_engine_brake", r.min, r.max);
    }

    rewrite_identifier(
        block,
        ConfigBlockKind::Engine,
        data.name.as_deref(),
        data.truck.as_deref(),
        data.id.as_deref(),
    );
    rewrite_info_lines(block, nl, data);

    if !data.curve_points.is_empty() {
        let mut points = data.curve_points.clone();
        points.sort_by_key(|p| p.rpm);
        let line_re = Regex::new(
            r"(?m)^[ \t]*torque_curve\[\]\s*:\s*\([^)\r\n]*\)[ \t]*(?:#[^\r\n]*)?\r?\n?",
        )
        .unwrap();
        splice_array(block, nl, &line_re, |indent| {
            points
                .iter()
                .map(|p| format!("{indent}torque_curve[]: ({}, {})", p.rpm, p.ratio))
                .collect()
        });
    }
}

fn patch_transmission_block(block: &mut String, nl: &str, data: &TransmissionData) {
    if let Some(name) = &data.name {
        set_scalar(block, nl, "name", &format!("\"{name}\""));
    }
    if let Some(v) = data.price {
        set_scalar(block, nl, "price", &v.to_string());
    }
    if let Some(v) = data.unlock_level {
        set_scalar(block, nl, "unlock", &v.to_string());
    }
    if let Some(v) = data.diff_ratio {
        set_scalar(block, nl, "differential_ratio", &format!("{v:.2}"));
    }
    if let Some(v) = data.retarder {
        set_scalar(block, nl, "retarder", &v.to_string());
    }

    rewrite_identifier(
        block,
        ConfigBlockKind::Transmission,
        data.name.as_deref(),
        data.truck.as_deref(),
        data.id.as_deref(),
    );

    if !data.gears.is_empty() {
        let reverse = data.reverse_gears();
        let rev_re =
            Regex::new(r"(?m)^[ \t]*ratios_reverse\[\d+\]\s*:[^\r\n]*\r?\n?").unwrap();
        splice_array(block, nl, &rev_re, |indent| {
            reverse
                .iter()
                .enumerate()
                .map(|(i, g)| format!("{indent}ratios_reverse[{i}]: {:.2}", g.ratio))
                .collect()
        });

        let forward = data.forward_gears();
        let fwd_re =
            Regex::new(r"(?m)^[ \t]*ratios_forward\[\d+\]\s*:[^\r\n]*\r?\n?").unwrap();
        splice_array(block, nl, &fwd_re, |indent| {
            forward
                .iter()
                .enumerate()
                .map(|(i, g)| format!("{indent}ratios_forward[{i}]: {:.2}", g.ratio))
                .collect()
        });
    }
}

/// Replace the value of a `key: value` line, or append the key when absent
///
/// Only the value portion is substituted; the line's indentation, the
/// original spacing around the colon and any trailing inline comment stay
/// verbatim. Duplicate keys follow first-occurrence-wins: later duplicates
/// are left untouched.
fn set_scalar(block: &mut String, nl: &str, key: &str, value: &str) {
    let re = Regex::new(&format!(
        r#"(?m)^([ \t]*{key}[ \t]*:[ \t]*)("[^"]*"|[^\s#]+)"#
    ))
    .unwrap();
    if let Some(caps) = re.captures(block) {
        let range = caps.get(2).unwrap().range();
        block.replace_range(range, value);
    } else {
        append_before_close(block, nl, &format!("{key}: {value}"));
    }
}

/// Replace a parenthesized `(min, max)` tuple value, or append the key
fn set_range(block: &mut String, nl: &str, key: &str, min: u32, max: u32) {
    let re = Regex::new(&format!(
        r"(?m)^([ \t]*{key}[ \t]*:[ \t]*)(\([^)\r\n]*\))"
    ))
    .unwrap();
    let value = format!("({min}, {max})");
    if let Some(caps) = re.captures(block) {
        let range = caps.get(2).unwrap().range();
        block.replace_range(range, &value);
    } else {
        append_before_close(block, nl, &format!("{key}: {value}"));
    }
}

/// Rewrite the identifier after the block keyword
///
/// A known prior identifier in the field set is preserved verbatim.
/// Otherwise the identifier is re-derived from the display name, keeping the
/// existing identifier's dot-suffix unless a truck context overrides it.
/// With neither an identifier nor a name in the field set the line is left
/// alone.
fn rewrite_identifier(
    block: &mut String,
    kind: ConfigBlockKind,
    name: Option<&str>,
    truck: Option<&str>,
    known_id: Option<&str>,
) {
    let re = Regex::new(&format!(r"({}[ \t]*:[ \t]*)([^\s{{]+)", kind.keyword())).unwrap();
    let Some(caps) = re.captures(block) else {
        return;
    };
    let existing = caps[2].to_string();
    let value_range = caps.get(2).unwrap().range();

    let new_id = match (known_id, name) {
        (Some(id), _) => id.to_string(),
        (None, Some(name)) => derive_identifier(name, truck, Some(&existing), kind, false),
        (None, None) => return,
    };
    block.replace_range(value_range, &new_id);
}

/// Remove all `info[]` lines and re-insert freshly rendered ones
///
/// Insertion goes immediately after the `icon:` line when present, else
/// after the `name:` line, else the lines are appended before the closing
/// brace. Skipped entirely when the field set lacks the power and torque
/// figures needed to render the lines.
fn rewrite_info_lines(block: &mut String, nl: &str, data: &EngineData) {
    let (Some(hp), Some(nm)) = (data.target_hp, data.torque_nm) else {
        return;
    };

    let remove_re = Regex::new(r"(?m)^[ \t]*info\[\][^\r\n]*\r?\n?").unwrap();
    *block = remove_re.replace_all(block, "").into_owned();

    let kw = hp_to_kw(hp as f64).round() as i64;
    let lb_ft = nm_to_ft_lb(nm as f64).round() as i64;
    let (band_min, band_max) = match data.rpm_range_power {
        Some(r) => (r.min, r.max),
        None => (1200, 1600),
    };

    let anchor_re = Regex::new(r"(?m)^([ \t]*)icon[ \t]*:[^\r\n]*").unwrap();
    let fallback_re = Regex::new(r"(?m)^([ \t]*)name[ \t]*:[^\r\n]*").unwrap();
    let anchor = anchor_re.captures(block).or_else(|| fallback_re.captures(block));

    match anchor {
        Some(caps) => {
            let indent = caps[1].to_string();
            let line_end = caps.get(0).unwrap().end();
            let lines = [
                format!("{indent}info[]: \"{hp} @@hp@@ ({kw} @@kw@@)\""),
                format!("{indent}info[]: \"{lb_ft} @@lb_ft@@ ({nm} @@nm@@)\""),
                format!("{indent}info[]: \"{band_min}-{band_max} @@rpm@@\""),
            ];
            block.insert_str(line_end, &format!("{nl}{}", lines.join(nl)));
        }
        None => {
            append_before_close(block, nl, &format!("info[]: \"{hp} @@hp@@ ({kw} @@kw@@)\""));
            append_before_close(
                block,
                nl,
                &format!("info[]: \"{lb_ft} @@lb_ft@@ ({nm} @@nm@@)\""),
            );
            append_before_close(block, nl, &format!("info[]: \"{band_min}-{band_max} @@rpm@@\""));
        }
    }
}

/// Replace the run of lines matching a repeated-array key
///
/// The indentation of the first existing line wins (tab when the array is
/// absent). All matching lines are removed, including occurrences separated
/// from the first run by unrelated lines, and the freshly rendered block is
/// spliced in at the position of the first removed line. With no existing
/// lines the block is appended before the closing brace.
fn splice_array<F>(block: &mut String, nl: &str, line_re: &Regex, make_lines: F)
where
    F: Fn(&str) -> Vec<String>,
{
    let matches: Vec<(usize, usize)> = line_re
        .find_iter(block)
        .map(|m| (m.start(), m.end()))
        .collect();

    let indent = match matches.first() {
        Some(&(start, _)) => block[start..]
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .collect::<String>(),
        None => sample_indent(block),
    };

    let lines = make_lines(&indent);
    if lines.is_empty() && matches.is_empty() {
        return;
    }
    let mut rendered = String::new();
    for line in &lines {
        rendered.push_str(line);
        rendered.push_str(nl);
    }

    match matches.first() {
        Some(&(first_start, _)) => {
            for &(start, end) in matches.iter().rev() {
                block.replace_range(start..end, "");
            }
            block.insert_str(first_start, &rendered);
        }
        None => {
            if let Some(brace) = block.rfind('}') {
                let line_start = block[..brace].rfind('\n').map(|i| i + 1).unwrap_or(0);
                block.insert_str(line_start, &rendered);
            }
        }
    }
}

/// Append a `key: value` line just before the block's closing brace
fn append_before_close(block: &mut String, nl: &str, line: &str) {
    let indent = sample_indent(block);
    if let Some(brace) = block.rfind('}') {
        let line_start = block[..brace].rfind('\n').map(|i| i + 1).unwrap_or(0);
        block.insert_str(line_start, &format!("{indent}{line}{nl}"));
    }
}

/// Indentation of the first indented line in the block, tab as fallback
fn sample_indent(block: &str) -> String {
    let re = Regex::new(r"(?m)^([ \t]+)\S").unwrap();
    re.captures(block)
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| "\t".to_string())
}

/// Collapse every run of 3+ line breaks down to a single blank line
///
/// Cosmetic cleanup applied once after reassembly; indentation of the
/// following non-blank line is left alone.
fn collapse_blank_lines(text: &str, nl: &str) -> String {
    let re = Regex::new(r"(?:\r?\n[ \t]*){2,}\r?\n").unwrap();
    re.replace_all(text, format!("{nl}{nl}").as_str())
        .into_owned()
}
