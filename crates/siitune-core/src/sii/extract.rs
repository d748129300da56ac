//! Pattern-anchored field extraction
//!
//! Pulls a typed field set out of raw `.sii` text without tokenizing it.
//! Scalar keys are matched line-anchored with first-occurrence-wins
//! semantics; repeated keys are collected by a global scan in source order.
//! Every field is independently optional, so a partially valid document
//! still yields a usable result.

use regex::Regex;
use tracing::debug;

use super::{
    ConfigBlockKind, CurvePoint, EngineData, ExtractError, FieldSet, GearEntry, RpmRange,
    TransmissionData,
};

/// Extract the field set for `kind` from raw document text
///
/// Fails only when the block keyword for `kind` is absent; individual
/// missing or malformed fields are simply left unset.
pub fn extract(text: &str, kind: ConfigBlockKind) -> Result<FieldSet, ExtractError> {
    match kind {
        ConfigBlockKind::Engine => extract_engine(text).map(FieldSet::Engine),
        ConfigBlockKind::Transmission => extract_transmission(text).map(FieldSet::Transmission),
    }
}

/// Extract engine fields from raw document text
pub fn extract_engine(text: &str) -> Result<EngineData, ExtractError> {
    let kind = ConfigBlockKind::Engine;
    if !text.contains(kind.keyword()) {
        return Err(ExtractError::BlockNotFound {
            keyword: kind.keyword(),
        });
    }

    let mut data = EngineData {
        id: find_identifier(text, kind),
        name: find_quoted(text, "name"),
        price: find_uint(text, "price"),
        unlock_level: find_uint(text, "unlock"),
        torque_nm: find_uint(text, "torque"),
        rpm_idle: find_uint(text, "rpm_idle"),
        rpm_limit: find_uint(text, "rpm_limit"),
        rpm_limit_neutral: find_uint(text, "rpm_limit_neutral"),
        engine_brake: find_float(text, "engine_brake"),
        engine_brake_downshift: find_uint(text, "engine_brake_downshift").map(|v| v != 0),
        engine_brake_positions: find_uint(text, "engine_brake_positions"),
        rpm_range_low_gear: find_range(text, "rpm_range_low_gear"),
        rpm_range_high_gear: find_range(text, "rpm_range_high_gear"),
        rpm_range_power: find_range(text, "rpm_range_power"),
        rpm_range_engine_brake: find_range(text, "rpm_range_engine_brake"),
        ..EngineData::default()
    };

    // The advertised power and RPM band live in free-text info[] lines with
    // embedded localization tokens, not in key/value fields.
    let hp_re = Regex::new(r#"info\[\][^\r\n]*?"(\d+)\s*@@hp@@"#).unwrap();
    data.target_hp = hp_re
        .captures(text)
        .and_then(|c| c[1].parse().ok());

    let rpm_re = Regex::new(r#"info\[\][^\r\n]*?"\d*-?(\d+)\s*@@rpm@@"#).unwrap();
    data.target_rpm = rpm_re
        .captures(text)
        .and_then(|c| c[1].parse().ok());

    let curve_re = Regex::new(r"torque_curve\[\]\s*:\s*\(\s*(\d+)\s*,\s*([0-9.]+)\s*\)").unwrap();
    for caps in curve_re.captures_iter(text) {
        if let (Ok(rpm), Ok(ratio)) = (caps[1].parse(), caps[2].parse()) {
            data.curve_points.push(CurvePoint::new(rpm, ratio));
        }
    }

    // Sound and asset links: quoted defaults[] values first, then raw
    // @include directives, each group in source order.
    let defaults_re = Regex::new(r#"(?m)^\s*defaults\[\]\s*:\s*"([^"]+)""#).unwrap();
    for caps in defaults_re.captures_iter(text) {
        data.defaults.push(caps[1].to_string());
    }
    let include_re = Regex::new(r#"(?m)^\s*@include\s+"([^"]+)""#).unwrap();
    for caps in include_re.captures_iter(text) {
        data.defaults.push(format!("@include \"{}\"", &caps[1]));
    }

    debug!(
        curve_points = data.curve_points.len(),
        sound_links = data.defaults.len(),
        "extracted engine block"
    );
    Ok(data)
}

/// Extract transmission fields from raw document text
pub fn extract_transmission(text: &str) -> Result<TransmissionData, ExtractError> {
    let kind = ConfigBlockKind::Transmission;
    if !text.contains(kind.keyword()) {
        return Err(ExtractError::BlockNotFound {
            keyword: kind.keyword(),
        });
    }

    let mut data = TransmissionData {
        id: find_identifier(text, kind),
        name: find_quoted(text, "name"),
        price: find_uint(text, "price"),
        unlock_level: find_uint(text, "unlock"),
        diff_ratio: find_float(text, "differential_ratio"),
        retarder: find_uint(text, "retarder"),
        ..TransmissionData::default()
    };

    // Gear labels are synthesized per sign partition; labels present in the
    // source file are not preserved.
    let rev_re = Regex::new(r"ratios_reverse\[\d+\]\s*:\s*(-?[0-9.]+)").unwrap();
    for (i, caps) in rev_re.captures_iter(text).enumerate() {
        if let Ok(ratio) = caps[1].parse() {
            data.gears.push(GearEntry::new(format!("R{}", i + 1), ratio));
        }
    }
    let fwd_re = Regex::new(r"ratios_forward\[\d+\]\s*:\s*([0-9.]+)").unwrap();
    for (i, caps) in fwd_re.captures_iter(text).enumerate() {
        if let Ok(ratio) = caps[1].parse() {
            data.gears.push(GearEntry::new(format!("{}", i + 1), ratio));
        }
    }

    debug!(gears = data.gears.len(), "extracted transmission block");
    Ok(data)
}

/// Identifier on the block's opening line: `<keyword> : <id>`
fn find_identifier(text: &str, kind: ConfigBlockKind) -> Option<String> {
    let re = Regex::new(&format!(r"{}\s*:\s*([^\s{{]+)", kind.keyword())).unwrap();
    re.captures(text).map(|c| c[1].trim().to_string())
}

/// First line-anchored `key: <integer>`; parse failures count as absent
fn find_uint(text: &str, key: &str) -> Option<u32> {
    let re = Regex::new(&format!(r"(?m)^\s*{key}\s*:\s*(\d+)")).unwrap();
    re.captures(text).and_then(|c| c[1].parse().ok())
}

/// First line-anchored `key: <float>`; parse failures count as absent
fn find_float(text: &str, key: &str) -> Option<f64> {
    let re = Regex::new(&format!(r"(?m)^\s*{key}\s*:\s*(-?[0-9.]+)")).unwrap();
    re.captures(text).and_then(|c| c[1].parse().ok())
}

/// First line-anchored `key: "<string>"`
fn find_quoted(text: &str, key: &str) -> Option<String> {
    let re = Regex::new(&format!(r#"(?m)^\s*{key}\s*:\s*"([^"]+)""#)).unwrap();
    re.captures(text).map(|c| c[1].to_string())
}

/// First line-anchored `key: (<min>, <max>)`
fn find_range(text: &str, key: &str) -> Option<RpmRange> {
    let re = Regex::new(&format!(
        r"(?m)^\s*{key}\s*:\s*\(\s*(\d+)\s*,\s*(\d+)\s*\)"
    ))
    .unwrap();
    let caps = re.captures(text)?;
    match (caps[1].parse(), caps[2].parse()) {
        (Ok(min), Ok(max)) => Some(RpmRange::new(min, max)),
        _ => None,
    }
}
