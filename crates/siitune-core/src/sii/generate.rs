//! Cold-start document generation
//!
//! Builds a complete `SiiNunit` document from a typed field set when there
//! is no prior text to preserve. Output always uses `\n` line endings and
//! tab indentation; fields are emitted in a fixed canonical order.

use super::{derive_identifier, ConfigBlockKind, EngineData, FieldSet, TransmissionData};
use crate::unit_conversion::{hp_to_kw, nm_to_ft_lb};

/// Generate a complete document for the given field set
pub fn generate(fields: &FieldSet) -> String {
    match fields {
        FieldSet::Engine(data) => generate_engine(data),
        FieldSet::Transmission(data) => generate_transmission(data),
    }
}

/// Display name emitted into generated and patched engine blocks
///
/// An already-present trailing "tuned" is stripped first so repeated edits
/// never stack the suffix.
pub(crate) fn tuned_display_name(name: &str) -> String {
    let clean = strip_tuned(name);
    format!("{} Tuned", clean.to_uppercase())
}

/// Strip a trailing case-insensitive "tuned" suffix from a display name
pub(crate) fn strip_tuned(name: &str) -> &str {
    let trimmed = name.trim_end();
    if trimmed.len() >= 5 && trimmed[trimmed.len() - 5..].eq_ignore_ascii_case("tuned") {
        trimmed[..trimmed.len() - 5].trim_end()
    } else {
        trimmed
    }
}

fn generate_engine(data: &EngineData) -> String {
    let name = data.name.as_deref().unwrap_or("C15 600");
    let price = data.price.unwrap_or(25_000);
    let unlock = data.unlock_level.unwrap_or(10);
    let hp = data.target_hp.unwrap_or(600);
    let nm = data.torque_nm.unwrap_or(2050);
    let rpm_idle = data.rpm_idle.unwrap_or(600);
    let rpm_limit = data.rpm_limit.unwrap_or(2400);
    let rpm_limit_neutral = data.rpm_limit_neutral.unwrap_or(rpm_limit);
    let brake = data.engine_brake.unwrap_or(2.0);
    let brake_downshift = data.engine_brake_downshift.unwrap_or(false);
    let brake_positions = data.engine_brake_positions.unwrap_or(3);
    let low_gear = data.rpm_range_low_gear.unwrap_or_else(|| (900, 1500).into());
    let high_gear = data
        .rpm_range_high_gear
        .unwrap_or_else(|| (1100, 1500).into());
    let brake_range = data
        .rpm_range_engine_brake
        .unwrap_or_else(|| (1500, 2500).into());

    let kw = hp_to_kw(hp as f64).round() as i64;
    let lb_ft = nm_to_ft_lb(nm as f64).round() as i64;
    let (band_min, band_max) = match data.rpm_range_power {
        Some(r) => (r.min, r.max),
        None => (1200, 1600),
    };

    let id = derive_identifier(
        name,
        data.truck.as_deref(),
        None,
        ConfigBlockKind::Engine,
        false,
    );

    let mut out = String::new();
    out.push_str("SiiNunit\n{\n");
    out.push_str(&format!("accessory_engine_data : {id}\n{{\n"));
    out.push_str(&format!("\tname: \"{}\"\n", tuned_display_name(name)));
    out.push_str(&format!("\tprice: {price}\n"));
    out.push_str(&format!("\tunlock: {unlock}\n"));
    out.push_str(&format!(
        "\ticon: \"{}\"\n",
        ConfigBlockKind::Engine.default_icon()
    ));
    out.push_str(&format!("\tinfo[]: \"{hp} @@hp@@ ({kw} @@kw@@)\"\n"));
    out.push_str(&format!("\tinfo[]: \"{lb_ft} @@lb_ft@@ ({nm} @@nm@@)\"\n"));
    out.push_str(&format!("\tinfo[]: \"{band_min}-{band_max} @@rpm@@\"\n\n"));

    out.push_str("\t# Engine Specs\n");
    out.push_str(&format!("\ttorque: {nm}\n"));
    out.push_str("\tvolume: 15.2\n\n");

    out.push_str("\t# RPM Data\n");
    out.push_str(&format!("\trpm_idle: {rpm_idle}\n"));
    out.push_str(&format!("\trpm_limit: {rpm_limit}\n"));
    out.push_str(&format!("\trpm_limit_neutral: {rpm_limit_neutral}\n"));
    out.push_str(&format!(
        "\trpm_range_low_gear: ({}, {})\n",
        low_gear.min, low_gear.max
    ));
    out.push_str(&format!(
        "\trpm_range_high_gear: ({}, {})\n",
        high_gear.min, high_gear.max
    ));
    if let Some(power) = data.rpm_range_power {
        out.push_str(&format!(
            "\trpm_range_power: ({}, {})\n",
            power.min, power.max
        ));
    }
    out.push_str(&format!(
        "\trpm_range_engine_brake: ({}, {})\n\n",
        brake_range.min, brake_range.max
    ));

    out.push_str("\t# Torque Curves\n");
    let mut points = if data.curve_points.len() >= 2 {
        data.curve_points.clone()
    } else {
        crate::curve::default_curve()
    };
    points.sort_by_key(|p| p.rpm);
    for point in &points {
        out.push_str(&format!(
            "\ttorque_curve[]: ({}, {})\n",
            point.rpm, point.ratio
        ));
    }

    out.push_str("\n\t# Engine Brake data\n");
    out.push_str(&format!("\tengine_brake: {brake:.1}\n"));
    out.push_str(&format!(
        "\tengine_brake_downshift: {}\n",
        if brake_downshift { 1 } else { 0 }
    ));
    out.push_str(&format!("\tengine_brake_positions: {brake_positions}\n"));

    if !data.defaults.is_empty() {
        out.push_str("\n\t# Sound & Assets\n");
        for link in &data.defaults {
            if link.trim_start().starts_with('@') {
                out.push_str(&format!("\t{link}\n"));
            } else {
                out.push_str(&format!("\tdefaults[]: \"{link}\"\n"));
            }
        }
    }

    out.push_str("}\n}");
    out
}

fn generate_transmission(data: &TransmissionData) -> String {
    let name = data.name.as_deref().unwrap_or("eat_10_speed");
    let price = data.price.unwrap_or(12_000);
    let unlock = data.unlock_level.unwrap_or(0);
    let diff_ratio = data.diff_ratio.unwrap_or(3.55);
    let retarder = data.retarder.unwrap_or(0);

    let id = derive_identifier(
        name,
        data.truck.as_deref(),
        None,
        ConfigBlockKind::Transmission,
        false,
    );

    let mut out = String::new();
    out.push_str("SiiNunit\n{\n");
    out.push_str(&format!("accessory_transmission_data : {id}\n{{\n"));
    out.push_str(&format!("\tname: \"{name}\"\n"));
    out.push_str(&format!("\tprice: {price}\n"));
    out.push_str(&format!("\tunlock: {unlock}\n"));
    out.push_str(&format!(
        "\ticon: \"{}\"\n\n",
        ConfigBlockKind::Transmission.default_icon()
    ));
    out.push_str(&format!("\tdifferential_ratio: {diff_ratio:.2}\n"));
    if retarder > 0 {
        out.push_str(&format!("\tretarder: {retarder}\n"));
    }
    out.push('\n');

    for (i, gear) in data.reverse_gears().iter().enumerate() {
        out.push_str(&format!("\tratios_reverse[{i}]: {:.2}\n", gear.ratio));
    }
    out.push('\n');
    for (i, gear) in data.forward_gears().iter().enumerate() {
        out.push_str(&format!("\tratios_forward[{i}]: {:.2}\n", gear.ratio));
    }

    out.push_str("}\n}");
    out
}
