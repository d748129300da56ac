//! Factory presets
//!
//! Real-world heavy-duty engine presets and the engine sound library the
//! editor offers. Torque figures are stored in newton-meters like the rest
//! of the core.

use crate::sii::{EngineData, GearEntry, RpmRange};

/// A named engine preset
#[derive(Debug, Clone)]
pub struct EnginePreset {
    /// Stable preset key
    pub id: &'static str,
    /// Field set loaded when the preset is selected
    pub data: EngineData,
}

/// An entry of the engine sound library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundProfile {
    /// Stable sound key
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// Sound unit file referenced via `@include`
    pub file_name: &'static str,
}

#[allow(clippy::too_many_arguments)]
fn preset(
    id: &'static str,
    name: &str,
    target_hp: u32,
    target_rpm: u32,
    torque_nm: u32,
    price: u32,
    unlock_level: u32,
    sound: &str,
    rpm_idle: u32,
    rpm_limit: u32,
    low_gear: (u32, u32),
    high_gear: (u32, u32),
    power: (u32, u32),
) -> EnginePreset {
    EnginePreset {
        id,
        data: EngineData {
            name: Some(name.to_string()),
            target_hp: Some(target_hp),
            target_rpm: Some(target_rpm),
            torque_nm: Some(torque_nm),
            price: Some(price),
            unlock_level: Some(unlock_level),
            rpm_idle: Some(rpm_idle),
            rpm_limit: Some(rpm_limit),
            rpm_limit_neutral: Some(rpm_limit),
            engine_brake: Some(2.0),
            engine_brake_downshift: Some(false),
            engine_brake_positions: Some(3),
            rpm_range_low_gear: Some(RpmRange::from(low_gear)),
            rpm_range_high_gear: Some(RpmRange::from(high_gear)),
            rpm_range_power: Some(RpmRange::from(power)),
            rpm_range_engine_brake: Some(RpmRange::new(1500, 2500)),
            defaults: vec![format!("@include \"{sound}\"")],
            ..EngineData::default()
        },
    }
}

/// All factory engine presets
pub fn engine_presets() -> Vec<EnginePreset> {
    vec![
        preset(
            "cat_c15_600",
            "CAT C15 600",
            600,
            1800,
            2779, // 2050 lb-ft
            25_000,
            10,
            "sound_cat_c15.sui",
            600,
            2100,
            (900, 1500),
            (1100, 1500),
            (1200, 1900),
        ),
        preset(
            "cummins_isx15_600",
            "Cummins ISX15 600",
            600,
            1800,
            2779, // 2050 lb-ft
            24_000,
            10,
            "sound_isx15.sui",
            600,
            2100,
            (900, 1500),
            (1100, 1500),
            (1200, 1900),
        ),
        preset(
            "cummins_n14_525",
            "Cummins N14 525",
            525,
            1600,
            2508, // 1850 lb-ft
            23_000,
            8,
            "sound_n14.sui",
            650,
            2100,
            (1000, 1600),
            (1100, 1600),
            (1300, 1900),
        ),
        preset(
            "detroit_dd60_515",
            "Detroit DD60 515",
            515,
            1800,
            2237, // 1650 lb-ft
            21_000,
            6,
            "sound_dd60.sui",
            600,
            2100,
            (900, 1500),
            (1100, 1500),
            (1200, 1900),
        ),
        preset(
            "mack_mp8_505",
            "Mack MP8 505",
            505,
            1500,
            2522, // 1860 lb-ft
            19_000,
            5,
            "sound_mp8d.sui",
            600,
            2100,
            (900, 1500),
            (1000, 1400),
            (1100, 1800),
        ),
        preset(
            "paccar_mx13_510",
            "Paccar MX-13 510",
            510,
            1700,
            2508, // 1850 lb-ft
            18_000,
            4,
            "sound_mx13.sui",
            600,
            2200,
            (900, 1500),
            (1100, 1500),
            (1200, 1900),
        ),
    ]
}

/// Default 10-speed gear set (Eaton-Fuller pattern)
pub fn default_gears() -> Vec<GearEntry> {
    vec![
        GearEntry::new("Rev", -14.56),
        GearEntry::new("1", 12.57),
        GearEntry::new("2", 9.71),
        GearEntry::new("3", 7.37),
        GearEntry::new("4", 5.66),
        GearEntry::new("5", 4.49),
        GearEntry::new("6", 3.43),
        GearEntry::new("7", 2.61),
        GearEntry::new("8", 1.99),
        GearEntry::new("9", 1.48),
        GearEntry::new("10", 1.00),
    ]
}

/// The engine sound library
pub fn sound_library() -> Vec<SoundProfile> {
    vec![
        SoundProfile { id: "cat_c15", name: "CAT C15 (Straight Pipe)", file_name: "sound_cat_c15.sui" },
        SoundProfile { id: "cat_c15_s", name: "CAT C15 (Stock)", file_name: "sound_cat_c15s.sui" },
        SoundProfile { id: "cat_3406e", name: "CAT 3406E", file_name: "sound_cat_3406e.sui" },
        SoundProfile { id: "cat_3408", name: "CAT 3408 (V8)", file_name: "sound_cat_3408.sui" },
        SoundProfile { id: "cummins_isx15", name: "Cummins ISX15", file_name: "sound_isx15.sui" },
        SoundProfile { id: "cummins_n14", name: "Cummins N14", file_name: "sound_n14.sui" },
        SoundProfile { id: "cummins_m11", name: "Cummins M11", file_name: "sound_cum_m11.sui" },
        SoundProfile { id: "cummins_444", name: "Cummins 444", file_name: "sound_cum_444.sui" },
        SoundProfile { id: "detroit_dd60", name: "Detroit DD60", file_name: "sound_dd60.sui" },
        SoundProfile { id: "detroit_8v92", name: "Detroit 8V92", file_name: "sound_dd_92.sui" },
        SoundProfile { id: "mack_mp8", name: "Mack MP8", file_name: "sound_mp8d.sui" },
        SoundProfile { id: "mack_e7", name: "Mack E7", file_name: "sound_e7.sui" },
        SoundProfile { id: "paccar_mx13", name: "Paccar MX-13", file_name: "sound_mx13.sui" },
        SoundProfile { id: "volvo_d13", name: "Volvo D13 (Green)", file_name: "sound_d13.sui" },
        SoundProfile { id: "scania_v8", name: "Scania V8 (Open Pipe)", file_name: "sound_v8_op.sui" },
    ]
}
