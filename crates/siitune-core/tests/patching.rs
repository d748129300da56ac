//! Tests for round-trip patching: only intentionally changed fields may
//! differ from the original bytes.

use pretty_assertions::assert_eq;
use siitune_core::sii::{
    patch, CurvePoint, Document, EngineData, FieldSet, GearEntry, RpmRange, TransmissionData,
};

const ENGINE_SII: &str = r#"SiiNunit
{
accessory_engine_data : 2ws_700.zcustom_01.engine
{
	name: "Old 700"
	price: 9900	# base price
	unlock: 3
	icon: "engine_01"
	info[]: "700 @@hp@@ (522 @@kw@@)"
	info[]: "1512 @@lb_ft@@ (2050 @@nm@@)"
	info[]: "1200-1600 @@rpm@@"

	# tuned by hand, do not touch
	torque: 2050
	custom_flag: 7
	rpm_idle: 600
	rpm_limit: 2200
	rpm_limit_neutral: 2200
	rpm_range_low_gear: (900, 1500)
	rpm_range_high_gear: (1100, 1500)
	rpm_range_power: (1200, 1600)
	rpm_range_engine_brake: (1500, 2500)

	torque_curve[]: (300, 0)
	torque_curve[]: (1000, 1)
	torque_curve[]: (2200, 0.5)

	engine_brake: 2.0
	engine_brake_downshift: 0
	engine_brake_positions: 3

	@include "sound_cat_c15.sui"
}
}
"#;

fn torque_and_curve_fields() -> FieldSet {
    FieldSet::Engine(EngineData {
        torque_nm: Some(2779),
        curve_points: vec![
            CurvePoint::new(2200, 0.5),
            CurvePoint::new(300, 0.0),
            CurvePoint::new(1000, 1.0),
            CurvePoint::new(1500, 0.85),
        ],
        ..EngineData::default()
    })
}

#[test]
fn test_patch_updates_torque_and_curve_only() {
    let doc = Document::new(ENGINE_SII);
    let out = patch(&doc, &torque_and_curve_fields());

    assert!(out.contains("\ttorque: 2779\n"));
    assert_eq!(out.matches("torque_curve[]").count(), 4);

    // Curve comes back sorted ascending by rpm
    let expected_run = "\ttorque_curve[]: (300, 0)\n\
                        \ttorque_curve[]: (1000, 1)\n\
                        \ttorque_curve[]: (1500, 0.85)\n\
                        \ttorque_curve[]: (2200, 0.5)\n";
    assert!(out.contains(expected_run));
}

#[test]
fn test_patch_preserves_unrelated_content() {
    let doc = Document::new(ENGINE_SII);
    let out = patch(&doc, &torque_and_curve_fields());

    // Comment line, unknown key and the inline comment survive verbatim
    assert!(out.contains("\t# tuned by hand, do not touch\n"));
    assert!(out.contains("\tcustom_flag: 7\n"));
    assert!(out.contains("\tprice: 9900\t# base price\n"));
    assert!(out.contains("\t@include \"sound_cat_c15.sui\"\n"));
}

#[test]
fn test_patch_is_idempotent() {
    let fields = FieldSet::Engine(EngineData {
        name: Some("Old 700".to_string()),
        price: Some(15_000),
        unlock_level: Some(8),
        target_hp: Some(700),
        torque_nm: Some(2779),
        rpm_idle: Some(650),
        rpm_limit: Some(2100),
        rpm_limit_neutral: Some(2100),
        engine_brake: Some(3.0),
        engine_brake_downshift: Some(true),
        engine_brake_positions: Some(5),
        rpm_range_low_gear: Some(RpmRange::new(900, 1400)),
        rpm_range_high_gear: Some(RpmRange::new(1100, 1400)),
        rpm_range_power: Some(RpmRange::new(1200, 1900)),
        rpm_range_engine_brake: Some(RpmRange::new(1500, 2400)),
        curve_points: vec![
            CurvePoint::new(300, 0.0),
            CurvePoint::new(1000, 1.0),
            CurvePoint::new(2100, 0.4),
        ],
        ..EngineData::default()
    });

    let doc = Document::new(ENGINE_SII);
    let once = patch(&doc, &fields);
    let twice = patch(&Document::new(once.clone()), &fields);
    assert_eq!(once, twice);
}

#[test]
fn test_patch_missing_block_is_noop() {
    let text = "SiiNunit\n{\n# nothing here\n}\n";
    let doc = Document::new(text);
    let out = patch(&doc, &torque_and_curve_fields());
    assert_eq!(out, text);
}

#[test]
fn test_patch_appends_absent_key_before_closing_brace() {
    let text = "SiiNunit\n{\naccessory_engine_data : a.engine\n{\n\ttorque: 2000\n}\n}\n";
    let doc = Document::new(text);
    let fields = FieldSet::Engine(EngineData {
        rpm_idle: Some(650),
        ..EngineData::default()
    });
    let out = patch(&doc, &fields);
    assert!(out.contains("\ttorque: 2000\n\trpm_idle: 650\n}"));
}

#[test]
fn test_patch_preserves_crlf_line_endings() {
    let text = ENGINE_SII.replace('\n', "\r\n");
    let doc = Document::new(text);
    let out = patch(&doc, &torque_and_curve_fields());

    assert!(out.contains("\ttorque: 2779\r\n"));
    assert!(out.contains("\ttorque_curve[]: (1500, 0.85)\r\n"));
    assert!(!out.contains("0.85)\n\t"));
}

#[test]
fn test_patch_merges_non_contiguous_array_runs() {
    let text = "SiiNunit\n{\naccessory_engine_data : a.engine\n{\n\
                \ttorque_curve[]: (300, 0)\n\
                \tinterleaved: 1\n\
                \ttorque_curve[]: (1000, 1)\n\
                }\n}\n";
    let doc = Document::new(text);
    let fields = FieldSet::Engine(EngineData {
        curve_points: vec![CurvePoint::new(600, 0.7), CurvePoint::new(2000, 1.0)],
        ..EngineData::default()
    });
    let out = patch(&doc, &fields);

    assert_eq!(out.matches("torque_curve[]").count(), 2);
    assert!(out.contains(
        "\ttorque_curve[]: (600, 0.7)\n\ttorque_curve[]: (2000, 1)\n\tinterleaved: 1\n"
    ));
}

#[test]
fn test_patch_preserves_known_identifier() {
    let doc = Document::new(ENGINE_SII);
    let fields = FieldSet::Engine(EngineData {
        id: Some("2ws_700.zcustom_01.engine".to_string()),
        name: Some("Something Completely Different".to_string()),
        ..EngineData::default()
    });
    let out = patch(&doc, &fields);
    assert!(out.contains("accessory_engine_data : 2ws_700.zcustom_01.engine\n"));
}

#[test]
fn test_patch_rederives_identifier_keeping_suffix() {
    let doc = Document::new(ENGINE_SII);
    let fields = FieldSet::Engine(EngineData {
        name: Some("New 1500".to_string()),
        ..EngineData::default()
    });
    let out = patch(&doc, &fields);
    assert!(out.contains("accessory_engine_data : new_1k5.zcustom_01.engine\n"));
}

#[test]
fn test_patch_truck_context_overrides_suffix() {
    let doc = Document::new(ENGINE_SII);
    let fields = FieldSet::Engine(EngineData {
        name: Some("New 1500".to_string()),
        truck: Some("kenworth.w900".to_string()),
        ..EngineData::default()
    });
    let out = patch(&doc, &fields);
    assert!(out.contains("accessory_engine_data : new_1k5.kenworth.w900.engine\n"));
}

#[test]
fn test_patch_rewrites_info_lines_after_icon() {
    let doc = Document::new(ENGINE_SII);
    let fields = FieldSet::Engine(EngineData {
        target_hp: Some(625),
        torque_nm: Some(2508),
        rpm_range_power: Some(RpmRange::new(1300, 1900)),
        ..EngineData::default()
    });
    let out = patch(&doc, &fields);

    assert_eq!(out.matches("info[]").count(), 3);
    // 625 hp -> 466 kW, 2508 N·m -> 1850 lb-ft
    let expected = "\ticon: \"engine_01\"\n\
                    \tinfo[]: \"625 @@hp@@ (466 @@kw@@)\"\n\
                    \tinfo[]: \"1850 @@lb_ft@@ (2508 @@nm@@)\"\n\
                    \tinfo[]: \"1300-1900 @@rpm@@\"\n";
    assert!(out.contains(expected));
}

#[test]
fn test_patch_inserts_info_after_name_without_icon() {
    let text = "SiiNunit\n{\naccessory_engine_data : a.engine\n{\n\tname: \"A\"\n\ttorque: 2000\n}\n}\n";
    let doc = Document::new(text);
    let fields = FieldSet::Engine(EngineData {
        target_hp: Some(500),
        torque_nm: Some(2000),
        ..EngineData::default()
    });
    let out = patch(&doc, &fields);
    // 500 hp -> 373 kW, 2000 N·m -> 1475 lb-ft, default 1200-1600 band
    assert!(out.contains("\tname: \"A\"\n\tinfo[]: \"500 @@hp@@ (373 @@kw@@)\"\n"));
    assert!(out.contains("\tinfo[]: \"1475 @@lb_ft@@ (2000 @@nm@@)\"\n"));
    assert!(out.contains("\tinfo[]: \"1200-1600 @@rpm@@\"\n"));
}

#[test]
fn test_patch_collapses_excess_blank_lines() {
    let text = "SiiNunit\n{\naccessory_engine_data : a.engine\n{\n\ttorque: 2000\n\n\n\n\n\trpm_idle: 600\n}\n}\n";
    let doc = Document::new(text);
    let out = patch(&doc, &FieldSet::Engine(EngineData::default()));
    assert!(out.contains("\ttorque: 2000\n\n\trpm_idle: 600\n"));
}

const TRANSMISSION_SII: &str = r#"SiiNunit
{
accessory_transmission_data : eaton_10.transmission
{
	name: "Eaton Fuller 10"
	price: 9000
	unlock: 0
	icon: "transmission_generic"

	differential_ratio: 3.25

	ratios_reverse[0]: -15.06
	ratios_forward[0]: 11.06
	ratios_forward[1]: 8.12
	ratios_forward[2]: 4.10
}
}
"#;

#[test]
fn test_patch_transmission_scalars_and_gears() {
    let doc = Document::new(TRANSMISSION_SII);
    let fields = FieldSet::Transmission(TransmissionData {
        diff_ratio: Some(3.55),
        gears: vec![
            GearEntry::new("1", 1.00),
            GearEntry::new("Rev", -14.56),
            GearEntry::new("2", 12.57),
        ],
        ..TransmissionData::default()
    });
    let out = patch(&doc, &fields);

    assert!(out.contains("\tdifferential_ratio: 3.55\n"));
    assert!(out.contains("\tratios_reverse[0]: -14.56\n"));
    // Forward gears re-indexed in descending ratio order
    assert!(out.contains("\tratios_forward[0]: 12.57\n\tratios_forward[1]: 1.00\n"));
    assert_eq!(out.matches("ratios_forward[").count(), 2);

    // Unrelated keys untouched
    assert!(out.contains("\tname: \"Eaton Fuller 10\"\n"));
    assert!(out.contains("\tprice: 9000\n"));
}

#[test]
fn test_patch_transmission_appends_retarder_when_absent() {
    let doc = Document::new(TRANSMISSION_SII);
    let fields = FieldSet::Transmission(TransmissionData {
        retarder: Some(3),
        ..TransmissionData::default()
    });
    let out = patch(&doc, &fields);
    assert!(out.contains("\tretarder: 3\n}"));
}
