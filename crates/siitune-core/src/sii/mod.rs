//! SCS `.sii` powertrain accessory format
//!
//! Parses and rewrites the brace-delimited unit files that describe engine
//! and transmission accessories:
//! - Field extraction from raw document text into typed data
//! - Cold-start generation of complete documents
//! - In-place patching that preserves comments, formatting and unknown keys
//! - Identifier derivation for the dotted unit names the game consumes

mod block;
mod error;
mod extract;
mod generate;
mod identifier;
mod patch;

pub use error::ExtractError;
pub use extract::{extract, extract_engine, extract_transmission};
pub use generate::generate;
pub use identifier::derive_identifier;
pub use patch::patch;

use serde::{Deserialize, Serialize};

/// Kind of accessory block a document describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigBlockKind {
    /// `accessory_engine_data` block
    Engine,
    /// `accessory_transmission_data` block
    Transmission,
}

impl ConfigBlockKind {
    /// The textual keyword that opens this block kind
    pub fn keyword(self) -> &'static str {
        match self {
            ConfigBlockKind::Engine => "accessory_engine_data",
            ConfigBlockKind::Transmission => "accessory_transmission_data",
        }
    }

    /// The final dot-segment of identifiers for this block kind
    pub fn id_suffix(self) -> &'static str {
        match self {
            ConfigBlockKind::Engine => "engine",
            ConfigBlockKind::Transmission => "transmission",
        }
    }

    /// Default icon name used when generating a fresh document
    pub fn default_icon(self) -> &'static str {
        match self {
            ConfigBlockKind::Engine => "engine_01",
            ConfigBlockKind::Transmission => "transmission_generic",
        }
    }
}

/// An inclusive integer RPM range, serialized as `(min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpmRange {
    /// Lower bound in rev/min
    pub min: u32,
    /// Upper bound in rev/min
    pub max: u32,
}

impl RpmRange {
    /// Construct a range from its bounds
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

impl From<(u32, u32)> for RpmRange {
    fn from((min, max): (u32, u32)) -> Self {
        Self { min, max }
    }
}

/// One point of a torque curve: ratio of peak torque available at an RPM
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Engine speed in rev/min
    pub rpm: u32,
    /// Fraction of peak torque; 1.0 is the peak, values above are legal
    pub ratio: f64,
}

impl CurvePoint {
    /// Construct a curve point
    pub fn new(rpm: u32, ratio: f64) -> Self {
        Self { rpm, ratio }
    }
}

/// A single gear of a transmission
///
/// Negative ratios are reverse gears, positive ratios forward gears. The
/// display label is synthesized during extraction (`R1, R2, …` for reverse,
/// `1, 2, …` for forward); labels present in source files are not carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearEntry {
    /// Display label
    pub label: String,
    /// Gear ratio; sign selects the reverse/forward partition
    pub ratio: f64,
}

impl GearEntry {
    /// Construct a gear entry
    pub fn new(label: impl Into<String>, ratio: f64) -> Self {
        Self {
            label: label.into(),
            ratio,
        }
    }

    /// Whether this is a reverse gear
    pub fn is_reverse(&self) -> bool {
        self.ratio < 0.0
    }
}

/// Typed field set extracted from (or destined for) an engine block
///
/// Every field is independently optional: extraction never fails on a
/// missing or malformed key, and the patcher only rewrites fields that are
/// present. Torque is held in newton-meters, the canonical unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineData {
    /// Machine identifier of the block, preserved across round-trips
    pub id: Option<String>,
    /// Human display name
    pub name: Option<String>,
    /// Internal name of the truck this accessory binds to
    pub truck: Option<String>,
    /// In-game price
    pub price: Option<u32>,
    /// Player level at which the accessory unlocks
    pub unlock_level: Option<u32>,
    /// Advertised horsepower, parsed from the `info[]` line
    pub target_hp: Option<u32>,
    /// RPM at which the advertised power peaks
    pub target_rpm: Option<u32>,
    /// Peak torque in newton-meters
    pub torque_nm: Option<u32>,
    /// Idle speed in rev/min
    pub rpm_idle: Option<u32>,
    /// Governed RPM limit under load
    pub rpm_limit: Option<u32>,
    /// Governed RPM limit in neutral
    pub rpm_limit_neutral: Option<u32>,
    /// Engine brake strength
    pub engine_brake: Option<f64>,
    /// Whether the engine brake forces downshifts
    pub engine_brake_downshift: Option<bool>,
    /// Number of engine brake positions
    pub engine_brake_positions: Option<u32>,
    /// Automatic-gearbox shift band for low gears
    pub rpm_range_low_gear: Option<RpmRange>,
    /// Automatic-gearbox shift band for high gears
    pub rpm_range_high_gear: Option<RpmRange>,
    /// Power band advertised in the `info[]` line
    pub rpm_range_power: Option<RpmRange>,
    /// Band in which the engine brake is effective
    pub rpm_range_engine_brake: Option<RpmRange>,
    /// Torque curve, serialized in ascending RPM order
    pub curve_points: Vec<CurvePoint>,
    /// Sound and asset links: `defaults[]` values and raw `@include` lines
    pub defaults: Vec<String>,
}

/// Typed field set extracted from (or destined for) a transmission block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransmissionData {
    /// Machine identifier of the block, preserved across round-trips
    pub id: Option<String>,
    /// Human display name
    pub name: Option<String>,
    /// Internal name of the truck this accessory binds to
    pub truck: Option<String>,
    /// In-game price
    pub price: Option<u32>,
    /// Player level at which the accessory unlocks
    pub unlock_level: Option<u32>,
    /// Differential (final drive) ratio
    pub diff_ratio: Option<f64>,
    /// Retarder step count; 0 means no retarder
    pub retarder: Option<u32>,
    /// All gears, reverse and forward mixed
    pub gears: Vec<GearEntry>,
}

impl TransmissionData {
    /// Reverse gears sorted ascending by ratio (most reduction first)
    pub fn reverse_gears(&self) -> Vec<&GearEntry> {
        let mut gears: Vec<&GearEntry> = self.gears.iter().filter(|g| g.ratio < 0.0).collect();
        gears.sort_by(|a, b| a.ratio.total_cmp(&b.ratio));
        gears
    }

    /// Forward gears sorted descending by ratio (lowest gear first)
    pub fn forward_gears(&self) -> Vec<&GearEntry> {
        let mut gears: Vec<&GearEntry> = self.gears.iter().filter(|g| g.ratio > 0.0).collect();
        gears.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));
        gears
    }
}

/// Field set for either block kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldSet {
    /// Engine accessory fields
    Engine(EngineData),
    /// Transmission accessory fields
    Transmission(TransmissionData),
}

impl FieldSet {
    /// The block kind this field set belongs to
    pub fn kind(&self) -> ConfigBlockKind {
        match self {
            FieldSet::Engine(_) => ConfigBlockKind::Engine,
            FieldSet::Transmission(_) => ConfigBlockKind::Transmission,
        }
    }
}

/// Line-ending convention of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineEnding {
    /// Unix `\n`
    Lf,
    /// Windows `\r\n`
    CrLf,
}

impl LineEnding {
    /// The literal line terminator
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// A read-only snapshot of an imported document
///
/// Holds the literal text plus its detected line-ending style. The patcher
/// consumes a `Document` and returns fresh text; it never mutates the
/// snapshot itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    text: String,
    line_ending: LineEnding,
}

impl Document {
    /// Snapshot a text buffer, detecting its line-ending style
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let line_ending = if text.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        };
        Self { text, line_ending }
    }

    /// The raw document text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The detected line-ending style
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }
}
