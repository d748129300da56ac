//! # SiiTune Core Library
//!
//! Core functionality for the SiiTune powertrain tuning software.
//!
//! This library provides:
//! - Field extraction from SCS `.sii` engine/transmission accessory files
//! - Round-trip patching that preserves comments and formatting
//! - Cold-start generation of complete accessory documents
//! - Unit conversion and gearing math for the editor panels
//! - Factory presets and the engine sound library
//!
//! ## Example
//!
//! ```rust,ignore
//! use siitune_core::sii::{extract, patch, ConfigBlockKind, Document, FieldSet};
//!
//! let doc = Document::new(std::fs::read_to_string("engine.sii")?);
//! let mut fields = extract(doc.text(), ConfigBlockKind::Engine)?;
//! if let FieldSet::Engine(ref mut engine) = fields {
//!     engine.torque_nm = Some(2779);
//! }
//! let patched = patch(&doc, &fields);
//! ```

#![warn(missing_docs)]

pub mod curve;
pub mod gearing;
pub mod presets;
pub mod sii;
pub mod unit_conversion;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::curve::{default_curve, smart_curve};
    pub use crate::presets::{engine_presets, sound_library, EnginePreset, SoundProfile};
    pub use crate::sii::{
        derive_identifier, extract, generate, patch, ConfigBlockKind, CurvePoint, Document,
        EngineData, ExtractError, FieldSet, GearEntry, RpmRange, TransmissionData,
    };
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
