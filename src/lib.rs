//! Settings record for the streaming server: network sink and channel
//! acquisition parameters, persisted as a single JSON document.
//!
//! The set of fields depends on the hardware variant selected with cargo
//! features (`attenuated` by default, `high-res`, or neither for the base
//! board).

pub mod codec;
pub mod error;
pub mod field;
pub mod params;
pub mod settings;
pub mod variant;

pub use error::SettingsError;
pub use field::{Field, FieldSet};
pub use params::{Attenuator, Channel, Coupling, DataFormat, DataType, Protocol, Resolution};
pub use settings::{StreamSettings, UNBOUNDED_SAMPLES};
pub use variant::BuildVariant;
