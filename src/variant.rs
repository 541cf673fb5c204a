use std::fmt;

use crate::field::{Field, FieldSet};

/// Hardware profile the settings record is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildVariant {
    /// Base board: no front-end controls
    Base,
    /// Desktop board with input attenuator and calibration
    Attenuated,
    /// 250 MS/s, 12-bit board; adds AC/DC coupling
    HighRes,
}

impl BuildVariant {
    /// Variant selected by the crate features at build time
    #[cfg(feature = "high-res")]
    pub const ACTIVE: BuildVariant = BuildVariant::HighRes;

    /// Variant selected by the crate features at build time
    #[cfg(all(feature = "attenuated", not(feature = "high-res")))]
    pub const ACTIVE: BuildVariant = BuildVariant::Attenuated;

    /// Variant selected by the crate features at build time
    #[cfg(not(feature = "attenuated"))]
    pub const ACTIVE: BuildVariant = BuildVariant::Base;

    pub const ALL: [BuildVariant; 3] = [
        BuildVariant::Base,
        BuildVariant::Attenuated,
        BuildVariant::HighRes,
    ];

    /// Fields that must be assigned before a record of this variant is complete.
    /// Also the exact set of keys the codec writes and recognizes.
    pub fn fields(self) -> &'static [Field] {
        // Ordered base, attenuated, high-res
        let all: &'static [Field] = &Field::ALL;
        match self {
            BuildVariant::Base => &all[..9],
            BuildVariant::Attenuated => &all[..11],
            BuildVariant::HighRes => all,
        }
    }

    pub fn required(self) -> FieldSet {
        self.fields().iter().copied().collect()
    }

    pub fn has_field(self, field: Field) -> bool {
        self.required().contains(field)
    }

    pub fn name(self) -> &'static str {
        match self {
            BuildVariant::Base => "base",
            BuildVariant::Attenuated => "attenuated",
            BuildVariant::HighRes => "high-res",
        }
    }
}

impl Default for BuildVariant {
    fn default() -> Self {
        BuildVariant::ACTIVE
    }
}

impl fmt::Display for BuildVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
