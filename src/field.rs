use std::fmt;

/// Identifies one settings field and its JSON key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Host,
    Port,
    Protocol,
    Samples,
    Format,
    Type,
    Channels,
    Resolution,
    Decimation,
    Attenuator,
    Calibration,
    Coupling,
}

impl Field {
    /// Document order. Base fields first, then attenuated, then high-res.
    pub const ALL: [Field; 12] = [
        Field::Host,
        Field::Port,
        Field::Protocol,
        Field::Samples,
        Field::Format,
        Field::Type,
        Field::Channels,
        Field::Resolution,
        Field::Decimation,
        Field::Attenuator,
        Field::Calibration,
        Field::Coupling,
    ];

    /// JSON key used on disk
    pub fn key(self) -> &'static str {
        match self {
            Field::Host => "host",
            Field::Port => "port",
            Field::Protocol => "protocol",
            Field::Samples => "samples",
            Field::Format => "format",
            Field::Type => "type",
            Field::Channels => "channels",
            Field::Resolution => "resolution",
            Field::Decimation => "decimation",
            Field::Attenuator => "attenuator",
            Field::Calibration => "calibration",
            Field::Coupling => "coupling",
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.key() == key)
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Set of fields, one bit per field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldSet(u16);

impl FieldSet {
    pub const EMPTY: FieldSet = FieldSet(0);

    pub fn insert(&mut self, field: Field) {
        self.0 |= field.bit();
    }

    pub fn contains(self, field: Field) -> bool {
        self.0 & field.bit() != 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_superset(self, other: FieldSet) -> bool {
        self.0 & other.0 == other.0
    }

    /// Fields in `self` that are not in `other`
    pub fn difference(self, other: FieldSet) -> FieldSet {
        FieldSet(self.0 & !other.0)
    }

    /// Iterate members in document order
    pub fn iter(self) -> impl Iterator<Item = Field> {
        Field::ALL.into_iter().filter(move |field| self.contains(*field))
    }
}

impl FromIterator<Field> for FieldSet {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        let mut set = FieldSet::EMPTY;
        for field in iter {
            set.insert(field);
        }
        set
    }
}
