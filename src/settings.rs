use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;

use log::{debug, error};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use serde_json::Value;

use crate::codec;
use crate::error::SettingsError;
use crate::field::{Field, FieldSet};
use crate::params::{Attenuator, Channel, Coupling, DataFormat, DataType, Protocol, Resolution};
use crate::variant::BuildVariant;

/// Sample count meaning "stream until stopped"
pub const UNBOUNDED_SAMPLES: i32 = -1;

/// Streaming server settings.
///
/// Every field starts at a default value but counts as unassigned until its
/// setter runs. The record is complete once every field of its build variant
/// has been assigned; only complete records are written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamSettings {
    variant: BuildVariant,
    assigned: FieldSet,

    host: String,
    port: String,
    protocol: Protocol,
    samples: i32,
    format: DataFormat,
    data_type: DataType,
    channels: Channel,
    resolution: Resolution,
    decimation: u32,

    attenuator: Attenuator,
    calibration: bool,
    coupling: Coupling,
}

impl StreamSettings {
    /// Create an unassigned record for the variant selected at build time
    pub fn new() -> Self {
        Self::with_variant(BuildVariant::ACTIVE)
    }

    /// Create an unassigned record for an explicit hardware variant
    pub fn with_variant(variant: BuildVariant) -> Self {
        StreamSettings {
            variant,
            assigned: FieldSet::EMPTY,
            host: String::new(),
            port: String::new(),
            protocol: Protocol::default(),
            samples: UNBOUNDED_SAMPLES,
            format: DataFormat::default(),
            data_type: DataType::default(),
            channels: Channel::default(),
            resolution: Resolution::default(),
            decimation: 1,
            attenuator: Attenuator::default(),
            calibration: false,
            coupling: Coupling::default(),
        }
    }

    pub fn variant(&self) -> BuildVariant {
        self.variant
    }

    /// Forget every assignment. Values are left as they are.
    pub fn reset(&mut self) {
        self.assigned.clear();
    }

    /// True once every field of this record's variant has been assigned
    pub fn is_complete(&self) -> bool {
        self.assigned.is_superset(self.variant.required())
    }

    pub fn is_assigned(&self, field: Field) -> bool {
        self.assigned.contains(field)
    }

    pub fn assigned(&self) -> FieldSet {
        self.assigned
    }

    /// Fields of this variant still waiting for a setter, in document order
    pub fn missing(&self) -> Vec<Field> {
        self.variant.required().difference(self.assigned).iter().collect()
    }

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = host.into();
        self.assigned.insert(Field::Host);
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn set_port(&mut self, port: impl Into<String>) {
        self.port = port.into();
        self.assigned.insert(Field::Port);
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn set_protocol(&mut self, protocol: Protocol) {
        self.protocol = protocol;
        self.assigned.insert(Field::Protocol);
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Number of samples to stream, or [`UNBOUNDED_SAMPLES`]
    pub fn set_samples(&mut self, samples: i32) {
        self.samples = samples;
        self.assigned.insert(Field::Samples);
    }

    pub fn samples(&self) -> i32 {
        self.samples
    }

    pub fn set_format(&mut self, format: DataFormat) {
        self.format = format;
        self.assigned.insert(Field::Format);
    }

    pub fn format(&self) -> DataFormat {
        self.format
    }

    /// Stored under the `type` key
    pub fn set_data_type(&mut self, data_type: DataType) {
        self.data_type = data_type;
        self.assigned.insert(Field::Type);
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn set_channels(&mut self, channels: Channel) {
        self.channels = channels;
        self.assigned.insert(Field::Channels);
    }

    pub fn channels(&self) -> Channel {
        self.channels
    }

    pub fn set_resolution(&mut self, resolution: Resolution) {
        self.resolution = resolution;
        self.assigned.insert(Field::Resolution);
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn set_decimation(&mut self, decimation: u32) {
        self.decimation = decimation;
        self.assigned.insert(Field::Decimation);
    }

    pub fn decimation(&self) -> u32 {
        self.decimation
    }

    pub fn set_attenuator(&mut self, attenuator: Attenuator) {
        self.attenuator = attenuator;
        self.assigned.insert(Field::Attenuator);
    }

    pub fn attenuator(&self) -> Attenuator {
        self.attenuator
    }

    pub fn set_calibration(&mut self, calibration: bool) {
        self.calibration = calibration;
        self.assigned.insert(Field::Calibration);
    }

    pub fn calibration(&self) -> bool {
        self.calibration
    }

    pub fn set_coupling(&mut self, coupling: Coupling) {
        self.coupling = coupling;
        self.assigned.insert(Field::Coupling);
    }

    pub fn coupling(&self) -> Coupling {
        self.coupling
    }

    /// Current value of a field as it appears in the settings document
    pub fn value_of(&self, field: Field) -> Value {
        match field {
            Field::Host => Value::from(self.host.as_str()),
            Field::Port => Value::from(self.port.as_str()),
            Field::Protocol => Value::from(self.protocol.code()),
            Field::Samples => Value::from(self.samples),
            Field::Format => Value::from(self.format.code()),
            Field::Type => Value::from(self.data_type.code()),
            Field::Channels => Value::from(self.channels.code()),
            Field::Resolution => Value::from(self.resolution.code()),
            Field::Decimation => Value::from(self.decimation),
            Field::Attenuator => Value::from(self.attenuator.code()),
            Field::Calibration => Value::from(self.calibration),
            Field::Coupling => Value::from(self.coupling.code()),
        }
    }

    /// Write the record to `path`, truncating any existing file. A symlink at
    /// `path` is followed and its target rewritten.
    ///
    /// Incomplete records are rejected before the filesystem is touched.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        if !self.is_complete() {
            return Err(SettingsError::Incomplete {
                missing: self.missing(),
            });
        }

        let document = serde_json::to_vec(self)?;
        write_truncating(path, &document).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Wrote {} settings to {}", self.variant, path.display());
        Ok(())
    }

    /// Read settings from `path`, returning whether the record is now complete.
    ///
    /// If the file cannot be opened the record is left untouched. Otherwise all
    /// assignments are cleared first, and only keys present in the document are
    /// assigned again.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<bool, SettingsError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SettingsError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        self.reset();
        // Only the first JSON value is read; trailing text after it is ignored
        let mut reader = serde_json::Deserializer::from_reader(BufReader::new(file));
        let root = Value::deserialize(&mut reader)?;
        let document = root.as_object().ok_or(SettingsError::NotObject)?;
        codec::apply_document(self, document);

        debug!(
            "Read {} settings from {} ({} of {} fields assigned)",
            self.variant,
            path.display(),
            self.variant.fields().len() - self.missing().len(),
            self.variant.fields().len()
        );
        Ok(self.is_complete())
    }

    /// Write the record if it is complete. Failures other than an incomplete
    /// record are logged.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> bool {
        match self.save(path) {
            Ok(()) => true,
            Err(SettingsError::Incomplete { .. }) => false,
            Err(e) => {
                error!("{}", e);
                false
            }
        }
    }

    /// Read the record from `path` and report whether it is complete.
    /// Open and parse failures are logged.
    pub fn read_from_file(&mut self, path: impl AsRef<Path>) -> bool {
        match self.load(path) {
            Ok(complete) => complete,
            Err(e) => {
                error!("{}", e);
                false
            }
        }
    }
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializes exactly the keys of the record's variant, in document order
impl Serialize for StreamSettings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self.variant.fields();
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for field in fields {
            let key = field.key();
            match field {
                Field::Host => map.serialize_entry(key, &self.host)?,
                Field::Port => map.serialize_entry(key, &self.port)?,
                Field::Protocol => map.serialize_entry(key, &self.protocol)?,
                Field::Samples => map.serialize_entry(key, &self.samples)?,
                Field::Format => map.serialize_entry(key, &self.format)?,
                Field::Type => map.serialize_entry(key, &self.data_type)?,
                Field::Channels => map.serialize_entry(key, &self.channels)?,
                Field::Resolution => map.serialize_entry(key, &self.resolution)?,
                Field::Decimation => map.serialize_entry(key, &self.decimation)?,
                Field::Attenuator => map.serialize_entry(key, &self.attenuator)?,
                Field::Calibration => map.serialize_entry(key, &self.calibration)?,
                Field::Coupling => map.serialize_entry(key, &self.coupling)?,
            }
        }
        map.end()
    }
}

fn write_truncating(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.flush()
}
