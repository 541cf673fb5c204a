//! Tolerant decoding of a settings document into a [`StreamSettings`].
//!
//! Values are coerced the way a loosely typed JSON accessor would read them:
//! numbers become strings where a string is expected, floats truncate, null
//! reads as zero. A value that cannot be read as the field's type is skipped
//! with a warning and the field stays unassigned.

use log::warn;
use serde_json::{Map, Value};

use crate::field::Field;
use crate::params::{Attenuator, Channel, Coupling, DataFormat, DataType, Protocol, Resolution};
use crate::settings::StreamSettings;

/// Assign every field of the record's variant whose key is present in
/// `document`. Unknown keys and keys outside the variant are ignored.
pub fn apply_document(settings: &mut StreamSettings, document: &Map<String, Value>) {
    let variant = settings.variant();
    for (key, value) in document {
        let Some(field) = Field::from_key(key).filter(|field| variant.has_field(*field)) else {
            continue;
        };
        if !apply_field(settings, field, value) {
            warn!("Ignoring {} = {}: not a valid value for this field", field, value);
        }
    }
}

/// Coerce `value` and pass it to the field's setter. Returns false if the
/// value could not be coerced.
pub fn apply_field(settings: &mut StreamSettings, field: Field, value: &Value) -> bool {
    match field {
        Field::Host => assign(as_string(value), |v| settings.set_host(v)),
        Field::Port => assign(as_string(value), |v| settings.set_port(v)),
        Field::Protocol => assign(as_enum(value, Protocol::from_code), |v| settings.set_protocol(v)),
        Field::Samples => assign(as_samples(value), |v| settings.set_samples(v)),
        Field::Format => assign(as_enum(value, DataFormat::from_code), |v| settings.set_format(v)),
        Field::Type => assign(as_enum(value, DataType::from_code), |v| settings.set_data_type(v)),
        Field::Channels => assign(as_enum(value, Channel::from_code), |v| settings.set_channels(v)),
        Field::Resolution => {
            assign(as_enum(value, Resolution::from_code), |v| settings.set_resolution(v))
        }
        Field::Decimation => assign(as_u32(value), |v| settings.set_decimation(v)),
        Field::Attenuator => {
            assign(as_enum(value, Attenuator::from_code), |v| settings.set_attenuator(v))
        }
        Field::Calibration => assign(as_bool(value), |v| settings.set_calibration(v)),
        Field::Coupling => assign(as_enum(value, Coupling::from_code), |v| settings.set_coupling(v)),
    }
}

fn assign<T>(value: Option<T>, set: impl FnOnce(T)) -> bool {
    match value {
        Some(v) => {
            set(v);
            true
        }
        None => false,
    }
}

fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Any integral reading of `value`, before range checks
fn as_integer(value: &Value) -> Option<i128> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i as i128)
            } else if let Some(u) = n.as_u64() {
                Some(u as i128)
            } else {
                // Floats truncate toward zero
                n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i128)
            }
        }
        Value::Bool(b) => Some(*b as i128),
        Value::Null => Some(0),
        Value::String(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

fn as_enum<T>(value: &Value, from_code: fn(i64) -> Option<T>) -> Option<T> {
    as_integer(value)
        .and_then(|i| i64::try_from(i).ok())
        .and_then(from_code)
}

/// Signed sample count. Values in the unsigned 32-bit range alias onto i32,
/// so 4294967295 reads back as -1.
fn as_samples(value: &Value) -> Option<i32> {
    let i = as_integer(value)?;
    if let Ok(signed) = i32::try_from(i) {
        Some(signed)
    } else {
        u32::try_from(i).ok().map(|unsigned| unsigned as i32)
    }
}

fn as_u32(value: &Value) -> Option<u32> {
    as_integer(value).and_then(|i| u32::try_from(i).ok())
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::Null => Some(false),
        Value::String(_) | Value::Array(_) | Value::Object(_) => None,
    }
}
