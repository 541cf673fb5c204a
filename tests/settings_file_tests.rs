//! File round-trip scenarios for the settings record

use std::fs;
use std::path::Path;

use serde_json::{json, Value};
use stream_settings::{
    Attenuator, BuildVariant, Channel, Coupling, DataFormat, DataType, Field, Protocol,
    Resolution, StreamSettings,
};

fn read_json(path: &Path) -> Value {
    let text = fs::read_to_string(path).expect("settings file should exist");
    serde_json::from_str(&text).expect("settings file should be valid JSON")
}

fn complete_record(variant: BuildVariant) -> StreamSettings {
    let mut settings = StreamSettings::with_variant(variant);
    settings.set_host("10.0.0.1");
    settings.set_port("9000");
    settings.set_protocol(Protocol::Udp);
    settings.set_samples(1024);
    settings.set_format(DataFormat::Csv);
    settings.set_data_type(DataType::Volt);
    settings.set_channels(Channel::Both);
    settings.set_resolution(Resolution::Bit16);
    settings.set_decimation(8);
    if variant.has_field(Field::Attenuator) {
        settings.set_attenuator(Attenuator::A1To20);
        settings.set_calibration(true);
    }
    if variant.has_field(Field::Coupling) {
        settings.set_coupling(Coupling::Dc);
    }
    settings
}

#[test]
fn test_base_write_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s.json");

    let settings = complete_record(BuildVariant::Base);
    assert!(settings.write_to_file(&path));

    assert_eq!(
        read_json(&path),
        json!({
            "host": "10.0.0.1", "port": "9000", "protocol": 1, "samples": 1024,
            "format": 2, "type": 2, "channels": 3, "resolution": 2, "decimation": 8
        })
    );
}

#[test]
fn test_incomplete_write_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s.json");

    let mut settings = StreamSettings::with_variant(BuildVariant::Base);
    settings.set_host("10.0.0.1");
    assert!(!settings.write_to_file(&path));
    assert!(!path.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_incomplete_write_keeps_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s.json");
    fs::write(&path, "previous").unwrap();

    let settings = StreamSettings::with_variant(BuildVariant::Attenuated);
    assert!(!settings.write_to_file(&path));
    assert_eq!(fs::read_to_string(&path).unwrap(), "previous");
}

#[test]
fn test_attenuated_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s.json");

    let mut settings = StreamSettings::with_variant(BuildVariant::Attenuated);
    settings.set_host("h");
    settings.set_port("1");
    settings.set_protocol(Protocol::Tcp);
    settings.set_samples(0);
    settings.set_format(DataFormat::Wav);
    settings.set_data_type(DataType::Raw);
    settings.set_channels(Channel::Ch1);
    settings.set_resolution(Resolution::Bit8);
    settings.set_decimation(0);
    settings.set_attenuator(Attenuator::A1To20);
    settings.set_calibration(true);
    assert!(settings.write_to_file(&path));

    let mut loaded = StreamSettings::with_variant(BuildVariant::Attenuated);
    assert!(loaded.read_from_file(&path));
    assert!(loaded.is_complete());
    assert!(loaded.calibration());
    assert_eq!(loaded.attenuator(), Attenuator::A1To20);
    assert_eq!(loaded.host(), "h");
    assert_eq!(loaded.port(), "1");
    assert_eq!(loaded.decimation(), 0);
}

#[test]
fn test_round_trip_every_variant() {
    let dir = tempfile::tempdir().unwrap();

    for variant in BuildVariant::ALL {
        let path = dir.path().join(format!("{}.json", variant));
        let mut settings = complete_record(variant);
        settings.set_samples(-1);
        assert!(settings.write_to_file(&path), "{} write failed", variant);

        let document = read_json(&path);
        assert_eq!(document.as_object().unwrap().len(), variant.fields().len());
        assert_eq!(document["samples"], json!(-1));

        let mut loaded = StreamSettings::with_variant(variant);
        assert!(loaded.read_from_file(&path), "{} read incomplete", variant);
        for &field in variant.fields() {
            assert_eq!(loaded.value_of(field), settings.value_of(field), "{} differs", field);
        }
    }
}

#[test]
fn test_high_res_missing_coupling() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s.json");
    let document = json!({
        "host": "10.0.0.1", "port": "9000", "protocol": 0, "samples": -1,
        "format": 0, "type": 1, "channels": 3, "resolution": 1, "decimation": 1,
        "attenuator": 2, "calibration": true
    });
    fs::write(&path, document.to_string()).unwrap();

    let mut settings = StreamSettings::with_variant(BuildVariant::HighRes);
    assert!(!settings.read_from_file(&path));
    assert_eq!(settings.coupling(), Coupling::Ac);
    assert_eq!(settings.missing(), vec![Field::Coupling]);
    assert_eq!(settings.attenuator(), Attenuator::A1To20);
    assert_eq!(settings.channels(), Channel::Both);
}

#[test]
fn test_partial_document_assigns_present_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s.json");
    fs::write(&path, r#"{"host": "sink.local", "decimation": 16}"#).unwrap();

    let mut settings = StreamSettings::with_variant(BuildVariant::Base);
    assert!(!settings.read_from_file(&path));
    assert_eq!(settings.host(), "sink.local");
    assert_eq!(settings.decimation(), 16);
    assert_eq!(settings.assigned().len(), 2);
}

#[test]
fn test_invalid_json_resets_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s.json");
    fs::write(&path, "not json").unwrap();

    let mut settings = complete_record(BuildVariant::Base);
    assert!(settings.is_complete());
    assert!(!settings.read_from_file(&path));
    assert!(settings.assigned().is_empty());
    assert!(!settings.is_complete());
    // Values survive the reset
    assert_eq!(settings.host(), "10.0.0.1");
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = StreamSettings::with_variant(BuildVariant::Base);
    assert!(!settings.read_from_file(dir.path().join("absent.json")));
    assert!(!settings.is_complete());
}

#[test]
fn test_read_replaces_earlier_assignments() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s.json");
    fs::write(&path, r#"{"port": "7000"}"#).unwrap();

    let mut settings = StreamSettings::with_variant(BuildVariant::Base);
    settings.set_host("a");
    settings.set_host("b");
    assert_eq!(settings.host(), "b");

    assert!(!settings.read_from_file(&path));
    assert!(!settings.is_assigned(Field::Host));
    assert!(settings.is_assigned(Field::Port));
    assert_eq!(settings.host(), "b");
}

#[test]
fn test_base_document_under_attenuated_is_incomplete() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s.json");
    assert!(complete_record(BuildVariant::Base).write_to_file(&path));

    let mut settings = StreamSettings::with_variant(BuildVariant::Attenuated);
    assert!(!settings.read_from_file(&path));
    assert_eq!(settings.missing(), vec![Field::Attenuator, Field::Calibration]);
}
