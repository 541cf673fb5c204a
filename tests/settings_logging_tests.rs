//! Log output of the boolean file operations

use std::cell::RefCell;
use std::fs;
use std::sync::Once;

use log::{Level, Log, Metadata, Record};
use stream_settings::{BuildVariant, StreamSettings};

/// Collects records per test thread so parallel tests don't see each other
struct CaptureLogger;

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS.with(|records| {
            records
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

fn start_capture() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).expect("no other logger in this test binary");
        log::set_max_level(log::LevelFilter::Trace);
    });
    RECORDS.with(|records| records.borrow_mut().clear());
}

fn captured() -> Vec<(Level, String)> {
    RECORDS.with(|records| records.borrow().clone())
}

fn errors() -> Vec<String> {
    captured()
        .into_iter()
        .filter(|(level, _)| *level == Level::Error)
        .map(|(_, message)| message)
        .collect()
}

#[test]
fn test_parse_error_is_logged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s.json");
    fs::write(&path, "not json").unwrap();

    start_capture();
    let mut settings = StreamSettings::with_variant(BuildVariant::Base);
    assert!(!settings.read_from_file(&path));

    let errors = errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("error parsing settings json"));
}

#[test]
fn test_open_failure_is_logged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    start_capture();
    let mut settings = StreamSettings::with_variant(BuildVariant::Attenuated);
    assert!(!settings.read_from_file(&path));

    let errors = errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("file open failed"));
    assert!(errors[0].contains("absent.json"));
}

#[test]
fn test_incomplete_write_is_silent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s.json");

    start_capture();
    let mut settings = StreamSettings::with_variant(BuildVariant::Base);
    settings.set_host("10.0.0.1");
    assert!(!settings.write_to_file(&path));

    assert!(captured().is_empty());
}

#[test]
fn test_write_failure_is_logged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("s.json");

    start_capture();
    let mut settings = StreamSettings::with_variant(BuildVariant::Base);
    settings.set_host("10.0.0.1");
    settings.set_port("9000");
    settings.set_samples(-1);
    settings.set_decimation(1);
    settings.set_protocol(Default::default());
    settings.set_format(Default::default());
    settings.set_data_type(Default::default());
    settings.set_channels(Default::default());
    settings.set_resolution(Default::default());
    assert!(!settings.write_to_file(&path));

    assert_eq!(errors().len(), 1);
}
