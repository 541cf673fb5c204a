use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::field::Field;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("settings are incomplete, missing: {}", join_keys(.missing))]
    Incomplete { missing: Vec<Field> },
    #[error("file open failed for {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error parsing settings json: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },
    #[error("settings document must be a JSON object")]
    NotObject,
}

fn join_keys(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| field.key())
        .collect::<Vec<_>>()
        .join(", ")
}
