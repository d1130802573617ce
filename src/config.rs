use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

use crate::{Error, InternalResult};

/// Options of the code generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Path of this crate as seen from the generated code
    #[serde(default = "default_runtime_path")]
    pub runtime_path: String,

    /// Emit `#[derive(Debug)]` on the generated container type
    #[serde(default)]
    pub derive_debug: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            runtime_path: default_runtime_path(),
            derive_debug: false,
        }
    }
}

impl GeneratorConfig {
    pub fn from_file(path: &str) -> InternalResult<Self> {
        from_file(path)
    }

    pub fn from_str(json: &str) -> InternalResult<Self> {
        from_str(json)
    }
}

fn default_runtime_path() -> String {
    "::wirebox".to_string()
}

pub fn from_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> InternalResult<T> {
    let file = File::open(path)
        .map_err(|e| Error::internal(format!("Failed to open config file: {}", e)))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .map_err(|e| Error::internal(format!("Failed to parse config file: {}", e)))?;
    Ok(config)
}

pub fn from_str<T: for<'de> Deserialize<'de>>(json: &str) -> InternalResult<T> {
    serde_json::from_str(json).map_err(|e| Error::internal(format!("Failed to parse config: {}", e)))
}
