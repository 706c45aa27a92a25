//! Service discovery: logical service name → base URL, loaded from
//! `services.json` (spec §6: "Service URLs: loaded from a JSON file
//! `services.json` mapping logical service name → base URL").

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceMapError {
    #[error("read services.json: {0}")]
    Read(std::io::Error),
    #[error("parse services.json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown service: {0}")]
    Unknown(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceMap {
    #[serde(flatten)]
    urls: HashMap<String, String>,
}

impl ServiceMap {
    pub fn load(path: &Path) -> Result<Self, ServiceMapError> {
        let raw = std::fs::read_to_string(path).map_err(ServiceMapError::Read)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn base_url(&self, service: &str) -> Result<&str, ServiceMapError> {
        self.urls.get(service).map(String::as_str).ok_or_else(|| ServiceMapError::Unknown(service.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_and_resolves_known_service() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("services.json");
        std::fs::write(&path, r#"{"intent-router": "http://localhost:8101"}"#).unwrap();

        let map = ServiceMap::load(&path).unwrap();
        assert_eq!(map.base_url("intent-router").unwrap(), "http://localhost:8101");
    }

    #[test]
    fn unknown_service_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("services.json");
        std::fs::write(&path, r#"{}"#).unwrap();

        let map = ServiceMap::load(&path).unwrap();
        assert!(matches!(map.base_url("nope"), Err(ServiceMapError::Unknown(_))));
    }
}
