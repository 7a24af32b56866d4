use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root for stored images and the metadata document
    pub data_dir: PathBuf,
    /// Server bind address
    pub bind_addr: String,
    /// Largest accepted image, in bytes
    pub max_upload_bytes: usize,
    /// MIME types accepted for upload
    pub allowed_content_types: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            bind_addr: "0.0.0.0:8000".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            allowed_content_types: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/gif".to_string(),
            ],
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup` on top of the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("GEO_PHOTOS_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(port) = lookup("PORT") {
            if let Ok(port) = port.trim().parse::<u16>() {
                config.bind_addr = format!("0.0.0.0:{port}");
            }
        }
        // An explicit address wins over PORT
        if let Some(addr) = lookup("GEO_PHOTOS_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(val) = lookup("GEO_PHOTOS_MAX_UPLOAD_BYTES") {
            if let Ok(v) = val.trim().parse::<usize>() {
                if v > 0 {
                    config.max_upload_bytes = v;
                }
            }
        }
        if let Some(val) = lookup("GEO_PHOTOS_ALLOWED_TYPES") {
            let types: Vec<String> = val
                .split(',')
                .map(|t| t.trim().to_ascii_lowercase())
                .filter(|t| !t.is_empty())
                .collect();
            if !types.is_empty() {
                config.allowed_content_types = types;
            }
        }

        config
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join("uploads")
    }

    /// Kept outside `uploads_dir` so it is never served as an upload.
    pub fn metadata_path(&self) -> PathBuf {
        self.data_dir.join("metadata.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[]);
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
        assert_eq!(config.allowed_content_types.len(), 3);
        assert_eq!(
            config.metadata_path(),
            PathBuf::from("./data/metadata.json")
        );
    }

    #[test]
    fn test_port_and_bind_addr_precedence() {
        assert_eq!(config_with(&[("PORT", "9100")]).bind_addr, "0.0.0.0:9100");
        let config = config_with(&[("PORT", "9100"), ("GEO_PHOTOS_BIND_ADDR", "127.0.0.1:7000")]);
        assert_eq!(config.bind_addr, "127.0.0.1:7000");
        assert_eq!(config_with(&[("PORT", "nope")]).bind_addr, "0.0.0.0:8000");
    }

    #[test]
    fn test_overrides() {
        let config = config_with(&[
            ("GEO_PHOTOS_DATA_DIR", "/srv/photos"),
            ("GEO_PHOTOS_MAX_UPLOAD_BYTES", "1024"),
            ("GEO_PHOTOS_ALLOWED_TYPES", " image/WEBP, ,image/png"),
        ]);
        assert_eq!(config.uploads_dir(), PathBuf::from("/srv/photos/uploads"));
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.allowed_content_types, ["image/webp", "image/png"]);
    }
}
