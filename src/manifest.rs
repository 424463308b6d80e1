use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// A parsed `package.json`, kept as the raw object so it serializes back out
/// with every key in its original order. Fields are read leniently: a field
/// of an unexpected type reads as absent instead of failing the parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    fields: Map<String, Value>,
}

impl Manifest {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn name(&self) -> Option<String> {
        self.text("name")
    }

    pub fn version(&self) -> Option<String> {
        self.text("version")
    }

    /// `CommonJS` unless the manifest declares a module type.
    pub fn module_type(&self) -> String {
        self.text("type").unwrap_or_else(|| "CommonJS".to_string())
    }

    pub fn dependency_names(&self) -> Vec<String> {
        self.keys_of("dependencies")
    }

    pub fn dev_dependency_names(&self) -> Vec<String> {
        self.keys_of("devDependencies")
    }

    /// Non-empty strings and non-zero numbers; anything else reads as unset.
    fn text(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            _ => None,
        }
    }

    fn keys_of(&self, key: &str) -> Vec<String> {
        self.fields
            .get(key)
            .and_then(Value::as_object)
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub enum ManifestStatus {
    Loaded(Manifest),
    Missing,
    Invalid(String),
}

impl ManifestStatus {
    /// Issue text for a manifest that could not be used, if any.
    pub fn issue(&self, file_name: &str) -> Option<String> {
        match self {
            ManifestStatus::Loaded(_) => None,
            ManifestStatus::Missing => Some(format!("{} not found", file_name)),
            ManifestStatus::Invalid(err) => Some(format!("Error reading {}: {}", file_name, err)),
        }
    }
}

pub fn parse_manifest(content: &str) -> ManifestStatus {
    match serde_json::from_str::<Manifest>(content) {
        Ok(manifest) => ManifestStatus::Loaded(manifest),
        Err(e) => ManifestStatus::Invalid(e.to_string()),
    }
}

pub fn load_manifest(path: &Path) -> ManifestStatus {
    if !path.is_file() {
        return ManifestStatus::Missing;
    }

    match fs::read_to_string(path) {
        Ok(content) => parse_manifest(&content),
        Err(e) => ManifestStatus::Invalid(e.to_string()),
    }
}
