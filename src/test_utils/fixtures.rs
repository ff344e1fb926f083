//! Test fixtures for job history documents
//!
//! Builders for metadata JSON, configuration XML and whole history roots.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::MemoryFs;

/// Builder for a job metadata JSON document.
///
/// Every field starts with a plausible value derived from the id; fields can
/// be overridden or left out entirely to produce incomplete documents.
#[derive(Clone, Debug)]
pub struct MetadataFixture {
    pub id: String,
    fields: Vec<(String, Option<String>)>,
}

impl MetadataFixture {
    /// Document for `id` with all required keys
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            fields: vec![
                ("id".to_string(), Some(id.to_string())),
                ("url".to_string(), Some(format!("http://rm:8088/proxy/{id}"))),
                ("started".to_string(), Some("1565000000000".to_string())),
                ("completed".to_string(), Some("1565000060000".to_string())),
                ("status".to_string(), Some("SUCCEEDED".to_string())),
                ("user".to_string(), Some("tester".to_string())),
            ],
        }
    }

    fn set(mut self, key: &str, value: Option<String>) -> Self {
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.fields.push((key.to_string(), value)),
        }
        self
    }

    pub fn url(self, url: &str) -> Self {
        self.set("url", Some(url.to_string()))
    }

    pub fn status(self, status: &str) -> Self {
        self.set("status", Some(status.to_string()))
    }

    pub fn user(self, user: &str) -> Self {
        self.set("user", Some(user.to_string()))
    }

    /// Add or replace an arbitrary string key
    pub fn field(self, key: &str, value: &str) -> Self {
        self.set(key, Some(value.to_string()))
    }

    /// Drop a key from the rendered document
    pub fn without(self, key: &str) -> Self {
        self.set(key, None)
    }

    /// Render as a JSON object
    pub fn to_json(&self) -> String {
        let mut object = serde_json::Map::new();
        for (key, value) in &self.fields {
            if let Some(value) = value {
                object.insert(key.clone(), serde_json::Value::String(value.clone()));
            }
        }
        serde_json::Value::Object(object).to_string()
    }
}

/// A single `<property>` element
#[derive(Clone, Debug)]
struct PropertyFixture {
    name: String,
    value: String,
    is_final: String,
    source: String,
}

/// Builder for a job configuration XML document.
#[derive(Clone, Debug, Default)]
pub struct ConfigFixture {
    properties: Vec<PropertyFixture>,
}

impl ConfigFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a property. `name` and `value` are inserted verbatim, so they
    /// may carry markup such as CDATA sections.
    pub fn property(mut self, name: &str, value: &str, is_final: bool, source: &str) -> Self {
        self.properties.push(PropertyFixture {
            name: name.to_string(),
            value: value.to_string(),
            is_final: is_final.to_string(),
            source: source.to_string(),
        });
        self
    }

    /// Number of properties added so far
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Render as a `<configuration>` document
    pub fn to_xml(&self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<configuration>\n");
        for p in &self.properties {
            xml.push_str(&format!(
                "  <property><name>{}</name><value>{}</value><final>{}</final><source>{}</source></property>\n",
                p.name, p.value, p.is_final, p.source
            ));
        }
        xml.push_str("</configuration>\n");
        xml
    }
}

/// A history root made of job directories.
///
/// Each job may carry a metadata document, a configuration document, both or
/// neither. Raw contents can stand in for either to simulate damaged files.
#[derive(Clone, Debug, Default)]
pub struct HistoryFixture {
    jobs: Vec<(String, Option<String>, Option<String>)>,
}

impl HistoryFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a complete job
    pub fn job(self, metadata: MetadataFixture, config: ConfigFixture) -> Self {
        let id = metadata.id.clone();
        self.raw_job(&id, Some(metadata.to_json()), Some(config.to_xml()))
    }

    /// Add a job with arbitrary document contents
    pub fn raw_job(mut self, id: &str, metadata: Option<String>, config: Option<String>) -> Self {
        self.jobs.push((id.to_string(), metadata, config));
        self
    }

    /// Write the jobs below `root` using the default file names
    pub fn write_to(&self, root: &Path) -> Result<()> {
        for (id, metadata, config) in &self.jobs {
            let dir = root.join(id);
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create job directory {}", dir.display()))?;
            if let Some(metadata) = metadata {
                fs::write(dir.join("metadata.json"), metadata)
                    .with_context(|| format!("Failed to write metadata for {id}"))?;
            }
            if let Some(config) = config {
                fs::write(dir.join("config.xml"), config)
                    .with_context(|| format!("Failed to write config for {id}"))?;
            }
        }
        Ok(())
    }

    /// Build an in-memory history rooted at `root`
    pub fn to_memory_fs(&self, root: impl Into<PathBuf>) -> MemoryFs {
        let root = root.into();
        let mut store = MemoryFs::new();
        for (id, metadata, config) in &self.jobs {
            let dir = root.join(id);
            if let Some(metadata) = metadata {
                store.insert_file(dir.join("metadata.json"), metadata.as_bytes());
            }
            if let Some(config) = config {
                store.insert_file(dir.join("config.xml"), config.as_bytes());
            }
        }
        store
    }
}
