// Thu Oct 15 2026 - Alex

use crate::memory::{LabelCategory, MappingRule, MemoryError, MemoryType};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub integration: IntegrationConfig,
    pub mappings: Vec<MappingRule>,
    pub prg_rom_size: Option<u32>,
    pub show_import_result: bool,
}

/// Which memory spaces imported labels may land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationConfig {
    pub import_prg_rom_labels: bool,
    pub import_work_ram_labels: bool,
    pub import_save_ram_labels: bool,
    pub import_other_labels: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            integration: IntegrationConfig::default(),
            mappings: Vec::new(),
            prg_rom_size: None,
            show_import_result: true,
        }
    }
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            import_prg_rom_labels: true,
            import_work_ram_labels: true,
            import_save_ram_labels: true,
            import_other_labels: true,
        }
    }
}

impl IntegrationConfig {
    pub fn is_memory_type_import_enabled(&self, memory_type: MemoryType) -> bool {
        match memory_type.category() {
            LabelCategory::PrgRom => self.import_prg_rom_labels,
            LabelCategory::WorkRam => self.import_work_ram_labels,
            LabelCategory::SaveRam => self.import_save_ram_labels,
            LabelCategory::Other => self.import_other_labels,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_integration(mut self, integration: IntegrationConfig) -> Self {
        self.integration = integration;
        self
    }

    pub fn with_mapping(mut self, rule: MappingRule) -> Self {
        self.mappings.push(rule);
        self
    }

    pub fn with_prg_rom_size(mut self, size: u32) -> Self {
        self.prg_rom_size = Some(size);
        self
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;

        let ext = path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        match ext.to_lowercase().as_str() {
            "json" => Ok(serde_json::from_str(&contents)?),
            _ => Err(ConfigError::UnsupportedFormat(ext.to_string())),
        }
    }

    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                log::debug!("Using default config ({})", e);
                Self::default()
            }
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, contents)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for rule in &self.mappings {
            rule.validate()?;
        }
        if self.prg_rom_size == Some(0) {
            return Err(ConfigError::ValidationError("prg_rom_size must be greater than 0".to_string()));
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0:?}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
    #[error("Invalid mapping: {0}")]
    Mapping(#[from] MemoryError),
    #[error("Validation error: {0}")]
    ValidationError(String),
}
