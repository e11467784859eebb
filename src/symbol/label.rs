// Thu Oct 15 2026 - Alex

use crate::config::IntegrationConfig;
use crate::memory::{AddressInfo, AddressTranslator, CpuType, MemoryType};
use crate::symbol::grammar::LabelRow;
use bitflags::bitflags;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static LABEL_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[@_a-zA-Z]+[@_a-zA-Z0-9]*$").expect("valid label name regex")
});

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct CodeLabelFlags: u32 {
        const NONE = 0;
        const AUTO_JUMP_LABEL = 1 << 0;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeLabel {
    pub label: String,
    pub address: u32,
    pub memory_type: MemoryType,
    pub comment: String,
    pub flags: CodeLabelFlags,
    pub length: u32,
}

impl CodeLabel {
    pub fn new(label: String, address: u32, memory_type: MemoryType) -> Self {
        Self {
            label,
            address,
            memory_type,
            comment: String::new(),
            flags: CodeLabelFlags::NONE,
            length: 1,
        }
    }

    pub fn address_info(&self) -> AddressInfo {
        AddressInfo::new(self.address as i32, self.memory_type)
    }
}

impl fmt::Display for CodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}:${:06X}", self.label, self.memory_type, self.address)
    }
}

/// Naming rule enforced by the label registry.
pub fn is_valid_label_name(name: &str) -> bool {
    LABEL_NAME_REGEX.is_match(name)
}

pub fn sanitize_label_name(name: &str) -> String {
    name.replace(['.', ':', '$'], "_")
}

/// How a `bank:offset` pair becomes a physical address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressStrategy {
    /// 16 KiB ROM banks below $8000, everything above goes through the translator.
    Gameboy,
    /// `bank << 16 | offset` in the SNES CPU address space.
    Flat,
}

impl AddressStrategy {
    pub fn for_cpus(cpu_types: &[CpuType]) -> Self {
        if cpu_types.contains(&CpuType::Gameboy) {
            Self::Gameboy
        } else {
            Self::Flat
        }
    }

    pub fn resolve(self, bank: u32, offset: u32, translator: &dyn AddressTranslator) -> AddressInfo {
        match self {
            Self::Gameboy => {
                if offset >= 0x8000 {
                    translator.absolute_address(relative(offset, MemoryType::GameboyMemory))
                } else {
                    let address = bank
                        .checked_mul(0x4000)
                        .and_then(|a| a.checked_add(offset & 0x3FFF))
                        .and_then(|a| i32::try_from(a).ok());
                    match address {
                        Some(a) => AddressInfo::new(a, MemoryType::GbPrgRom),
                        None => AddressInfo::unmapped(MemoryType::GbPrgRom),
                    }
                }
            }
            Self::Flat => {
                translator.absolute_address(relative((bank << 16) | offset, MemoryType::SnesMemory))
            }
        }
    }
}

fn relative(address: u32, memory_type: MemoryType) -> AddressInfo {
    match i32::try_from(address) {
        Ok(a) => AddressInfo::new(a, memory_type),
        Err(_) => AddressInfo::unmapped(memory_type),
    }
}

/// Builds the label batch for one import.
pub struct LabelBuilder<'a> {
    translator: &'a dyn AddressTranslator,
    strategy: AddressStrategy,
    integration: IntegrationConfig,
    labels: IndexMap<String, CodeLabel>,
    error_count: usize,
}

impl<'a> LabelBuilder<'a> {
    pub fn new(translator: &'a dyn AddressTranslator, strategy: AddressStrategy, integration: IntegrationConfig) -> Self {
        Self {
            translator,
            strategy,
            integration,
            labels: IndexMap::new(),
            error_count: 0,
        }
    }

    pub fn add(&mut self, row: &LabelRow) {
        let base = sanitize_label_name(&row.name);
        if !is_valid_label_name(&base) {
            log::warn!("Ignoring label with invalid name: {:?}", row.name);
            self.error_count += 1;
            return;
        }

        let abs = self.strategy.resolve(row.bank, row.offset, self.translator);
        let Some(address) = abs.as_u32() else {
            log::warn!("Could not resolve label {} at {:02X}:{:04X}", base, row.bank, row.offset);
            self.error_count += 1;
            return;
        };

        let name = self.unique_name(base);

        if self.integration.is_memory_type_import_enabled(abs.memory_type) {
            self.labels.insert(name.clone(), CodeLabel::new(name, address, abs.memory_type));
        }
    }

    fn unique_name(&self, base: String) -> String {
        if !self.labels.contains_key(&base) {
            return base;
        }
        let mut suffix = 1usize;
        loop {
            let candidate = format!("{}{}", base, suffix);
            if !self.labels.contains_key(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn finish(self) -> (Vec<CodeLabel>, usize) {
        (self.labels.into_values().collect(), self.error_count)
    }
}
