// Thu Oct 15 2026 - Alex

use crate::memory::{AddressInfo, AddressTranslator, MemoryError, MemoryType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maps an inclusive range of CPU addresses onto a physical memory space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRule {
    pub source: MemoryType,
    pub start: u32,
    pub end: u32,
    pub target: MemoryType,
    pub target_start: u32,
}

impl MappingRule {
    pub fn new(source: MemoryType, start: u32, end: u32, target: MemoryType, target_start: u32) -> Self {
        Self { source, start, end, target, target_start }
    }

    pub fn validate(&self) -> Result<(), MemoryError> {
        if self.end < self.start {
            return Err(MemoryError::InvalidRange { start: self.start, end: self.end });
        }
        if !self.source.is_relative() {
            return Err(MemoryError::NotRelative(self.source));
        }
        if self.target.is_relative() {
            return Err(MemoryError::NotPhysical(self.target));
        }
        Ok(())
    }

    pub fn contains(&self, relative: &AddressInfo) -> bool {
        relative.memory_type == self.source
            && relative.as_u32().map_or(false, |a| a >= self.start && a <= self.end)
    }

    fn translate(&self, address: u32) -> Option<u32> {
        (address - self.start).checked_add(self.target_start)
    }
}

/// Table-driven translator. The first rule containing the address wins.
#[derive(Debug, Clone, Default)]
pub struct RangeTranslator {
    rules: Vec<MappingRule>,
    sizes: HashMap<MemoryType, u32>,
}

impl RangeTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_rule(&mut self, rule: MappingRule) -> Result<(), MemoryError> {
        rule.validate()?;
        self.rules.push(rule);
        Ok(())
    }

    pub fn add_rules(&mut self, rules: impl IntoIterator<Item = MappingRule>) -> Result<(), MemoryError> {
        for rule in rules {
            self.add_rule(rule)?;
        }
        Ok(())
    }

    /// Limits a physical space to `size` bytes; translations past it are unmapped.
    pub fn with_size(mut self, memory_type: MemoryType, size: u32) -> Self {
        self.sizes.insert(memory_type, size);
        self
    }

    pub fn rules(&self) -> &[MappingRule] {
        &self.rules
    }

    /// LoROM layout: 32 KiB ROM pages in the upper half of each bank.
    pub fn snes_lorom() -> Self {
        let mut rules = Vec::new();

        for bank in (0x00..=0x7Du32).chain(0x80..=0xFF) {
            rules.push(MappingRule::new(
                MemoryType::SnesMemory,
                (bank << 16) | 0x8000,
                (bank << 16) | 0xFFFF,
                MemoryType::SnesPrgRom,
                (bank & 0x7F) * 0x8000,
            ));
        }

        for bank in (0x00..=0x3Fu32).chain(0x80..=0xBF) {
            rules.push(MappingRule::new(
                MemoryType::SnesMemory,
                bank << 16,
                (bank << 16) | 0x1FFF,
                MemoryType::SnesWorkRam,
                0,
            ));
        }

        rules.push(MappingRule::new(MemoryType::SnesMemory, 0x7E0000, 0x7FFFFF, MemoryType::SnesWorkRam, 0));

        for (first, last) in [(0x70u32, 0x7Du32), (0xF0, 0xFF)] {
            for bank in first..=last {
                rules.push(MappingRule::new(
                    MemoryType::SnesMemory,
                    bank << 16,
                    (bank << 16) | 0x7FFF,
                    MemoryType::SnesSaveRam,
                    (bank - first) * 0x8000,
                ));
            }
        }

        Self { rules, sizes: HashMap::new() }
    }

    pub fn gameboy() -> Self {
        let gb = MemoryType::GameboyMemory;
        let rules = vec![
            MappingRule::new(gb, 0x0000, 0x7FFF, MemoryType::GbPrgRom, 0),
            MappingRule::new(gb, 0x8000, 0x9FFF, MemoryType::GbVideoRam, 0),
            MappingRule::new(gb, 0xA000, 0xBFFF, MemoryType::GbCartRam, 0),
            MappingRule::new(gb, 0xC000, 0xDFFF, MemoryType::GbWorkRam, 0),
            // echo ram
            MappingRule::new(gb, 0xE000, 0xFDFF, MemoryType::GbWorkRam, 0),
            MappingRule::new(gb, 0xFF80, 0xFFFE, MemoryType::GbHighRam, 0),
        ];
        Self { rules, sizes: HashMap::new() }
    }

    /// Puts `rules` ahead of the existing ones so they take priority.
    pub fn with_overrides(mut self, rules: Vec<MappingRule>) -> Result<Self, MemoryError> {
        for rule in &rules {
            rule.validate()?;
        }
        let mut merged = rules;
        merged.append(&mut self.rules);
        self.rules = merged;
        Ok(self)
    }
}

impl AddressTranslator for RangeTranslator {
    fn absolute_address(&self, relative: AddressInfo) -> AddressInfo {
        let Some(address) = relative.as_u32() else {
            return AddressInfo::unmapped(relative.memory_type);
        };

        let Some(rule) = self.rules.iter().find(|r| r.contains(&relative)) else {
            return AddressInfo::unmapped(relative.memory_type);
        };

        let translated = rule.translate(address)
            .filter(|a| self.sizes.get(&rule.target).map_or(true, |size| a < size))
            .and_then(|a| i32::try_from(a).ok());

        match translated {
            Some(a) => AddressInfo::new(a, rule.target),
            None => AddressInfo::unmapped(rule.target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lorom_prg_rom() {
        let translator = RangeTranslator::snes_lorom();
        let abs = translator.absolute_address(AddressInfo::new(0x018000, MemoryType::SnesMemory));
        assert_eq!(abs, AddressInfo::new(0x8000, MemoryType::SnesPrgRom));

        let mirror = translator.absolute_address(AddressInfo::new(0x818000, MemoryType::SnesMemory));
        assert_eq!(mirror, abs);
    }

    #[test]
    fn test_lorom_work_ram() {
        let translator = RangeTranslator::snes_lorom();
        let abs = translator.absolute_address(AddressInfo::new(0x7E1234, MemoryType::SnesMemory));
        assert_eq!(abs, AddressInfo::new(0x1234, MemoryType::SnesWorkRam));

        let low = translator.absolute_address(AddressInfo::new(0x001000, MemoryType::SnesMemory));
        assert_eq!(low, AddressInfo::new(0x1000, MemoryType::SnesWorkRam));
    }

    #[test]
    fn test_unmapped_address() {
        let translator = RangeTranslator::snes_lorom();
        let abs = translator.absolute_address(AddressInfo::new(0x002100, MemoryType::SnesMemory));
        assert!(!abs.is_valid());
    }

    #[test]
    fn test_rom_size_limit() {
        let translator = RangeTranslator::snes_lorom().with_size(MemoryType::SnesPrgRom, 0x10000);
        assert!(translator.absolute_address(AddressInfo::new(0x018000, MemoryType::SnesMemory)).is_valid());
        assert!(!translator.absolute_address(AddressInfo::new(0x028000, MemoryType::SnesMemory)).is_valid());
    }

    #[test]
    fn test_gameboy_ranges() {
        let translator = RangeTranslator::gameboy();
        let hram = translator.absolute_address(AddressInfo::new(0xFF80, MemoryType::GameboyMemory));
        assert_eq!(hram, AddressInfo::new(0, MemoryType::GbHighRam));

        let echo = translator.absolute_address(AddressInfo::new(0xE010, MemoryType::GameboyMemory));
        assert_eq!(echo, AddressInfo::new(0x10, MemoryType::GbWorkRam));

        let io = translator.absolute_address(AddressInfo::new(0xFF40, MemoryType::GameboyMemory));
        assert!(!io.is_valid());
    }

    #[test]
    fn test_overrides_take_priority() {
        let rule = MappingRule::new(MemoryType::SnesMemory, 0x008000, 0x008FFF, MemoryType::SnesSaveRam, 0x100);
        let translator = RangeTranslator::snes_lorom().with_overrides(vec![rule]).unwrap();
        let abs = translator.absolute_address(AddressInfo::new(0x008010, MemoryType::SnesMemory));
        assert_eq!(abs, AddressInfo::new(0x110, MemoryType::SnesSaveRam));
    }

    #[test]
    fn test_rule_validation() {
        let backwards = MappingRule::new(MemoryType::SnesMemory, 0x10, 0x00, MemoryType::SnesWorkRam, 0);
        assert!(matches!(backwards.validate(), Err(MemoryError::InvalidRange { .. })));

        let physical = MappingRule::new(MemoryType::SnesPrgRom, 0, 1, MemoryType::SnesWorkRam, 0);
        assert!(matches!(physical.validate(), Err(MemoryError::NotRelative(_))));
    }
}
