// Thu Oct 15 2026 - Alex

use crate::memory::{AddressInfo, MemoryType};
use crate::symbol::grammar::AddrToLineRow;
use crate::symbol::source::{SourceFileInfo, SourceFileTable};
use std::collections::HashMap;
use std::sync::Arc;

/// Memory space every line mapping is expressed in.
pub const LINE_MAPPING_MEMORY_TYPE: MemoryType = MemoryType::SnesPrgRom;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCodeLocation {
    pub file: Arc<SourceFileInfo>,
    pub line: u32,
}

impl SourceCodeLocation {
    pub fn new(file: Arc<SourceFileInfo>, line: u32) -> Self {
        Self { file, line }
    }

    pub fn text(&self) -> Option<&str> {
        self.file.line(self.line)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Indexed,
    /// Line 0 and 1 show up for generated code and don't point anywhere useful.
    SentinelLine,
    UnknownFile,
    Unresolved,
}

impl RowOutcome {
    pub fn is_error(self) -> bool {
        matches!(self, Self::SentinelLine | Self::Unresolved)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    address_by_line: HashMap<(String, u32), AddressInfo>,
    line_by_address: HashMap<(MemoryType, i32), SourceCodeLocation>,
}

impl LineIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, row: &AddrToLineRow, files: &SourceFileTable) -> RowOutcome {
        if row.line <= 1 {
            return RowOutcome::SentinelLine;
        }

        let Ok(address) = i32::try_from((row.bank << 16) | row.offset) else {
            return RowOutcome::Unresolved;
        };

        let Some(file) = files.get(row.file_id) else {
            log::warn!(
                "Line mapping {:02X}:{:04X} references unknown file id {:04X}",
                row.bank,
                row.offset,
                row.file_id
            );
            return RowOutcome::UnknownFile;
        };

        self.insert(Arc::clone(file), row.line, AddressInfo::new(address, LINE_MAPPING_MEMORY_TYPE));
        RowOutcome::Indexed
    }

    /// Later entries for the same line or address replace earlier ones.
    pub fn insert(&mut self, file: Arc<SourceFileInfo>, line: u32, address: AddressInfo) {
        self.address_by_line.insert((file.name().to_string(), line), address);
        self.line_by_address
            .insert((address.memory_type, address.address), SourceCodeLocation::new(file, line));
    }

    pub fn address_for_line(&self, file_name: &str, line: u32) -> Option<AddressInfo> {
        self.address_by_line.get(&(file_name.to_string(), line)).copied()
    }

    pub fn location_for_address(&self, address: AddressInfo) -> Option<&SourceCodeLocation> {
        self.line_by_address.get(&(address.memory_type, address.address))
    }

    pub fn line_count(&self) -> usize {
        self.address_by_line.len()
    }

    pub fn address_count(&self) -> usize {
        self.line_by_address.len()
    }

    pub fn is_empty(&self) -> bool {
        self.address_by_line.is_empty() && self.line_by_address.is_empty()
    }

    pub fn locations(&self) -> impl Iterator<Item = (AddressInfo, &SourceCodeLocation)> {
        self.line_by_address
            .iter()
            .map(|((ty, addr), loc)| (AddressInfo::new(*addr, *ty), loc))
    }
}
