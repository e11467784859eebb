// Thu Oct 15 2026 - Alex

use crate::memory::AddressInfo;
use crate::symbol::line_index::SourceCodeLocation;
use crate::symbol::source::SourceFileInfo;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

/// A scoped symbol from a debug format that carries one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSymbol {
    pub name: String,
    pub address: Option<i32>,
}

/// Read-only queries the debugger runs against imported debug info.
pub trait SymbolProvider: Send + Sync {
    fn symbol_file_stamp(&self) -> Option<SystemTime>;
    fn symbol_path(&self) -> PathBuf;
    fn source_files(&self) -> Vec<Arc<SourceFileInfo>>;

    fn line_address(&self, file: &SourceFileInfo, line: u32) -> Option<AddressInfo>;
    fn line_end_address(&self, file: &SourceFileInfo, line: u32) -> Option<AddressInfo>;
    fn source_code_line_info(&self, address: AddressInfo) -> Option<SourceCodeLocation>;

    fn symbol(&self, word: &str, scope_start: i32, scope_end: i32) -> Option<SourceSymbol>;
    fn symbol_address_info(&self, symbol: &SourceSymbol) -> Option<AddressInfo>;
    fn symbol_definition(&self, symbol: &SourceSymbol) -> Option<SourceCodeLocation>;
    fn symbols(&self) -> Vec<SourceSymbol>;
    fn symbol_size(&self, symbol: &SourceSymbol) -> usize;
}
