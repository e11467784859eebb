// Fri Oct 16 2026 - Alex

use crate::config::IntegrationConfig;
use crate::memory::{AddressInfo, AddressTranslator, RomInfoSource};
use crate::symbol::grammar::{scan_sections, SymbolRow};
use crate::symbol::label::{AddressStrategy, LabelBuilder};
use crate::symbol::line_index::{LineIndex, SourceCodeLocation};
use crate::symbol::provider::{SourceSymbol, SymbolProvider};
use crate::symbol::registry::LabelRegistry;
use crate::symbol::source::{SourceFileInfo, SourceFileTable};
use crate::symbol::SymbolError;
use parking_lot::RwLock;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub label_count: usize,
    pub error_count: usize,
}

impl ImportSummary {
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_errors() {
            write!(f, "Imported {} labels ({} errors)", self.label_count, self.error_count)
        } else {
            write!(f, "Imported {} labels", self.label_count)
        }
    }
}

/// Told about the outcome of an import, typically to show it to the user.
pub trait ImportNotifier {
    fn notify(&self, summary: &ImportSummary);
}

/// Everything one import produced. Replaced as a whole by the next import.
#[derive(Debug, Clone, Default)]
pub struct SymbolSnapshot {
    stamp: Option<SystemTime>,
    files: SourceFileTable,
    index: LineIndex,
}

impl SymbolSnapshot {
    /// Directory source paths were resolved against.
    pub fn symbol_path(&self) -> &Path {
        self.files.base_path()
    }

    pub fn stamp(&self) -> Option<SystemTime> {
        self.stamp
    }

    pub fn files(&self) -> &SourceFileTable {
        &self.files
    }

    pub fn index(&self) -> &LineIndex {
        &self.index
    }
}

/// Imports WLA-DX `.sym` files and answers source-level queries about them.
pub struct WlaDxImporter {
    translator: Arc<dyn AddressTranslator>,
    rom_info: Arc<dyn RomInfoSource>,
    registry: Arc<dyn LabelRegistry>,
    integration: RwLock<IntegrationConfig>,
    snapshot: RwLock<Arc<SymbolSnapshot>>,
}

impl WlaDxImporter {
    pub fn new(
        translator: Arc<dyn AddressTranslator>,
        rom_info: Arc<dyn RomInfoSource>,
        registry: Arc<dyn LabelRegistry>,
    ) -> Self {
        Self {
            translator,
            rom_info,
            registry,
            integration: RwLock::new(IntegrationConfig::default()),
            snapshot: RwLock::new(Arc::new(SymbolSnapshot::default())),
        }
    }

    pub fn with_integration(self, integration: IntegrationConfig) -> Self {
        *self.integration.write() = integration;
        self
    }

    pub fn set_integration(&self, integration: IntegrationConfig) {
        *self.integration.write() = integration;
    }

    pub fn snapshot(&self) -> Arc<SymbolSnapshot> {
        self.snapshot.read().clone()
    }

    pub fn import<P: AsRef<Path>>(&self, path: P) -> Result<ImportSummary, SymbolError> {
        let path = path.as_ref();

        let bytes = fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SymbolError::NotFound(path.to_path_buf()),
            _ => SymbolError::Io { path: path.to_path_buf(), source: e },
        })?;
        let stamp = fs::metadata(path).and_then(|m| m.modified()).ok();
        let base_path = path.parent().map(Path::to_path_buf).unwrap_or_default();

        log::info!("Importing WLA-DX symbols from {}", path.display());

        let text = String::from_utf8_lossy(&bytes);
        Ok(self.import_text(&text, base_path, stamp))
    }

    pub fn import_and_notify<P: AsRef<Path>>(
        &self,
        path: P,
        notifier: &dyn ImportNotifier,
    ) -> Result<ImportSummary, SymbolError> {
        let summary = self.import(path)?;
        notifier.notify(&summary);
        Ok(summary)
    }

    /// Imports already-loaded symbol text. Source paths resolve against `base_path`.
    pub fn import_text(&self, text: &str, base_path: PathBuf, stamp: Option<SystemTime>) -> ImportSummary {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let lines: Vec<&str> = text.lines().collect();

        let strategy = AddressStrategy::for_cpus(&self.rom_info.cpu_types());
        let integration = *self.integration.read();

        let mut labels = LabelBuilder::new(self.translator.as_ref(), strategy, integration);
        let mut files = SourceFileTable::new(base_path);
        let mut index = LineIndex::new();
        let mut index_errors = 0usize;

        for section in scan_sections(&lines) {
            for row in &section.rows {
                match row {
                    SymbolRow::Label(row) => labels.add(row),
                    SymbolRow::SourceFile(row) => files.add(row),
                    SymbolRow::AddrToLine(row) => {
                        if index.add_row(row, &files).is_error() {
                            index_errors += 1;
                        }
                    }
                }
            }
        }

        let (labels, label_errors) = labels.finish();
        let summary = ImportSummary {
            label_count: labels.len(),
            error_count: label_errors + index_errors,
        };

        log::debug!(
            "{} source files, {} lines mapped to {} addresses, strategy {:?}",
            files.len(),
            index.line_count(),
            index.address_count(),
            strategy
        );

        let snapshot = SymbolSnapshot {
            stamp,
            files,
            index,
        };
        *self.snapshot.write() = Arc::new(snapshot);

        self.registry.set_labels(labels, true);

        log::info!("{}", summary);
        summary
    }
}

impl SymbolProvider for WlaDxImporter {
    fn symbol_file_stamp(&self) -> Option<SystemTime> {
        self.snapshot.read().stamp()
    }

    fn symbol_path(&self) -> PathBuf {
        self.snapshot.read().symbol_path().to_path_buf()
    }

    fn source_files(&self) -> Vec<Arc<SourceFileInfo>> {
        self.snapshot.read().files.files().cloned().collect()
    }

    fn line_address(&self, file: &SourceFileInfo, line: u32) -> Option<AddressInfo> {
        self.snapshot.read().index.address_for_line(file.name(), line)
    }

    fn line_end_address(&self, _file: &SourceFileInfo, _line: u32) -> Option<AddressInfo> {
        None
    }

    fn source_code_line_info(&self, address: AddressInfo) -> Option<SourceCodeLocation> {
        self.snapshot.read().index.location_for_address(address).cloned()
    }

    // WLA-DX symbol files only have flat labels, which go to the label registry.

    fn symbol(&self, _word: &str, _scope_start: i32, _scope_end: i32) -> Option<SourceSymbol> {
        None
    }

    fn symbol_address_info(&self, _symbol: &SourceSymbol) -> Option<AddressInfo> {
        None
    }

    fn symbol_definition(&self, _symbol: &SourceSymbol) -> Option<SourceCodeLocation> {
        None
    }

    fn symbols(&self) -> Vec<SourceSymbol> {
        Vec::new()
    }

    fn symbol_size(&self, _symbol: &SourceSymbol) -> usize {
        1
    }
}
