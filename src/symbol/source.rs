// Thu Oct 15 2026 - Alex

use crate::symbol::grammar::SourceFileRow;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A source file referenced by the symbol file, with its text split into lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFileInfo {
    path: String,
    is_absolute_index: bool,
    lines: Vec<String>,
}

impl SourceFileInfo {
    pub fn new(path: String, is_absolute_index: bool, lines: Vec<String>) -> Self {
        Self { path, is_absolute_index, lines }
    }

    /// The path as written in the symbol file.
    pub fn name(&self) -> &str {
        &self.path
    }

    pub fn is_absolute_index(&self) -> bool {
        self.is_absolute_index
    }

    /// 1-based.
    pub fn line(&self, number: u32) -> Option<&str> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        self.lines.get(index).map(String::as_str)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SourceFileTable {
    base_path: PathBuf,
    files: BTreeMap<u32, Arc<SourceFileInfo>>,
}

impl SourceFileTable {
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self {
            base_path: base_path.into(),
            files: BTreeMap::new(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Loads the referenced file. A missing or unreadable file is kept with no lines.
    pub fn add(&mut self, row: &SourceFileRow) {
        let full_path = self.base_path.join(&row.path);
        let lines = load_lines(&full_path);

        let info = SourceFileInfo::new(row.path.clone(), true, lines);
        if self.files.insert(row.file_id, Arc::new(info)).is_some() {
            log::debug!("Source file id {:04X} redefined as {}", row.file_id, row.path);
        }
    }

    pub fn get(&self, file_id: u32) -> Option<&Arc<SourceFileInfo>> {
        self.files.get(&file_id)
    }

    pub fn files(&self) -> impl Iterator<Item = &Arc<SourceFileInfo>> {
        self.files.values()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn load_lines(path: &Path) -> Vec<String> {
    if !path.is_file() {
        log::debug!("Source file not found: {}", path.display());
        return Vec::new();
    }

    match fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect(),
        Err(e) => {
            log::warn!("Could not read source file {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(file_id: u32, path: &str) -> SourceFileRow {
        SourceFileRow { file_id, crc: 0, path: path.to_string() }
    }

    #[test]
    fn test_loads_relative_to_base() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src").join("main.s"), "  lda #$00\r\n  rts\n").unwrap();

        let mut table = SourceFileTable::new(dir.path());
        table.add(&row(0, "src/main.s"));

        let file = table.get(0).unwrap();
        assert_eq!(file.name(), "src/main.s");
        assert_eq!(file.line_count(), 2);
        assert_eq!(file.line(1), Some("  lda #$00"));
        assert_eq!(file.line(2), Some("  rts"));
        assert_eq!(file.line(0), None);
        assert_eq!(file.line(3), None);
    }

    #[test]
    fn test_missing_file_is_kept_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = SourceFileTable::new(dir.path());
        table.add(&row(7, "does/not/exist.s"));

        let file = table.get(7).unwrap();
        assert!(file.is_empty());
        assert_eq!(file.name(), "does/not/exist.s");
    }

    #[test]
    fn test_same_id_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = SourceFileTable::new(dir.path());
        table.add(&row(1, "a.s"));
        table.add(&row(1, "b.s"));

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(1).unwrap().name(), "b.s");
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("latin1.s"), b"; caf\xe9\nnop\n").unwrap();

        let mut table = SourceFileTable::new(dir.path());
        table.add(&row(0, "latin1.s"));

        let file = table.get(0).unwrap();
        assert_eq!(file.line_count(), 2);
        assert_eq!(file.line(2), Some("nop"));
    }
}
