// Thu Oct 15 2026 - Alex

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static LABEL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9a-fA-F]{2,4}):([0-9a-fA-F]{4}) ([^\s]*)").expect("valid label regex")
});
static FILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9a-fA-F]{4}) ([0-9a-fA-F]{8}) (.*)").expect("valid file regex")
});
static FILE_V2_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9a-fA-F]{4}):([0-9a-fA-F]{4}) ([0-9a-fA-F]{8}) (.*)").expect("valid file v2 regex")
});
static ADDR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9a-fA-F]{2,4}):([0-9a-fA-F]{4}) ([0-9a-fA-F]{4}):([0-9a-fA-F]{8})")
        .expect("valid addr-to-line regex")
});
static ADDR_V2_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([0-9a-fA-F]{8}) ([0-9a-fA-F]{2}):([0-9a-fA-F]{4}) ([0-9a-fA-F]{4}) ([0-9a-fA-F]{4}):([0-9a-fA-F]{4}):([0-9a-fA-F]{8})",
    )
    .expect("valid addr-to-line v2 regex")
});

/// The line formats a WLA-DX symbol file can contain, one per section header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineGrammar {
    Label,
    SourceFile,
    SourceFileV2,
    AddrToLine,
    AddrToLineV2,
}

/// Capture group positions for the fields a grammar exposes. Zero means absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub bank: usize,
    pub offset: usize,
    pub file_id: usize,
    pub crc: usize,
    pub line: usize,
    pub path: usize,
    pub name: usize,
}

impl FieldLayout {
    const EMPTY: Self = Self { bank: 0, offset: 0, file_id: 0, crc: 0, line: 0, path: 0, name: 0 };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRow {
    pub bank: u32,
    pub offset: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFileRow {
    pub file_id: u32,
    /// Read but never checked against the file on disk.
    pub crc: u32,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddrToLineRow {
    pub bank: u32,
    pub offset: u32,
    pub file_id: u32,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolRow {
    Label(LabelRow),
    SourceFile(SourceFileRow),
    AddrToLine(AddrToLineRow),
}

impl LineGrammar {
    pub const ALL: [LineGrammar; 5] = [
        Self::Label,
        Self::SourceFile,
        Self::SourceFileV2,
        Self::AddrToLine,
        Self::AddrToLineV2,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Self::Label => "[labels]",
            Self::SourceFile => "[source files]",
            Self::SourceFileV2 => "[source files v2]",
            Self::AddrToLine => "[addr-to-line mapping]",
            Self::AddrToLineV2 => "[addr-to-line mapping v2]",
        }
    }

    pub fn from_header(line: &str) -> Option<Self> {
        let line = line.trim();
        Self::ALL.into_iter().find(|g| g.header() == line)
    }

    fn regex(self) -> &'static Regex {
        match self {
            Self::Label => &*LABEL_REGEX,
            Self::SourceFile => &*FILE_REGEX,
            Self::SourceFileV2 => &*FILE_V2_REGEX,
            Self::AddrToLine => &*ADDR_REGEX,
            Self::AddrToLineV2 => &*ADDR_V2_REGEX,
        }
    }

    pub fn layout(self) -> FieldLayout {
        match self {
            Self::Label => FieldLayout { bank: 1, offset: 2, name: 3, ..FieldLayout::EMPTY },
            Self::SourceFile => FieldLayout { file_id: 1, crc: 2, path: 3, ..FieldLayout::EMPTY },
            Self::SourceFileV2 => FieldLayout { file_id: 2, crc: 3, path: 4, ..FieldLayout::EMPTY },
            Self::AddrToLine => FieldLayout { bank: 1, offset: 2, file_id: 3, line: 4, ..FieldLayout::EMPTY },
            Self::AddrToLineV2 => FieldLayout { bank: 2, offset: 3, file_id: 6, line: 7, ..FieldLayout::EMPTY },
        }
    }

    pub fn parse(self, line: &str) -> Option<SymbolRow> {
        let caps = self.regex().captures(line)?;
        let layout = self.layout();

        let row = match self {
            Self::Label => SymbolRow::Label(LabelRow {
                bank: hex_field(&caps, layout.bank)?,
                offset: hex_field(&caps, layout.offset)?,
                name: text_field(&caps, layout.name)?,
            }),
            Self::SourceFile | Self::SourceFileV2 => SymbolRow::SourceFile(SourceFileRow {
                file_id: hex_field(&caps, layout.file_id)?,
                crc: hex_field(&caps, layout.crc)?,
                path: text_field(&caps, layout.path)?,
            }),
            Self::AddrToLine | Self::AddrToLineV2 => SymbolRow::AddrToLine(AddrToLineRow {
                bank: hex_field(&caps, layout.bank)?,
                offset: hex_field(&caps, layout.offset)?,
                file_id: hex_field(&caps, layout.file_id)?,
                line: hex_field(&caps, layout.line)?,
            }),
        };

        Some(row)
    }
}

fn hex_field(caps: &Captures<'_>, index: usize) -> Option<u32> {
    if index == 0 {
        return None;
    }
    u32::from_str_radix(caps.get(index)?.as_str(), 16).ok()
}

fn text_field(caps: &Captures<'_>, index: usize) -> Option<String> {
    if index == 0 {
        return None;
    }
    caps.get(index).map(|m| m.as_str().to_string())
}

/// Rows collected from one section of the file, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub grammar: LineGrammar,
    pub header_line: usize,
    pub rows: Vec<SymbolRow>,
}

/// Walks the file once, collecting rows under every recognised header.
///
/// A section runs until the first empty line. Lines that don't match the
/// section's grammar are skipped, as are unknown headers and stray text
/// between sections.
pub fn scan_sections<S: AsRef<str>>(lines: &[S]) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let Some(grammar) = LineGrammar::from_header(lines[i].as_ref()) else {
            i += 1;
            continue;
        };

        let header_line = i;
        let mut rows = Vec::new();
        let mut skipped = 0usize;
        i += 1;

        while i < lines.len() {
            let line = lines[i].as_ref();
            if line.is_empty() {
                break;
            }
            match grammar.parse(line) {
                Some(row) => rows.push(row),
                None => skipped += 1,
            }
            i += 1;
        }

        log::debug!(
            "Section {} at line {}: {} rows, {} unmatched lines",
            grammar.header(),
            header_line + 1,
            rows.len(),
            skipped
        );

        sections.push(Section { grammar, header_line, rows });
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_recognition() {
        assert_eq!(LineGrammar::from_header("  [labels] "), Some(LineGrammar::Label));
        assert_eq!(LineGrammar::from_header("[source files v2]"), Some(LineGrammar::SourceFileV2));
        assert_eq!(LineGrammar::from_header("[addr-to-line mapping]"), Some(LineGrammar::AddrToLine));
        assert_eq!(LineGrammar::from_header("[LABELS]"), None);
        assert_eq!(LineGrammar::from_header("[definitions]"), None);
    }

    #[test]
    fn test_parse_label() {
        let row = LineGrammar::Label.parse("01:8000 Main.loop").unwrap();
        assert_eq!(row, SymbolRow::Label(LabelRow { bank: 1, offset: 0x8000, name: "Main.loop".to_string() }));

        let wide = LineGrammar::Label.parse("007e:1234 ram_var trailing").unwrap();
        assert_eq!(wide, SymbolRow::Label(LabelRow { bank: 0x7E, offset: 0x1234, name: "ram_var".to_string() }));

        assert!(LineGrammar::Label.parse("0:8000 Short").is_none());
        assert!(LineGrammar::Label.parse("00:800 Short").is_none());
    }

    #[test]
    fn test_parse_source_files() {
        let v1 = LineGrammar::SourceFile.parse("0001 DEADBEEF src/main.s").unwrap();
        assert_eq!(v1, SymbolRow::SourceFile(SourceFileRow {
            file_id: 1,
            crc: 0xDEADBEEF,
            path: "src/main.s".to_string(),
        }));

        let v2 = LineGrammar::SourceFileV2.parse("0000:0002 0badf00d lib/with space.inc").unwrap();
        assert_eq!(v2, SymbolRow::SourceFile(SourceFileRow {
            file_id: 2,
            crc: 0x0BADF00D,
            path: "lib/with space.inc".to_string(),
        }));

        assert!(LineGrammar::SourceFile.parse("0000:0002 0badf00d lib.inc").is_none());
    }

    #[test]
    fn test_parse_addr_to_line() {
        let v1 = LineGrammar::AddrToLine.parse("02:8123 0001:0000001f").unwrap();
        assert_eq!(v1, SymbolRow::AddrToLine(AddrToLineRow { bank: 2, offset: 0x8123, file_id: 1, line: 0x1F }));

        let v2 = LineGrammar::AddrToLineV2
            .parse("00018123 01:8123 0000 0000:0003:0000002a")
            .unwrap();
        assert_eq!(v2, SymbolRow::AddrToLine(AddrToLineRow { bank: 1, offset: 0x8123, file_id: 3, line: 0x2A }));

        assert!(LineGrammar::AddrToLineV2.parse("00018123 0001:8123 0000 0000:0003:0000002a").is_none());
    }

    #[test]
    fn test_scan_stops_at_blank_line() {
        let text = "[labels]\n00:8000 Main\ngarbage here\n00:8010 Loop\n\n00:9000 Outside\n";
        let lines: Vec<&str> = text.lines().collect();
        let sections = scan_sections(&lines);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].grammar, LineGrammar::Label);
        assert_eq!(sections[0].rows.len(), 2);
    }

    #[test]
    fn test_scan_multiple_sections_and_unknown_headers() {
        let text = "; wla symbols\n[information]\nversion 2\n\n[source files v2]\n0000:0000 00000000 main.s\n\n\
                    [addr-to-line mapping v2]\n00008000 00:8000 0000 0000:0000:00000005\n";
        let lines: Vec<&str> = text.lines().collect();
        let sections = scan_sections(&lines);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].grammar, LineGrammar::SourceFileV2);
        assert_eq!(sections[1].grammar, LineGrammar::AddrToLineV2);
        assert_eq!(sections[1].rows.len(), 1);
    }

    #[test]
    fn test_whitespace_only_line_does_not_end_section() {
        let lines = ["[labels]", "00:8000 A", "   ", "00:8001 B", ""];
        let sections = scan_sections(&lines);
        assert_eq!(sections[0].rows.len(), 2);
    }

    #[test]
    fn test_header_without_rows_at_eof() {
        let lines = ["[labels]"];
        let sections = scan_sections(&lines);
        assert_eq!(sections.len(), 1);
        assert!(sections[0].rows.is_empty());
    }
}
