// Thu Oct 15 2026 - Alex

pub mod error;
pub mod grammar;
pub mod label;
pub mod line_index;
pub mod provider;
pub mod registry;
pub mod source;
pub mod wladx;

pub use error::SymbolError;
pub use grammar::{scan_sections, LineGrammar, Section, SymbolRow};
pub use label::{AddressStrategy, CodeLabel, CodeLabelFlags, LabelBuilder};
pub use line_index::{LineIndex, SourceCodeLocation};
pub use provider::{SourceSymbol, SymbolProvider};
pub use registry::{LabelRegistry, LabelStore};
pub use source::{SourceFileInfo, SourceFileTable};
pub use wladx::{ImportNotifier, ImportSummary, SymbolSnapshot, WlaDxImporter};
