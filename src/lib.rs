// Thu Oct 15 2026 - Alex

pub mod config;
pub mod memory;
pub mod symbol;
pub mod ui;

pub use config::{Config, IntegrationConfig};
pub use memory::{AddressInfo, AddressTranslator, CpuType, MemoryType, RangeTranslator, RomInfo};
pub use symbol::{CodeLabel, ImportSummary, LabelRegistry, LabelStore, SymbolProvider, WlaDxImporter};
