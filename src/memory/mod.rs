// Thu Oct 15 2026 - Alex

pub mod address;
pub mod error;
pub mod mapping;
pub mod memory_type;
pub mod traits;

pub use address::AddressInfo;
pub use error::MemoryError;
pub use mapping::{MappingRule, RangeTranslator};
pub use memory_type::{CpuType, LabelCategory, MemoryType};
pub use traits::{AddressTranslator, RomInfo, RomInfoSource};
