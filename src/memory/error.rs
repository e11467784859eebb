// Thu Oct 15 2026 - Alex

use crate::memory::MemoryType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Invalid mapping range: ${start:06X}-${end:06X}")]
    InvalidRange { start: u32, end: u32 },
    #[error("Mapping source must be a CPU memory space, got {0}")]
    NotRelative(MemoryType),
    #[error("Mapping target must be a physical memory space, got {0}")]
    NotPhysical(MemoryType),
}
