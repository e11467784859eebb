// Thu Oct 15 2026 - Alex

use crate::memory::MemoryType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An address tagged with the memory space it belongs to.
///
/// Negative addresses mean the address could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressInfo {
    pub address: i32,
    pub memory_type: MemoryType,
}

impl AddressInfo {
    pub fn new(address: i32, memory_type: MemoryType) -> Self {
        Self { address, memory_type }
    }

    pub fn unmapped(memory_type: MemoryType) -> Self {
        Self { address: -1, memory_type }
    }

    pub fn is_valid(&self) -> bool {
        self.address >= 0
    }

    pub fn as_u32(&self) -> Option<u32> {
        u32::try_from(self.address).ok()
    }
}

impl fmt::Display for AddressInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}:${:06X}", self.memory_type, self.address)
        } else {
            write!(f, "{}:<unmapped>", self.memory_type)
        }
    }
}
