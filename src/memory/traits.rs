// Thu Oct 15 2026 - Alex

use crate::memory::{AddressInfo, CpuType};

/// Converts CPU-relative addresses into physical ones.
///
/// Implementations return an address below zero when the CPU address is not
/// backed by anything.
pub trait AddressTranslator: Send + Sync {
    fn absolute_address(&self, relative: AddressInfo) -> AddressInfo;
}

pub trait RomInfoSource: Send + Sync {
    fn cpu_types(&self) -> Vec<CpuType>;
}

#[derive(Debug, Clone, Default)]
pub struct RomInfo {
    pub cpu_types: Vec<CpuType>,
}

impl RomInfo {
    pub fn new(cpu_types: Vec<CpuType>) -> Self {
        Self { cpu_types }
    }
}

impl RomInfoSource for RomInfo {
    fn cpu_types(&self) -> Vec<CpuType> {
        self.cpu_types.clone()
    }
}
