// Thu Oct 15 2026 - Alex

use crate::memory::AddressInfo;
use crate::symbol::label::CodeLabel;
use indexmap::IndexMap;
use parking_lot::RwLock;

/// Receives imported labels. One call per import.
pub trait LabelRegistry: Send + Sync {
    fn set_labels(&self, labels: Vec<CodeLabel>, clear_existing: bool);
}

pub struct LabelStore {
    labels: RwLock<IndexMap<String, CodeLabel>>,
}

impl LabelStore {
    pub fn new() -> Self {
        Self {
            labels: RwLock::new(IndexMap::new()),
        }
    }

    pub fn get(&self, name: &str) -> Option<CodeLabel> {
        self.labels.read().get(name).cloned()
    }

    pub fn find_by_address(&self, address: AddressInfo) -> Option<CodeLabel> {
        self.labels
            .read()
            .values()
            .find(|l| l.address_info() == address)
            .cloned()
    }

    pub fn labels(&self) -> Vec<CodeLabel> {
        self.labels.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.labels.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.read().is_empty()
    }

    pub fn clear(&self) {
        self.labels.write().clear();
    }
}

impl Default for LabelStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelRegistry for LabelStore {
    fn set_labels(&self, labels: Vec<CodeLabel>, clear_existing: bool) {
        let mut store = self.labels.write();
        if clear_existing {
            store.clear();
        }
        for label in labels {
            store.insert(label.label.clone(), label);
        }
    }
}
