use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::Result;
use crate::traits::RefStore;
use crate::types::RefValue;

/// In-memory ref store for tests.
#[derive(Debug, Default)]
pub struct InMemoryRefStore {
    refs: RwLock<BTreeMap<String, RefValue>>,
}

impl InMemoryRefStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RefStore for InMemoryRefStore {
    fn read_ref(&self, name: &str) -> Result<Option<RefValue>> {
        Ok(self.refs.read().expect("lock poisoned").get(name).cloned())
    }

    fn write_ref(&self, name: &str, value: &RefValue) -> Result<()> {
        self.refs
            .write()
            .expect("lock poisoned")
            .insert(name.to_string(), value.clone());
        Ok(())
    }

    fn delete_ref(&self, name: &str) -> Result<bool> {
        Ok(self
            .refs
            .write()
            .expect("lock poisoned")
            .remove(name)
            .is_some())
    }

    fn list_refs(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .refs
            .read()
            .expect("lock poisoned")
            .keys()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .collect())
    }
}
