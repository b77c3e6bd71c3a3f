use std::collections::HashSet;
use std::sync::Mutex;

/// Canonical domain names already emitted during this run, shared by every
/// batch worker.
#[derive(Debug, Default)]
pub struct ProcessedTargets {
    seen: Mutex<HashSet<String>>,
}

impl ProcessedTargets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `domain` and returns `true` only the first time it is seen.
    pub fn set_add(&self, domain: &str) -> bool {
        let mut seen = self.seen.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if seen.contains(domain) {
            tracing::info!("target {} was processed before", domain);
            return false;
        }
        seen.insert(domain.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
