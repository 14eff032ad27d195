use extract::ExtractionResult;
use std::collections::HashMap;
use std::sync::Mutex;

/// Lifecycle of one extraction attempt for one file.
#[derive(Debug, Clone)]
pub enum ExtractionState {
    Idle,
    Extracting,
    Succeeded(ExtractionResult),
    Failed(String),
}

impl ExtractionState {
    pub fn is_extracting(&self) -> bool {
        matches!(self, ExtractionState::Extracting)
    }
}

/// Per-file-id extraction states, updated only through the transition
/// functions below. Entries are created on the first `begin` for an id and
/// removed by `discard`; a completion whose entry is gone (the file was
/// removed while the call was in flight) is dropped instead of applied.
#[derive(Default)]
pub struct StateStore {
    entries: Mutex<HashMap<String, ExtractionState>>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state for a file id; `Idle` when no attempt was ever started.
    pub fn get(&self, file_id: &str) -> ExtractionState {
        self.entries
            .lock()
            .unwrap()
            .get(file_id)
            .cloned()
            .unwrap_or(ExtractionState::Idle)
    }

    pub fn is_extracting(&self, file_id: &str) -> bool {
        self.get(file_id).is_extracting()
    }

    /// Start an attempt: any settled state resets to `Extracting`.
    /// Returns false (and changes nothing) if an attempt is already in flight.
    pub fn begin(&self, file_id: &str) -> bool {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(file_id) {
            Some(ExtractionState::Extracting) => false,
            _ => {
                entries.insert(file_id.to_string(), ExtractionState::Extracting);
                true
            }
        }
    }

    /// Settle the in-flight attempt for `file_id` with its result.
    /// Returns whether the transition was applied.
    pub fn complete(&self, file_id: &str, result: ExtractionResult) -> bool {
        self.settle(file_id, ExtractionState::Succeeded(result))
    }

    /// Settle the in-flight attempt for `file_id` with an error message.
    pub fn fail(&self, file_id: &str, message: impl Into<String>) -> bool {
        self.settle(file_id, ExtractionState::Failed(message.into()))
    }

    /// Drop the entry for a file id entirely.
    pub fn discard(&self, file_id: &str) {
        self.entries.lock().unwrap().remove(file_id);
    }

    fn settle(&self, file_id: &str, next: ExtractionState) -> bool {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(file_id) {
            Some(ExtractionState::Extracting) => {
                entries.insert(file_id.to_string(), next);
                true
            }
            Some(_) => {
                tracing::debug!(file_id, "completion for an attempt that was already settled");
                false
            }
            None => {
                tracing::debug!(file_id, "discarding completion for a removed file");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extract::Character;

    fn result_with(name: &str) -> ExtractionResult {
        ExtractionResult {
            characters: vec![Character {
                name: name.to_string(),
                description: "someone".to_string(),
                traits: vec![],
            }],
        }
    }

    #[test]
    fn unknown_id_is_idle() {
        let store = StateStore::new();
        assert!(matches!(store.get("f1"), ExtractionState::Idle));
    }

    #[test]
    fn begin_then_complete() {
        let store = StateStore::new();
        assert!(store.begin("f1"));
        assert!(store.is_extracting("f1"));

        assert!(store.complete("f1", result_with("Ahab")));
        match store.get("f1") {
            ExtractionState::Succeeded(r) => assert_eq!(r.characters[0].name, "Ahab"),
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn begin_is_rejected_while_in_flight() {
        let store = StateStore::new();
        assert!(store.begin("f1"));
        assert!(!store.begin("f1"));
    }

    #[test]
    fn settled_states_reset_on_next_begin() {
        let store = StateStore::new();
        store.begin("f1");
        store.fail("f1", "boom");
        assert!(matches!(store.get("f1"), ExtractionState::Failed(_)));

        assert!(store.begin("f1"));
        assert!(store.is_extracting("f1"));
    }

    #[test]
    fn completion_after_discard_is_dropped() {
        let store = StateStore::new();
        store.begin("f1");
        store.discard("f1");

        assert!(!store.complete("f1", result_with("ghost")));
        assert!(matches!(store.get("f1"), ExtractionState::Idle));
    }

    #[test]
    fn late_completion_does_not_overwrite_settled_state() {
        let store = StateStore::new();
        store.begin("f1");
        store.complete("f1", result_with("Ahab"));

        assert!(!store.fail("f1", "late error"));
        assert!(matches!(store.get("f1"), ExtractionState::Succeeded(_)));
    }

    #[test]
    fn entries_are_independent_per_id() {
        let store = StateStore::new();
        store.begin("a");
        store.begin("b");
        store.fail("a", "boom");

        assert!(matches!(store.get("a"), ExtractionState::Failed(_)));
        assert!(store.is_extracting("b"));
    }
}
