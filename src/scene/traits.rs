use std::sync::RwLock;

use crate::scene::snapshot::Snapshot;
use crate::scene::types::VisualElement;

/// Read-only view of the host tool's current page and selection.
///
/// The session asks for a fresh copy on every request instead of holding
/// references into host state, so implementations may change between calls.
pub trait SceneSource: Send + Sync {
    fn page_name(&self) -> String;

    fn selection(&self) -> Vec<VisualElement>;
}

/// Scene backed by a captured [`Snapshot`], swappable when the host reports
/// a new selection.
pub struct SnapshotScene {
    snapshot: RwLock<Snapshot>,
}

impl SnapshotScene {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
        }
    }

    pub fn replace(&self, snapshot: Snapshot) {
        let mut guard = match self.snapshot.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        tracing::debug!(elements = snapshot.selection.len(), "selection replaced");
        *guard = snapshot;
    }

    fn read<T>(&self, f: impl FnOnce(&Snapshot) -> T) -> T {
        match self.snapshot.read() {
            Ok(guard) => f(&*guard),
            Err(poisoned) => f(&*poisoned.into_inner()),
        }
    }
}

impl SceneSource for SnapshotScene {
    fn page_name(&self) -> String {
        self.read(|s| s.page_name.clone())
    }

    fn selection(&self) -> Vec<VisualElement> {
        self.read(|s| s.selection.clone())
    }
}
