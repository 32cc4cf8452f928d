use crate::core::SplineNetwork;
use std::sync::Arc;

/// Snapshot des Netzwerks vor einer Transaktion.
///
/// Nutzt Arc-Clone (Copy-on-Write): Das Erstellen eines Snapshots ist O(1),
/// der eigentliche Klon passiert erst beim nächsten `Arc::make_mut()`.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Netzwerk-Zustand (Arc-Klon für O(1)-Snapshot)
    pub network: Arc<SplineNetwork>,
    /// Beschriftung der Transaktion (z.B. "Nodes Moved")
    pub label: String,
}

impl Snapshot {
    /// Erstellt einen O(1)-Snapshot durch Arc-Clone statt Deep-Clone.
    pub fn new(network: &Arc<SplineNetwork>, label: impl Into<String>) -> Self {
        Self {
            network: Arc::clone(network),
            label: label.into(),
        }
    }
}

/// Einfacher Undo/Redo-Manager mit Snapshotting.
#[derive(Debug, Default)]
pub struct EditHistory {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    max_depth: usize,
}

impl EditHistory {
    /// Erstellt einen neuen History-Manager mit maximaler Tiefe.
    pub fn new_with_capacity(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth),
            redo_stack: Vec::with_capacity(max_depth),
            max_depth,
        }
    }

    /// Legt einen fertigen Snapshot auf den Undo-Stack und leert den Redo-Stack.
    pub fn record_snapshot(&mut self, snap: Snapshot) {
        if self.max_depth == 0 {
            return;
        }
        if self.undo_stack.len() >= self.max_depth {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(snap);
        self.redo_stack.clear();
    }

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Prüft ob Redo möglich ist.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Anzahl der Undo-Einträge
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Beschriftung des obersten Undo-Eintrags
    pub fn undo_label(&self) -> Option<&str> {
        self.undo_stack.last().map(|s| s.label.as_str())
    }

    /// Pop undo stack and push `current` onto redo stack; returns the snapshot to apply.
    pub fn pop_undo_with_current(&mut self, current: Arc<SplineNetwork>) -> Option<Snapshot> {
        let prev = self.undo_stack.pop()?;
        if self.redo_stack.len() >= self.max_depth {
            self.redo_stack.remove(0);
        }
        self.redo_stack.push(Snapshot::new(&current, prev.label.clone()));
        Some(prev)
    }

    /// Pop redo stack and push `current` onto undo stack; returns the snapshot to apply.
    pub fn pop_redo_with_current(&mut self, current: Arc<SplineNetwork>) -> Option<Snapshot> {
        let next = self.redo_stack.pop()?;
        if self.undo_stack.len() >= self.max_depth {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(Snapshot::new(&current, next.label.clone()));
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn network_with_node_count(count: usize) -> Arc<SplineNetwork> {
        let mut network = SplineNetwork::default();
        for i in 0..count {
            network.add_node(Vec3::new(i as f32 * 10.0, 0.0, i as f32 * 7.0));
        }
        Arc::new(network)
    }

    fn snapshot_with_node_count(count: usize) -> Snapshot {
        Snapshot::new(&network_with_node_count(count), "Test")
    }

    #[test]
    fn empty_history_cannot_undo_or_redo() {
        let history = EditHistory::new_with_capacity(10);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_restores_previous_snapshot() {
        let mut history = EditHistory::new_with_capacity(10);
        history.record_snapshot(snapshot_with_node_count(2));

        let restored = history
            .pop_undo_with_current(network_with_node_count(5))
            .expect("undo vorhanden");

        assert_eq!(restored.network.node_count(), 2);
        assert!(!history.can_undo());
        assert!(history.can_redo());
    }

    #[test]
    fn redo_restores_undone_snapshot() {
        let mut history = EditHistory::new_with_capacity(10);
        history.record_snapshot(snapshot_with_node_count(2));
        let _restored = history.pop_undo_with_current(network_with_node_count(5));

        let redone = history
            .pop_redo_with_current(network_with_node_count(2))
            .expect("redo vorhanden");

        assert_eq!(redone.network.node_count(), 5);
        assert_eq!(redone.label, "Test");
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn new_record_clears_redo_stack() {
        let mut history = EditHistory::new_with_capacity(10);
        history.record_snapshot(snapshot_with_node_count(1));
        let _restored = history.pop_undo_with_current(network_with_node_count(3));
        assert!(history.can_redo());

        history.record_snapshot(snapshot_with_node_count(7));
        assert!(!history.can_redo());
    }

    #[test]
    fn respects_max_depth() {
        let mut history = EditHistory::new_with_capacity(3);
        for i in 1..=5 {
            history.record_snapshot(snapshot_with_node_count(i));
        }

        // Nur 3 Undo-Schritte sollten möglich sein
        let mut undo_count = 0;
        while history.can_undo() {
            history.pop_undo_with_current(network_with_node_count(99));
            undo_count += 1;
        }
        assert_eq!(undo_count, 3);
    }

    #[test]
    fn pop_on_empty_returns_none() {
        let mut history = EditHistory::new_with_capacity(10);
        assert!(history
            .pop_undo_with_current(network_with_node_count(1))
            .is_none());
        assert!(history
            .pop_redo_with_current(network_with_node_count(1))
            .is_none());
    }
}
