//! Selektionszustand der Editier-Session.

use super::events::{HostTool, ManipulationMode};
use crate::core::{CurveId, NodeId, SplineNetwork};
use indexmap::IndexSet;

/// Auswahlbezogener Session-Zustand.
///
/// Gehört der Session, nicht dem Netzwerk; muss nach jeder externen
/// Änderung des Netzwerks über [`SelectionState::purge_stale`] bereinigt werden.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    /// Geordnete HashSet für deterministische Selektionsreihenfolge ("zuletzt selektiert")
    pub selected_node_ids: IndexSet<NodeId>,
    /// Kurve, deren Tangente bearbeitet wird
    pub selected_curve: Option<CurveId>,
    /// Transienter Vertex-Marker (nicht löschbar)
    pub selected_vertex: Option<usize>,
    /// Aktueller Manipulationsmodus
    pub mode: ManipulationMode,
    /// Zuletzt gesehenes Host-Werkzeug
    pub host_tool: HostTool,
}

impl SelectionState {
    /// Erstellt einen leeren Selektionszustand (Modus Node).
    pub fn new() -> Self {
        Self::default()
    }

    /// Selektierte IDs in Selektionsreihenfolge
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.selected_node_ids.iter().copied().collect()
    }

    /// Zuletzt selektierter Node
    pub fn last_node(&self) -> Option<NodeId> {
        self.selected_node_ids.last().copied()
    }

    /// Prüft ob ein Node selektiert ist
    pub fn contains(&self, id: NodeId) -> bool {
        self.selected_node_ids.contains(&id)
    }

    /// Prüft ob nichts selektiert ist
    pub fn is_empty(&self) -> bool {
        self.selected_node_ids.is_empty()
    }

    /// Leert die Node-Selektion samt Kurve und Vertex.
    pub fn clear(&mut self) {
        self.selected_node_ids.clear();
        self.selected_curve = None;
        self.selected_vertex = None;
    }

    /// Ersetzt die Selektion durch genau einen Node.
    pub fn select_only(&mut self, id: NodeId) {
        self.clear();
        self.selected_node_ids.insert(id);
    }

    /// Entfernt IDs, die im Netzwerk nicht mehr existieren.
    ///
    /// Gibt die Anzahl verworfener Referenzen zurück (Node-IDs + Kurve).
    pub fn purge_stale(&mut self, network: &SplineNetwork) -> usize {
        let before = self.selected_node_ids.len();
        self.selected_node_ids.retain(|id| network.contains_node(*id));
        let mut dropped = before - self.selected_node_ids.len();
        if let Some(curve_id) = self.selected_curve {
            if !network.contains_curve(curve_id) {
                self.selected_curve = None;
                dropped += 1;
                if matches!(
                    self.mode,
                    ManipulationMode::StartTangent | ManipulationMode::EndTangent
                ) {
                    self.mode = ManipulationMode::Node;
                }
            }
        }
        if dropped > 0 {
            log::warn!("{} veraltete Selektions-Referenzen verworfen", dropped);
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn purge_drops_missing_nodes_and_curve() {
        let mut network = SplineNetwork::default();
        let a = network.add_node(Vec3::ZERO);
        let b = network.add_node(Vec3::X);
        let curve = network.connect(a, b).expect("Kurve erwartet");

        let mut selection = SelectionState::new();
        selection.selected_node_ids.insert(a);
        selection.selected_node_ids.insert(b);
        selection.selected_curve = Some(curve);
        selection.mode = ManipulationMode::EndTangent;

        network.remove_nodes(&[b]);
        assert_eq!(selection.purge_stale(&network), 2);
        assert_eq!(selection.node_ids(), vec![a]);
        assert_eq!(selection.selected_curve, None);
        assert_eq!(selection.mode, ManipulationMode::Node);
    }

    #[test]
    fn last_node_follows_insertion_order() {
        let mut selection = SelectionState::new();
        selection.selected_node_ids.insert(7);
        selection.selected_node_ids.insert(3);
        assert_eq!(selection.last_node(), Some(3));
        selection.select_only(9);
        assert_eq!(selection.node_ids(), vec![9]);
    }
}
