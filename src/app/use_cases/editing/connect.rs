//! Use-Case: Selektierte Nodes mit einem Ziel-Node verbinden.

use crate::app::SessionState;
use crate::core::NodeId;

/// Verbindet jeden selektierten Node mit `target` (eine Transaktion).
///
/// Bereits verbundene Paare bleiben unverändert. Die Selektion wird
/// nicht angefasst.
pub fn connect_selected_to(state: &mut SessionState, target: NodeId) {
    if !state.network.contains_node(target) {
        log::warn!("Verbinden: Ziel-Node {} existiert nicht", target);
        return;
    }
    let sources: Vec<NodeId> = state
        .selection
        .selected_node_ids
        .iter()
        .copied()
        .filter(|&id| id != target && state.network.contains_node(id))
        .filter(|&id| {
            state.network.settings.allow_multi_edges
                || state.network.curve_between(id, target).is_none()
        })
        .collect();
    if sources.is_empty() {
        log::debug!("Verbinden: nichts zu verbinden");
        return;
    }

    state.edit("Connect nodes", |network| {
        for &from_id in &sources {
            network.connect(from_id, target);
        }
    });
    log::info!("{} Node(s) mit Node {} verbunden", sources.len(), target);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::sync::Arc;

    #[test]
    fn connects_all_selected_nodes_once() {
        let mut state = SessionState::new();
        let network = Arc::make_mut(&mut state.network);
        let a = network.add_node(Vec3::ZERO);
        let b = network.add_node(Vec3::X);
        let target = network.add_node(Vec3::Z);
        state.selection.selected_node_ids.extend([a, b]);

        connect_selected_to(&mut state, target);
        connect_selected_to(&mut state, target);

        assert_eq!(state.curve_count(), 2);
        assert_eq!(state.history.undo_len(), 1);
        assert_eq!(state.selection.node_ids(), vec![a, b]);
    }

    #[test]
    fn missing_target_is_ignored() {
        let mut state = SessionState::new();
        state.selection.selected_node_ids.insert(1);
        connect_selected_to(&mut state, 42);
        assert!(!state.can_undo());
    }
}
