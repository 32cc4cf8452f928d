//! Use-Case: Neuen Node an einer Weltposition hinzufügen.

use crate::app::events::ManipulationMode;
use crate::app::SessionState;
use crate::core::NodeId;
use glam::Vec3;

/// Fügt einen neuen Node an der gegebenen Weltposition hinzu.
///
/// Jeder aktuell selektierte Node wird mit dem neuen Node verbunden.
/// Der neue Node wird anschließend als einziger selektiert.
pub fn add_node_at_position(state: &mut SessionState, world_pos: Vec3) {
    let sources: Vec<NodeId> = state
        .selection
        .selected_node_ids
        .iter()
        .copied()
        .filter(|id| state.network.contains_node(*id))
        .collect();

    let new_id = state.edit("Add Node(s)", |network| {
        let new_id = network.add_node(world_pos);
        for &from_id in &sources {
            network.connect(from_id, new_id);
        }
        new_id
    });

    state.selection.select_only(new_id);
    state.selection.mode = ManipulationMode::Node;

    log::info!(
        "Node {} an Position ({:.1}, {:.1}, {:.1}) hinzugefügt, {} Verbindung(en)",
        new_id,
        world_pos.x,
        world_pos.y,
        world_pos.z,
        sources.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_node_connects_from_every_selected_node() {
        let mut state = SessionState::new();
        add_node_at_position(&mut state, Vec3::ZERO);
        let first = state.selection.last_node().expect("Node selektiert");
        state.selection.selected_node_ids.insert(999);

        add_node_at_position(&mut state, Vec3::X);
        let second = state.selection.last_node().expect("Node selektiert");

        assert_eq!(state.node_count(), 2);
        assert_eq!(state.curve_count(), 1);
        assert!(state.network.curve_between(first, second).is_some());
        assert_eq!(state.selection.node_ids(), vec![second]);
        assert_eq!(state.history.undo_len(), 2);
    }
}
