//! Use-Case: Selektierte Nodes löschen (inkl. aller betroffenen Kurven).

use crate::app::events::ManipulationMode;
use crate::app::SessionState;
use crate::core::NodeId;

/// Löscht alle selektierten Nodes, die noch existieren, in einer Transaktion.
///
/// Ist ein Vertex-Marker gewählt, wird die Taste ohne Änderung verbraucht.
/// Danach ist der letzte verbliebene Node selektiert (oder nichts).
pub fn delete_selected_nodes(state: &mut SessionState) {
    if let Some(vertex) = state.selection.selected_vertex {
        log::debug!("Vertex {} gewählt, Löschen ignoriert", vertex);
        return;
    }
    let valid: Vec<NodeId> = state
        .selection
        .selected_node_ids
        .iter()
        .copied()
        .filter(|id| state.network.contains_node(*id))
        .collect();
    if valid.is_empty() {
        log::debug!("Nichts zum Löschen selektiert");
        return;
    }

    let removed = state.edit_discrete("Remove Node", |network| network.remove_nodes(&valid));

    match state.network.last_node_id() {
        Some(last) => state.selection.select_only(last),
        None => state.selection.clear(),
    }
    if matches!(
        state.selection.mode,
        ManipulationMode::StartTangent | ManipulationMode::EndTangent
    ) {
        state.selection.mode = ManipulationMode::Node;
    }
    log::info!("{} Node(s) gelöscht", removed);
}
