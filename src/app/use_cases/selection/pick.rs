//! Use-Case: Nodes, Tangenten, Up-Handles und Vertex-Marker selektieren.

use crate::app::events::ManipulationMode;
use crate::app::SessionState;
use crate::core::{CurveEnd, CurveId, NodeId};

/// Selektiert einen Node.
///
/// Additiv wird der Node angehängt und der Modus bleibt erhalten; sonst
/// ersetzt er die Selektion und der Modus fällt auf `Node` zurück.
pub fn select_node(state: &mut SessionState, node_id: NodeId, additive: bool) {
    if !state.network.contains_node(node_id) {
        log::warn!("Selektion: Node {} existiert nicht", node_id);
        return;
    }
    state.selection.selected_vertex = None;
    if additive {
        state.selection.selected_node_ids.insert(node_id);
    } else {
        state.selection.select_only(node_id);
        state.selection.mode = ManipulationMode::Node;
    }
    log::debug!(
        "Node {} selektiert ({} gesamt)",
        node_id,
        state.selection.selected_node_ids.len()
    );
}

/// Reduziert die Selektion auf einen bereits selektierten Node.
pub fn collapse_selection(state: &mut SessionState, node_id: NodeId) {
    if !state.network.contains_node(node_id) {
        return;
    }
    state.selection.select_only(node_id);
    state.selection.mode = ManipulationMode::Node;
}

/// Wählt das Tangenten-Handle einer Kurve.
///
/// Die Node-Selektion bleibt bestehen; ungültige Kurven werden ignoriert.
pub fn select_tangent(state: &mut SessionState, curve_id: CurveId, end: CurveEnd) {
    if !state.network.contains_curve(curve_id) {
        log::warn!("Selektion: Kurve {} existiert nicht", curve_id);
        return;
    }
    state.selection.selected_vertex = None;
    state.selection.selected_curve = Some(curve_id);
    state.selection.mode = ManipulationMode::for_tangent(end);
}

/// Wählt das Up-Handle eines Nodes (additiv: zusätzlich zur Selektion).
pub fn select_up_handle(state: &mut SessionState, node_id: NodeId, additive: bool) {
    if !state.network.contains_node(node_id) {
        return;
    }
    if !additive {
        state.selection.clear();
    }
    state.selection.selected_node_ids.insert(node_id);
    state.selection.mode = ManipulationMode::Up;
}

/// Wählt einen Vertex-Marker. Solange er gewählt ist, löscht Delete nichts.
pub fn select_vertex(state: &mut SessionState, index: usize) {
    state.selection.selected_vertex = Some(index);
}

/// Selektiert alle Nodes in Netzwerk-Reihenfolge.
pub fn select_all(state: &mut SessionState) {
    state.selection.clear();
    if matches!(
        state.selection.mode,
        ManipulationMode::StartTangent | ManipulationMode::EndTangent
    ) {
        state.selection.mode = ManipulationMode::Node;
    }
    state
        .selection
        .selected_node_ids
        .extend(state.network.node_ids());
    log::info!("{} Nodes selektiert", state.selection.selected_node_ids.len());
}
