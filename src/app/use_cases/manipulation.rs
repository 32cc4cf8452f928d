//! Use-Case: Handle-Manipulation (Verschieben, Tangenten, Up-Vektoren, Skalierung).
//!
//! Alle Funktionen mutieren über [`SessionState::edit`], sodass sämtliche
//! Handle-Bewegungen einer Geste in genau einer Transaktion landen.

use crate::app::events::ManipulationMode;
use crate::app::state::DragAnchor;
use crate::app::SessionState;
use crate::core::{CurveEnd, NodeId};
use glam::Vec3;

/// Verschiebt die Selektion starr, sodass ihr Schwerpunkt auf `handle` liegt.
///
/// Ausgangspositionen und Schwerpunkt werden beim ersten Handle-Move einer
/// Geste festgehalten; ohne Geste gelten die aktuellen Positionen.
pub fn move_selection(state: &mut SessionState, handle: Vec3) {
    let anchor = match state.gesture.as_ref().and_then(|g| g.drag_anchor.clone()) {
        Some(anchor) => anchor,
        None => {
            let Some(anchor) = capture_anchor(state) else {
                return;
            };
            if let Some(gesture) = state.gesture.as_mut() {
                gesture.drag_anchor = Some(anchor.clone());
            }
            anchor
        }
    };

    let offset = handle - anchor.centroid;
    let targets: Vec<(NodeId, Vec3)> = anchor
        .positions
        .iter()
        .filter(|(id, origin)| {
            state
                .network
                .node(*id)
                .is_some_and(|node| node.position != *origin + offset)
        })
        .map(|(id, origin)| (*id, *origin + offset))
        .collect();
    if targets.is_empty() {
        return;
    }

    state.edit("Nodes Moved", |network| {
        for (id, position) in &targets {
            network.set_node_position(*id, *position);
        }
    });
}

fn capture_anchor(state: &SessionState) -> Option<DragAnchor> {
    let positions: Vec<(NodeId, Vec3)> = state
        .selection
        .selected_node_ids
        .iter()
        .filter_map(|id| state.network.node(*id).map(|n| (*id, n.position)))
        .collect();
    if positions.is_empty() {
        return None;
    }
    let sum = positions.iter().fold(Vec3::ZERO, |acc, (_, p)| acc + *p);
    Some(DragAnchor {
        centroid: sum / positions.len() as f32,
        positions,
    })
}

/// Setzt den Tangentenpunkt der gewählten Kurve auf `handle`.
pub fn move_tangent(state: &mut SessionState, handle: Vec3) {
    let end = match state.selection.mode {
        ManipulationMode::StartTangent => CurveEnd::Start,
        ManipulationMode::EndTangent => CurveEnd::End,
        _ => return,
    };
    let Some(curve_id) = state.selection.selected_curve else {
        log::debug!("Tangente: keine Kurve gewählt");
        return;
    };
    let Some(curve) = state.network.curve(curve_id) else {
        log::warn!("Tangente: Kurve {} existiert nicht mehr", curve_id);
        return;
    };
    if curve.tangent(end) == handle {
        return;
    }
    let label = match end {
        CurveEnd::Start => "Start Tangent Moved",
        CurveEnd::End => "End Tangent Moved",
    };
    state.edit(label, |network| {
        network.set_curve_tangent(curve_id, end, handle);
    });
}

/// Richtet die Up-Vektoren aller selektierten Nodes auf `handle` aus.
pub fn aim_up(state: &mut SessionState, handle: Vec3) {
    let targets: Vec<(NodeId, Vec3)> = state
        .selection
        .selected_node_ids
        .iter()
        .filter_map(|id| state.network.node(*id).map(|n| (*id, n)))
        .filter_map(|(id, node)| {
            let up = (handle - node.position).try_normalize()?;
            (up != node.up).then_some((id, up))
        })
        .collect();
    if targets.is_empty() {
        return;
    }
    state.edit("Up Moved", |network| {
        for (id, up) in &targets {
            network.set_node_up(*id, *up);
        }
    });
}

/// Setzt die Skalierung der Selektion auf 1 zurück (Beginn einer Skalier-Geste).
pub fn reset_scale(state: &mut SessionState) {
    scale_selection(state, Vec3::ONE);
}

/// Setzt die Skalierung aller selektierten Nodes.
pub fn scale_selection(state: &mut SessionState, scale: Vec3) {
    let targets: Vec<NodeId> = state
        .selection
        .selected_node_ids
        .iter()
        .copied()
        .filter(|id| state.network.node(*id).is_some_and(|n| n.scale != scale))
        .collect();
    if targets.is_empty() {
        return;
    }
    state.edit("Node Scale Changed", |network| {
        for id in &targets {
            network.set_node_scale(*id, scale);
        }
    });
}
