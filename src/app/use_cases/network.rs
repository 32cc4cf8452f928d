//! Use-Case: Netzwerk-weite Operationen aus dem Panel (Unterteilen, Vereinfachen, …).
//!
//! Jede Operation ist eine diskrete Aktion mit eigenem Undo-Eintrag.

use crate::app::events::ManipulationMode;
use crate::app::SessionState;
use crate::core::{SplineNetwork, SplineSettings};

/// Unterteilt alle Kurven; optional anschließend Boden-Snap.
pub fn subdivide(state: &mut SessionState) {
    if state.network.curve_count() == 0 {
        log::debug!("Unterteilen: keine Kurven vorhanden");
        return;
    }
    let probe = if state.network.settings.auto_snap_on_subdivide {
        state.host.ground_probe.take()
    } else {
        None
    };
    let (added, snapped) = state.edit_discrete("Subdivide", |network| {
        let added = network.subdivide();
        let snapped = probe
            .as_deref()
            .map_or(0, |probe| network.snap_to_ground(probe));
        (added, snapped)
    });
    if probe.is_some() {
        state.host.ground_probe = probe;
    }
    state.selection.purge_stale(&state.network);
    log::info!("{} Node(s) eingefügt, {} auf Boden gesetzt", added, snapped);
}

/// Vereinfacht Node-Ketten mit den eingestellten Parametern.
pub fn simplify(state: &mut SessionState) {
    let scale_y = state.network.settings.simplify_scale;
    let epsilon = state.network.settings.simplify_epsilon;
    let mut simplified = SplineNetwork::clone(&state.network);
    let removed = simplified.simplify(scale_y, epsilon);
    if removed == 0 {
        log::debug!("Vereinfachen: keine Node entfernbar");
        return;
    }
    state.edit_discrete("Simplify", |network| *network = simplified);
    state.selection.purge_stale(&state.network);
    log::info!("Vereinfachen: {} Node(s) entfernt", removed);
}

/// Glättet alle Tangenten mit der eingestellten Stärke.
pub fn smooth(state: &mut SessionState) {
    let strength = state.network.settings.smooth_strength;
    state.edit_discrete("Smooth", |network| network.smooth(strength));
    log::info!("Netzwerk geglättet (Stärke {:.2})", strength);
}

/// Entfernt alle Nodes und Kurven.
pub fn clear_all(state: &mut SessionState) {
    if state.network.node_count() == 0 {
        return;
    }
    state.edit_discrete("Remove All", |network| network.remove_all_nodes());
    state.selection.clear();
    state.selection.mode = ManipulationMode::Node;
    log::info!("Alle Nodes entfernt");
}

/// Setzt alle Nodes über die Boden-Abfrage des Hosts auf den Boden.
pub fn snap_to_ground(state: &mut SessionState) {
    let Some(probe) = state.host.ground_probe.take() else {
        log::debug!("Boden-Snap: keine Boden-Abfrage verfügbar");
        return;
    };
    let snapped = state.edit_discrete("Snap To Ground", |network| {
        network.snap_to_ground(&*probe)
    });
    state.host.ground_probe = Some(probe);
    log::info!("{} Node(s) auf Boden gesetzt", snapped);
}

/// Übernimmt neue Einstellungen (Werte werden in ihre Bereiche geklemmt).
pub fn apply_settings(state: &mut SessionState, settings: SplineSettings) {
    let settings = settings.clamped();
    if state.network.settings == settings {
        return;
    }
    state.edit_discrete("Settings Changed", |network| {
        network.settings = settings;
        network.mark_dirty();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GroundProbe;
    use glam::Vec3;
    use std::sync::Arc;

    struct FlatGround(f32);

    impl GroundProbe for FlatGround {
        fn ground_point(&self, position: Vec3) -> Option<Vec3> {
            Some(Vec3::new(position.x, self.0, position.z))
        }
    }

    fn line_state() -> SessionState {
        let mut state = SessionState::new();
        let network = Arc::make_mut(&mut state.network);
        let a = network.add_node(Vec3::new(0.0, 3.0, 0.0));
        let b = network.add_node(Vec3::new(8.0, 3.0, 0.0));
        network.connect(a, b);
        state
    }

    #[test]
    fn subdivide_with_auto_snap_keeps_probe() {
        let mut state = line_state();
        Arc::make_mut(&mut state.network).settings.auto_snap_on_subdivide = true;
        state.host.ground_probe = Some(Box::new(FlatGround(1.0)));

        subdivide(&mut state);

        assert_eq!(state.node_count(), 3);
        assert!(state.network.nodes().all(|n| n.position.y == 1.0));
        assert!(state.host.ground_probe.is_some());
        assert_eq!(state.history.undo_len(), 1);
    }

    #[test]
    fn subdivide_drops_replaced_tangent_curve() {
        let mut state = line_state();
        let curve = state.network.curves().next().map(|c| c.id);
        let end_node = state.network.node_ids().last();
        state.selection.selected_node_ids.extend(end_node);
        state.selection.selected_curve = curve;
        state.selection.mode = ManipulationMode::EndTangent;

        subdivide(&mut state);

        assert_eq!(state.curve_count(), 2);
        assert_eq!(state.selection.selected_curve, None);
        assert_eq!(state.selection.mode, ManipulationMode::Node);
        assert_eq!(state.selection.node_ids(), end_node.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn simplify_without_removable_nodes_records_nothing() {
        let mut state = line_state();
        simplify(&mut state);
        assert!(!state.can_undo());

        subdivide(&mut state);
        simplify(&mut state);
        assert_eq!(state.node_count(), 2);
        assert_eq!(state.history.undo_label(), Some("Simplify"));
    }

    #[test]
    fn snap_without_probe_is_noop() {
        let mut state = line_state();
        snap_to_ground(&mut state);
        assert!(!state.can_undo());
    }

    #[test]
    fn clear_all_empties_selection() {
        let mut state = line_state();
        state.selection.selected_node_ids.extend(state.network.node_ids());
        clear_all(&mut state);
        assert_eq!(state.node_count(), 0);
        assert_eq!(state.curve_count(), 0);
        assert!(state.selection.is_empty());
    }

    #[test]
    fn settings_are_clamped_and_undoable() {
        let mut state = line_state();
        let mut settings = SplineSettings::default();
        settings.smooth_strength = 4.0;
        apply_settings(&mut state, settings);
        assert_eq!(state.network.settings.smooth_strength, 1.0);
        assert_eq!(state.history.undo_label(), Some("Settings Changed"));

        let unchanged = state.network.settings.clone();
        apply_settings(&mut state, unchanged);
        assert_eq!(state.history.undo_len(), 1);
    }
}
