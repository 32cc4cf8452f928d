//! Use-Case: Kamera auf die Selektion ausrichten.

use crate::app::events::SessionNotification;
use crate::app::SessionState;

/// Fordert beim Host eine Kamera-Fokussierung auf den Schwerpunkt der Selektion an.
pub fn frame_selection(state: &mut SessionState) {
    let ids = state.selection.node_ids();
    let Some(center) = state.network.centroid(&ids) else {
        log::debug!("Fokus: keine gültigen Nodes selektiert");
        return;
    };
    let extent = state.options.focus_extent;
    state.notify(SessionNotification::FrameRequested { center, extent });
}
