//! Use-Case: Lebenszyklus einer Zeiger-Geste.

use crate::app::events::SessionNotification;
use crate::app::state::Gesture;
use crate::app::SessionState;
use glam::Vec2;
use std::sync::Arc;

/// Startet eine neue Geste. Eine noch offene Geste (fehlendes PointerUp)
/// wird vorher versiegelt.
pub fn begin_gesture(state: &mut SessionState, screen_pos: Vec2) {
    if state.gesture.take().is_some() {
        log::debug!("Vorherige Geste ohne PointerUp beendet");
    }
    state.commit_pending();
    let id = state.transaction.next_gesture();
    state.gesture = Some(Gesture {
        id,
        start_screen_pos: screen_pos,
        drag_anchor: None,
    });
}

/// Beendet die laufende Geste und versiegelt ihre Transaktion.
///
/// Nur wenn die Zeiger-Verschiebung die Drag-Schwelle überschreitet und die
/// Geste etwas verändert hat, laufen Auto-Smooth und `EditFinished`.
pub fn end_gesture(state: &mut SessionState, screen_pos: Vec2) {
    let Some(gesture) = state.gesture.as_ref() else {
        log::debug!("PointerUp ohne laufende Geste");
        return;
    };
    let displacement_sq = gesture.start_screen_pos.distance_squared(screen_pos);
    let dragged = state.options.exceeds_drag_threshold(displacement_sq);
    let modified = state.transaction.open_gesture() == Some(gesture.id);

    if dragged && modified && state.network.settings.auto_smooth {
        state.edit("Auto Smooth", |network| {
            let strength = network.settings.smooth_strength;
            network.smooth(strength);
        });
    }

    state.gesture = None;
    state.commit_pending();

    if dragged && modified {
        finish_edit(state);
    }
}

/// Versiegelt eine offene Transaktion ohne Gestenende-Effekte (Fokusverlust).
pub fn commit_pending(state: &mut SessionState) {
    state.gesture = None;
    if state.commit_pending() {
        log::info!("Offene Transaktion bei Fokusverlust übernommen");
    }
}

/// Meldet eine abgeschlossene Bearbeitung an Host und aktive Extensions.
fn finish_edit(state: &mut SessionState) {
    state.notify(SessionNotification::EditFinished);
    let network = Arc::clone(&state.network);
    for extension in network.extensions().active_extensions() {
        extension.on_edit_finished(&network);
    }
    log::debug!("Bearbeitung abgeschlossen");
}
