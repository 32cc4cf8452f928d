//! Use-Case: Undo/Redo und Revalidierung nach externem Zustandswechsel.

use crate::app::events::SessionNotification;
use crate::app::SessionState;
use crate::core::SplineNetwork;
use std::sync::Arc;

/// Macht den letzten Undo-Eintrag rückgängig. Eine offene Transaktion wird
/// vorher versiegelt, sodass sie selbst rückgängig gemacht wird.
pub fn undo(state: &mut SessionState) {
    state.gesture = None;
    state.commit_pending();
    let current = Arc::clone(&state.network);
    let Some(snapshot) = state.history.pop_undo_with_current(current) else {
        log::debug!("Undo: nichts rückgängig zu machen");
        return;
    };
    log::info!("Undo '{}'", snapshot.label);
    state.restore(snapshot);
    revalidate(state);
}

/// Stellt den zuletzt rückgängig gemachten Eintrag wieder her.
pub fn redo(state: &mut SessionState) {
    state.gesture = None;
    state.commit_pending();
    let current = Arc::clone(&state.network);
    let Some(snapshot) = state.history.pop_redo_with_current(current) else {
        log::debug!("Redo: nichts wiederherzustellen");
        return;
    };
    log::info!("Redo '{}'", snapshot.label);
    state.restore(snapshot);
    revalidate(state);
}

/// Übernimmt ein vom Host per eigenem Undo/Redo ersetztes Netzwerk.
///
/// Eine offene Transaktion wird verworfen, da ihr Ausgangszustand nicht mehr gilt.
pub fn undo_redo_performed(state: &mut SessionState, network: Arc<SplineNetwork>) {
    if state.transaction.abandon() {
        log::warn!("Offene Transaktion durch externes Undo/Redo verworfen");
    }
    state.gesture = None;
    state.replace_network(network);
    revalidate(state);
}

/// Bereinigt Selektion und Sub-Editor nach einem Zustandswechsel.
fn revalidate(state: &mut SessionState) {
    state.selection.purge_stale(&state.network);
    state.selection.selected_vertex = None;
    state.extension_host.release();
    let network = Arc::make_mut(&mut state.network);
    network.extensions_mut().deselect_all();
    network.resync_curve_anchors();
    network.mark_dirty();
    state.notify(SessionNotification::UndoRedoApplied);
}
