//! Use-Case: Extension-Liste bearbeiten (mit höchstens einem offenen Sub-Editor).

use crate::app::events::SessionNotification;
use crate::app::SessionState;
use crate::core::SplineExtension;
use std::sync::Arc;

/// Hängt einen Eintrag an (`None` = leerer Slot) und selektiert ihn.
pub fn add_extension(state: &mut SessionState, extension: Option<Arc<dyn SplineExtension>>) {
    let index = state.edit_discrete("Add Extension", |network| {
        let list = network.extensions_mut();
        list.push(extension);
        let index = list.len() - 1;
        list.select(index);
        index
    });
    open_selected_editor(state, index);
    log::info!("Extension-Eintrag {} hinzugefügt", index);
}

/// Entfernt den Eintrag an `index`; danach ist der letzte verbliebene Eintrag selektiert.
pub fn remove_extension_at(state: &mut SessionState, index: usize) {
    if index >= state.network.extensions().len() {
        log::warn!("Extension-Index {} ungültig", index);
        return;
    }
    let selected = state.edit_discrete("Remove Extension", |network| {
        let list = network.extensions_mut();
        list.remove_at(index);
        let last = list.len().checked_sub(1)?;
        list.select(last);
        Some(last)
    });
    state.extension_host.release();
    if let Some(last) = selected {
        open_selected_editor(state, last);
    }
    log::info!("Extension-Eintrag {} entfernt", index);
}

/// Verschiebt einen Eintrag. Reine Reihenfolge-Änderung ohne Neuberechnung.
pub fn move_extension(state: &mut SessionState, from: usize, to: usize) {
    let len = state.network.extensions().len();
    if from >= len || to >= len {
        log::warn!("Extension verschieben: {} -> {} außerhalb der Liste", from, to);
        return;
    }
    if from == to {
        return;
    }
    state.edit_discrete("Move Extension", |network| {
        network.extensions_mut().move_entry(from, to);
    });
}

/// Selektiert einen Eintrag und öffnet dessen Sub-Editor.
///
/// Keine Undo-Aktion; der bisher offene Editor wird vorher freigegeben.
pub fn select_extension(state: &mut SessionState, index: usize) {
    let Some(entry) = state.network.extensions().get(index) else {
        log::warn!("Extension-Index {} ungültig", index);
        return;
    };
    if entry.is_selected && state.extension_host.live_entry() == Some(entry.id) {
        return;
    }
    Arc::make_mut(&mut state.network).extensions_mut().select(index);
    open_selected_editor(state, index);
}

/// Ersetzt die Extension eines Eintrags durch eine Kopie der Vorlage.
///
/// Alter Eintrag raus, neuer Eintrag an dieselbe Position, neuer Eintrag
/// selektiert; alles in einer Transaktion, sodass Undo den alten Eintrag
/// mit seiner ID zurückbringt.
pub fn replace_extension(
    state: &mut SessionState,
    index: usize,
    extension: Option<Arc<dyn SplineExtension>>,
) {
    if index >= state.network.extensions().len() {
        log::warn!("Extension-Index {} ungültig", index);
        return;
    }
    let copy = extension.map(|template| template.duplicate());
    state.edit_discrete("Replace Extension", |network| {
        let list = network.extensions_mut();
        list.remove_at(index);
        list.insert(index, copy);
        list.select(index);
    });
    open_selected_editor(state, index);
    log::info!("Extension-Eintrag {} ersetzt", index);
}

/// Setzt das Aktiv-Flag eines Eintrags.
pub fn set_extension_active(state: &mut SessionState, index: usize, active: bool) {
    match state.network.extensions().get(index) {
        Some(entry) if entry.is_active == active => {}
        Some(_) => {
            state.edit_discrete("Toggle Extension", |network| {
                network.extensions_mut().set_active(index, active);
            });
        }
        None => log::warn!("Extension-Index {} ungültig", index),
    }
}

/// Deselektiert alle Einträge und schließt den offenen Sub-Editor.
pub fn deselect_all_extensions(state: &mut SessionState) {
    state.extension_host.release();
    if state.network.extensions().selected_index().is_some() {
        Arc::make_mut(&mut state.network)
            .extensions_mut()
            .deselect_all();
    }
}

fn open_selected_editor(state: &mut SessionState, index: usize) {
    if let Some(entry) = state.network.extensions().get(index) {
        state.extension_host.open(entry);
        state.notify(SessionNotification::ExtensionSelected { index });
    }
}
