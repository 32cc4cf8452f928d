//! Session-State: expliziter Kontext, der an jede Operation übergeben wird.

use super::events::SessionNotification;
use super::extensions::{EditorFactory, ExtensionEditorHost};
use super::history::{EditHistory, Snapshot};
use super::host::HostServices;
use super::selection::SelectionState;
use super::transaction::{GestureId, TransactionCoalescer};
use super::CommandLog;
use crate::core::{NodeId, SplineNetwork};
use crate::shared::EditorOptions;
use glam::{Vec2, Vec3};
use std::sync::Arc;

/// Zustand der Handle-Manipulation zu Beginn eines Drags.
#[derive(Debug, Clone, Default)]
pub struct DragAnchor {
    /// Schwerpunkt der Selektion bei Drag-Beginn
    pub centroid: Vec3,
    /// Ausgangspositionen der selektierten Nodes
    pub positions: Vec<(NodeId, Vec3)>,
}

/// Eine laufende Zeiger-Geste (PointerDown bis PointerUp).
#[derive(Debug, Clone)]
pub struct Gesture {
    /// Gesten-ID für die Transaktions-Bündelung
    pub id: GestureId,
    /// Zeigerposition beim Drücken
    pub start_screen_pos: Vec2,
    /// Ausgangslage für starres Verschieben (lazy beim ersten Handle-Move)
    pub drag_anchor: Option<DragAnchor>,
}

/// Gesamter Zustand einer Editier-Session.
pub struct SessionState {
    /// Bearbeitetes Netzwerk (Arc für O(1)-Snapshots)
    pub network: Arc<SplineNetwork>,
    /// Selektion und Manipulationsmodus
    pub selection: SelectionState,
    /// Laufende Geste
    pub gesture: Option<Gesture>,
    /// Gesten-Transaktionen
    pub transaction: TransactionCoalescer,
    /// Undo/Redo-Historie
    pub history: EditHistory,
    /// Offener Sub-Editor der selektierten Extension
    pub extension_host: ExtensionEditorHost,
    /// Host-Dienste (Raycast, Boden)
    pub host: HostServices,
    /// Laufzeit-Optionen
    pub options: EditorOptions,
    /// Ausgeführte Commands
    pub command_log: CommandLog,
    notifications: Vec<SessionNotification>,
}

impl SessionState {
    /// Erstellt eine Session mit leerem Netzwerk und Standard-Optionen.
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    /// Erstellt eine Session mit leerem Netzwerk (Einstellungen aus den Optionen).
    pub fn with_options(options: EditorOptions) -> Self {
        let network = SplineNetwork::new(options.default_spline_settings.clone());
        Self {
            network: Arc::new(network),
            selection: SelectionState::new(),
            gesture: None,
            transaction: TransactionCoalescer::new(),
            history: EditHistory::new_with_capacity(options.undo_depth),
            extension_host: ExtensionEditorHost::default(),
            host: HostServices::default(),
            options,
            command_log: CommandLog::new(),
            notifications: Vec::new(),
        }
    }

    /// Setzt die Editor-Factory für Extension-Editoren.
    pub fn set_editor_factory(&mut self, factory: EditorFactory) {
        self.extension_host.release();
        self.extension_host = ExtensionEditorHost::new(factory);
    }

    /// Hängt ein Netzwerk an die Session; der Editor des zuletzt selektierten
    /// Extension-Eintrags wird wiederhergestellt.
    pub fn attach_network(&mut self, network: Arc<SplineNetwork>) {
        self.extension_host.release();
        self.network = network;
        self.selection.clear();
        self.gesture = None;
        self.transaction = TransactionCoalescer::new();
        self.history = EditHistory::new_with_capacity(self.options.undo_depth);
        let list = self.network.extensions();
        if let Some(entry) = list.selected_index().and_then(|i| list.get(i)) {
            self.extension_host.open(entry);
        }
    }

    /// Anzahl der Nodes
    pub fn node_count(&self) -> usize {
        self.network.node_count()
    }

    /// Anzahl der Kurven
    pub fn curve_count(&self) -> usize {
        self.network.curve_count()
    }

    /// Prüft ob Undo möglich ist
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Prüft ob Redo möglich ist
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Holt alle seit dem letzten Aufruf angefallenen Benachrichtigungen ab.
    pub fn take_notifications(&mut self) -> Vec<SessionNotification> {
        std::mem::take(&mut self.notifications)
    }

    /// Liest das Dirty-Flag des Netzwerks und setzt es zurück (Host-Redraw).
    ///
    /// Das Zurücksetzen klont das Netzwerk nicht, solange kein Snapshot darauf zeigt.
    pub fn take_dirty(&mut self) -> bool {
        if !self.network.is_dirty() {
            return false;
        }
        Arc::make_mut(&mut self.network).take_dirty()
    }

    pub(crate) fn notify(&mut self, notification: SessionNotification) {
        self.notifications.push(notification);
    }

    /// Führt eine Mutation innerhalb der Transaktion der laufenden Geste aus.
    ///
    /// Während einer Geste verschmelzen alle Mutationen zu einer Transaktion,
    /// die erst beim Gestenende versiegelt wird. Ohne Geste ist die Mutation
    /// eine diskrete Aktion mit eigenem Undo-Eintrag.
    pub(crate) fn edit<R>(&mut self, label: &str, mutate: impl FnOnce(&mut SplineNetwork) -> R) -> R {
        let gesture = self.gesture.as_ref().map(|g| g.id);
        self.edit_in(label, gesture, mutate)
    }

    /// Führt eine diskrete Mutation mit eigenem Undo-Eintrag aus (Tastatur, Panels).
    ///
    /// Eine offene Gesten-Transaktion wird vorher versiegelt.
    pub(crate) fn edit_discrete<R>(
        &mut self,
        label: &str,
        mutate: impl FnOnce(&mut SplineNetwork) -> R,
    ) -> R {
        self.edit_in(label, None, mutate)
    }

    fn edit_in<R>(
        &mut self,
        label: &str,
        gesture: Option<GestureId>,
        mutate: impl FnOnce(&mut SplineNetwork) -> R,
    ) -> R {
        if gesture.is_none() {
            self.commit_pending();
        }
        let opened = self.transaction.begin(label, gesture, &self.network);
        debug_assert!(opened.is_ok(), "{:?}", opened);
        if let Err(e) = opened {
            log::error!("{}", e);
            self.commit_pending();
            if let Err(e) = self.transaction.begin(label, gesture, &self.network) {
                log::error!("{}", e);
            }
        }
        let result = mutate(Arc::make_mut(&mut self.network));
        if gesture.is_none() {
            self.commit_pending();
        }
        result
    }

    /// Versiegelt die offene Transaktion (falls vorhanden).
    pub(crate) fn commit_pending(&mut self) -> bool {
        if !self.transaction.is_open() {
            return false;
        }
        match self.transaction.commit(&mut self.history) {
            Ok(label) => {
                log::info!("Undo-Schritt '{}' erfasst", label);
                true
            }
            Err(e) => {
                log::error!("{}", e);
                false
            }
        }
    }

    /// Stellt einen Snapshot wieder her (Undo/Redo).
    pub(crate) fn restore(&mut self, snapshot: Snapshot) {
        self.replace_network(snapshot.network);
    }

    /// Tauscht das Netzwerk aus, ohne bereits vergebene IDs wieder freizugeben.
    pub(crate) fn replace_network(&mut self, network: Arc<SplineNetwork>) {
        let outgoing = std::mem::replace(&mut self.network, network);
        Arc::make_mut(&mut self.network).advance_ids_past(&outgoing);
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
