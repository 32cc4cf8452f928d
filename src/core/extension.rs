//! Geordnete Liste von Extensions, die an einem Spline-Netzwerk hängen.
//!
//! Jeder Eintrag trägt eine (optionale) Extension-Instanz sowie die Flags
//! `is_active` und `is_selected`. Höchstens ein Eintrag ist selektiert.

use super::SplineNetwork;
use std::fmt;
use std::sync::Arc;

/// Stabile ID eines Extension-Eintrags.
pub type EntryId = u64;

/// Ein steckbares Verhaltensmodul am Netzwerk.
///
/// Instanzen werden über `Arc` geteilt; `duplicate()` erzeugt eine
/// unabhängige Kopie (z.B. beim Zuweisen aus einer Vorlage).
pub trait SplineExtension: fmt::Debug {
    /// Typ-Schlüssel, über den die Editor-Factory den passenden Sub-Editor findet.
    fn kind(&self) -> &str;

    /// Anzeigename
    fn name(&self) -> &str {
        self.kind()
    }

    /// Erstellt eine unabhängige Kopie dieser Extension.
    fn duplicate(&self) -> Arc<dyn SplineExtension>;

    /// Wird nach einer abgeschlossenen Drag-Geste aufgerufen (nur aktive Einträge).
    fn on_edit_finished(&self, _network: &SplineNetwork) {}
}

/// Ein Slot in der Extension-Liste.
#[derive(Debug, Clone)]
pub struct ExtensionEntry {
    /// Eindeutige Eintrags-ID
    pub id: EntryId,
    /// Extension-Instanz; `None` = leerer Slot, wartet auf Zuweisung
    pub extension: Option<Arc<dyn SplineExtension>>,
    /// Beeinflusst nachgelagerte Verarbeitung
    pub is_active: bool,
    /// Sub-Editor wird angezeigt
    pub is_selected: bool,
}

impl ExtensionEntry {
    /// Prüft ob der Eintrag genau diese Instanz referenziert (Pointer-Gleichheit).
    pub fn holds(&self, extension: &Arc<dyn SplineExtension>) -> bool {
        self.extension
            .as_ref()
            .is_some_and(|own| Arc::ptr_eq(own, extension))
    }
}

/// Geordnete Extension-Liste eines Netzwerks.
#[derive(Debug, Clone, Default)]
pub struct ExtensionList {
    entries: Vec<ExtensionEntry>,
    next_id: EntryId,
}

impl ExtensionList {
    /// Anzahl der Einträge
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Prüft ob die Liste leer ist
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Alle Einträge in Reihenfolge
    pub fn entries(&self) -> &[ExtensionEntry] {
        &self.entries
    }

    /// Eintrag an Position `index`
    pub fn get(&self, index: usize) -> Option<&ExtensionEntry> {
        self.entries.get(index)
    }

    /// Position eines Eintrags anhand seiner ID
    pub fn index_of(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Position des Eintrags, der genau diese Instanz hält
    pub fn position_of(&self, extension: &Arc<dyn SplineExtension>) -> Option<usize> {
        self.entries.iter().position(|e| e.holds(extension))
    }

    /// Index des selektierten Eintrags (wird beim Wiederöffnen des Editors wiederhergestellt).
    pub fn selected_index(&self) -> Option<usize> {
        self.entries.iter().position(|e| e.is_selected)
    }

    /// Aktive Extensions in Listenreihenfolge (leere Slots ausgenommen)
    pub fn active_extensions(&self) -> impl Iterator<Item = &Arc<dyn SplineExtension>> + '_ {
        self.entries
            .iter()
            .filter(|e| e.is_active)
            .filter_map(|e| e.extension.as_ref())
    }

    /// Übernimmt einen höheren ID-Zähler einer anderen Liste.
    pub(crate) fn advance_ids_past(&mut self, other: &ExtensionList) {
        self.next_id = self.next_id.max(other.next_id);
    }

    /// Hängt einen neuen, aktiven und unselektierten Eintrag an.
    pub fn push(&mut self, extension: Option<Arc<dyn SplineExtension>>) -> EntryId {
        self.insert(self.entries.len(), extension)
    }

    /// Fügt einen Eintrag an Position `index` ein (geklemmt auf die Listenlänge).
    pub fn insert(&mut self, index: usize, extension: Option<Arc<dyn SplineExtension>>) -> EntryId {
        self.next_id += 1;
        let id = self.next_id;
        let index = index.min(self.entries.len());
        self.entries.insert(
            index,
            ExtensionEntry {
                id,
                extension,
                is_active: true,
                is_selected: false,
            },
        );
        id
    }

    /// Entfernt den Eintrag an Position `index`.
    pub fn remove_at(&mut self, index: usize) -> Option<ExtensionEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Verschiebt einen Eintrag; reine Reihenfolge-Änderung.
    pub fn move_entry(&mut self, from: usize, to: usize) -> bool {
        if from >= self.entries.len() || to >= self.entries.len() {
            return false;
        }
        if from != to {
            let entry = self.entries.remove(from);
            self.entries.insert(to, entry);
        }
        true
    }

    /// Selektiert genau den Eintrag `index`, alle anderen werden deselektiert.
    ///
    /// Gibt `false` zurück wenn der Index ungültig ist (Liste bleibt unverändert).
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.is_selected = i == index;
        }
        true
    }

    /// Deselektiert alle Einträge.
    pub fn deselect_all(&mut self) {
        for entry in &mut self.entries {
            entry.is_selected = false;
        }
    }

    /// Setzt das Aktiv-Flag eines Eintrags.
    pub fn set_active(&mut self, index: usize, active: bool) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.is_active = active;
                true
            }
            None => false,
        }
    }
}
