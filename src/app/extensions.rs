//! Sub-Editoren für Extensions: Factory und Host mit höchstens einem aktiven Editor.
//!
//! Jede Extension-Art registriert einen Konstruktor bei der [`EditorFactory`].
//! Der [`ExtensionEditorHost`] hält maximal eine Editor-Instanz und gibt sie
//! frei (`on_deselected` + Drop), bevor eine neue erzeugt wird.

use crate::core::{EntryId, ExtensionEntry, SplineExtension, SplineNetwork};
use std::collections::HashMap;
use std::sync::Arc;

/// Konfigurations-Editor einer einzelnen Extension-Instanz.
pub trait ExtensionEditor {
    /// Editor wurde für seinen Eintrag geöffnet
    fn on_selected(&mut self);

    /// Editor wird geschlossen; Ressourcen hier freigeben
    fn on_deselected(&mut self);

    /// Pro Frame aufgerufen, solange der Editor offen ist
    fn draw(&mut self, _network: &SplineNetwork) {}
}

/// Konstruktor für Editoren einer Extension-Art.
pub type EditorConstructor = Box<dyn Fn(&Arc<dyn SplineExtension>) -> Box<dyn ExtensionEditor>>;

/// Registry: Extension-Art → Editor-Konstruktor.
#[derive(Default)]
pub struct EditorFactory {
    constructors: HashMap<String, EditorConstructor>,
}

impl EditorFactory {
    /// Erstellt eine leere Factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registriert (oder ersetzt) den Konstruktor für `kind`.
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        constructor: impl Fn(&Arc<dyn SplineExtension>) -> Box<dyn ExtensionEditor> + 'static,
    ) {
        self.constructors.insert(kind.into(), Box::new(constructor));
    }

    /// Prüft ob für `kind` ein Konstruktor existiert
    pub fn supports(&self, kind: &str) -> bool {
        self.constructors.contains_key(kind)
    }

    /// Erzeugt einen Editor für die Extension (None wenn die Art unbekannt ist).
    pub fn create(&self, extension: &Arc<dyn SplineExtension>) -> Option<Box<dyn ExtensionEditor>> {
        self.constructors
            .get(extension.kind())
            .map(|constructor| constructor(extension))
    }
}

struct LiveEditor {
    entry_id: EntryId,
    editor: Box<dyn ExtensionEditor>,
}

/// Hält höchstens einen offenen Sub-Editor.
#[derive(Default)]
pub struct ExtensionEditorHost {
    /// Registrierte Editor-Konstruktoren
    pub factory: EditorFactory,
    live: Option<LiveEditor>,
}

impl ExtensionEditorHost {
    /// Erstellt einen Host mit der gegebenen Factory.
    pub fn new(factory: EditorFactory) -> Self {
        Self {
            factory,
            live: None,
        }
    }

    /// Eintrag, dessen Editor gerade offen ist
    pub fn live_entry(&self) -> Option<EntryId> {
        self.live.as_ref().map(|l| l.entry_id)
    }

    /// Prüft ob ein Editor offen ist
    pub fn has_live_editor(&self) -> bool {
        self.live.is_some()
    }

    /// Schließt den offenen Editor (falls vorhanden).
    pub fn release(&mut self) {
        if let Some(mut live) = self.live.take() {
            live.editor.on_deselected();
            log::debug!("Extension-Editor für Eintrag {} freigegeben", live.entry_id);
        }
    }

    /// Öffnet den Editor für einen Eintrag; ein vorher offener Editor wird
    /// zuerst freigegeben. Leere Slots und unbekannte Arten öffnen keinen Editor.
    pub fn open(&mut self, entry: &ExtensionEntry) {
        self.release();
        let Some(extension) = entry.extension.as_ref() else {
            return;
        };
        match self.factory.create(extension) {
            Some(mut editor) => {
                editor.on_selected();
                self.live = Some(LiveEditor {
                    entry_id: entry.id,
                    editor,
                });
            }
            None => log::debug!("Kein Editor für Extension-Art '{}'", extension.kind()),
        }
    }

    /// Leitet den Frame-Hook an den offenen Editor weiter.
    pub fn draw(&mut self, network: &SplineNetwork) {
        if let Some(live) = self.live.as_mut() {
            live.editor.draw(network);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug)]
    struct Road;

    impl SplineExtension for Road {
        fn kind(&self) -> &str {
            "road"
        }

        fn duplicate(&self) -> Arc<dyn SplineExtension> {
            Arc::new(Road)
        }
    }

    struct RecordingEditor {
        events: Rc<RefCell<Vec<&'static str>>>,
    }

    impl ExtensionEditor for RecordingEditor {
        fn on_selected(&mut self) {
            self.events.borrow_mut().push("selected");
        }

        fn on_deselected(&mut self) {
            self.events.borrow_mut().push("deselected");
        }
    }

    fn host(events: &Rc<RefCell<Vec<&'static str>>>) -> ExtensionEditorHost {
        let mut factory = EditorFactory::new();
        let events = Rc::clone(events);
        factory.register("road", move |_| {
            Box::new(RecordingEditor {
                events: Rc::clone(&events),
            }) as Box<dyn ExtensionEditor>
        });
        ExtensionEditorHost::new(factory)
    }

    fn entry(id: EntryId, extension: Option<Arc<dyn SplineExtension>>) -> ExtensionEntry {
        ExtensionEntry {
            id,
            extension,
            is_active: true,
            is_selected: false,
        }
    }

    #[test]
    fn opening_releases_previous_editor_first() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut host = host(&events);

        host.open(&entry(1, Some(Arc::new(Road))));
        host.open(&entry(2, Some(Arc::new(Road))));

        assert_eq!(host.live_entry(), Some(2));
        assert_eq!(*events.borrow(), vec!["selected", "deselected", "selected"]);
    }

    #[test]
    fn empty_slot_opens_no_editor() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut host = host(&events);
        host.open(&entry(1, Some(Arc::new(Road))));
        host.open(&entry(2, None));
        assert!(!host.has_live_editor());
        assert_eq!(*events.borrow(), vec!["selected", "deselected"]);
    }
}
