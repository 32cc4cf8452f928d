//! Eingabe-Intents des Hosts und daraus abgeleitete Session-Commands.

use crate::core::{CurveEnd, CurveId, NodeId, SplineExtension, SplineSettings};
use glam::{Vec2, Vec3};
use std::sync::Arc;

/// Gehaltene Modifier-Tasten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Struktur-Modifier (Ctrl): Nodes hinzufügen / verbinden
    pub structural: bool,
    /// Additiv-Modifier (Shift): Selektion erweitern
    pub additive: bool,
}

impl Modifiers {
    /// Keine Modifier
    pub const NONE: Self = Self {
        structural: false,
        additive: false,
    };
    /// Nur Ctrl
    pub const STRUCTURAL: Self = Self {
        structural: true,
        additive: false,
    };
    /// Nur Shift
    pub const ADDITIVE: Self = Self {
        structural: false,
        additive: true,
    };
}

/// Element unter dem Zeiger (Hit-Test des Hosts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Leerer Raum
    Empty,
    /// Node-Knopf
    Node(NodeId),
    /// Tangenten-Knopf einer Kurve
    Tangent(CurveId, CurveEnd),
    /// Up-Knopf eines Nodes
    UpHandle(NodeId),
    /// Vertex-Marker (transiente Sub-Kurven-Auswahl)
    Vertex(usize),
    /// Das aktive Manipulations-Handle
    Handle,
}

/// Relevante Tasten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Entfernen
    Delete,
    /// "A" (mit Ctrl: alles selektieren)
    A,
    /// "F" (Selektion fokussieren)
    F,
    /// Alle anderen Tasten
    Other,
}

/// Aktives Transform-Werkzeug des Hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostTool {
    /// Verschieben
    #[default]
    Move,
    /// Skalieren
    Scale,
    /// Alle anderen Werkzeuge (Rotieren, Ansicht, …)
    Other,
}

/// Aktueller Manipulationsmodus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManipulationMode {
    /// Nodes verschieben (Schwerpunkt-Handle)
    #[default]
    Node,
    /// Start-Tangente (P1) einer Kurve
    StartTangent,
    /// End-Tangente (P2) einer Kurve
    EndTangent,
    /// Up-Vektoren ausrichten
    Up,
    /// Skalierung
    Scale,
}

impl ManipulationMode {
    /// Modus für das Tangentenende einer Kurve
    pub fn for_tangent(end: CurveEnd) -> Self {
        match end {
            CurveEnd::Start => Self::StartTangent,
            CurveEnd::End => Self::EndTangent,
        }
    }
}

/// Intents, die der Host pro Frame meldet (Eingabe und Panel-Aktionen).
#[derive(Debug, Clone)]
pub enum SessionIntent {
    // --- Zeiger / Tastatur ---
    /// Zeiger gedrückt
    PointerDown {
        screen_pos: Vec2,
        modifiers: Modifiers,
        target: PointerTarget,
    },
    /// Aktives Handle wurde auf `value` gezogen (Weltposition bzw. Skalierung)
    HandleMoved { value: Vec3 },
    /// Zeiger losgelassen
    PointerUp { screen_pos: Vec2 },
    /// Taste gedrückt
    KeyDown { key: Key, modifiers: Modifiers },
    /// Transform-Werkzeug des Hosts gewechselt
    HostToolChanged { tool: HostTool },
    /// Fokus verloren (Geste endet ohne PointerUp)
    FocusLost,

    // --- Historie ---
    /// Undo angefordert
    UndoRequested,
    /// Redo angefordert
    RedoRequested,

    // --- Netzwerk-Panel ---
    /// Alle Kurven unterteilen
    SubdivideRequested,
    /// Netzwerk mit den eingestellten Parametern vereinfachen
    SimplifyRequested,
    /// Netzwerk mit der eingestellten Stärke glätten
    SmoothRequested,
    /// Alle Nodes entfernen
    ClearAllRequested,
    /// Nodes auf den Boden setzen
    SnapToGroundRequested,
    /// Einstellungen übernehmen
    SettingsChanged { settings: Box<SplineSettings> },

    // --- Extension-Liste ---
    /// Eintrag anhängen (`None` = leerer Slot)
    ExtensionAddRequested {
        extension: Option<Arc<dyn SplineExtension>>,
    },
    /// Eintrag an Position entfernen
    ExtensionRemoveAtRequested { index: usize },
    /// Eintrag mit dieser Instanz entfernen
    ExtensionRemoveRequested { extension: Arc<dyn SplineExtension> },
    /// Eintrag verschieben
    ExtensionMoveRequested { from: usize, to: usize },
    /// Eintrag selektieren (Sub-Editor öffnen)
    ExtensionSelectRequested { index: usize },
    /// Extension eines Eintrags ersetzen
    ExtensionReplaceRequested {
        index: usize,
        extension: Option<Arc<dyn SplineExtension>>,
    },
    /// Aktiv-Flag eines Eintrags setzen
    ExtensionActiveToggled { index: usize, active: bool },
}

/// Mutierende Commands, die der Controller auf den Session-State anwendet.
#[derive(Debug, Clone)]
pub enum SessionCommand {
    // --- Geste ---
    /// Neue Geste beginnt an `screen_pos`
    BeginGesture { screen_pos: Vec2 },
    /// Geste endet an `screen_pos`
    EndGesture { screen_pos: Vec2 },
    /// Offene Transaktion sofort versiegeln
    CommitPending,

    // --- Selektion ---
    /// Node selektieren (additiv: ohne vorherige Selektion zu leeren)
    SelectNode { node_id: NodeId, additive: bool },
    /// Selektion auf diesen Node reduzieren
    CollapseSelection { node_id: NodeId },
    /// Tangenten-Handle einer Kurve wählen
    SelectTangent { curve_id: CurveId, end: CurveEnd },
    /// Up-Handle eines Nodes wählen
    SelectUpHandle { node_id: NodeId, additive: bool },
    /// Vertex-Marker wählen
    SelectVertex { index: usize },
    /// Alle Nodes selektieren
    SelectAll,
    /// Manipulationsmodus setzen
    SetMode { mode: ManipulationMode },
    /// Host-Werkzeug merken
    SetHostTool { tool: HostTool },

    // --- Struktur ---
    /// Node an Weltposition anlegen und von der Selektion aus verbinden
    AddNodeAt { position: Vec3 },
    /// Alle selektierten Nodes mit dem Ziel verbinden
    ConnectSelectedTo { target: NodeId },
    /// Selektierte Nodes entfernen
    DeleteSelected,

    // --- Handles ---
    /// Selektion starr verschieben (Schwerpunkt auf `handle`)
    MoveSelection { handle: Vec3 },
    /// Tangentenpunkt der selektierten Kurve setzen
    MoveTangent { handle: Vec3 },
    /// Up-Vektoren auf `handle` ausrichten
    AimUp { handle: Vec3 },
    /// Skalierung der Selektion zurücksetzen (Beginn einer Skalier-Geste)
    ResetScale,
    /// Skalierung der Selektion setzen
    ScaleSelection { scale: Vec3 },

    // --- Ansicht ---
    /// Selektion fokussieren
    FrameSelection,

    // --- Historie ---
    /// Undo
    Undo,
    /// Redo
    Redo,

    // --- Netzwerk ---
    /// Unterteilen
    Subdivide,
    /// Vereinfachen
    Simplify,
    /// Glätten
    Smooth,
    /// Alles entfernen
    ClearAll,
    /// Boden-Snap
    SnapToGround,
    /// Einstellungen setzen
    ApplySettings { settings: Box<SplineSettings> },

    // --- Extensions ---
    /// Eintrag anhängen
    AddExtension {
        extension: Option<Arc<dyn SplineExtension>>,
    },
    /// Eintrag an Position entfernen
    RemoveExtensionAt { index: usize },
    /// Eintrag verschieben
    MoveExtension { from: usize, to: usize },
    /// Eintrag selektieren
    SelectExtension { index: usize },
    /// Extension eines Eintrags ersetzen
    ReplaceExtension {
        index: usize,
        extension: Option<Arc<dyn SplineExtension>>,
    },
    /// Aktiv-Flag setzen
    SetExtensionActive { index: usize, active: bool },
}

/// Benachrichtigungen an den Host (werden pro Frame abgeholt).
#[derive(Debug, Clone, PartialEq)]
pub enum SessionNotification {
    /// Eine Drag-Geste wurde abgeschlossen (teure Neuberechnung erlaubt)
    EditFinished,
    /// Undo oder Redo wurde angewendet
    UndoRedoApplied,
    /// Host soll die Kamera auf die Selektion ausrichten
    FrameRequested { center: Vec3, extent: f32 },
    /// Ein Extension-Eintrag wurde selektiert
    ExtensionSelected { index: usize },
}
