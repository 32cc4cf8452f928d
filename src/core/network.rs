//! Das Spline-Netzwerk: geordnete Nodes, Kurven, Extension-Liste und Einstellungen.

mod shape;

use super::{
    CurveEnd, CurveId, ExtensionList, NodeId, SplineCurve, SplineNode, SplineSettings,
};
use glam::Vec3;
use indexmap::{IndexMap, IndexSet};

/// Liefert den Bodenpunkt unterhalb einer Weltposition (Terrain-Abfrage des Hosts).
pub trait GroundProbe {
    /// Bodenpunkt unter `position`, `None` wenn kein Boden getroffen wurde.
    fn ground_point(&self, position: Vec3) -> Option<Vec3>;
}

/// Container für ein editierbares Spline-Netzwerk.
///
/// Die Node-Reihenfolge ist signifikant (erster/letzter Node haben
/// Endpunkt-Rollen). Kurven referenzieren Nodes nur über IDs; jede
/// mutierende Operation setzt das Dirty-Flag.
#[derive(Debug, Clone)]
pub struct SplineNetwork {
    nodes: IndexMap<NodeId, SplineNode>,
    curves: IndexMap<CurveId, SplineCurve>,
    extensions: ExtensionList,
    /// Netzwerk-weite Einstellungen
    pub settings: SplineSettings,
    next_node_id: NodeId,
    next_curve_id: CurveId,
    dirty: bool,
}

impl SplineNetwork {
    /// Erstellt ein leeres Netzwerk mit den gegebenen Einstellungen.
    pub fn new(settings: SplineSettings) -> Self {
        Self {
            nodes: IndexMap::new(),
            curves: IndexMap::new(),
            extensions: ExtensionList::default(),
            settings,
            next_node_id: 0,
            next_curve_id: 0,
            dirty: false,
        }
    }

    // --- Lesen ---

    /// Anzahl der Nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Anzahl der Kurven
    pub fn curve_count(&self) -> usize {
        self.curves.len()
    }

    /// Prüft ob ein Node existiert
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Prüft ob eine Kurve existiert
    pub fn contains_curve(&self, id: CurveId) -> bool {
        self.curves.contains_key(&id)
    }

    /// Node per ID
    pub fn node(&self, id: NodeId) -> Option<&SplineNode> {
        self.nodes.get(&id)
    }

    /// Kurve per ID
    pub fn curve(&self, id: CurveId) -> Option<&SplineCurve> {
        self.curves.get(&id)
    }

    /// Nodes in Netzwerk-Reihenfolge
    pub fn nodes(&self) -> impl Iterator<Item = &SplineNode> + '_ {
        self.nodes.values()
    }

    /// Node-IDs in Netzwerk-Reihenfolge
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Alle Kurven
    pub fn curves(&self) -> impl Iterator<Item = &SplineCurve> + '_ {
        self.curves.values()
    }

    /// Position eines Nodes in der Reihenfolge
    pub fn node_index(&self, id: NodeId) -> Option<usize> {
        self.nodes.get_index_of(&id)
    }

    /// ID des ersten Nodes
    pub fn first_node_id(&self) -> Option<NodeId> {
        self.nodes.first().map(|(id, _)| *id)
    }

    /// ID des letzten Nodes
    pub fn last_node_id(&self) -> Option<NodeId> {
        self.nodes.last().map(|(id, _)| *id)
    }

    /// Alle Kurven, die an mindestens einem der Nodes hängen.
    pub fn connected_curves(&self, node_ids: &[NodeId]) -> IndexSet<CurveId> {
        self.curves
            .values()
            .filter(|c| node_ids.iter().any(|&id| c.touches(id)))
            .map(|c| c.id)
            .collect()
    }

    /// Erste Kurve zwischen zwei Nodes (Richtung egal)
    pub fn curve_between(&self, a: NodeId, b: NodeId) -> Option<CurveId> {
        self.curves.values().find(|c| c.connects(a, b)).map(|c| c.id)
    }

    /// Nachbar-Nodes eines Nodes (über Kurven), in Kurven-Reihenfolge
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        self.curves.values().filter_map(|c| c.other_end(id)).collect()
    }

    /// Anzahl der Kurven an einem Node
    pub fn degree(&self, id: NodeId) -> usize {
        self.curves.values().filter(|c| c.touches(id)).count()
    }

    /// Extension-Liste (lesend)
    pub fn extensions(&self) -> &ExtensionList {
        &self.extensions
    }

    /// Extension-Liste (schreibend); markiert das Netzwerk als geändert.
    pub fn extensions_mut(&mut self) -> &mut ExtensionList {
        self.dirty = true;
        &mut self.extensions
    }

    // --- Dirty-Flag ---

    /// Prüft ob seit dem letzten Abholen mutiert wurde
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Markiert das Netzwerk als geändert
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Liest das Dirty-Flag und setzt es zurück (Host-Redraw).
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Zieht die ID-Zähler auf den Stand eines abgelösten Netzwerks nach.
    ///
    /// Nach Undo/Redo dürfen IDs des abgelösten Zustands nicht neu vergeben werden.
    pub fn advance_ids_past(&mut self, outgoing: &SplineNetwork) {
        self.next_node_id = self.next_node_id.max(outgoing.next_node_id);
        self.next_curve_id = self.next_curve_id.max(outgoing.next_curve_id);
        self.extensions.advance_ids_past(&outgoing.extensions);
    }

    // --- Struktur ---

    /// Fügt einen Node am Ende der Reihenfolge hinzu.
    pub fn add_node(&mut self, position: Vec3) -> NodeId {
        self.next_node_id += 1;
        let id = self.next_node_id;
        self.nodes.insert(id, SplineNode::new(id, position));
        self.dirty = true;
        id
    }

    /// Fügt einen Node an Position `index` der Reihenfolge ein.
    pub(crate) fn insert_node_at(&mut self, index: usize, mut node: SplineNode) -> NodeId {
        self.next_node_id += 1;
        let id = self.next_node_id;
        node.id = id;
        let index = index.min(self.nodes.len());
        self.nodes.shift_insert(index, id, node);
        self.dirty = true;
        id
    }

    /// Verbindet zwei Nodes mit einer geraden Kurve.
    ///
    /// Existiert bereits eine Kurve zwischen dem Paar (und Mehrfachkanten
    /// sind nicht erlaubt), wird deren ID zurückgegeben und nichts verändert.
    /// Unbekannte IDs und Selbstschleifen liefern `None`.
    pub fn connect(&mut self, from: NodeId, to: NodeId) -> Option<CurveId> {
        if from == to {
            return None;
        }
        let start = self.nodes.get(&from)?.position;
        let end = self.nodes.get(&to)?.position;
        if !self.settings.allow_multi_edges {
            if let Some(existing) = self.curve_between(from, to) {
                log::debug!("Kurve {}-{} existiert bereits ({})", from, to, existing);
                return Some(existing);
            }
        }
        let controls = crate::shared::bezier::straight_controls(start, end);
        Some(self.insert_curve(from, to, controls))
    }

    /// Legt eine Kurve mit vorgegebenen Kontrollpunkten an (ohne Duplikat-Prüfung).
    pub(crate) fn insert_curve(
        &mut self,
        from: NodeId,
        to: NodeId,
        controls: crate::shared::bezier::CubicControls,
    ) -> CurveId {
        self.next_curve_id += 1;
        let id = self.next_curve_id;
        self.curves
            .insert(id, SplineCurve::from_controls(id, from, to, controls));
        self.dirty = true;
        id
    }

    /// Entfernt eine einzelne Kurve.
    pub fn remove_curve(&mut self, id: CurveId) -> Option<SplineCurve> {
        let removed = self.curves.shift_remove(&id);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    /// Entfernt Nodes samt aller Kurven, die an ihnen hängen.
    ///
    /// Unbekannte IDs werden ignoriert. Gibt die Anzahl entfernter Nodes zurück.
    pub fn remove_nodes(&mut self, ids: &[NodeId]) -> usize {
        let mut removed = 0;
        for id in ids {
            if self.nodes.shift_remove(id).is_some() {
                removed += 1;
            }
        }
        if removed > 0 {
            let nodes = &self.nodes;
            self.curves
                .retain(|_, c| nodes.contains_key(&c.start_id) && nodes.contains_key(&c.end_id));
            self.dirty = true;
        }
        removed
    }

    /// Entfernt alle Nodes und Kurven.
    pub fn remove_all_nodes(&mut self) {
        self.nodes.clear();
        self.curves.clear();
        self.dirty = true;
    }

    // --- Node-/Kurven-Attribute ---

    /// Setzt die Position eines Nodes; angrenzende Kurven-Anker und
    /// Tangenten werden mitgeführt.
    pub fn set_node_position(&mut self, id: NodeId, position: Vec3) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        node.position = position;
        for curve in self.curves.values_mut().filter(|c| c.touches(id)) {
            curve.move_anchor(id, position);
        }
        self.dirty = true;
        true
    }

    /// Setzt den Up-Vektor eines Nodes (Null-Vektoren werden verworfen).
    pub fn set_node_up(&mut self, id: NodeId, up: Vec3) -> bool {
        let changed = self.nodes.get_mut(&id).is_some_and(|n| n.set_up(up));
        self.dirty |= changed;
        changed
    }

    /// Setzt die Skalierung eines Nodes.
    pub fn set_node_scale(&mut self, id: NodeId, scale: Vec3) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        node.scale = scale;
        self.dirty = true;
        true
    }

    /// Setzt einen Tangentenpunkt (P1/P2) einer Kurve.
    pub fn set_curve_tangent(&mut self, id: CurveId, end: CurveEnd, point: Vec3) -> bool {
        let Some(curve) = self.curves.get_mut(&id) else {
            return false;
        };
        curve.set_tangent(end, point);
        self.dirty = true;
        true
    }

    /// Setzt den Reisekosten-Faktor einer Kurve (Werte < 0 werden auf 0 geklemmt).
    pub fn set_curve_travel_cost(&mut self, id: CurveId, cost: f32) -> bool {
        let Some(curve) = self.curves.get_mut(&id) else {
            return false;
        };
        curve.travel_cost = cost.max(0.0);
        self.dirty = true;
        true
    }

    /// Gleicht P0/P3 aller Kurven mit den aktuellen Node-Positionen ab.
    pub fn resync_curve_anchors(&mut self) {
        for curve in self.curves.values_mut() {
            if let Some(start) = self.nodes.get(&curve.start_id) {
                curve.p0 = start.position;
            }
            if let Some(end) = self.nodes.get(&curve.end_id) {
                curve.p3 = end.position;
            }
        }
    }

    /// Mittelpunkt der gegebenen Nodes (unbekannte IDs werden übersprungen).
    pub fn centroid(&self, ids: &[NodeId]) -> Option<Vec3> {
        let (sum, count) = ids
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .fold((Vec3::ZERO, 0usize), |(sum, n), node| (sum + node.position, n + 1));
        (count > 0).then(|| sum / count as f32)
    }
}

impl Default for SplineNetwork {
    fn default() -> Self {
        Self::new(SplineSettings::default())
    }
}

#[cfg(test)]
mod tests;
