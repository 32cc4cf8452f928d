//! Repräsentiert eine kubische Kurve zwischen zwei Nodes.

use super::NodeId;
use crate::shared::bezier::{self, CubicControls};
use glam::Vec3;

/// Stabile Kurven-ID.
pub type CurveId = u64;

/// Kurvenende, an dem ein Tangenten-Handle sitzt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveEnd {
    /// Start-Tangente (P1)
    Start,
    /// End-Tangente (P2)
    End,
}

/// Eine Kurve: P0 (Start-Anker), P1/P2 (Tangenten), P3 (End-Anker).
///
/// P0 und P3 spiegeln immer die Positionen der referenzierten Nodes;
/// P1 und P2 sind frei editierbar.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineCurve {
    /// Eindeutige ID
    pub id: CurveId,
    /// Start-Node-ID
    pub start_id: NodeId,
    /// End-Node-ID
    pub end_id: NodeId,
    /// Start-Anker
    pub p0: Vec3,
    /// Start-Tangente
    pub p1: Vec3,
    /// End-Tangente
    pub p2: Vec3,
    /// End-Anker
    pub p3: Vec3,
    /// Kostenfaktor für die Pfadsuche (multipliziert mit der Länge)
    pub travel_cost: f32,
}

impl SplineCurve {
    /// Erstellt eine gerade Kurve zwischen zwei Positionen.
    pub fn new(id: CurveId, start_id: NodeId, end_id: NodeId, start: Vec3, end: Vec3) -> Self {
        Self::from_controls(id, start_id, end_id, bezier::straight_controls(start, end))
    }

    /// Erstellt eine Kurve aus vorgegebenen Kontrollpunkten.
    pub fn from_controls(
        id: CurveId,
        start_id: NodeId,
        end_id: NodeId,
        controls: CubicControls,
    ) -> Self {
        Self {
            id,
            start_id,
            end_id,
            p0: controls[0],
            p1: controls[1],
            p2: controls[2],
            p3: controls[3],
            travel_cost: 1.0,
        }
    }

    /// Kontrollpunkte als Array.
    pub fn controls(&self) -> CubicControls {
        [self.p0, self.p1, self.p2, self.p3]
    }

    /// Prüft ob die Kurve an `node_id` hängt.
    pub fn touches(&self, node_id: NodeId) -> bool {
        self.start_id == node_id || self.end_id == node_id
    }

    /// Prüft ob die Kurve das ungeordnete Node-Paar verbindet.
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.start_id == a && self.end_id == b) || (self.start_id == b && self.end_id == a)
    }

    /// Gibt den gegenüberliegenden Node zurück (None wenn die Kurve nicht an `node_id` hängt).
    pub fn other_end(&self, node_id: NodeId) -> Option<NodeId> {
        if self.start_id == node_id {
            Some(self.end_id)
        } else if self.end_id == node_id {
            Some(self.start_id)
        } else {
            None
        }
    }

    /// Tangentenpunkt am gegebenen Ende.
    pub fn tangent(&self, end: CurveEnd) -> Vec3 {
        match end {
            CurveEnd::Start => self.p1,
            CurveEnd::End => self.p2,
        }
    }

    /// Setzt den Tangentenpunkt am gegebenen Ende.
    pub fn set_tangent(&mut self, end: CurveEnd, point: Vec3) {
        match end {
            CurveEnd::Start => self.p1 = point,
            CurveEnd::End => self.p2 = point,
        }
    }

    /// Punkt bei Parameter t.
    pub fn point_at(&self, t: f32) -> Vec3 {
        bezier::cubic_point(&self.controls(), t)
    }

    /// Approximierte Länge.
    pub fn approx_length(&self, samples: usize) -> f32 {
        bezier::approx_length(&self.controls(), samples)
    }

    /// Verschiebt den Anker eines Nodes und zieht die angrenzende Tangente mit.
    pub(crate) fn move_anchor(&mut self, node_id: NodeId, new_position: Vec3) {
        if self.start_id == node_id {
            let delta = new_position - self.p0;
            self.p0 = new_position;
            self.p1 += delta;
        }
        if self.end_id == node_id {
            let delta = new_position - self.p3;
            self.p3 = new_position;
            self.p2 += delta;
        }
    }
}
