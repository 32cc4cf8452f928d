//! Repräsentiert einen Node (Kontrollpunkt) im Spline-Netzwerk.

use glam::Vec3;

/// Stabile Node-ID (wird innerhalb eines Netzwerks nie wiederverwendet).
pub type NodeId = u64;

/// Ein Node mit Position, Ausrichtung ("up") und Skalierung.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineNode {
    /// Eindeutige ID
    pub id: NodeId,
    /// Weltposition
    pub position: Vec3,
    /// Normierter Up-Vektor
    pub up: Vec3,
    /// Skalierung pro Achse
    pub scale: Vec3,
}

impl SplineNode {
    /// Erstellt einen neuen Node mit Standard-Ausrichtung (Y-up) und Skalierung 1.
    pub fn new(id: NodeId, position: Vec3) -> Self {
        Self {
            id,
            position,
            up: Vec3::Y,
            scale: Vec3::ONE,
        }
    }

    /// Setzt den Up-Vektor; Null-Vektoren werden verworfen.
    pub fn set_up(&mut self, up: Vec3) -> bool {
        match up.try_normalize() {
            Some(normalized) => {
                self.up = normalized;
                true
            }
            None => false,
        }
    }
}
