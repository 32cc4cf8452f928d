//! Schnittstellen zu Host-Diensten (Raycast, Boden-Abfrage).

use glam::{Vec2, Vec3};

pub use crate::core::GroundProbe;

/// Treffer eines Raycasts vom Zeiger in die Szene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Weltpunkt des Treffers
    pub point: Vec3,
    /// Oberflächennormale am Treffer
    pub normal: Vec3,
}

/// Projiziert eine Zeigerposition in die Welt.
pub trait RayProvider {
    /// Schneidet den Strahl unter `screen_pos` mit der Szene.
    fn raycast(&self, screen_pos: Vec2) -> Option<RayHit>;
}

/// Vom Host bereitgestellte Dienste. Fehlende Dienste bedeuten "kein Treffer".
#[derive(Default)]
pub struct HostServices {
    /// Raycast für das Platzieren neuer Nodes
    pub ray_provider: Option<Box<dyn RayProvider>>,
    /// Boden-Abfrage für "Snap To Ground"
    pub ground_probe: Option<Box<dyn GroundProbe>>,
}

impl HostServices {
    /// Raycast über den installierten Provider
    pub fn raycast(&self, screen_pos: Vec2) -> Option<RayHit> {
        self.ray_provider.as_ref()?.raycast(screen_pos)
    }
}
