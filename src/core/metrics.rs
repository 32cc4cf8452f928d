//! Mess-Metriken für Overlays: Node-Werte, Abstände, Steigungen, Distanz-Marker.

use super::settings::MARKER_DISTANCE_MIN;
use super::{NodeId, SplineNetwork, SplinePath};
use glam::Vec3;

/// Beschriftete Messgröße an einer Weltposition.
#[derive(Debug, Clone, PartialEq)]
pub struct PointMetrics {
    /// Beschriftung (z.B. "Node ID: 3 -> 4")
    pub title: String,
    /// Ankerposition der Beschriftung
    pub world_position: Vec3,
    /// Distanz (3D)
    pub delta_distance: f32,
    /// Höhendifferenz
    pub delta_height: f32,
}

impl PointMetrics {
    /// Steigung in Prozent (0 bei Distanz 0)
    pub fn grade_percent(&self) -> f32 {
        grade_percent(self.delta_height, self.delta_distance)
    }

    /// Steigungswinkel in Grad
    pub fn slope_degrees(&self) -> f32 {
        slope_degrees(self.delta_height, self.delta_distance)
    }

    /// Kurzform mit Distanz, Höhe und Steigung.
    pub fn brief(&self) -> String {
        format!(
            "{}\nDistance: {:.2}m\nHeight: {:.2}m\nGrade: {:.2}%",
            self.title,
            self.delta_distance,
            self.delta_height,
            self.grade_percent()
        )
    }

    /// Kurzform mit Position.
    pub fn position_brief(&self) -> String {
        let p = self.world_position;
        format!("{}\nX: {:.2} Y: {:.2} Z: {:.2}", self.title, p.x, p.y, p.z)
    }
}

/// Distanz-Marker entlang eines gemessenen Pfads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceMarker {
    /// Position auf dem Pfad
    pub position: Vec3,
    /// Distanz ab Pfadanfang
    pub distance: f32,
    /// (Grade %, Slope °) zwischen vorherigem und nächstem Marker, falls beide existieren
    pub gradient: Option<(f32, f32)>,
}

/// Steigung in Prozent: dh / dd * 100.
pub fn grade_percent(delta_height: f32, delta_distance: f32) -> f32 {
    if delta_distance > 0.0 {
        delta_height / delta_distance * 100.0
    } else {
        0.0
    }
}

/// Steigungswinkel in Grad: atan2(dh, dd).
pub fn slope_degrees(delta_height: f32, delta_distance: f32) -> f32 {
    delta_height.atan2(delta_distance).to_degrees()
}

/// Metrik eines einzelnen Nodes (Position, keine Deltas).
pub fn node_metrics(network: &SplineNetwork, id: NodeId) -> Option<PointMetrics> {
    let node = network.node(id)?;
    Some(PointMetrics {
        title: format!("Node ID: {}", id),
        world_position: node.position,
        delta_distance: 0.0,
        delta_height: 0.0,
    })
}

/// Metriken zwischen aufeinanderfolgenden Nodes der Liste (Luftlinie).
///
/// Unbekannte IDs werden übersprungen.
pub fn average_metrics(network: &SplineNetwork, ids: &[NodeId]) -> Vec<PointMetrics> {
    let nodes: Vec<_> = ids.iter().filter_map(|id| network.node(*id)).collect();
    nodes
        .windows(2)
        .map(|pair| {
            let (a, b) = (pair[0], pair[1]);
            PointMetrics {
                title: format!("Node ID: {} -> {}", a.id, b.id),
                world_position: a.position.lerp(b.position, 0.5),
                delta_distance: a.position.distance(b.position),
                delta_height: b.position.y - a.position.y,
            }
        })
        .collect()
}

/// Summe über Einzelmetriken (Position = letzter Eintrag).
pub fn total_metrics(metrics: &[PointMetrics]) -> PointMetrics {
    PointMetrics {
        title: "Total".to_string(),
        world_position: metrics.last().map_or(Vec3::ZERO, |m| m.world_position),
        delta_distance: metrics.iter().map(|m| m.delta_distance).sum(),
        delta_height: metrics.iter().map(|m| m.delta_height).sum(),
    }
}

/// Obergrenze der Marker pro Pfad.
pub const MAX_DISTANCE_MARKERS: usize = 4096;

/// Setzt alle `step` Welteinheiten einen Marker entlang des Pfads.
///
/// Die Steigung eines Markers wird zwischen vorherigem und nächstem
/// Abtastpunkt berechnet; erster und letzter Marker haben keine.
/// `step` wird auf [`MARKER_DISTANCE_MIN`] angehoben, die Anzahl ist
/// auf [`MAX_DISTANCE_MARKERS`] begrenzt.
pub fn distance_markers(
    network: &SplineNetwork,
    path: &SplinePath,
    step: f32,
    resolution: usize,
) -> Vec<DistanceMarker> {
    if step <= 0.0 || path.is_empty() {
        return Vec::new();
    }
    let step = step.max(MARKER_DISTANCE_MIN);
    let total = path.length(network, resolution);
    let mut markers = Vec::new();
    let mut previous: Option<Vec3> = None;
    for index in 0..MAX_DISTANCE_MARKERS {
        let current = index as f32 * step;
        if current >= total {
            break;
        }
        let Some(sample) = path.sample_at_distance(network, current, resolution) else {
            break;
        };
        let next = path.sample_at_distance(network, current + step, resolution);
        let gradient = previous.zip(next).map(|(prev, next)| {
            let delta_height = next.position.y - prev.y;
            let delta_distance = prev.distance(next.position);
            (
                grade_percent(delta_height, delta_distance),
                slope_degrees(delta_height, delta_distance),
            )
        });
        markers.push(DistanceMarker {
            position: sample.position,
            distance: current,
            gradient,
        });
        previous = Some(sample.position);
    }
    markers
}

/// Beschriftung eines gemessenen Pfads: genaue Länge am zeitlichen Pfadmittelpunkt.
pub fn path_label(
    network: &SplineNetwork,
    path: &SplinePath,
    from: NodeId,
    to: NodeId,
    resolution: usize,
    intervals: usize,
) -> Option<PointMetrics> {
    let middle = path.sample_at_time(network, path.len() as f32 * 0.5, resolution)?;
    let ids = path.node_ids(network);
    let delta_height = match (ids.first(), ids.last()) {
        (Some(a), Some(b)) => {
            let a = network.node(*a)?.position.y;
            let b = network.node(*b)?.position.y;
            b - a
        }
        _ => 0.0,
    };
    Some(PointMetrics {
        title: format!("Node ID: {} -> {}", from, to),
        world_position: middle.position,
        delta_distance: path.accurate_length(network, intervals),
        delta_height,
    })
}
