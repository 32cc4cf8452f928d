//! Lesende Pfad-Abfragen über die Kurven eines Netzwerks.
//!
//! Ergebnisse sind Momentaufnahmen: ändert sich eine Kurve oder ein Node
//! des Pfads, muss der Aufrufer neu abfragen.

use super::{CurveId, NodeId, SplineNetwork};
use crate::shared::bezier::{self, CubicControls};
use glam::Vec3;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// Eine Kurve als Teil eines Pfads, ggf. rückwärts durchlaufen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathSegment {
    /// Kurven-ID
    pub curve_id: CurveId,
    /// `true` wenn die Kurve von End- zu Start-Node durchlaufen wird
    pub reversed: bool,
}

/// Geordnete Kurvenfolge zwischen zwei Nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplinePath {
    /// Segmente vom Start- zum Ziel-Node
    pub segments: Vec<PathSegment>,
}

/// Abtastpunkt auf einem Pfad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    /// Weltposition
    pub position: Vec3,
    /// Normierte Laufrichtung
    pub forward: Vec3,
    /// Interpolierter Up-Vektor der Endpunkt-Nodes
    pub up: Vec3,
    /// Interpolierte Skalierung der Endpunkt-Nodes
    pub scale: Vec3,
    /// Zurückgelegte Distanz ab Pfadanfang (bei Zeit-Abfragen approximiert)
    pub distance: f32,
}

/// Eintrag der Dijkstra-Queue (Min-Heap über die Kosten).
#[derive(Debug, Clone, Copy, PartialEq)]
struct QueueEntry {
    cost: f32,
    node: NodeId,
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sucht den günstigsten Pfad zwischen zwei Nodes (Dijkstra).
///
/// Kantengewicht = Kurvenlänge * Kurven-Reisekosten * globaler Kostenfaktor.
/// Gleiche Start-/Ziel-Nodes, unbekannte IDs und unerreichbare Ziele liefern
/// einen leeren Pfad.
pub fn shortest_path(
    network: &SplineNetwork,
    from: NodeId,
    to: NodeId,
    resolution: usize,
) -> SplinePath {
    if from == to || !network.contains_node(from) || !network.contains_node(to) {
        return SplinePath::default();
    }

    let cost_factor = network.settings.path_finding.curve_travel_cost;
    let mut adjacency: HashMap<NodeId, Vec<(NodeId, PathSegment, f32)>> = HashMap::new();
    for curve in network.curves() {
        let weight = curve.approx_length(resolution) * curve.travel_cost * cost_factor;
        adjacency.entry(curve.start_id).or_default().push((
            curve.end_id,
            PathSegment {
                curve_id: curve.id,
                reversed: false,
            },
            weight,
        ));
        adjacency.entry(curve.end_id).or_default().push((
            curve.start_id,
            PathSegment {
                curve_id: curve.id,
                reversed: true,
            },
            weight,
        ));
    }

    let mut best: HashMap<NodeId, f32> = HashMap::from([(from, 0.0)]);
    let mut came_from: HashMap<NodeId, (NodeId, PathSegment)> = HashMap::new();
    let mut queue = BinaryHeap::from([QueueEntry {
        cost: 0.0,
        node: from,
    }]);

    while let Some(QueueEntry { cost, node }) = queue.pop() {
        if node == to {
            break;
        }
        if best.get(&node).is_some_and(|&known| cost > known) {
            continue;
        }
        let Some(edges) = adjacency.get(&node) else {
            continue;
        };
        for &(next, segment, weight) in edges {
            let candidate = cost + weight;
            if best.get(&next).map_or(true, |&known| candidate < known) {
                best.insert(next, candidate);
                came_from.insert(next, (node, segment));
                queue.push(QueueEntry {
                    cost: candidate,
                    node: next,
                });
            }
        }
    }

    let mut segments = Vec::new();
    let mut current = to;
    while current != from {
        let Some(&(previous, segment)) = came_from.get(&current) else {
            return SplinePath::default();
        };
        segments.push(segment);
        current = previous;
    }
    segments.reverse();
    SplinePath { segments }
}

impl SplinePath {
    /// Prüft ob der Pfad keine Segmente hat
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Anzahl der Segmente
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Node-Folge entlang des Pfads (leer wenn eine Kurve fehlt).
    pub fn node_ids(&self, network: &SplineNetwork) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(self.segments.len() + 1);
        for (i, segment) in self.segments.iter().enumerate() {
            let Some(curve) = network.curve(segment.curve_id) else {
                return Vec::new();
            };
            let (a, b) = if segment.reversed {
                (curve.end_id, curve.start_id)
            } else {
                (curve.start_id, curve.end_id)
            };
            if i == 0 {
                ids.push(a);
            }
            ids.push(b);
        }
        ids
    }

    /// Approximierte Gesamtlänge (Polyline mit `resolution` Stützstellen je Kurve).
    pub fn length(&self, network: &SplineNetwork, resolution: usize) -> f32 {
        self.resolved(network)
            .map(|s| bezier::approx_length(&s.controls, resolution))
            .sum()
    }

    /// Genauere Gesamtlänge (numerische Integration, teurer).
    pub fn accurate_length(&self, network: &SplineNetwork, intervals: usize) -> f32 {
        self.resolved(network)
            .map(|s| bezier::accurate_length(&s.controls, intervals))
            .sum()
    }

    /// Abtastpunkt in `distance` Welteinheiten ab Pfadanfang.
    ///
    /// `None` bei leerem Pfad oder Distanz außerhalb [0, Länge].
    pub fn sample_at_distance(
        &self,
        network: &SplineNetwork,
        distance: f32,
        resolution: usize,
    ) -> Option<PathSample> {
        if distance < 0.0 {
            return None;
        }
        let mut travelled = 0.0;
        let mut last = None;
        for segment in self.resolved(network) {
            let table = bezier::arc_length_table(&segment.controls, resolution);
            let length = table.last().copied().unwrap_or(0.0);
            if distance <= travelled + length {
                let t = bezier::t_at_distance(&table, distance - travelled);
                return Some(segment.sample(t, distance));
            }
            travelled += length;
            last = Some(segment);
        }
        // Rundungsreste am Pfadende
        last.filter(|_| distance - travelled <= 1e-3)
            .map(|segment| segment.sample(1.0, travelled))
    }

    /// Abtastpunkt zur parametrischen Zeit `time` ∈ [0, Segmentanzahl].
    ///
    /// Der ganzzahlige Anteil wählt das Segment, der Rest ist dessen Parameter.
    pub fn sample_at_time(
        &self,
        network: &SplineNetwork,
        time: f32,
        resolution: usize,
    ) -> Option<PathSample> {
        let count = self.segments.len();
        if count == 0 || !(0.0..=count as f32).contains(&time) {
            return None;
        }
        let index = (time.floor() as usize).min(count - 1);
        let t = time - index as f32;
        let mut travelled = 0.0;
        for (i, segment) in self.resolved(network).enumerate() {
            if i == index {
                let partial = bezier::approx_length(
                    &bezier::split_cubic(&segment.controls, t).0,
                    resolution,
                );
                return Some(segment.sample(t, travelled + partial));
            }
            travelled += bezier::approx_length(&segment.controls, resolution);
        }
        None
    }

    /// Löst die Segmente gegen das aktuelle Netzwerk auf; fehlende Kurven beenden die Folge.
    fn resolved<'a>(
        &'a self,
        network: &'a SplineNetwork,
    ) -> impl Iterator<Item = ResolvedSegment> + 'a {
        self.segments
            .iter()
            .map_while(move |segment| ResolvedSegment::new(network, *segment))
    }
}

/// Segment mit ausgerichteten Kontrollpunkten und Endpunkt-Attributen.
struct ResolvedSegment {
    controls: CubicControls,
    up: (Vec3, Vec3),
    scale: (Vec3, Vec3),
}

impl ResolvedSegment {
    fn new(network: &SplineNetwork, segment: PathSegment) -> Option<Self> {
        let curve = network.curve(segment.curve_id)?;
        let start = network.node(curve.start_id)?;
        let end = network.node(curve.end_id)?;
        let controls = curve.controls();
        Some(if segment.reversed {
            Self {
                controls: [controls[3], controls[2], controls[1], controls[0]],
                up: (end.up, start.up),
                scale: (end.scale, start.scale),
            }
        } else {
            Self {
                controls,
                up: (start.up, end.up),
                scale: (start.scale, end.scale),
            }
        })
    }

    fn sample(&self, t: f32, distance: f32) -> PathSample {
        let forward = bezier::cubic_derivative(&self.controls, t)
            .try_normalize()
            .or_else(|| (self.controls[3] - self.controls[0]).try_normalize())
            .unwrap_or(Vec3::Z);
        PathSample {
            position: bezier::cubic_point(&self.controls, t),
            forward,
            up: self.up.0.lerp(self.up.1, t).try_normalize().unwrap_or(Vec3::Y),
            scale: self.scale.0.lerp(self.scale.1, t),
            distance,
        }
    }
}
