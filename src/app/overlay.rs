//! Overlay-Szene als expliziter Übergabevertrag zwischen Session und Host-Renderer.
//!
//! Reine Lese-Abfrage: wird erst nach der Event-Verarbeitung eines Frames
//! gebaut und sieht daher nie eine halb angewendete Mutation.

use super::events::ManipulationMode;
use super::SessionState;
use crate::core::metrics::{self, DistanceMarker, PointMetrics};
use crate::core::{shortest_path, CurveEnd, CurveId, NodeId, SplineNetwork};
use glam::Vec3;
use std::sync::Arc;

/// Das aktive Manipulations-Handle dieses Frames.
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveHandle {
    /// Schwerpunkt der selektierten Nodes
    Centroid(Vec3),
    /// Tangentenpunkt der gewählten Kurve
    Tangent {
        curve_id: CurveId,
        end: CurveEnd,
        anchor: Vec3,
        position: Vec3,
    },
    /// Up-Punkte aller selektierten Nodes (Position + Up * Handle-Länge)
    Up(Vec<(NodeId, Vec3)>),
    /// Skalierung am zuletzt selektierten Node
    Scale { position: Vec3, scale: Vec3 },
}

/// Angebotener Tangenten-Knopf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentKnob {
    pub curve_id: CurveId,
    pub end: CurveEnd,
    pub anchor: Vec3,
    pub position: Vec3,
}

/// Vermessener kürzester Pfad zwischen zwei Nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredPath {
    pub from: NodeId,
    pub to: NodeId,
    /// Kurven des Pfads (rot hervorgehoben)
    pub curve_ids: Vec<CurveId>,
    /// Distanz-Marker (Steigung nur mit `show_gradient`)
    pub markers: Vec<DistanceMarker>,
    /// Genaue Länge am zeitlichen Pfadmittelpunkt
    pub label: Option<PointMetrics>,
}

/// Mess-Overlay der Selektion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsOverlay {
    /// Gestrichelte Linie entlang der Selektionsreihenfolge
    pub selection_polyline: Vec<Vec3>,
    /// Positions-Metriken einzelner Nodes
    pub node_metrics: Vec<PointMetrics>,
    /// Metriken zwischen aufeinanderfolgenden selektierten Nodes
    pub average_metrics: Vec<PointMetrics>,
    /// Summe (nur bei mehr als einem selektierten Node)
    pub total: Option<PointMetrics>,
    /// Vermessene Pfade (nur bei mehr als einem selektierten Node)
    pub measured_paths: Vec<MeasuredPath>,
}

/// Debug-Beschriftung eines Nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugLabel {
    pub node_id: NodeId,
    pub position: Vec3,
    pub text: String,
}

/// Read-only Daten für einen Overlay-Frame.
#[derive(Debug, Clone)]
pub struct OverlayScene {
    /// Netzwerk dieses Frames (Arc für O(1)-Clone)
    pub network: Arc<SplineNetwork>,
    /// Aktueller Manipulationsmodus
    pub mode: ManipulationMode,
    /// Selektierte Nodes in Selektionsreihenfolge
    pub selected_node_ids: Vec<NodeId>,
    /// Kurven an selektierten Nodes
    pub highlighted_curves: Vec<CurveId>,
    /// Erster Node des Netzwerks
    pub first_node: Option<NodeId>,
    /// Letzter Node des Netzwerks
    pub last_node: Option<NodeId>,
    /// Aktives Handle (None bei leerer Selektion)
    pub handle: Option<ActiveHandle>,
    /// Tangenten-Knöpfe (nur bei genau einem selektierten Node)
    pub tangent_knobs: Vec<TangentKnob>,
    /// Up-Knöpfe der selektierten Nodes
    pub up_knobs: Vec<(NodeId, Vec3)>,
    /// Mess-Overlay (nur wenn Metriken aktiviert sind)
    pub metrics: Option<MetricsOverlay>,
    /// Node-IDs (nur im Debug-Modus)
    pub debug_labels: Vec<DebugLabel>,
}

impl OverlayScene {
    /// Gibt zurück, ob überhaupt ein Handle gezeichnet werden soll.
    pub fn has_handle(&self) -> bool {
        self.handle.is_some()
    }
}

/// Baut eine OverlayScene aus dem aktuellen SessionState.
pub fn build(state: &SessionState) -> OverlayScene {
    let network = &state.network;
    let selected: Vec<NodeId> = state
        .selection
        .selected_node_ids
        .iter()
        .copied()
        .filter(|id| network.contains_node(*id))
        .collect();
    let up_length = state.options.up_handle_length;

    let up_knobs: Vec<(NodeId, Vec3)> = selected
        .iter()
        .filter_map(|id| network.node(*id))
        .map(|node| (node.id, node.position + node.up * up_length))
        .collect();

    let tangent_knobs = match selected.as_slice() {
        [only] => tangent_knobs_for(network, *only),
        _ => Vec::new(),
    };

    let metrics = network
        .settings
        .metrics
        .show_metrics
        .then(|| build_metrics(state, &selected));

    let debug_labels = if network.settings.advanced.debugging_enabled {
        network
            .nodes()
            .map(|node| DebugLabel {
                node_id: node.id,
                position: node.position,
                text: format!("Node ID: {}", node.id),
            })
            .collect()
    } else {
        Vec::new()
    };

    OverlayScene {
        network: Arc::clone(network),
        mode: state.selection.mode,
        highlighted_curves: network.connected_curves(&selected).into_iter().collect(),
        first_node: network.first_node_id(),
        last_node: network.last_node_id(),
        handle: active_handle(state, &selected, &up_knobs),
        tangent_knobs,
        up_knobs,
        metrics,
        debug_labels,
        selected_node_ids: selected,
    }
}

fn tangent_knobs_for(network: &SplineNetwork, node_id: NodeId) -> Vec<TangentKnob> {
    network
        .connected_curves(&[node_id])
        .into_iter()
        .filter_map(|curve_id| network.curve(curve_id))
        .flat_map(|curve| {
            [
                TangentKnob {
                    curve_id: curve.id,
                    end: CurveEnd::Start,
                    anchor: curve.p0,
                    position: curve.p1,
                },
                TangentKnob {
                    curve_id: curve.id,
                    end: CurveEnd::End,
                    anchor: curve.p3,
                    position: curve.p2,
                },
            ]
        })
        .collect()
}

fn active_handle(
    state: &SessionState,
    selected: &[NodeId],
    up_knobs: &[(NodeId, Vec3)],
) -> Option<ActiveHandle> {
    let network = &state.network;
    if selected.is_empty() {
        return None;
    }
    match state.selection.mode {
        ManipulationMode::Node => network.centroid(selected).map(ActiveHandle::Centroid),
        ManipulationMode::StartTangent | ManipulationMode::EndTangent => {
            let end = match state.selection.mode {
                ManipulationMode::StartTangent => CurveEnd::Start,
                _ => CurveEnd::End,
            };
            let curve = network.curve(state.selection.selected_curve?)?;
            let anchor = match end {
                CurveEnd::Start => curve.p0,
                CurveEnd::End => curve.p3,
            };
            Some(ActiveHandle::Tangent {
                curve_id: curve.id,
                end,
                anchor,
                position: curve.tangent(end),
            })
        }
        ManipulationMode::Up => Some(ActiveHandle::Up(up_knobs.to_vec())),
        ManipulationMode::Scale => {
            let node = network.node(*selected.last()?)?;
            Some(ActiveHandle::Scale {
                position: node.position,
                scale: node.scale,
            })
        }
    }
}

/// Bei genau einem selektierten Node werden dessen Nachbarn (inkl. ihm selbst)
/// vermessen, sonst die Selektion selbst.
fn metric_nodes(network: &SplineNetwork, selected: &[NodeId]) -> Vec<NodeId> {
    let [only] = selected else {
        return selected.to_vec();
    };
    let mut unique = indexmap::IndexSet::new();
    for curve_id in network.connected_curves(&[*only]) {
        if let Some(curve) = network.curve(curve_id) {
            unique.insert(curve.start_id);
            unique.insert(curve.end_id);
        }
    }
    if unique.is_empty() {
        selected.to_vec()
    } else {
        unique.into_iter().collect()
    }
}

fn build_metrics(state: &SessionState, selected: &[NodeId]) -> MetricsOverlay {
    let network = &state.network;
    let settings = &network.settings.metrics;
    let adjacent = metric_nodes(network, selected);
    let average = metrics::average_metrics(network, selected);

    let mut overlay = MetricsOverlay {
        selection_polyline: selected
            .iter()
            .filter_map(|id| network.node(*id).map(|n| n.position))
            .collect(),
        ..MetricsOverlay::default()
    };

    let Some(&last) = selected.last() else {
        overlay.average_metrics = average;
        return overlay;
    };

    let mut node_count = adjacent.len();
    if selected.len() > 1 {
        if settings.measure_spline {
            overlay.measured_paths = measure_paths(state, &adjacent);
        }
        overlay.node_metrics.extend(metrics::node_metrics(network, last));
        let mut total = metrics::total_metrics(&average);
        if let Some(node) = network.node(last) {
            total.world_position = node.position;
        }
        overlay.total = Some(total);
        node_count = node_count.saturating_sub(1);
    }
    overlay.node_metrics.extend(
        adjacent
            .iter()
            .take(node_count)
            .filter_map(|id| metrics::node_metrics(network, *id)),
    );
    overlay.average_metrics = average;
    overlay
}

fn measure_paths(state: &SessionState, nodes: &[NodeId]) -> Vec<MeasuredPath> {
    let network = &state.network;
    let settings = &network.settings.metrics;
    let resolution = state.options.curve_sample_resolution;
    let intervals = state.options.accurate_length_intervals;

    nodes
        .windows(2)
        .filter_map(|pair| {
            let (from, to) = (pair[0], pair[1]);
            let path = shortest_path(network, from, to, resolution);
            if path.is_empty() {
                return None;
            }
            let mut markers =
                metrics::distance_markers(network, &path, settings.marker_distance, resolution);
            if !settings.show_gradient {
                for marker in &mut markers {
                    marker.gradient = None;
                }
            }
            Some(MeasuredPath {
                from,
                to,
                curve_ids: path.segments.iter().map(|s| s.curve_id).collect(),
                markers,
                label: metrics::path_label(network, &path, from, to, resolution, intervals),
            })
        })
        .collect()
}
