//! Netzwerk-weite Formoperationen: Unterteilen, Vereinfachen, Glätten, Boden-Snap.

use super::{GroundProbe, SplineNetwork};
use crate::core::{CurveEnd, CurveId, NodeId, SplineNode};
use crate::shared::bezier;
use glam::Vec3;
use std::collections::HashSet;

/// Ein Kettenabschnitt aus Nodes mit Grad 2 zwischen zwei Endpunkten.
struct Chain {
    nodes: Vec<NodeId>,
    curves: Vec<CurveId>,
}

impl SplineNetwork {
    /// Teilt jede Kurve bei t = 0.5 und fügt dort einen neuen Node ein.
    ///
    /// Der neue Node landet in der Reihenfolge direkt vor dem späteren der
    /// beiden Endpunkte. Gibt die Anzahl eingefügter Nodes zurück.
    pub fn subdivide(&mut self) -> usize {
        let curve_ids: Vec<CurveId> = self.curves.keys().copied().collect();
        let mut inserted = 0;
        for curve_id in curve_ids {
            let Some(curve) = self.curves.get(&curve_id).cloned() else {
                continue;
            };
            let (Some(start), Some(end)) = (
                self.nodes.get(&curve.start_id).cloned(),
                self.nodes.get(&curve.end_id).cloned(),
            ) else {
                continue;
            };
            let (first, second) = bezier::split_cubic(&curve.controls(), 0.5);
            let mut mid = SplineNode::new(0, first[3]);
            mid.up = start.up.lerp(end.up, 0.5).try_normalize().unwrap_or(Vec3::Y);
            mid.scale = start.scale.lerp(end.scale, 0.5);

            let index = match (self.node_index(start.id), self.node_index(end.id)) {
                (Some(a), Some(b)) => a.max(b),
                _ => self.nodes.len(),
            };
            let mid_id = self.insert_node_at(index, mid);
            self.curves.shift_remove(&curve_id);
            let a = self.insert_curve(curve.start_id, mid_id, first);
            let b = self.insert_curve(mid_id, curve.end_id, second);
            for id in [a, b] {
                if let Some(c) = self.curves.get_mut(&id) {
                    c.travel_cost = curve.travel_cost;
                }
            }
            inserted += 1;
        }
        if inserted > 0 {
            log::info!("{} Kurven unterteilt", inserted);
        }
        inserted
    }

    /// Entfernt überflüssige Zwischen-Nodes (Ramer-Douglas-Peucker je Kette).
    ///
    /// Nur Nodes mit genau zwei Kurven sind Kandidaten. Die Y-Achse wird für
    /// die Abstandsmessung mit `scale_y` gewichtet. Gibt die Anzahl entfernter
    /// Nodes zurück.
    pub fn simplify(&mut self, scale_y: f32, epsilon: f32) -> usize {
        let scale = Vec3::new(1.0, scale_y, 1.0);
        let mut removed = 0;
        for chain in self.collect_chains() {
            let points: Vec<Vec3> = chain
                .nodes
                .iter()
                .filter_map(|id| self.nodes.get(id).map(|n| n.position * scale))
                .collect();
            if points.len() != chain.nodes.len() || points.len() < 3 {
                continue;
            }
            let mut keep = vec![false; points.len()];
            keep[0] = true;
            keep[points.len() - 1] = true;
            rdp_mark(&points, 0, points.len() - 1, epsilon, &mut keep);

            let mut last_kept = 0;
            for i in 1..points.len() {
                if !keep[i] {
                    continue;
                }
                if i > last_kept + 1 {
                    removed += self.bridge_chain(&chain, last_kept, i);
                }
                last_kept = i;
            }
        }
        if removed > 0 {
            self.dirty = true;
            log::info!("Vereinfachung: {} Nodes entfernt", removed);
        }
        removed
    }

    /// Ersetzt `chain.nodes[from..=to]` durch eine einzige Kurve.
    fn bridge_chain(&mut self, chain: &Chain, from: usize, to: usize) -> usize {
        let start_id = chain.nodes[from];
        let end_id = chain.nodes[to];
        let (Some(first), Some(last)) = (
            self.curves.get(&chain.curves[from]).cloned(),
            self.curves.get(&chain.curves[to - 1]).cloned(),
        ) else {
            return 0;
        };
        let (Some(start), Some(end)) = (
            self.nodes.get(&start_id).map(|n| n.position),
            self.nodes.get(&end_id).map(|n| n.position),
        ) else {
            return 0;
        };

        let outer_start = tangent_at(&first, start_id);
        let outer_end = tangent_at(&last, end_id);
        let reach = start.distance(end) / 3.0;
        let straight = bezier::straight_controls(start, end);
        let p1 = (outer_start - start)
            .try_normalize()
            .map_or(straight[1], |dir| start + dir * reach);
        let p2 = (outer_end - end)
            .try_normalize()
            .map_or(straight[2], |dir| end + dir * reach);

        let interior = &chain.nodes[from + 1..to];
        let travel_cost = first.travel_cost;
        let count = self.remove_nodes(interior);
        if self.settings.allow_multi_edges || self.curve_between(start_id, end_id).is_none() {
            let id = self.insert_curve(start_id, end_id, [start, p1, p2, end]);
            if let Some(c) = self.curves.get_mut(&id) {
                c.travel_cost = travel_cost;
            }
        }
        count
    }

    /// Sammelt alle offenen Ketten zwischen Nodes mit Grad != 2.
    ///
    /// Reine Zyklen (alle Nodes Grad 2) und Ketten, die zu ihrem Start
    /// zurückkehren, werden übersprungen.
    fn collect_chains(&self) -> Vec<Chain> {
        let mut visited: HashSet<CurveId> = HashSet::new();
        let mut chains = Vec::new();
        for &anchor in self.nodes.keys() {
            if self.degree(anchor) == 2 {
                continue;
            }
            let incident: Vec<CurveId> = self
                .curves
                .values()
                .filter(|c| c.touches(anchor))
                .map(|c| c.id)
                .collect();
            for first_curve in incident {
                if visited.contains(&first_curve) {
                    continue;
                }
                let mut chain = Chain {
                    nodes: vec![anchor],
                    curves: Vec::new(),
                };
                let mut current = anchor;
                let mut curve_id = first_curve;
                loop {
                    visited.insert(curve_id);
                    chain.curves.push(curve_id);
                    let Some(next) = self.curves.get(&curve_id).and_then(|c| c.other_end(current))
                    else {
                        break;
                    };
                    chain.nodes.push(next);
                    current = next;
                    if self.degree(next) != 2 {
                        break;
                    }
                    let Some(following) = self
                        .curves
                        .values()
                        .find(|c| c.touches(next) && c.id != curve_id)
                        .map(|c| c.id)
                    else {
                        break;
                    };
                    if visited.contains(&following) {
                        break;
                    }
                    curve_id = following;
                }
                if chain.nodes.first() != chain.nodes.last() {
                    chains.push(chain);
                }
            }
        }
        chains
    }

    /// Berechnet die Tangenten aller Kurven neu.
    ///
    /// Die Richtung an einem Node zeigt vom gegenüberliegenden Nachbarn zum
    /// jeweiligen Nachbarn; die Tangentenlänge ist `strength * Segmentlänge / 3`.
    /// Kreuzungen (Grad > 2) nur bei `smooth_intersections`.
    pub fn smooth(&mut self, strength: f32) {
        let strength = strength.clamp(0.0, 1.0);
        let smooth_intersections = self.settings.smooth_intersections;
        let mut updates: Vec<(CurveId, CurveEnd, Vec3)> = Vec::new();

        for node in self.nodes.values() {
            let incident: Vec<(CurveId, CurveEnd, Vec3)> = self
                .curves
                .values()
                .filter_map(|c| {
                    let end = if c.start_id == node.id {
                        CurveEnd::Start
                    } else if c.end_id == node.id {
                        CurveEnd::End
                    } else {
                        return None;
                    };
                    let neighbor = self.nodes.get(&c.other_end(node.id)?)?.position;
                    Some((c.id, end, neighbor))
                })
                .collect();
            if incident.len() > 2 && !smooth_intersections {
                continue;
            }
            for &(curve_id, end, neighbor) in &incident {
                let to_neighbor = neighbor - node.position;
                let reach = to_neighbor.length() * strength / 3.0;
                let own_dir = to_neighbor.normalize_or_zero();
                let opposite = incident
                    .iter()
                    .filter(|(id, _, _)| *id != curve_id)
                    .map(|&(_, _, p)| p)
                    .min_by(|a, b| {
                        let da = (*a - node.position).normalize_or_zero().dot(own_dir);
                        let db = (*b - node.position).normalize_or_zero().dot(own_dir);
                        da.total_cmp(&db)
                    });
                let dir = opposite
                    .and_then(|o| (neighbor - o).try_normalize())
                    .unwrap_or(own_dir);
                updates.push((curve_id, end, node.position + dir * reach));
            }
        }

        for (curve_id, end, point) in updates {
            if let Some(curve) = self.curves.get_mut(&curve_id) {
                curve.set_tangent(end, point);
            }
        }
        self.dirty = true;
        log::info!("Netzwerk geglättet (Stärke {:.2})", strength);
    }

    /// Setzt jeden Node auf den vom Host gemeldeten Bodenpunkt.
    ///
    /// Nodes ohne Bodentreffer bleiben unverändert. Gibt die Anzahl
    /// verschobener Nodes zurück.
    pub fn snap_to_ground(&mut self, probe: &dyn GroundProbe) -> usize {
        let targets: Vec<(NodeId, Vec3)> = self
            .nodes
            .values()
            .filter_map(|n| probe.ground_point(n.position).map(|p| (n.id, p)))
            .collect();
        for &(id, point) in &targets {
            self.set_node_position(id, point);
        }
        if !targets.is_empty() {
            log::info!("{} Nodes auf den Boden gesetzt", targets.len());
        }
        targets.len()
    }
}

/// Tangentenpunkt einer Kurve an dem Ende, das an `node_id` hängt.
fn tangent_at(curve: &crate::core::SplineCurve, node_id: NodeId) -> Vec3 {
    if curve.start_id == node_id {
        curve.p1
    } else {
        curve.p2
    }
}

/// Markiert rekursiv die zu behaltenden Punkte zwischen `first` und `last`.
fn rdp_mark(points: &[Vec3], first: usize, last: usize, epsilon: f32, keep: &mut [bool]) {
    if last <= first + 1 {
        return;
    }
    let (index, distance) = (first + 1..last)
        .map(|i| (i, distance_to_segment(points[i], points[first], points[last])))
        .fold((first, 0.0_f32), |best, cur| if cur.1 > best.1 { cur } else { best });
    if distance > epsilon {
        keep[index] = true;
        rdp_mark(points, first, index, epsilon, keep);
        rdp_mark(points, index, last, epsilon, keep);
    }
}

/// Abstand eines Punktes zur Strecke a-b.
fn distance_to_segment(p: Vec3, a: Vec3, b: Vec3) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
