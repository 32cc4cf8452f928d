use super::*;
use approx::assert_relative_eq;

fn line_network(count: usize) -> (SplineNetwork, Vec<NodeId>) {
    let mut network = SplineNetwork::default();
    let ids: Vec<NodeId> = (0..count)
        .map(|i| network.add_node(Vec3::new(i as f32 * 10.0, 0.0, 0.0)))
        .collect();
    for pair in ids.windows(2) {
        network.connect(pair[0], pair[1]);
    }
    (network, ids)
}

#[test]
fn add_connect_delete_scenario() {
    let mut network = SplineNetwork::default();
    let p0 = Vec3::new(0.0, 0.0, 0.0);
    let p1 = Vec3::new(5.0, 1.0, 0.0);
    let n0 = network.add_node(p0);
    let n1 = network.add_node(p1);
    let curve_id = network.connect(n0, n1).expect("Kurve erwartet");

    assert_eq!(network.node_count(), 2);
    assert_eq!(network.curve_count(), 1);
    let curve = network.curve(curve_id).expect("Kurve vorhanden");
    assert_eq!(curve.p0, p0);
    assert_eq!(curve.p3, p1);

    network.remove_nodes(&[n0]);
    assert_eq!(network.node_count(), 1);
    assert_eq!(network.curve_count(), 0);
}

#[test]
fn connect_twice_creates_single_curve() {
    let mut network = SplineNetwork::default();
    let a = network.add_node(Vec3::ZERO);
    let b = network.add_node(Vec3::X);
    let first = network.connect(a, b);
    let second = network.connect(b, a);
    assert_eq!(first, second);
    assert_eq!(network.curve_count(), 1);
}

#[test]
fn multi_edges_when_allowed() {
    let mut network = SplineNetwork::default();
    network.settings.allow_multi_edges = true;
    let a = network.add_node(Vec3::ZERO);
    let b = network.add_node(Vec3::X);
    network.connect(a, b);
    network.connect(a, b);
    assert_eq!(network.curve_count(), 2);
}

#[test]
fn connect_rejects_self_loop_and_unknown_ids() {
    let mut network = SplineNetwork::default();
    let a = network.add_node(Vec3::ZERO);
    assert_eq!(network.connect(a, a), None);
    assert_eq!(network.connect(a, 999), None);
    assert_eq!(network.curve_count(), 0);
}

#[test]
fn remove_nodes_leaves_no_dangling_curves() {
    let (mut network, ids) = line_network(6);
    network.connect(ids[0], ids[5]);
    network.remove_nodes(&[ids[1], ids[4], 12345]);

    for curve in network.curves() {
        assert!(network.contains_node(curve.start_id));
        assert!(network.contains_node(curve.end_id));
    }
    assert_eq!(network.node_count(), 4);
}

#[test]
fn removing_every_node_leaves_valid_empty_network() {
    let (mut network, ids) = line_network(3);
    network.remove_nodes(&ids);
    assert_eq!(network.node_count(), 0);
    assert_eq!(network.curve_count(), 0);
    assert_eq!(network.first_node_id(), None);

    let (mut other, _) = line_network(3);
    other.remove_all_nodes();
    assert_eq!(other.node_count(), 0);
    assert_eq!(other.curve_count(), 0);
}

#[test]
fn node_ids_are_never_reused() {
    let mut network = SplineNetwork::default();
    let a = network.add_node(Vec3::ZERO);
    network.remove_nodes(&[a]);
    let b = network.add_node(Vec3::ZERO);
    assert_ne!(a, b);
}

#[test]
fn mutations_mark_dirty() {
    let mut network = SplineNetwork::default();
    assert!(!network.is_dirty());
    let a = network.add_node(Vec3::ZERO);
    assert!(network.take_dirty());
    assert!(!network.is_dirty());

    network.set_node_position(a, Vec3::ONE);
    assert!(network.take_dirty());

    network.remove_nodes(&[42]);
    assert!(!network.is_dirty());
}

#[test]
fn moving_node_resyncs_anchor_and_tangent() {
    let (mut network, ids) = line_network(2);
    let curve_id = network.curve_between(ids[0], ids[1]).expect("Kurve erwartet");
    network.set_node_position(ids[1], Vec3::new(10.0, 3.0, 0.0));

    let curve = network.curve(curve_id).expect("Kurve vorhanden");
    assert_eq!(curve.p3, Vec3::new(10.0, 3.0, 0.0));
    assert_relative_eq!(curve.p2.y, 3.0);
    assert_relative_eq!(curve.p1.y, 0.0);
}

#[test]
fn connected_curves_collects_incident_curves() {
    let (network, ids) = line_network(4);
    let curves = network.connected_curves(&[ids[1]]);
    assert_eq!(curves.len(), 2);
    assert!(network.connected_curves(&[]).is_empty());
}

#[test]
fn subdivide_inserts_midpoint_nodes_in_order() {
    let (mut network, ids) = line_network(3);
    let inserted = network.subdivide();

    assert_eq!(inserted, 2);
    assert_eq!(network.node_count(), 5);
    assert_eq!(network.curve_count(), 4);

    let xs: Vec<f32> = network.nodes().map(|n| n.position.x).collect();
    for (actual, expected) in xs.iter().zip([0.0, 5.0, 10.0, 15.0, 20.0]) {
        assert_relative_eq!(*actual, expected, epsilon = 1e-4);
    }
    assert_eq!(network.first_node_id(), Some(ids[0]));
    assert_eq!(network.last_node_id(), Some(ids[2]));
}

#[test]
fn simplify_removes_collinear_interior_nodes() {
    let (mut network, ids) = line_network(5);
    let removed = network.simplify(1.0, 0.5);

    assert_eq!(removed, 3);
    assert_eq!(network.node_count(), 2);
    assert_eq!(network.curve_count(), 1);
    assert!(network.curve_between(ids[0], ids[4]).is_some());
}

#[test]
fn simplify_keeps_significant_corners() {
    let mut network = SplineNetwork::default();
    let a = network.add_node(Vec3::new(0.0, 0.0, 0.0));
    let b = network.add_node(Vec3::new(10.0, 0.0, 0.0));
    let c = network.add_node(Vec3::new(10.0, 0.0, 10.0));
    network.connect(a, b);
    network.connect(b, c);

    assert_eq!(network.simplify(1.0, 0.5), 0);
    assert_eq!(network.node_count(), 3);
}

#[test]
fn simplify_scale_weights_height() {
    let mut network = SplineNetwork::default();
    let a = network.add_node(Vec3::new(0.0, 0.0, 0.0));
    let b = network.add_node(Vec3::new(10.0, 0.8, 0.0));
    let c = network.add_node(Vec3::new(20.0, 0.0, 0.0));
    network.connect(a, b);
    network.connect(b, c);

    let mut flattened = network.clone();
    assert_eq!(flattened.simplify(0.5, 0.5), 1);
    assert_eq!(network.simplify(1.0, 0.5), 0);
}

#[test]
fn smooth_aligns_interior_tangents() {
    let mut network = SplineNetwork::default();
    let a = network.add_node(Vec3::new(0.0, 0.0, 0.0));
    let b = network.add_node(Vec3::new(10.0, 0.0, 0.0));
    let c = network.add_node(Vec3::new(20.0, 0.0, 10.0));
    let ab = network.connect(a, b).expect("Kurve erwartet");
    let bc = network.connect(b, c).expect("Kurve erwartet");

    network.smooth(1.0);

    let b_pos = Vec3::new(10.0, 0.0, 0.0);
    let into_b = network.curve(ab).expect("ab").p2 - b_pos;
    let out_of_b = network.curve(bc).expect("bc").p1 - b_pos;
    let cos = into_b.normalize().dot(out_of_b.normalize());
    assert_relative_eq!(cos, -1.0, epsilon = 1e-4);
}

#[test]
fn smooth_skips_junctions_unless_enabled() {
    let mut network = SplineNetwork::default();
    let hub = network.add_node(Vec3::ZERO);
    let spokes: Vec<NodeId> = [Vec3::X, Vec3::Z, -Vec3::X]
        .iter()
        .map(|d| network.add_node(*d * 9.0))
        .collect();
    let curve_ids: Vec<CurveId> = spokes
        .iter()
        .filter_map(|&s| network.connect(hub, s))
        .collect();
    let before = network.curve(curve_ids[1]).expect("Kurve").p1;

    network.smooth(0.0);
    assert_eq!(network.curve(curve_ids[1]).expect("Kurve").p1, before);

    network.settings.smooth_intersections = true;
    network.smooth(0.0);
    assert_eq!(network.curve(curve_ids[1]).expect("Kurve").p1, Vec3::ZERO);
}

struct FlatGround;

impl GroundProbe for FlatGround {
    fn ground_point(&self, position: Vec3) -> Option<Vec3> {
        (position.x >= 0.0).then_some(Vec3::new(position.x, -2.0, position.z))
    }
}

#[test]
fn snap_to_ground_moves_nodes_with_hits_only() {
    let mut network = SplineNetwork::default();
    let a = network.add_node(Vec3::new(1.0, 5.0, 0.0));
    let b = network.add_node(Vec3::new(-1.0, 5.0, 0.0));
    let curve_id = network.connect(a, b).expect("Kurve erwartet");

    assert_eq!(network.snap_to_ground(&FlatGround), 1);
    assert_relative_eq!(network.node(a).expect("a").position.y, -2.0);
    assert_relative_eq!(network.node(b).expect("b").position.y, 5.0);
    assert_relative_eq!(network.curve(curve_id).expect("Kurve").p0.y, -2.0);
}

#[test]
fn centroid_skips_unknown_ids() {
    let (network, ids) = line_network(3);
    let centroid = network.centroid(&[ids[0], ids[2], 777]).expect("Mittelpunkt");
    assert_relative_eq!(centroid.x, 10.0);
    assert_eq!(network.centroid(&[777]), None);
}

#[test]
fn advance_ids_past_skips_ids_of_outgoing_state() {
    let (older, _) = line_network(2);
    let (mut newer, ids) = line_network(2);
    let extra = newer.add_node(Vec3::Z);
    let extra_curve = newer.connect(ids[1], extra).expect("Kurve erwartet");
    newer.extensions_mut().push(None);

    let mut restored = older.clone();
    restored.advance_ids_past(&newer);

    let node = restored.add_node(Vec3::Y);
    assert!(node > extra);
    let curve = restored.connect(ids[0], node).expect("Kurve erwartet");
    assert!(curve > extra_curve);
    let entry = restored.extensions_mut().push(None);
    assert_eq!(entry, 2);

    // Ein Netzwerk mit kleineren Zählern setzt nichts zurück
    let before = restored.add_node(Vec3::ONE);
    restored.advance_ids_past(&older);
    assert_eq!(restored.add_node(Vec3::NEG_ONE), before + 1);
}
