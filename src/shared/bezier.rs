//! Reine Geometrie-Funktionen für kubische Bézier-Segmente.
//!
//! Layer-neutral: wird von `core` (Kurven, Pfad-Abfragen) und `app`
//! (Overlay, Handles) genutzt, ohne Zirkel-Abhängigkeiten zu erzeugen.

use glam::Vec3;

/// Die vier Kontrollpunkte eines kubischen Segments (P0, P1, P2, P3).
pub type CubicControls = [Vec3; 4];

/// Gauss-Legendre-Stützstellen (5 Punkte) auf [-1, 1].
const GAUSS_NODES: [f32; 5] = [
    0.0,
    -0.538_469_3,
    0.538_469_3,
    -0.906_179_86,
    0.906_179_86,
];
/// Zugehörige Gewichte.
const GAUSS_WEIGHTS: [f32; 5] = [
    0.568_888_9,
    0.478_628_67,
    0.478_628_67,
    0.236_926_88,
    0.236_926_88,
];

/// Berechnet einen Punkt auf dem Segment (t ∈ [0, 1]).
pub fn cubic_point(c: &CubicControls, t: f32) -> Vec3 {
    let u = 1.0 - t;
    let uu = u * u;
    let tt = t * t;
    c[0] * (uu * u) + c[1] * (3.0 * uu * t) + c[2] * (3.0 * u * tt) + c[3] * (tt * t)
}

/// Erste Ableitung nach t (Tangentenvektor, nicht normiert).
pub fn cubic_derivative(c: &CubicControls, t: f32) -> Vec3 {
    let u = 1.0 - t;
    (c[1] - c[0]) * (3.0 * u * u) + (c[2] - c[1]) * (6.0 * u * t) + (c[3] - c[2]) * (3.0 * t * t)
}

/// Teilt ein Segment bei `t` (de Casteljau) in zwei Segmente.
pub fn split_cubic(c: &CubicControls, t: f32) -> (CubicControls, CubicControls) {
    let p01 = c[0].lerp(c[1], t);
    let p12 = c[1].lerp(c[2], t);
    let p23 = c[2].lerp(c[3], t);
    let p012 = p01.lerp(p12, t);
    let p123 = p12.lerp(p23, t);
    let mid = p012.lerp(p123, t);
    ([c[0], p01, p012, mid], [mid, p123, p23, c[3]])
}

/// Standard-Kontrollpunkte für eine gerade Verbindung (Tangenten auf 1/3 und 2/3).
pub fn straight_controls(start: Vec3, end: Vec3) -> CubicControls {
    let third = (end - start) / 3.0;
    [start, start + third, end - third, end]
}

/// Approximierte Länge über eine Polyline mit `samples` Teilstrecken.
pub fn approx_length(c: &CubicControls, samples: usize) -> f32 {
    let samples = samples.max(1);
    let mut length = 0.0;
    let mut prev = c[0];
    for i in 1..=samples {
        let p = cubic_point(c, i as f32 / samples as f32);
        length += prev.distance(p);
        prev = p;
    }
    length
}

/// Genauere Länge: Gauss-Legendre-Integration von |B'(t)| über `intervals` Teilintervalle.
pub fn accurate_length(c: &CubicControls, intervals: usize) -> f32 {
    let intervals = intervals.max(1);
    let step = 1.0 / intervals as f32;
    let half = step * 0.5;
    let mut length = 0.0;
    for i in 0..intervals {
        let mid = (i as f32 + 0.5) * step;
        for (x, w) in GAUSS_NODES.iter().zip(GAUSS_WEIGHTS.iter()) {
            length += w * cubic_derivative(c, mid + half * x).length();
        }
    }
    length * half
}

/// Kumulative Bogenlängen-Tabelle: Eintrag `i` = Länge bis t = i / resolution.
pub fn arc_length_table(c: &CubicControls, resolution: usize) -> Vec<f32> {
    let resolution = resolution.max(1);
    let mut table = Vec::with_capacity(resolution + 1);
    table.push(0.0);
    let mut prev = c[0];
    let mut total = 0.0;
    for i in 1..=resolution {
        let p = cubic_point(c, i as f32 / resolution as f32);
        total += prev.distance(p);
        table.push(total);
        prev = p;
    }
    table
}

/// Sucht in einer Bogenlängen-Tabelle den Parameter t zur gegebenen Distanz.
///
/// Distanzen außerhalb [0, Gesamtlänge] werden auf die Enden geklemmt.
pub fn t_at_distance(table: &[f32], distance: f32) -> f32 {
    let Some(&total) = table.last() else {
        return 0.0;
    };
    let segments = table.len() - 1;
    if segments == 0 || total <= f32::EPSILON || distance <= 0.0 {
        return 0.0;
    }
    if distance >= total {
        return 1.0;
    }
    // Erster Index mit kumulativer Länge >= distance
    let idx = table.partition_point(|&d| d < distance).max(1);
    let before = table[idx - 1];
    let after = table[idx];
    let span = after - before;
    let local = if span > f32::EPSILON {
        (distance - before) / span
    } else {
        0.0
    };
    ((idx - 1) as f32 + local) / segments as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn line() -> CubicControls {
        straight_controls(Vec3::ZERO, Vec3::new(9.0, 0.0, 0.0))
    }

    #[test]
    fn endpoints_are_interpolated() {
        let c = [
            Vec3::ZERO,
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(3.0, 2.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
        ];
        assert_eq!(cubic_point(&c, 0.0), c[0]);
        assert_eq!(cubic_point(&c, 1.0), c[3]);
    }

    #[test]
    fn straight_line_lengths_agree() {
        let c = line();
        assert_relative_eq!(approx_length(&c, 8), 9.0, epsilon = 1e-4);
        assert_relative_eq!(accurate_length(&c, 4), 9.0, epsilon = 1e-3);
    }

    #[test]
    fn split_keeps_shared_midpoint() {
        let c = [
            Vec3::ZERO,
            Vec3::new(0.0, 4.0, 0.0),
            Vec3::new(4.0, 4.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
        ];
        let (a, b) = split_cubic(&c, 0.5);
        assert_eq!(a[3], b[0]);
        assert_relative_eq!(a[3].x, cubic_point(&c, 0.5).x, epsilon = 1e-5);
        assert_relative_eq!(a[3].y, cubic_point(&c, 0.5).y, epsilon = 1e-5);
    }

    #[test]
    fn t_at_distance_on_line_is_linear() {
        let table = arc_length_table(&line(), 32);
        assert_relative_eq!(t_at_distance(&table, 4.5), 0.5, epsilon = 1e-4);
        assert_eq!(t_at_distance(&table, -1.0), 0.0);
        assert_eq!(t_at_distance(&table, 100.0), 1.0);
    }
}
