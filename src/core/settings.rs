//! Netzwerk-weite Einstellungen (Glättung, Vereinfachung, Pfadsuche, Metriken).

use serde::{Deserialize, Serialize};

/// Minimale Glättungsstärke.
pub const SMOOTH_STRENGTH_MIN: f32 = 0.0;
/// Maximale Glättungsstärke.
pub const SMOOTH_STRENGTH_MAX: f32 = 1.0;
/// Wertebereich der Vereinfachungs-Toleranz (Welteinheiten).
pub const SIMPLIFY_EPSILON_RANGE: (f32, f32) = (0.5, 5.0);
/// Wertebereich der Y-Skalierung bei der Vereinfachung.
pub const SIMPLIFY_SCALE_RANGE: (f32, f32) = (0.5, 1.5);
/// Wertebereich der Reisekosten pro Kurve.
pub const CURVE_TRAVEL_COST_RANGE: (f32, f32) = (0.02, 1.0);
/// Kleinster Abstand zwischen zwei Distanz-Markern (Welteinheiten).
pub const MARKER_DISTANCE_MIN: f32 = 0.5;

/// Einstellungen der Pfadsuche.
///
/// Nur `curve_travel_cost` fließt in die Kurven-Pfadsuche ein; die übrigen
/// Werte werden für den Host-Pfadfinder (Terrain) gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathFindingSettings {
    /// Pfadsuche aktiv
    pub enabled: bool,
    /// Existierende Kurven bei der Pfadsuche mitbenutzen
    pub use_existing_curves: bool,
    /// Kostenfaktor pro Längeneinheit entlang existierender Kurven
    pub curve_travel_cost: f32,
    /// Maximale Steigung in Prozent
    pub max_grade: f32,
    /// Rasterweite des Terrain-Pfadfinders
    pub cell_size: u32,
    /// Minimale erlaubte Höhe
    pub min_height: f32,
    /// Maximale erlaubte Höhe
    pub max_height: f32,
    /// Alternative Heuristik verwenden
    pub use_heuristic_b: bool,
    /// Gewichtung der Steigung (nur ohne Heuristik B)
    pub slope_strength_factor: f32,
}

impl Default for PathFindingSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            use_existing_curves: true,
            curve_travel_cost: 0.5,
            max_grade: 15.0,
            cell_size: 4,
            min_height: 0.0,
            max_height: 1000.0,
            use_heuristic_b: false,
            slope_strength_factor: 1.0,
        }
    }
}

/// Einstellungen der Mess-Overlays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSettings {
    /// Metriken im Overlay anzeigen
    pub show_metrics: bool,
    /// Abstand der Distanz-Marker entlang eines gemessenen Pfads
    pub marker_distance: f32,
    /// Kürzesten Pfad zwischen selektierten Nodes vermessen
    pub measure_spline: bool,
    /// Steigung (Grade/Slope) an den Markern anzeigen
    pub show_gradient: bool,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            show_metrics: false,
            marker_distance: 10.0,
            measure_spline: true,
            show_gradient: false,
        }
    }
}

/// Erweiterte Einstellungen (Debug-Ausgaben).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedSettings {
    /// Node-IDs im Overlay einblenden
    pub debugging_enabled: bool,
    /// Maximale Kamera-Distanz, bis zu der Debug-Infos gezeichnet werden
    pub visualization_proximity: f32,
}

impl Default for AdvancedSettings {
    fn default() -> Self {
        Self {
            debugging_enabled: false,
            visualization_proximity: 500.0,
        }
    }
}

/// Alle Einstellungen eines Spline-Netzwerks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplineSettings {
    /// Glättungsstärke (0..1)
    pub smooth_strength: f32,
    /// Nach abgeschlossenen Drags automatisch glätten
    pub auto_smooth: bool,
    /// Auch Kreuzungen (Grad > 2) glätten
    pub smooth_intersections: bool,
    /// Nach dem Unterteilen automatisch auf den Boden setzen
    pub auto_snap_on_subdivide: bool,
    /// Toleranz der Vereinfachung (Welteinheiten)
    pub simplify_epsilon: f32,
    /// Y-Skalierung bei der Vereinfachung
    pub simplify_scale: f32,
    /// Mehrere Kurven zwischen demselben Node-Paar erlauben
    pub allow_multi_edges: bool,
    /// Pfadsuche
    pub path_finding: PathFindingSettings,
    /// Mess-Overlays
    pub metrics: MetricsSettings,
    /// Debug
    pub advanced: AdvancedSettings,
}

impl Default for SplineSettings {
    fn default() -> Self {
        Self {
            smooth_strength: 0.5,
            auto_smooth: false,
            smooth_intersections: false,
            auto_snap_on_subdivide: false,
            simplify_epsilon: 1.0,
            simplify_scale: 1.0,
            allow_multi_edges: false,
            path_finding: PathFindingSettings::default(),
            metrics: MetricsSettings::default(),
            advanced: AdvancedSettings::default(),
        }
    }
}

impl SplineSettings {
    /// Setzt die Glättungsstärke (geklemmt auf 0..1).
    pub fn set_smooth_strength(&mut self, value: f32) {
        self.smooth_strength = value.clamp(SMOOTH_STRENGTH_MIN, SMOOTH_STRENGTH_MAX);
    }

    /// Setzt die Vereinfachungs-Toleranz (geklemmt).
    pub fn set_simplify_epsilon(&mut self, value: f32) {
        self.simplify_epsilon = value.clamp(SIMPLIFY_EPSILON_RANGE.0, SIMPLIFY_EPSILON_RANGE.1);
    }

    /// Setzt die Y-Skalierung der Vereinfachung (geklemmt).
    pub fn set_simplify_scale(&mut self, value: f32) {
        self.simplify_scale = value.clamp(SIMPLIFY_SCALE_RANGE.0, SIMPLIFY_SCALE_RANGE.1);
    }

    /// Setzt die Reisekosten pro Kurve (geklemmt).
    pub fn set_curve_travel_cost(&mut self, value: f32) {
        self.path_finding.curve_travel_cost =
            value.clamp(CURVE_TRAVEL_COST_RANGE.0, CURVE_TRAVEL_COST_RANGE.1);
    }

    /// Kopie mit allen Werten in ihren gültigen Bereichen.
    pub fn clamped(mut self) -> Self {
        self.set_smooth_strength(self.smooth_strength);
        self.set_simplify_epsilon(self.simplify_epsilon);
        self.set_simplify_scale(self.simplify_scale);
        self.set_curve_travel_cost(self.path_finding.curve_travel_cost);
        if self.metrics.marker_distance <= 0.0 {
            self.metrics.marker_distance = MetricsSettings::default().marker_distance;
        }
        self.metrics.marker_distance = self.metrics.marker_distance.max(MARKER_DISTANCE_MIN);
        self
    }

    /// Setzt den Marker-Abstand; Werte <= 0 werden ignoriert, kleine Werte
    /// auf [`MARKER_DISTANCE_MIN`] angehoben.
    pub fn set_marker_distance(&mut self, value: f32) {
        if value > 0.0 {
            self.metrics.marker_distance = value.max(MARKER_DISTANCE_MIN);
        }
    }
}
