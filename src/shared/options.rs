//! Zentrale Konfiguration des Spline-Editors.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::core::SplineSettings;
use serde::{Deserialize, Serialize};

// ── Gesten ──────────────────────────────────────────────────────────

/// Minimale quadrierte Zeiger-Verschiebung (Screen-Pixel²), ab der eine Geste als Drag gilt.
pub const MIN_DRAG_DISTANCE_SQ: f32 = 0.1;
/// Länge des Up-Handles in Welteinheiten.
pub const UP_HANDLE_LENGTH: f32 = 8.0;

// ── Undo ────────────────────────────────────────────────────────────

/// Maximale Anzahl Undo-Schritte.
pub const UNDO_DEPTH: usize = 200;

// ── Pfad-Abfragen ───────────────────────────────────────────────────

/// Stützstellen je Kurve für Längen und Bogenlängen-Tabellen.
pub const CURVE_SAMPLE_RESOLUTION: usize = 32;
/// Teilintervalle für die genaue Längenberechnung.
pub const ACCURATE_LENGTH_INTERVALS: usize = 8;

// ── Kamera ──────────────────────────────────────────────────────────

/// Ausdehnung beim Fokussieren der Selektion (Taste F).
pub const FOCUS_EXTENT: f32 = 5.0;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `spline_network_editor.toml` neben der Binary des Hosts gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorOptions {
    // ── Gesten ──────────────────────────────────────────────────
    /// Drag-Schwelle (quadrierte Screen-Pixel)
    #[serde(default = "default_min_drag_distance_sq")]
    pub min_drag_distance_sq: f32,
    /// Länge des Up-Handles
    #[serde(default = "default_up_handle_length")]
    pub up_handle_length: f32,

    // ── Undo ────────────────────────────────────────────────────
    /// Maximale Undo-Tiefe
    #[serde(default = "default_undo_depth")]
    pub undo_depth: usize,

    // ── Pfad-Abfragen ───────────────────────────────────────────
    /// Stützstellen je Kurve (Länge, Abtastung)
    #[serde(default = "default_curve_sample_resolution")]
    pub curve_sample_resolution: usize,
    /// Teilintervalle der genauen Länge
    #[serde(default = "default_accurate_length_intervals")]
    pub accurate_length_intervals: usize,

    // ── Kamera ──────────────────────────────────────────────────
    /// Ausdehnung beim Fokussieren
    #[serde(default = "default_focus_extent")]
    pub focus_extent: f32,

    // ── Netzwerk ────────────────────────────────────────────────
    /// Einstellungen für neu angelegte Netzwerke
    #[serde(default)]
    pub default_spline_settings: SplineSettings,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            min_drag_distance_sq: MIN_DRAG_DISTANCE_SQ,
            up_handle_length: UP_HANDLE_LENGTH,
            undo_depth: UNDO_DEPTH,
            curve_sample_resolution: CURVE_SAMPLE_RESOLUTION,
            accurate_length_intervals: ACCURATE_LENGTH_INTERVALS,
            focus_extent: FOCUS_EXTENT,
            default_spline_settings: SplineSettings::default(),
        }
    }
}

fn default_min_drag_distance_sq() -> f32 {
    MIN_DRAG_DISTANCE_SQ
}

fn default_up_handle_length() -> f32 {
    UP_HANDLE_LENGTH
}

fn default_undo_depth() -> usize {
    UNDO_DEPTH
}

fn default_curve_sample_resolution() -> usize {
    CURVE_SAMPLE_RESOLUTION
}

fn default_accurate_length_intervals() -> usize {
    ACCURATE_LENGTH_INTERVALS
}

fn default_focus_extent() -> f32 {
    FOCUS_EXTENT
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("spline_network_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("spline_network_editor.toml")
    }

    /// Prüft ob eine quadrierte Zeiger-Verschiebung die Drag-Schwelle überschreitet.
    pub fn exceeds_drag_threshold(&self, displacement_sq: f32) -> bool {
        displacement_sq > self.min_drag_distance_sq
    }
}
