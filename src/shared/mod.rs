//! Geteilte Typen und Helfer ohne Layer-Abhängigkeit.
//!
//! Enthält die Bézier-Geometrie (von `core` und `app` genutzt) und die
//! serialisierbaren Editor-Optionen.

pub mod bezier;
pub mod options;

pub use options::EditorOptions;
