//! Spline Network Editor Library.
//! Interaktionskern für das Bearbeiten von Spline-Netzwerken, als Library
//! exportiert für Host-Integrationen und Tests.

pub mod app;
pub mod core;
pub mod shared;

pub use app::{
    EditorFactory, ExtensionEditor, HostServices, HostTool, Key, ManipulationMode, Modifiers,
    OverlayScene, PointerTarget, RayHit, RayProvider, SessionCommand, SessionController,
    SessionIntent, SessionNotification, SessionState,
};
pub use core::{
    shortest_path, CurveEnd, CurveId, ExtensionEntry, GroundProbe, NodeId, SplineCurve,
    SplineExtension, SplineNetwork, SplineNode, SplinePath, SplineSettings,
};
pub use shared::EditorOptions;
