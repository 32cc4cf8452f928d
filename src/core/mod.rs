//! Core-Domänentypen: Nodes, Kurven, Spline-Netzwerk, Extensions, Pfad-Abfragen.
//!
//! Kein Wissen über Eingabe, Selektion oder Undo; alle Mutationen laufen
//! über [`SplineNetwork`].

pub mod curve;
pub mod extension;
pub mod metrics;
pub mod network;
pub mod node;
pub mod path;
pub mod settings;

pub use curve::{CurveEnd, CurveId, SplineCurve};
pub use extension::{EntryId, ExtensionEntry, ExtensionList, SplineExtension};
pub use metrics::{DistanceMarker, PointMetrics};
pub use network::{GroundProbe, SplineNetwork};
pub use node::{NodeId, SplineNode};
pub use path::{shortest_path, PathSample, PathSegment, SplinePath};
pub use settings::{
    AdvancedSettings, MetricsSettings, PathFindingSettings, SplineSettings,
};
