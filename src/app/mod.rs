//! Application-Layer: Controller, Session-State, Events und Use-Cases.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod extensions;
pub mod history;
pub mod host;
mod intent_mapping;
pub mod overlay;
pub mod selection;
/// Session-State
///
/// Expliziter Kontext einer Editier-Session (Netzwerk, Selektion, Geste, Historie).
pub mod state;
pub mod transaction;
pub mod use_cases;

pub use crate::core::SplineNetwork;
pub use command_log::CommandLog;
pub use controller::SessionController;
pub use events::{
    HostTool, Key, ManipulationMode, Modifiers, PointerTarget, SessionCommand, SessionIntent,
    SessionNotification,
};
pub use extensions::{EditorFactory, ExtensionEditor, ExtensionEditorHost};
pub use history::{EditHistory, Snapshot};
pub use host::{HostServices, RayHit, RayProvider};
pub use overlay::{build as build_overlay, OverlayScene};
pub use selection::SelectionState;
pub use state::SessionState;
pub use transaction::{GestureId, TransactionCoalescer, TransactionError};
