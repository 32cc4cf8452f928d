//! Use-Case: Manipulationsmodus und Host-Werkzeug.

use crate::app::events::{HostTool, ManipulationMode};
use crate::app::SessionState;

/// Setzt den Manipulationsmodus.
pub fn set_mode(state: &mut SessionState, mode: ManipulationMode) {
    if state.selection.mode != mode {
        log::debug!("Modus: {:?} -> {:?}", state.selection.mode, mode);
        state.selection.mode = mode;
    }
}

/// Merkt sich das aktive Host-Werkzeug.
pub fn set_host_tool(state: &mut SessionState, tool: HostTool) {
    state.selection.host_tool = tool;
}
