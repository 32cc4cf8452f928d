//! Session-Controller für zentrale Event-Verarbeitung.

use super::overlay::{self, OverlayScene};
use super::use_cases;
use super::{SessionCommand, SessionIntent, SessionState};
use crate::core::SplineNetwork;
use std::sync::Arc;

/// Orchestriert Host-Events und Use-Cases auf den SessionState.
#[derive(Default)]
pub struct SessionController;

impl SessionController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(
        &mut self,
        state: &mut SessionState,
        intent: SessionIntent,
    ) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(
        &self,
        state: &SessionState,
        intent: SessionIntent,
    ) -> Vec<SessionCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem SessionState aus.
    pub fn handle_command(
        &mut self,
        state: &mut SessionState,
        command: SessionCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use crate::app::use_cases::{
            editing, extensions, gesture, history, manipulation, network, selection,
        };

        match command {
            // === Geste ===
            SessionCommand::BeginGesture { screen_pos } => {
                gesture::begin_gesture(state, screen_pos)
            }
            SessionCommand::EndGesture { screen_pos } => gesture::end_gesture(state, screen_pos),
            SessionCommand::CommitPending => gesture::commit_pending(state),

            // === Selektion ===
            SessionCommand::SelectNode { node_id, additive } => {
                selection::select_node(state, node_id, additive)
            }
            SessionCommand::CollapseSelection { node_id } => {
                selection::collapse_selection(state, node_id)
            }
            SessionCommand::SelectTangent { curve_id, end } => {
                selection::select_tangent(state, curve_id, end)
            }
            SessionCommand::SelectUpHandle { node_id, additive } => {
                selection::select_up_handle(state, node_id, additive)
            }
            SessionCommand::SelectVertex { index } => selection::select_vertex(state, index),
            SessionCommand::SelectAll => selection::select_all(state),
            SessionCommand::SetMode { mode } => selection::set_mode(state, mode),
            SessionCommand::SetHostTool { tool } => selection::set_host_tool(state, tool),

            // === Struktur ===
            SessionCommand::AddNodeAt { position } => {
                editing::add_node_at_position(state, position)
            }
            SessionCommand::ConnectSelectedTo { target } => {
                editing::connect_selected_to(state, target)
            }
            SessionCommand::DeleteSelected => editing::delete_selected_nodes(state),

            // === Handles ===
            SessionCommand::MoveSelection { handle } => manipulation::move_selection(state, handle),
            SessionCommand::MoveTangent { handle } => manipulation::move_tangent(state, handle),
            SessionCommand::AimUp { handle } => manipulation::aim_up(state, handle),
            SessionCommand::ResetScale => manipulation::reset_scale(state),
            SessionCommand::ScaleSelection { scale } => {
                manipulation::scale_selection(state, scale)
            }

            // === Ansicht ===
            SessionCommand::FrameSelection => selection::frame_selection(state),

            // === History ===
            SessionCommand::Undo => history::undo(state),
            SessionCommand::Redo => history::redo(state),

            // === Netzwerk ===
            SessionCommand::Subdivide => network::subdivide(state),
            SessionCommand::Simplify => network::simplify(state),
            SessionCommand::Smooth => network::smooth(state),
            SessionCommand::ClearAll => network::clear_all(state),
            SessionCommand::SnapToGround => network::snap_to_ground(state),
            SessionCommand::ApplySettings { settings } => {
                network::apply_settings(state, *settings)
            }

            // === Extensions ===
            SessionCommand::AddExtension { extension } => {
                extensions::add_extension(state, extension)
            }
            SessionCommand::RemoveExtensionAt { index } => {
                extensions::remove_extension_at(state, index)
            }
            SessionCommand::MoveExtension { from, to } => {
                extensions::move_extension(state, from, to)
            }
            SessionCommand::SelectExtension { index } => {
                extensions::select_extension(state, index)
            }
            SessionCommand::ReplaceExtension { index, extension } => {
                extensions::replace_extension(state, index, extension)
            }
            SessionCommand::SetExtensionActive { index, active } => {
                extensions::set_extension_active(state, index, active)
            }
        }

        Ok(())
    }

    /// Reagiert auf ein Undo/Redo, das der Host selbst ausgeführt hat.
    pub fn undo_redo_performed(&mut self, state: &mut SessionState, network: Arc<SplineNetwork>) {
        use_cases::history::undo_redo_performed(state, network);
    }

    /// Schließt alle Extension-Editoren und deselektiert alle Einträge.
    pub fn deselect_all_extensions(&mut self, state: &mut SessionState) {
        use_cases::extensions::deselect_all_extensions(state);
    }

    /// Leitet den Frame-Hook an den offenen Extension-Editor weiter.
    pub fn draw_extension_editor(&mut self, state: &mut SessionState) {
        let network = Arc::clone(&state.network);
        state.extension_host.draw(&network);
    }

    /// Baut die Overlay-Szene aus dem aktuellen SessionState.
    pub fn build_overlay(&self, state: &SessionState) -> OverlayScene {
        overlay::build(state)
    }
}
