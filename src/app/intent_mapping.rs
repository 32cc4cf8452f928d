//! Mapping von Host-Intents auf mutierende Session-Commands.
//!
//! Hier sitzt die Manipulations-Zustandsmaschine: Zeiger- und Tasten-Events
//! werden gegen Selektion und Modus ausgewertet. Nicht angebotene Aktionen
//! (z.B. Tangenten ohne genau einen selektierten Node) erzeugen keine Commands.

use super::events::{HostTool, Key, ManipulationMode, PointerTarget};
use super::{SessionCommand, SessionIntent, SessionState};

/// Übersetzt einen `SessionIntent` in eine Sequenz ausführbarer `SessionCommand`s.
pub fn map_intent_to_commands(state: &SessionState, intent: SessionIntent) -> Vec<SessionCommand> {
    match intent {
        SessionIntent::PointerDown {
            screen_pos,
            modifiers,
            target,
        } => {
            let mut commands = vec![SessionCommand::BeginGesture { screen_pos }];
            commands.extend(map_pointer_target(state, screen_pos, modifiers, target));
            commands
        }
        SessionIntent::HandleMoved { value } => {
            if state.selection.is_empty() {
                return Vec::new();
            }
            let command = match state.selection.mode {
                ManipulationMode::Node => SessionCommand::MoveSelection { handle: value },
                ManipulationMode::StartTangent | ManipulationMode::EndTangent => {
                    SessionCommand::MoveTangent { handle: value }
                }
                ManipulationMode::Up => SessionCommand::AimUp { handle: value },
                ManipulationMode::Scale => SessionCommand::ScaleSelection { scale: value },
            };
            vec![command]
        }
        SessionIntent::PointerUp { screen_pos } => vec![SessionCommand::EndGesture { screen_pos }],
        SessionIntent::KeyDown { key, modifiers } => match key {
            Key::Delete => vec![SessionCommand::DeleteSelected],
            Key::A if modifiers.structural && state.node_count() > 1 => {
                vec![SessionCommand::SelectAll]
            }
            Key::F if !state.selection.is_empty() => vec![SessionCommand::FrameSelection],
            _ => Vec::new(),
        },
        SessionIntent::HostToolChanged { tool } => {
            if tool == state.selection.host_tool {
                return Vec::new();
            }
            let mut commands = vec![SessionCommand::SetHostTool { tool }];
            match tool {
                HostTool::Scale => commands.push(SessionCommand::SetMode {
                    mode: ManipulationMode::Scale,
                }),
                HostTool::Move => commands.push(SessionCommand::SetMode {
                    mode: ManipulationMode::Node,
                }),
                HostTool::Other => {}
            }
            commands
        }
        SessionIntent::FocusLost => vec![SessionCommand::CommitPending],
        SessionIntent::UndoRequested => vec![SessionCommand::Undo],
        SessionIntent::RedoRequested => vec![SessionCommand::Redo],
        SessionIntent::SubdivideRequested => vec![SessionCommand::Subdivide],
        SessionIntent::SimplifyRequested => vec![SessionCommand::Simplify],
        SessionIntent::SmoothRequested => vec![SessionCommand::Smooth],
        SessionIntent::ClearAllRequested => vec![SessionCommand::ClearAll],
        SessionIntent::SnapToGroundRequested => vec![SessionCommand::SnapToGround],
        SessionIntent::SettingsChanged { settings } => {
            vec![SessionCommand::ApplySettings { settings }]
        }
        SessionIntent::ExtensionAddRequested { extension } => {
            vec![SessionCommand::AddExtension { extension }]
        }
        SessionIntent::ExtensionRemoveAtRequested { index } => {
            vec![SessionCommand::RemoveExtensionAt { index }]
        }
        SessionIntent::ExtensionRemoveRequested { extension } => {
            match state.network.extensions().position_of(&extension) {
                Some(index) => vec![SessionCommand::RemoveExtensionAt { index }],
                None => {
                    log::debug!("Extension '{}' nicht in der Liste", extension.name());
                    Vec::new()
                }
            }
        }
        SessionIntent::ExtensionMoveRequested { from, to } => {
            vec![SessionCommand::MoveExtension { from, to }]
        }
        SessionIntent::ExtensionSelectRequested { index } => {
            vec![SessionCommand::SelectExtension { index }]
        }
        SessionIntent::ExtensionReplaceRequested { index, extension } => {
            vec![SessionCommand::ReplaceExtension { index, extension }]
        }
        SessionIntent::ExtensionActiveToggled { index, active } => {
            vec![SessionCommand::SetExtensionActive { index, active }]
        }
    }
}

/// Wertet einen Klick auf das getroffene Element aus.
fn map_pointer_target(
    state: &SessionState,
    screen_pos: glam::Vec2,
    modifiers: super::events::Modifiers,
    target: PointerTarget,
) -> Vec<SessionCommand> {
    let selection = &state.selection;
    match target {
        PointerTarget::Empty => {
            if !modifiers.structural || modifiers.additive {
                return Vec::new();
            }
            match state.host.raycast(screen_pos) {
                Some(hit) => vec![SessionCommand::AddNodeAt { position: hit.point }],
                None => {
                    log::debug!("Kein Raycast-Treffer, kein Node angelegt");
                    Vec::new()
                }
            }
        }
        PointerTarget::Node(node_id) => {
            if modifiers.structural && !selection.contains(node_id) && !selection.is_empty() {
                vec![
                    SessionCommand::ConnectSelectedTo { target: node_id },
                    SessionCommand::SelectNode {
                        node_id,
                        additive: modifiers.additive,
                    },
                ]
            } else if selection.contains(node_id) {
                if modifiers.additive {
                    Vec::new()
                } else {
                    vec![SessionCommand::CollapseSelection { node_id }]
                }
            } else {
                vec![SessionCommand::SelectNode {
                    node_id,
                    additive: modifiers.additive,
                }]
            }
        }
        PointerTarget::Tangent(curve_id, end) => {
            let offered = selection.selected_node_ids.len() == 1
                && selection.last_node().is_some_and(|id| {
                    state
                        .network
                        .curve(curve_id)
                        .is_some_and(|curve| curve.touches(id))
                });
            if offered {
                vec![SessionCommand::SelectTangent { curve_id, end }]
            } else {
                Vec::new()
            }
        }
        PointerTarget::UpHandle(node_id) => vec![SessionCommand::SelectUpHandle {
            node_id,
            additive: modifiers.additive,
        }],
        PointerTarget::Vertex(index) => vec![SessionCommand::SelectVertex { index }],
        PointerTarget::Handle => {
            if selection.mode == ManipulationMode::Scale && !selection.is_empty() {
                vec![SessionCommand::ResetScale]
            } else {
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::events::Modifiers;
    use crate::app::host::{RayHit, RayProvider};
    use crate::core::CurveEnd;
    use glam::{Vec2, Vec3};
    use std::sync::Arc;

    struct Floor;

    impl RayProvider for Floor {
        fn raycast(&self, screen_pos: Vec2) -> Option<RayHit> {
            (screen_pos.x >= 0.0).then_some(RayHit {
                point: Vec3::new(screen_pos.x, 0.0, screen_pos.y),
                normal: Vec3::Y,
            })
        }
    }

    fn state_with_nodes(count: usize) -> (SessionState, Vec<u64>) {
        let mut state = SessionState::new();
        let network = Arc::make_mut(&mut state.network);
        let ids: Vec<u64> = (0..count)
            .map(|i| network.add_node(Vec3::new(i as f32, 0.0, 0.0)))
            .collect();
        for pair in ids.windows(2) {
            network.connect(pair[0], pair[1]);
        }
        state.host.ray_provider = Some(Box::new(Floor));
        (state, ids)
    }

    fn down(target: PointerTarget, modifiers: Modifiers) -> SessionIntent {
        SessionIntent::PointerDown {
            screen_pos: Vec2::new(1.0, 2.0),
            modifiers,
            target,
        }
    }

    #[test]
    fn structural_click_on_empty_space_adds_node() {
        let (state, _) = state_with_nodes(0);
        let commands =
            map_intent_to_commands(&state, down(PointerTarget::Empty, Modifiers::STRUCTURAL));
        assert!(matches!(
            commands.as_slice(),
            [
                SessionCommand::BeginGesture { .. },
                SessionCommand::AddNodeAt { .. }
            ]
        ));

        let both = Modifiers {
            structural: true,
            additive: true,
        };
        let commands = map_intent_to_commands(&state, down(PointerTarget::Empty, both));
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn structural_click_on_unselected_node_connects() {
        let (mut state, ids) = state_with_nodes(3);
        state.selection.selected_node_ids.insert(ids[0]);
        let commands = map_intent_to_commands(
            &state,
            down(PointerTarget::Node(ids[2]), Modifiers::STRUCTURAL),
        );
        assert!(matches!(
            commands.as_slice(),
            [
                SessionCommand::BeginGesture { .. },
                SessionCommand::ConnectSelectedTo { .. },
                SessionCommand::SelectNode {
                    additive: false,
                    ..
                }
            ]
        ));
    }

    #[test]
    fn tangent_knob_requires_single_incident_selection() {
        let (mut state, ids) = state_with_nodes(3);
        let curve = state
            .network
            .curve_between(ids[1], ids[2])
            .expect("Kurve erwartet");
        let intent = || down(PointerTarget::Tangent(curve, CurveEnd::Start), Modifiers::NONE);

        state.selection.selected_node_ids.insert(ids[0]);
        assert_eq!(map_intent_to_commands(&state, intent()).len(), 1);

        state.selection.select_only(ids[1]);
        assert_eq!(map_intent_to_commands(&state, intent()).len(), 2);

        state.selection.selected_node_ids.insert(ids[2]);
        assert_eq!(map_intent_to_commands(&state, intent()).len(), 1);
    }

    #[test]
    fn handle_moves_follow_mode() {
        let (mut state, ids) = state_with_nodes(2);
        let moved = SessionIntent::HandleMoved { value: Vec3::ONE };
        assert!(map_intent_to_commands(&state, moved.clone()).is_empty());

        state.selection.select_only(ids[0]);
        state.selection.mode = ManipulationMode::Up;
        assert!(matches!(
            map_intent_to_commands(&state, moved.clone()).as_slice(),
            [SessionCommand::AimUp { .. }]
        ));
        state.selection.mode = ManipulationMode::Scale;
        assert!(matches!(
            map_intent_to_commands(&state, moved).as_slice(),
            [SessionCommand::ScaleSelection { .. }]
        ));
    }

    #[test]
    fn select_all_needs_more_than_one_node() {
        let ctrl_a = SessionIntent::KeyDown {
            key: Key::A,
            modifiers: Modifiers::STRUCTURAL,
        };
        let (state, _) = state_with_nodes(1);
        assert!(map_intent_to_commands(&state, ctrl_a.clone()).is_empty());
        let (state, _) = state_with_nodes(2);
        assert_eq!(map_intent_to_commands(&state, ctrl_a).len(), 1);
    }

    #[test]
    fn host_tool_change_only_when_different() {
        let (mut state, _) = state_with_nodes(0);
        let scale = SessionIntent::HostToolChanged {
            tool: HostTool::Scale,
        };
        assert_eq!(map_intent_to_commands(&state, scale.clone()).len(), 2);
        state.selection.host_tool = HostTool::Scale;
        assert!(map_intent_to_commands(&state, scale).is_empty());
    }
}
