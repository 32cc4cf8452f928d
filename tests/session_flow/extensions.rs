use glam::{Vec2, Vec3};
use spline_network_editor::app::EditorFactory;
use spline_network_editor::{
    ExtensionEditor, Modifiers, PointerTarget, SessionController, SessionIntent,
    SessionNotification, SessionState, SplineExtension, SplineNetwork,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Guardrail {
    finished: Arc<AtomicUsize>,
}

impl SplineExtension for Guardrail {
    fn kind(&self) -> &str {
        "guardrail"
    }

    fn duplicate(&self) -> Arc<dyn SplineExtension> {
        Arc::new(Guardrail {
            finished: Arc::clone(&self.finished),
        })
    }

    fn on_edit_finished(&self, _network: &SplineNetwork) {
        self.finished.fetch_add(1, Ordering::SeqCst);
    }
}

struct RecordingEditor {
    alive: Rc<RefCell<usize>>,
}

impl ExtensionEditor for RecordingEditor {
    fn on_selected(&mut self) {
        *self.alive.borrow_mut() += 1;
    }

    fn on_deselected(&mut self) {
        *self.alive.borrow_mut() -= 1;
    }
}

fn make_session() -> (SessionController, SessionState, Rc<RefCell<usize>>) {
    let alive = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&alive);
    let mut factory = EditorFactory::new();
    factory.register("guardrail", move |_| {
        Box::new(RecordingEditor {
            alive: Rc::clone(&counter),
        }) as Box<dyn ExtensionEditor>
    });
    let mut state = SessionState::new();
    state.set_editor_factory(factory);
    (SessionController::new(), state, alive)
}

fn add(
    controller: &mut SessionController,
    state: &mut SessionState,
    ext: Option<Arc<dyn SplineExtension>>,
) {
    controller
        .handle_intent(state, SessionIntent::ExtensionAddRequested { extension: ext })
        .expect("ExtensionAddRequested sollte funktionieren");
}

fn select(controller: &mut SessionController, state: &mut SessionState, index: usize) {
    controller
        .handle_intent(state, SessionIntent::ExtensionSelectRequested { index })
        .expect("ExtensionSelectRequested sollte funktionieren");
}

fn selected_count(state: &SessionState) -> usize {
    state
        .network
        .extensions()
        .entries()
        .iter()
        .filter(|e| e.is_selected)
        .count()
}

#[test]
fn test_any_selection_sequence_keeps_single_selected_entry() {
    let (mut controller, mut state, alive) = make_session();
    for _ in 0..4 {
        add(&mut controller, &mut state, Some(Arc::new(Guardrail::default())));
    }

    for index in [0, 3, 1, 1, 2, 0, 9] {
        select(&mut controller, &mut state, index);
        assert_eq!(selected_count(&state), 1);
        assert_eq!(*alive.borrow(), 1);
    }
    assert_eq!(state.network.extensions().selected_index(), Some(0));
}

#[test]
fn test_select_notifies_host() {
    let (mut controller, mut state, _) = make_session();
    add(&mut controller, &mut state, None);
    add(&mut controller, &mut state, None);
    state.take_notifications();

    select(&mut controller, &mut state, 0);

    assert_eq!(
        state.take_notifications(),
        vec![SessionNotification::ExtensionSelected { index: 0 }]
    );
}

#[test]
fn test_remove_by_instance_uses_identity() {
    let (mut controller, mut state, _) = make_session();
    let kept: Arc<dyn SplineExtension> = Arc::new(Guardrail::default());
    let removed: Arc<dyn SplineExtension> = Arc::new(Guardrail::default());
    add(&mut controller, &mut state, Some(Arc::clone(&kept)));
    add(&mut controller, &mut state, Some(Arc::clone(&removed)));

    controller
        .handle_intent(
            &mut state,
            SessionIntent::ExtensionRemoveRequested {
                extension: Arc::clone(&removed),
            },
        )
        .expect("ExtensionRemoveRequested");
    controller
        .handle_intent(
            &mut state,
            SessionIntent::ExtensionRemoveRequested {
                extension: kept.duplicate(),
            },
        )
        .expect("ExtensionRemoveRequested");

    let list = state.network.extensions();
    assert_eq!(list.len(), 1);
    assert!(list.entries()[0].holds(&kept));
    assert!(list.entries()[0].is_selected);
}

#[test]
fn test_undo_of_replace_restores_entry_identity() {
    let (mut controller, mut state, alive) = make_session();
    add(&mut controller, &mut state, Some(Arc::new(Guardrail::default())));
    let original = state.network.extensions().entries()[0].id;

    controller
        .handle_intent(
            &mut state,
            SessionIntent::ExtensionReplaceRequested {
                index: 0,
                extension: Some(Arc::new(Guardrail::default())),
            },
        )
        .expect("ExtensionReplaceRequested");
    assert_ne!(state.network.extensions().entries()[0].id, original);

    controller
        .handle_intent(&mut state, SessionIntent::UndoRequested)
        .expect("Undo");

    let list = state.network.extensions();
    assert_eq!(list.len(), 1);
    assert_eq!(list.entries()[0].id, original);
    assert_eq!(list.selected_index(), None);
    assert_eq!(*alive.borrow(), 0);
}

#[test]
fn test_reorder_does_not_trigger_edit_finished() {
    let (mut controller, mut state, _) = make_session();
    let finished = Arc::new(AtomicUsize::new(0));
    add(
        &mut controller,
        &mut state,
        Some(Arc::new(Guardrail {
            finished: Arc::clone(&finished),
        })),
    );
    add(&mut controller, &mut state, None);
    state.take_notifications();

    controller
        .handle_intent(&mut state, SessionIntent::ExtensionMoveRequested { from: 0, to: 1 })
        .expect("ExtensionMoveRequested");

    assert_eq!(finished.load(Ordering::SeqCst), 0);
    assert!(state.take_notifications().is_empty());
}

#[test]
fn test_active_extensions_see_finished_drags_only() {
    let (mut controller, mut state, _) = make_session();
    let finished = Arc::new(AtomicUsize::new(0));
    add(
        &mut controller,
        &mut state,
        Some(Arc::new(Guardrail {
            finished: Arc::clone(&finished),
        })),
    );
    let node = Arc::make_mut(&mut state.network).add_node(Vec3::ZERO);
    state.selection.select_only(node);

    let mut drag = |state: &mut SessionState, to: Vec3| {
        controller
            .handle_intent(
                state,
                SessionIntent::PointerDown {
                    screen_pos: Vec2::ZERO,
                    modifiers: Modifiers::NONE,
                    target: PointerTarget::Handle,
                },
            )
            .expect("PointerDown");
        controller
            .handle_intent(state, SessionIntent::HandleMoved { value: to })
            .expect("HandleMoved");
        controller
            .handle_intent(
                state,
                SessionIntent::PointerUp {
                    screen_pos: Vec2::new(25.0, 0.0),
                },
            )
            .expect("PointerUp");
    };

    drag(&mut state, Vec3::X);
    assert_eq!(finished.load(Ordering::SeqCst), 1);

    SessionController::new()
        .handle_intent(
            &mut state,
            SessionIntent::ExtensionActiveToggled {
                index: 0,
                active: false,
            },
        )
        .expect("ExtensionActiveToggled");
    drag(&mut state, Vec3::Z);
    assert_eq!(finished.load(Ordering::SeqCst), 1);
}
