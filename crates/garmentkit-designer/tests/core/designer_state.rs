use garmentkit_core::{DesignEvent, EventBus, EventFilter};
use garmentkit_designer::model::{DesignElement, ElementKind, ElementPatch, Point, ShapeKind};
use garmentkit_designer::{
    DesignerError, DesignerState, GarmentTemplate, PointerTarget, ReorderOp, ResizeHandle, Side,
};
use garmentkit_settings::DesignerConfig;
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

fn tee() -> GarmentTemplate {
    GarmentTemplate::new("tee", 400, 500)
        .with_size("M", 30.0, 40.0)
        .with_size("L", 33.0, 43.0)
}

#[test]
fn test_scenario_add_undo_redo_text() {
    let mut state = DesignerState::default();
    let id = state
        .add_element(DesignElement::text("Hello", 80.0, 120.0, 200.0, 50.0))
        .unwrap();

    assert!(state.undo());
    assert!(state.elements_on(Side::Front).is_empty());

    assert!(state.redo());
    let element = state.element(&id).unwrap();
    assert_eq!((element.x, element.y), (80.0, 120.0));
    assert_eq!((element.width, element.height), (200.0, 50.0));
}

#[test]
fn test_scenario_se_resize() {
    let mut state = DesignerState::default();
    let id = state
        .add_element(DesignElement::shape(ShapeKind::Rect, 10.0, 10.0, 100.0, 100.0))
        .unwrap();

    state
        .pointer_down(
            PointerTarget::Handle {
                id: id.clone(),
                handle: ResizeHandle::Se,
            },
            Point::new(110.0, 110.0),
        )
        .unwrap();
    state.pointer_move(Point::new(130.0, 130.0));
    state.pointer_up();

    let element = state.element(&id).unwrap();
    assert_eq!((element.width, element.height), (120.0, 120.0));
}

#[test]
fn test_add_text_uses_config_defaults_and_centers() {
    let mut state = DesignerState::default();
    state.set_template(tee()).unwrap();
    let id = state.add_text(None).unwrap();

    let element = state.element(&id).unwrap();
    assert_eq!(element.kind, ElementKind::Text);
    assert_eq!((element.width, element.height), (200.0, 50.0));
    // 200x300 design area
    assert_eq!((element.x, element.y), (0.0, 125.0));
    assert_eq!(state.selection().primary(), Some(id.as_str()));
}

#[test]
fn test_add_shape_is_square() {
    let mut state = DesignerState::default();
    let id = state.add_shape(ShapeKind::Triangle).unwrap();
    let element = state.element(&id).unwrap();
    assert_eq!(element.shape_kind(), Some(ShapeKind::Triangle));
    assert_eq!(element.width, element.height);
}

#[test]
fn test_duplicate_and_paste_produce_fresh_ids() {
    let mut state = DesignerState::default();
    let a = state
        .add_element(DesignElement::text("A", 10.0, 10.0, 50.0, 50.0))
        .unwrap();
    let b = state
        .add_element(DesignElement::text("B", 40.0, 0.0, 50.0, 50.0))
        .unwrap();
    state.select_all();

    let existing: HashSet<String> = [a.clone(), b.clone()].into_iter().collect();
    let copies = state.duplicate_selected();
    assert_eq!(copies.len(), 2);
    assert!(copies.iter().all(|id| !existing.contains(id)));
    let copy = state.element(&copies[0]).unwrap();
    assert_eq!((copy.x, copy.y), (30.0, 30.0));

    state.select(&b, false).unwrap();
    assert_eq!(state.copy_selected(), 1);
    let pasted = state.paste();
    let pasted_again = state.paste();
    assert_eq!(pasted.len(), 1);
    assert_ne!(pasted, pasted_again);

    let element = state.element(&pasted[0]).unwrap();
    assert_eq!((element.x, element.y), (70.0, 30.0));

    let all: HashSet<String> = state.elements().iter().map(|e| e.id.clone()).collect();
    assert_eq!(all.len(), state.elements().len());
}

#[test]
fn test_paste_onto_other_side() {
    let mut state = DesignerState::default();
    state
        .add_element(DesignElement::text("A", 0.0, 0.0, 50.0, 50.0))
        .unwrap();
    state.copy_selected();
    state.set_side(Side::Back).unwrap();
    let pasted = state.paste();
    assert_eq!(pasted.len(), 1);
    assert_eq!(state.elements_on(Side::Back).len(), 1);
    assert_eq!(state.elements_on(Side::Front).len(), 1);
}

#[test]
fn test_reorder_through_state() {
    let mut state = DesignerState::default();
    let a = state
        .add_element(DesignElement::text("A", 0.0, 0.0, 50.0, 50.0))
        .unwrap();
    let b = state
        .add_element(DesignElement::text("B", 0.0, 0.0, 50.0, 50.0))
        .unwrap();

    assert!(state.reorder(&a, ReorderOp::BringToFront));
    assert_eq!(state.elements().last().unwrap().id, a);
    assert!(!state.reorder(&a, ReorderOp::BringForward));
    assert!(state.reorder(&a, ReorderOp::SendToBack));
    assert_eq!(state.elements()[0].id, a);
    assert_eq!(state.elements()[1].id, b);
}

#[test]
fn test_lock_applies_to_style_mutators() {
    let mut state = DesignerState::default();
    let id = state
        .add_element(DesignElement::text("A", 0.0, 0.0, 50.0, 50.0))
        .unwrap();
    state.toggle_lock(&id).unwrap();

    let outline = ElementPatch {
        text_outline: Some(None),
        font_size: Some(40.0),
        ..Default::default()
    };
    assert!(matches!(
        state.patch_element(&id, &outline),
        Err(DesignerError::ElementLocked { .. })
    ));
    assert_eq!(state.patch_selected(&outline), 0);
    assert!(state.delete_selected().is_empty());
    assert_eq!(state.elements().len(), 1);
}

#[test]
fn test_side_switch_blocked_during_gesture() {
    let mut state = DesignerState::default();
    let id = state
        .add_element(DesignElement::text("A", 0.0, 0.0, 50.0, 50.0))
        .unwrap();
    state
        .pointer_down(PointerTarget::Element { id, additive: false }, Point::new(0.0, 0.0))
        .unwrap();
    assert!(matches!(
        state.set_side(Side::Back),
        Err(DesignerError::GestureInProgress { .. })
    ));
    state.pointer_up();
    state.set_side(Side::Back).unwrap();
    assert_eq!(state.current_side(), Side::Back);
    assert!(state.selection().is_empty());
}

#[test]
fn test_template_switch_resets_document() {
    let mut state = DesignerState::default();
    state.set_template(tee()).unwrap();
    state.set_garment_size("L");
    state.add_text(Some("Hi")).unwrap();
    state.copy_selected();
    assert!(state.is_modified());

    let hoodie = GarmentTemplate::new("hoodie", 500, 600).with_size("M", 32.0, 42.0);
    state.set_template(hoodie).unwrap();

    assert!(state.elements().is_empty());
    assert!(!state.can_undo());
    assert!(state.paste().is_empty());
    assert_eq!(state.garment_size(), "M");
    assert!(!state.is_modified());
}

#[test]
fn test_invalid_template_leaves_state_alone() {
    let mut state = DesignerState::default();
    state.set_template(tee()).unwrap();
    state.add_text(None).unwrap();

    let result = state.set_template(GarmentTemplate::new("broken", 0, 100));
    assert!(matches!(result, Err(DesignerError::InvalidTemplate { .. })));
    assert_eq!(state.template().unwrap().id, "tee");
    assert_eq!(state.elements().len(), 1);
}

#[test]
fn test_display_name_marks_changes() {
    let mut state = DesignerState::default();
    assert_eq!(state.display_name(), "Untitled");
    state.add_shape(ShapeKind::Circle).unwrap();
    assert_eq!(state.display_name(), "Untitled*");
    state.set_design_name("Team Shirt");
    assert_eq!(state.display_name(), "Team Shirt*");
}

#[test]
fn test_events_are_published_to_subscribers() {
    let bus = Arc::new(EventBus::new());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    bus.subscribe(EventFilter::All, move |event| sink.lock().unwrap().push(event.clone()));

    let mut state = DesignerState::with_events(DesignerConfig::default(), Arc::clone(&bus));
    state.add_shape(ShapeKind::Rect).unwrap();

    let events = seen.lock().unwrap();
    assert!(events.contains(&DesignEvent::ElementsChanged { side: Side::Front }));
    assert!(events.contains(&DesignEvent::HistoryChanged {
        side: Side::Front,
        can_undo: true,
        can_redo: false,
    }));
}

#[test]
fn test_sessions_do_not_share_events() {
    let first_bus = Arc::new(EventBus::new());
    let seen = Arc::new(Mutex::new(0usize));
    let sink = Arc::clone(&seen);
    first_bus.subscribe(EventFilter::All, move |_| *sink.lock().unwrap() += 1);

    let _first = DesignerState::with_events(DesignerConfig::default(), first_bus);
    let mut second = DesignerState::default();
    second.add_shape(ShapeKind::Rect).unwrap();

    assert_eq!(*seen.lock().unwrap(), 0);
}

proptest! {
    #[test]
    fn prop_undo_redo_inverse_law(moves in prop::collection::vec((0.0f64..300.0, 0.0f64..300.0), 1..30)) {
        let mut state = DesignerState::default();
        let id = state
            .add_element(DesignElement::shape(ShapeKind::Rect, 0.0, 0.0, 50.0, 50.0))
            .unwrap();
        for (x, y) in &moves {
            state.patch_element(&id, &ElementPatch::position(*x, *y)).unwrap();
        }
        let finished = state.elements().to_vec();

        while state.undo() {}
        prop_assert!(state.elements().is_empty());

        while state.redo() {}
        prop_assert_eq!(state.elements(), finished.as_slice());
    }

    #[test]
    fn prop_duplicate_offsets_every_copy(count in 1usize..8) {
        let mut state = DesignerState::default();
        for i in 0..count {
            state
                .add_element(DesignElement::text("x", i as f64 * 10.0, 5.0, 40.0, 40.0))
                .unwrap();
        }
        state.select_all();
        let originals = state.elements().to_vec();
        let copies = state.duplicate_selected();

        prop_assert_eq!(copies.len(), count);
        for (original, copy_id) in originals.iter().zip(&copies) {
            let copy = state.element(copy_id).unwrap();
            prop_assert!(originals.iter().all(|e| &e.id != copy_id));
            prop_assert_eq!(copy.x, original.x + 20.0);
            prop_assert_eq!(copy.y, original.y + 20.0);
        }
    }
}
