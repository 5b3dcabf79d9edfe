use garmentkit_designer::model::{DesignElement, Point, ShapeKind};
use garmentkit_designer::transform::{
    drag_position, normalize_degrees, resize_dimensions, to_local_delta, GestureKind,
};
use garmentkit_designer::{DesignerState, PointerTarget, ResizeHandle, MIN_ELEMENT_SIZE};
use garmentkit_settings::DesignerConfig;
use proptest::prelude::*;

fn handle_strategy() -> impl Strategy<Value = ResizeHandle> {
    prop::sample::select(ResizeHandle::COMPASS.to_vec())
}

fn state_with_box(width: f64, height: f64, rotation: f64) -> (DesignerState, String) {
    let mut state = DesignerState::default();
    let element =
        DesignElement::shape(ShapeKind::Rect, 50.0, 50.0, width, height).with_rotation(rotation);
    let id = state.add_element(element).unwrap();
    (state, id)
}

#[test]
fn test_screen_east_handle_on_quarter_turn_grows_height() {
    let (mut state, id) = state_with_box(100.0, 60.0, 90.0);

    state
        .pointer_down(
            PointerTarget::ScreenHandle {
                id: id.clone(),
                handle: ResizeHandle::E,
            },
            Point::new(200.0, 100.0),
        )
        .unwrap();
    state.pointer_move(Point::new(240.0, 100.0));
    assert_eq!(state.pointer_up(), Some(GestureKind::Resize));

    let element = state.element(&id).unwrap();
    assert!((element.width - 100.0).abs() < 1e-9);
    assert!((element.height - 100.0).abs() < 1e-9);
}

#[test]
fn test_resize_is_measured_from_gesture_start() {
    let (mut state, id) = state_with_box(100.0, 100.0, 0.0);
    state
        .pointer_down(
            PointerTarget::Handle {
                id: id.clone(),
                handle: ResizeHandle::E,
            },
            Point::new(150.0, 100.0),
        )
        .unwrap();

    state.pointer_move(Point::new(170.0, 100.0));
    state.pointer_move(Point::new(160.0, 100.0));
    state.pointer_up();

    assert_eq!(state.element(&id).unwrap().width, 110.0);
}

#[test]
fn test_resize_west_shrinks_to_minimum() {
    let (mut state, id) = state_with_box(100.0, 100.0, 0.0);
    state
        .pointer_down(
            PointerTarget::Handle {
                id: id.clone(),
                handle: ResizeHandle::W,
            },
            Point::new(50.0, 100.0),
        )
        .unwrap();
    state.pointer_move(Point::new(400.0, 100.0));
    state.pointer_up();

    let element = state.element(&id).unwrap();
    assert_eq!(element.width, MIN_ELEMENT_SIZE);
    assert_eq!((element.x, element.y), (50.0, 50.0));
}

#[test]
fn test_configured_minimum_never_undercuts_floor() {
    let mut config = DesignerConfig::default();
    config.geometry.min_element_size = 10.0;
    let mut state = DesignerState::new(config);
    let id = state
        .add_element(DesignElement::shape(ShapeKind::Rect, 50.0, 50.0, 100.0, 100.0))
        .unwrap();

    state
        .pointer_down(
            PointerTarget::Handle {
                id: id.clone(),
                handle: ResizeHandle::Se,
            },
            Point::new(150.0, 150.0),
        )
        .unwrap();
    state.pointer_move(Point::new(0.0, 0.0));
    state.pointer_up();

    let element = state.element(&id).unwrap();
    assert_eq!((element.width, element.height), (MIN_ELEMENT_SIZE, MIN_ELEMENT_SIZE));
}

#[test]
fn test_multi_drag_moves_every_selected_unlocked_element() {
    let mut state = DesignerState::default();
    let a = state
        .add_element(DesignElement::text("A", 10.0, 10.0, 50.0, 50.0))
        .unwrap();
    let b = state
        .add_element(DesignElement::text("B", 100.0, 10.0, 50.0, 50.0))
        .unwrap();
    let locked = state
        .add_element(DesignElement::text("L", 200.0, 10.0, 50.0, 50.0))
        .unwrap();
    state.toggle_lock(&locked).unwrap();
    state.select_all();

    state
        .pointer_down(
            PointerTarget::Element {
                id: a.clone(),
                additive: false,
            },
            Point::new(0.0, 0.0),
        )
        .unwrap();
    state.pointer_move(Point::new(15.0, 5.0));
    state.pointer_up();

    assert_eq!(state.element(&a).unwrap().x, 25.0);
    assert_eq!(state.element(&b).unwrap().x, 115.0);
    assert_eq!(state.element(&locked).unwrap().x, 200.0);
}

#[test]
fn test_press_without_move_records_nothing() {
    let (mut state, id) = state_with_box(100.0, 100.0, 0.0);
    let before = state.history().stack(state.current_side()).len();
    state
        .pointer_down(PointerTarget::Element { id, additive: false }, Point::new(1.0, 1.0))
        .unwrap();
    state.pointer_up();
    assert_eq!(state.history().stack(state.current_side()).len(), before);
}

#[test]
fn test_background_press_clears_selection() {
    let (mut state, _) = state_with_box(100.0, 100.0, 0.0);
    assert_eq!(state.selection().count(), 1);
    state
        .pointer_down(PointerTarget::Background, Point::new(0.0, 0.0))
        .unwrap();
    assert!(state.selection().is_empty());
    assert!(state.gesture().is_idle());
}

#[test]
fn test_additive_press_toggles_selection() {
    let mut state = DesignerState::default();
    let a = state
        .add_element(DesignElement::text("A", 0.0, 0.0, 50.0, 50.0))
        .unwrap();
    let b = state
        .add_element(DesignElement::text("B", 0.0, 0.0, 50.0, 50.0))
        .unwrap();

    state
        .pointer_down(
            PointerTarget::Element {
                id: a.clone(),
                additive: true,
            },
            Point::new(0.0, 0.0),
        )
        .unwrap();
    state.pointer_up();
    assert!(state.selection().contains(&a));
    assert!(state.selection().contains(&b));

    state
        .pointer_down(
            PointerTarget::Element {
                id: a.clone(),
                additive: true,
            },
            Point::new(0.0, 0.0),
        )
        .unwrap();
    assert!(!state.selection().contains(&a));
    assert!(state.gesture().is_idle());
}

#[test]
fn test_rotation_is_stored_unnormalized() {
    let (mut state, id) = state_with_box(100.0, 100.0, 0.0);
    // center at (100, 100) with zero pan and zoom 1
    state
        .pointer_down(PointerTarget::RotateHandle { id: id.clone() }, Point::new(100.0, 0.0))
        .unwrap();
    state.pointer_move(Point::new(0.0, 100.0));
    state.pointer_up();

    let element = state.element(&id).unwrap();
    assert_eq!(element.rotation, 270.0);
    assert_eq!(element.normalized_rotation(), 270.0);
}

#[test]
fn test_normalize_negative_rotation() {
    assert_eq!(normalize_degrees(-45.0), 315.0);
}

proptest! {
    #[test]
    fn prop_resize_never_goes_below_minimum(
        handle in handle_strategy(),
        width in 30.0f64..500.0,
        height in 30.0f64..500.0,
        dx in -1000.0f64..1000.0,
        dy in -1000.0f64..1000.0,
        zoom in 0.1f64..5.0,
        rotation in -720.0f64..720.0,
    ) {
        let (local_dx, local_dy) = to_local_delta(dx, dy, zoom, rotation);
        let (w, h) = resize_dimensions(handle, width, height, local_dx, local_dy, MIN_ELEMENT_SIZE);
        prop_assert!(w >= MIN_ELEMENT_SIZE);
        prop_assert!(h >= MIN_ELEMENT_SIZE);
    }

    #[test]
    fn prop_drag_keeps_position_non_negative(
        x in 0.0f64..1000.0,
        y in 0.0f64..1000.0,
        dx in -2000.0f64..2000.0,
        dy in -2000.0f64..2000.0,
    ) {
        let (nx, ny) = drag_position(x, y, dx, dy);
        prop_assert!(nx >= 0.0 && ny >= 0.0);
    }

    #[test]
    fn prop_screen_handle_round_trip(handle in handle_strategy(), steps in -16i32..16) {
        let rotation = steps as f64 * 45.0;
        prop_assert_eq!(ResizeHandle::from_screen(handle.on_screen(rotation), rotation), handle);
    }

    #[test]
    fn prop_gesture_resize_respects_minimum(
        handle in handle_strategy(),
        rotation in 0.0f64..360.0,
        moves in prop::collection::vec((-400.0f64..400.0, -400.0f64..400.0), 1..8),
    ) {
        let (mut state, id) = state_with_box(80.0, 80.0, rotation);
        state
            .pointer_down(PointerTarget::Handle { id: id.clone(), handle }, Point::new(0.0, 0.0))
            .unwrap();
        for (x, y) in moves {
            state.pointer_move(Point::new(x, y));
        }
        state.pointer_up();

        let element = state.element(&id).unwrap();
        prop_assert!(element.width >= MIN_ELEMENT_SIZE);
        prop_assert!(element.height >= MIN_ELEMENT_SIZE);
        prop_assert!(element.x >= 0.0 && element.y >= 0.0);
    }
}
