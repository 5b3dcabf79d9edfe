use garmentkit_designer::model::{DesignElement, ElementPatch, ShapeKind};
use garmentkit_designer::{DesignerError, ElementStore, ReorderOp};
use std::collections::HashSet;

fn store_of(ids: &[&str]) -> ElementStore {
    let elements = ids
        .iter()
        .map(|id| DesignElement::shape(ShapeKind::Rect, 0.0, 0.0, 50.0, 50.0).with_id(*id))
        .collect();
    ElementStore::from_elements(elements)
}

fn order(store: &ElementStore) -> Vec<String> {
    store.ids()
}

#[test]
fn test_add_rejects_duplicate_id() {
    let mut store = store_of(&["a"]);
    let result = store.add(DesignElement::text("x", 0.0, 0.0, 40.0, 40.0).with_id("a"));
    assert!(matches!(result, Err(DesignerError::DuplicateId { .. })));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_reorder_operations() {
    let mut store = store_of(&["a", "b", "c", "d"]);

    assert!(store.reorder("a", ReorderOp::BringToFront));
    assert_eq!(order(&store), vec!["b", "c", "d", "a"]);

    assert!(store.reorder("a", ReorderOp::SendToBack));
    assert_eq!(order(&store), vec!["a", "b", "c", "d"]);

    assert!(store.reorder("b", ReorderOp::BringForward));
    assert_eq!(order(&store), vec!["a", "c", "b", "d"]);

    assert!(store.reorder("b", ReorderOp::SendBackward));
    assert_eq!(order(&store), vec!["a", "b", "c", "d"]);
}

#[test]
fn test_reorder_at_edges_is_noop() {
    let mut store = store_of(&["a", "b"]);
    assert!(!store.reorder("b", ReorderOp::BringToFront));
    assert!(!store.reorder("b", ReorderOp::BringForward));
    assert!(!store.reorder("a", ReorderOp::SendToBack));
    assert!(!store.reorder("a", ReorderOp::SendBackward));
    assert!(!store.reorder("missing", ReorderOp::BringToFront));
    assert_eq!(order(&store), vec!["a", "b"]);
}

#[test]
fn test_locked_element_is_untouchable() {
    let mut store = store_of(&["a", "b"]);
    assert!(store.toggle_lock("a").unwrap());

    assert!(store.remove(&["a".to_string(), "b".to_string()]) == vec!["b".to_string()]);
    assert!(store.contains("a"));

    assert!(!store.reorder("a", ReorderOp::BringToFront));
    assert_eq!(store.translate(&["a".to_string()], 10.0, 10.0), 0);
    assert!(store.duplicate(&["a".to_string()], 20.0).is_empty());
    assert!(matches!(
        store.patch("a", &ElementPatch::position(5.0, 5.0), 30.0),
        Err(DesignerError::ElementLocked { .. })
    ));

    assert!(!store.toggle_lock("a").unwrap());
    assert!(store.patch("a", &ElementPatch::position(5.0, 5.0), 30.0).unwrap());
}

#[test]
fn test_duplicate_appends_offset_copies() {
    let mut store = store_of(&["a", "b"]);
    let new_ids = store.duplicate(&["b".to_string(), "a".to_string()], 20.0);

    assert_eq!(new_ids.len(), 2);
    assert_eq!(store.len(), 4);
    // copies keep the original relative order
    assert_eq!(store.elements()[2].id, new_ids[0]);
    assert_eq!((store.elements()[2].x, store.elements()[2].y), (20.0, 20.0));

    let unique: HashSet<String> = store.ids().into_iter().collect();
    assert_eq!(unique.len(), 4);
}

#[test]
fn test_patch_clamps_geometry() {
    let mut store = store_of(&["a"]);
    let patch = ElementPatch {
        x: Some(-10.0),
        width: Some(5.0),
        ..Default::default()
    };
    store.patch("a", &patch, 30.0).unwrap();
    let element = store.get("a").unwrap();
    assert_eq!(element.x, 0.0);
    assert_eq!(element.width, 30.0);
}

#[test]
fn test_translate_clamps_at_origin() {
    let mut store = store_of(&["a"]);
    assert_eq!(store.translate(&["a".to_string()], -50.0, 12.0), 1);
    let element = store.get("a").unwrap();
    assert_eq!((element.x, element.y), (0.0, 12.0));
    assert_eq!(store.translate(&["a".to_string()], -50.0, 0.0), 0);
}
