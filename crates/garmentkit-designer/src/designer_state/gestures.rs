//! Pointer gestures: `Idle → Dragging | Resizing | Rotating → Idle`.
//!
//! Pointer positions are screen pixels. Every move mutates the store and
//! notifies observers; the history snapshot is taken once, on pointer up.

use garmentkit_core::DesignEvent;

use super::DesignerState;
use crate::error::{DesignerError, DesignerResult};
use crate::model::{ElementPatch, Point};
use crate::transform::{
    resize_dimensions, rotation_from_pointer, to_local_delta, GestureKind, GestureState,
    PointerTarget, ResizeHandle, StartGeometry,
};

impl DesignerState {
    /// Start a gesture (or change the selection) from a pointer press.
    pub fn pointer_down(&mut self, target: PointerTarget, pointer: Point) -> DesignerResult<()> {
        if let Some(active) = self.gesture.kind() {
            return Err(DesignerError::GestureInProgress { active });
        }

        match target {
            PointerTarget::Background => {
                self.clear_selection();
                Ok(())
            }
            PointerTarget::Element { id, additive } => {
                if !self.store().contains(&id) {
                    return Err(DesignerError::not_found(id));
                }
                if additive {
                    self.selection.select(&id, true);
                    self.emit_selection();
                    if !self.selection.contains(&id) {
                        return Ok(());
                    }
                } else if !self.selection.contains(&id) {
                    self.selection.select(&id, false);
                    self.emit_selection();
                }
                self.start_gesture(GestureState::Dragging { last: pointer });
                Ok(())
            }
            PointerTarget::Handle { id, handle } => self.begin_resize(id, handle, pointer),
            PointerTarget::ScreenHandle { id, handle } => {
                let rotation = self
                    .element(&id)
                    .ok_or_else(|| DesignerError::not_found(id.as_str()))?
                    .rotation;
                self.begin_resize(id, ResizeHandle::from_screen(handle, rotation), pointer)
            }
            PointerTarget::RotateHandle { id } => {
                let center = self.focus_unlocked(&id)?.center();
                let center = self.viewport.local_to_screen(center.x, center.y);
                self.start_gesture(GestureState::Rotating { id, center });
                Ok(())
            }
        }
    }

    /// Advance the active gesture. Returns whether an element changed.
    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        let zoom = self.viewport.zoom();
        let min_size = self.min_element_size();

        let changed = match self.gesture.clone() {
            GestureState::Idle => return false,
            GestureState::Dragging { last } => {
                self.gesture = GestureState::Dragging { last: pointer };
                let dx = (pointer.x - last.x) / zoom;
                let dy = (pointer.y - last.y) / zoom;
                let ids = self.selection.ids().to_vec();
                self.store_mut().translate(&ids, dx, dy) > 0
            }
            GestureState::Resizing {
                id,
                handle,
                start_pointer,
                start,
            } => {
                let (local_dx, local_dy) = to_local_delta(
                    pointer.x - start_pointer.x,
                    pointer.y - start_pointer.y,
                    zoom,
                    start.rotation,
                );
                let (width, height) = resize_dimensions(
                    handle,
                    start.width,
                    start.height,
                    local_dx,
                    local_dy,
                    min_size,
                );
                self.apply_gesture_patch(&id, ElementPatch::size(width, height))
            }
            GestureState::Rotating { id, center } => {
                let patch = ElementPatch {
                    rotation: Some(rotation_from_pointer(center, pointer)),
                    ..Default::default()
                };
                self.apply_gesture_patch(&id, patch)
            }
        };

        if changed {
            self.emit(DesignEvent::ElementsChanged {
                side: self.current_side(),
            });
        }
        changed
    }

    /// End the active gesture, committing whatever state was reached.
    pub fn pointer_up(&mut self) -> Option<GestureKind> {
        let kind = std::mem::take(&mut self.gesture).kind()?;
        self.commit_if_changed();
        tracing::debug!("{} gesture ended", kind);
        self.emit(DesignEvent::GestureEnded {
            kind: kind.to_string(),
        });
        Some(kind)
    }

    fn begin_resize(&mut self, id: String, handle: ResizeHandle, pointer: Point) -> DesignerResult<()> {
        let element = self.focus_unlocked(&id)?;
        let start = StartGeometry {
            width: element.width,
            height: element.height,
            rotation: element.rotation,
        };
        self.start_gesture(GestureState::Resizing {
            id,
            handle,
            start_pointer: pointer,
            start,
        });
        Ok(())
    }

    /// Make `id` the sole selection for a resize or rotate and return it.
    fn focus_unlocked(&mut self, id: &str) -> DesignerResult<&crate::model::DesignElement> {
        let element = self
            .document
            .current()
            .get(id)
            .ok_or_else(|| DesignerError::not_found(id))?;
        if element.is_locked {
            return Err(DesignerError::locked(id));
        }
        if self.selection.primary() != Some(id) || self.selection.count() != 1 {
            self.selection.select(id, false);
            self.emit_selection();
        }
        self.element(id).ok_or_else(|| DesignerError::not_found(id))
    }

    fn start_gesture(&mut self, gesture: GestureState) {
        if let Some(kind) = gesture.kind() {
            tracing::debug!("{} gesture started", kind);
            self.gesture = gesture;
            self.emit(DesignEvent::GestureStarted {
                kind: kind.to_string(),
            });
        }
    }

    fn apply_gesture_patch(&mut self, id: &str, patch: ElementPatch) -> bool {
        let min_size = self.min_element_size();
        match self.store_mut().patch(id, &patch, min_size) {
            Ok(changed) => changed,
            Err(e) => {
                tracing::warn!("Gesture update skipped: {}", e);
                false
            }
        }
    }

    /// Record the gesture's end state; a press without movement records nothing.
    fn commit_if_changed(&mut self) {
        let side = self.current_side();
        if self.history.stack(side).current() != self.elements() {
            self.commit(side);
        }
    }
}
