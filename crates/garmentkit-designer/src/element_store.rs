//! Ordered element storage for one garment side.
//!
//! List order is z-order: index 0 is drawn first (bottom-most). Every
//! mutation skips locked elements; the only way to change a locked element
//! is [`ElementStore::toggle_lock`].

use std::collections::HashSet;

use crate::error::{DesignerError, DesignerResult};
use crate::model::{DesignElement, ElementPatch};

/// Z-order operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderOp {
    BringToFront,
    SendToBack,
    /// Swap with the next element up.
    BringForward,
    /// Swap with the next element down.
    SendBackward,
}

/// Element list of a single side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementStore {
    elements: Vec<DesignElement>,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing list verbatim (no id or geometry checks).
    pub fn from_elements(elements: Vec<DesignElement>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[DesignElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&DesignElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut DesignElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.elements.iter().map(|e| e.id.clone()).collect()
    }

    /// Append on top of the stack.
    pub fn add(&mut self, element: DesignElement) -> DesignerResult<()> {
        if self.contains(&element.id) {
            return Err(DesignerError::DuplicateId { id: element.id });
        }
        self.elements.push(element);
        Ok(())
    }

    /// Remove the given elements, skipping locked ones. Returns removed ids.
    pub fn remove(&mut self, ids: &[String]) -> Vec<String> {
        let mut removed = Vec::new();
        self.elements.retain(|e| {
            if ids.contains(&e.id) && !e.is_locked {
                removed.push(e.id.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    /// Append offset copies with fresh ids of every unlocked matched element.
    ///
    /// Copies are appended in the current z-order. Returns the new ids.
    pub fn duplicate(&mut self, ids: &[String], offset: f64) -> Vec<String> {
        let taken: HashSet<String> = self.elements.iter().map(|e| e.id.clone()).collect();
        let copies: Vec<DesignElement> = self
            .elements
            .iter()
            .filter(|e| ids.contains(&e.id) && !e.is_locked)
            .map(|e| {
                let mut copy = e.cloned_with_offset(offset);
                while taken.contains(&copy.id) {
                    copy.id = DesignElement::new_id();
                }
                copy
            })
            .collect();

        let new_ids = copies.iter().map(|e| e.id.clone()).collect();
        self.elements.extend(copies);
        new_ids
    }

    /// Move an element in the z-order. Returns whether the order changed.
    pub fn reorder(&mut self, id: &str, op: ReorderOp) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if self.elements[index].is_locked {
            return false;
        }

        let last = self.elements.len() - 1;
        match op {
            ReorderOp::BringToFront if index < last => {
                let element = self.elements.remove(index);
                self.elements.push(element);
                true
            }
            ReorderOp::SendToBack if index > 0 => {
                let element = self.elements.remove(index);
                self.elements.insert(0, element);
                true
            }
            ReorderOp::BringForward if index < last => {
                self.elements.swap(index, index + 1);
                true
            }
            ReorderOp::SendBackward if index > 0 => {
                self.elements.swap(index, index - 1);
                true
            }
            _ => false,
        }
    }

    /// Flip the lock flag. Returns the new state.
    pub fn toggle_lock(&mut self, id: &str) -> DesignerResult<bool> {
        let element = self
            .get_mut(id)
            .ok_or_else(|| DesignerError::not_found(id))?;
        element.is_locked = !element.is_locked;
        Ok(element.is_locked)
    }

    /// Apply a property patch. Locked elements reject every patch.
    pub fn patch(&mut self, id: &str, patch: &ElementPatch, min_size: f64) -> DesignerResult<bool> {
        let element = self
            .get_mut(id)
            .ok_or_else(|| DesignerError::not_found(id))?;
        if element.is_locked {
            return Err(DesignerError::locked(id));
        }
        Ok(patch.apply_to(element, min_size))
    }

    /// Shift unlocked elements, keeping `x`/`y` non-negative.
    /// Returns how many elements moved.
    pub fn translate(&mut self, ids: &[String], dx: f64, dy: f64) -> usize {
        let mut moved = 0;
        for element in self
            .elements
            .iter_mut()
            .filter(|e| ids.contains(&e.id) && !e.is_locked)
        {
            let (x, y) = crate::transform::drag_position(element.x, element.y, dx, dy);
            if x != element.x || y != element.y {
                element.x = x;
                element.y = y;
                moved += 1;
            }
        }
        moved
    }

    /// Replace the whole list (history replay and document load).
    pub fn replace(&mut self, elements: Vec<DesignElement>) {
        self.elements = elements;
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }
}
