//! Element operations (add, delete, duplicate, reorder, lock, patch,
//! selection, copy, paste) for designer state.
//!
//! Every operation acts on the current side. Locked elements are skipped by
//! bulk operations and rejected by single-element mutators; only
//! `toggle_lock` reaches them.

use garmentkit_core::Side;
use std::collections::HashSet;

use super::DesignerState;
use crate::element_store::ReorderOp;
use crate::error::{DesignerError, DesignerResult};
use crate::model::{DesignElement, ElementPatch, ShapeKind};

impl DesignerState {
    /// Top-left position that centers a `width` x `height` box in the design area.
    pub(crate) fn centered_position(&self, side: Side, width: f64, height: f64) -> (f64, f64) {
        match &self.template {
            Some(template) => {
                let (area_width, area_height) = template.design_area_size(side);
                (
                    ((area_width - width) / 2.0).max(0.0),
                    ((area_height - height) / 2.0).max(0.0),
                )
            }
            None => (0.0, 0.0),
        }
    }

    /// Add an element to the current side and select it.
    pub fn add_element(&mut self, element: DesignElement) -> DesignerResult<String> {
        let side = self.current_side();
        self.add_element_to(side, element)
    }

    pub(crate) fn add_element_to(&mut self, side: Side, mut element: DesignElement) -> DesignerResult<String> {
        element.clamp(self.min_element_size());
        element.x = element.x.max(0.0);
        element.y = element.y.max(0.0);
        let id = element.id.clone();

        self.document.side_mut(side).add(element)?;
        tracing::debug!("Added element {} on {}", id, side);

        if side == self.current_side() {
            self.selection.select(&id, false);
            self.emit_selection();
        }
        self.commit(side);
        Ok(id)
    }

    /// Add a text element with the configured defaults, centered in the design area.
    pub fn add_text(&mut self, content: Option<&str>) -> DesignerResult<String> {
        let defaults = &self.config.text;
        let (width, height) = (defaults.width, defaults.height);
        let (x, y) = self.centered_position(self.current_side(), width, height);

        let mut element = DesignElement::text(
            content.unwrap_or(defaults.content.as_str()),
            x,
            y,
            width,
            height,
        );
        element.font_family = defaults.font_family.clone();
        element.font_size = defaults.font_size;
        element.font_weight = defaults.font_weight.clone();
        element.color = defaults.color.clone();
        self.add_element(element)
    }

    /// Add a shape with the configured size and color, centered in the design area.
    pub fn add_shape(&mut self, shape: ShapeKind) -> DesignerResult<String> {
        let size = self.config.shape.size;
        let (x, y) = self.centered_position(self.current_side(), size, size);
        let element =
            DesignElement::shape(shape, x, y, size, size).with_color(self.config.shape.color.clone());
        self.add_element(element)
    }

    /// Remove elements from the current side. Locked elements stay.
    pub fn remove_elements(&mut self, ids: &[String]) -> Vec<String> {
        let removed = self.store_mut().remove(ids);
        if removed.is_empty() {
            return removed;
        }

        tracing::debug!("Removed {} element(s)", removed.len());
        self.prune_selection();
        self.commit(self.current_side());
        removed
    }

    /// Deletes the selected element(s).
    pub fn delete_selected(&mut self) -> Vec<String> {
        let ids = self.selection.ids().to_vec();
        self.remove_elements(&ids)
    }

    /// Duplicate the selected elements and select the copies.
    pub fn duplicate_selected(&mut self) -> Vec<String> {
        let ids = self.selection.ids().to_vec();
        let offset = self.config.geometry.duplicate_offset;
        let new_ids = self.store_mut().duplicate(&ids, offset);
        if new_ids.is_empty() {
            return new_ids;
        }

        self.selection.select_many(new_ids.iter().cloned());
        self.emit_selection();
        self.commit(self.current_side());
        new_ids
    }

    /// Change an element's z-order. Returns whether the order changed.
    pub fn reorder(&mut self, id: &str, op: ReorderOp) -> bool {
        if !self.store_mut().reorder(id, op) {
            return false;
        }
        self.commit(self.current_side());
        true
    }

    /// Lock or unlock an element. Returns the new lock state.
    pub fn toggle_lock(&mut self, id: &str) -> DesignerResult<bool> {
        let locked = self.store_mut().toggle_lock(id)?;
        tracing::debug!("Element {} {}", id, if locked { "locked" } else { "unlocked" });
        self.commit(self.current_side());
        Ok(locked)
    }

    /// Apply a property patch to one element.
    pub fn patch_element(&mut self, id: &str, patch: &ElementPatch) -> DesignerResult<bool> {
        let min_size = self.min_element_size();
        let changed = self.store_mut().patch(id, patch, min_size)?;
        if changed {
            self.commit(self.current_side());
        }
        Ok(changed)
    }

    /// Apply a patch to every unlocked selected element. Returns how many changed.
    pub fn patch_selected(&mut self, patch: &ElementPatch) -> usize {
        let min_size = self.min_element_size();
        let ids = self.selection.ids().to_vec();
        let store = self.store_mut();

        let changed = ids
            .iter()
            .filter(|id| store.patch(id, patch, min_size).unwrap_or(false))
            .count();
        if changed > 0 {
            self.commit(self.current_side());
        }
        changed
    }

    /// Select an element; `multi` toggles membership instead of replacing.
    pub fn select(&mut self, id: &str, multi: bool) -> DesignerResult<()> {
        if !self.store().contains(id) {
            return Err(DesignerError::not_found(id));
        }
        self.selection.select(id, multi);
        self.emit_selection();
        Ok(())
    }

    pub fn select_all(&mut self) {
        let ids = self.store().ids();
        self.selection.select_many(ids);
        self.emit_selection();
    }

    pub fn clear_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.selection.clear();
        self.emit_selection();
    }

    pub(crate) fn prune_selection(&mut self) {
        let store = self.document.current();
        if self.selection.retain(|id| store.contains(id)) {
            self.emit_selection();
        }
    }

    /// Copies the selected elements to the clipboard. Returns how many were copied.
    pub fn copy_selected(&mut self) -> usize {
        let store = self.document.current();
        let selected = self.selection.ids().iter().filter_map(|id| store.get(id));
        self.clipboard.copy(selected);
        self.clipboard.len()
    }

    /// Paste the clipboard onto the current side and select the pasted elements.
    pub fn paste(&mut self) -> Vec<String> {
        if self.clipboard.is_empty() {
            return Vec::new();
        }

        let side = self.current_side();
        let mut taken: HashSet<String> = self.store().ids().into_iter().collect();
        let mut new_ids = Vec::new();
        for mut element in self.clipboard.paste(self.config.geometry.paste_offset) {
            while taken.contains(&element.id) {
                element.id = DesignElement::new_id();
            }
            taken.insert(element.id.clone());
            new_ids.push(element.id.clone());
            if let Err(e) = self.document.side_mut(side).add(element) {
                tracing::warn!("Paste skipped an element: {}", e);
                new_ids.pop();
            }
        }

        self.selection.select_many(new_ids.iter().cloned());
        self.emit_selection();
        self.commit(side);
        new_ids
    }
}
