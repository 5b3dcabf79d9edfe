//! The two-sided design document.

use garmentkit_core::Side;

use crate::element_store::ElementStore;
use crate::model::DesignElement;

/// Front and back element lists plus the side being edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesignDocument {
    sides: [ElementStore; 2],
    current_side: Side,
}

fn slot(side: Side) -> usize {
    match side {
        Side::Front => 0,
        Side::Back => 1,
    }
}

impl DesignDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from element arrays, taken verbatim.
    pub fn from_sides(front: Vec<DesignElement>, back: Vec<DesignElement>, current_side: Side) -> Self {
        Self {
            sides: [ElementStore::from_elements(front), ElementStore::from_elements(back)],
            current_side,
        }
    }

    pub fn current_side(&self) -> Side {
        self.current_side
    }

    pub fn set_current_side(&mut self, side: Side) {
        self.current_side = side;
    }

    pub fn side(&self, side: Side) -> &ElementStore {
        &self.sides[slot(side)]
    }

    pub fn side_mut(&mut self, side: Side) -> &mut ElementStore {
        &mut self.sides[slot(side)]
    }

    pub fn current(&self) -> &ElementStore {
        self.side(self.current_side)
    }

    pub fn current_mut(&mut self) -> &mut ElementStore {
        self.side_mut(self.current_side)
    }

    pub fn element_count(&self) -> usize {
        self.sides.iter().map(ElementStore::len).sum()
    }
}
