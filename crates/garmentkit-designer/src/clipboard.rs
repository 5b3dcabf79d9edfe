//! Copy buffer for elements.

use crate::model::DesignElement;

#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    items: Vec<DesignElement>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the buffer with copies of `elements`.
    pub fn copy<'a>(&mut self, elements: impl IntoIterator<Item = &'a DesignElement>) {
        self.items = elements.into_iter().cloned().collect();
    }

    /// Fresh copies of the buffer with new ids, shifted by `offset`.
    pub fn paste(&self, offset: f64) -> Vec<DesignElement> {
        self.items
            .iter()
            .map(|e| e.cloned_with_offset(offset))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
