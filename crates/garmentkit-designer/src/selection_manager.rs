use std::collections::HashSet;

/// Tracks which elements of the active side are selected.
///
/// # Selection Model
///
/// - **Primary Selection**: the most recently selected element; resize and
///   rotate gestures act on it alone
/// - **Multiple Selection**: any number of ids, kept in selection order
/// - **Multi-select**: with the modifier held, clicking toggles membership
///   instead of replacing the selection
///
/// The manager holds ids only; callers prune it with [`SelectionManager::retain`]
/// after elements disappear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionManager {
    selected: Vec<String>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The primary selected element, if any.
    pub fn primary(&self) -> Option<&str> {
        self.selected.last().map(String::as_str)
    }

    pub fn ids(&self) -> &[String] {
        &self.selected
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Select an element.
    ///
    /// If `multi` is `false` the selection is replaced. If `multi` is `true`
    /// membership of `id` is toggled and the rest of the selection is kept.
    pub fn select(&mut self, id: &str, multi: bool) {
        if multi {
            if let Some(pos) = self.selected.iter().position(|s| s == id) {
                self.selected.remove(pos);
            } else {
                self.selected.push(id.to_string());
            }
        } else {
            self.selected.clear();
            self.selected.push(id.to_string());
        }
    }

    /// Replace the selection with `ids`; the last becomes primary.
    pub fn select_many<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected.clear();
        let mut seen = HashSet::new();
        for id in ids {
            let id = id.into();
            if seen.insert(id.clone()) {
                self.selected.push(id);
            }
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drop ids for which `exists` returns false. Returns whether anything was dropped.
    pub fn retain(&mut self, mut exists: impl FnMut(&str) -> bool) -> bool {
        let before = self.selected.len();
        self.selected.retain(|id| exists(id));
        before != self.selected.len()
    }
}
