//! Multi-selection of list entries.
//!
//! A [`SelectionModel`] belongs to exactly one list pane. It is created when the
//! pane becomes visible and dropped when the pane is replaced, so selections are
//! never shared across panes. Callers re-evaluate the action-mode controller
//! with [`SelectionModel::count`] after every [`SelectionModel::toggle`].

use crate::domain::ItemId;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionModel {
    selected: BTreeSet<ItemId>,
}

impl SelectionModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `id` and returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: ItemId) -> bool {
        let selected = if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        };
        tracing::trace!(item = %id, selected, count = self.selected.len(), "selection toggled");
        selected
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.selected.contains(&id)
    }

    /// Sorted snapshot of the selected ids, used as the target set of bulk commands.
    #[must_use]
    pub fn ids(&self) -> Vec<ItemId> {
        self.selected.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        if !self.selected.is_empty() {
            tracing::trace!(cleared = self.selected.len(), "selection cleared");
        }
        self.selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn toggle_flips_membership() {
        let mut selection = SelectionModel::new();
        assert!(selection.toggle(ItemId(1)));
        assert!(selection.contains(ItemId(1)));
        assert!(!selection.toggle(ItemId(1)));
        assert!(selection.is_empty());
    }

    #[test]
    fn count_matches_ids_toggled_an_odd_number_of_times() {
        let sequence = [3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5, 8, 9, 7, 9, 3, 2, 3, 8, 4, 6];
        let mut selection = SelectionModel::new();
        let mut toggles: HashMap<i64, usize> = HashMap::new();

        for raw in sequence {
            selection.toggle(ItemId(raw));
            *toggles.entry(raw).or_default() += 1;

            let odd = toggles.values().filter(|n| *n % 2 == 1).count();
            assert_eq!(selection.count(), odd);
        }
    }

    #[test]
    fn ids_are_sorted_and_clear_empties() {
        let mut selection = SelectionModel::new();
        selection.toggle(ItemId(9));
        selection.toggle(ItemId(2));
        assert_eq!(selection.ids(), vec![ItemId(2), ItemId(9)]);

        selection.clear();
        assert_eq!(selection.count(), 0);
    }
}
