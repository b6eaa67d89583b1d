//! Bounded, ordered set of selected pictograms

use tracing::debug;

use crate::config::defaults::DEFAULT_SELECTION_CAPACITY;
use crate::errors::{SelectionError, SelectionResult};
use crate::models::{PictogramId, PictogramRecord};

/// What a toggle did to the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

/// Pictograms picked for the next message, unique by id, in pick order
#[derive(Debug, Clone)]
pub struct SelectionSet {
    items: Vec<PictogramRecord>,
    capacity: usize,
}

impl Default for SelectionSet {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_SELECTION_CAPACITY)
    }
}

impl SelectionSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn contains(&self, id: PictogramId) -> bool {
        self.items.iter().any(|p| p.id == id)
    }

    pub fn items(&self) -> &[PictogramRecord] {
        &self.items
    }

    pub fn ids(&self) -> Vec<PictogramId> {
        self.items.iter().map(|p| p.id).collect()
    }

    /// Append a record. Already-selected ids are left where they are.
    pub fn add(&mut self, record: PictogramRecord) -> SelectionResult<()> {
        if self.contains(record.id) {
            return Ok(());
        }
        if self.is_full() {
            return Err(SelectionError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        debug!("Selected pictogram {}", record.id);
        self.items.push(record);
        Ok(())
    }

    /// Remove by id; returns whether anything was removed
    pub fn remove(&mut self, id: PictogramId) -> bool {
        let before = self.items.len();
        self.items.retain(|p| p.id != id);
        before != self.items.len()
    }

    /// Remove `record` if selected, otherwise add it (subject to capacity)
    pub fn toggle(&mut self, record: PictogramRecord) -> SelectionResult<Toggle> {
        if self.remove(record.id) {
            return Ok(Toggle::Removed);
        }
        self.add(record).map(|_| Toggle::Added)
    }

    /// Keep only selections for which `keep` returns true; returns how many were dropped
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&PictogramRecord) -> bool,
    {
        let before = self.items.len();
        self.items.retain(|p| keep(p));
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64) -> PictogramRecord {
        PictogramRecord {
            id: PictogramId(id),
            keywords: vec![format!("k{id}")],
            image_url: format!("https://img/{id}"),
            description: String::new(),
            is_schematic: false,
            categories: Vec::new(),
        }
    }

    #[test]
    fn test_capacity_is_enforced() {
        let mut selection = SelectionSet::default();
        for id in 1..=5 {
            assert_eq!(selection.toggle(record(id)), Ok(Toggle::Added));
        }

        assert_eq!(
            selection.toggle(record(6)),
            Err(SelectionError::CapacityExceeded { capacity: 5 })
        );
        assert_eq!(selection.len(), 5);
        assert!(!selection.contains(PictogramId(6)));
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut selection = SelectionSet::default();
        selection.add(record(1)).unwrap();
        let before = selection.ids();

        assert_eq!(selection.toggle(record(2)), Ok(Toggle::Added));
        assert_eq!(selection.toggle(record(2)), Ok(Toggle::Removed));
        assert_eq!(selection.ids(), before);
    }

    #[test]
    fn test_toggle_removes_even_when_full() {
        let mut selection = SelectionSet::with_capacity(2);
        selection.add(record(1)).unwrap();
        selection.add(record(2)).unwrap();

        assert_eq!(selection.toggle(record(1)), Ok(Toggle::Removed));
        assert_eq!(selection.ids(), vec![PictogramId(2)]);
    }

    #[test]
    fn test_order_and_uniqueness() {
        let mut selection = SelectionSet::default();
        selection.add(record(3)).unwrap();
        selection.add(record(1)).unwrap();
        selection.add(record(3)).unwrap();
        selection.add(record(2)).unwrap();

        assert_eq!(
            selection.ids(),
            vec![PictogramId(3), PictogramId(1), PictogramId(2)]
        );
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut selection = SelectionSet::default();
        selection.add(record(1)).unwrap();
        assert!(!selection.remove(PictogramId(9)));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_retain_and_clear() {
        let mut selection = SelectionSet::default();
        for id in 1..=4 {
            selection.add(record(id)).unwrap();
        }

        let dropped = selection.retain(|p| p.id.value() % 2 == 0);
        assert_eq!(dropped, 2);

        assert_eq!(selection.ids(), vec![PictogramId(2), PictogramId(4)]);

        selection.clear();
        assert!(selection.is_empty());
    }
}
