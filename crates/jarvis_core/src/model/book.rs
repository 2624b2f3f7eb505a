//! Entity collections with a model-owned filtered view.
//!
//! # Responsibility
//! - Own the backing list of one entity kind.
//! - Maintain a projection (indices into the backing list) under a single
//!   predicate, used for display and for every index-based command.
//!
//! # Invariants
//! - The projection is recomputed in full after every predicate change and
//!   after every mutation; there is no incremental diffing.
//! - Uniqueness is enforced by `ModelManager`, not here.

use crate::index::Index;
use crate::model::lesson::Lesson;
use crate::model::student::Student;
use crate::model::task::Task;
use std::fmt::{Debug, Formatter};

/// Single-predicate filter applied to a book.
pub type Predicate<T> = Box<dyn Fn(&T) -> bool>;

/// Boxes a closure as a book predicate.
pub fn predicate<T>(matches: impl Fn(&T) -> bool + 'static) -> Predicate<T> {
    Box::new(matches)
}

/// Predicate that keeps every entry.
pub fn show_all<T>() -> Predicate<T> {
    predicate(|_| true)
}

pub struct FilteredBook<T> {
    items: Vec<T>,
    predicate: Predicate<T>,
    visible: Vec<usize>,
}

pub type StudentBook = FilteredBook<Student>;
pub type LessonBook = FilteredBook<Lesson>;
pub type TaskList = FilteredBook<Task>;

impl<T> FilteredBook<T> {
    pub fn new() -> Self {
        Self::from_items(Vec::new())
    }

    pub fn from_items(items: Vec<T>) -> Self {
        let mut book = Self {
            items,
            predicate: show_all(),
            visible: Vec::new(),
        };
        book.refresh();
        book
    }

    /// Unfiltered backing entries in insertion order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn view(&self) -> FilteredView<'_, T> {
        FilteredView {
            items: &self.items,
            visible: &self.visible,
        }
    }

    /// Replaces the predicate and re-projects.
    pub fn set_predicate(&mut self, predicate: Predicate<T>) {
        self.predicate = predicate;
        self.refresh();
    }

    pub fn position(&self, matches: impl Fn(&T) -> bool) -> Option<usize> {
        self.items.iter().position(matches)
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.refresh();
    }

    pub fn replace_at(&mut self, position: usize, item: T) {
        self.items[position] = item;
        self.refresh();
    }

    pub fn remove_at(&mut self, position: usize) -> T {
        let removed = self.items.remove(position);
        self.refresh();
        removed
    }

    /// Replaces every entry at once and re-projects.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
        self.refresh();
    }

    fn refresh(&mut self) {
        let predicate = &self.predicate;
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| predicate(item))
            .map(|(position, _)| position)
            .collect();
    }
}

impl<T> Default for FilteredBook<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug> Debug for FilteredBook<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilteredBook")
            .field("items", &self.items)
            .field("visible", &self.visible)
            .finish()
    }
}

/// Read-only, live projection of a `FilteredBook`.
pub struct FilteredView<'a, T> {
    items: &'a [T],
    visible: &'a [usize],
}

impl<'a, T> FilteredView<'a, T> {
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Resolves a displayed index; `None` when out of range.
    pub fn get(&self, index: Index) -> Option<&'a T> {
        let items = self.items;
        self.visible
            .get(index.zero_based())
            .map(|position| &items[*position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a T> {
        let items = self.items;
        let visible = self.visible;
        visible.iter().map(move |position| &items[*position])
    }

    pub fn to_vec(&self) -> Vec<&'a T> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{predicate, FilteredBook};
    use crate::index::Index;

    #[test]
    fn view_resolves_indices_against_projection() {
        let mut book = FilteredBook::from_items(vec![1, 2, 3, 4]);
        book.set_predicate(predicate(|value: &i32| value % 2 == 0));

        let view = book.view();
        assert_eq!(view.len(), 2);
        assert_eq!(view.get(Index::from_zero_based(1)), Some(&4));
        assert_eq!(view.get(Index::from_zero_based(2)), None);
    }

    #[test]
    fn mutation_reapplies_current_predicate() {
        let mut book = FilteredBook::from_items(vec![1, 2]);
        book.set_predicate(predicate(|value: &i32| *value > 1));
        book.push(5);
        assert_eq!(book.view().to_vec(), vec![&2, &5]);

        book.remove_at(1);
        assert_eq!(book.view().to_vec(), vec![&5]);
    }
}
