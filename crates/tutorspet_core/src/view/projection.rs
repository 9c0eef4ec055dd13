//! Filter/sort/transform projection engine.
//!
//! # Responsibility
//! - Hold the active predicate and comparator for one record collection.
//! - Materialise the filtered, sorted and transformed views.
//!
//! # Invariants
//! - After any update, `transformed()` equals filtering the last snapshot with
//!   the active predicate, then stably sorting with the active comparator.
//! - No update exposes a filtered-but-unsorted transformed view.

use log::debug;
use std::cmp::Ordering;

/// Boolean test over one record.
pub trait Predicate<T> {
    fn test(&self, item: &T) -> bool;
}

impl<T, F> Predicate<T> for F
where
    F: Fn(&T) -> bool,
{
    fn test(&self, item: &T) -> bool {
        self(item)
    }
}

/// Total order over records.
pub trait Comparator<T> {
    fn compare(&self, left: &T, right: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self(left, right)
    }
}

/// Materialised views for one canonical collection.
pub struct Projection<T> {
    label: &'static str,
    predicate: Option<Box<dyn Predicate<T>>>,
    comparator: Option<Box<dyn Comparator<T>>>,
    filtered: Vec<T>,
    sorted: Vec<T>,
    transformed: Vec<T>,
}

impl<T: Clone> Projection<T> {
    /// Creates a projection showing `source` unfiltered, in canonical order.
    ///
    /// `label` only identifies the projection in log events.
    pub fn new(label: &'static str, source: &[T]) -> Self {
        let mut projection = Self {
            label,
            predicate: None,
            comparator: None,
            filtered: Vec::new(),
            sorted: Vec::new(),
            transformed: Vec::new(),
        };
        projection.refresh(source);
        projection
    }

    /// Canonical order, active predicate applied.
    pub fn filtered(&self) -> &[T] {
        &self.filtered
    }

    /// Every record, active comparator applied.
    pub fn sorted(&self) -> &[T] {
        &self.sorted
    }

    /// What the UI displays: predicate, then comparator.
    pub fn transformed(&self) -> &[T] {
        &self.transformed
    }

    pub fn has_predicate(&self) -> bool {
        self.predicate.is_some()
    }

    pub fn has_comparator(&self) -> bool {
        self.comparator.is_some()
    }

    /// Replaces the predicate and recomputes from `source`.
    pub fn update_filtered(&mut self, source: &[T], predicate: impl Predicate<T> + 'static) {
        self.predicate = Some(Box::new(predicate));
        self.refresh(source);
    }

    /// Replaces the comparator and recomputes from `source`.
    pub fn update_sorted(&mut self, source: &[T], comparator: impl Comparator<T> + 'static) {
        self.comparator = Some(Box::new(comparator));
        self.refresh(source);
    }

    /// Replaces both predicate and comparator, then recomputes once.
    pub fn filter_then_sort(
        &mut self,
        source: &[T],
        predicate: impl Predicate<T> + 'static,
        comparator: impl Comparator<T> + 'static,
    ) {
        self.predicate = Some(Box::new(predicate));
        self.comparator = Some(Box::new(comparator));
        self.refresh(source);
    }

    /// Drops the predicate (keeps the comparator) and recomputes.
    pub fn show_all(&mut self, source: &[T]) {
        self.predicate = None;
        self.refresh(source);
    }

    /// Drops the comparator (keeps the predicate) and recomputes.
    pub fn clear_sort(&mut self, source: &[T]) {
        self.comparator = None;
        self.refresh(source);
    }

    /// Recomputes every view from the canonical snapshot.
    pub fn refresh(&mut self, source: &[T]) {
        self.filtered = source
            .iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect();

        self.sorted = source.to_vec();
        self.sort_in_place_sorted();

        // Built into a local first so `transformed` only ever changes once.
        let mut transformed = self.filtered.clone();
        if let Some(comparator) = &self.comparator {
            transformed.sort_by(|left, right| comparator.compare(left, right));
        }
        self.transformed = transformed;

        debug!(
            "event=view_refresh module=view status=ok view={} total={} shown={} filtered={} sorted={}",
            self.label,
            source.len(),
            self.transformed.len(),
            self.has_predicate(),
            self.has_comparator()
        );
    }

    fn matches(&self, item: &T) -> bool {
        self.predicate
            .as_ref()
            .map_or(true, |predicate| predicate.test(item))
    }

    fn sort_in_place_sorted(&mut self) {
        if let Some(comparator) = &self.comparator {
            self.sorted
                .sort_by(|left, right| comparator.compare(left, right));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Projection;

    fn source() -> Vec<i32> {
        vec![5, 2, 8, 1, 9, 4]
    }

    #[test]
    fn starts_with_canonical_order() {
        let projection = Projection::new("numbers", &source());
        assert_eq!(projection.transformed(), source().as_slice());
        assert_eq!(projection.filtered(), source().as_slice());
        assert_eq!(projection.sorted(), source().as_slice());
    }

    #[test]
    fn filter_then_sort_matches_separate_updates() {
        let data = source();
        let mut combined = Projection::new("combined", &data);
        combined.filter_then_sort(&data, |n: &i32| n % 2 == 1, |a: &i32, b: &i32| b.cmp(a));

        let mut separate = Projection::new("separate", &data);
        separate.update_filtered(&data, |n: &i32| n % 2 == 1);
        separate.update_sorted(&data, |a: &i32, b: &i32| b.cmp(a));

        assert_eq!(combined.transformed(), &[9, 5, 1]);
        assert_eq!(combined.transformed(), separate.transformed());
    }

    #[test]
    fn identity_filter_then_sort_equals_plain_sort() {
        let data = source();
        let mut combined = Projection::new("combined", &data);
        combined.filter_then_sort(&data, |_: &i32| true, |a: &i32, b: &i32| a.cmp(b));

        let mut sorted_only = Projection::new("sorted", &data);
        sorted_only.update_sorted(&data, |a: &i32, b: &i32| a.cmp(b));

        assert_eq!(combined.transformed(), sorted_only.transformed());
        assert_eq!(sorted_only.sorted(), sorted_only.transformed());
    }

    #[test]
    fn views_are_independent() {
        let data = source();
        let mut projection = Projection::new("numbers", &data);
        projection.filter_then_sort(&data, |n: &i32| *n > 3, |a: &i32, b: &i32| a.cmp(b));

        assert_eq!(projection.filtered(), &[5, 8, 9, 4]);
        assert_eq!(projection.sorted(), &[1, 2, 4, 5, 8, 9]);
        assert_eq!(projection.transformed(), &[4, 5, 8, 9]);
    }

    #[test]
    fn refresh_reapplies_to_new_snapshot() {
        let mut data = source();
        let mut projection = Projection::new("numbers", &data);
        projection.update_filtered(&data, |n: &i32| *n > 4);
        data.push(7);
        projection.refresh(&data);
        assert_eq!(projection.transformed(), &[5, 8, 9, 7]);

        projection.show_all(&data);
        assert_eq!(projection.transformed().len(), data.len());
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let data = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
        let mut projection = Projection::new("pairs", &data);
        projection.update_sorted(&data, |a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0));
        assert_eq!(projection.transformed(), &[(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]);
    }
}
