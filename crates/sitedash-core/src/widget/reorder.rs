//! Reorder engine: a dense, index-addressed ordering over active items.
//!
//! An [`OrderedCollection`] holds every item of one page, active or not.
//! Its *view* is the active subset sorted by `order`, ties broken by key.
//! All index arguments address the view as it is at call time, and every
//! mutation leaves the view's `order` values as `0..n-1`. Inactive items keep
//! whatever `order` they last had.

/// An item that can live in an [`OrderedCollection`].
pub trait Orderable {
    /// Stable identity, also the tie breaker for equal `order` values.
    fn key(&self) -> &str;
    /// Current position value.
    fn order(&self) -> u32;
    /// Overwrite the position value.
    fn set_order(&mut self, order: u32);
    /// Whether the item takes part in the ordered view.
    fn is_active(&self) -> bool;
}

/// Items of a single page with splice-based reordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedCollection<T> {
    items: Vec<T>,
}

impl<T> Default for OrderedCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Orderable> OrderedCollection<T> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection and renormalize its view.
    pub fn from_items(items: Vec<T>) -> Self {
        let mut collection = Self { items };
        collection.renormalize();
        collection
    }

    /// Number of items in the view.
    pub fn len(&self) -> usize {
        self.items.iter().filter(|item| item.is_active()).count()
    }

    /// Check if the view is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The ordered view.
    pub fn view(&self) -> Vec<&T> {
        self.view_indices().into_iter().map(|idx| &self.items[idx]).collect()
    }

    /// Every item, active or not, in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Look up an item by key.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.items.iter().find(|item| item.key() == key)
    }

    /// Mutable access by key. Callers that touch `order` or activity must
    /// call [`OrderedCollection::renormalize`] afterwards.
    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.key() == key)
    }

    /// Live position of an item in the view.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.view_indices()
            .into_iter()
            .position(|idx| self.items[idx].key() == key)
    }

    /// Compact the view's `order` values to `0..n-1`.
    pub fn renormalize(&mut self) {
        let view = self.view_indices();
        self.assign(&view);
    }

    /// Move the item at view index `from` to view index `to`.
    ///
    /// Both indices clamp to `[0, len-1]`. Returns `false` without touching
    /// any `order` value when the view is empty or the clamped indices match.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        let mut view = self.view_indices();
        let Some(last) = view.len().checked_sub(1) else {
            return false;
        };
        let from = from.min(last);
        let to = to.min(last);
        if from == to {
            return false;
        }

        let moved = view.remove(from);
        view.insert(to, moved);
        self.assign(&view);
        true
    }

    /// Check that the view's `order` values are exactly `0..n-1`.
    pub fn is_dense(&self) -> bool {
        self.view()
            .iter()
            .enumerate()
            .all(|(expected, item)| item.order() as usize == expected)
    }

    fn view_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.items.len())
            .filter(|&idx| self.items[idx].is_active())
            .collect();
        indices.sort_by(|&a, &b| {
            let (a, b) = (&self.items[a], &self.items[b]);
            (a.order(), a.key()).cmp(&(b.order(), b.key()))
        });
        indices
    }

    fn assign(&mut self, view: &[usize]) {
        for (order, &idx) in view.iter().enumerate() {
            self.items[idx].set_order(order as u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Item {
        key: String,
        order: u32,
        active: bool,
    }

    impl Orderable for Item {
        fn key(&self) -> &str {
            &self.key
        }
        fn order(&self) -> u32 {
            self.order
        }
        fn set_order(&mut self, order: u32) {
            self.order = order;
        }
        fn is_active(&self) -> bool {
            self.active
        }
    }

    fn item(key: &str, order: u32) -> Item {
        Item {
            key: key.to_string(),
            order,
            active: true,
        }
    }

    fn keys(collection: &OrderedCollection<Item>) -> Vec<String> {
        collection.view().iter().map(|i| i.key.clone()).collect()
    }

    fn orders(collection: &OrderedCollection<Item>) -> Vec<u32> {
        collection.view().iter().map(|i| i.order).collect()
    }

    fn five() -> OrderedCollection<Item> {
        OrderedCollection::from_items(vec![
            item("a", 0),
            item("b", 1),
            item("c", 2),
            item("d", 3),
            item("e", 4),
        ])
    }

    #[test]
    fn test_from_items_renormalizes_sparse_orders() {
        let c = OrderedCollection::from_items(vec![item("b", 20), item("a", 10), item("c", 30)]);
        assert_eq!(keys(&c), ["a", "b", "c"]);
        assert_eq!(orders(&c), [0, 1, 2]);
    }

    #[test]
    fn test_ties_broken_by_key() {
        let c = OrderedCollection::from_items(vec![item("z", 1), item("m", 1), item("a", 0)]);
        assert_eq!(keys(&c), ["a", "m", "z"]);
        assert!(c.is_dense());
    }

    #[test]
    fn test_move_forward_shifts_intermediates_back() {
        let mut c = five();
        assert!(c.move_item(1, 3));
        assert_eq!(keys(&c), ["a", "c", "d", "b", "e"]);
        assert_eq!(orders(&c), [0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_move_backward_shifts_intermediates_forward() {
        let mut c = five();
        assert!(c.move_item(4, 0));
        assert_eq!(keys(&c), ["e", "a", "b", "c", "d"]);
        assert!(c.is_dense());
    }

    #[test]
    fn test_permutation_law_all_pairs() {
        let original = keys(&five());
        for i in 0..5 {
            for j in 0..8 {
                let mut c = five();
                c.move_item(i, j);
                let target = j.min(4);
                let after = keys(&c);
                assert_eq!(after[target], original[i]);

                let mut expected = original.clone();
                let moved = expected.remove(i);
                expected.insert(target, moved);
                assert_eq!(after, expected);
                assert!(c.is_dense());
            }
        }
    }

    #[test]
    fn test_identity_move_is_noop() {
        let mut c = five();
        let before = c.clone();
        for i in 0..5 {
            assert!(!c.move_item(i, i));
        }
        assert_eq!(c, before);
    }

    #[test]
    fn test_clamped_identity_is_noop() {
        let mut c = five();
        let before = c.clone();
        assert!(!c.move_item(4, 99));
        assert!(!c.move_item(99, 4));
        assert_eq!(c, before);
    }

    #[test]
    fn test_move_on_empty_is_noop() {
        let mut c: OrderedCollection<Item> = OrderedCollection::new();
        assert!(!c.move_item(0, 3));
        assert!(c.is_empty());
    }

    #[test]
    fn test_inactive_items_keep_order_and_are_skipped() {
        let mut c = five();
        c.get_mut("b").unwrap().active = false;
        c.renormalize();

        assert_eq!(keys(&c), ["a", "c", "d", "e"]);
        assert_eq!(orders(&c), [0, 1, 2, 3]);
        assert_eq!(c.get("b").unwrap().order, 1);

        // Index 1 now addresses "c", not the inactive "b".
        assert!(c.move_item(1, 3));
        assert_eq!(keys(&c), ["a", "d", "e", "c"]);
        assert_eq!(c.get("b").unwrap().order, 1);
    }

    #[test]
    fn test_position_tracks_live_view() {
        let mut c = five();
        assert_eq!(c.position("d"), Some(3));
        c.get_mut("a").unwrap().active = false;
        c.renormalize();
        assert_eq!(c.position("d"), Some(2));
        assert_eq!(c.position("a"), None);
        assert_eq!(c.position("zz"), None);
    }
}
