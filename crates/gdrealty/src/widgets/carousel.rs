//! Index cycling over a fixed, ordered sequence.
//!
//! A [`Carousel`] owns its items and a current position. Moving forward or
//! backward wraps at both ends, so the position is always a valid index
//! into the items.

/// Wrap an arbitrary index into `[0, len)`.
///
/// Used to normalize positions that arrive from outside the process (query
/// strings, client messages) before they reach a carousel.
///
/// # Panics
///
/// Panics if `len` is zero.
#[must_use]
pub fn wrap_index(index: usize, len: usize) -> usize {
    assert!(len > 0, "cannot wrap an index into an empty sequence");
    index % len
}

/// Current position within a non-empty ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel<T> {
    items: Vec<T>,
    index: usize,
}

impl<T> Carousel<T> {
    /// Create a carousel positioned at the first item.
    ///
    /// Returns `None` for an empty sequence.
    #[must_use]
    pub fn new(items: Vec<T>) -> Option<Self> {
        Self::starting_at(items, 0)
    }

    /// Create a carousel positioned at `index`, wrapped into range.
    ///
    /// Returns `None` for an empty sequence.
    #[must_use]
    pub fn starting_at(items: Vec<T>, index: usize) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        let index = wrap_index(index, items.len());
        Some(Self { items, index })
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`; a carousel cannot be built from an empty sequence.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The current position.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The item at the current position.
    #[must_use]
    pub fn current(&self) -> &T {
        &self.items[self.index]
    }

    /// All items in order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Advance one position, wrapping past the last item.
    pub fn next(&mut self) -> usize {
        self.index = (self.index + 1) % self.items.len();
        self.index
    }

    /// Step back one position, wrapping before the first item.
    pub fn previous(&mut self) -> usize {
        let len = self.items.len();
        self.index = (self.index + len - 1) % len;
        self.index
    }

    /// Jump directly to `index`.
    ///
    /// Callers pass positions in `[0, len)`. Anything else is a bug in the
    /// caller; debug builds assert, release builds wrap.
    pub fn jump_to(&mut self, index: usize) -> usize {
        debug_assert!(
            index < self.items.len(),
            "carousel index {index} out of range for {} items",
            self.items.len()
        );
        self.index = wrap_index(index, self.items.len());
        self.index
    }

    /// Position that [`next`](Self::next) would move to, without moving.
    #[must_use]
    pub fn peek_next(&self) -> usize {
        (self.index + 1) % self.items.len()
    }

    /// Position that [`previous`](Self::previous) would move to, without moving.
    #[must_use]
    pub fn peek_previous(&self) -> usize {
        let len = self.items.len();
        (self.index + len - 1) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three() -> Carousel<&'static str> {
        Carousel::new(vec!["a.jpg", "b.jpg", "c.jpg"]).unwrap()
    }

    #[test]
    fn test_empty_sequence_has_no_carousel() {
        assert!(Carousel::<u8>::new(Vec::new()).is_none());
        assert!(Carousel::<u8>::starting_at(Vec::new(), 3).is_none());
    }

    #[test]
    fn test_starts_at_first_item() {
        let carousel = three();
        assert_eq!(carousel.index(), 0);
        assert_eq!(*carousel.current(), "a.jpg");
        assert_eq!(carousel.len(), 3);
        assert!(!carousel.is_empty());
    }

    #[test]
    fn test_three_image_walkthrough() {
        let mut carousel = three();
        carousel.next();
        carousel.next();
        assert_eq!(carousel.index(), 2);
        assert_eq!(*carousel.current(), "c.jpg");

        carousel.next();
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn test_next_len_times_returns_to_start() {
        for len in 2..8 {
            for start in 0..len {
                let mut carousel = Carousel::starting_at((0..len).collect(), start).unwrap();
                for _ in 0..len {
                    carousel.next();
                }
                assert_eq!(carousel.index(), start, "len={len} start={start}");
            }
        }
    }

    #[test]
    fn test_previous_undoes_next() {
        for len in 2..8 {
            for start in 0..len {
                let mut carousel = Carousel::starting_at((0..len).collect(), start).unwrap();
                let before = carousel.clone();
                carousel.next();
                carousel.previous();
                assert_eq!(carousel, before);
            }
        }
    }

    #[test]
    fn test_previous_wraps_to_last() {
        let mut carousel = three();
        assert_eq!(carousel.previous(), 2);
        assert_eq!(*carousel.current(), "c.jpg");
    }

    #[test]
    fn test_single_item_stays_at_zero() {
        let mut carousel = Carousel::new(vec!["only.jpg"]).unwrap();
        assert_eq!(carousel.next(), 0);
        assert_eq!(carousel.next(), 0);
        assert_eq!(carousel.previous(), 0);
    }

    #[test]
    fn test_jump_to() {
        let mut carousel = three();
        assert_eq!(carousel.jump_to(1), 1);
        assert_eq!(*carousel.current(), "b.jpg");
    }

    #[test]
    fn test_starting_at_wraps_out_of_range() {
        let carousel = Carousel::starting_at(vec![1, 2, 3], 7).unwrap();
        assert_eq!(carousel.index(), 1);
    }

    #[test]
    fn test_peek_does_not_move() {
        let carousel = three();
        assert_eq!(carousel.peek_next(), 1);
        assert_eq!(carousel.peek_previous(), 2);
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn test_wrap_index() {
        assert_eq!(wrap_index(0, 5), 0);
        assert_eq!(wrap_index(5, 5), 0);
        assert_eq!(wrap_index(12, 5), 2);
    }

    #[test]
    #[should_panic(expected = "empty sequence")]
    fn test_wrap_index_empty_panics() {
        let _ = wrap_index(1, 0);
    }
}
