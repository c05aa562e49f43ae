//! # Weighted Selection List
//!
//! Picks one of several weighted items (ore variants, indicators) from a
//! single random draw.
//!
//! ```text
//! items:       iron    gold    copper
//! weights:       3       1        4
//! cumulative:    3       4        8
//! roll in [0, 8):  0..3 -> iron, 3 -> gold, 4..8 -> copper
//! ```
//!
//! Exactly one `next_int` per draw, so the caller's stream stays aligned.

use crate::error::{VeinError, VeinResult};
use crate::seed::RandomSource;

/// Items with positive integer weights and a cumulative index.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedList<T> {
    items: Vec<T>,
    /// `cumulative[i]` = sum of the weights of `items[..=i]`.
    cumulative: Vec<u32>,
}

impl<T> WeightedList<T> {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            cumulative: Vec::new(),
        }
    }

    /// Creates a list holding one item.
    #[must_use]
    pub fn single(item: T) -> Self {
        Self {
            items: vec![item],
            cumulative: vec![1],
        }
    }

    /// Builds a list from `(item, weight)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`VeinError::InvalidWeight`] on a zero weight or overflow.
    pub fn from_entries(entries: impl IntoIterator<Item = (T, u32)>) -> VeinResult<Self> {
        let mut list = Self::new();
        for (item, weight) in entries {
            list.add(item, weight)?;
        }
        Ok(list)
    }

    /// Appends an item.
    ///
    /// # Errors
    ///
    /// Returns [`VeinError::InvalidWeight`] on a zero weight or if the total
    /// weight would overflow.
    pub fn add(&mut self, item: T, weight: u32) -> VeinResult<()> {
        if weight == 0 {
            return Err(VeinError::InvalidWeight { weight });
        }
        let total = self
            .total_weight()
            .checked_add(weight)
            .ok_or(VeinError::InvalidWeight { weight })?;

        self.items.push(item);
        self.cumulative.push(total);
        Ok(())
    }

    /// Sum of all weights (0 when empty).
    #[inline]
    #[must_use]
    pub fn total_weight(&self) -> u32 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Number of items.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there is nothing to draw.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Draws an item with probability `weight / total_weight`.
    ///
    /// # Errors
    ///
    /// Returns [`VeinError::EmptyList`] if the list has no items. Nothing is
    /// drawn from `rng` in that case.
    pub fn try_get<R: RandomSource + ?Sized>(&self, rng: &mut R) -> VeinResult<&T> {
        if self.is_empty() {
            return Err(VeinError::EmptyList);
        }
        let roll = rng.next_int(self.total_weight());
        let index = self.cumulative.partition_point(|&upper| upper <= roll);
        Ok(&self.items[index])
    }

    /// Draws an item with probability `weight / total_weight`.
    ///
    /// # Panics
    ///
    /// Panics if the list is empty. Vein types are validated non-empty
    /// before they can be registered, so this is a programming error.
    pub fn get<R: RandomSource + ?Sized>(&self, rng: &mut R) -> &T {
        match self.try_get(rng) {
            Ok(item) => item,
            Err(error) => panic!("{error}"),
        }
    }

    /// All items, in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Returns true if `item` is one of the entries.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.items.contains(item)
    }
}

impl<T> Default for WeightedList<T> {
    fn default() -> Self {
        Self::new()
    }
}
