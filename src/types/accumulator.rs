use crate::types::MessageVec;
use core::fmt::Debug;
use core::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Append-only list of items collected under a single error key.
///
/// Wraps a [`MessageVec`] so that [`Errors`](crate::types::Errors) can keep the
/// messages for each key inline until a key collects more than one of them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Accumulator<T> {
    items: MessageVec<T>,
}

impl<T> Accumulator<T> {
    /// Creates a new empty accumulator.
    #[inline]
    pub fn new() -> Self {
        Self {
            items: MessageVec::new(),
        }
    }

    /// Adds a single item to the accumulator.
    #[inline]
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Extends the accumulator with items from an iterator.
    #[inline]
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }

    /// Returns true if the accumulator is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items in the accumulator.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Borrows the items in insertion order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.items.as_slice()
    }

    /// Returns an iterator over the items.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns true if an equal item has already been collected.
    #[inline]
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.items.contains(item)
    }
}

impl<T: Hash> Hash for Accumulator<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.items.hash(state);
    }
}

impl<T> From<MessageVec<T>> for Accumulator<T> {
    fn from(items: MessageVec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for Accumulator<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for Accumulator<T> {
    type Item = T;
    type IntoIter = smallvec::IntoIter<[T; 1]>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Accumulator<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
