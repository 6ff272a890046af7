use core::iter::{Flatten, FusedIterator};
use std::vec;

use crate::block::Block;

/// A mutable iterator over the elements of a BlockList.
///
/// This struct is created by BlockList::iter_mut().
pub struct IterMut<'a, T> {
    delegate: Flatten<vec::IntoIter<&'a mut Block<T>>>,
    len: usize,
}

impl<T> Default for IterMut<'_, T> {
    fn default() -> Self {
        Self {
            delegate: Vec::new().into_iter().flatten(),
            len: 0,
        }
    }
}

impl<'a, T> IterMut<'a, T> {
    /// Blocks must be given in chain order and hold exactly `len` elements.
    pub(crate) fn from_blocks(blocks: Vec<&'a mut Block<T>>, len: usize) -> Self {
        Self {
            delegate: blocks.into_iter().flatten(),
            len,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let out = self.delegate.next()?;
        self.len -= 1;
        Some(out)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    #[inline]
    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }

    #[inline]
    fn count(self) -> usize {
        self.len
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let out = self.delegate.next_back()?;
        self.len -= 1;
        Some(out)
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> core::fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IterMut")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}
