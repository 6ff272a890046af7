use core::iter::{Flatten, FusedIterator};
use std::vec;

use crate::block::Block;

/// An owning iterator over the elements of a BlockList.
///
/// This struct is created by BlockList::into_iter().
pub struct IntoIter<T> {
    delegate: Flatten<vec::IntoIter<Block<T>>>,
    len: usize,
}

impl<T> Default for IntoIter<T> {
    fn default() -> Self {
        Self {
            delegate: Vec::new().into_iter().flatten(),
            len: 0,
        }
    }
}

impl<T> IntoIter<T> {
    pub(crate) fn from_blocks(blocks: Vec<Block<T>>, len: usize) -> Self {
        Self {
            delegate: blocks.into_iter().flatten(),
            len,
        }
    }
}

impl<T: Clone> Clone for IntoIter<T> {
    fn clone(&self) -> Self {
        Self {
            delegate: self.delegate.clone(),
            len: self.len,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

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

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let out = self.delegate.next_back()?;
        self.len -= 1;
        Some(out)
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> core::fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IntoIter")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}
