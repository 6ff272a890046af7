use core::iter::{Flatten, FusedIterator};

use crate::block::Block;
use crate::chain::ChainNode;

/// An iterator over the blocks of a BlockList, in chain order.
///
/// This struct is created by BlockList::blocks().
pub struct Blocks<'a, T> {
    nodes: &'a [ChainNode<T>],
    front: Option<usize>,
    back: Option<usize>,
    len: usize,
}

impl<T> Default for Blocks<'_, T> {
    fn default() -> Self {
        Self {
            nodes: &[],
            front: None,
            back: None,
            len: 0,
        }
    }
}

impl<'a, T> Blocks<'a, T> {
    pub(crate) fn from_chain(
        nodes: &'a [ChainNode<T>],
        head: Option<usize>,
        tail: Option<usize>,
    ) -> Self {
        Self {
            nodes,
            front: head,
            back: tail,
            len: nodes.len(),
        }
    }
}

impl<T> Clone for Blocks<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T> Iterator for Blocks<'a, T> {
    type Item = &'a Block<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let node = &self.nodes[self.front?];
        self.front = node.next();
        self.len -= 1;
        Some(node.block())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    #[inline]
    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for Blocks<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let node = &self.nodes[self.back?];
        self.back = node.prev();
        self.len -= 1;
        Some(node.block())
    }
}

impl<T> ExactSizeIterator for Blocks<'_, T> {}

impl<T> FusedIterator for Blocks<'_, T> {}

/// An iterator over the elements of a BlockList.
///
/// This struct is created by BlockList::iter().
pub struct Iter<'a, T> {
    delegate: Flatten<Blocks<'a, T>>,
    len: usize,
}

impl<T> Default for Iter<'_, T> {
    fn default() -> Self {
        Self {
            delegate: Blocks::default().flatten(),
            len: 0,
        }
    }
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn from_blocks(blocks: Blocks<'a, T>, len: usize) -> Self {
        Self {
            delegate: blocks.flatten(),
            len,
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            delegate: self.delegate.clone(),
            len: self.len,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

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

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let out = self.delegate.next_back()?;
        self.len -= 1;
        Some(out)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> core::fmt::Debug for Iter<'_, T>
where
    T: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Iter")
            .field(&self.clone().collect::<Vec<_>>())
            .field(&self.len)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::BlockList;

    use super::{Blocks, Iter};

    #[test]
    fn default_iterator_yields_nothing() {
        let mut sut: Iter<i32> = Default::default();
        assert_eq!(sut.len(), 0);
        assert_eq!(sut.next(), None);
        assert_eq!(sut.next_back(), None);

        let mut sut: Blocks<i32> = Default::default();
        assert_eq!(sut.next(), None);
    }

    #[test]
    fn iter_forward() {
        let mut list = BlockList::<usize, 1>::from([0, 1, 2, 3, 4]);
        let sut = list.iter();
        assert_eq!(&sut.copied().collect::<Vec<_>>(), &[0, 1, 2, 3, 4]);

        list.clear();
        let sut = list.iter();
        assert_eq!(&sut.copied().collect::<Vec<_>>(), &[]);
    }

    #[test]
    fn iter_backward() {
        let mut list = BlockList::<usize, 1>::from([0, 1, 2, 3, 4]);
        let sut = list.iter().rev();
        assert_eq!(&sut.copied().collect::<Vec<_>>(), &[4, 3, 2, 1, 0]);

        list.clear();
        let sut = list.iter().rev();
        assert_eq!(&sut.copied().collect::<Vec<_>>(), &[]);
    }

    #[test]
    fn iter_follows_chain_order_after_splits() {
        let mut list = BlockList::<usize, 1>::from([1, 2, 3, 4, 5, 6]);
        list.insert(0, 0).unwrap();
        list.insert(3, 42).unwrap();

        let sut = list.iter();
        assert_eq!(sut.len(), 8);
        assert_eq!(
            &sut.copied().collect::<Vec<_>>(),
            &[0, 1, 2, 42, 3, 4, 5, 6]
        );
        assert_eq!(
            &list.iter().rev().copied().collect::<Vec<_>>(),
            &[6, 5, 4, 3, 42, 2, 1, 0]
        );
    }

    #[test]
    fn double_ended_iterator_works_correctly() {
        let list = BlockList::<usize, 1>::from([0, 1, 2, 3, 4]);

        let mut sut = list.iter();
        assert_eq!(sut.len(), 5);

        assert_eq!(sut.next(), Some(&0));
        assert_eq!(sut.len(), 4);

        assert_eq!(sut.next_back(), Some(&4));
        assert_eq!(sut.len(), 3);

        assert_eq!(sut.next(), Some(&1));
        assert_eq!(sut.len(), 2);

        assert_eq!(sut.next_back(), Some(&3));
        assert_eq!(sut.len(), 1);

        assert_eq!(sut.next(), Some(&2));
        assert_eq!(sut.len(), 0);

        assert_eq!(sut.next_back(), None);
        assert_eq!(sut.next(), None);
        assert_eq!(sut.len(), 0);
    }

    #[test]
    fn each_iterator_instance_is_single_pass() {
        let list = BlockList::<usize, 2>::from([0, 1, 2]);

        let mut sut = list.iter();
        assert_eq!(sut.by_ref().count(), 3);
        assert_eq!(sut.next(), None);

        let sut = list.iter();
        assert_eq!(sut.count(), 3);
    }

    #[test]
    fn last_works_correctly() {
        let list = BlockList::<usize, 1>::from([0, 1, 2, 3, 4]);
        assert_eq!(list.iter().last(), Some(&4));
        assert_eq!(list.blocks().last().map(|block| block.len()), Some(1));
    }

    #[test]
    fn clone_works_correctly() {
        let list = BlockList::<usize, 1>::from([0, 1, 2, 3, 4]);

        let mut base = list.iter();

        let sut = base.clone();
        assert_eq!(&sut.copied().collect::<Vec<_>>(), &[0, 1, 2, 3, 4]);

        base.next();

        let sut = base.clone();
        assert_eq!(&sut.copied().collect::<Vec<_>>(), &[1, 2, 3, 4]);

        base.next_back();

        let sut = base.clone();
        assert_eq!(&sut.copied().collect::<Vec<_>>(), &[1, 2, 3]);
    }

    #[test]
    fn blocks_walk_the_chain_both_ways() {
        let mut list = BlockList::<usize, 1>::from([1, 2, 3, 4, 5, 6]);
        list.insert(0, 0).unwrap();

        let sizes: Vec<_> = list.blocks().map(|block| block.len()).collect();
        assert_eq!(sizes, [2, 1, 2, 2]);

        let sizes: Vec<_> = list.blocks().rev().map(|block| block.len()).collect();
        assert_eq!(sizes, [2, 2, 1, 2]);
        assert_eq!(list.blocks().len(), 4);
    }

    #[test]
    fn debug_works_correctly() {
        let array = [0, 1, 2, 3, 4];
        let list = BlockList::<usize, 2>::from(array);
        let sut = list.iter();
        assert_eq!(
            format!("{sut:?}"),
            format!("Iter({:?}, {})", array, array.len())
        );
    }
}
