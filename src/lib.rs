//! # block_list
//!
//! `block_list` implements an indexable sequence stored as a doubly linked chain
//! of fixed-capacity circular buffers ("blocks").
//!
//! ## Features
//! - Index based access that skips whole blocks thanks to a cached running
//!   length on every link of the chain.
//! - Positional inserts that only touch a bounded window of neighbouring
//!   blocks, relaying overflow one element per block instead of shifting the
//!   whole sequence.
//! - Constant time appends.
//!
//! ## Use Cases
//! `block_list` is ideal for scenarios where:
//! - You need random access reads mixed with inserts in the middle.
//! - You want to avoid the O(n) shifting of a `Vec` and the O(n) lookups of a
//!   `LinkedList`.
//!
//! ## Configuration
//! The second type parameter is the block size `N`: every block holds up to
//! `N + 1` elements, the extra slot being headroom used while splitting.
//! It defaults to `4`.
//!
//! ## Example
//! ```rust
//! use block_list::BlockList;
//!
//! let mut list: BlockList<i64> = BlockList::new();
//! list.push_back(5);
//! list.push_back(3);
//! list.push_back(7);
//! list.insert(1, 9).unwrap();
//!
//! assert_eq!(list.get(1), Some(&9));
//! assert_eq!(list.set(0, 2), Ok(5));
//! assert_eq!(list.to_string(), "[2, 9, 3, 7]");
//! ```

mod block;
mod chain;
mod error;
mod into_iter;
mod iter;
mod iter_mut;
mod sealed;

pub use block::Block;
pub use error::{Error, Result};
pub use into_iter::IntoIter;
pub use iter::{Blocks, Iter};
pub use iter_mut::IterMut;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Index, IndexMut};

use crate::chain::{ChainNode, Vacancy};

pub enum Usize<const N: usize> {}

/// Block sizes accepted by `BlockList`.
pub trait BlockSize: crate::sealed::Sealed {}

/// An indexable sequence made of a doubly linked chain of circular blocks.
///
/// # Features
/// - **Chained Blocks**: elements live in blocks of `N + 1` slots; every block
///   but the last holds at least `N` elements.
/// - **Cumulative Lengths**: each link caches how many elements precede it
///   (inclusive), so lookups walk blocks rather than elements.
///
/// # Type Parameters
/// - `T`: The type of elements stored in the list.
/// - `N`: The block size; blocks have a capacity of `N + 1`.
///
/// # Example
/// ```rust
/// use block_list::BlockList;
///
/// let mut list: BlockList<i64, 2> = BlockList::new();
/// list.push_back(1);
/// list.push_back(3);
/// list.insert(1, 2).unwrap();
///
/// assert!(!list.is_empty());
/// assert_eq!(list.len(), 3);
/// assert_eq!(list, [1, 2, 3]);
/// ```
pub struct BlockList<T, const N: usize = 4>
where
    Usize<N>: BlockSize,
{
    nodes: Vec<ChainNode<T>>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T, const N: usize, const M: usize> From<[T; M]> for BlockList<T, N>
where
    Usize<N>: BlockSize,
{
    fn from(values: [T; M]) -> Self {
        values.into_iter().collect()
    }
}

impl<T, const N: usize> FromIterator<T> for BlockList<T, N>
where
    Usize<N>: BlockSize,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut this = Self::new();
        this.extend(iter);
        this
    }
}

impl<T, const N: usize> Extend<T> for BlockList<T, N>
where
    Usize<N>: BlockSize,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|value| self.push_back(value));
    }
}

impl<'a, T, const N: usize> Extend<&'a T> for BlockList<T, N>
where
    T: Clone,
    Usize<N>: BlockSize,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned());
    }
}

impl<T, const N: usize> Default for BlockList<T, N>
where
    Usize<N>: BlockSize,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> BlockList<T, N>
where
    Usize<N>: BlockSize,
{
    /// The configured block size.
    pub const BLOCK_SIZE: usize = N;

    /// The number of slots of every block, one more than the block size.
    pub const BLOCK_CAPACITY: usize = N + 1;

    /// Creates a new, empty `BlockList` with no elements and no allocated blocks.
    ///
    /// # Example
    /// ```rust
    /// use block_list::BlockList;
    ///
    /// let list: BlockList<i64> = BlockList::new();
    ///
    /// assert!(list.is_empty());
    /// assert_eq!(list.blocks().len(), 0);
    /// ```
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Adds an element to the back of the `BlockList`.
    ///
    /// If the last block is full, a new one is allocated to
    /// accommodate the element.
    ///
    /// # Example
    /// ```rust
    /// use block_list::BlockList;
    ///
    /// let mut list: BlockList<i64, 1> = BlockList::new();
    /// list.push_back(10);
    /// list.push_back(20);
    /// list.push_back(30);
    ///
    /// assert_eq!(list.len(), 3);
    /// assert_eq!(list.blocks().len(), 2);
    /// assert_eq!(list.back(), Some(&30));
    /// ```
    pub fn push_back(&mut self, value: T) {
        let tail = match self.tail {
            Some(tail) if !self.nodes[tail].block().is_full() => tail,
            _ => self.push_node_back(),
        };

        self.nodes[tail].push_back(value);
        self.len += 1;
    }

    /// Inserts an element at the specified index, shifting subsequent elements
    /// to the right.
    ///
    /// When the block owning `index` is full, one element per block is relayed
    /// towards the nearest block with a free slot, looking at most
    /// `BLOCK_SIZE` blocks ahead. If none of them has room, a new block is
    /// spliced right after the owning one and the blocks in between are
    /// refilled to `BLOCK_SIZE` elements.
    ///
    /// Inserting at `len()` is the same as [`push_back`](Self::push_back).
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] if `index > len()`.
    ///
    /// # Examples
    /// ```
    /// use block_list::{BlockList, Error};
    ///
    /// let mut list: BlockList<i64, 2> = BlockList::new();
    /// list.push_back(10);
    /// list.push_back(30);
    /// list.insert(1, 20).unwrap();
    ///
    /// assert_eq!(list, [10, 20, 30]);
    /// assert_eq!(
    ///     list.insert(4, 50),
    ///     Err(Error::IndexOutOfRange { index: 4, len: 3 })
    /// );
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }

        if index == self.len() {
            self.push_back(value);
            return Ok(());
        }

        let Some(current) = self.search_node(index) else {
            unreachable!("no block holds index {} of {}", index, self.len());
        };

        if !self.nodes[current].block().is_full() {
            self.insert_into(current, index, value);
        } else {
            match self.search_vacancy(current) {
                Vacancy::Found(vacant) => self.shift_right_into(vacant, current, index, value),
                Vacancy::EndOfChain => {
                    let tail = self.push_node_back();
                    self.shift_right_into(tail, current, index, value);
                }
                Vacancy::Exhausted(last) => {
                    let spliced = self.splice_after(current);
                    self.shift_right_into(spliced, current, index, value);
                    self.shift_left_from(spliced, last);
                }
            }
        }

        self.len += 1;
        Ok(())
    }

    /// Replaces the element at the specified index, returning the previous one.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] if `index >= len()`.
    ///
    /// # Examples
    /// ```
    /// use block_list::BlockList;
    ///
    /// let mut list: BlockList<i64, 4> = BlockList::from([10, 20]);
    ///
    /// assert_eq!(list.set(1, 25), Ok(20));
    /// assert_eq!(list.get(1), Some(&25));
    /// assert!(list.set(2, 30).is_err());
    /// ```
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        match self.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(Error::IndexOutOfRange {
                index,
                len: self.len(),
            }),
        }
    }

    /// Removes all elements and blocks from the `BlockList`.
    ///
    /// # Example
    /// ```rust
    /// use block_list::BlockList;
    ///
    /// let mut list: BlockList<i32, 4> = BlockList::from([1, 2, 3]);
    /// list.clear();
    ///
    /// assert!(list.is_empty());
    /// assert_eq!(list.front(), None);
    /// ```
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Returns a reference to the first element of the `BlockList`, if any.
    ///
    /// # Examples
    /// ```
    /// use block_list::BlockList;
    ///
    /// let mut list: BlockList<i64, 4> = BlockList::new();
    /// assert_eq!(list.front(), None);
    ///
    /// list.push_back(10);
    /// list.insert(0, 5).unwrap();
    /// assert_eq!(list.front(), Some(&5));
    /// ```
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|head| self.nodes[head].block().front())
    }

    /// Returns a mutable reference to the first element of the `BlockList`, if any.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        let head = self.head?;
        self.nodes[head].block_mut().front_mut()
    }

    /// Returns a reference to the last element of the `BlockList`, if any.
    ///
    /// # Examples
    /// ```
    /// use block_list::BlockList;
    ///
    /// let mut list: BlockList<i64, 4> = BlockList::new();
    /// assert_eq!(list.back(), None);
    ///
    /// list.push_back(10);
    /// list.push_back(20);
    /// assert_eq!(list.back(), Some(&20));
    /// ```
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|tail| self.nodes[tail].block().back())
    }

    /// Returns a mutable reference to the last element of the `BlockList`, if any.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let tail = self.tail?;
        self.nodes[tail].block_mut().back_mut()
    }

    /// Returns a reference to the element at the specified index, if any.
    ///
    /// The owning block is the first one whose cumulative length exceeds
    /// `index`; the search starts from whichever end of the chain is nearer.
    ///
    /// # Examples
    /// ```
    /// use block_list::BlockList;
    ///
    /// let list: BlockList<i64, 1> = BlockList::from([10, 20, 30]);
    ///
    /// assert_eq!(list.get(0), Some(&10));
    /// assert_eq!(list.get(2), Some(&30));
    /// assert_eq!(list.get(3), None); // Out of bounds
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        let node = self.search_node(index)?;
        self.nodes[node].get(index)
    }

    /// Returns a mutable reference to the element at the specified index, if any.
    ///
    /// # Examples
    /// ```
    /// use block_list::BlockList;
    ///
    /// let mut list: BlockList<i64, 1> = BlockList::from([10, 20, 30]);
    ///
    /// *list.get_mut(1).unwrap() += 1;
    /// assert_eq!(list.get(1), Some(&21));
    /// assert_eq!(list.get_mut(3), None); // Out of bounds
    /// ```
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let node = self.search_node(index)?;
        self.nodes[node].get_mut(index)
    }

    /// Returns the number of elements currently stored in the `BlockList`.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Checks if the `BlockList` is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Provides an iterator over list's elements, front to back.
    ///
    /// # Examples
    /// ```
    /// use block_list::BlockList;
    ///
    /// let list: BlockList<_, 1> = BlockList::from([0, 1, 2]);
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::from_blocks(self.blocks(), self.len)
    }

    /// Provides a mutable iterator over list's elements, front to back.
    ///
    /// # Examples
    /// ```
    /// use block_list::BlockList;
    ///
    /// let mut list: BlockList<_, 1> = BlockList::from([0, 1, 2]);
    /// list.iter_mut().for_each(|value| *value *= 10);
    ///
    /// assert_eq!(list, [0, 10, 20]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let len = self.len;
        IterMut::from_blocks(self.blocks_mut(), len)
    }

    /// Provides an iterator over the blocks of the chain, front to back.
    ///
    /// # Examples
    /// ```
    /// use block_list::BlockList;
    ///
    /// let list: BlockList<_, 2> = BlockList::from([0, 1, 2, 3]);
    ///
    /// let sizes: Vec<_> = list.blocks().map(|block| block.len()).collect();
    /// assert_eq!(sizes, [3, 1]);
    /// assert!(list.blocks().all(|block| block.capacity() == 3));
    /// ```
    #[inline]
    pub fn blocks(&self) -> Blocks<'_, T> {
        Blocks::from_chain(&self.nodes, self.head, self.tail)
    }
}

impl<T, const N: usize> Index<usize> for BlockList<T, N>
where
    Usize<N>: BlockSize,
{
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Some(value) => value,
            None => panic!(
                "Index out of bounds: the len is {} but the index is {}",
                self.len(),
                index
            ),
        }
    }
}

impl<T, const N: usize> IndexMut<usize> for BlockList<T, N>
where
    Usize<N>: BlockSize,
{
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        let len = self.len();
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!(
                "Index out of bounds: the len is {} but the index is {}",
                len, index
            ),
        }
    }
}

impl<T: Clone, const N: usize> Clone for BlockList<T, N>
where
    Usize<N>: BlockSize,
{
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            head: self.head,
            tail: self.tail,
            len: self.len,
        }
    }
}

impl<T, const N: usize, const M: usize> PartialEq<[T; M]> for BlockList<T, N>
where
    T: PartialEq,
    Usize<N>: BlockSize,
{
    fn eq(&self, other: &[T; M]) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T, const N: usize> PartialEq<&[T]> for BlockList<T, N>
where
    T: PartialEq,
    Usize<N>: BlockSize,
{
    fn eq(&self, other: &&[T]) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, const N: usize> PartialEq<[T]> for BlockList<T, N>
where
    T: PartialEq,
    Usize<N>: BlockSize,
{
    fn eq(&self, other: &[T]) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T, const N: usize> PartialEq for BlockList<T, N>
where
    T: PartialEq,
    Usize<N>: BlockSize,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T, const N: usize> Eq for BlockList<T, N>
where
    T: Eq,
    Usize<N>: BlockSize,
{
}

impl<T, const N: usize> PartialOrd for BlockList<T, N>
where
    T: PartialOrd,
    Usize<N>: BlockSize,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T, const N: usize> Ord for BlockList<T, N>
where
    T: Ord,
    Usize<N>: BlockSize,
{
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T, const N: usize> Hash for BlockList<T, N>
where
    T: Hash,
    Usize<N>: BlockSize,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        self.iter().for_each(|v| v.hash(state));
    }
}

impl<T, const N: usize> fmt::Debug for BlockList<T, N>
where
    T: fmt::Debug,
    Usize<N>: BlockSize,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.blocks()).finish()
    }
}

impl<T, const N: usize> fmt::Display for BlockList<T, N>
where
    T: fmt::Display,
    Usize<N>: BlockSize,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

impl<T, const N: usize> IntoIterator for BlockList<T, N>
where
    Usize<N>: BlockSize,
{
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let len = self.len;
        IntoIter::from_blocks(self.into_blocks(), len)
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a BlockList<T, N>
where
    Usize<N>: BlockSize,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut BlockList<T, N>
where
    Usize<N>: BlockSize,
{
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
