use std::fmt;
use std::iter::FusedIterator;
use std::slice;

/// A fixed-capacity circular buffer holding one contiguous run of elements.
///
/// Elements can be added and removed at both ends in constant time, and
/// inserted or removed at an arbitrary position by shifting the elements that
/// follow it. Unused slots never hold a value.
///
/// # Example
/// ```rust
/// use block_list::Block;
///
/// let mut block = Block::new(3);
/// block.push_back(2);
/// block.push_front(0);
/// block.insert(1, 1);
///
/// assert!(block.is_full());
/// assert_eq!(block.get(1), Some(&1));
/// assert_eq!(block.to_string(), "[0,1,2]");
/// ```
pub struct Block<T> {
    head: usize,
    len: usize,
    slots: Box<[Option<T>]>,
}

impl<T> Block<T> {
    /// Creates an empty block able to hold up to `capacity` elements.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "block capacity must be positive");

        Self {
            head: 1 % capacity,
            len: 0,
            slots: (0..capacity).map(|_| None).collect(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Adds an element before the first one.
    ///
    /// # Panics
    /// Panics if the block is full.
    pub fn push_front(&mut self, value: T) {
        self.assert_not_full();

        self.head = self.dec(self.head);
        self.slots[self.head] = Some(value);
        self.len += 1;
    }

    /// Adds an element after the last one.
    ///
    /// # Panics
    /// Panics if the block is full.
    pub fn push_back(&mut self, value: T) {
        self.assert_not_full();

        let slot = self.physical(self.len);
        self.slots[slot] = Some(value);
        self.len += 1;
    }

    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let value = self.slots[self.head].take();
        self.head = self.inc(self.head);
        self.len -= 1;
        value
    }

    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let slot = self.physical(self.len - 1);
        self.len -= 1;
        self.slots[slot].take()
    }

    /// Inserts an element at `index`, shifting every later element one slot
    /// towards the back.
    ///
    /// # Panics
    /// Panics if the block is full or `index > len`.
    pub fn insert(&mut self, index: usize, value: T) {
        if index > self.len() {
            panic!("Index out of bounds: cannot insert at index {}", index);
        }

        if index == 0 {
            self.push_front(value);
            return;
        }

        self.assert_not_full();

        // Walk backward from the new tail slot, wrapping at the capacity.
        let mut slot = self.physical(self.len);
        for _ in index..self.len {
            let previous = self.dec(slot);
            self.slots[slot] = self.slots[previous].take();
            slot = previous;
        }

        self.slots[slot] = Some(value);
        self.len += 1;
    }

    /// Removes and returns the element at `index`, shifting every later
    /// element one slot towards the front.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        if index >= self.len() {
            panic!("Index out of bounds: cannot remove at index {}", index);
        }

        let removed = if index == 0 {
            self.pop_front()
        } else if index == self.len - 1 {
            self.pop_back()
        } else {
            let mut slot = self.physical(index);
            let value = self.slots[slot].take();
            for _ in index + 1..self.len {
                let following = self.inc(slot);
                self.slots[slot] = self.slots[following].take();
                slot = following;
            }

            self.len -= 1;
            value
        };

        match removed {
            Some(value) => value,
            None => unreachable!("live slot {} of the block is empty", index),
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len() {
            return self.slots[self.physical(index)].as_ref();
        }

        None
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len() {
            let slot = self.physical(index);
            return self.slots[slot].as_mut();
        }

        None
    }

    /// Replaces the element at `index`, returning the previous one.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    pub fn set(&mut self, index: usize, value: T) -> T {
        match self.get_mut(index) {
            Some(slot) => std::mem::replace(slot, value),
            None => panic!("Index out of bounds: cannot set at index {}", index),
        }
    }

    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    pub fn back(&self) -> Option<&T> {
        self.get(self.len().saturating_sub(1))
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.get_mut(self.len().saturating_sub(1))
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.head = 1 % self.capacity();
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            block: self,
            front: 0,
            back: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (wrapped, leading) = self.slots.split_at_mut(self.head);
        IterMut {
            slots: leading.iter_mut().chain(wrapped.iter_mut()),
            len: self.len,
        }
    }

    #[inline]
    fn physical(&self, index: usize) -> usize {
        (self.head + index) % self.capacity()
    }

    #[inline]
    fn inc(&self, slot: usize) -> usize {
        (slot + 1) % self.capacity()
    }

    #[inline]
    fn dec(&self, slot: usize) -> usize {
        (slot + self.capacity() - 1) % self.capacity()
    }

    fn assert_not_full(&self) {
        if self.is_full() {
            panic!(
                "Block is full: cannot insert more than {} elements",
                self.capacity()
            );
        }
    }
}

impl<T: Clone> Clone for Block<T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head,
            len: self.len,
            slots: self.slots.clone(),
        }
    }
}

impl<T: PartialEq> PartialEq for Block<T> {
    fn eq(&self, other: &Self) -> bool {
        self.capacity() == other.capacity()
            && self.len() == other.len()
            && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Block<T> {}

impl<T: fmt::Debug> fmt::Debug for Block<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for Block<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

impl<'a, T> IntoIterator for &'a Block<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Block<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for Block<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let mut slots = self.slots.into_vec();
        slots.rotate_left(self.head);

        IntoIter {
            slots: slots.into_iter(),
            len: self.len,
        }
    }
}

/// An iterator over the elements of a `Block`, in logical order.
pub struct Iter<'a, T> {
    block: &'a Block<T>,
    front: usize,
    back: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }

        let out = self.block.get(self.front);
        self.front += 1;
        out
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }

        self.back -= 1;
        self.block.get(self.back)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// A mutable iterator over the elements of a `Block`, in logical order.
pub struct IterMut<'a, T> {
    slots: std::iter::Chain<slice::IterMut<'a, Option<T>>, slice::IterMut<'a, Option<T>>>,
    len: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        // Live slots are contiguous from the head, so the first occupied
        // slot is always the next element.
        let out = self.slots.by_ref().find_map(Option::as_mut);
        self.len -= 1;
        out
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let out = self.slots.by_ref().rev().find_map(Option::as_mut);
        self.len -= 1;
        out
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// An owning iterator over the elements of a `Block`, in logical order.
pub struct IntoIter<T> {
    slots: std::vec::IntoIter<Option<T>>,
    len: usize,
}

impl<T: Clone> Clone for IntoIter<T> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            len: self.len,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let out = self.slots.by_ref().flatten().next();
        self.len -= 1;
        out
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let out = self.slots.by_ref().rev().flatten().next();
        self.len -= 1;
        out
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
