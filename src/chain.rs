use crate::block::Block;
use crate::{BlockList, BlockSize, Usize};

/// A link of the chain: owns one block and caches the number of elements
/// stored from the first node through this one.
#[derive(Clone)]
pub(crate) struct ChainNode<T> {
    block: Block<T>,
    prev: Option<usize>,
    next: Option<usize>,
    cumulative_len: usize,
}

impl<T> ChainNode<T> {
    fn new(
        capacity: usize,
        prev: Option<usize>,
        next: Option<usize>,
        cumulative_len: usize,
    ) -> Self {
        Self {
            block: Block::new(capacity),
            prev,
            next,
            cumulative_len,
        }
    }

    #[inline]
    pub(crate) fn block(&self) -> &Block<T> {
        &self.block
    }

    #[inline]
    pub(crate) fn block_mut(&mut self) -> &mut Block<T> {
        &mut self.block
    }

    #[inline]
    pub(crate) fn prev(&self) -> Option<usize> {
        self.prev
    }

    #[inline]
    pub(crate) fn next(&self) -> Option<usize> {
        self.next
    }

    /// Maps an index of the whole list into this node's block.
    #[inline]
    fn to_block_index(&self, list_index: usize) -> usize {
        list_index + self.block.len() - self.cumulative_len
    }

    pub(crate) fn get(&self, list_index: usize) -> Option<&T> {
        self.block.get(self.to_block_index(list_index))
    }

    pub(crate) fn get_mut(&mut self, list_index: usize) -> Option<&mut T> {
        let index = self.to_block_index(list_index);
        self.block.get_mut(index)
    }

    fn insert(&mut self, list_index: usize, value: T) {
        let index = self.to_block_index(list_index);
        self.block.insert(index, value);
        self.cumulative_len += 1;
    }

    pub(crate) fn push_back(&mut self, value: T) {
        self.block.push_back(value);
        self.cumulative_len += 1;
    }

    fn push_front(&mut self, value: T) {
        self.block.push_front(value);
        self.cumulative_len += 1;
    }

    fn pop_back(&mut self) -> Option<T> {
        let value = self.block.pop_back()?;
        self.cumulative_len -= 1;
        Some(value)
    }

    fn pop_front(&mut self) -> Option<T> {
        let value = self.block.pop_front()?;
        self.cumulative_len -= 1;
        Some(value)
    }
}

/// Outcome of looking for spare room after a full node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Vacancy {
    /// A node with at least one free slot.
    Found(usize),
    /// The chain ended before a free slot was found.
    EndOfChain,
    /// Every node in the window is full; holds the last one examined.
    Exhausted(usize),
}

impl<T, const N: usize> BlockList<T, N>
where
    Usize<N>: BlockSize,
{
    /// Returns the node holding `index`, scanning from the nearer end.
    pub(crate) fn search_node(&self, index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }

        if index <= self.len / 2 {
            let mut current = self.head?;
            while self.nodes[current].cumulative_len <= index {
                current = self.nodes[current].next?;
            }

            return Some(current);
        }

        let mut current = self.tail?;
        while let Some(prev) = self.nodes[current].prev {
            if self.nodes[prev].cumulative_len <= index {
                break;
            }

            current = prev;
        }

        Some(current)
    }

    /// Walks forward from `start` over at most `BLOCK_SIZE` links looking
    /// for a node that is not full.
    pub(crate) fn search_vacancy(&self, start: usize) -> Vacancy {
        let mut current = start;
        for _ in 0..Self::BLOCK_SIZE {
            if !self.nodes[current].block.is_full() {
                return Vacancy::Found(current);
            }

            match self.nodes[current].next {
                Some(next) => current = next,
                None => return Vacancy::EndOfChain,
            }
        }

        if self.nodes[current].block.is_full() {
            Vacancy::Exhausted(current)
        } else {
            Vacancy::Found(current)
        }
    }

    /// Links a fresh empty node after the current tail and returns it.
    pub(crate) fn push_node_back(&mut self) -> usize {
        let id = self.nodes.len();
        let cumulative_len = self
            .tail
            .map_or(0, |tail| self.nodes[tail].cumulative_len);
        self.nodes.push(ChainNode::new(
            Self::BLOCK_CAPACITY,
            self.tail,
            None,
            cumulative_len,
        ));

        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);

        log::trace!("allocated tail block {id} after {cumulative_len} elements");
        id
    }

    /// Links a fresh empty node right after `node` and returns it.
    pub(crate) fn splice_after(&mut self, node: usize) -> usize {
        let id = self.nodes.len();
        let next = self.nodes[node].next;
        let cumulative_len = self.nodes[node].cumulative_len;
        self.nodes.push(ChainNode::new(
            Self::BLOCK_CAPACITY,
            Some(node),
            next,
            cumulative_len,
        ));

        self.nodes[node].next = Some(id);
        match next {
            Some(next) => self.nodes[next].prev = Some(id),
            None => self.tail = Some(id),
        }

        log::trace!("spliced block {id} after block {node}");
        id
    }

    /// Inserts `value` at list position `index` into `node`, which must have
    /// room for it.
    pub(crate) fn insert_into(&mut self, node: usize, index: usize, value: T) {
        self.nodes[node].insert(index, value);
        self.refresh(node);
    }

    /// Makes room in `target` by relaying one element per step from `target`
    /// forward to `from`, which must have a free slot, then inserts `value`
    /// at list position `index`.
    pub(crate) fn shift_right_into(
        &mut self,
        from: usize,
        target: usize,
        index: usize,
        value: T,
    ) {
        log::trace!("shifting right from block {from} into block {target}");

        let mut current = from;
        while current != target {
            let Some(prev) = self.nodes[current].prev else {
                unreachable!("block {target} does not precede block {from}");
            };

            if let Some(moved) = self.nodes[prev].pop_back() {
                self.nodes[current].push_front(moved);
            }
            current = prev;
        }

        self.insert_into(target, index, value);
    }

    /// Refills every node from `start` up to (excluding) `target` to
    /// `BLOCK_SIZE` elements by pulling from the front of its successor,
    /// leaving one slot of headroom in each.
    pub(crate) fn shift_left_from(&mut self, start: usize, target: usize) {
        log::trace!("rebalancing blocks {start} through {target}");

        let mut current = start;
        while current != target {
            let Some(next) = self.nodes[current].next else {
                break;
            };

            while self.nodes[current].block.len() < Self::BLOCK_SIZE {
                let Some(moved) = self.nodes[next].pop_front() else {
                    break;
                };
                self.nodes[current].push_back(moved);
            }
            current = next;
        }

        self.refresh(start);
    }

    /// Recomputes the cumulative length of `start` and of every node after it.
    pub(crate) fn refresh(&mut self, start: usize) {
        let mut cursor = Some(start);
        while let Some(id) = cursor {
            let before = self.nodes[id]
                .prev
                .map_or(0, |prev| self.nodes[prev].cumulative_len);

            let node = &mut self.nodes[id];
            node.cumulative_len = before + node.block.len();
            cursor = node.next;
        }
    }

    /// Node indices in chain order.
    pub(crate) fn chain_order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut cursor = self.head;
        while let Some(id) = cursor {
            order.push(id);
            cursor = self.nodes[id].next;
        }

        order
    }

    pub(crate) fn blocks_mut(&mut self) -> Vec<&mut Block<T>> {
        let order = self.chain_order();
        let mut slots: Vec<Option<&mut Block<T>>> = self
            .nodes
            .iter_mut()
            .map(|node| Some(node.block_mut()))
            .collect();

        order.into_iter().filter_map(|id| slots[id].take()).collect()
    }

    pub(crate) fn into_blocks(self) -> Vec<Block<T>> {
        let order = self.chain_order();
        let mut slots: Vec<Option<Block<T>>> =
            self.nodes.into_iter().map(|node| Some(node.block)).collect();

        order.into_iter().filter_map(|id| slots[id].take()).collect()
    }
}

#[cfg(test)]
impl<T, const N: usize> BlockList<T, N>
where
    Usize<N>: BlockSize,
{
    /// Checks links, block occupancy and every cached cumulative length.
    /// Every block but the tail holds at least `BLOCK_SIZE` elements.
    pub(crate) fn assert_invariants(&self) {
        let order = self.chain_order();
        assert_eq!(order.len(), self.nodes.len(), "unreachable blocks");
        assert_eq!(self.head.is_none(), self.is_empty());
        assert_eq!(self.tail.is_none(), self.is_empty());

        let mut cumulative_len = 0;
        let mut prev = None;
        for id in order {
            let node = &self.nodes[id];
            assert_eq!(node.prev, prev, "broken back link at block {id}");
            assert!(!node.block.is_empty(), "empty block {id}");
            assert_eq!(node.block.capacity(), Self::BLOCK_CAPACITY);
            if node.next.is_some() {
                assert!(
                    node.block.len() >= Self::BLOCK_SIZE,
                    "underfilled block {id}"
                );
            }

            cumulative_len += node.block.len();
            assert_eq!(
                node.cumulative_len, cumulative_len,
                "stale length at block {id}"
            );
            prev = Some(id);
        }

        assert_eq!(self.tail, prev);
        assert_eq!(self.len, cumulative_len);
    }
}

#[cfg(test)]
mod tests {
    use crate::BlockList;
    use crate::chain::Vacancy;

    fn layout<const N: usize>(sut: &BlockList<i32, N>) -> Vec<Vec<i32>>
    where
        crate::Usize<N>: crate::BlockSize,
    {
        sut.blocks()
            .map(|block| block.iter().copied().collect())
            .collect()
    }

    #[test]
    fn search_node_finds_owner_from_both_ends() {
        let sut = BlockList::<i32, 2>::from([0, 1, 2, 3, 4, 5, 6, 7]);
        let order = sut.chain_order();
        assert_eq!(order.len(), 3);

        for index in 0..8 {
            let node = sut.search_node(index).unwrap();
            assert_eq!(sut.nodes[node].get(index), Some(&(index as i32)));
            assert_eq!(node, order[index / 3]);
        }

        assert_eq!(sut.search_node(8), None);
        assert_eq!(BlockList::<i32, 2>::new().search_node(0), None);
    }

    #[test]
    fn search_vacancy_reports_all_three_outcomes() {
        let mut sut = BlockList::<i32, 1>::from([0, 1, 2, 3, 4]);
        let order = sut.chain_order();
        assert_eq!(sut.search_vacancy(order[0]), Vacancy::Exhausted(order[1]));
        assert_eq!(sut.search_vacancy(order[1]), Vacancy::Found(order[2]));

        sut.push_back(5);
        assert_eq!(sut.search_vacancy(order[1]), Vacancy::Exhausted(order[2]));
        assert_eq!(sut.search_vacancy(order[2]), Vacancy::EndOfChain);
    }

    #[test]
    fn shift_right_into_relays_one_element_per_block() {
        let mut sut = BlockList::<i32, 2>::from([0, 1, 2, 3, 4]);
        assert_eq!(layout(&sut), [vec![0, 1, 2], vec![3, 4]]);

        let order = sut.chain_order();
        sut.shift_right_into(order[1], order[0], 1, 42);
        sut.len += 1;
        sut.assert_invariants();
        assert_eq!(layout(&sut), [vec![0, 42, 1], vec![2, 3, 4]]);
    }

    #[test]
    fn splice_then_shift_left_refills_the_span_to_block_size() {
        let mut sut = BlockList::<i32, 2>::from([0, 1, 2, 3, 4, 5, 6, 7, 8]);
        let order = sut.chain_order();
        assert_eq!(sut.search_vacancy(order[0]), Vacancy::Exhausted(order[2]));

        let spliced = sut.splice_after(order[0]);
        sut.shift_right_into(spliced, order[0], 0, 9);
        sut.len += 1;
        assert_eq!(
            layout(&sut),
            [vec![9, 0, 1], vec![2], vec![3, 4, 5], vec![6, 7, 8]]
        );

        sut.shift_left_from(spliced, order[2]);
        sut.assert_invariants();
        assert_eq!(
            layout(&sut),
            [vec![9, 0, 1], vec![2, 3], vec![4, 5], vec![6, 7, 8]]
        );
    }

    #[test]
    fn refresh_repairs_stale_lengths() {
        let mut sut = BlockList::<i32, 2>::from([0, 1, 2, 3, 4, 5, 6]);
        let order = sut.chain_order();
        for &id in &order {
            sut.nodes[id].cumulative_len = 0;
        }

        sut.refresh(order[0]);
        sut.assert_invariants();
        assert_eq!(sut.nodes[order[2]].cumulative_len, 7);
    }

    #[test]
    fn push_node_back_links_the_new_tail() {
        let mut sut = BlockList::<i32, 3>::new();
        let first = sut.push_node_back();
        assert_eq!(sut.head, Some(first));
        assert_eq!(sut.tail, Some(first));

        sut.nodes[first].push_back(1);
        sut.len += 1;

        let second = sut.push_node_back();
        assert_eq!(sut.nodes[first].next(), Some(second));
        assert_eq!(sut.nodes[second].prev(), Some(first));
        assert_eq!(sut.nodes[second].cumulative_len, 1);
        assert_eq!(sut.tail, Some(second));
    }
}
