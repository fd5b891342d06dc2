//! Recency List Module
//!
//! Arena-backed doubly linked list used to order cache keys by last access.

// == Node Handle ==
/// Stable handle to a node in a [`RecencyList`].
///
/// A handle carries the generation of the slot it was issued for. Once the
/// node is removed the slot's generation moves on, so the old handle no longer
/// matches even after `push_back` recycles the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

/// Sentinel index for "no neighbour".
const NIL: usize = usize::MAX;

#[derive(Debug)]
struct Node<K> {
    /// `None` while the slot sits on the free list
    key: Option<K>,
    /// Bumped every time the slot is freed
    generation: u32,
    prev: usize,
    next: usize,
}

// == Recency List ==
/// Tracks access order for LRU eviction.
///
/// - Front = least recently used
/// - Back = most recently used
///
/// Nodes live in a `Vec` and link to each other by index, so moving a node,
/// appending and popping the front are all O(1). Freed slots are recycled.
#[derive(Debug)]
pub struct RecencyList<K> {
    nodes: Vec<Node<K>>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
    len: usize,
}

impl<K> Default for RecencyList<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> RecencyList<K> {
    // == Constructor ==
    /// Creates a new empty recency list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    // == Push Back ==
    /// Appends a key as the most recently used entry and returns its handle.
    pub fn push_back(&mut self, key: K) -> NodeId {
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx].key = Some(key);
                idx
            }
            None => {
                self.nodes.push(Node {
                    key: Some(key),
                    generation: 0,
                    prev: NIL,
                    next: NIL,
                });
                self.nodes.len() - 1
            }
        };

        self.link_back(idx);
        self.len += 1;
        self.handle(idx)
    }

    // == Move To Back ==
    /// Marks a node as most recently used.
    ///
    /// Stale handles are ignored.
    pub fn move_to_back(&mut self, id: NodeId) {
        if !self.is_live(id) || id.index == self.tail {
            return;
        }
        self.unlink(id.index);
        self.link_back(id.index);
    }

    // == Remove ==
    /// Unlinks a node and returns its key, or `None` for a stale handle.
    pub fn remove(&mut self, id: NodeId) -> Option<K> {
        if !self.is_live(id) {
            return None;
        }
        let idx = id.index;
        self.unlink(idx);
        self.len -= 1;
        self.free.push(idx);

        let node = &mut self.nodes[idx];
        node.generation = node.generation.wrapping_add(1);
        node.key.take()
    }

    // == Pop Front ==
    /// Removes and returns the least recently used key.
    pub fn pop_front(&mut self) -> Option<K> {
        if self.head == NIL {
            return None;
        }
        self.remove(self.handle(self.head))
    }

    #[cfg(test)]
    fn front(&self) -> Option<&K> {
        self.nodes.get(self.head).and_then(|node| node.key.as_ref())
    }

    #[cfg(test)]
    fn back(&self) -> Option<&K> {
        self.nodes.get(self.tail).and_then(|node| node.key.as_ref())
    }

    #[cfg(test)]
    fn get(&self, id: NodeId) -> Option<&K> {
        if !self.is_live(id) {
            return None;
        }
        self.nodes[id.index].key.as_ref()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every key and returns all slots to the free list.
    ///
    /// Slots are kept so handles issued before the clear stay stale.
    pub fn clear(&mut self) {
        self.free.clear();
        for (idx, node) in self.nodes.iter_mut().enumerate().rev() {
            if node.key.take().is_some() {
                node.generation = node.generation.wrapping_add(1);
            }
            node.prev = NIL;
            node.next = NIL;
            self.free.push(idx);
        }
        self.head = NIL;
        self.tail = NIL;
        self.len = 0;
    }

    /// Iterates keys from least to most recently used.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn is_live(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.index)
            .is_some_and(|node| node.generation == id.generation && node.key.is_some())
    }

    fn handle(&self, idx: usize) -> NodeId {
        NodeId {
            index: idx,
            generation: self.nodes[idx].generation,
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);

        if prev != NIL {
            self.nodes[prev].next = next;
        } else {
            self.head = next;
        }

        if next != NIL {
            self.nodes[next].prev = prev;
        } else {
            self.tail = prev;
        }

        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = NIL;
    }

    fn link_back(&mut self, idx: usize) {
        self.nodes[idx].prev = self.tail;
        self.nodes[idx].next = NIL;

        if self.tail != NIL {
            self.nodes[self.tail].next = idx;
        } else {
            self.head = idx;
        }
        self.tail = idx;
    }
}

// == Iterator ==
/// Front-to-back iterator over a [`RecencyList`].
pub struct Iter<'a, K> {
    list: &'a RecencyList<K>,
    cursor: usize,
    remaining: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.nodes.get(self.cursor)?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        node.key.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn drain<K>(list: &mut RecencyList<K>) -> Vec<K> {
        let mut out = Vec::new();
        while let Some(key) = list.pop_front() {
            out.push(key);
        }
        out
    }

    #[test]
    fn test_recency_new() {
        let list: RecencyList<&str> = RecencyList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
    }

    #[test]
    fn test_push_back_orders_oldest_first() {
        let mut list = RecencyList::new();

        list.push_back("key1");
        list.push_back("key2");
        list.push_back("key3");

        assert_eq!(list.len(), 3);
        assert_eq!(list.front(), Some(&"key1"));
        assert_eq!(list.back(), Some(&"key3"));
    }

    #[test]
    fn test_move_to_back() {
        let mut list = RecencyList::new();

        let a = list.push_back("a");
        list.push_back("b");
        list.push_back("c");

        list.move_to_back(a);

        assert_eq!(list.len(), 3);
        assert_eq!(list.front(), Some(&"b"));
        assert_eq!(drain(&mut list), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_move_tail_is_noop() {
        let mut list = RecencyList::new();

        list.push_back("a");
        let b = list.push_back("b");
        list.move_to_back(b);

        assert_eq!(drain(&mut list), vec!["a", "b"]);
    }

    #[test]
    fn test_order_after_multiple_moves() {
        let mut list = RecencyList::new();

        let a = list.push_back("a");
        let b = list.push_back("b");
        let c = list.push_back("c");

        list.move_to_back(a);
        list.move_to_back(c);
        list.move_to_back(b);

        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec!["a", "c", "b"]);
        assert_eq!(drain(&mut list), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_remove_middle() {
        let mut list = RecencyList::new();

        list.push_back("key1");
        let key2 = list.push_back("key2");
        list.push_back("key3");

        assert_eq!(list.remove(key2), Some("key2"));
        assert_eq!(list.len(), 2);
        assert_eq!(drain(&mut list), vec!["key1", "key3"]);
    }

    #[test]
    fn test_remove_head_and_tail() {
        let mut list = RecencyList::new();

        let first = list.push_back(1);
        list.push_back(2);
        let last = list.push_back(3);

        list.remove(first);
        list.remove(last);

        assert_eq!(list.front(), Some(&2));
        assert_eq!(list.back(), Some(&2));
    }

    #[test]
    fn test_stale_handle_is_ignored() {
        let mut list = RecencyList::new();

        let a = list.push_back("a");
        list.push_back("b");
        list.remove(a);

        assert_eq!(list.remove(a), None);
        list.move_to_back(a);
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(a), None);
    }

    #[test]
    fn test_pop_front_empty() {
        let mut list: RecencyList<String> = RecencyList::new();
        assert_eq!(list.pop_front(), None);
    }

    #[test]
    fn test_slots_are_reused() {
        let mut list = RecencyList::with_capacity(2);

        let a = list.push_back("a");
        list.push_back("b");
        list.remove(a);
        let c = list.push_back("c");

        // same slot, new generation
        assert_eq!(c.index, a.index);
        assert_ne!(c, a);
        assert_eq!(list.get(c), Some(&"c"));
        assert_eq!(list.get(a), None);
        assert_eq!(drain(&mut list), vec!["b", "c"]);
    }

    #[test]
    fn test_stale_handle_after_slot_reuse() {
        let mut list = RecencyList::new();

        let a = list.push_back("a");
        list.push_back("b");
        list.remove(a);
        let c = list.push_back("c");
        list.push_back("d");

        assert_eq!(list.remove(a), None);
        list.move_to_back(a);
        assert_eq!(list.len(), 3);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec!["b", "c", "d"]);
        assert_eq!(list.remove(c), Some("c"));
    }

    #[test]
    fn test_handles_from_before_clear_are_stale() {
        let mut list = RecencyList::new();

        let a = list.push_back("a");
        list.clear();
        let b = list.push_back("b");

        assert_eq!(b.index, a.index);
        assert_eq!(list.remove(a), None);
        assert_eq!(list.get(b), Some(&"b"));
    }

    #[test]
    fn test_single_node_cycle() {
        let mut list = RecencyList::new();

        let only = list.push_back("only");
        list.move_to_back(only);
        assert_eq!(list.pop_front(), Some("only"));
        assert!(list.is_empty());

        list.push_back("again");
        assert_eq!(list.front(), Some(&"again"));
    }

    #[test]
    fn test_clear() {
        let mut list = RecencyList::new();

        list.push_back("a");
        list.push_back("b");
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);
        list.push_back("c");
        assert_eq!(list.front(), Some(&"c"));
    }

    #[test]
    fn test_iter_len() {
        let mut list = RecencyList::new();
        for i in 0..5 {
            list.push_back(i);
        }
        assert_eq!(list.iter().len(), 5);
    }
}
