use std::borrow::{Borrow, BorrowMut};
use std::ptr;

/// A single tower in the list: the key/value pair plus one forward link per
/// level the node participates in. Links are raw pointers into nodes owned by
/// the list through `Box` allocations; a null link terminates a level.
pub(crate) struct Node<K, V> {
    forward_: Vec<*mut Node<K, V>>,
    // `None` only ever in the header node. Real nodes always carry both, and
    // the algorithms never read the header's key or value.
    key_: Option<K>,
    value_: Option<V>,
}

impl<K, V> Node<K, V> {
    // A node of height h is linked at levels 0..h. Heights start at 1: every
    // node is at least on the bottom chain.
    pub fn new(key: K, value: V, height: usize) -> Node<K, V> {
        Node {
            forward_: vec![ptr::null_mut(); height],
            key_: Some(key),
            value_: Some(value),
        }
    }

    /// The header sentinel: no key, no value, links at every level.
    pub fn head(max_height: usize) -> Node<K, V> {
        Node {
            forward_: vec![ptr::null_mut(); max_height],
            key_: None,
            value_: None,
        }
    }

    pub fn height(&self) -> usize {
        self.forward_.len()
    }

    pub fn next(&self, level: usize) -> Option<&Node<K, V>> {
        match self.forward_.get(level) {
            Some(ptr) if !ptr.is_null() => Some(unsafe { &**ptr }),
            _ => None,
        }
    }

    pub fn next_mut(&mut self, level: usize) -> Option<&mut Node<K, V>> {
        match self.forward_.get(level) {
            Some(ptr) if !ptr.is_null() => Some(unsafe { &mut **ptr }),
            _ => None,
        }
    }

    pub fn next_ptr(&self, level: usize) -> *mut Node<K, V> {
        self.forward_.get(level).copied().unwrap_or(ptr::null_mut())
    }

    pub fn link_to(&mut self, level: usize, destination: *mut Node<K, V>) {
        debug_assert!(level < self.height());
        self.forward_[level] = destination;
    }

    /// Copies `node`'s outgoing link at `level`, splicing around it.
    pub fn link_to_next(&mut self, level: usize, node: &Node<K, V>) {
        debug_assert!(level < self.height());
        debug_assert!(level < node.height());
        self.forward_[level] = node.forward_[level];
    }

    pub fn unlink_all(&mut self) {
        for link in &mut self.forward_ {
            *link = ptr::null_mut();
        }
    }

    pub fn key<Q>(&self) -> &Q
    where
        K: Borrow<Q>,
        Q: ?Sized,
    {
        self.key_.as_ref().unwrap().borrow()
    }

    pub fn value<Q>(&self) -> &Q
    where
        V: Borrow<Q>,
        Q: ?Sized,
    {
        self.value_.as_ref().unwrap().borrow()
    }

    pub fn value_mut<Q>(&mut self) -> &mut Q
    where
        V: BorrowMut<Q>,
        Q: ?Sized,
    {
        self.value_.as_mut().unwrap().borrow_mut()
    }

    pub fn replace_value(&mut self, value: V) -> V {
        self.value_.replace(value).unwrap()
    }

    pub fn into_value(self) -> Option<V> {
        self.value_
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new() {
        let node: Node<i32, i32> = Node::new(3, 12, 5);
        assert_eq!(*node.key::<i32>(), 3);
        assert_eq!(*node.value::<i32>(), 12);
        assert_eq!(node.height(), 5);
    }

    #[test]
    fn head_has_full_height() {
        let head: Node<i32, i32> = Node::head(7);
        assert_eq!(head.height(), 7);
        for level in 0..7 {
            assert!(head.next(level).is_none());
        }
    }

    #[test]
    fn next_out_of_bounds() {
        let mut node: Node<i32, i32> = Node::new(3, 12, 5);
        assert!(node.next(10).is_none());
        assert!(node.next_mut(10).is_none());
        assert!(node.next_ptr(10).is_null());
    }

    #[test]
    fn next_empty() {
        let mut node: Node<i32, i32> = Node::new(3, 42, 5);
        for level in 0..5 {
            assert!(node.next(level).is_none());
            assert!(node.next_mut(level).is_none());
        }
    }

    #[test]
    fn link_single_level() {
        let linked_level = 0;
        let mut node: Node<i32, i32> = Node::new(4, 12312, 5);
        let destination = Box::into_raw(Box::new(Node::new(9, 55, 5)));

        node.link_to(linked_level, destination);

        for level in 0..node.height() {
            if level == linked_level {
                let next = node.next(level).unwrap();
                assert_eq!(*next.key::<i32>(), 9);
                assert_eq!(*next.value::<i32>(), 55);
            } else {
                assert!(node.next(level).is_none());
            }
        }

        unsafe {
            drop(Box::from_raw(destination));
        }
    }

    #[test]
    fn link_to_next_splices_around() {
        let mut first: Node<i32, i32> = Node::new(1, 10, 3);
        let second = Box::into_raw(Box::new(Node::new(2, 20, 3)));
        let third = Box::into_raw(Box::new(Node::new(3, 30, 3)));

        first.link_to(0, second);
        unsafe {
            (*second).link_to(0, third);
        }

        first.link_to_next(0, unsafe { &*second });
        assert_eq!(*first.next(0).unwrap().key::<i32>(), 3);

        unsafe {
            drop(Box::from_raw(second));
            drop(Box::from_raw(third));
        }
    }

    #[test]
    fn replace_value_returns_previous() {
        let mut node: Node<i32, i32> = Node::new(1, 10, 1);
        assert_eq!(node.replace_value(11), 10);
        assert_eq!(*node.value::<i32>(), 11);
        assert_eq!(node.into_value(), Some(11));
    }

    #[test]
    fn unlink_all_clears_every_level() {
        let mut node: Node<i32, i32> = Node::new(1, 10, 4);
        let other = Box::into_raw(Box::new(Node::new(2, 20, 4)));

        for level in 0..4 {
            node.link_to(level, other);
        }
        node.unlink_all();
        for level in 0..4 {
            assert!(node.next(level).is_none());
        }

        unsafe {
            drop(Box::from_raw(other));
        }
    }
}
