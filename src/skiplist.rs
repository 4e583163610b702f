use std::borrow::Borrow;
use std::cmp;
use std::fmt;
use std::iter::FromIterator;
use std::ops;

use crate::error::{Error, Result};
use crate::height_control::{
    GeometricalGenerator, HeightControl, DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY, MAX_LEVEL_LIMIT,
};
use crate::node::Node;

/// A sorted map backed by a multi-level linked structure.
///
/// Nodes are linked at every level up to their randomly assigned height, so a
/// lookup can descend from sparse levels to dense ones and skip most of the
/// bottom chain. Expected cost of search, insertion and removal is
/// `O(log n)`; no rebalancing ever takes place.
pub struct SkipList<K, V> {
    /// Pointer to the header of the list. The header is a sentinel: it is
    /// created in the constructors, freed only on drop, carries no key or
    /// value, and is linked at every level. Every descent starts there, which
    /// spares the algorithms any special casing for the front of the list;
    /// its `next` at the bottom level is the first real element, if any.
    pub(crate) head_: *mut Node<K, V>,

    /// Number of elements in the list.
    length_: usize,

    /// Number of levels currently in use. At least 1, even when empty, and
    /// always equal to the height of the tallest node otherwise.
    level_: usize,

    /// Maximum height the `controller_` can generate. Held here because
    /// calls through `controller_` are virtually dispatched.
    max_level_: usize,

    /// Produces the height for each newly inserted node.
    controller_: Box<dyn HeightControl>,
}

impl<K, V> SkipList<K, V> {
    /// Creates an empty list with at most `max_level` levels and the default
    /// upgrade probability of 1/2.
    ///
    /// `max_level` outside `1..=MAX_LEVEL_LIMIT` is a configuration error.
    pub fn new(max_level: usize) -> Result<SkipList<K, V>> {
        Self::with_probability(max_level, DEFAULT_PROBABILITY)
    }

    /// Creates an empty list with an explicit upgrade probability, which must
    /// lie strictly between 0 and 1.
    pub fn with_probability(max_level: usize, upgrade_probability: f64) -> Result<SkipList<K, V>> {
        let controller = GeometricalGenerator::new(max_level, upgrade_probability)?;
        Self::with_controller(Box::new(controller))
    }

    /// Creates an empty list drawing heights from `controller`. This is the
    /// seam for deterministic structures: hand in a controller over a scripted
    /// random source and every insertion becomes reproducible.
    pub fn with_controller(controller: Box<dyn HeightControl>) -> Result<SkipList<K, V>> {
        let max_level = controller.max_height();
        if max_level == 0 || max_level > MAX_LEVEL_LIMIT {
            return Err(Error::InvalidMaxLevel(max_level));
        }

        Ok(SkipList {
            head_: Box::into_raw(Box::new(Node::head(max_level))),
            length_: 0,
            level_: 1,
            max_level_: max_level,
            controller_: controller,
        })
    }

    /// Returns the number of elements stored in the structure.
    pub fn len(&self) -> usize {
        self.length_
    }

    /// Returns `true` if there are no elements stored within the structure.
    pub fn is_empty(&self) -> bool {
        self.length_ == 0
    }

    /// Number of levels currently holding at least one node (1 when empty).
    pub fn level(&self) -> usize {
        self.level_
    }

    /// The level cap fixed at construction.
    pub fn max_level(&self) -> usize {
        self.max_level_
    }

    /// Removes every element. The header and the level cap survive, so the
    /// list is immediately usable and indistinguishable from a fresh one.
    pub fn clear(&mut self) {
        unsafe {
            let mut current = (*self.head_).next_ptr(0);
            while !current.is_null() {
                let next = (*current).next_ptr(0);
                drop(Box::from_raw(current));
                current = next;
            }

            (*self.head_).unlink_all();
        }

        self.length_ = 0;
        self.level_ = 1;
    }
}

impl<K: Ord, V> SkipList<K, V> {
    /// Finds the node previous to the node that would hold `key`, if any.
    fn find_lower_bound<Q>(&self, key: &Q) -> &Node<K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current: *const Node<K, V> = self.head_;

        for level in (0..self.level_).rev() {
            loop {
                let next = unsafe { (*current).next_ptr(level) };
                if next.is_null() || unsafe { (*next).key() } >= key {
                    break;
                }
                current = next;
            }
        }

        unsafe { &*current }
    }

    fn find_lower_bound_mut<Q>(&mut self, key: &Q) -> &mut Node<K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current: *mut Node<K, V> = self.head_;

        for level in (0..self.level_).rev() {
            loop {
                let next = unsafe { (*current).next_ptr(level) };
                if next.is_null() || unsafe { (*next).key() } >= key {
                    break;
                }
                current = next;
            }
        }

        unsafe { &mut *current }
    }

    /// Same descent, but it also records the update trail: for every level,
    /// the last node visited before dropping down. Entries for levels above
    /// `level_` stay at the header, which is where a taller-than-ever node
    /// must be spliced in.
    fn find_lower_bound_with_updates<Q>(
        &mut self,
        key: &Q,
    ) -> (*mut Node<K, V>, Vec<*mut Node<K, V>>)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut updates = vec![self.head_; self.max_level_];
        let mut current = self.head_;

        for level in (0..self.level_).rev() {
            loop {
                let next = unsafe { (*current).next_ptr(level) };
                if next.is_null() || unsafe { (*next).key() } >= key {
                    break;
                }
                current = next;
            }

            updates[level] = current;
        }

        (current, updates)
    }

    /// Inserts a key/value pair. If `key` is already present, its value is
    /// overwritten in place and the previous one is returned; the structure
    /// itself does not change, and no height is drawn.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (lower_bound, updates) = self.find_lower_bound_with_updates(&key);

        unsafe {
            if let Some(next) = (*lower_bound).next_mut(0) {
                if next.key() == &key {
                    return Some(next.replace_value(value));
                }
            }
        }

        let height = self.controller_.get_height().clamp(1, self.max_level_);
        let node = Box::into_raw(Box::new(Node::new(key, value, height)));
        for (level, update) in updates.into_iter().enumerate().take(height) {
            unsafe {
                (*node).link_to_next(level, &*update);
                (*update).link_to(level, node);
            }
        }

        self.level_ = cmp::max(self.level_, height);
        self.length_ += 1;
        None
    }

    /// Returns a reference to the value stored under `key`, if present.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let lower_bound = self.find_lower_bound(key);
        lower_bound.next(0).and_then(|node| {
            if node.key() == key {
                Some(node.value())
            } else {
                None
            }
        })
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let lower_bound = self.find_lower_bound_mut(key);
        lower_bound.next_mut(0).and_then(|node| {
            if node.key() == key {
                Some(node.value_mut())
            } else {
                None
            }
        })
    }

    /// Returns `true` if `key` is in the list.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Removes `key` from the list, handing its value back to the caller.
    /// Returns `None` if the key was not present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (lower_bound, updates) = self.find_lower_bound_with_updates(key);

        let target = unsafe { (*lower_bound).next_ptr(0) };
        if target.is_null() || unsafe { (*target).key() } != key {
            return None;
        }

        let height = unsafe { (*target).height() };
        for (level, update) in updates.into_iter().enumerate().take(height) {
            unsafe {
                // The trail only links to the target on the levels the target
                // actually reaches.
                if (*update).next_ptr(level) == target {
                    (*update).link_to_next(level, &*target);
                }
            }
        }

        let node = unsafe { Box::from_raw(target) };

        // Keep `level_` tight to the tallest remaining node.
        while self.level_ > 1 && unsafe { (*self.head_).next_ptr(self.level_ - 1) }.is_null() {
            self.level_ -= 1;
        }

        self.length_ -= 1;
        node.into_value()
    }
}

impl<K, V> Default for SkipList<K, V> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LEVEL).expect("the default configuration is valid")
    }
}

impl<K, V> Drop for SkipList<K, V> {
    fn drop(&mut self) {
        self.clear();
        unsafe {
            drop(Box::from_raw(self.head_));
        }
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for SkipList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (printed, (key, value)) in self.iter().enumerate() {
            if printed > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        write!(f, "]")
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for SkipList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, Q, V> ops::Index<&'a Q> for SkipList<K, V>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Output = V;

    fn index(&self, index: &Q) -> &Self::Output {
        self.get(index).expect("no entry found for key")
    }
}

impl<'a, K, Q, V> ops::IndexMut<&'a Q> for SkipList<K, V>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
{
    fn index_mut(&mut self, index: &Q) -> &mut Self::Output {
        self.get_mut(index).expect("no entry found for key")
    }
}

impl<K: Ord, V> Extend<(K, V)> for SkipList<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for SkipList<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = SkipList::default();
        list.extend(iter);
        list
    }
}
