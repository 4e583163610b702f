//! Sorted map and dynamic array containers.
//!
//! The centerpiece is [`SkipList`], a probabilistic sorted map. Conceptually
//! it looks like:
//!
//! ```text
//! <head> ----------> [2] ----------------------------------> [9] ---------->
//! <head> ----------> [2] ----------> [4] ------------------> [9] --> [10] ->
//! <head> --> [1] --> [2] --> [3] --> [4] --> [5] --> [7] --> [9] --> [10] ->
//! ```
//!
//! Every node is assigned a random height on insertion and is linked into
//! that many levels at once. Searches start at the highest active level and
//! drop down whenever the next key overshoots the target, which skips most
//! of the bottom chain and yields expected logarithmic cost without any
//! rebalancing.
//!
//! Heights come from a [`HeightControl`] implementation, so the source of
//! randomness can be swapped out for a deterministic one.
//!
//! [`Vector`] is an unrelated growable array kept in the same crate.

mod error;
mod height_control;
mod iter;
mod node;
mod skiplist;
mod vector;

pub use error::{Error, Result};
pub use height_control::{
    GeometricalGenerator, HeightControl, DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY, MAX_LEVEL_LIMIT,
};
pub use iter::{Iter, Keys, Values};
pub use skiplist::SkipList;
pub use vector::Vector;
