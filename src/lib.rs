//! # Radix Map
//!
//! A mutable radix tree (also known as a PATRICIA trie) keyed by sequences.
//!
//! Shared key prefixes are stored once, on edges that carry whole key segments
//! rather than single units. The tree splits an edge when a new key diverges in
//! the middle of it and merges redundant branches back together when keys are
//! removed, so its shape depends only on the set of stored keys.
//!
//! ## Features
//!
//! - **Generic keys**: anything implementing [`RadixKey`] (`substr`, `concat`,
//!   `length`) can be a key. `String`, `Box<str>`, `Vec<T>` and `Box<[T]>` are
//!   supported out of the box.
//! - **Pluggable sibling order**: an [`EdgeOrder`] decides iteration order;
//!   [`Natural`] gives lexicographic order.
//! - **Prefix queries**: [`prefix_match`](RadixMap::prefix_match),
//!   [`greedy_match`](RadixMap::greedy_match) and
//!   [`longest_match`](RadixMap::longest_match).
//! - **Cursors**: [`Cursor`] and [`CursorMut`] step through entries in order and
//!   allow removal while walking.
//!
//! ## Example
//!
//! ```rust
//! use radix_map::RadixMap;
//!
//! let mut routes = RadixMap::new();
//! routes.insert("/".to_string(), "root");
//! routes.insert("/static".to_string(), "files");
//! routes.insert("/static/css".to_string(), "styles");
//!
//! // Longest stored prefix of a path
//! let hit = routes.longest_match(&"/static/img/logo.png".to_string());
//! assert_eq!(hit.value(), Some(&"files"));
//!
//! // Everything under a prefix
//! assert_eq!(routes.prefix_match(&"/static".to_string()).count(), 2);
//! ```
//!
//! ## Cargo features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`RadixMap`] as a map.
//! - `tracing`: emits `tracing` events when the tree is restructured.

mod arena;
mod cursor;
mod key;
mod matches;
mod node;
mod order;
#[cfg(feature = "serde")]
mod serde_impl;
mod tree;

// Re-export public types
pub use crate::cursor::{Cursor, CursorMut, Iter, Keys, Values};
pub use crate::key::RadixKey;
pub use crate::matches::Matches;
pub use crate::order::{EdgeOrder, Natural, OrderBy, Reversed};
pub use crate::tree::RadixMap;

/// Structural problems reported by [`RadixMap::check_structure`].
///
/// Depths are the key offset at which the offending node's edge starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The root has a label, a depth, a parent or an entry.
    MalformedRoot,
    /// A non-root branch has no children.
    EmptyBranch { depth: usize },
    /// A non-root branch has a single child that is not a leaf.
    UncompressedChain { depth: usize },
    /// A non-root branch has an empty edge label.
    EmptyLabel { depth: usize },
    /// A leaf has a label or children, or its key differs from its path.
    MisplacedLeaf { depth: usize },
    /// A child is stored under a label different from its own.
    LabelMismatch { depth: usize },
    /// A child's parent link or depth disagrees with its position.
    BrokenLink { depth: usize },
    /// Siblings are not strictly increasing in edge order.
    Unordered { depth: usize },
    /// Two sibling labels start with the same unit.
    OverlappingSiblings { depth: usize },
    /// The recorded size differs from the number of leaves.
    SizeMismatch { expected: usize, found: usize },
    /// Some allocated nodes cannot be reached from the root.
    UnreachableNodes { allocated: usize, reachable: usize },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MalformedRoot => write!(f, "root node is malformed"),
            Error::EmptyBranch { depth } => write!(f, "branch at depth {} has no children", depth),
            Error::UncompressedChain { depth } => {
                write!(f, "branch at depth {} has a single non-leaf child", depth)
            }
            Error::EmptyLabel { depth } => write!(f, "branch at depth {} has an empty label", depth),
            Error::MisplacedLeaf { depth } => write!(f, "leaf at depth {} is misplaced", depth),
            Error::LabelMismatch { depth } => {
                write!(f, "child at depth {} is stored under the wrong label", depth)
            }
            Error::BrokenLink { depth } => {
                write!(f, "child at depth {} has an inconsistent parent or depth", depth)
            }
            Error::Unordered { depth } => write!(f, "siblings at depth {} are out of order", depth),
            Error::OverlappingSiblings { depth } => {
                write!(f, "siblings at depth {} share a first unit", depth)
            }
            Error::SizeMismatch { expected, found } => {
                write!(f, "map records {} entries but holds {}", expected, found)
            }
            Error::UnreachableNodes {
                allocated,
                reachable,
            } => write!(
                f,
                "{} nodes are allocated but only {} are reachable",
                allocated, reachable
            ),
        }
    }
}

impl std::error::Error for Error {}
