//! Contig-grouped interval indexing with logarithmic anchor search.
//!
//! This crate provides data structures for answering interval overlap queries
//! against a genome-scale set of intervals. Intervals are grouped by contig,
//! each group is kept as a coordinate-sorted sequence with a doubly linked
//! chain threaded through it: the sorted sequence drives a bounded binary
//! "anchor" search, the chain drives neighbor expansion and splice-based
//! removal without re-sorting.
//!
//! ## Features
//!
//! - **Anchor search**: locate an interval at or near a query position in
//!   logarithmic time
//! - **Overlap expansion**: enumerate all indexed intervals overlapping a
//!   query by walking the chain outward from the anchor
//! - **Bounded neighbor traversal**: lazy iterators over up to `n` chain
//!   neighbors in either direction
//! - **Synteny maps**: two cross-referenced interval chains with atomic
//!   paired removal
//!
//! ## Quick Start
//!
//! ```rust
//! use synspan_index::{Interval, IntervalSet};
//!
//! let blocks = vec![
//!     Interval::new("chr1", 1, 10),
//!     Interval::new("chr1", 20, 30),
//!     Interval::new("chr1", 40, 50),
//! ];
//! let set = IntervalSet::build(blocks);
//!
//! // closed intervals: a query touching both neighbors hits both
//! let hits = set.overlapping(&Interval::new("chr1", 10, 20), true);
//! assert_eq!(hits.len(), 2);
//! ```
//!
//! ## Limitations
//!
//! Overlap enumeration walks the chain outward from the anchor and stops at
//! the first non-overlapping interval in each direction. The enumeration is
//! exhaustive when the stored intervals are mutually non-overlapping; when
//! stored intervals overlap each other extensively, intervals lying beyond an
//! intervening non-overlapping one can be missed.

pub mod interval_set;
pub mod synteny;

// re-exports
pub use self::interval_set::{ChainIter, IntervalSet, NodeId};
pub use self::synteny::{Side, SyntenyMap};

pub use synspan_core::models::Interval;
