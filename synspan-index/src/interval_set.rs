use std::collections::HashMap;

use synspan_core::models::Interval;

/// Stable identifier of a node in an [`IntervalSet`] arena.
///
/// Identifiers are assigned in input order at build time and stay valid for
/// the lifetime of the set; chain links and synteny cross-references are
/// expressed in terms of them rather than raw references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// One indexed interval plus its optional attachments.
///
/// A single node type covers every interval variant: a plain indexed interval
/// carries no links, a chained interval has `prev`/`next` threaded through its
/// contig, and a mapped interval additionally carries a `counterpart` in a
/// second chain and a link `score`.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) interval: Interval,
    pub(crate) prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
    pub(crate) counterpart: Option<NodeId>,
    pub(crate) score: Option<f64>,
}

/// A contig-grouped index over a set of intervals.
///
/// The set owns all nodes in an arena and keeps, per contig, a sequence of
/// node ids sorted ascending by `(start, stop)`. A doubly linked chain is
/// threaded through each sorted sequence; the two representations always
/// mirror each other. The sorted sequence enables the logarithmic
/// [`anchor`](IntervalSet::anchor) search, the chain enables neighbor
/// expansion and [`remove`](IntervalSet::remove) without re-sorting.
///
/// # Examples
///
/// ```
/// use synspan_index::{Interval, IntervalSet};
///
/// let set = IntervalSet::build(vec![
///     Interval::new("chr1", 100, 200),
///     Interval::new("chr2", 100, 200),
///     Interval::new("chr1", 500, 600),
/// ]);
///
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.contig_names(), vec!["chr1", "chr2"]);
///
/// let anchor = set.anchor(&Interval::new("chr1", 150, 160)).unwrap();
/// assert_eq!(set.interval(anchor), &Interval::new("chr1", 100, 200));
/// ```
#[derive(Debug, Clone)]
pub struct IntervalSet {
    pub(crate) nodes: Vec<Node>,
    contigs: HashMap<String, Vec<NodeId>>,
}

impl IntervalSet {
    /// Build an index from an unordered collection of intervals.
    ///
    /// Arena ids are assigned in input order, then ids are partitioned by
    /// contig, each partition sorted by `(start, stop)`, and the chain links
    /// threaded through the sorted order. Duplicate and mutually overlapping
    /// intervals stay as distinct entries at their sort position; ties carry
    /// no guaranteed relative order.
    pub fn build(intervals: impl IntoIterator<Item = Interval>) -> Self {
        let mut nodes: Vec<Node> = intervals
            .into_iter()
            .map(|interval| Node {
                interval,
                prev: None,
                next: None,
                counterpart: None,
                score: None,
            })
            .collect();

        let mut contigs: HashMap<String, Vec<NodeId>> = HashMap::new();
        for (idx, node) in nodes.iter().enumerate() {
            contigs
                .entry(node.interval.contig.clone())
                .or_default()
                .push(NodeId(idx));
        }

        for ids in contigs.values_mut() {
            ids.sort_by_key(|id| (nodes[id.0].interval.start, nodes[id.0].interval.stop));
            for pair in ids.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                nodes[a.0].next = Some(b);
                nodes[b.0].prev = Some(a);
            }
        }

        IntervalSet { nodes, contigs }
    }

    /// Number of intervals in the set, across all contigs.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The interval stored at `id`.
    #[inline]
    pub fn interval(&self, id: NodeId) -> &Interval {
        &self.nodes[id.0].interval
    }

    /// The chain neighbor immediately before `id`, if any.
    #[inline]
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].prev
    }

    /// The chain neighbor immediately after `id`, if any.
    #[inline]
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].next
    }

    /// Cross-reference into a paired chain, set when this set is one side of
    /// a [`SyntenyMap`](crate::SyntenyMap).
    #[inline]
    pub fn counterpart(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].counterpart
    }

    /// Score of the mapping link this node belongs to, if any.
    #[inline]
    pub fn score(&self, id: NodeId) -> Option<f64> {
        self.nodes[id.0].score
    }

    /// Indexed contig names, sorted.
    pub fn contig_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.contigs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Iterate over every interval, contigs in name order, intervals in
    /// coordinate order within each contig.
    pub fn iter(&self) -> IterIntervals<'_> {
        let mut names: Vec<&String> = self.contigs.keys().collect();
        names.sort();
        let order = names
            .iter()
            .flat_map(|name| self.contigs[*name].iter().copied())
            .collect();
        IterIntervals {
            set: self,
            order,
            pos: 0,
        }
    }

    /// Locate an interval at or near the query in logarithmic time.
    ///
    /// Returns `None` when the query's contig is not indexed. A contig with a
    /// single interval returns that interval directly. Otherwise a bounded
    /// binary search over the sorted partition runs for at most
    /// `max(ceil(log2(high - low)) + 1, 2)` steps, returning as soon as a
    /// candidate overlaps the query. When the step budget runs out the last
    /// candidate examined is returned; it is positionally close to the query
    /// but not guaranteed to overlap it, so callers must re-check overlap
    /// before trusting it.
    ///
    /// ```
    /// use synspan_index::{Interval, IntervalSet};
    ///
    /// let set = IntervalSet::build(vec![
    ///     Interval::new("chr1", 1, 10),
    ///     Interval::new("chr1", 20, 30),
    /// ]);
    /// let hit = set.anchor(&Interval::new("chr1", 25, 26)).unwrap();
    /// assert_eq!(set.interval(hit), &Interval::new("chr1", 20, 30));
    /// assert!(set.anchor(&Interval::new("chrX", 25, 26)).is_none());
    /// ```
    pub fn anchor(&self, query: &Interval) -> Option<NodeId> {
        let con = self.contigs.get(&query.contig)?;
        if con.len() == 1 {
            return Some(con[0]);
        }

        let (mut low, mut high) = (0usize, con.len() - 1);
        let mut i = high / 2;
        // enough iterations to let the halving below converge, floor of 2
        // to cover tiny ranges
        let mut steps = ((high - low).next_power_of_two().trailing_zeros() as usize + 1).max(2);

        let mut candidate = con[i];
        loop {
            let this = self.interval(candidate);
            if query.stop < this.start {
                high = i;
                i = high - (high - low).div_ceil(2);
            } else if query.start > this.stop {
                low = i;
                i = low + (high - low).div_ceil(2);
            } else {
                return Some(candidate);
            }
            steps -= 1;
            if steps == 0 {
                break;
            }
            candidate = con[i];
        }
        // budget exhausted: merely positionally close, callers re-check
        Some(candidate)
    }

    /// All indexed intervals overlapping the query, sorted by `(start, stop)`
    /// when `sort` is set, in anchor-outward walk order otherwise.
    ///
    /// Starts from [`anchor`](IntervalSet::anchor) and walks the chain in
    /// both directions, stopping at the first non-overlapping interval on
    /// each side. Returns an empty vector when the contig is unknown or the
    /// anchor does not overlap the query. See the crate-level notes on
    /// exhaustiveness when stored intervals overlap each other.
    pub fn overlapping(&self, query: &Interval, sort: bool) -> Vec<&Interval> {
        let Some(anchor) = self.anchor(query) else {
            return Vec::new();
        };
        if !self.interval(anchor).overlaps(query) {
            return Vec::new();
        }

        let mut hits = vec![anchor];
        let mut cursor = self.nodes[anchor.0].prev;
        while let Some(id) = cursor {
            if !self.interval(id).overlaps(query) {
                break;
            }
            hits.push(id);
            cursor = self.nodes[id.0].prev;
        }
        let mut cursor = self.nodes[anchor.0].next;
        while let Some(id) = cursor {
            if !self.interval(id).overlaps(query) {
                break;
            }
            hits.push(id);
            cursor = self.nodes[id.0].next;
        }

        if sort {
            hits.sort_by_key(|id| (self.interval(*id).start, self.interval(*id).stop));
        }
        hits.into_iter().map(|id| self.interval(id)).collect()
    }

    /// Up to `n` chain neighbors before `id`, nearest first, excluding `id`
    /// itself. Ends early, without error, at the head of the chain.
    ///
    /// ```
    /// use synspan_index::{Interval, IntervalSet};
    ///
    /// let set = IntervalSet::build(vec![
    ///     Interval::new("chr1", 1, 5),
    ///     Interval::new("chr1", 10, 15),
    ///     Interval::new("chr1", 20, 25),
    /// ]);
    /// let anchor = set.anchor(&Interval::new("chr1", 12, 13)).unwrap();
    /// let before: Vec<_> = set.preceding(anchor, 5).cloned().collect();
    /// assert_eq!(before, vec![Interval::new("chr1", 1, 5)]);
    /// ```
    pub fn preceding(&self, id: NodeId, n: usize) -> ChainIter<'_> {
        ChainIter {
            set: self,
            cursor: self.nodes[id.0].prev,
            remaining: n,
            direction: Direction::Preceding,
        }
    }

    /// Up to `n` chain neighbors after `id`, nearest first, excluding `id`
    /// itself. Ends early, without error, at the tail of the chain.
    pub fn following(&self, id: NodeId, n: usize) -> ChainIter<'_> {
        ChainIter {
            set: self,
            cursor: self.nodes[id.0].next,
            remaining: n,
            direction: Direction::Following,
        }
    }

    /// Splice a node out of its contig chain.
    ///
    /// The preceding neighbor, when present, is rewired to the following
    /// neighbor, and the following neighbor back to the preceding one; the
    /// node's own links are cleared. The interval stays in the sorted index,
    /// so [`anchor`](IntervalSet::anchor) may still return it; only chain
    /// traversal skips it.
    ///
    /// # Panics
    ///
    /// Panics when `id` is the tail of its chain. The splice contract
    /// requires a following neighbor; rather than leave the chain in a
    /// half-rewired state, tail removal fails fast.
    pub fn remove(&mut self, id: NodeId) {
        let (prev, next) = (self.nodes[id.0].prev, self.nodes[id.0].next);
        let Some(next) = next else {
            panic!(
                "cannot splice out the tail of a chain: {}",
                self.interval(id)
            );
        };
        if let Some(prev) = prev {
            self.nodes[prev.0].next = Some(next);
        }
        self.nodes[next.0].prev = prev;
        self.nodes[id.0].prev = None;
        self.nodes[id.0].next = None;
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Preceding,
    Following,
}

/// A bounded lazy walk along one contig chain, created by
/// [`preceding`](IntervalSet::preceding) or
/// [`following`](IntervalSet::following).
pub struct ChainIter<'a> {
    set: &'a IntervalSet,
    cursor: Option<NodeId>,
    remaining: usize,
    direction: Direction,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = &'a Interval;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.cursor?;
        self.remaining -= 1;
        self.cursor = match self.direction {
            Direction::Preceding => self.set.nodes[id.0].prev,
            Direction::Following => self.set.nodes[id.0].next,
        };
        Some(&self.set.nodes[id.0].interval)
    }
}

/// An iterator over every interval in an [`IntervalSet`], created by
/// [`iter`](IntervalSet::iter).
pub struct IterIntervals<'a> {
    set: &'a IntervalSet,
    order: Vec<NodeId>,
    pos: usize,
}

impl<'a> Iterator for IterIntervals<'a> {
    type Item = &'a Interval;

    fn next(&mut self) -> Option<Self::Item> {
        let id = *self.order.get(self.pos)?;
        self.pos += 1;
        Some(&self.set.nodes[id.0].interval)
    }
}
