use synspan_core::models::Interval;

use crate::interval_set::{IntervalSet, NodeId};

/// Selects one of the two chains of a [`SyntenyMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The query-genome chain.
    Query,
    /// The target-genome chain.
    Target,
}

/// Two cross-referenced interval chains, one per genome.
///
/// Each link of the map pairs a query-side interval with a target-side
/// interval and a score. Both sides are full [`IntervalSet`]s, so anchor
/// search, overlap expansion, and neighbor traversal work on either chain;
/// the cross-references are stable [`NodeId`]s rather than raw references.
/// Building the links themselves (e.g. from an alignment) is the caller's
/// concern — the map only consumes already-paired intervals.
///
/// Removal is always paired: [`remove`](SyntenyMap::remove) splices a node
/// out of its own chain and its counterpart out of the other chain, leaving
/// both chains internally consistent. A mapped node must never be unlinked
/// from only one side.
///
/// # Examples
///
/// ```
/// use synspan_index::{Interval, Side, SyntenyMap};
///
/// let map = SyntenyMap::build(vec![
///     (Interval::new("chr1", 1, 10), Interval::new("scaf3", 101, 110), 42.0),
///     (Interval::new("chr1", 20, 30), Interval::new("scaf3", 121, 130), 17.5),
/// ]);
///
/// let hit = map.queries().anchor(&Interval::new("chr1", 5, 6)).unwrap();
/// let counterpart = map.counterpart(Side::Query, hit).unwrap();
/// assert_eq!(map.targets().interval(counterpart), &Interval::new("scaf3", 101, 110));
/// assert_eq!(map.score(Side::Query, hit), Some(42.0));
/// ```
#[derive(Debug, Clone)]
pub struct SyntenyMap {
    queries: IntervalSet,
    targets: IntervalSet,
}

impl SyntenyMap {
    /// Build a map from `(query, target, score)` links.
    pub fn build(links: impl IntoIterator<Item = (Interval, Interval, f64)>) -> Self {
        let mut query_ivs = Vec::new();
        let mut target_ivs = Vec::new();
        let mut scores = Vec::new();
        for (query, target, score) in links {
            query_ivs.push(query);
            target_ivs.push(target);
            scores.push(score);
        }

        let mut queries = IntervalSet::build(query_ivs);
        let mut targets = IntervalSet::build(target_ivs);

        // arena ids are assigned in input order, so link i sits at NodeId(i)
        // on both sides
        for (i, score) in scores.into_iter().enumerate() {
            let id = NodeId(i);
            queries.nodes[i].counterpart = Some(id);
            queries.nodes[i].score = Some(score);
            targets.nodes[i].counterpart = Some(id);
            targets.nodes[i].score = Some(score);
        }

        SyntenyMap { queries, targets }
    }

    /// The query-side chain.
    #[inline]
    pub fn queries(&self) -> &IntervalSet {
        &self.queries
    }

    /// The target-side chain.
    #[inline]
    pub fn targets(&self) -> &IntervalSet {
        &self.targets
    }

    fn chain(&self, side: Side) -> &IntervalSet {
        match side {
            Side::Query => &self.queries,
            Side::Target => &self.targets,
        }
    }

    /// Resolve a node's counterpart in the opposite chain.
    #[inline]
    pub fn counterpart(&self, side: Side, id: NodeId) -> Option<NodeId> {
        self.chain(side).counterpart(id)
    }

    /// The score of the link `id` belongs to.
    #[inline]
    pub fn score(&self, side: Side, id: NodeId) -> Option<f64> {
        self.chain(side).score(id)
    }

    /// Remove a mapped pair from both chains.
    ///
    /// Splices the node at `id` out of the `side` chain and its counterpart
    /// out of the opposite chain, then clears both cross-references.
    ///
    /// # Panics
    ///
    /// Panics when `id` carries no counterpart (it is not part of a mapped
    /// pair), or when either splice would remove the tail of its chain (see
    /// [`IntervalSet::remove`]).
    pub fn remove(&mut self, side: Side, id: NodeId) {
        let (own, other) = match side {
            Side::Query => (&mut self.queries, &mut self.targets),
            Side::Target => (&mut self.targets, &mut self.queries),
        };
        let Some(counterpart) = own.counterpart(id) else {
            panic!("node {} is not part of a mapped pair", own.interval(id));
        };
        own.remove(id);
        other.remove(counterpart);
        own.nodes[id.0].counterpart = None;
        other.nodes[counterpart.0].counterpart = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    fn iv(contig: &str, start: i64, stop: i64) -> Interval {
        Interval::new(contig, start, stop)
    }

    #[fixture]
    fn map3() -> SyntenyMap {
        SyntenyMap::build(vec![
            (iv("c1", 1, 10), iv("t1", 101, 110), 0.9),
            (iv("c1", 20, 30), iv("t1", 121, 130), 0.8),
            (iv("c1", 40, 50), iv("t1", 141, 150), 0.7),
        ])
    }

    #[rstest]
    fn test_counterparts_are_symmetric(map3: SyntenyMap) {
        let q = map3.queries().anchor(&iv("c1", 25, 26)).unwrap();
        let t = map3.counterpart(Side::Query, q).unwrap();
        assert_eq!(map3.targets().interval(t), &iv("t1", 121, 130));
        assert_eq!(map3.counterpart(Side::Target, t), Some(q));
        assert_eq!(map3.score(Side::Query, q), Some(0.8));
        assert_eq!(map3.score(Side::Target, t), Some(0.8));
    }

    #[rstest]
    fn test_both_sides_are_queryable(map3: SyntenyMap) {
        let q_hits: Vec<Interval> = map3
            .queries()
            .overlapping(&iv("c1", 10, 20), true)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(q_hits, vec![iv("c1", 1, 10), iv("c1", 20, 30)]);

        let t_hits: Vec<Interval> = map3
            .targets()
            .overlapping(&iv("t1", 125, 126), true)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(t_hits, vec![iv("t1", 121, 130)]);
    }

    #[rstest]
    fn test_remove_splices_both_chains(map3: SyntenyMap) {
        let mut map = map3;
        let q_mid = map.queries().anchor(&iv("c1", 25, 26)).unwrap();
        map.remove(Side::Query, q_mid);

        let q_head = map.queries().anchor(&iv("c1", 1, 10)).unwrap();
        let q_rest: Vec<Interval> = map.queries().following(q_head, 10).cloned().collect();
        assert_eq!(q_rest, vec![iv("c1", 40, 50)]);

        let t_head = map.targets().anchor(&iv("t1", 101, 110)).unwrap();
        let t_rest: Vec<Interval> = map.targets().following(t_head, 10).cloned().collect();
        assert_eq!(t_rest, vec![iv("t1", 141, 150)]);

        assert_eq!(map.counterpart(Side::Query, q_mid), None);
    }

    #[rstest]
    fn test_remove_from_target_side(map3: SyntenyMap) {
        let mut map = map3;
        let t_mid = map.targets().anchor(&iv("t1", 125, 126)).unwrap();
        map.remove(Side::Target, t_mid);

        let q_head = map.queries().anchor(&iv("c1", 1, 10)).unwrap();
        let q_rest: Vec<Interval> = map.queries().following(q_head, 10).cloned().collect();
        assert_eq!(q_rest, vec![iv("c1", 40, 50)]);
    }

    #[rstest]
    #[should_panic(expected = "not part of a mapped pair")]
    fn test_remove_twice_panics() {
        let mut map = SyntenyMap::build(vec![
            (iv("c1", 1, 10), iv("t1", 1, 10), 1.0),
            (iv("c1", 20, 30), iv("t1", 20, 30), 1.0),
        ]);
        let q = map.queries().anchor(&iv("c1", 1, 10)).unwrap();
        map.remove(Side::Query, q);
        map.remove(Side::Query, q);
    }
}
