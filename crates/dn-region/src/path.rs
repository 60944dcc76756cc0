//! Route calculation: the `PathCalculator` contract, the default Dijkstra
//! implementation, and an LRU-cached wrapper.
//!
//! # Pluggability
//!
//! The simulation layer requests routes through the [`PathCalculator`]
//! trait, so applications can swap in custom implementations (A*,
//! contraction hierarchies, congestion models) without touching the engine.
//!
//! # Determinism
//!
//! For a fixed region and fixed endpoints a calculator must always return
//! the same route.  [`DijkstraPathCalculator`] guarantees this by relaxing
//! each node's incident edges in the region's adjacency order, which is
//! pre-sorted by the edge total order (duration, name, endpoint pair) —
//! equal-cost alternatives therefore resolve to the same winner on every
//! query.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;

use dn_core::{EdgeIndex, NodeIndex};

use crate::Region;

// ── Route ────────────────────────────────────────────────────────────────────

/// The result of a routing query: an ordered list of edges from source to
/// destination and the summed travel time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Edges to traverse in order.
    pub edges: Vec<EdgeIndex>,
    /// Total travel time in ticks.
    pub total_duration: u64,
}

impl Route {
    /// `true` if source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }
}

// ── PathCalculator trait ─────────────────────────────────────────────────────

/// Computes a route between two nodes of the same region, minimizing total
/// duration.
///
/// An unreachable destination is an absent result (`None`), not an error —
/// whether that is acceptable is the caller's call.  `from == to` yields a
/// trivial empty route.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so a calculator can be shared
/// behind an `Arc` alongside its region.
pub trait PathCalculator: Send + Sync {
    fn path(&self, region: &Region, from: NodeIndex, to: NodeIndex) -> Option<Route>;
}

// ── DijkstraPathCalculator ───────────────────────────────────────────────────

/// Standard Dijkstra over the region's CSR adjacency.
///
/// Edge durations are the cost.  The default calculator for the vehicle
/// manager.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraPathCalculator;

impl PathCalculator for DijkstraPathCalculator {
    fn path(&self, region: &Region, from: NodeIndex, to: NodeIndex) -> Option<Route> {
        dijkstra(region, from, to)
    }
}

fn dijkstra(region: &Region, from: NodeIndex, to: NodeIndex) -> Option<Route> {
    if from == to {
        return Some(Route {
            edges: vec![],
            total_duration: 0,
        });
    }

    let n = region.node_count();
    // dist[v] = best known cost (ticks) to reach v.
    let mut dist = vec![u64::MAX; n];
    // prev_edge[v] = edge that reached v; INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeIndex::INVALID; n];

    dist[from.index()] = 0;

    // Min-heap: (cost, node). Reverse makes BinaryHeap (max) behave as
    // min-heap.  Secondary key NodeIndex keeps popping deterministic.
    let mut heap: BinaryHeap<Reverse<(u64, NodeIndex)>> = BinaryHeap::new();
    heap.push(Reverse((0, from)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        if node == to {
            return Some(reconstruct(region, prev_edge, to, cost));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in region.adjacent_edges(node) {
            let neighbor = region.neighbor_across(edge, node);
            let new_cost = cost.saturating_add(region.edge_at(edge).duration());

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((new_cost, neighbor)));
            }
        }
    }

    None
}

fn reconstruct(
    region: &Region,
    prev_edge: Vec<EdgeIndex>,
    to: NodeIndex,
    total_duration: u64,
) -> Route {
    let mut edges = Vec::new();
    let mut cur = to;
    loop {
        let e = prev_edge[cur.index()];
        if e == EdgeIndex::INVALID {
            break;
        }
        edges.push(e);
        cur = region.neighbor_across(e, cur);
    }
    edges.reverse();
    Route {
        edges,
        total_duration,
    }
}

// ── CachedPathCalculator ─────────────────────────────────────────────────────

/// LRU-cached wrapper around any [`PathCalculator`].
///
/// Cache key is the `(from, to)` index pair; negative results (unreachable
/// pairs) are cached too.  Build one wrapper per region — arena indices are
/// only meaningful for the region they came from.
pub struct CachedPathCalculator<P> {
    inner: P,
    cache: Mutex<LruCache<(NodeIndex, NodeIndex), Option<Route>>>,
}

impl<P: PathCalculator> CachedPathCalculator<P> {
    /// Wrap `inner` with a cache of the given capacity (at least 1).
    pub fn new(inner: P, capacity: usize) -> Self {
        Self {
            inner,
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity.max(1)).expect("capacity clamped to >= 1"),
            )),
        }
    }
}

impl<P: PathCalculator> PathCalculator for CachedPathCalculator<P> {
    fn path(&self, region: &Region, from: NodeIndex, to: NodeIndex) -> Option<Route> {
        let key = (from, to);

        if let Ok(mut cache) = self.cache.lock() {
            if let Some(hit) = cache.get(&key) {
                return hit.clone();
            }
        }

        let result = self.inner.path(region, from, to);

        if let Ok(mut cache) = self.cache.lock() {
            cache.put(key, result.clone());
        }

        result
    }
}
