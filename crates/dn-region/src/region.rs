//! Region container and builder.
//!
//! # Data layout
//!
//! A built region is frozen.  Nodes live in a `Vec` sorted by location;
//! the position of a node in that vector is its `NodeIndex` for the
//! region's lifetime.  Edges live in a `Vec` sorted by canonical endpoint
//! pair (`EdgeIndex` likewise), which doubles as the flat ordered edge
//! list.  Hash maps translate locations (the public identity of a node)
//! and canonical endpoint pairs into arena indices.
//!
//! Adjacency uses **Compressed Sparse Row (CSR)** form: the incident edges
//! of node `n` occupy the slice
//!
//! ```text
//! adjacency[ adjacency_start[n] .. adjacency_start[n+1] ]
//! ```
//!
//! Each node's slice is pre-sorted by the edge total order (duration, then
//! name, then endpoint pair), so any traversal that scans incident edges in
//! slice order inherits a deterministic tie-break.

use std::hash::{Hash, Hasher};

use log::debug;
use rustc_hash::FxHashMap;

use dn_core::{DistanceCalculator, EdgeIndex, EuclideanDistance, Location, NodeIndex};

use crate::{Edge, Node, NodeKind, RegionError, RegionResult};

// ── Region ───────────────────────────────────────────────────────────────────

/// A frozen delivery-network graph: all nodes and edges, lookup tables, and
/// the distance strategy used for geometric reasoning.
///
/// Do not construct directly; use [`RegionBuilder`].  Once built, a region
/// is never mutated — all simulation state lives in the occupancy layer.
pub struct Region {
    /// All nodes, sorted by location.  Indexed by `NodeIndex`.
    nodes: Vec<Node>,

    /// All edges, sorted by canonical endpoint pair.  Indexed by `EdgeIndex`.
    edges: Vec<Edge>,

    /// Location → arena index.
    node_lookup: FxHashMap<Location, NodeIndex>,

    /// Canonical `(lesser, greater)` endpoint pair → arena index.
    edge_lookup: FxHashMap<(Location, Location), EdgeIndex>,

    /// CSR row pointer.  Incident edges of node `n` are at
    /// `adjacency[adjacency_start[n] .. adjacency_start[n+1]]`.
    /// Length = `node_count + 1`.
    adjacency_start: Vec<u32>,

    /// Incident-edge indices, grouped per node, each group sorted by the
    /// edge total order.
    adjacency: Vec<EdgeIndex>,

    /// Geometric distance strategy (default: straight-line).
    distance: Box<dyn DistanceCalculator>,
}

impl Region {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Lookup by identity ────────────────────────────────────────────────

    /// The node at `location`, if any.
    pub fn node(&self, location: Location) -> Option<&Node> {
        self.node_lookup.get(&location).map(|&i| &self.nodes[i.index()])
    }

    /// The edge between `a` and `b`, if any.  Symmetric: either argument
    /// order resolves the one canonically stored edge.
    pub fn edge(&self, a: Location, b: Location) -> Option<&Edge> {
        self.edge_index(a, b).map(|i| &self.edges[i.index()])
    }

    /// Arena index of the node at `location`.
    #[inline]
    pub fn node_index(&self, location: Location) -> Option<NodeIndex> {
        self.node_lookup.get(&location).copied()
    }

    /// Arena index of the edge between `a` and `b` (order-insensitive).
    #[inline]
    pub fn edge_index(&self, a: Location, b: Location) -> Option<EdgeIndex> {
        let key = if a <= b { (a, b) } else { (b, a) };
        self.edge_lookup.get(&key).copied()
    }

    // ── Lookup by arena index ─────────────────────────────────────────────

    /// The node at arena position `index`.
    ///
    /// # Panics
    /// Panics if `index` did not come from this region.
    #[inline]
    pub fn node_at(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.index()]
    }

    /// The edge at arena position `index`.
    ///
    /// # Panics
    /// Panics if `index` did not come from this region.
    #[inline]
    pub fn edge_at(&self, index: EdgeIndex) -> &Edge {
        &self.edges[index.index()]
    }

    // ── Read-only views ───────────────────────────────────────────────────

    /// All nodes in arena (location) order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges in arena (canonical pair) order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Restaurants in arena order.
    pub fn restaurants(&self) -> impl Iterator<Item = (NodeIndex, &Node)> + '_ {
        self.nodes_of_kind(NodeKind::Restaurant)
    }

    /// Neighborhoods in arena order.
    pub fn neighborhoods(&self) -> impl Iterator<Item = (NodeIndex, &Node)> + '_ {
        self.nodes_of_kind(NodeKind::Neighborhood)
    }

    fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = (NodeIndex, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, n)| n.kind == kind)
            .map(|(i, n)| (NodeIndex(i as u32), n))
    }

    // ── Adjacency ─────────────────────────────────────────────────────────

    /// Incident edges of `node`, sorted by the edge total order.
    ///
    /// This is a contiguous index range — no heap allocation.
    #[inline]
    pub fn adjacent_edges(&self, node: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        let start = self.adjacency_start[node.index()] as usize;
        let end = self.adjacency_start[node.index() + 1] as usize;
        self.adjacency[start..end].iter().copied()
    }

    /// Nodes directly connected to `node`, in incident-edge order.
    pub fn adjacent_nodes(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.adjacent_edges(node).map(move |e| self.neighbor_across(e, node))
    }

    /// Degree of `node` (number of incident edges).
    #[inline]
    pub fn degree(&self, node: NodeIndex) -> usize {
        let start = self.adjacency_start[node.index()] as usize;
        let end = self.adjacency_start[node.index() + 1] as usize;
        end - start
    }

    /// The endpoint of `edge` that is not `from`.
    ///
    /// # Panics
    /// Panics if `from` is not an endpoint of `edge`.
    pub fn neighbor_across(&self, edge: EdgeIndex, from: NodeIndex) -> NodeIndex {
        let e = &self.edges[edge.index()];
        let from_loc = self.nodes[from.index()].location;
        let other = e
            .other_endpoint(from_loc)
            .unwrap_or_else(|| panic!("{from} is not an endpoint of {e}"));
        self.node_lookup[&other]
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    /// Geometric distance between two locations under the region's
    /// configured strategy.  Never a travel time.
    #[inline]
    pub fn distance(&self, a: Location, b: Location) -> f64 {
        self.distance.distance(a, b)
    }

    pub fn distance_calculator(&self) -> &dyn DistanceCalculator {
        self.distance.as_ref()
    }
}

/// Structural equality: same nodes and same edges.  The distance strategy
/// is a collaborator, not part of the topology, and is excluded.
impl PartialEq for Region {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.edges == other.edges
    }
}

impl Eq for Region {}

impl Hash for Region {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.nodes.hash(state);
        self.edges.hash(state);
    }
}

impl std::fmt::Debug for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Region")
            .field("nodes", &self.nodes)
            .field("edges", &self.edges)
            .finish_non_exhaustive()
    }
}

// ── RegionBuilder ────────────────────────────────────────────────────────────

struct RawEdge {
    name: String,
    a: Location,
    b: Location,
    duration: u64,
}

/// Collects nodes and edges in any order, then freezes them into a
/// [`Region`] with [`build`](Self::build).
///
/// `build()` validates the topology (unknown endpoints, duplicates,
/// self-loops, zero durations are all fatal), canonicalizes every edge's
/// endpoint pair, derives each node's connection set from the edge list,
/// and assembles the CSR adjacency.
///
/// # Example
///
/// ```
/// use dn_core::Location;
/// use dn_region::RegionBuilder;
///
/// let mut b = RegionBuilder::new();
/// b.add_restaurant("Pasta Hut", Location::new(0, 0));
/// b.add_neighborhood("Old Town", Location::new(10, 0));
/// b.add_edge("Main St", Location::new(0, 0), Location::new(10, 0), 5);
/// let region = b.build().unwrap();
/// assert_eq!(region.node_count(), 2);
/// assert_eq!(region.edge_count(), 1);
/// ```
pub struct RegionBuilder {
    nodes: Vec<Node>,
    raw_edges: Vec<RawEdge>,
    distance: Box<dyn DistanceCalculator>,
}

impl RegionBuilder {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            raw_edges: Vec::new(),
            distance: Box::new(EuclideanDistance),
        }
    }

    /// Replace the default straight-line distance strategy.
    pub fn distance_calculator(&mut self, calculator: Box<dyn DistanceCalculator>) -> &mut Self {
        self.distance = calculator;
        self
    }

    /// Add a plain junction node.
    pub fn add_node(&mut self, name: &str, location: Location) -> &mut Self {
        self.push_node(name, location, NodeKind::Generic)
    }

    /// Add a restaurant (vehicle spawn point, order pickup).
    pub fn add_restaurant(&mut self, name: &str, location: Location) -> &mut Self {
        self.push_node(name, location, NodeKind::Restaurant)
    }

    /// Add a neighborhood (delivery destination).
    pub fn add_neighborhood(&mut self, name: &str, location: Location) -> &mut Self {
        self.push_node(name, location, NodeKind::Neighborhood)
    }

    fn push_node(&mut self, name: &str, location: Location, kind: NodeKind) -> &mut Self {
        self.nodes.push(Node {
            name: name.to_owned(),
            location,
            kind,
            connections: Default::default(),
        });
        self
    }

    /// Add an undirected edge.  Endpoints may be given in either order;
    /// they are canonicalized at build time.  `duration` is the travel time
    /// in ticks and must be at least 1.
    pub fn add_edge(&mut self, name: &str, a: Location, b: Location, duration: u64) -> &mut Self {
        self.raw_edges.push(RawEdge {
            name: name.to_owned(),
            a,
            b,
            duration,
        });
        self
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.raw_edges.len()
    }

    /// Consume the builder and produce a frozen [`Region`].
    ///
    /// # Errors
    ///
    /// Any structural violation aborts the build: a duplicate node
    /// location, an edge endpoint that is no node of this region, a
    /// duplicate edge (in either endpoint order), a self-loop, or a zero
    /// duration.
    pub fn build(self) -> RegionResult<Region> {
        // Node arena: sorted by location, positions become NodeIndex.
        let mut nodes = self.nodes;
        nodes.sort_by_key(|n| n.location);

        let mut node_lookup = FxHashMap::default();
        node_lookup.reserve(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if node_lookup.insert(node.location, NodeIndex(i as u32)).is_some() {
                return Err(RegionError::DuplicateNode(node.location));
            }
        }

        // Edge arena: canonicalize endpoint pairs, validate, sort.
        let mut edges = Vec::with_capacity(self.raw_edges.len());
        for raw in self.raw_edges {
            if raw.a == raw.b {
                return Err(RegionError::SelfLoop {
                    name: raw.name,
                    location: raw.a,
                });
            }
            if raw.duration == 0 {
                return Err(RegionError::ZeroDuration { name: raw.name });
            }
            let (a, b) = if raw.a <= raw.b { (raw.a, raw.b) } else { (raw.b, raw.a) };
            for endpoint in [a, b] {
                if !node_lookup.contains_key(&endpoint) {
                    return Err(RegionError::UnknownEndpoint {
                        name: raw.name,
                        location: endpoint,
                    });
                }
            }
            edges.push(Edge {
                name: raw.name,
                location_a: a,
                location_b: b,
                duration: raw.duration,
            });
        }
        edges.sort_by_key(|e| (e.location_a, e.location_b));

        let mut edge_lookup = FxHashMap::default();
        edge_lookup.reserve(edges.len());
        for (i, edge) in edges.iter().enumerate() {
            let key = (edge.location_a, edge.location_b);
            if edge_lookup.insert(key, EdgeIndex(i as u32)).is_some() {
                return Err(RegionError::DuplicateEdge { a: key.0, b: key.1 });
            }
        }

        // Derive connection sets from the validated edge list.
        for edge in &edges {
            let ia = node_lookup[&edge.location_a].index();
            let ib = node_lookup[&edge.location_b].index();
            nodes[ia].connections.insert(edge.location_b);
            nodes[ib].connections.insert(edge.location_a);
        }

        // CSR adjacency: count, prefix-sum, fill, then sort each node's
        // slice by the edge total order for deterministic traversal.
        let node_count = nodes.len();
        let mut adjacency_start = vec![0u32; node_count + 1];
        for edge in &edges {
            adjacency_start[node_lookup[&edge.location_a].index() + 1] += 1;
            adjacency_start[node_lookup[&edge.location_b].index() + 1] += 1;
        }
        for i in 1..=node_count {
            adjacency_start[i] += adjacency_start[i - 1];
        }
        let mut cursor: Vec<u32> = adjacency_start[..node_count].to_vec();
        let mut adjacency = vec![EdgeIndex::INVALID; adjacency_start[node_count] as usize];
        for (i, edge) in edges.iter().enumerate() {
            for endpoint in [edge.location_a, edge.location_b] {
                let n = node_lookup[&endpoint].index();
                adjacency[cursor[n] as usize] = EdgeIndex(i as u32);
                cursor[n] += 1;
            }
        }
        for n in 0..node_count {
            let start = adjacency_start[n] as usize;
            let end = adjacency_start[n + 1] as usize;
            adjacency[start..end].sort_by(|&x, &y| edges[x.index()].cmp(&edges[y.index()]));
        }

        debug!(
            "region built: {} nodes ({} restaurants, {} neighborhoods), {} edges",
            node_count,
            nodes.iter().filter(|n| n.is_restaurant()).count(),
            nodes.iter().filter(|n| n.is_neighborhood()).count(),
            edges.len(),
        );

        Ok(Region {
            nodes,
            edges,
            node_lookup,
            edge_lookup,
            adjacency_start,
            adjacency,
            distance: self.distance,
        })
    }
}

impl Default for RegionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
