//! Mutable DAG builder over [`Node`]s, with a hard-cycle-detecting Kahn's
//! algorithm topological sort.
//!
//! Cycles are a hard error here (`GraphError::CycleDetected`), unlike the
//! ID-order fallback some live-coding graph engines use to let feedback
//! loops read a one-block-stale value — this engine has no such
//! "previous block" convention, so an unresolved cycle is simply invalid.

use std::collections::{HashMap, VecDeque};

use crate::error::GraphError;
use crate::node::{Node, NodeId};

/// One entry in a [`TopologyQueue`]: a node's position, its direct
/// predecessors in graph order, and its buffer assignment (`None` until the
/// buffer planner runs).
#[derive(Debug, Clone, PartialEq)]
pub struct TopologyQueueNode {
    pub graph_index: NodeId,
    pub inputs: Vec<NodeId>,
    pub buffer_index: Option<usize>,
}

/// A valid topological ordering of a [`Graph`], plus a `graph_index ->
/// queue_index` inverse map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopologyQueue {
    nodes: Vec<TopologyQueueNode>,
    index_of: HashMap<NodeId, usize>,
}

impl TopologyQueue {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[TopologyQueueNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [TopologyQueueNode] {
        &mut self.nodes
    }

    /// Queue position of `graph_index`, if it appears in this ordering.
    pub fn queue_index_of(&self, graph_index: NodeId) -> Option<usize> {
        self.index_of.get(&graph_index).copied()
    }
}

/// Default cap on graph size for the static topological-sort pass; graphs
/// larger than this are unsupported (no dynamic fallback is implemented).
pub const DEFAULT_MAX_STATIC_SIZE: usize = 4096;

/// Mutable builder for a node DAG.
pub struct Graph {
    nodes: Vec<Box<dyn Node>>,
    edges: Vec<(NodeId, NodeId)>,
    max_static_size: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::with_max_static_size(DEFAULT_MAX_STATIC_SIZE)
    }

    pub fn with_max_static_size(max_static_size: usize) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            max_static_size,
        }
    }

    /// Store a concrete node behind a type-erased handle, returning its
    /// opaque index.
    pub fn add_node(&mut self, node: Box<dyn Node>) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Append a directed edge `from -> to`. Self-loops and duplicate edges
    /// are permitted by the builder; both are rejected later, at sort time
    /// (a self-loop can never reach zero in-degree; a duplicate simply
    /// inflates the predecessor count it represents).
    pub fn connect(&mut self, from: NodeId, to: NodeId) -> Result<(), GraphError> {
        if from >= self.nodes.len() {
            return Err(GraphError::InvalidNode(from));
        }
        if to >= self.nodes.len() {
            return Err(GraphError::InvalidNode(to));
        }
        self.edges.push((from, to));
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&dyn Node> {
        self.nodes.get(id).map(|n| n.as_ref())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut (dyn Node + 'static)> {
        self.nodes.get_mut(id).map(|n| n.as_mut())
    }

    /// Kahn's algorithm: compute in-degrees by scanning edges, seed a queue
    /// with every zero-in-degree vertex, and repeatedly pop, emit, and
    /// decrement successors. A bitmap guards against re-visiting a vertex.
    /// Fewer than `node_count` vertices processed means a cycle exists.
    pub fn topological_sort(&self) -> Result<TopologyQueue, GraphError> {
        let n = self.nodes.len();
        if n > self.max_static_size {
            return Err(GraphError::TooManyNodes {
                node_count: n,
                max: self.max_static_size,
            });
        }

        let mut in_degree = vec![0usize; n];
        for &(_, to) in &self.edges {
            in_degree[to] += 1;
        }

        let mut visited = vec![false; n];
        let mut queue: VecDeque<NodeId> = (0..n).filter(|&i| in_degree[i] == 0).collect();
        let mut order = Vec::with_capacity(n);

        while let Some(v) = queue.pop_front() {
            if visited[v] {
                continue;
            }
            visited[v] = true;
            order.push(v);
            for &(from, to) in &self.edges {
                if from == v {
                    in_degree[to] -= 1;
                    if in_degree[to] == 0 && !visited[to] {
                        queue.push_back(to);
                    }
                }
            }
        }

        if order.len() < n {
            return Err(GraphError::CycleDetected);
        }

        let mut predecessors: Vec<Vec<NodeId>> = vec![Vec::new(); n];
        for &(from, to) in &self.edges {
            predecessors[to].push(from);
        }

        let nodes: Vec<TopologyQueueNode> = order
            .iter()
            .map(|&graph_index| TopologyQueueNode {
                graph_index,
                inputs: predecessors[graph_index].clone(),
                buffer_index: None,
            })
            .collect();

        let index_of = nodes
            .iter()
            .enumerate()
            .map(|(qi, node)| (node.graph_index, qi))
            .collect();

        Ok(TopologyQueue { nodes, index_of })
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{PrepareContext, ProcessContext};

    struct MockNode;
    impl Node for MockNode {
        fn prepare(&mut self, _ctx: &PrepareContext) {}
        fn process(&mut self, _ctx: &mut ProcessContext<'_>) {}
    }

    fn graph_with_n_nodes(n: usize) -> Graph {
        let mut graph = Graph::new();
        for _ in 0..n {
            graph.add_node(Box::new(MockNode));
        }
        graph
    }

    #[test]
    fn linear_chain_sorts_in_order() {
        let mut graph = graph_with_n_nodes(4);
        graph.connect(0, 1).unwrap();
        graph.connect(1, 2).unwrap();
        graph.connect(2, 3).unwrap();
        let queue = graph.topological_sort().unwrap();
        let order: Vec<NodeId> = queue.nodes().iter().map(|n| n.graph_index).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn diamond_respects_partial_order() {
        let mut graph = graph_with_n_nodes(4);
        graph.connect(0, 1).unwrap();
        graph.connect(0, 2).unwrap();
        graph.connect(1, 3).unwrap();
        graph.connect(2, 3).unwrap();
        let queue = graph.topological_sort().unwrap();
        let pos = |id: NodeId| queue.queue_index_of(id).unwrap();
        assert!(pos(0) < pos(1));
        assert!(pos(0) < pos(2));
        assert!(pos(1) < pos(3));
        assert!(pos(2) < pos(3));
    }

    #[test]
    fn cycle_is_a_hard_error() {
        let mut graph = graph_with_n_nodes(2);
        graph.connect(0, 1).unwrap();
        graph.connect(1, 0).unwrap();
        assert_eq!(graph.topological_sort(), Err(GraphError::CycleDetected));
    }

    #[test]
    fn connect_rejects_invalid_node() {
        let mut graph = graph_with_n_nodes(1);
        assert_eq!(graph.connect(0, 5), Err(GraphError::InvalidNode(5)));
    }

    #[test]
    fn too_many_nodes_is_rejected() {
        let graph = graph_with_n_nodes(3);
        let graph = Graph {
            max_static_size: 2,
            ..graph
        };
        assert_eq!(
            graph.topological_sort(),
            Err(GraphError::TooManyNodes {
                node_count: 3,
                max: 2
            })
        );
    }
}
