//! Directed dependency graph with cycle-safe ordering queries.
//!
//! Used two ways by the compiler: ordering function compilation (an edge
//! callee → caller means "callee compiles first") and answering "which
//! functions transitively depend on this one".

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// DFS node coloring for the topological sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Finished,
}

/// A directed graph over comparable identifiers.
///
/// Nodes are kept in insertion order so sort output is deterministic.
#[derive(Debug, Clone)]
pub struct DependencyGraph<T> {
    nodes: Vec<T>,
    edges: HashMap<T, Vec<T>>,
}

impl<T> Default for DependencyGraph<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: HashMap::new(),
        }
    }
}

impl<T> DependencyGraph<T>
where
    T: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains<Q>(&self, node: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.edges.contains_key(node)
    }

    /// Add a node. Adding an existing node is a no-op.
    pub fn add_node(&mut self, node: T) {
        if !self.edges.contains_key(&node) {
            self.nodes.push(node.clone());
            self.edges.insert(node, Vec::new());
        }
    }

    /// Add an edge, inserting both endpoints as needed. Adding an existing
    /// edge is a no-op.
    pub fn add_edge(&mut self, source: T, target: T) {
        self.add_node(source.clone());
        self.add_node(target.clone());

        let targets = self.edges.entry(source).or_default();
        if !targets.contains(&target) {
            targets.push(target);
        }
    }

    /// All nodes reachable from `node`, itself included. Empty when the
    /// node is absent. Safe on cyclic graphs: no node is visited twice.
    pub fn closure<Q>(&self, node: &Q) -> Vec<T>
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let Some((start, _)) = self.edges.get_key_value(node) else {
            return Vec::new();
        };

        let mut visited: HashSet<&T> = HashSet::new();
        let mut stack = vec![start];
        let mut reachable = Vec::new();

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }

            reachable.push(current.clone());

            for next in self.edges.get::<T>(current).expect("node was inserted") {
                if !visited.contains(next) {
                    stack.push(next);
                }
            }
        }

        reachable
    }

    /// Order the nodes so every edge points from an earlier node to a later
    /// one. Returns `None` when the graph is cyclic.
    ///
    /// Depth-first with three colors over an explicit work stack, so deep
    /// dependency chains cannot overflow the call stack. Reaching an
    /// in-progress node proves a cycle; finished nodes accumulate in
    /// post-order and the reversal is a valid topological order.
    pub fn topological_sort(&self) -> Option<Vec<T>> {
        let mut marks: HashMap<&T, Mark> = HashMap::with_capacity(self.nodes.len());
        let mut order = Vec::with_capacity(self.nodes.len());

        for root in &self.nodes {
            if mark_of(&marks, root) != Mark::Unvisited {
                continue;
            }

            // (node, index of the next outgoing edge to follow)
            let mut stack: Vec<(&T, usize)> = vec![(root, 0)];
            marks.insert(root, Mark::InProgress);

            while let Some((node, edge_index)) = stack.pop() {
                let targets = &self.edges[node];

                if edge_index == targets.len() {
                    marks.insert(node, Mark::Finished);
                    order.push(node.clone());
                    continue;
                }

                stack.push((node, edge_index + 1));

                let next = &targets[edge_index];
                match mark_of(&marks, next) {
                    Mark::InProgress => return None,
                    Mark::Finished => {}
                    Mark::Unvisited => {
                        marks.insert(next, Mark::InProgress);
                        stack.push((next, 0));
                    }
                }
            }
        }

        order.reverse();
        Some(order)
    }
}

fn mark_of<T: Eq + Hash>(marks: &HashMap<&T, Mark>, node: &T) -> Mark {
    marks.get(node).copied().unwrap_or(Mark::Unvisited)
}
