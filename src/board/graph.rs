//! Adjacency graphs for point-and-line boards.
//!
//! A `BoardGraph` is built once, validated, and then only read. Two
//! constructors are provided:
//!
//! - [`BoardGraph::from_lines`]: the board is a set of straight lines; each
//!   consecutive pair is an edge and each consecutive triple is a jump.
//! - [`BoardGraph::from_tables`]: explicit adjacency lists and jump triples,
//!   checked for consistency.
//!
//! Both reject malformed data with a [`BoardError`] instead of producing a
//! graph with undefined neighbours.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::BoardError;

/// Index of a point on the board.
pub type NodeId = usize;

/// A capture jump: from `start`, over `over`, landing on `end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JumpTriple {
    pub start: NodeId,
    pub over: NodeId,
    pub end: NodeId,
}

impl JumpTriple {
    #[must_use]
    pub const fn new(start: NodeId, over: NodeId, end: NodeId) -> Self {
        Self { start, over, end }
    }
}

/// Validated, immutable board graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardGraph {
    adjacency: Vec<SmallVec<[NodeId; 8]>>,
    jumps: Vec<SmallVec<[JumpTriple; 8]>>,
}

impl BoardGraph {
    /// Build a graph from straight lines of points.
    ///
    /// ```
    /// use kreeda::board::BoardGraph;
    ///
    /// // A 3-point line: 0 - 1 - 2
    /// let graph = BoardGraph::from_lines(3, &[&[0, 1, 2]]).unwrap();
    /// assert!(graph.are_adjacent(0, 1));
    /// assert!(graph.jump_between(0, 2).is_some());
    /// assert!(graph.jump_between(2, 0).is_some());
    /// ```
    pub fn from_lines(node_count: usize, lines: &[&[NodeId]]) -> Result<Self, BoardError> {
        let mut adjacency: Vec<Vec<NodeId>> = vec![Vec::new(); node_count];
        let mut jumps = Vec::new();

        for (line_index, line) in lines.iter().enumerate() {
            let unique: FxHashSet<_> = line.iter().collect();
            if line.len() < 2 || unique.len() != line.len() {
                return Err(BoardError::MalformedLine(line_index));
            }
            for &node in line.iter() {
                check_range(node, node_count)?;
            }
            for pair in line.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if !adjacency[a].contains(&b) {
                    adjacency[a].push(b);
                    adjacency[b].push(a);
                }
            }
            for triple in line.windows(3) {
                jumps.push(JumpTriple::new(triple[0], triple[1], triple[2]));
                jumps.push(JumpTriple::new(triple[2], triple[1], triple[0]));
            }
        }

        Self::from_tables(&adjacency, &jumps)
    }

    /// Build a graph from explicit adjacency lists and jump triples.
    ///
    /// `adjacency[n]` lists the neighbours of node `n`; the node count is
    /// `adjacency.len()`.
    pub fn from_tables(
        adjacency: &[Vec<NodeId>],
        jumps: &[JumpTriple],
    ) -> Result<Self, BoardError> {
        let node_count = adjacency.len();

        for (node, neighbors) in adjacency.iter().enumerate() {
            for &other in neighbors {
                check_range(other, node_count)?;
                if other == node {
                    return Err(BoardError::SelfAdjacent(node));
                }
                if !adjacency[other].contains(&node) {
                    return Err(BoardError::AsymmetricAdjacency { from: node, to: other });
                }
            }
        }

        let mut seen = FxHashSet::default();
        let mut jump_table: Vec<SmallVec<[JumpTriple; 8]>> = vec![SmallVec::new(); node_count];
        for &jump in jumps {
            for node in [jump.start, jump.over, jump.end] {
                check_range(node, node_count)?;
            }
            let along_line = jump.start != jump.end
                && adjacency[jump.start].contains(&jump.over)
                && adjacency[jump.over].contains(&jump.end);
            if !along_line {
                return Err(BoardError::JumpNotAlongLine {
                    start: jump.start,
                    over: jump.over,
                    end: jump.end,
                });
            }
            if !seen.insert(jump) {
                return Err(BoardError::DuplicateJump {
                    start: jump.start,
                    over: jump.over,
                    end: jump.end,
                });
            }
            jump_table[jump.start].push(jump);
        }

        if let Some(unreached) = first_unreachable(adjacency) {
            return Err(BoardError::Disconnected(unreached));
        }

        Ok(Self {
            adjacency: adjacency.iter().map(|n| n.iter().copied().collect()).collect(),
            jumps: jump_table,
        })
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        0..self.adjacency.len()
    }

    /// Neighbours of a node; empty for unknown nodes.
    #[must_use]
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        self.adjacency.get(node).map_or(&[], |n| n.as_slice())
    }

    #[must_use]
    pub fn are_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Jumps that start at `node`.
    #[must_use]
    pub fn jumps_from(&self, node: NodeId) -> &[JumpTriple] {
        self.jumps.get(node).map_or(&[], |j| j.as_slice())
    }

    /// The jump from `start` landing on `end`, if the board has one.
    #[must_use]
    pub fn jump_between(&self, start: NodeId, end: NodeId) -> Option<JumpTriple> {
        self.jumps_from(start).iter().copied().find(|j| j.end == end)
    }

    /// Total number of jump triples.
    #[must_use]
    pub fn jump_count(&self) -> usize {
        self.jumps.iter().map(|j| j.len()).sum()
    }
}

fn check_range(node: NodeId, node_count: usize) -> Result<(), BoardError> {
    if node < node_count {
        Ok(())
    } else {
        Err(BoardError::NodeOutOfRange { node, node_count })
    }
}

/// Breadth-first search from node 0; returns the first node it misses.
fn first_unreachable(adjacency: &[Vec<NodeId>]) -> Option<NodeId> {
    if adjacency.is_empty() {
        return None;
    }
    let mut visited = vec![false; adjacency.len()];
    let mut queue = VecDeque::from([0]);
    visited[0] = true;
    while let Some(node) = queue.pop_front() {
        for &next in &adjacency[node] {
            if !visited[next] {
                visited[next] = true;
                queue.push_back(next);
            }
        }
    }
    visited.iter().position(|v| !v)
}
