//! The 23-point tigers and goats board.
//!
//! Node 0 is the apex. Four rays fan out from it through three horizontal
//! rows of six points and a bottom row of four; the outer columns of the
//! top three rows form the wings.
//!
//! ```text
//!                 0
//!      1    2   3   4   5    6
//!      7    8   9  10  11   12
//!     13   14  15  16  17   18
//!          19  20  21  22
//! ```

use crate::board::{BoardGraph, NodeId};
use crate::core::BoardError;

pub const NODE_COUNT: usize = 23;

/// Where the tigers stand at the start.
pub const TIGER_START: [NodeId; 3] = [0, 3, 4];

/// Straight lines of the board; every jump runs along one of these.
pub const LINES: &[&[NodeId]] = &[
    // Rays from the apex
    &[0, 2, 8, 14, 19],
    &[0, 3, 9, 15, 20],
    &[0, 4, 10, 16, 21],
    &[0, 5, 11, 17, 22],
    // Wings
    &[1, 7, 13],
    &[6, 12, 18],
    // Rows
    &[1, 2, 3, 4, 5, 6],
    &[7, 8, 9, 10, 11, 12],
    &[13, 14, 15, 16, 17, 18],
    &[19, 20, 21, 22],
];

/// Build and validate the standard board.
pub fn standard_board() -> Result<BoardGraph, BoardError> {
    let graph = BoardGraph::from_lines(NODE_COUNT, LINES)?;
    if graph.node_count() != NODE_COUNT {
        return Err(BoardError::WrongNodeCount {
            expected: NODE_COUNT,
            found: graph.node_count(),
        });
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_board_validates() {
        let graph = standard_board().unwrap();
        assert_eq!(graph.node_count(), NODE_COUNT);
        assert_eq!(graph.neighbors(0), &[2, 3, 4, 5]);
    }

    #[test]
    fn test_apex_jumps() {
        let graph = standard_board().unwrap();
        let ends: Vec<_> = graph.jumps_from(0).iter().map(|j| j.end).collect();
        assert_eq!(ends, vec![8, 9, 10, 11]);
        assert!(graph.jump_between(8, 0).is_some());
    }

    #[test]
    fn test_row_and_ray_crossings() {
        let graph = standard_board().unwrap();
        // 9 sits on the second ray and the middle row
        let mut neighbors = graph.neighbors(9).to_vec();
        neighbors.sort_unstable();
        assert_eq!(neighbors, vec![3, 8, 10, 15]);
        assert_eq!(graph.neighbors(13), &[7, 14]);
        assert!(graph.jump_between(1, 3).is_some());
        assert!(graph.jump_between(13, 1).is_some());
        assert!(graph.jump_between(19, 21).is_some());
        assert!(graph.jump_between(1, 8).is_none());
    }

    #[test]
    fn test_jump_count() {
        let graph = standard_board().unwrap();
        // Each line of n points yields 2 * (n - 2) directed jumps
        let expected: usize = LINES.iter().map(|l| 2 * (l.len() - 2)).sum();
        assert_eq!(graph.jump_count(), expected);
    }
}
