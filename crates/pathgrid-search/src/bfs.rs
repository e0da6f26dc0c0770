use std::collections::VecDeque;

use pathgrid_core::{Grid, Point};

/// Sentinel value meaning "unreachable" in BFS maps.
pub const UNREACHABLE: i32 = i32::MAX;

/// Compute a breadth-first distance map from `source` over free cells,
/// moving in the four orthogonal directions at cost 1.
///
/// The map is indexed like the grid's bounds (row-major); unreached and
/// blocked cells hold [`UNREACHABLE`]. A blocked or outside source yields an
/// all-unreachable map.
pub fn bfs_map(grid: &Grid, source: Point) -> Vec<i32> {
    let bounds = grid.bounds();
    let mut dist = vec![UNREACHABLE; bounds.len()];
    let mut queue: VecDeque<Point> = VecDeque::new();

    if let Some(si) = bounds.index(source).filter(|_| grid.is_passable(source)) {
        dist[si] = 0;
        queue.push_back(source);
    }

    while let Some(cp) = queue.pop_front() {
        let Some(ci) = bounds.index(cp) else {
            continue;
        };
        let nd = dist[ci] + 1;
        for np in cp.neighbors_4() {
            if !grid.is_passable(np) {
                continue;
            }
            let Some(ni) = bounds.index(np) else {
                continue;
            };
            if dist[ni] != UNREACHABLE {
                continue;
            }
            dist[ni] = nd;
            queue.push_back(np);
        }
    }
    dist
}

/// Length in moves of the shortest 4-way path from `from` to `to`, or `None`
/// if `to` cannot be reached.
pub fn bfs_distance(grid: &Grid, from: Point, to: Point) -> Option<i32> {
    let ti = grid.bounds().index(to)?;
    let d = bfs_map(grid, from)[ti];
    (d != UNREACHABLE).then_some(d)
}
