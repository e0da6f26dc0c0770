use std::cmp::Ordering;
use std::collections::BinaryHeap;

use indexmap::{IndexMap, IndexSet};
use pathgrid_core::Point;

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// Handle to a [`Node`] stored in a [`Frontier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A search-time record for a discovered cell.
///
/// Nodes are written once into the frontier's arena and never modified; a
/// cheaper route to an open cell is a new node that supersedes the old one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub pos: Point,
    /// Accumulated cost from the start.
    pub g: i32,
    /// Heuristic estimate to the target.
    pub h: f64,
    /// Priority, `g + h`.
    pub f: f64,
    /// Predecessor on the best route found so far; `None` for the start.
    pub parent: Option<NodeId>,
}

impl Node {
    pub fn new(pos: Point, g: i32, h: f64, parent: Option<NodeId>) -> Self {
        Self {
            pos,
            g,
            h,
            f: f64::from(g) + h,
            parent,
        }
    }
}

/// What [`Frontier::push_or_update`] did with a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Push {
    /// The coordinate was new and is now open.
    Inserted,
    /// The node replaced a costlier open node for the same coordinate.
    Replaced,
    /// Nothing changed: the coordinate is closed, or already open with an
    /// equal or cheaper `g`.
    Ignored,
}

// ---------------------------------------------------------------------------
// Heap entries
// ---------------------------------------------------------------------------

/// Heap entry, ordered so that `BinaryHeap` (a max-heap) pops the smallest
/// `f` first, then the smallest `h`, then the earliest discovered cell.
#[derive(Clone, Copy)]
struct OpenEntry {
    id: NodeId,
    f: f64,
    h: f64,
    seq: u64,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.h.total_cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

/// The live open node for a coordinate, and when the coordinate was first
/// discovered.
#[derive(Clone, Copy)]
struct OpenSlot {
    id: NodeId,
    seq: u64,
}

// ---------------------------------------------------------------------------
// Frontier
// ---------------------------------------------------------------------------

/// Open list and closed set of one A* search.
///
/// The open list is a binary heap with lazy deletion: superseded entries stay
/// in the heap and are skipped when popped. The coordinate index makes
/// membership checks O(1) and guarantees at most one live node per cell.
#[derive(Default)]
pub struct Frontier {
    nodes: Vec<Node>,
    heap: BinaryHeap<OpenEntry>,
    open: IndexMap<Point, OpenSlot>,
    closed: IndexSet<Point>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `node`, or improve the open node for the same cell.
    ///
    /// Closed cells are never reopened, and an open node is only replaced by
    /// one with a strictly smaller `g`.
    pub fn push_or_update(&mut self, node: Node) -> Push {
        if self.closed.contains(&node.pos) {
            return Push::Ignored;
        }
        let (seq, push) = match self.open.get(&node.pos) {
            Some(slot) if node.g >= self.nodes[slot.id.0].g => return Push::Ignored,
            Some(slot) => (slot.seq, Push::Replaced),
            None => {
                let seq = self.next_seq;
                self.next_seq += 1;
                (seq, Push::Inserted)
            }
        };

        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.open.insert(node.pos, OpenSlot { id, seq });
        self.heap.push(OpenEntry {
            id,
            f: node.f,
            h: node.h,
            seq,
        });
        push
    }

    /// Remove and return the best open node.
    pub fn pop_best(&mut self) -> Option<NodeId> {
        while let Some(entry) = self.heap.pop() {
            let pos = self.nodes[entry.id.0].pos;
            // Skip stale entries.
            match self.open.get(&pos) {
                Some(slot) if slot.id == entry.id => {
                    self.open.swap_remove(&pos);
                    return Some(entry.id);
                }
                _ => continue,
            }
        }
        None
    }

    /// Finalize `pos`. Closing a cell twice has no further effect.
    pub fn mark_closed(&mut self, pos: Point) {
        self.closed.insert(pos);
    }

    #[inline]
    pub fn is_closed(&self, pos: Point) -> bool {
        self.closed.contains(&pos)
    }

    #[inline]
    pub fn is_open(&self, pos: Point) -> bool {
        self.open.contains_key(&pos)
    }

    /// Whether no open node remains.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    #[inline]
    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    #[inline]
    pub fn closed_len(&self) -> usize {
        self.closed.len()
    }

    /// Coordinates currently in the open list.
    pub fn open_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.open.keys().copied()
    }

    /// Coordinates in the closed set, in the order they were closed.
    pub fn closed_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.closed.iter().copied()
    }

    /// The node behind `id`.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// The live open node for `pos`, if any.
    pub fn open_node(&self, pos: Point) -> Option<&Node> {
        self.open.get(&pos).map(|slot| &self.nodes[slot.id.0])
    }

    /// Follow parent links from `id` back to the root and return the cells
    /// in root-to-`id` order.
    pub fn path_to(&self, id: NodeId) -> Vec<Point> {
        let mut path = Vec::new();
        let mut cur = Some(id);
        while let Some(ci) = cur {
            let node = &self.nodes[ci.0];
            path.push(node.pos);
            cur = node.parent;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn pops_lowest_f_first() {
        let mut fr = Frontier::new();
        fr.push_or_update(Node::new(p(0, 0), 3, 1.0, None));
        fr.push_or_update(Node::new(p(1, 0), 1, 1.0, None));
        fr.push_or_update(Node::new(p(2, 0), 2, 1.0, None));

        let mut order = Vec::new();
        while let Some(id) = fr.pop_best() {
            order.push(fr.node(id).pos);
        }
        assert_eq!(order, vec![p(1, 0), p(2, 0), p(0, 0)]);
        assert!(fr.is_empty());
    }

    #[test]
    fn ties_prefer_smaller_h_then_discovery_order() {
        let mut fr = Frontier::new();
        // All f = 4.
        fr.push_or_update(Node::new(p(0, 0), 1, 3.0, None));
        fr.push_or_update(Node::new(p(1, 0), 2, 2.0, None));
        fr.push_or_update(Node::new(p(2, 0), 2, 2.0, None));
        fr.push_or_update(Node::new(p(3, 0), 3, 1.0, None));

        let first = fr.pop_best().unwrap();
        assert_eq!(fr.node(first).pos, p(3, 0));
        let second = fr.pop_best().unwrap();
        assert_eq!(fr.node(second).pos, p(1, 0));
        let third = fr.pop_best().unwrap();
        assert_eq!(fr.node(third).pos, p(2, 0));
        let fourth = fr.pop_best().unwrap();
        assert_eq!(fr.node(fourth).pos, p(0, 0));
    }

    #[test]
    fn replacement_requires_strictly_smaller_g() {
        let mut fr = Frontier::new();
        assert_eq!(
            fr.push_or_update(Node::new(p(1, 1), 5, 2.0, None)),
            Push::Inserted
        );
        assert_eq!(
            fr.push_or_update(Node::new(p(1, 1), 5, 0.0, None)),
            Push::Ignored
        );
        assert_eq!(
            fr.push_or_update(Node::new(p(1, 1), 7, 2.0, None)),
            Push::Ignored
        );
        assert_eq!(
            fr.push_or_update(Node::new(p(1, 1), 3, 2.0, None)),
            Push::Replaced
        );
        assert_eq!(fr.open_len(), 1);
        assert_eq!(fr.open_node(p(1, 1)).map(|n| n.g), Some(3));

        // Only the live node comes out; the superseded entry is skipped.
        let id = fr.pop_best().unwrap();
        assert_eq!(fr.node(id).g, 3);
        assert_eq!(fr.pop_best(), None);
    }

    #[test]
    fn replaced_node_keeps_discovery_rank() {
        let mut fr = Frontier::new();
        fr.push_or_update(Node::new(p(0, 0), 4, 2.0, None));
        fr.push_or_update(Node::new(p(1, 0), 2, 2.0, None));
        // Improve (0, 0) to the same f and h as (1, 0); it was discovered first.
        fr.push_or_update(Node::new(p(0, 0), 2, 2.0, None));
        let id = fr.pop_best().unwrap();
        assert_eq!(fr.node(id).pos, p(0, 0));
    }

    #[test]
    fn closed_cells_are_never_reopened() {
        let mut fr = Frontier::new();
        fr.mark_closed(p(2, 2));
        fr.mark_closed(p(2, 2));
        assert_eq!(fr.closed_len(), 1);
        assert!(fr.is_closed(p(2, 2)));
        assert_eq!(
            fr.push_or_update(Node::new(p(2, 2), 0, 0.0, None)),
            Push::Ignored
        );
        assert!(fr.is_empty());
        assert!(!fr.is_open(p(2, 2)));
    }

    #[test]
    fn path_follows_parents() {
        let mut fr = Frontier::new();
        fr.push_or_update(Node::new(p(0, 0), 0, 2.0, None));
        let a = fr.pop_best().unwrap();
        fr.mark_closed(p(0, 0));
        fr.push_or_update(Node::new(p(1, 0), 1, 1.0, Some(a)));
        let b = fr.pop_best().unwrap();
        fr.mark_closed(p(1, 0));
        fr.push_or_update(Node::new(p(1, 1), 2, 0.0, Some(b)));
        let c = fr.pop_best().unwrap();

        assert_eq!(fr.path_to(c), vec![p(0, 0), p(1, 0), p(1, 1)]);
        assert_eq!(fr.path_to(a), vec![p(0, 0)]);
        let closed: Vec<Point> = fr.closed_points().collect();
        assert_eq!(closed, vec![p(0, 0), p(1, 0)]);
    }
}
