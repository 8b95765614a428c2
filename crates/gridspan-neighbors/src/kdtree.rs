//! A k-d tree over a fixed point set.
//!
//! # Layout
//!
//! Nodes live in one flat `Vec`, children referenced by position. Each
//! internal node splits its points at the median of the dimension with the
//! widest spread; the split value goes to neither side exclusively, so
//! points equal to it may sit on either side. Leaves hold up to
//! `leaf_size` points as a contiguous run of the permutation `order`.

use gridspan_core::{Coordinates, GridError};
use tracing::trace;

use crate::index::{dist2, KnnHeap, Neighbor, NeighborIndex, PointRows};

/// Default maximum number of points per leaf.
pub const DEFAULT_LEAF_SIZE: usize = 16;

#[derive(Clone, Debug, PartialEq)]
enum Node {
    Leaf {
        start: usize,
        end: usize,
    },
    Split {
        dim: usize,
        value: f64,
        left: usize,
        right: usize,
    },
}

/// Median-split k-d tree.
///
/// # Examples
///
/// ```
/// use gridspan_core::Coordinates;
/// use gridspan_neighbors::{KdTree, NeighborIndex};
///
/// let coords = Coordinates::from_arrays(vec![vec![0.0, 1.0, 3.0], vec![0.0, 0.0, 0.0]]).unwrap();
/// let tree = KdTree::new(&coords);
/// let nearest = tree.nearest(&[0.0, 0.0], 1, Some(0));
/// assert_eq!(nearest[0].index, 1);
/// assert_eq!(nearest[0].distance, 1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct KdTree {
    points: PointRows,
    order: Vec<usize>,
    nodes: Vec<Node>,
    leaf_size: usize,
}

impl KdTree {
    /// Build a tree with [`DEFAULT_LEAF_SIZE`].
    pub fn new(coordinates: &Coordinates) -> Self {
        Self::build(coordinates, DEFAULT_LEAF_SIZE)
    }

    /// Build a tree whose leaves hold at most `leaf_size` points.
    ///
    /// Returns `Err(GridError::InvalidArgument)` if `leaf_size` is 0.
    pub fn with_leaf_size(coordinates: &Coordinates, leaf_size: usize) -> Result<Self, GridError> {
        if leaf_size == 0 {
            return Err(GridError::argument(
                "leaf_size",
                "must be at least 1, got 0",
            ));
        }
        Ok(Self::build(coordinates, leaf_size))
    }

    fn build(coordinates: &Coordinates, leaf_size: usize) -> Self {
        let points = PointRows::new(coordinates);
        let mut tree = Self {
            order: (0..points.len()).collect(),
            points,
            nodes: Vec::new(),
            leaf_size,
        };
        let n = tree.order.len();
        tree.build_node(0, n);
        trace!(
            points = n,
            nodes = tree.nodes.len(),
            leaf_size,
            "built k-d tree"
        );
        tree
    }

    /// Number of nodes, leaves included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Build the subtree over `order[start..end]`, returning its node id.
    fn build_node(&mut self, start: usize, end: usize) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node::Leaf { start, end });
        if end - start <= self.leaf_size {
            return id;
        }

        let ndim = self.points.ndim;
        let mut lo = vec![f64::INFINITY; ndim];
        let mut hi = vec![f64::NEG_INFINITY; ndim];
        for &i in &self.order[start..end] {
            for (d, &x) in self.points.row(i).iter().enumerate() {
                lo[d] = lo[d].min(x);
                hi[d] = hi[d].max(x);
            }
        }
        let (dim, spread) = (0..ndim)
            .map(|d| (d, hi[d] - lo[d]))
            .fold((0, f64::NEG_INFINITY), |best, cur| {
                if cur.1 > best.1 {
                    cur
                } else {
                    best
                }
            });
        // Every point coincides: splitting cannot separate them.
        if spread <= 0.0 {
            return id;
        }

        let mid = (end - start) / 2;
        let points = &self.points;
        self.order[start..end].select_nth_unstable_by(mid, |&a, &b| {
            points.row(a)[dim].total_cmp(&points.row(b)[dim])
        });
        let value = self.points.row(self.order[start + mid])[dim];
        let left = self.build_node(start, start + mid);
        let right = self.build_node(start + mid, end);
        self.nodes[id] = Node::Split {
            dim,
            value,
            left,
            right,
        };
        id
    }

    fn search(&self, node: usize, query: &[f64], exclude: Option<usize>, heap: &mut KnnHeap) {
        match self.nodes[node] {
            Node::Leaf { start, end } => {
                for &i in &self.order[start..end] {
                    if Some(i) != exclude {
                        heap.offer(i, dist2(query, self.points.row(i)));
                    }
                }
            }
            Node::Split {
                dim,
                value,
                left,
                right,
            } => {
                let diff = query[dim] - value;
                let (near, far) = if diff < 0.0 { (left, right) } else { (right, left) };
                self.search(near, query, exclude, heap);
                if diff * diff <= heap.worst() {
                    self.search(far, query, exclude, heap);
                }
            }
        }
    }
}

impl NeighborIndex for KdTree {
    fn len(&self) -> usize {
        self.points.len()
    }

    fn ndim(&self) -> usize {
        self.points.ndim
    }

    fn nearest(&self, query: &[f64], k: usize, exclude: Option<usize>) -> Vec<Neighbor> {
        let mut heap = KnnHeap::new(k);
        if k > 0 && !self.nodes.is_empty() {
            self.search(0, query, exclude, &mut heap);
        }
        heap.into_neighbors()
    }
}
