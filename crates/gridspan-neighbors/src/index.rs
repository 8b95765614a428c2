//! The nearest-neighbor query seam and its brute-force implementation.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use gridspan_core::Coordinates;

/// One query result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    /// Index of the neighbor in the indexed point set.
    pub index: usize,
    /// Euclidean distance from the query.
    pub distance: f64,
}

/// A spatial index answering k-nearest-neighbor queries over a fixed
/// point set.
pub trait NeighborIndex {
    /// Number of indexed points.
    fn len(&self) -> usize;

    /// Whether the index holds no points.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimension of the indexed points.
    fn ndim(&self) -> usize;

    /// The `k` indexed points nearest to `query`, ascending by distance.
    ///
    /// The point with index `exclude` (if any) is skipped. Fewer than `k`
    /// results are returned only if the index holds too few points.
    fn nearest(&self, query: &[f64], k: usize, exclude: Option<usize>) -> Vec<Neighbor>;
}

/// Squared distance with its point index, ordered by distance.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    dist2: f64,
    index: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist2
            .total_cmp(&other.dist2)
            .then(self.index.cmp(&other.index))
    }
}

/// Bounded max-heap holding the best `k` candidates seen so far.
pub(crate) struct KnnHeap {
    k: usize,
    heap: BinaryHeap<Candidate>,
}

impl KnnHeap {
    pub(crate) fn new(k: usize) -> Self {
        Self {
            k,
            heap: BinaryHeap::with_capacity(k + 1),
        }
    }

    /// Squared distance a new candidate must beat, or infinity while the
    /// heap is not yet full.
    pub(crate) fn worst(&self) -> f64 {
        if self.heap.len() < self.k {
            f64::INFINITY
        } else {
            self.heap.peek().map_or(f64::INFINITY, |c| c.dist2)
        }
    }

    pub(crate) fn offer(&mut self, index: usize, dist2: f64) {
        if self.k == 0 || dist2 >= self.worst() {
            return;
        }
        self.heap.push(Candidate { dist2, index });
        if self.heap.len() > self.k {
            self.heap.pop();
        }
    }

    pub(crate) fn into_neighbors(self) -> Vec<Neighbor> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|c| Neighbor {
                index: c.index,
                distance: c.dist2.sqrt(),
            })
            .collect()
    }
}

#[inline]
pub(crate) fn dist2(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Points stored row-major, one `ndim`-long row per point.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PointRows {
    pub(crate) ndim: usize,
    pub(crate) data: Vec<f64>,
}

impl PointRows {
    pub(crate) fn new(coordinates: &Coordinates) -> Self {
        let ndim = coordinates.ndim();
        let mut data = Vec::with_capacity(ndim * coordinates.len());
        for point in coordinates.points() {
            data.extend_from_slice(&point);
        }
        Self { ndim, data }
    }

    pub(crate) fn len(&self) -> usize {
        if self.ndim == 0 {
            0
        } else {
            self.data.len() / self.ndim
        }
    }

    #[inline]
    pub(crate) fn row(&self, index: usize) -> &[f64] {
        &self.data[index * self.ndim..(index + 1) * self.ndim]
    }
}

/// Exhaustive O(N) per query index.
///
/// # Examples
///
/// ```
/// use gridspan_core::Coordinates;
/// use gridspan_neighbors::{BruteForce, NeighborIndex};
///
/// let coords = Coordinates::from_arrays(vec![vec![0.0, 1.0, 3.0]]).unwrap();
/// let index = BruteForce::new(&coords);
/// let nearest = index.nearest(&[3.0], 1, Some(2));
/// assert_eq!(nearest[0].index, 1);
/// assert_eq!(nearest[0].distance, 2.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BruteForce {
    points: PointRows,
}

impl BruteForce {
    /// Index every point of `coordinates`.
    pub fn new(coordinates: &Coordinates) -> Self {
        Self {
            points: PointRows::new(coordinates),
        }
    }
}

impl NeighborIndex for BruteForce {
    fn len(&self) -> usize {
        self.points.len()
    }

    fn ndim(&self) -> usize {
        self.points.ndim
    }

    fn nearest(&self, query: &[f64], k: usize, exclude: Option<usize>) -> Vec<Neighbor> {
        let mut heap = KnnHeap::new(k);
        for index in (0..self.len()).filter(|&i| Some(i) != exclude) {
            heap.offer(index, dist2(query, self.points.row(index)));
        }
        heap.into_neighbors()
    }
}
