//! Coordinate sets: one same-shape array per dimension.

use smallvec::SmallVec;

use crate::error::GridError;

/// A single point, one value per dimension.
pub type Point = SmallVec<[f64; 4]>;

/// An ordered tuple of same-shape coordinate arrays.
///
/// Arrays are stored flat in row-major order (first axis of `shape`
/// varies slowest). A scattered point cloud has a one-element shape
/// `[N]`; a dense grid has shape `[N_1, ..., N_D]`.
///
/// # Examples
///
/// ```
/// use gridspan_core::Coordinates;
///
/// let coords = Coordinates::from_arrays(vec![vec![0.0, 1.0], vec![5.0, 6.0]]).unwrap();
/// assert_eq!(coords.ndim(), 2);
/// assert_eq!(coords.len(), 2);
/// assert_eq!(coords.point(1).as_slice(), &[1.0, 6.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Coordinates {
    shape: SmallVec<[usize; 4]>,
    arrays: Vec<Vec<f64>>,
}

impl Coordinates {
    /// Build a coordinate set whose arrays all have `shape`.
    ///
    /// Returns `Err(GridError::ShapeMismatch)` if there are no arrays or
    /// any array length differs from the product of `shape`.
    pub fn new(shape: &[usize], arrays: Vec<Vec<f64>>) -> Result<Self, GridError> {
        if arrays.is_empty() {
            return Err(GridError::shape(
                "Invalid coordinates. Must have at least one coordinate array",
            ));
        }
        let expected: usize = shape.iter().product();
        if let Some((dim, bad)) = arrays
            .iter()
            .enumerate()
            .find(|(_, a)| a.len() != expected)
        {
            return Err(GridError::shape(format!(
                "Invalid coordinates. Array {dim} has {} elements but shape {shape:?} \
                 requires {expected}",
                bad.len()
            )));
        }
        Ok(Self {
            shape: SmallVec::from_slice(shape),
            arrays,
        })
    }

    /// Build a flat point cloud from equal-length arrays.
    pub fn from_arrays(arrays: Vec<Vec<f64>>) -> Result<Self, GridError> {
        let n = arrays.first().map(Vec::len).unwrap_or(0);
        if arrays.iter().any(|a| a.len() != n) {
            let lengths: Vec<usize> = arrays.iter().map(Vec::len).collect();
            return Err(GridError::shape(format!(
                "Invalid coordinates. All arrays must have the same length, got {lengths:?}"
            )));
        }
        Self::new(&[n], arrays)
    }

    /// Build a flat point cloud from a list of points.
    pub fn from_points<P: AsRef<[f64]>>(points: &[P]) -> Result<Self, GridError> {
        let ndim = points.first().map(|p| p.as_ref().len()).unwrap_or(0);
        if ndim == 0 {
            return Err(GridError::shape(
                "Invalid coordinates. Points must have at least one dimension",
            ));
        }
        let mut arrays = vec![Vec::with_capacity(points.len()); ndim];
        for (i, p) in points.iter().enumerate() {
            let p = p.as_ref();
            if p.len() != ndim {
                return Err(GridError::shape(format!(
                    "Invalid coordinates. Point {i} has {} dimensions, expected {ndim}",
                    p.len()
                )));
            }
            for (array, &v) in arrays.iter_mut().zip(p) {
                array.push(v);
            }
        }
        Self::from_arrays(arrays)
    }

    /// Number of dimensions (arrays).
    pub fn ndim(&self) -> usize {
        self.arrays.len()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.arrays[0].len()
    }

    /// Whether the set holds no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shape shared by every array.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// The flat array of dimension `dim`.
    ///
    /// # Panics
    ///
    /// Panics if `dim >= self.ndim()`.
    pub fn array(&self, dim: usize) -> &[f64] {
        &self.arrays[dim]
    }

    /// All flat arrays in dimension order.
    pub fn arrays(&self) -> &[Vec<f64>] {
        &self.arrays
    }

    /// Consume the set, returning its arrays.
    pub fn into_arrays(self) -> Vec<Vec<f64>> {
        self.arrays
    }

    /// The point at flat index `index`.
    pub fn point(&self, index: usize) -> Point {
        self.arrays.iter().map(|a| a[index]).collect()
    }

    /// Iterate points in flat order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.len()).map(|i| self.point(i))
    }

    /// Reshape to a flat point cloud (shape `[N]`).
    pub fn ravel(mut self) -> Self {
        let n = self.len();
        self.shape = SmallVec::from_slice(&[n]);
        self
    }

    /// Append a constant-valued array, e.g. a fixed height or time.
    pub fn push_constant(&mut self, value: f64) {
        let n = self.len();
        self.arrays.push(vec![value; n]);
    }
}
