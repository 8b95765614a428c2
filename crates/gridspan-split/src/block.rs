//! Regular block partitioning.

use gridspan_coords::{mesh, reconcile, LineSpec};
use gridspan_core::{Adjust, Coordinates, GridError, Region, Step};
use tracing::{debug, trace};

use crate::options::BlockOptions;

/// The result of [`block_split`].
#[derive(Clone, Debug, PartialEq)]
pub struct BlockSplit {
    /// Block centres, shaped like the block grid.
    pub centers: Coordinates,
    /// Number of blocks per dimension.
    pub shape: Vec<usize>,
    /// Flat (row-major) block label of every input point.
    pub labels: Vec<usize>,
    /// Block edge length per dimension.
    pub spacing: Vec<f64>,
    /// Region covered by the blocks (grown under [`Adjust::Region`]).
    pub region: Region,
}

impl BlockSplit {
    /// Total number of blocks.
    pub fn nblocks(&self) -> usize {
        self.shape.iter().product()
    }

    /// Indices of the input points in each block, by label.
    pub fn members(&self) -> Vec<Vec<usize>> {
        let mut members = vec![Vec::new(); self.nblocks()];
        for (index, &label) in self.labels.iter().enumerate() {
            members[label].push(index);
        }
        members
    }

    /// Bounds of the block with flat label `label`.
    ///
    /// Returns `None` if `label` is out of range.
    pub fn block_region(&self, label: usize) -> Option<Region> {
        if label >= self.nblocks() {
            return None;
        }
        let mut bounds = Vec::with_capacity(2 * self.shape.len());
        let mut rest = label;
        let mut index = vec![0; self.shape.len()];
        for (k, &n) in self.shape.iter().enumerate().rev() {
            index[k] = rest % n;
            rest /= n;
        }
        for ((k, (lo, _)), spacing) in self.region.pairs().enumerate().zip(&self.spacing) {
            bounds.push(lo + index[k] as f64 * spacing);
            bounds.push(lo + (index[k] + 1) as f64 * spacing);
        }
        Region::new(bounds).ok()
    }
}

fn block_lines(region: &Region, options: &BlockOptions) -> Result<Vec<LineSpec>, GridError> {
    options.validate()?;
    let ndim = region.ndim();
    let steps: Vec<(Step, Adjust)> = match (&options.shape, &options.size) {
        (Some(shape), None) => shape
            .resolve(ndim, "shape")?
            .into_iter()
            .map(|n| {
                if n == 0 {
                    return Err(GridError::argument(
                        "shape",
                        "Invalid block shape. Must have at least one block per dimension",
                    ));
                }
                Ok((Step::Size(n + 1), Adjust::Spacing))
            })
            .collect::<Result<_, _>>()?,
        (None, Some(size)) => size
            .resolve(ndim, "size")?
            .into_iter()
            .map(|s| (Step::Spacing(s), options.adjust))
            .collect(),
        _ => unreachable!("validated above"),
    };
    region
        .pairs()
        .zip(steps)
        .map(|((lo, hi), (step, adjust))| {
            if lo == hi {
                step.validate()?;
                // A flat dimension holds one block centred on its only value.
                return Ok(LineSpec {
                    start: lo,
                    stop: hi,
                    size: 2,
                    spacing: 0.0,
                });
            }
            reconcile(lo, hi, step, adjust)
        })
        .collect()
}

/// Label each point with the regular block that contains it.
///
/// The blocks tile `options.region` (or the data's bounding region) with
/// either `options.shape` blocks per dimension or blocks of edge length
/// `options.size`, reconciled like a pixel-registered grid. Along each
/// dimension a point falls in block `floor((x - min) / spacing)`, clamped
/// to the valid range, so points on the upper boundary (or outside an
/// explicit region) land in the nearest edge block. Per-dimension indices
/// are flattened row-major with the first dimension varying slowest.
///
/// A dimension where the region has zero width (collinear points, a
/// single point, or an explicit flat region) always holds exactly one
/// block, centred on that value, whatever shape or size is requested.
///
/// # Errors
///
/// - `InvalidArgument` for invalid options.
/// - `InsufficientPoints` if no region is given and there are no points.
/// - `ShapeMismatch` if the region and coordinates differ in dimension.
///
/// # Examples
///
/// ```
/// use gridspan_core::Coordinates;
/// use gridspan_split::{block_split, BlockOptions};
///
/// let coords = Coordinates::from_arrays(vec![vec![0.0, 1.0, 3.9, 4.0], vec![0.0, 3.0, 0.5, 4.0]]).unwrap();
/// let split = block_split(&coords, &BlockOptions::default().size(2.0)).unwrap();
/// assert_eq!(split.shape, vec![2, 2]);
/// assert_eq!(split.labels, vec![0, 1, 2, 3]);
/// assert_eq!(split.centers.array(0), &[1.0, 1.0, 3.0, 3.0]);
/// ```
pub fn block_split(
    coordinates: &Coordinates,
    options: &BlockOptions,
) -> Result<BlockSplit, GridError> {
    let region = match &options.region {
        Some(region) => region.clone(),
        None => Region::from_coordinates(coordinates)?,
    };
    if region.ndim() != coordinates.ndim() {
        return Err(GridError::shape(format!(
            "Region {region} has {} dimensions but the coordinates have {}",
            region.ndim(),
            coordinates.ndim()
        )));
    }
    let lines = block_lines(&region, options)?;

    let shape: Vec<usize> = lines.iter().map(LineSpec::intervals).collect();
    let mut labels = vec![0usize; coordinates.len()];
    let mut stride = 1usize;
    for (dim, line) in lines.iter().enumerate().rev() {
        let last = (line.intervals() - 1) as f64;
        for (label, &x) in labels.iter_mut().zip(coordinates.array(dim)) {
            let index = if line.spacing > 0.0 {
                ((x - line.start) / line.spacing).floor().clamp(0.0, last)
            } else {
                0.0
            };
            *label += index as usize * stride;
        }
        trace!(dim, blocks = line.intervals(), spacing = line.spacing, "block axis");
        stride *= line.intervals();
    }

    let axes: Vec<Vec<f64>> = lines.iter().map(|line| line.values(true)).collect();
    let centers = mesh(&axes)?;
    let region = Region::new(lines.iter().flat_map(|s| [s.start, s.stop]).collect::<Vec<_>>())?;
    debug!(
        points = coordinates.len(),
        ?shape,
        %region,
        "split points into blocks"
    );
    Ok(BlockSplit {
        centers,
        shape,
        labels,
        spacing: lines.iter().map(|s| s.spacing).collect(),
        region,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridspan_test_utils::{assert_close, lattice};

    fn coords(x: &[f64], y: &[f64]) -> Coordinates {
        Coordinates::from_arrays(vec![x.to_vec(), y.to_vec()]).unwrap()
    }

    #[test]
    fn labels_are_row_major() {
        // 3 blocks along x, 2 along y: label = ix * 2 + iy.
        let c = coords(&[0.5, 0.5, 1.5, 2.5, 2.5], &[0.5, 1.5, 0.5, 0.5, 1.5]);
        let opts = BlockOptions::default()
            .shape([3, 2])
            .region(Region::new([0.0, 3.0, 0.0, 2.0]).unwrap());
        let split = block_split(&c, &opts).unwrap();
        assert_eq!(split.shape, vec![3, 2]);
        assert_eq!(split.labels, vec![0, 1, 2, 4, 5]);
        assert_close(split.centers.array(0), &[0.5, 0.5, 1.5, 1.5, 2.5, 2.5], 1e-12);
        assert_close(split.centers.array(1), &[0.5, 1.5, 0.5, 1.5, 0.5, 1.5], 1e-12);
    }

    #[test]
    fn upper_boundary_goes_to_last_block() {
        let c = coords(&[0.0, 10.0], &[0.0, 10.0]);
        let split = block_split(&c, &BlockOptions::default().size(5.0)).unwrap();
        assert_eq!(split.shape, vec![2, 2]);
        assert_eq!(split.labels, vec![0, 3]);
    }

    #[test]
    fn points_outside_explicit_region_are_clamped() {
        let c = coords(&[-5.0, 50.0], &[0.5, 0.5]);
        let opts = BlockOptions::default()
            .shape(2)
            .region(Region::new([0.0, 2.0, 0.0, 2.0]).unwrap());
        let split = block_split(&c, &opts).unwrap();
        assert_eq!(split.labels, vec![0, 2]);
    }

    #[test]
    fn region_adjust_grows_the_blocks_region() {
        let c = lattice(11, 11);
        let split = block_split(
            &c,
            &BlockOptions::default().size(3.0).adjust(Adjust::Region),
        )
        .unwrap();
        // ceil(10 / 3) = 4 blocks of exactly 3 over [-1, 11].
        assert_eq!(split.shape, vec![4, 4]);
        assert_close(&split.spacing, &[3.0, 3.0], 0.0);
        assert_close(split.region.as_slice(), &[-1.0, 11.0, -1.0, 11.0], 1e-12);

        let split = block_split(&c, &BlockOptions::default().size(3.0)).unwrap();
        assert_eq!(split.shape, vec![4, 4]);
        assert_close(&split.spacing, &[2.5, 2.5], 1e-12);
    }

    #[test]
    fn members_and_block_regions_agree() {
        let c = lattice(5, 5);
        let split = block_split(&c, &BlockOptions::default().shape(2)).unwrap();
        let members = split.members();
        assert_eq!(members.len(), 4);
        assert_eq!(members.iter().map(Vec::len).sum::<usize>(), 25);
        for (label, indices) in members.iter().enumerate() {
            let block = split.block_region(label).unwrap();
            for &i in indices {
                assert!(block.contains(&c.point(i)), "point {i} not in block {label}");
            }
        }
        assert!(split.block_region(4).is_none());
    }

    #[test]
    fn collinear_points_get_one_block_across() {
        let c = coords(&[0.0, 1.0, 2.0, 3.0], &[5.0; 4]);
        for adjust in [Adjust::Spacing, Adjust::Region] {
            let split =
                block_split(&c, &BlockOptions::default().size(1.0).adjust(adjust)).unwrap();
            assert_eq!(split.shape, vec![3, 1]);
            assert_eq!(split.labels, vec![0, 1, 2, 2]);
            assert_close(split.centers.array(0), &[0.5, 1.5, 2.5], 1e-12);
            assert_eq!(split.centers.array(1), &[5.0; 3]);
            assert_eq!(split.spacing[1], 0.0);
        }
    }

    #[test]
    fn single_point_is_a_single_block() {
        let c = coords(&[1.0], &[2.0]);
        for opts in [BlockOptions::default().shape(1), BlockOptions::default().shape(4)] {
            let split = block_split(&c, &opts).unwrap();
            assert_eq!(split.shape, vec![1, 1]);
            assert_eq!(split.labels, vec![0]);
            assert_eq!(split.centers.array(0), &[1.0]);
            assert_eq!(split.centers.array(1), &[2.0]);
            assert!(split.block_region(0).unwrap().contains(&[1.0, 2.0]));
        }
    }

    #[test]
    fn flat_explicit_region() {
        let c = coords(&[1.0, 9.0, 6.0], &[5.0, 5.0, 7.0]);
        let opts = BlockOptions::default()
            .shape([2, 4])
            .region(Region::new([0.0, 10.0, 5.0, 5.0]).unwrap());
        let split = block_split(&c, &opts).unwrap();
        assert_eq!(split.shape, vec![2, 1]);
        // Off-region values along the flat axis still land in its one block.
        assert_eq!(split.labels, vec![0, 1, 1]);
        assert_eq!(split.block_region(1).unwrap().as_slice(), &[5.0, 10.0, 5.0, 5.0]);
    }

    #[test]
    fn errors() {
        let c = coords(&[0.0, 1.0], &[0.0, 1.0]);
        assert!(matches!(
            block_split(&c, &BlockOptions::default()),
            Err(GridError::InvalidArgument { .. })
        ));
        assert!(matches!(
            block_split(&c, &BlockOptions::default().shape(0)),
            Err(GridError::InvalidArgument { name: "shape", .. })
        ));
        assert!(matches!(
            block_split(&c, &BlockOptions::default().size(-1.0)),
            Err(GridError::InvalidArgument { .. })
        ));
        let opts = BlockOptions::default()
            .shape(2)
            .region(Region::new([0.0, 1.0]).unwrap());
        assert!(matches!(
            block_split(&c, &opts),
            Err(GridError::ShapeMismatch { .. })
        ));
        let empty = Coordinates::from_arrays(vec![vec![], vec![]]).unwrap();
        assert!(matches!(
            block_split(&empty, &BlockOptions::default().shape(2)),
            Err(GridError::InsufficientPoints { .. })
        ));
    }
}
