//! Partitioner configuration.

use gridspan_core::{Adjust, Broadcast, GridError, Region};

// ── BlockOptions ───────────────────────────────────────────────────

/// Configuration for [`block_split`](crate::block_split).
///
/// Exactly one of `shape` (number of blocks per dimension) and `size`
/// (block edge length per dimension) must be set.
///
/// # Examples
///
/// ```
/// use gridspan_core::{Adjust, Region};
/// use gridspan_split::BlockOptions;
///
/// let opts = BlockOptions::default()
///     .size(2.5)
///     .adjust(Adjust::Region)
///     .region(Region::new([0.0, 10.0, 0.0, 10.0]).unwrap());
/// assert!(opts.validate().is_ok());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlockOptions {
    /// Number of blocks per dimension.
    pub shape: Option<Broadcast<usize>>,
    /// Block edge length per dimension.
    pub size: Option<Broadcast<f64>>,
    /// Which quantity absorbs rounding error when `size` does not divide
    /// the region. Ignored when `shape` is set.
    pub adjust: Adjust,
    /// Region to split. Defaults to the bounding region of the data.
    pub region: Option<Region>,
}

impl BlockOptions {
    /// Set the number of blocks per dimension.
    pub fn shape(mut self, shape: impl Into<Broadcast<usize>>) -> Self {
        self.shape = Some(shape.into());
        self
    }

    /// Set the block edge length.
    pub fn size(mut self, size: impl Into<Broadcast<f64>>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Set the adjustment policy (default: [`Adjust::Spacing`]).
    pub fn adjust(mut self, adjust: Adjust) -> Self {
        self.adjust = adjust;
        self
    }

    /// Split this region instead of the data's bounding region.
    pub fn region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Check that exactly one of `shape` and `size` is set.
    pub fn validate(&self) -> Result<(), GridError> {
        match (&self.shape, &self.size) {
            (Some(shape), Some(size)) => Err(GridError::argument(
                "shape",
                format!("Both shape ({shape:?}) and size ({size:?}) provided. Only one is allowed"),
            )),
            (None, None) => Err(GridError::argument(
                "shape",
                "Either a shape or a size must be provided",
            )),
            _ => Ok(()),
        }
    }
}

// ── RollingWindowOptions ───────────────────────────────────────────

/// How window centres are spaced, resolved per dimension.
#[derive(Clone, Debug, PartialEq)]
pub enum WindowPlacement {
    /// Explicit distance between adjacent centres.
    Spacing(Vec<f64>),
    /// Explicit number of centres.
    Shape(Vec<usize>),
    /// Centres `size * (1 - overlap)` apart.
    Overlap(f64),
}

/// Configuration for [`rolling_window`](crate::rolling_window) and
/// [`rolling_window_spherical`](crate::rolling_window_spherical).
///
/// `size` is the full window width. At most one of `spacing`, `shape`
/// and `overlap` may be set; with none of them the windows do not
/// overlap (`overlap = 0`).
#[derive(Clone, Debug, PartialEq)]
pub struct RollingWindowOptions {
    /// Window width per dimension.
    pub size: Broadcast<f64>,
    /// Distance between window centres.
    pub spacing: Option<Broadcast<f64>>,
    /// Number of window centres per dimension.
    pub shape: Option<Broadcast<usize>>,
    /// Fraction of a window shared with its neighbour, in `[0, 1)`.
    pub overlap: Option<f64>,
    /// Which quantity absorbs rounding error in the centre spacing.
    pub adjust: Adjust,
    /// Region to cover. Defaults to the bounding region of the data.
    pub region: Option<Region>,
}

impl RollingWindowOptions {
    /// Windows of width `size` with default placement.
    pub fn new(size: impl Into<Broadcast<f64>>) -> Self {
        Self {
            size: size.into(),
            spacing: None,
            shape: None,
            overlap: None,
            adjust: Adjust::default(),
            region: None,
        }
    }

    /// Set the distance between window centres.
    pub fn spacing(mut self, spacing: impl Into<Broadcast<f64>>) -> Self {
        self.spacing = Some(spacing.into());
        self
    }

    /// Set the number of window centres per dimension.
    pub fn shape(mut self, shape: impl Into<Broadcast<usize>>) -> Self {
        self.shape = Some(shape.into());
        self
    }

    /// Set the fraction of overlap between adjacent windows.
    pub fn overlap(mut self, overlap: f64) -> Self {
        self.overlap = Some(overlap);
        self
    }

    /// Set the adjustment policy (default: [`Adjust::Spacing`]).
    pub fn adjust(mut self, adjust: Adjust) -> Self {
        self.adjust = adjust;
        self
    }

    /// Cover this region instead of the data's bounding region.
    pub fn region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Check sizes, overlap, and that at most one placement is set.
    pub fn validate(&self) -> Result<(), GridError> {
        let set = [
            self.spacing.is_some(),
            self.shape.is_some(),
            self.overlap.is_some(),
        ]
        .into_iter()
        .filter(|&s| s)
        .count();
        if set > 1 {
            return Err(GridError::argument(
                "spacing",
                format!(
                    "Only one of spacing ({:?}), shape ({:?}) and overlap ({:?}) may be provided",
                    self.spacing, self.shape, self.overlap
                ),
            ));
        }
        if let Some(overlap) = self.overlap {
            if !(0.0..1.0).contains(&overlap) {
                return Err(GridError::argument(
                    "overlap",
                    format!("Invalid overlap '{overlap}'. Must be >= 0 and < 1"),
                ));
            }
        }
        Ok(())
    }

    /// Resolve window sizes and centre placement for `ndim` dimensions.
    pub fn resolve(&self, ndim: usize) -> Result<(Vec<f64>, WindowPlacement), GridError> {
        self.validate()?;
        let size = self.size.resolve(ndim, "size")?;
        if let Some(bad) = size.iter().find(|s| !s.is_finite() || **s <= 0.0) {
            return Err(GridError::argument(
                "size",
                format!("Invalid window size '{bad}'. Must be finite and positive"),
            ));
        }
        let placement = match (&self.spacing, &self.shape, self.overlap) {
            (Some(spacing), _, _) => WindowPlacement::Spacing(spacing.resolve(ndim, "spacing")?),
            (_, Some(shape), _) => WindowPlacement::Shape(shape.resolve(ndim, "shape")?),
            (_, _, overlap) => WindowPlacement::Overlap(overlap.unwrap_or(0.0)),
        };
        Ok((size, placement))
    }
}
