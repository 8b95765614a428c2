//! Seeded uniform scatters.
//!
//! Both generators use a [`ChaCha8Rng`], so a fixed seed reproduces the
//! same points on every platform. With `seed: None` the generator is seeded
//! from the thread-local RNG.

use gridspan_core::{Coordinates, GridError, Region};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    }
}

fn check_size(size: usize) -> Result<(), GridError> {
    if size == 0 {
        return Err(GridError::argument(
            "size",
            "must be a positive integer, got 0",
        ));
    }
    Ok(())
}

/// Draw `size` points uniformly inside `region`.
///
/// Each dimension is sampled independently. The result is a flat point
/// cloud with shape `[size]`.
///
/// # Examples
///
/// ```
/// use gridspan_coords::random_coordinates;
/// use gridspan_core::Region;
///
/// let region = Region::new([0.0, 10.0, -5.0, 5.0]).unwrap();
/// let a = random_coordinates(&region, 100, Some(42)).unwrap();
/// let b = random_coordinates(&region, 100, Some(42)).unwrap();
/// assert_eq!(a, b);
/// assert!(region.inside(&a).unwrap().iter().all(|&inside| inside));
/// ```
pub fn random_coordinates(
    region: &Region,
    size: usize,
    seed: Option<u64>,
) -> Result<Coordinates, GridError> {
    check_size(size)?;
    let mut rng = seeded_rng(seed);
    let arrays: Vec<Vec<f64>> = region
        .pairs()
        .map(|(lo, hi)| (0..size).map(|_| rng.random_range(lo..=hi)).collect())
        .collect();
    debug!(size, %region, ?seed, "generated random coordinates");
    Coordinates::from_arrays(arrays)
}

/// Draw `size` points uniformly on (a patch of) a sphere.
///
/// `region` is `[lon_w, lon_e, lat_s, lat_n]` in degrees, optionally
/// followed by `[r_min, r_max]`. Longitude is uniform; latitude is drawn
/// by inverse CDF so that points do not cluster at the poles. With a
/// radial pair the points fill the spherical shell uniformly by volume,
/// otherwise only two arrays (longitude, latitude) are returned.
///
/// # Errors
///
/// - `InvalidDomain` if the region is not a valid geographic region or
///   the radial pair is negative.
/// - `InvalidArgument` if `size` is 0 or the region does not have 2 or 3
///   dimensions.
///
/// # Examples
///
/// ```
/// use gridspan_coords::random_coordinates_spherical;
/// use gridspan_core::Region;
///
/// let region = Region::new([0.0, 360.0, -90.0, 90.0, 6000.0, 6400.0]).unwrap();
/// let points = random_coordinates_spherical(&region, 50, Some(0)).unwrap();
/// assert_eq!(points.ndim(), 3);
/// assert!(points.array(2).iter().all(|r| (6000.0..=6400.0).contains(r)));
/// ```
pub fn random_coordinates_spherical(
    region: &Region,
    size: usize,
    seed: Option<u64>,
) -> Result<Coordinates, GridError> {
    check_size(size)?;
    if !(2..=3).contains(&region.ndim()) {
        return Err(GridError::argument(
            "region",
            format!(
                "spherical sampling needs 2 or 3 dimensions (longitude, latitude[, radius]), got {}",
                region.ndim()
            ),
        ));
    }
    region.check_geographic()?;
    let radial = if region.ndim() == 3 {
        let (r_min, r_max) = region.bounds(2);
        if r_min < 0.0 {
            return Err(GridError::domain(format!(
                "Invalid radius range [{r_min}, {r_max}]. Radii must be non-negative"
            )));
        }
        Some((r_min, r_max))
    } else {
        None
    };

    let mut rng = seeded_rng(seed);
    let (west, east) = region.bounds(0);
    let (south, north) = region.bounds(1);
    let (sin_south, sin_north) = (south.to_radians().sin(), north.to_radians().sin());

    let longitude: Vec<f64> = (0..size).map(|_| rng.random_range(west..=east)).collect();
    let latitude: Vec<f64> = (0..size)
        .map(|_| {
            rng.random_range(sin_south..=sin_north)
                .clamp(-1.0, 1.0)
                .asin()
                .to_degrees()
        })
        .collect();
    let mut arrays = vec![longitude, latitude];
    if let Some((r_min, r_max)) = radial {
        let (cube_min, cube_max) = (r_min.powi(3), r_max.powi(3));
        arrays.push(
            (0..size)
                .map(|_| rng.random_range(cube_min..=cube_max).cbrt().clamp(r_min, r_max))
                .collect(),
        );
    }
    debug!(size, %region, ?seed, "generated spherical random coordinates");
    Coordinates::from_arrays(arrays)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(bounds: &[f64]) -> Region {
        Region::new(bounds).unwrap()
    }

    #[test]
    fn same_seed_same_points() {
        let r = region(&[-10.0, 10.0, 0.0, 1.0, 5.0, 6.0]);
        let a = random_coordinates(&r, 64, Some(7)).unwrap();
        let b = random_coordinates(&r, 64, Some(7)).unwrap();
        let c = random_coordinates(&r, 64, Some(8)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.shape(), &[64]);
        assert_eq!(a.ndim(), 3);
    }

    #[test]
    fn points_stay_inside_region() {
        let r = region(&[-10.0, 10.0, 100.0, 100.5]);
        let coords = random_coordinates(&r, 500, Some(1)).unwrap();
        assert!(r.inside(&coords).unwrap().into_iter().all(|b| b));
    }

    #[test]
    fn unseeded_still_valid() {
        let r = region(&[0.0, 1.0]);
        let coords = random_coordinates(&r, 10, None).unwrap();
        assert_eq!(coords.len(), 10);
    }

    #[test]
    fn zero_size_fails() {
        match random_coordinates(&region(&[0.0, 1.0]), 0, Some(0)) {
            Err(GridError::InvalidArgument { name: "size", .. }) => {}
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn spherical_latitude_is_area_uniform() {
        // Half the area of a hemisphere lies below 30 degrees latitude.
        let r = region(&[0.0, 360.0, 0.0, 90.0]);
        let coords = random_coordinates_spherical(&r, 20_000, Some(3)).unwrap();
        let below = coords.array(1).iter().filter(|&&lat| lat < 30.0).count();
        let fraction = below as f64 / 20_000.0;
        assert!((fraction - 0.5).abs() < 0.02, "fraction below 30N: {fraction}");
    }

    #[test]
    fn spherical_shell_fills_by_volume() {
        // (r^3 - 1) / (8 - 1) = 0.5 at r = 4.5^(1/3).
        let r = region(&[-180.0, 180.0, -90.0, 90.0, 1.0, 2.0]);
        let coords = random_coordinates_spherical(&r, 20_000, Some(9)).unwrap();
        let median = 4.5f64.cbrt();
        let below = coords.array(2).iter().filter(|&&rad| rad < median).count();
        let fraction = below as f64 / 20_000.0;
        assert!((fraction - 0.5).abs() < 0.02, "fraction below median radius: {fraction}");
        assert!(coords.array(2).iter().all(|r| (1.0..=2.0).contains(r)));
    }

    #[test]
    fn spherical_rejects_bad_regions() {
        assert!(matches!(
            random_coordinates_spherical(&region(&[0.0, 1.0]), 10, Some(0)),
            Err(GridError::InvalidArgument { .. })
        ));
        assert!(matches!(
            random_coordinates_spherical(&region(&[0.0, 10.0, -95.0, 0.0]), 10, Some(0)),
            Err(GridError::InvalidDomain { .. })
        ));
        assert!(matches!(
            random_coordinates_spherical(&region(&[0.0, 10.0, 0.0, 10.0, -1.0, 1.0]), 10, Some(0)),
            Err(GridError::InvalidDomain { .. })
        ));
    }
}
