//! Partitioner properties over seeded point clouds.

use approx::assert_relative_eq;
use gridspan_core::{Adjust, Region};
use gridspan_split::{
    block_split, expanding_window, rolling_window, BlockOptions, RollingWindowOptions,
};
use gridspan_test_utils::{assert_subset, seeded_cloud};
use proptest::prelude::*;

proptest! {
    #[test]
    fn every_label_names_a_block_containing_its_point(
        seed in any::<u64>(),
        n in 1usize..200,
        size in 0.3f64..4.0,
        region_adjust in any::<bool>(),
    ) {
        let region = Region::new([-3.0, 5.0, 10.0, 12.5]).unwrap();
        let coords = seeded_cloud(&region, n, seed);
        let adjust = if region_adjust { Adjust::Region } else { Adjust::Spacing };
        let split = block_split(
            &coords,
            &BlockOptions::default().size(size).adjust(adjust).region(region.clone()),
        )
        .unwrap();
        prop_assert_eq!(split.centers.len(), split.nblocks());
        for (i, &label) in split.labels.iter().enumerate() {
            prop_assert!(label < split.nblocks());
            let block = split.block_region(label).unwrap();
            let padded = block.pad(1e-9).unwrap();
            prop_assert!(padded.contains(&coords.point(i)), "point {} outside block {}", i, label);
            // The block centre lies midway between its bounds.
            let center = split.centers.point(label);
            for (dim, (lo, hi)) in block.pairs().enumerate() {
                prop_assert!((center[dim] - (lo + hi) / 2.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn expanding_windows_are_nested(
        seed in any::<u64>(),
        mut sizes in prop::collection::vec(0.01f64..20.0, 1..6),
    ) {
        sizes.sort_by(f64::total_cmp);
        let region = Region::new([0.0, 10.0, 0.0, 10.0, 0.0, 1.0]).unwrap();
        let coords = seeded_cloud(&region, 300, seed);
        let windows = expanding_window(&coords, &[5.0, 5.0, 0.5], &sizes).unwrap();
        for pair in windows.windows(2) {
            assert_subset(&pair[0], &pair[1]);
        }
    }

    #[test]
    fn non_overlapping_windows_cover_the_region(
        seed in any::<u64>(),
        size in 0.5f64..5.0,
    ) {
        let region = Region::new([0.0, 5.0, 0.0, 5.0]).unwrap();
        let coords = seeded_cloud(&region, 150, seed);
        let windows = rolling_window(
            &coords,
            &RollingWindowOptions::new(size).adjust(Adjust::Region).region(region.clone()),
        )
        .unwrap();
        let mut covered = vec![false; coords.len()];
        for (center, indices) in windows.centers.points().zip(&windows.indices) {
            for &i in indices {
                let p = coords.point(i);
                for dim in 0..2 {
                    prop_assert!((p[dim] - center[dim]).abs() <= size / 2.0);
                }
                covered[i] = true;
            }
        }
        let missed: Vec<usize> = (0..covered.len()).filter(|&i| !covered[i]).collect();
        prop_assert!(missed.is_empty(), "points {:?} are in no window", missed);
    }
}

#[test]
fn overlapping_windows_share_points() {
    let region = Region::new([0.0, 10.0]).unwrap();
    let coords = seeded_cloud(&region, 500, 11);
    let windows =
        rolling_window(&coords, &RollingWindowOptions::new(4.0).overlap(0.5)).unwrap();
    let total: usize = windows.indices.iter().map(Vec::len).sum();
    assert!(total > coords.len());
    for pair in windows.indices.windows(2) {
        assert!(pair[0].iter().any(|i| pair[1].binary_search(i).is_ok()));
    }
}

#[test]
fn overlap_sets_the_centre_spacing() {
    let region = Region::new([0.0, 10.0]).unwrap();
    let coords = seeded_cloud(&region, 50, 3);
    let opts = RollingWindowOptions::new(4.0).overlap(0.5).region(region);
    let windows = rolling_window(&coords, &opts).unwrap();
    let centers = windows.centers.array(0);
    assert_eq!(centers.len(), 4);
    assert_relative_eq!(centers[0], 2.0);
    assert_relative_eq!(centers[3], 8.0);
    for pair in centers.windows(2) {
        assert_relative_eq!(pair[1] - pair[0], 2.0, epsilon = 1e-12);
    }
}
