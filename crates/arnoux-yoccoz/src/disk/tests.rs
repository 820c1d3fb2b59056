use super::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rational() -> FoliationDisk {
    FoliationDisk::new(vec![0.1, 0.1, 0.2, 0.2, 0.3, 0.3], vec![1, 0, 3, 2, 5, 4]).unwrap()
}

fn p(t: f64) -> CirclePoint {
    CirclePoint::new(t)
}

// Reference lookup: the first interval whose right end is at or past `t`.
fn which_linear(disk: &FoliationDisk, t: CirclePoint) -> usize {
    let div = disk.div_points();
    let mut i = 0;
    while i + 1 < div.len() && div[i + 1].value() < t.value() {
        i += 1;
    }
    i
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn validate_pairing_cases() {
    assert_eq!(
        validate_pairing(&[1, 0, 2, 3]),
        Err(InputError::SelfPaired { index: 2 })
    );
    assert_eq!(
        validate_pairing(&[2, 3, 0, 1]),
        Err(InputError::CrossingPairs { first: 0, second: 2 })
    );
    assert_eq!(validate_pairing(&[1, 0, 3, 2]), Ok(()));
    assert_eq!(validate_pairing(&[3, 2, 1, 0, 5, 4]), Ok(()));
    assert_eq!(
        validate_pairing(&[1, 2, 0, 5, 4, 3]),
        Err(InputError::NotAnInvolution { index: 0, pair: 1 })
    );
    assert_eq!(
        validate_pairing(&[1, 0, 7, 2]),
        Err(InputError::PairOutOfRange { index: 2, pair: 7, count: 4 })
    );
    // Same parity but nested incorrectly.
    assert!(matches!(
        validate_pairing(&[3, 4, 5, 0, 1, 2]),
        Err(InputError::CrossingPairs { .. })
    ));
}

#[test]
fn validate_lengths_cases() {
    let pairing = [1, 0, 3, 2, 5, 4];
    assert_eq!(validate_lengths(&[0.1; 6], &pairing), Ok(()));
    assert_eq!(
        validate_lengths(&[0.1; 5], &pairing),
        Err(InputError::CountMismatch { lengths: 5, pairing: 6 })
    );
    assert_eq!(
        validate_lengths(&[0.1; 4], &[1, 0, 3, 2]),
        Err(InputError::TooFewIntervals { count: 4, min: 6 })
    );
    assert_eq!(
        validate_lengths(&[0.1; 7], &[1, 0, 3, 2, 5, 4, 6]),
        Err(InputError::OddLengthCount { count: 7 })
    );
    assert_eq!(
        validate_lengths(&[0.1, 0.1, 0.0, 0.2, 0.3, 0.3], &pairing),
        Err(InputError::NonPositiveLength { index: 2, value: 0.0 })
    );
    assert_eq!(
        validate_lengths(&[1e308; 6], &pairing),
        Err(InputError::NonFiniteTotal {
            total: f64::INFINITY
        })
    );
    assert!(FoliationDisk::new(vec![1e308; 6], pairing.to_vec()).is_err());
    let err = FoliationDisk::new(vec![0.1; 6], vec![0, 1, 3, 2, 5, 4]).unwrap_err();
    assert!(err.to_string().contains("paired with itself"));
}

#[test]
fn rational_example_normalizes() {
    let disk = rational();
    assert_eq!(disk.num_separatrices(), 6);
    assert!(close(disk.lengths().iter().sum::<f64>(), 1.0));
    let expected = [0.0, 1.0 / 12.0, 1.0 / 6.0, 1.0 / 3.0, 0.5, 0.75];
    for (d, e) in disk.div_points().iter().zip(expected) {
        assert!(close(d.value(), e), "{d} vs {e}");
    }
    assert_eq!(disk.which_interval_contains(p(0.15)), 1);
    assert_eq!(disk.which_interval_contains(p(0.95)), 5);
    assert_eq!(disk.which_interval_contains(p(0.0)), 0);
    assert_eq!(disk.which_interval_contains(p(0.6)), 4);
}

#[test]
fn division_points_belong_to_the_interval_they_end() {
    let disk = rational();
    for i in 1..6 {
        assert_eq!(disk.which_interval_contains(disk.div_point(i)), i - 1);
    }
    assert!(disk.is_div_point(disk.div_point(3).shifted_to(Side::Left)));
    assert!(!disk.is_div_point(p(0.2)));
}

#[test]
fn paired_lengths_are_averaged() {
    let disk =
        FoliationDisk::new(vec![0.1, 0.3, 0.2, 0.2, 0.1, 0.1], vec![1, 0, 3, 2, 5, 4]).unwrap();
    assert!(close(disk.lengths()[0], disk.lengths()[1]));
    assert!(close(disk.lengths()[0], 0.2));
}

#[test]
fn follow_the_leaf_maps_into_paired_interval() {
    let disk = rational();
    // Interval 4 is [0.5, 0.75], paired with interval 5 = [0.75, 1).
    let t = p(0.55);
    let s = disk.follow_the_leaf(t);
    assert!(close(s.value(), 0.95));
    assert_eq!(disk.which_interval_contains(s), 5);
    assert!(close(disk.follow_the_leaf(s).value(), 0.55));
}

#[test]
fn index_helpers_wrap() {
    let disk = rational();
    assert_eq!(disk.increase_index(5), 0);
    assert_eq!(disk.decrease_index(0), 5);
    assert_eq!(disk.separatrix_index_of_pair(0, Side::Right), 2);
    assert_eq!(disk.separatrix_index_of_pair(0, Side::Left), 4);
    assert_eq!(disk.separatrix_index_of_pair(3, Side::Left), 3);
}

#[test]
fn rotate_and_reflect_relabel() {
    let mut disk = rational();
    disk.rotate();
    assert_eq!(disk.pairing(), &[5, 2, 1, 4, 3, 0]);
    assert!(close(disk.lengths()[0], 0.25));
    let mut mirrored = rational();
    mirrored.reflect();
    assert_eq!(mirrored.pairing(), &[1, 0, 3, 2, 5, 4]);
    assert!(close(mirrored.lengths()[0], 0.25));
    assert!(rational().equals_up_to_rotation(&disk, 1e-12));
    assert!(rational().equals_up_to_rotation_and_reflection(&mirrored, 1e-12));
    assert!(!rational().equals(&disk, 1e-12));
}

#[test]
fn tree_layout_and_signature() {
    let tree = WeightedTree::from_weights(&[0.1, 0.2, 0.3, 0.0, 0.4, 0.5]).unwrap();
    assert_eq!(tree.num_edges(), 5);
    assert_eq!(tree.children(WeightedTree::ROOT).len(), 3);
    assert_eq!(tree.num_descendants(NodeId(1)), 2);
    assert_eq!(tree.parent(NodeId(4)), Some(NodeId(1)));
    let (lengths, pairing) = tree.lengths_and_pairing();
    assert_eq!(pairing, vec![5, 2, 1, 4, 3, 0, 7, 6, 9, 8]);
    assert_eq!(lengths, vec![0.1, 0.4, 0.4, 0.5, 0.5, 0.1, 0.2, 0.2, 0.3, 0.3]);
    let disk = FoliationDisk::from_tree(&tree);
    assert_eq!(disk.prong_signature(), vec![3, 3, 1, 1, 1, 1]);
    assert!(disk.to_string().ends_with("Singularity type: 3 3 1 1 1 1"));
    // A trailing terminator is accepted.
    let same = WeightedTree::from_weights(&[0.1, 0.2, 0.3, 0.0, 0.4, 0.5, 0.0]).unwrap();
    assert_eq!(same.lengths_and_pairing().1, pairing);
}

#[test]
fn tree_rejections() {
    assert_eq!(
        WeightedTree::from_weights(&[0.1, 0.2]).unwrap_err(),
        InputError::RootDegree { children: 2 }
    );
    assert_eq!(
        WeightedTree::from_weights(&[]).unwrap_err(),
        InputError::RootDegree { children: 0 }
    );
    assert_eq!(
        WeightedTree::from_weights(&[0.1, 0.2, 0.3, 0.0, 0.4]).unwrap_err(),
        InputError::DegreeTwoVertex { node: 1 }
    );
    assert_eq!(
        WeightedTree::from_weights(&[0.1, -0.2, 0.3]).unwrap_err(),
        InputError::NonPositiveWeight { index: 1, value: -0.2 }
    );
    assert_eq!(
        WeightedTree::from_weights(&[0.1, 0.2, 0.3, 0.0, 0.0, 0.0, 0.0, 0.5, 0.6]).unwrap_err(),
        InputError::TooManyGroups { groups: 5 }
    );
}

#[test]
fn arnoux_yoccoz_star() {
    let tree = WeightedTree::arnoux_yoccoz(3).unwrap();
    let disk = FoliationDisk::from_tree(&tree);
    assert_eq!(disk.pairing(), &[1, 0, 3, 2, 5, 4]);
    let expected = [0.0, 0.209822, 0.419643, 0.533721, 0.647799, 0.823899];
    for (d, e) in disk.div_points().iter().zip(expected) {
        assert!((d.value() - e).abs() < 1e-6, "{d} vs {e}");
    }
    assert_eq!(disk.prong_signature(), vec![3, 1, 1, 1]);
    assert_eq!(
        WeightedTree::arnoux_yoccoz(2).unwrap_err(),
        InputError::GenusTooSmall { genus: 2 }
    );
}

#[test]
fn random_trees_have_requested_size() {
    let mut rng = StdRng::seed_from_u64(7);
    for edges in 3..12 {
        let tree = WeightedTree::random_default(edges, &mut rng).unwrap();
        assert_eq!(tree.num_edges(), edges);
        let (lengths, pairing) = tree.lengths_and_pairing();
        validate_pairing(&pairing).unwrap();
        validate_lengths(&lengths, &pairing).unwrap();
    }
    assert_eq!(
        WeightedTree::random_default(2, &mut rng).unwrap_err(),
        InputError::TooFewEdges { edges: 2 }
    );
    assert_eq!(
        WeightedTree::random(5, &mut rng, 0).unwrap_err(),
        InputError::SamplingFailed { attempts: 0 }
    );
}

fn random_disk(edges: usize, seed: u64) -> FoliationDisk {
    let mut rng = StdRng::seed_from_u64(seed);
    FoliationDisk::from_tree(&WeightedTree::random_default(edges, &mut rng).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_normalized_and_increasing(edges in 3usize..10, seed in any::<u64>()) {
        let disk = random_disk(edges, seed);
        prop_assert!((disk.lengths().iter().sum::<f64>() - 1.0).abs() < 1e-12);
        prop_assert!(disk.div_points().windows(2).all(|w| w[0].value() < w[1].value()));
        prop_assert!(validate_pairing(disk.pairing()).is_ok());
    }

    #[test]
    fn prop_rotate_n_times_is_identity(edges in 3usize..10, seed in any::<u64>()) {
        let original = random_disk(edges, seed);
        let mut disk = original.clone();
        for _ in 0..disk.num_separatrices() {
            disk.rotate();
        }
        prop_assert_eq!(disk.pairing(), original.pairing());
        prop_assert!(disk.lengths_equal(&original, 1e-12));
    }

    #[test]
    fn prop_reflect_twice_is_identity(edges in 3usize..10, seed in any::<u64>()) {
        let original = random_disk(edges, seed);
        let mut disk = original.clone();
        disk.reflect();
        prop_assert!(validate_pairing(disk.pairing()).is_ok());
        disk.reflect();
        prop_assert!(disk.equals(&original, 1e-12));
    }

    #[test]
    fn prop_lookup_matches_linear_scan(
        edges in 3usize..10,
        seed in any::<u64>(),
        ts in prop::collection::vec(0.0f64..1.0, 1..20),
    ) {
        let disk = random_disk(edges, seed);
        for t in ts {
            prop_assert_eq!(disk.which_interval_contains(p(t)), which_linear(&disk, p(t)));
        }
        for d in disk.div_points() {
            prop_assert_eq!(disk.which_interval_contains(*d), which_linear(&disk, *d));
        }
    }

    #[test]
    fn prop_following_twice_returns(
        edges in 3usize..10,
        seed in any::<u64>(),
        frac in 0.01f64..0.99,
        pick in any::<prop::sample::Index>(),
    ) {
        let disk = random_disk(edges, seed);
        let i = pick.index(disk.num_separatrices());
        let t = disk.div_point(i) + frac * disk.lengths()[i];
        let s = disk.follow_the_leaf(t);
        prop_assert_eq!(disk.which_interval_contains(s), disk.pair(i));
        let back = disk.follow_the_leaf(s);
        let d = crate::circle::distance_between(back, t);
        prop_assert!(d.min(1.0 - d) < 1e-9);
    }

    #[test]
    fn prop_prongs_match_euler_characteristic(edges in 3usize..12, seed in any::<u64>()) {
        let disk = random_disk(edges, seed);
        let prongs = disk.prong_signature();
        let total: i64 = prongs.iter().map(|&k| k as i64 - 2).sum();
        prop_assert_eq!(total, -2);
        prop_assert!(prongs.windows(2).all(|w| w[0] >= w[1]));
    }
}
