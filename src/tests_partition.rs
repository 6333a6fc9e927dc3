use super::*;

use std::collections::BTreeSet;

use rand::Rng;

fn random_rect(rng: &mut impl Rng, size: u32) -> GridRect {
    let a = (rng.gen_range(0..size), rng.gen_range(0..size));
    let b = (rng.gen_range(0..size), rng.gen_range(0..size));
    GridRect::from_corners(a, b)
}

fn lattice_codes(rect: &GridRect) -> BTreeSet<u32> {
    let mut codes = BTreeSet::new();
    for x in rect.xmin..=rect.xmax {
        for y in rect.ymin..=rect.ymax {
            codes.insert(interleave(x, y));
        }
    }
    codes
}

fn assert_ascending(ranges: &[ZRange]) {
    assert!(!ranges.is_empty());
    assert!(ranges.iter().all(|r| r.lo <= r.hi));
    assert!(ranges.windows(2).all(|w| w[0].hi < w[1].lo), "{:?}", ranges);
}

#[test]
fn test_exact_partition_small_rects() {
    let mut rng = rand::thread_rng();
    let exact = RangePartitioner::new(1.0, 0).unwrap();
    for _ in 0..500 {
        let rect = random_rect(&mut rng, 64);
        let ranges = exact.partition(rect);
        assert_ascending(&ranges);
        let covered: BTreeSet<u32> = ranges.iter().flat_map(|r| r.lo..=r.hi).collect();
        assert_eq!(covered, lattice_codes(&rect), "{:?}", rect);
    }
}

#[test]
fn test_default_partition_covers_with_bounded_waste() {
    let mut rng = rand::thread_rng();
    let partitioner = RangePartitioner::default();
    for _ in 0..500 {
        let rect = random_rect(&mut rng, 64);
        let ranges = partitioner.partition(rect);
        assert_ascending(&ranges);
        let expected = lattice_codes(&rect);
        for z in &expected {
            assert!(ranges.iter().any(|r| r.contains(*z)), "{} missing for {:?}", z, rect);
        }
        // every range starts and ends on a cell of the rectangle
        for r in &ranges {
            assert!(expected.contains(&r.lo) && expected.contains(&r.hi));
        }
        let scanned: u64 = ranges.iter().map(ZRange::len).sum();
        assert!(scanned as f64 <= expected.len() as f64 * 1.1 + 4.0 * ranges.len() as f64);
    }
}

#[test]
fn test_aligned_square_is_one_range() {
    let partitioner = RangePartitioner::default();
    assert_eq!(partitioner.partition(GridRect::new(0, 0, 63, 63)), vec![ZRange::new(0, 4095)]);
    assert_eq!(
        partitioner.partition(GridRect::new(0, 0, GRID_MAX, GRID_MAX)),
        vec![ZRange::new(0, u32::MAX)]
    );
    assert_eq!(partitioner.partition(GridRect::new(5, 9, 5, 9)).len(), 1);
}

#[test]
fn test_column_split() {
    let column = GridRect::new(0, 0, 0, 63);
    let ranges = RangePartitioner::default().partition(column);
    assert_eq!(ranges.len(), 32);
    assert_eq!(ranges[0], ZRange::new(0, 2));
    let exact = RangePartitioner::new(1.0, 0).unwrap().partition(column);
    assert_eq!(exact.len(), 64);
    assert!(exact.iter().all(|r| r.len() == 1));
}

#[test]
fn test_zrange_cells() {
    let cells: Vec<_> = ZRange::new(0, 3).cells().collect();
    assert_eq!(cells, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    let r = ZRange::hull(&GridRect::new(2, 0, 3, 1));
    assert_eq!(r, ZRange::new(4, 7));
    assert_eq!(r.len(), 4);
    assert!(r.contains(4) && r.contains(7) && !r.contains(8));
    assert_eq!(ZRange::new(0, u32::MAX).len(), 1 << 32);
}

#[test]
fn test_snapped() {
    let r = GridRect::new(10, 10, 20, 12);
    assert_eq!(r.snapped(8), GridRect::new(10, 10, 21, 13));
    // 9 / 8 rounds up to a block of 2
    assert_eq!(GridRect::new(1, 1, 10, 10).snapped(8), GridRect::new(0, 0, 11, 11));
    let r = GridRect::new(3, 5, 3, 5);
    assert_eq!(r.snapped(8), r);
    let r = GridRect::new(100, 0, 300, 50);
    assert_eq!(r.snapped(8), GridRect::new(96, 0, 319, 63));
    let r = GridRect::new(60000, 60000, GRID_MAX, GRID_MAX);
    let s = r.snapped(8);
    assert_eq!((s.xmax, s.ymax), (GRID_MAX, GRID_MAX));
    assert!(s.xmin <= r.xmin && s.ymin <= r.ymin);
    assert_eq!(GridRect::new(1, 1, 4, 2).snapped(1), GridRect::new(0, 0, 7, 3));
}

#[test]
fn test_partitioner_rejects_low_waste_factor() {
    assert!(matches!(
        RangePartitioner::new(0.5, 0),
        Err(Error::InvalidConfig { field: "waste_factor", .. })
    ));
    assert!(RangePartitioner::new(f64::NAN, 0).is_err());
    assert!(RangePartitioner::new(f64::INFINITY, 4).is_err());
}

#[test]
fn test_single_cell_is_one_range() {
    let exact = RangePartitioner::new(1.0, 0).unwrap();
    for &(x, y) in &[(0, 0), (1, 1), (GRID_MAX, GRID_MAX), (1234, 77)] {
        let z = interleave(x, y);
        assert_eq!(exact.partition(GridRect::new(x, y, x, y)), vec![ZRange::new(z, z)]);
    }
}
