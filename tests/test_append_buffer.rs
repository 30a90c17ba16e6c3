//! Integration tests: append buffer under real parallel load
//!
//! The slot-claim protocol must lose nothing, duplicate nothing and
//! count exactly, no matter how rayon schedules the producers.
//!
//! Author: Moroya Sakamoto

mod common;

use iso_march::prelude::*;
use rayon::prelude::*;

fn marker(id: usize) -> Triangle {
    let f = id as f32;
    Triangle::new(Vec3::splat(f), Vec3::splat(f + 0.25), Vec3::splat(f + 0.5))
}

#[test]
fn parallel_producers_sum_exactly() {
    const PRODUCERS: usize = 64;
    const PER_PRODUCER: usize = 500;

    let buffer = TriangleBuffer::with_capacity(PRODUCERS * PER_PRODUCER);
    (0..PRODUCERS).into_par_iter().for_each(|producer| {
        for i in 0..PER_PRODUCER {
            assert!(buffer.append(marker(producer * PER_PRODUCER + i)));
        }
    });

    assert_eq!(buffer.len(), PRODUCERS * PER_PRODUCER);
    assert!(!buffer.overflowed());
}

#[test]
fn no_two_producers_share_a_slot() {
    const PRODUCERS: usize = 32;
    const PER_PRODUCER: usize = 200;

    let buffer = TriangleBuffer::with_capacity(PRODUCERS * PER_PRODUCER);
    (0..PRODUCERS).into_par_iter().for_each(|producer| {
        for i in 0..PER_PRODUCER {
            buffer.append(marker(producer * PER_PRODUCER + i));
        }
    });

    // If any slot had been claimed twice, one marker would be missing and
    // another duplicated.
    let mut ids: Vec<usize> = buffer
        .into_triangles()
        .iter()
        .map(|t| t.p0.x as usize)
        .collect();
    ids.sort_unstable();
    let expected: Vec<usize> = (0..PRODUCERS * PER_PRODUCER).collect();
    assert_eq!(ids, expected);
}

#[test]
fn variable_appends_per_producer() {
    // Mirrors the real dispatch: each producer appends 0-5 triangles.
    const PRODUCERS: usize = 1000;

    let buffer = TriangleBuffer::with_capacity(PRODUCERS * 5);
    let expected_total: usize = (0..PRODUCERS).map(|p| p % 6).sum();

    (0..PRODUCERS).into_par_iter().for_each(|producer| {
        for i in 0..producer % 6 {
            buffer.append(marker(producer * 8 + i));
        }
    });

    assert_eq!(buffer.len(), expected_total);
    assert_eq!(buffer.into_triangles().len(), expected_total);
}

#[test]
fn overflow_never_corrupts_valid_slots() {
    const CAPACITY: usize = 100;

    let buffer = TriangleBuffer::with_capacity(CAPACITY);
    (0..CAPACITY * 3).into_par_iter().for_each(|i| {
        buffer.append(marker(i));
    });

    assert!(buffer.overflowed());
    assert_eq!(buffer.len(), CAPACITY);

    // Every populated slot holds one intact marker triangle.
    for t in buffer.into_triangles() {
        let id = t.p0.x;
        assert_eq!(t.p1.x, id + 0.25);
        assert_eq!(t.p2.x, id + 0.5);
    }
}
