//! Benchmarks for neighbor queries
//!
//! Run with: cargo bench --package neighbors
//!
//! Uses a synthetic matrix of MovieLens-100k proportions (943 users,
//! 1664 movies, ~6% density) so the bench runs without the dataset.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::{RatingMatrix, RatingRecord};
use neighbors::NeighborIndex;
use std::sync::Arc;

const USERS: u32 = 943;
const MOVIES: u32 = 1664;

fn synthetic_matrix() -> Arc<RatingMatrix> {
    let mut records = Vec::new();
    for user_id in 1..=USERS {
        for movie in 0..MOVIES {
            // Deterministic sparse pattern, roughly 1 in 16 cells rated
            let hash = user_id.wrapping_mul(2_654_435_761) ^ movie.wrapping_mul(40_503);
            if hash % 16 == 0 {
                let rating = (hash % 5 + 1) as f32;
                records.push(RatingRecord::new(user_id, format!("Movie {}", movie), rating));
            }
        }
    }
    Arc::new(RatingMatrix::from_records(records).expect("Failed to build synthetic matrix"))
}

fn bench_build_index(c: &mut Criterion) {
    let matrix = synthetic_matrix();

    c.bench_function("neighbor_index_build", |b| {
        b.iter(|| {
            let index = NeighborIndex::build(black_box(matrix.clone()));
            black_box(index)
        })
    });
}

fn bench_query(c: &mut Criterion) {
    let index = NeighborIndex::build(synthetic_matrix());

    c.bench_function("neighbor_index_query_k10", |b| {
        b.iter(|| {
            let neighbors = index.query(black_box(1), black_box(10)).unwrap();
            black_box(neighbors)
        })
    });
}

criterion_group!(benches, bench_build_index, bench_query);
criterion_main!(benches);
