#[cfg(test)]
mod tests_partition;

mod config;
mod entity;
mod error;
mod index;
mod mapper;
mod morton;
mod partition;

pub use config::IndexConfig;
pub use entity::{EntityId, IdAllocator};
pub use error::{Error, Result};
pub use index::{QueryTrace, ZOrderIndex};
pub use mapper::{Bounds, GridRect, GRID_MAX};
pub use morton::*;
pub use partition::{RangePartitioner, ZRange};

use rand::Rng;

pub type Point = (f32, f32);

pub fn generate_random_points(num_points: usize, size: f32) -> Vec<Point> {
    let mut rng = rand::thread_rng();
    (0..num_points)
        .map(|_| (rng.gen_range(0.0..size), rng.gen_range(0.0..size)))
        .collect()
}
