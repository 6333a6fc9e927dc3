use log::{debug, trace, warn};

use crate::config::IndexConfig;
use crate::error::Result;
use crate::mapper::{Bounds, GridRect};
use crate::morton::{deinterleave, interleave};
use crate::partition::{RangePartitioner, ZRange};
use crate::Point;

/// Everything a query computed on its way to the matches, as plain data for
/// overlays and diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryTrace {
    /// Query rectangle on the grid, clamped and normalized.
    pub rect: Option<GridRect>,
    /// `rect` grown to the block grid; this is what got partitioned.
    pub snapped: Option<GridRect>,
    /// Codes between the corners of `snapped`, before partitioning.
    pub hull: Option<ZRange>,
    /// Ascending, disjoint ranges that were scanned.
    pub ranges: Vec<ZRange>,
    /// Positions in the sorted code array, ascending.
    pub matches: Vec<usize>,
}

/// Static point set sorted along the Z-order curve.
///
/// `build` replaces the whole content; there is no incremental update.
#[derive(Debug, Clone, PartialEq)]
pub struct ZOrderIndex {
    config: IndexConfig,
    partitioner: RangePartitioner,
    bounds: Option<Bounds>,
    codes: Vec<u32>,
    order: Vec<usize>,
}

impl ZOrderIndex {
    pub fn new() -> Self {
        Self::from_valid_config(IndexConfig::default())
    }

    pub fn with_config(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: IndexConfig) -> Self {
        let partitioner = RangePartitioner::from_config(&config);
        ZOrderIndex {
            config,
            partitioner,
            bounds: None,
            codes: Vec::new(),
            order: Vec::new(),
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn reset(&mut self) {
        self.bounds = None;
        self.codes.clear();
        self.order.clear();
    }

    pub fn build(&mut self, points: &[Point]) {
        self.reset();
        let Some(bounds) = Bounds::from_points(points, self.config.min_extent) else {
            if !points.is_empty() {
                warn!("degenerate bounding box for {} points, index left empty", points.len());
            }
            return;
        };
        let mut entries: Vec<(u32, usize)> = points
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let (x, y) = bounds.discretize(p);
                (interleave(x, y), i)
            })
            .collect();
        // stable, so equal codes keep input order
        entries.sort_by_key(|&(z, _)| z);
        (self.codes, self.order) = entries.into_iter().unzip();
        self.bounds = Some(bounds);
        debug!("indexed {} points, bounds {:?}", self.codes.len(), bounds);
    }

    pub fn is_valid(&self) -> bool {
        self.bounds.is_some()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }

    /// The sorted code array that query positions refer to.
    pub fn codes(&self) -> &[u32] {
        &self.codes
    }

    /// Index in the `build` input of the point stored at `position`.
    pub fn original_index(&self, position: usize) -> Option<usize> {
        self.order.get(position).copied()
    }

    pub fn grid_position(&self, position: usize) -> Option<(u32, u32)> {
        self.codes.get(position).map(|&z| deinterleave(z))
    }

    /// Positions in [`codes`](Self::codes) of every point inside the rectangle
    /// spanned by `p0` and `p1`, ascending.
    ///
    /// Matching is exact at grid-cell resolution: a point just outside the
    /// real-valued rectangle but in one of its boundary cells is included.
    pub fn query(&self, p0: Point, p1: Point) -> Vec<usize> {
        self.query_traced(p0, p1).matches
    }

    pub fn query_traced(&self, p0: Point, p1: Point) -> QueryTrace {
        let Some(bounds) = self.bounds.as_ref().filter(|_| !self.codes.is_empty()) else {
            debug!("query on an empty or invalid index");
            return QueryTrace::default();
        };
        let rect = bounds.grid_rect(p0, p1);
        let snapped = rect.snapped(self.config.block_divisor);

        let mut ranges = self.partitioner.partition(snapped);
        ranges.sort_unstable();
        debug_assert!(!ranges.is_empty());
        debug_assert!(ranges.windows(2).all(|w| w[0].hi < w[1].lo));
        debug!("range count: {}", ranges.len());

        let matches = self.scan(&ranges, &rect);
        QueryTrace {
            rect: Some(rect),
            snapped: Some(snapped),
            hull: Some(ZRange::hull(&snapped)),
            ranges,
            matches,
        }
    }

    fn scan(&self, ranges: &[ZRange], rect: &GridRect) -> Vec<usize> {
        let mut matches = Vec::new();
        let Some(last) = ranges.last() else {
            return matches;
        };
        let end = self.codes.partition_point(|&z| z <= last.hi);
        let mut start = 0;
        for range in ranges {
            start += self.codes[start..end].partition_point(|&z| z < range.lo);
            while start < end && self.codes[start] <= range.hi {
                let (x, y) = deinterleave(self.codes[start]);
                if rect.contains(x, y) {
                    trace!("found: {}, {}", x, y);
                    matches.push(start);
                }
                start += 1;
            }
        }
        matches
    }
}

impl Default for ZOrderIndex {
    fn default() -> Self {
        Self::new()
    }
}
