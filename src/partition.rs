//! Decomposition of a grid rectangle into Z-order code ranges (BIGMIN/LITMAX splitting).

use crate::config::IndexConfig;
use crate::error::{Error, Result};
use crate::mapper::{GridRect, GRID_MAX};
use crate::morton::{deinterleave, highest_bit_position, interleave};

/// Inclusive interval of Morton codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZRange {
    pub lo: u32,
    pub hi: u32,
}

impl ZRange {
    pub fn new(lo: u32, hi: u32) -> Self {
        debug_assert!(lo <= hi);
        Self { lo, hi }
    }

    /// Code hull of a rectangle: the codes of its lower-left and upper-right cells.
    pub fn hull(rect: &GridRect) -> Self {
        Self::new(interleave(rect.xmin, rect.ymin), interleave(rect.xmax, rect.ymax))
    }

    pub fn len(&self) -> u64 {
        (self.hi - self.lo) as u64 + 1
    }

    pub fn contains(&self, z: u32) -> bool {
        z >= self.lo && z <= self.hi
    }

    /// Grid cells visited by the range, in curve order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> {
        (self.lo..=self.hi).map(deinterleave)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangePartitioner {
    waste_factor: f64,
    waste_slack: u64,
}

impl Default for RangePartitioner {
    fn default() -> Self {
        Self::from_config(&IndexConfig::default())
    }
}

impl RangePartitioner {
    /// Fails unless `waste_factor` is finite and at least 1.0; below that even a
    /// single cell would exceed its own bound.
    pub fn new(waste_factor: f64, waste_slack: u64) -> Result<Self> {
        if !waste_factor.is_finite() || waste_factor < 1.0 {
            return Err(Error::InvalidConfig {
                field: "waste_factor",
                reason: "must be finite and at least 1.0",
            });
        }
        Ok(Self { waste_factor, waste_slack })
    }

    /// `config` must already be validated.
    pub(crate) fn from_config(config: &IndexConfig) -> Self {
        Self {
            waste_factor: config.waste_factor,
            waste_slack: config.waste_slack,
        }
    }

    pub fn partition(&self, rect: GridRect) -> Vec<ZRange> {
        let mut ranges = Vec::new();
        self.partition_into(rect, &mut ranges);
        ranges
    }

    /// Appends to `ranges` the code ranges covering every cell of `rect`.
    ///
    /// Ranges come out ascending and disjoint. Each one may also contain codes
    /// outside `rect`, but never more than the waste bound allows.
    pub fn partition_into(&self, rect: GridRect, ranges: &mut Vec<ZRange>) {
        // Each split pushes two halves and the depth is at most 32.
        let mut stack = Vec::with_capacity(34);
        stack.push(rect);
        while let Some(r) = stack.pop() {
            debug_assert!(r.xmin <= r.xmax && r.ymin <= r.ymax);
            let hull = ZRange::hull(&r);
            if hull.lo == hull.hi || hull.len() <= self.waste_bound(r.area()) {
                ranges.push(hull);
                continue;
            }
            let (litmax, bigmin) = split(&r, hull);
            // LITMAX holds the lower codes, so it has to be popped first
            stack.push(bigmin);
            stack.push(litmax);
        }
    }

    fn waste_bound(&self, area: u64) -> u64 {
        (area as f64 * self.waste_factor) as u64 + self.waste_slack
    }
}

/// Cuts `r` at the most significant bit where its corner codes differ.
///
/// Every cell of `r` shares the code bits above that position, so the half
/// with a 0 there (LITMAX side) sorts entirely before the other (BIGMIN side).
fn split(r: &GridRect, hull: ZRange) -> (GridRect, GridRect) {
    let bit = highest_bit_position(hull.lo ^ hull.hi);
    let level = bit >> 1;
    let diffmask = GRID_MAX >> (15 - level);
    if bit & 1 == 1 {
        let litmax_y = (r.ymin & !diffmask) | (diffmask >> 1);
        (
            GridRect::new(r.xmin, r.ymin, r.xmax, litmax_y),
            GridRect::new(r.xmin, litmax_y + 1, r.xmax, r.ymax),
        )
    } else {
        let litmax_x = (r.xmin & !diffmask) | (diffmask >> 1);
        (
            GridRect::new(r.xmin, r.ymin, litmax_x, r.ymax),
            GridRect::new(litmax_x + 1, r.ymin, r.xmax, r.ymax),
        )
    }
}
