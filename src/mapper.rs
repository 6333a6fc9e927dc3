use crate::Point;

/// Largest grid coordinate; the grid is 16 bits wide on each axis.
pub const GRID_MAX: u32 = 0xffff;

/// Bounding box of an indexed point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
    pub size: Point,
}

impl Bounds {
    /// Component-wise bounding box of `points`.
    ///
    /// Returns `None` for an empty set or when either extent is at most `min_extent`,
    /// as such a box has no usable mapping onto the grid.
    pub fn from_points(points: &[Point], min_extent: f32) -> Option<Self> {
        let (&first, rest) = points.split_first()?;
        let (min, max) = rest.iter().fold((first, first), |(min, max), p| {
            ((min.0.min(p.0), min.1.min(p.1)), (max.0.max(p.0), max.1.max(p.1)))
        });
        let size = (max.0 - min.0, max.1 - min.1);
        if size.0.abs() <= min_extent || size.1.abs() <= min_extent {
            return None;
        }
        Some(Self { min, max, size })
    }

    pub fn clamp(&self, p: Point) -> Point {
        (p.0.clamp(self.min.0, self.max.0), p.1.clamp(self.min.1, self.max.1))
    }

    fn discretize_axis(v: f32, min: f32, size: f32) -> u32 {
        // `as` saturates, so anything left of `min` lands on 0
        let cell = (((v - min) / size) * GRID_MAX as f32).floor() as u32;
        cell.min(GRID_MAX)
    }

    /// Grid cell of a point inside the box.
    pub fn discretize(&self, p: Point) -> (u32, u32) {
        (
            Self::discretize_axis(p.0, self.min.0, self.size.0),
            Self::discretize_axis(p.1, self.min.1, self.size.1),
        )
    }

    /// Grid rectangle spanned by two arbitrary corners, clamped into the box.
    pub fn grid_rect(&self, p0: Point, p1: Point) -> GridRect {
        let a = self.discretize(self.clamp(p0));
        let b = self.discretize(self.clamp(p1));
        GridRect::from_corners(a, b)
    }
}

/// Inclusive rectangle of grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridRect {
    pub xmin: u32,
    pub ymin: u32,
    pub xmax: u32,
    pub ymax: u32,
}

impl GridRect {
    pub fn new(xmin: u32, ymin: u32, xmax: u32, ymax: u32) -> Self {
        debug_assert!(xmin <= xmax && ymin <= ymax);
        Self { xmin, ymin, xmax, ymax }
    }

    pub fn from_corners(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::new(a.0.min(b.0), a.1.min(b.1), a.0.max(b.0), a.1.max(b.1))
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.xmin && x <= self.xmax && y >= self.ymin && y <= self.ymax
    }

    /// Number of cells covered.
    pub fn area(&self) -> u64 {
        (self.xmax - self.xmin + 1) as u64 * (self.ymax - self.ymin + 1) as u64
    }

    /// Grows the rectangle outward to a power-of-two block grid whose block
    /// size is the smallest power of two `>= max(width, height) / divisor`
    /// (the quotient rounded up).
    pub fn snapped(&self, divisor: u32) -> Self {
        let extent = (self.xmax - self.xmin).max(self.ymax - self.ymin);
        let block = extent.div_ceil(divisor.max(1)).next_power_of_two();
        let low = !(block - 1);
        let high = block - 1;
        Self {
            xmin: self.xmin & low,
            ymin: self.ymin & low,
            xmax: (self.xmax | high).min(GRID_MAX),
            ymax: (self.ymax | high).min(GRID_MAX),
        }
    }
}
