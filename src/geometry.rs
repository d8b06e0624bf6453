//! Points and paths in image-pixel space (origin top-left, y down).

/// A 2D coordinate in image-pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Squared chord lengths below this are treated as a single point.
const DEGENERATE_SEGMENT_EPS: f64 = 1e-10;

/// Distance from `p` to the segment `a`-`b`.
///
/// The projection parameter is clamped to `[0, 1]`, so points beyond either end
/// measure to the nearest endpoint. A zero-length segment falls back to the
/// distance between `p` and `a`.
pub fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len2 = dx * dx + dy * dy;
    if len2 < DEGENERATE_SEGMENT_EPS {
        return p.distance(a);
    }

    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}

/// An ordered point sequence, optionally closed back to its first point.
///
/// A closed path always has at least three points; constructing one with fewer
/// yields an open path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    points: Vec<Point>,
    closed: bool,
}

impl Path {
    pub fn new(points: Vec<Point>, closed: bool) -> Self {
        let closed = closed && points.len() >= 3;
        Self { points, closed }
    }

    /// Build an open path.
    pub fn open(points: Vec<Point>) -> Self {
        Self::new(points, false)
    }

    /// Build a path closed back to its first point (if it has enough points).
    pub fn closed(points: Vec<Point>) -> Self {
        Self::new(points, true)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }
}

/// All contours extracted from one image, in discovery order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathList {
    paths: Vec<Path>,
}

impl PathList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: Path) {
        self.paths.push(path);
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.paths.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Path> {
        self.paths.iter()
    }

    /// Total number of points across every path.
    pub fn point_count(&self) -> usize {
        self.paths.iter().map(Path::len).sum()
    }

    /// Replace every path with `f(path)`, keeping each path in its slot.
    pub fn replace_each<F>(&mut self, mut f: F)
    where
        F: FnMut(&Path) -> Path,
    {
        for slot in &mut self.paths {
            *slot = f(slot);
        }
    }
}

impl From<Vec<Path>> for PathList {
    fn from(paths: Vec<Path>) -> Self {
        Self { paths }
    }
}

impl<'a> IntoIterator for &'a PathList {
    type Item = &'a Path;
    type IntoIter = std::slice::Iter<'a, Path>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

impl IntoIterator for PathList {
    type Item = Path;
    type IntoIter = std::vec::IntoIter<Path>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}
