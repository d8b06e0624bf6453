//! Moore-neighbor boundary following over a [`BinaryMask`].
//!
//! The mask is scanned row-major. Each unvisited border pixel starts a walk
//! that hugs the region boundary until it returns to the start pixel, runs
//! out of foreground neighbors, or steps onto a pixel an earlier contour
//! already claimed. Interior foreground pixels are marked visited when
//! scanned, so only boundary loops are ever traced.

use tracing::{debug, trace, warn};

use crate::VectorizeResult;
use crate::geometry::{Path, PathList, Point};
use crate::mask::{BinaryMask, pixel_count, reserve_plane};

/// Clockwise 8-neighborhood in image space: E, SE, S, SW, W, NW, N, NE.
pub const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Offset from the entry direction where the neighbor scan starts (two steps
/// counter-clockwise: turn left, then scan clockwise).
const SCAN_START_OFFSET: usize = 6;

const FREE: u8 = 0;
const CLAIMED: u8 = 1;
const WALKING: u8 = 2;

/// Pixels already assigned to a contour or known to be interior.
///
/// Pixels on the walk in progress are kept apart from claimed ones until
/// [`VisitedMask::claim_walk`] runs, so a walk can tell crossing itself from
/// merging into an earlier contour.
#[derive(Debug, Clone)]
pub struct VisitedMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl VisitedMask {
    pub fn new(width: u32, height: u32) -> VectorizeResult<Self> {
        let len = pixel_count(width, height)?;
        let mut data = reserve_plane(len)?;
        data.resize(len, FREE);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Mark `(x, y)`; coordinates outside the image are ignored.
    #[inline]
    pub fn mark(&mut self, x: i64, y: i64) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = CLAIMED;
        }
    }

    #[inline]
    pub fn is_marked(&self, x: i64, y: i64) -> bool {
        self.index(x, y).is_some_and(|i| self.data[i] != FREE)
    }

    /// Claimed by an earlier contour or the interior scan, not by the walk in progress.
    #[inline]
    pub fn is_claimed(&self, x: i64, y: i64) -> bool {
        self.index(x, y).is_some_and(|i| self.data[i] == CLAIMED)
    }

    #[inline]
    fn enter(&mut self, x: i64, y: i64) {
        if let Some(i) = self.index(x, y) {
            if self.data[i] == FREE {
                self.data[i] = WALKING;
            }
        }
    }

    /// Claim every pixel of a finished walk.
    fn claim_walk(&mut self, points: &[Point]) {
        for p in points {
            self.mark(p.x as i64, p.y as i64);
        }
    }

    pub fn marked_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != FREE).count()
    }
}

/// A foreground pixel with at least one background (or out-of-bounds) neighbor.
pub fn is_border(mask: &BinaryMask, x: i64, y: i64) -> bool {
    mask.is_foreground(x, y)
        && NEIGHBOR_OFFSETS
            .iter()
            .any(|&(dx, dy)| !mask.is_foreground(x + dx, y + dy))
}

/// Why a boundary walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkEnd {
    /// Came back to the start pixel.
    Returned,
    /// The start pixel has no foreground neighbor.
    Isolated,
    /// Stepped onto a pixel claimed before the walk began.
    Merged,
    /// Ran past the step limit without returning.
    CutOff,
}

impl WalkEnd {
    /// Whether the walk outlined a boundary loop of its own.
    pub fn is_loop(self) -> bool {
        matches!(self, WalkEnd::Returned | WalkEnd::Isolated)
    }
}

/// Follow the boundary starting at `(start_x, start_y)`.
///
/// Every pixel on the walk is claimed in `visited`, whatever the outcome.
/// Paths with more than two points are closed.
pub fn trace_contour(
    mask: &BinaryMask,
    visited: &mut VisitedMask,
    start_x: u32,
    start_y: u32,
) -> (Path, WalkEnd) {
    let start = (i64::from(start_x), i64::from(start_y));
    // No walk can take more distinct (pixel, direction) states than this.
    let max_points = (mask.width() as usize)
        .saturating_mul(mask.height() as usize)
        .saturating_mul(NEIGHBOR_OFFSETS.len());

    let mut points = Vec::new();
    let (mut x, mut y) = start;
    let mut dir = 0usize;

    let end = loop {
        points.push(Point::new(x as f64, y as f64));
        visited.enter(x, y);

        if points.len() >= max_points {
            warn!(
                start_x,
                start_y,
                points = points.len(),
                "contour walk did not return to its start; cutting it off"
            );
            break WalkEnd::CutOff;
        }

        let next = (0..NEIGHBOR_OFFSETS.len())
            .map(|i| (dir + SCAN_START_OFFSET + i) % NEIGHBOR_OFFSETS.len())
            .find(|&d| {
                let (dx, dy) = NEIGHBOR_OFFSETS[d];
                mask.is_foreground(x + dx, y + dy)
            });

        let Some(d) = next else {
            break WalkEnd::Isolated;
        };
        let (dx, dy) = NEIGHBOR_OFFSETS[d];
        x += dx;
        y += dy;
        dir = d;

        if (x, y) == start {
            break WalkEnd::Returned;
        }
        if visited.is_claimed(x, y) {
            break WalkEnd::Merged;
        }
    };

    visited.claim_walk(&points);
    let closed = points.len() > 2;
    (Path::new(points, closed), end)
}

/// Extract one path per boundary loop, dropping contours with fewer than
/// `min_size` points.
///
/// Walks that run into an earlier contour (hole edges, inner staircase
/// corners) claim their pixels but produce no path.
pub fn extract_contours(mask: &BinaryMask, min_size: usize) -> VectorizeResult<PathList> {
    let (width, height) = mask.dimensions();
    let mut visited = VisitedMask::new(width, height)?;
    let mut contours = PathList::new();
    let mut discarded = 0usize;
    let mut dropped = 0usize;

    for y in 0..height {
        for x in 0..width {
            let (xi, yi) = (i64::from(x), i64::from(y));
            if !mask.is_foreground(xi, yi) || visited.is_marked(xi, yi) {
                continue;
            }

            if !is_border(mask, xi, yi) {
                visited.mark(xi, yi);
                continue;
            }

            let (contour, end) = trace_contour(mask, &mut visited, x, y);
            if !end.is_loop() {
                trace!(x, y, ?end, points = contour.len(), "walk dropped");
                dropped += 1;
            } else if contour.len() >= min_size {
                trace!(x, y, points = contour.len(), "contour traced");
                contours.push(contour);
            } else {
                discarded += 1;
            }
        }
    }

    debug!(
        contours = contours.len(),
        discarded,
        dropped,
        visited = visited.marked_count(),
        "contour extraction finished"
    );
    Ok(contours)
}
