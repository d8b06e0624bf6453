//! Douglas-Peucker polyline simplification.

use crate::geometry::{Path, PathList, Point, point_segment_distance};

/// Simplify `path` so that no dropped point lies farther than `tolerance`
/// pixels from the kept polyline.
///
/// First and last points are always kept and the closed flag carries over
/// (a closed path reduced below three points becomes open). A tolerance of
/// zero, a negative or NaN tolerance, or a path with fewer than three points
/// returns the path unchanged.
pub fn simplify_path(path: &Path, tolerance: f64) -> Path {
    // `!(t > 0)` also catches NaN.
    if !(tolerance > 0.0) || path.len() < 3 {
        return path.clone();
    }

    let points = path.points();
    let keep = keep_mask(points, tolerance);
    let simplified: Vec<Point> = points
        .iter()
        .zip(&keep)
        .filter_map(|(p, &k)| k.then_some(*p))
        .collect();
    Path::new(simplified, path.is_closed())
}

/// Flags the points Douglas-Peucker keeps. `points` must not be empty.
fn keep_mask(points: &[Point], tolerance: f64) -> Vec<bool> {
    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;
    mark_kept(points, 0, last, tolerance, &mut keep);
    keep
}

/// Simplify every path of `paths` in place.
pub fn simplify_paths(paths: &mut PathList, tolerance: f64) {
    if !(tolerance > 0.0) {
        return;
    }
    paths.replace_each(|path| simplify_path(path, tolerance));
}

/// Keep the farthest point of `points[start..=end]` from the chord if it
/// exceeds `tolerance`, then recurse on both halves.
fn mark_kept(points: &[Point], start: usize, end: usize, tolerance: f64, keep: &mut [bool]) {
    if end <= start + 1 {
        return;
    }

    let (a, b) = (points[start], points[end]);
    let mut max_dist = 0.0;
    let mut max_idx = start;
    for (i, &p) in points.iter().enumerate().take(end).skip(start + 1) {
        let dist = point_segment_distance(p, a, b);
        if dist > max_dist {
            max_dist = dist;
            max_idx = i;
        }
    }

    if max_dist > tolerance {
        keep[max_idx] = true;
        mark_kept(points, start, max_idx, tolerance, keep);
        mark_kept(points, max_idx, end, tolerance, keep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_from(coords: &[(f64, f64)], closed: bool) -> Path {
        Path::new(
            coords.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            closed,
        )
    }

    mod simplify_path {
        use super::*;

        mod unit {
            use super::*;

            #[test]
            fn straight_line_collapses_to_endpoints() {
                let line = path_from(
                    &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0)],
                    false,
                );
                let out = simplify_path(&line, 0.1);
                assert_eq!(out.points(), &[Point::new(0.0, 0.0), Point::new(4.0, 0.0)]);
                assert!(!out.is_closed());
            }

            #[test]
            fn zero_tolerance_passes_through() {
                let line = path_from(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)], false);
                assert_eq!(simplify_path(&line, 0.0), line);
                assert_eq!(simplify_path(&line, -1.0), line);
                assert_eq!(simplify_path(&line, f64::NAN), line);
            }

            #[test]
            fn short_paths_pass_through() {
                let two = path_from(&[(0.0, 0.0), (9.0, 9.0)], false);
                assert_eq!(simplify_path(&two, 5.0), two);
            }

            #[test]
            fn square_contour_keeps_its_corners() {
                let square = path_from(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)], true);
                let out = simplify_path(&square, 0.5);
                assert_eq!(out, square);
                assert!(out.is_closed());
            }

            #[test]
            fn keeps_sharp_corner() {
                let corner = path_from(
                    &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 1.0), (2.0, 2.0)],
                    false,
                );
                let out = simplify_path(&corner, 0.5);
                assert_eq!(
                    out.points(),
                    &[
                        Point::new(0.0, 0.0),
                        Point::new(2.0, 0.0),
                        Point::new(2.0, 2.0)
                    ]
                );
            }

            #[test]
            fn small_wiggles_are_removed() {
                let wiggly = path_from(
                    &[(0.0, 0.0), (1.0, 0.2), (2.0, -0.2), (3.0, 0.1), (4.0, 0.0)],
                    false,
                );
                let out = simplify_path(&wiggly, 0.5);
                assert_eq!(out.len(), 2);
            }

            #[test]
            fn closed_path_reduced_below_three_points_opens() {
                // Out-and-back walk: every interior point lies on the chord.
                let walk = path_from(&[(1.0, 1.0), (2.0, 1.0), (3.0, 1.0), (2.0, 1.0)], true);
                assert!(walk.is_closed());
                let out = simplify_path(&walk, 5.0);
                assert_eq!(out.len(), 2);
                assert!(!out.is_closed());
            }
        }

        mod prop {
            use super::*;
            use proptest::prelude::*;

            fn arb_path() -> impl Strategy<Value = Path> {
                (
                    proptest::collection::vec((-50i32..50, -50i32..50), 0..40),
                    proptest::bool::ANY,
                )
                    .prop_map(|(coords, closed)| {
                        Path::new(
                            coords
                                .into_iter()
                                .map(|(x, y)| Point::new(f64::from(x), f64::from(y)))
                                .collect(),
                            closed,
                        )
                    })
            }

            proptest! {
                /// simplify_path: applying it twice gives the same result as once
                #[test]
                fn idempotent(path in arb_path(), tolerance in 0.0f64..10.0) {
                    let once = simplify_path(&path, tolerance);
                    let twice = simplify_path(&once, tolerance);
                    prop_assert_eq!(once, twice);
                }

                /// simplify_path: endpoints survive unchanged and points keep their order
                #[test]
                fn keeps_endpoints_in_order(path in arb_path(), tolerance in 0.0f64..10.0) {
                    let out = simplify_path(&path, tolerance);
                    prop_assert_eq!(out.first(), path.first());
                    prop_assert_eq!(out.last(), path.last());
                    prop_assert!(out.len() <= path.len());

                    let mut source = path.points().iter();
                    for p in out.points() {
                        prop_assert!(source.any(|q| q == p));
                    }
                    if out.is_closed() {
                        prop_assert!(out.len() >= 3);
                    }
                }

                /// simplify_path: each dropped point is within tolerance of the segment that replaced it
                #[test]
                fn dropped_points_within_tolerance(path in arb_path(), tolerance in 0.01f64..10.0) {
                    let points = path.points();
                    if points.len() < 3 {
                        return Ok(());
                    }
                    let kept: Vec<usize> = keep_mask(points, tolerance)
                        .iter()
                        .enumerate()
                        .filter_map(|(i, &k)| k.then_some(i))
                        .collect();
                    prop_assert_eq!(kept.len(), simplify_path(&path, tolerance).len());

                    for pair in kept.windows(2) {
                        let (a, b) = (points[pair[0]], points[pair[1]]);
                        for &p in &points[pair[0] + 1..pair[1]] {
                            prop_assert!(point_segment_distance(p, a, b) <= tolerance + 1e-9);
                        }
                    }
                }
            }
        }
    }

    mod simplify_paths {
        use super::*;

        #[test]
        fn replaces_each_slot() {
            let mut list = PathList::from(vec![
                path_from(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)], false),
                path_from(&[(0.0, 0.0), (5.0, 5.0), (10.0, 0.0)], false),
            ]);
            simplify_paths(&mut list, 1.0);
            assert_eq!(list.get(0).map(Path::len), Some(2));
            assert_eq!(list.get(1).map(Path::len), Some(3));
        }

        #[test]
        fn disabled_tolerance_leaves_list_alone() {
            let original = PathList::from(vec![path_from(
                &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)],
                false,
            )]);
            let mut list = original.clone();
            simplify_paths(&mut list, 0.0);
            assert_eq!(list, original);
        }
    }
}
