//! Delaunay triangulation of the observation scatter.
//!
//! Bowyer-Watson incremental insertion over a super-triangle. Inputs are
//! small (tens of stations per slice), so the quadratic cavity search is
//! fine. Coordinates are shifted to the scatter midpoint before any
//! predicate runs, which keeps the determinants well conditioned for
//! field-scale extents at continental longitudes.

/// A 2-D point (lon/lat degrees in practice).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Vertex indices into the input slice, counter-clockwise.
pub type Triangle = [usize; 3];

/// Triangulate a point scatter.
///
/// Returns an empty list for fewer than three points or a fully collinear
/// scatter; callers treat that as "no interpolated surface". Duplicate
/// points do not panic, they just produce degenerate candidates that are
/// filtered with the slivers.
pub fn triangulate(points: &[Point]) -> Vec<Triangle> {
    if points.len() < 3 {
        return Vec::new();
    }

    let (min_x, min_y, max_x, max_y) = scatter_bounds(points);
    let dmax = (max_x - min_x).max(max_y - min_y).max(1e-12);
    let mid_x = (min_x + max_x) / 2.0;
    let mid_y = (min_y + max_y) / 2.0;

    // Working vertices, shifted to the midpoint; the three super-triangle
    // vertices go at the end so input indices stay valid.
    let mut verts: Vec<Point> = points
        .iter()
        .map(|p| Point::new(p.x - mid_x, p.y - mid_y))
        .collect();
    let super_base = verts.len();
    verts.push(Point::new(-20.0 * dmax, -dmax));
    verts.push(Point::new(0.0, 20.0 * dmax));
    verts.push(Point::new(20.0 * dmax, -dmax));

    let mut triangles: Vec<Triangle> =
        vec![oriented(&verts, [super_base, super_base + 1, super_base + 2])];

    for p in 0..points.len() {
        // Triangles whose circumcircle strictly contains the new point.
        let mut bad: Vec<usize> = Vec::new();
        for (i, tri) in triangles.iter().enumerate() {
            if in_circumcircle(&verts, *tri, verts[p]) {
                bad.push(i);
            }
        }

        // The cavity boundary: edges that belong to exactly one bad triangle.
        let mut edge_counts: Vec<((usize, usize), usize)> = Vec::new();
        for &i in &bad {
            let [a, b, c] = triangles[i];
            for edge in [(a, b), (b, c), (c, a)] {
                let key = if edge.0 < edge.1 {
                    edge
                } else {
                    (edge.1, edge.0)
                };
                match edge_counts.iter_mut().find(|(e, _)| *e == key) {
                    Some((_, n)) => *n += 1,
                    None => edge_counts.push((key, 1)),
                }
            }
        }

        // Remove in descending index order so earlier indices stay valid.
        for &i in bad.iter().rev() {
            triangles.swap_remove(i);
        }

        // Re-triangulate the cavity around the new point.
        for ((a, b), count) in edge_counts {
            if count == 1 {
                triangles.push(oriented(&verts, [a, b, p]));
            }
        }
    }

    // Strip everything touching the super-triangle, then the slivers a
    // collinear or duplicated input leaves behind.
    let area_floor = dmax * dmax * 1e-12;
    triangles
        .into_iter()
        .filter(|t| t.iter().all(|&v| v < super_base))
        .filter(|t| signed_area2(&verts, *t).abs() > area_floor)
        .collect()
}

fn scatter_bounds(points: &[Point]) -> (f64, f64, f64, f64) {
    let mut b = (points[0].x, points[0].y, points[0].x, points[0].y);
    for p in &points[1..] {
        b.0 = b.0.min(p.x);
        b.1 = b.1.min(p.y);
        b.2 = b.2.max(p.x);
        b.3 = b.3.max(p.y);
    }
    b
}

/// Twice the signed area; positive for counter-clockwise vertices.
fn signed_area2(verts: &[Point], [a, b, c]: Triangle) -> f64 {
    let (pa, pb, pc) = (verts[a], verts[b], verts[c]);
    (pb.x - pa.x) * (pc.y - pa.y) - (pb.y - pa.y) * (pc.x - pa.x)
}

/// Reorder vertices counter-clockwise.
fn oriented(verts: &[Point], tri: Triangle) -> Triangle {
    if signed_area2(verts, tri) < 0.0 {
        [tri[0], tri[2], tri[1]]
    } else {
        tri
    }
}

/// Strict circumcircle containment test for a counter-clockwise triangle.
fn in_circumcircle(verts: &[Point], [a, b, c]: Triangle, p: Point) -> bool {
    let (pa, pb, pc) = (verts[a], verts[b], verts[c]);

    let ax = pa.x - p.x;
    let ay = pa.y - p.y;
    let bx = pb.x - p.x;
    let by = pb.y - p.y;
    let cx = pc.x - p.x;
    let cy = pc.y - p.y;

    let det = (ax * ax + ay * ay) * (bx * cy - by * cx)
        - (bx * bx + by * by) * (ax * cy - ay * cx)
        + (cx * cx + cy * cy) * (ax * by - ay * bx);

    det > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_triangle() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(1.0, 2.0),
        ];
        let triangles = triangulate(&points);
        assert_eq!(triangles.len(), 1);

        let mut verts = triangles[0].to_vec();
        verts.sort_unstable();
        assert_eq!(verts, vec![0, 1, 2]);
    }

    #[test]
    fn test_too_few_points() {
        assert!(triangulate(&[]).is_empty());
        assert!(triangulate(&[Point::new(1.0, 1.0)]).is_empty());
        assert!(triangulate(&[Point::new(1.0, 1.0), Point::new(2.0, 2.0)]).is_empty());
    }

    #[test]
    fn test_collinear_points_yield_nothing() {
        let points: Vec<Point> = (0..5).map(|i| Point::new(i as f64, 2.0 * i as f64)).collect();
        assert!(triangulate(&points).is_empty());
    }

    #[test]
    fn test_square_splits_into_two() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        let triangles = triangulate(&points);
        assert_eq!(triangles.len(), 2);
        for tri in &triangles {
            assert!(tri.iter().all(|&v| v < 4));
            assert!(signed_area2(&points, *tri) > 0.0);
        }
    }

    #[test]
    fn test_interior_point_count() {
        // n = 4 points, 3 on the hull: a triangulation has 2n - 2 - h = 3
        // triangles.
        let points = [
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(1.0, 2.0),
            Point::new(0.9, 0.7),
        ];
        let triangles = triangulate(&points);
        assert_eq!(triangles.len(), 3);
    }

    #[test]
    fn test_empty_circumcircle_property() {
        let points = [
            Point::new(-76.55, 3.40),
            Point::new(-76.50, 3.41),
            Point::new(-76.52, 3.46),
            Point::new(-76.48, 3.45),
            Point::new(-76.53, 3.43),
            Point::new(-76.47, 3.39),
        ];
        let triangles = triangulate(&points);
        assert!(!triangles.is_empty());

        for tri in &triangles {
            for (i, p) in points.iter().enumerate() {
                if tri.contains(&i) {
                    continue;
                }
                assert!(
                    !in_circumcircle(&points, *tri, *p),
                    "point {i} sits inside the circumcircle of {tri:?}"
                );
            }
        }
    }

    #[test]
    fn test_duplicate_points_do_not_panic() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ];
        let triangles = triangulate(&points);
        // One real triangle survives the sliver filter.
        assert!(!triangles.is_empty());
        for tri in &triangles {
            assert!(signed_area2(&points, *tri).abs() > 0.0);
        }
    }
}
