//! Polygon and segment queries shared by the collision engine
//!
//! Pure functions, no state. Polygons are closed loops: edge `i` joins
//! vertex `i` to vertex `(i + 1) % n`.

use glam::Vec2;

/// Nearest-edge query result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeContact {
    /// Index of the edge's start vertex
    pub edge: usize,
    /// Closest point on the edge
    pub point: Vec2,
    /// Distance from the query point to `point`
    pub distance: f32,
    /// Unit edge normal, `perp(end - start)`; zero for a degenerate edge.
    /// For vertices ordered by increasing angle this faces into the polygon.
    pub normal: Vec2,
}

/// Ray-crossing point-in-polygon test
///
/// Horizontal edges never count as a crossing and vertex ties use the
/// half-open interval `min < y <= max`. Points exactly on an edge may go
/// either way.
pub fn point_in_polygon(point: Vec2, vertices: &[Vec2]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut p1 = vertices[0];
    for i in 1..=n {
        let p2 = vertices[i % n];
        if point.y > p1.y.min(p2.y) && point.y <= p1.y.max(p2.y) && point.x <= p1.x.max(p2.x) {
            // p1.y != p2.y is implied by the strict lower bound
            let x_intersect = (point.y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y) + p1.x;
            if p1.x == p2.x || point.x <= x_intersect {
                inside = !inside;
            }
        }
        p1 = p2;
    }
    inside
}

/// Closest point to `point` on the segment `start..end`
///
/// A zero-length segment returns `start`.
pub fn closest_point_on_segment(point: Vec2, start: Vec2, end: Vec2) -> Vec2 {
    let line_vec = end - start;
    let line_len_sq = line_vec.length_squared();
    if line_len_sq == 0.0 {
        return start;
    }

    let t = ((point - start).dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
    start + line_vec * t
}

/// Rotate 90° counter-clockwise (in y-up coordinates)
#[inline]
pub fn perp(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n, `normal` must be unit length
#[inline]
pub fn reflect(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Iterate the closed loop of edges as (start, end) pairs
pub fn edges(vertices: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    let n = vertices.len();
    (0..n).map(move |i| (vertices[i], vertices[(i + 1) % n]))
}

/// Find the edge closest to `point`
///
/// Ties keep the lowest edge index. Returns `None` for an empty polygon.
pub fn nearest_edge(point: Vec2, vertices: &[Vec2]) -> Option<EdgeContact> {
    let mut best: Option<EdgeContact> = None;

    for (i, (start, end)) in edges(vertices).enumerate() {
        let closest = closest_point_on_segment(point, start, end);
        let distance = (point - closest).length();

        if best.is_none_or(|b| distance < b.distance) {
            best = Some(EdgeContact {
                edge: i,
                point: closest,
                distance,
                normal: perp(end - start).normalize_or_zero(),
            });
        }
    }

    best
}

/// Whether `point` is closer than `distance` to any edge
pub fn within_distance_of_edges(point: Vec2, vertices: &[Vec2], distance: f32) -> bool {
    edges(vertices).any(|(start, end)| {
        let closest = closest_point_on_segment(point, start, end);
        (point - closest).length() < distance
    })
}
