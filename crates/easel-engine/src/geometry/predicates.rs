use crate::coords::Vector2;

/// Inclusive range test.
#[inline]
pub fn between(n: f32, min: f32, max: f32) -> bool {
    n >= min && n <= max
}

#[inline]
pub fn clamp(n: f32, min: f32, max: f32) -> f32 {
    min.max(n.min(max))
}

/// Folds `n` back into `[min, max]` instead of saturating.
///
/// The range is treated as `max - min + 1` integer steps wide, so
/// `wrap_clamp(11.0, 0.0, 10.0) == 0.0` and `wrap_clamp(-1.0, 0.0, 10.0) == 10.0`.
pub fn wrap_clamp(n: f32, min: f32, max: f32) -> f32 {
    if between(n, min, max) {
        return n;
    }
    let span = max - min + 1.0;
    if span <= 0.0 || !n.is_finite() {
        return clamp(n, min, max);
    }
    min + (n - min).rem_euclid(span)
}

/// Maps `n` from `[min, max]` onto `[0, 1]` (unclamped).
#[inline]
pub fn normalize(n: f32, min: f32, max: f32) -> f32 {
    (n - min) / (max - min)
}

/// `x / y`, or `0` when the quotient is not finite.
#[inline]
pub fn safe_divide(x: f32, y: f32) -> f32 {
    let q = x / y;
    if q.is_finite() { q } else { 0.0 }
}

pub fn is_point_in_rectangle(point: Vector2, top_left: Vector2, width: f32, height: f32) -> bool {
    between(point.x, top_left.x, top_left.x + width) && between(point.y, top_left.y, top_left.y + height)
}

/// Closed disc test. A zero radius never contains anything.
pub fn is_point_in_circle(point: Vector2, center: Vector2, radius: f32) -> bool {
    if radius == 0.0 {
        return false;
    }
    let dx = center.x - point.x;
    let dy = center.y - point.y;
    dx * dx + dy * dy <= radius * radius
}

/// True when `pos` lies within `fault` pixels of the segment `a..b`
/// (measured as the detour through `pos` versus the segment length).
pub fn is_position_on_line(pos: Vector2, a: Vector2, b: Vector2, fault: f32) -> bool {
    let detour = pos.distance_to(a) + pos.distance_to(b);
    let length = a.distance_to(b);
    between(detour, length - fault, length + fault)
}

/// Proper intersection of segments `a1..a2` and `b1..b2`.
///
/// Parallel segments and touching endpoints do not count.
pub fn is_line_intersecting_line(a1: Vector2, a2: Vector2, b1: Vector2, b2: Vector2) -> bool {
    let det = (a2.x - a1.x) * (b2.y - b1.y) - (b2.x - b1.x) * (a2.y - a1.y);
    if det == 0.0 {
        return false;
    }
    let lambda = ((b2.y - b1.y) * (b2.x - a1.x) + (b1.x - b2.x) * (b2.y - a1.y)) / det;
    let gamma = ((a1.y - a2.y) * (b2.x - a1.x) + (a2.x - a1.x) * (b2.y - a1.y)) / det;
    (0.0 < lambda && lambda < 1.0) && (0.0 < gamma && gamma < 1.0)
}

/// Even-odd ray cast. The polygon is implicitly closed.
pub fn is_point_in_polygon(point: Vector2, polygon: &[Vector2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let x = pj.x + (point.y - pj.y) * (pi.x - pj.x) / (pi.y - pj.y);
            if point.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// True when any part of the segment lies inside the circle.
pub fn is_line_in_circle(segment: (Vector2, Vector2), center: Vector2, radius: f32) -> bool {
    let (a, b) = segment;
    if is_point_in_circle(a, center, radius) || is_point_in_circle(b, center, radius) {
        return true;
    }

    let d = b - a;
    let len2 = d.x * d.x + d.y * d.y;
    if len2 <= 0.0 {
        return false;
    }
    let to_center = center - a;
    let t = (to_center.x * d.x + to_center.y * d.y) / len2;
    if !(0.0..=1.0).contains(&t) {
        return false;
    }
    is_point_in_circle(a + d * t, center, radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vector2 { Vector2::new(x, y) }

    // ── scalar helpers ────────────────────────────────────────────────────

    #[test]
    fn between_is_inclusive() {
        assert!(between(1.0, 1.0, 2.0));
        assert!(between(2.0, 1.0, 2.0));
        assert!(!between(2.01, 1.0, 2.0));
    }

    #[test]
    fn wrap_clamp_folds_instead_of_saturating() {
        assert_eq!(wrap_clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(wrap_clamp(11.0, 0.0, 10.0), 0.0);
        assert_eq!(wrap_clamp(-1.0, 0.0, 10.0), 10.0);
        assert_eq!(wrap_clamp(25.0, 0.0, 10.0), 3.0);
    }

    #[test]
    fn safe_divide_zeroes_non_finite() {
        assert_eq!(safe_divide(1.0, 0.0), 0.0);
        assert_eq!(safe_divide(0.0, 0.0), 0.0);
        assert_eq!(safe_divide(6.0, 3.0), 2.0);
    }

    #[test]
    fn normalize_maps_range() {
        assert_eq!(normalize(5.0, 0.0, 10.0), 0.5);
        assert_eq!(normalize(15.0, 10.0, 20.0), 0.5);
    }

    // ── shapes ────────────────────────────────────────────────────────────

    #[test]
    fn circle_uses_squared_radius() {
        let c = v(0.0, 0.0);
        assert!(is_point_in_circle(v(3.0, 4.0), c, 5.0));
        assert!(!is_point_in_circle(v(3.0, 4.1), c, 5.0));
        // 9 > 4: an unsquared radius would reject this point.
        assert!(is_point_in_circle(v(3.0, 0.0), c, 4.0));
        assert!(!is_point_in_circle(c, c, 0.0));
    }

    #[test]
    fn rectangle_edges_count() {
        assert!(is_point_in_rectangle(v(10.0, 5.0), v(0.0, 0.0), 10.0, 5.0));
        assert!(!is_point_in_rectangle(v(-0.5, 1.0), v(0.0, 0.0), 10.0, 5.0));
    }

    #[test]
    fn crossing_segments_intersect() {
        assert!(is_line_intersecting_line(v(0.0, 0.0), v(10.0, 10.0), v(0.0, 10.0), v(10.0, 0.0)));
        assert!(!is_line_intersecting_line(v(0.0, 0.0), v(10.0, 0.0), v(0.0, 1.0), v(10.0, 1.0)));
        assert!(!is_line_intersecting_line(v(0.0, 0.0), v(1.0, 1.0), v(5.0, 0.0), v(5.0, 10.0)));
    }

    #[test]
    fn polygon_even_odd() {
        let square = [v(0.0, 0.0), v(10.0, 0.0), v(10.0, 10.0), v(0.0, 10.0)];
        assert!(is_point_in_polygon(v(5.0, 5.0), &square));
        assert!(!is_point_in_polygon(v(15.0, 5.0), &square));

        // concave "C": the notch is outside
        let c = [
            v(0.0, 0.0), v(10.0, 0.0), v(10.0, 3.0), v(3.0, 3.0),
            v(3.0, 7.0), v(10.0, 7.0), v(10.0, 10.0), v(0.0, 10.0),
        ];
        assert!(is_point_in_polygon(v(1.0, 5.0), &c));
        assert!(!is_point_in_polygon(v(6.0, 5.0), &c));
        assert!(!is_point_in_polygon(v(0.0, 0.0), &[v(0.0, 0.0), v(1.0, 1.0)]));
    }

    #[test]
    fn position_on_line_within_fault() {
        let (a, b) = (v(0.0, 0.0), v(10.0, 0.0));
        assert!(is_position_on_line(v(5.0, 0.0), a, b, 1.0));
        assert!(!is_position_on_line(v(5.0, 5.0), a, b, 1.0));
    }

    #[test]
    fn segment_through_circle() {
        let c = v(5.0, 0.0);
        assert!(is_line_in_circle((v(0.0, 0.5), v(10.0, 0.5)), c, 1.0));
        assert!(!is_line_in_circle((v(0.0, 2.0), v(10.0, 2.0)), c, 1.0));
        // closest point lies beyond the segment end
        assert!(!is_line_in_circle((v(0.0, 0.0), v(2.0, 0.0)), c, 1.0));
    }
}
