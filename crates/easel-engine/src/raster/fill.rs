use crate::coords::Vector2;

const SUBSAMPLES: usize = 4;

struct Edge {
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    winding: i32,
}

/// Non-zero winding scanline fill with vertical supersampling and exact
/// horizontal span coverage.
///
/// Every polygon is implicitly closed. `emit` is called once per touched row
/// with `(y, x_start, coverage)` where `coverage[i]` in `[0, 1]` belongs to
/// pixel `x_start + i`.
pub fn fill_polygons<'p>(
    polygons: impl IntoIterator<Item = &'p [Vector2]>,
    width: usize,
    height: usize,
    mut emit: impl FnMut(usize, usize, &[f32]),
) {
    let mut edges = Vec::new();
    let (mut min_y, mut max_y) = (f32::INFINITY, f32::NEG_INFINITY);
    let (mut min_x, mut max_x) = (f32::INFINITY, f32::NEG_INFINITY);

    for poly in polygons {
        if poly.len() < 2 {
            continue;
        }
        for i in 0..poly.len() {
            let a = poly[i];
            let b = poly[(i + 1) % poly.len()];
            if !a.is_finite() || !b.is_finite() || a.y == b.y {
                continue;
            }
            let (top, bottom, winding) = if a.y < b.y { (a, b, 1) } else { (b, a, -1) };
            edges.push(Edge { x0: top.x, y0: top.y, x1: bottom.x, y1: bottom.y, winding });
            min_y = min_y.min(top.y);
            max_y = max_y.max(bottom.y);
            min_x = min_x.min(a.x.min(b.x));
            max_x = max_x.max(a.x.max(b.x));
        }
    }
    if edges.is_empty() || width == 0 || height == 0 {
        return;
    }

    let row_start = min_y.floor().max(0.0) as usize;
    let row_end = (max_y.ceil().max(0.0) as usize).min(height);
    let col_start = min_x.floor().max(0.0) as usize;
    let col_end = (max_x.ceil().max(0.0) as usize).min(width);
    if row_start >= row_end || col_start >= col_end {
        return;
    }

    let mut coverage = vec![0.0f32; col_end - col_start];
    let mut crossings: Vec<(f32, i32)> = Vec::new();
    let weight = 1.0 / SUBSAMPLES as f32;

    for y in row_start..row_end {
        coverage.iter_mut().for_each(|c| *c = 0.0);
        let mut touched = false;

        for s in 0..SUBSAMPLES {
            let sy = y as f32 + (s as f32 + 0.5) * weight;
            crossings.clear();
            for e in &edges {
                if sy >= e.y0 && sy < e.y1 {
                    let t = (sy - e.y0) / (e.y1 - e.y0);
                    crossings.push((e.x0 + (e.x1 - e.x0) * t, e.winding));
                }
            }
            if crossings.is_empty() {
                continue;
            }
            crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut winding = 0;
            for pair in crossings.windows(2) {
                winding += pair[0].1;
                if winding != 0 {
                    touched |= add_span(&mut coverage, col_start, pair[0].0, pair[1].0, weight);
                }
            }
        }

        if touched {
            emit(y, col_start, &coverage);
        }
    }
}

/// Adds `weight` times the horizontal overlap of `[xa, xb)` with each pixel.
fn add_span(coverage: &mut [f32], origin: usize, xa: f32, xb: f32, weight: f32) -> bool {
    let lo = origin as f32;
    let hi = (origin + coverage.len()) as f32;
    let xa = xa.max(lo);
    let xb = xb.min(hi);
    if xb <= xa {
        return false;
    }

    let first = xa.floor() as usize;
    let last = (xb.ceil() as usize).min(origin + coverage.len());
    for px in first..last {
        let left = (px as f32).max(xa);
        let right = ((px + 1) as f32).min(xb);
        if right > left {
            coverage[px - origin] += (right - left) * weight;
        }
    }
    true
}
