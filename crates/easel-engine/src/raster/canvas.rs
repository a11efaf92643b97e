use core::f32::consts::TAU;

use crate::coords::{Dimension2, Rect, Vector2};
use crate::draw::{DrawState, PaintSurface};
use crate::paint::{Color, ImageData};

use super::affine::Affine;
use super::fill::fill_polygons;
use super::path::PathBuilder;

/// Software raster surface over an RGBA8 premultiplied-alpha framebuffer.
///
/// Blending is source-over. Fills use the non-zero rule; strokes are built
/// from one quad per segment plus round joins, filled as a single non-zero
/// shape so overlaps do not double up.
#[derive(Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    state: DrawState,
    stack: Vec<DrawState>,
    path: PathBuilder,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
            state: DrawState::default(),
            stack: Vec::new(),
            path: PathBuilder::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA8, row-major, no padding.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x as usize, y as usize);
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]])
    }

    /// Reallocates the framebuffer. Contents and state are reset.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        *self = Canvas::new(width, height);
    }

    /// Clears every pixel to transparent, ignoring the transform.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        (y * self.width as usize + x) * 4
    }

    fn transform(&mut self, m: Affine) {
        self.state.transform = self.state.transform * m;
    }

    fn blend_row(&mut self, y: usize, x0: usize, coverage: &[f32], src: [f32; 4]) {
        let w = self.width as usize;
        for (i, c) in coverage.iter().enumerate() {
            let x = x0 + i;
            if x >= w {
                break;
            }
            let c = c.min(1.0);
            if c <= 0.0 {
                continue;
            }
            let idx = self.index(x, y);
            blend_pixel(&mut self.pixels[idx..idx + 4], src.map(|s| s * c));
        }
    }

    fn paint_polygons(&mut self, polygons: &[Vec<Vector2>], color: Color) {
        let src = color.to_premul(self.state.global_alpha);
        if src[3] <= 0.0 {
            return;
        }
        let mut rows: Vec<(usize, usize, Vec<f32>)> = Vec::new();
        fill_polygons(
            polygons.iter().map(|p| p.as_slice()),
            self.width as usize,
            self.height as usize,
            |y, x0, cov| rows.push((y, x0, cov.to_vec())),
        );
        for (y, x0, cov) in rows {
            self.blend_row(y, x0, &cov, src);
        }
    }

    fn stroke_outline(&self) -> Vec<Vec<Vector2>> {
        let half = self.state.line_width * self.state.transform.mean_scale() / 2.0;
        let mut out = Vec::new();
        if !(half > 0.0) {
            return out;
        }

        for sub in self.path.subpaths() {
            let pts = &sub.points;
            if pts.len() < 2 {
                continue;
            }
            let mut segments: Vec<(Vector2, Vector2)> = pts.windows(2).map(|w| (w[0], w[1])).collect();
            if sub.closed {
                segments.push((pts[pts.len() - 1], pts[0]));
            }
            for (a, b) in segments {
                let d = b - a;
                let len = d.length();
                if len <= f32::EPSILON {
                    continue;
                }
                let n = Vector2::new(-d.y, d.x) * (half / len);
                out.push(vec![a + n, b + n, b - n, a - n]);
            }
            // Joins: discs wound the same way as the quads above.
            if half >= 1.0 {
                let joints = if sub.closed { &pts[..] } else { &pts[1..pts.len() - 1] };
                for p in joints {
                    out.push(disc(*p, half));
                }
            }
        }
        out
    }
}

fn disc(center: Vector2, radius: f32) -> Vec<Vector2> {
    let steps = ((radius.sqrt() * 4.0).ceil() as usize).clamp(8, 64);
    (0..steps)
        .map(|i| {
            let t = -(i as f32) * TAU / steps as f32;
            let (s, c) = t.sin_cos();
            center + Vector2::new(c * radius, s * radius)
        })
        .collect()
}

/// Source-over with premultiplied source and destination.
fn blend_pixel(dst: &mut [u8], src: [f32; 4]) {
    let inv = 1.0 - src[3];
    for k in 0..4 {
        let d = dst[k] as f32 / 255.0;
        let v = src[k] + d * inv;
        dst[k] = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    }
}

impl PaintSurface for Canvas {
    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(s) = self.stack.pop() {
            self.state = s;
        }
    }

    fn save_depth(&self) -> usize {
        self.stack.len()
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.transform(Affine::translation(x, y));
    }

    fn rotate(&mut self, radians: f32) {
        self.transform(Affine::rotation(radians));
    }

    fn scale(&mut self, x: f32, y: f32) {
        self.transform(Affine::scaling(x, y));
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn close_path(&mut self) {
        self.path.close();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to(self.state.transform, x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to(self.state.transform, x, y);
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.path.rect(self.state.transform, x, y, width, height);
    }

    fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32, anticlockwise: bool) {
        self.path.arc(self.state.transform, Vector2::new(x, y), radius, start, end, anticlockwise);
    }

    fn ellipse(
        &mut self,
        x: f32,
        y: f32,
        radius_x: f32,
        radius_y: f32,
        rotation: f32,
        start: f32,
        end: f32,
        anticlockwise: bool,
    ) {
        self.path.ellipse(
            self.state.transform,
            Vector2::new(x, y),
            radius_x,
            radius_y,
            rotation,
            start,
            end,
            anticlockwise,
        );
    }

    fn fill(&mut self) {
        let polygons: Vec<Vec<Vector2>> = self
            .path
            .subpaths()
            .iter()
            .filter(|s| s.points.len() >= 3)
            .map(|s| s.points.clone())
            .collect();
        self.paint_polygons(&polygons, self.state.fill_style);
    }

    fn stroke(&mut self) {
        let outline = self.stroke_outline();
        self.paint_polygons(&outline, self.state.stroke_style);
    }

    fn set_fill_style(&mut self, color: Color) {
        self.state.fill_style = color;
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.state.stroke_style = color;
    }

    fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width >= 0.0 {
            self.state.line_width = width;
        }
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        if alpha.is_finite() {
            self.state.global_alpha = alpha.clamp(0.0, 1.0);
        }
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let m = self.state.transform;
        let quad = vec![
            m.apply(Vector2::new(x, y)),
            m.apply(Vector2::new(x + width, y)),
            m.apply(Vector2::new(x + width, y + height)),
            m.apply(Vector2::new(x, y + height)),
        ];
        let mut rows: Vec<(usize, usize, Vec<f32>)> = Vec::new();
        fill_polygons(
            std::iter::once(quad.as_slice()),
            self.width as usize,
            self.height as usize,
            |y, x0, cov| rows.push((y, x0, cov.to_vec())),
        );
        for (y, x0, cov) in rows {
            for (i, c) in cov.iter().enumerate() {
                let keep = 1.0 - c.min(1.0);
                let idx = self.index(x0 + i, y);
                for k in 0..4 {
                    self.pixels[idx + k] = (self.pixels[idx + k] as f32 * keep).round() as u8;
                }
            }
        }
    }

    fn size(&self) -> Dimension2 {
        Dimension2::new(self.width as f32, self.height as f32)
    }

    fn draw_image(&mut self, image: &ImageData, x: f32, y: f32, width: f32, height: f32) {
        if image.width() == 0 || image.height() == 0 || width == 0.0 || height == 0.0 {
            return;
        }
        let m = self.state.transform;
        let Some(inv) = m.inverse() else { return };

        let corners = [
            m.apply(Vector2::new(x, y)),
            m.apply(Vector2::new(x + width, y)),
            m.apply(Vector2::new(x + width, y + height)),
            m.apply(Vector2::new(x, y + height)),
        ];
        let Some(bounds) = Rect::from_points(&corners)
            .and_then(|r| r.intersect(Rect::new(0.0, 0.0, self.width as f32, self.height as f32)))
        else {
            return;
        };

        let alpha = self.state.global_alpha;
        let x0 = bounds.origin.x.floor() as u32;
        let y0 = bounds.origin.y.floor() as u32;
        let x1 = (bounds.max().x.ceil() as u32).min(self.width);
        let y1 = (bounds.max().y.ceil() as u32).min(self.height);

        for py in y0..y1 {
            for px in x0..x1 {
                let local = inv.apply(Vector2::new(px as f32 + 0.5, py as f32 + 0.5));
                let u = (local.x - x) / width;
                let v = (local.y - y) / height;
                if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
                    continue;
                }
                let tx = ((u * image.width() as f32) as u32).min(image.width() - 1);
                let ty = ((v * image.height() as f32) as u32).min(image.height() - 1);
                let Some(texel) = image.texel(tx, ty) else { continue };
                let src = Color::from_rgba_u8(texel[0], texel[1], texel[2], texel[3]).to_premul(alpha);
                let idx = self.index(px as usize, py as usize);
                blend_pixel(&mut self.pixels[idx..idx + 4], src);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::PI;

    const RED: Color = Color::rgb(1.0, 0.0, 0.0);

    // ── fill ──────────────────────────────────────────────────────────────

    #[test]
    fn filled_rect_writes_opaque_pixels() {
        let mut c = Canvas::new(8, 8);
        c.set_fill_style(RED);
        c.rect(2.0, 2.0, 4.0, 4.0);
        c.fill();
        assert_eq!(c.pixel(3, 3), Some([255, 0, 0, 255]));
        assert_eq!(c.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(c.pixel(6, 6), Some([0, 0, 0, 0]));
    }

    #[test]
    fn global_alpha_scales_source() {
        let mut c = Canvas::new(4, 4);
        c.set_fill_style(RED);
        c.set_global_alpha(0.5);
        c.rect(0.0, 0.0, 4.0, 4.0);
        c.fill();
        assert_eq!(c.pixel(1, 1), Some([128, 0, 0, 128]));
    }

    #[test]
    fn zero_alpha_paints_nothing() {
        let mut c = Canvas::new(4, 4);
        c.set_global_alpha(0.0);
        c.rect(0.0, 0.0, 4.0, 4.0);
        c.fill();
        assert!(c.pixels().iter().all(|b| *b == 0));
    }

    #[test]
    fn transform_moves_geometry() {
        let mut c = Canvas::new(10, 10);
        c.translate(5.0, 5.0);
        c.scale(2.0, 2.0);
        c.rect(0.0, 0.0, 2.0, 2.0);
        c.fill();
        assert_eq!(c.pixel(4, 4), Some([0, 0, 0, 0]));
        assert_eq!(c.pixel(5, 5), Some([0, 0, 0, 255]));
        assert_eq!(c.pixel(8, 8), Some([0, 0, 0, 255]));
        assert_eq!(c.pixel(9, 9), Some([0, 0, 0, 0]));
    }

    #[test]
    fn circle_covers_center_not_corners() {
        let mut c = Canvas::new(20, 20);
        c.arc(10.0, 10.0, 8.0, 0.0, 2.0 * PI, false);
        c.fill();
        assert_eq!(c.pixel(10, 10).map(|p| p[3]), Some(255));
        assert_eq!(c.pixel(0, 0).map(|p| p[3]), Some(0));
        assert_eq!(c.pixel(19, 19).map(|p| p[3]), Some(0));
    }

    // ── stroke ────────────────────────────────────────────────────────────

    #[test]
    fn stroke_paints_outline_only() {
        let mut c = Canvas::new(20, 20);
        c.set_line_width(2.0);
        c.rect(4.0, 4.0, 12.0, 12.0);
        c.stroke();
        assert_eq!(c.pixel(4, 10).map(|p| p[3]), Some(255));
        assert_eq!(c.pixel(10, 10).map(|p| p[3]), Some(0));
    }

    #[test]
    fn zero_line_width_strokes_nothing() {
        let mut c = Canvas::new(10, 10);
        c.set_line_width(0.0);
        c.rect(2.0, 2.0, 5.0, 5.0);
        c.stroke();
        assert!(c.pixels().iter().all(|b| *b == 0));
    }

    // ── state and misc ────────────────────────────────────────────────────

    #[test]
    fn restore_reverts_transform_and_style() {
        let mut c = Canvas::new(4, 4);
        c.save();
        c.translate(3.0, 3.0);
        c.set_fill_style(RED);
        c.restore();
        c.rect(0.0, 0.0, 1.0, 1.0);
        c.fill();
        assert_eq!(c.pixel(0, 0), Some([0, 0, 0, 255]));
        c.restore();
        assert_eq!(c.save_depth(), 0);
    }

    #[test]
    fn clear_rect_resets_pixels() {
        let mut c = Canvas::new(4, 4);
        c.rect(0.0, 0.0, 4.0, 4.0);
        c.fill();
        c.clear_rect(0.0, 0.0, 2.0, 4.0);
        assert_eq!(c.pixel(1, 1), Some([0, 0, 0, 0]));
        assert_eq!(c.pixel(3, 1), Some([0, 0, 0, 255]));
    }

    #[test]
    fn draw_image_samples_nearest() {
        let mut px = vec![0u8; 2 * 1 * 4];
        px[..4].copy_from_slice(&[255, 0, 0, 255]);
        px[4..].copy_from_slice(&[0, 0, 255, 255]);
        let img = ImageData::new(2, 1, px).unwrap();

        let mut c = Canvas::new(4, 2);
        c.draw_image(&img, 0.0, 0.0, 4.0, 2.0);
        assert_eq!(c.pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(c.pixel(1, 1), Some([255, 0, 0, 255]));
        assert_eq!(c.pixel(2, 0), Some([0, 0, 255, 255]));
        assert_eq!(c.pixel(3, 1), Some([0, 0, 255, 255]));
    }

    #[test]
    fn resize_reallocates() {
        let mut c = Canvas::new(2, 2);
        c.resize(3, 5);
        assert_eq!(c.pixels().len(), 3 * 5 * 4);
        assert_eq!(c.size(), Dimension2::new(3.0, 5.0));
    }
}
