use crate::coords::{Dimension2, Vector2};
use crate::paint::Color;

use super::request::{DrawOptions, DrawRequest};
use super::surface::{PaintSurface, SaveGuard};

/// Projection applied to draw origins: `(origin + offset) * zoom`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub offset: Vector2,
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self { offset: Vector2::ORIGIN, zoom: 1.0 }
    }
}

impl Camera {
    #[inline]
    pub fn project(&self, origin: Vector2) -> Vector2 {
        (origin + self.offset) * self.zoom
    }
}

/// Draw-request front end over a [`PaintSurface`].
///
/// Every request runs inside its own save/restore scope, so nothing a request
/// does to the surface state is visible to the next one.
pub struct Painter<'s> {
    surface: &'s mut dyn PaintSurface,
    camera: Option<Camera>,
}

impl<'s> Painter<'s> {
    pub fn new(surface: &'s mut dyn PaintSurface, camera: Option<Camera>) -> Self {
        Self { surface, camera }
    }

    pub fn camera(&self) -> Option<Camera> {
        self.camera
    }

    pub fn set_camera(&mut self, camera: Option<Camera>) {
        self.camera = camera;
    }

    pub fn size(&self) -> Dimension2 {
        self.surface.size()
    }

    /// Direct access for callers that manage their own state.
    pub fn surface(&mut self) -> &mut dyn PaintSurface {
        &mut *self.surface
    }

    /// Runs one draw request.
    ///
    /// For options: save, begin path, translate to the projected origin,
    /// apply styles (black stroke and fill, alpha 1, line width 1 unless
    /// given), rotate when non-zero, scale, run the geometry callback, stroke
    /// if a stroke style was given, fill if a fill style was given, close the
    /// path and restore. A [`Renderable`](super::Renderable) supplies its own
    /// options.
    pub fn draw<'r>(&mut self, request: impl Into<DrawRequest<'r>>) {
        match request.into() {
            DrawRequest::Options(options) => self.draw_options(options),
            DrawRequest::Renderable(r) => {
                let options = r.value();
                self.draw_options(options);
            }
        }
    }

    fn draw_options(&mut self, o: DrawOptions<'_>) {
        let origin = o.origin.map(|p| match self.camera {
            Some(camera) => camera.project(p),
            None => p,
        });

        let mut s = SaveGuard::new(&mut *self.surface);
        s.begin_path();

        if let Some(p) = origin {
            s.translate(p.x, p.y);
        }

        s.set_stroke_style(o.stroke_style.unwrap_or(Color::BLACK));
        s.set_fill_style(o.fill_style.unwrap_or(Color::BLACK));
        s.set_global_alpha(o.alpha.unwrap_or(1.0));
        s.set_line_width(o.line_width.unwrap_or(1.0));

        if let Some(r) = o.rotation.filter(|r| *r != 0.0) {
            s.rotate(r);
        }
        if let Some(k) = o.scale {
            s.scale(k.x, k.y);
        }

        (o.geometry)(&mut *s);

        if o.stroke_style.is_some() {
            s.stroke();
        }
        if o.fill_style.is_some() {
            s.fill();
        }

        s.close_path();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{PaintOp, RecordingSurface, Renderable};
    use crate::raster::Affine;

    fn red() -> Color {
        Color::rgb(1.0, 0.0, 0.0)
    }

    // ── defaults and zeros ────────────────────────────────────────────────

    #[test]
    fn explicit_zero_alpha_is_not_defaulted() {
        let mut rec = RecordingSurface::new(100.0, 100.0);
        Painter::new(&mut rec, None).draw(
            DrawOptions::new(|s| s.rect(0.0, 0.0, 10.0, 10.0)).fill(red()).alpha(0.0),
        );
        let fill = rec.fills().next().unwrap();
        assert_eq!(fill.global_alpha, 0.0);
    }

    #[test]
    fn explicit_zero_line_width_is_not_defaulted() {
        let mut rec = RecordingSurface::new(100.0, 100.0);
        Painter::new(&mut rec, None).draw(
            DrawOptions::new(|s| s.rect(0.0, 0.0, 10.0, 10.0)).stroke(red()).line_width(0.0),
        );
        assert_eq!(rec.strokes().next().unwrap().line_width, 0.0);
    }

    #[test]
    fn unset_styles_use_documented_defaults_and_skip_paint() {
        let mut rec = RecordingSurface::new(100.0, 100.0);
        Painter::new(&mut rec, None).draw(DrawOptions::new(|s| s.rect(0.0, 0.0, 1.0, 1.0)));
        assert!(rec.ops().contains(&PaintOp::SetFillStyle(Color::BLACK)));
        assert!(rec.ops().contains(&PaintOp::SetGlobalAlpha(1.0)));
        assert!(rec.ops().contains(&PaintOp::SetLineWidth(1.0)));
        assert_eq!(rec.fills().count(), 0);
        assert_eq!(rec.strokes().count(), 0);
    }

    // ── scoping ───────────────────────────────────────────────────────────

    #[test]
    fn callback_mutations_do_not_leak_into_next_request() {
        let mut rec = RecordingSurface::new(100.0, 100.0);
        let mut painter = Painter::new(&mut rec, None);

        painter.draw(
            DrawOptions::new(|s| {
                s.set_fill_style(Color::WHITE);
                s.set_global_alpha(0.2);
                s.set_line_width(9.0);
                s.translate(50.0, 50.0);
                s.save(); // unbalanced on purpose
                s.rect(0.0, 0.0, 1.0, 1.0);
            })
            .fill(red()),
        );
        painter.draw(DrawOptions::new(|s| s.rect(0.0, 0.0, 1.0, 1.0)).stroke(red()));

        let second = *rec.strokes().next().unwrap();
        assert_eq!(second.fill_style, Color::BLACK);
        assert_eq!(second.global_alpha, 1.0);
        assert_eq!(second.line_width, 1.0);
        assert_eq!(second.transform, Affine::IDENTITY);
    }

    #[test]
    fn save_and_restore_are_balanced() {
        let mut rec = RecordingSurface::new(100.0, 100.0);
        let mut painter = Painter::new(&mut rec, None);
        for i in 0..5 {
            painter.draw(DrawOptions::empty().origin(Vector2::new(i as f32, 0.0)).fill(red()));
        }
        assert_eq!(rec.save_depth(), 0);
        let saves = rec.ops().iter().filter(|op| **op == PaintOp::Save).count();
        let restores = rec.ops().iter().filter(|op| **op == PaintOp::Restore).count();
        assert_eq!((saves, restores), (5, 5));
    }

    #[test]
    fn guard_unwinds_saves_left_open() {
        let mut rec = RecordingSurface::new(10.0, 10.0);
        {
            let mut g = SaveGuard::new(&mut rec);
            g.save();
            g.save();
            g.set_global_alpha(0.1);
        }
        assert_eq!(rec.save_depth(), 0);
        assert_eq!(rec.state().global_alpha, 1.0);
    }

    #[test]
    fn state_is_restored_when_the_callback_panics() {
        let mut rec = RecordingSurface::new(100.0, 100.0);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            Painter::new(&mut rec, None).draw(
                DrawOptions::new(|s| {
                    s.translate(10.0, 10.0);
                    panic!("geometry failed");
                })
                .alpha(0.5),
            );
        }));
        assert!(result.is_err());
        assert_eq!(rec.save_depth(), 0);
        assert_eq!(rec.state().global_alpha, 1.0);
        assert_eq!(rec.state().transform, Affine::IDENTITY);
    }

    // ── transform order ───────────────────────────────────────────────────

    #[test]
    fn origin_rotation_scale_apply_in_order() {
        let mut rec = RecordingSurface::new(100.0, 100.0);
        Painter::new(&mut rec, None).draw(
            DrawOptions::new(|_| {})
                .origin(Vector2::new(5.0, 6.0))
                .rotation(0.5)
                .scale(Vector2::new(2.0, 3.0))
                .fill(red()),
        );
        let transforms: Vec<&PaintOp> = rec
            .ops()
            .iter()
            .filter(|op| matches!(op, PaintOp::Translate(..) | PaintOp::Rotate(_) | PaintOp::Scale(..)))
            .collect();
        assert_eq!(
            transforms,
            [&PaintOp::Translate(5.0, 6.0), &PaintOp::Rotate(0.5), &PaintOp::Scale(2.0, 3.0)]
        );
    }

    #[test]
    fn zero_rotation_is_skipped() {
        let mut rec = RecordingSurface::new(100.0, 100.0);
        Painter::new(&mut rec, None).draw(DrawOptions::empty().rotation(0.0));
        assert!(!rec.ops().iter().any(|op| matches!(op, PaintOp::Rotate(_))));
    }

    #[test]
    fn camera_projects_origin() {
        let mut rec = RecordingSurface::new(100.0, 100.0);
        let camera = Camera { offset: Vector2::new(10.0, 0.0), zoom: 2.0 };
        Painter::new(&mut rec, Some(camera)).draw(DrawOptions::empty().origin(Vector2::new(1.0, 4.0)));
        assert!(rec.ops().contains(&PaintOp::Translate(22.0, 8.0)));
    }

    #[test]
    fn stroke_precedes_fill() {
        let mut rec = RecordingSurface::new(100.0, 100.0);
        Painter::new(&mut rec, None).draw(DrawOptions::empty().fill(red()).stroke(red()));
        let stroke = rec.ops().iter().position(|op| matches!(op, PaintOp::Stroke(_))).unwrap();
        let fill = rec.ops().iter().position(|op| matches!(op, PaintOp::Fill(_))).unwrap();
        assert!(stroke < fill);
    }

    // ── renderable dispatch ───────────────────────────────────────────────

    struct Marker {
        calls: u32,
    }

    impl Renderable for Marker {
        fn value(&mut self) -> DrawOptions<'_> {
            self.calls += 1;
            DrawOptions::new(|s| s.rect(1.0, 2.0, 3.0, 4.0)).fill(Color::WHITE)
        }
    }

    #[test]
    fn renderable_supplies_its_own_options() {
        let mut rec = RecordingSurface::new(100.0, 100.0);
        let mut marker = Marker { calls: 0 };
        Painter::new(&mut rec, None).draw(&mut marker);
        assert_eq!(marker.calls, 1);
        assert!(rec.ops().contains(&PaintOp::Rect { x: 1.0, y: 2.0, width: 3.0, height: 4.0 }));
        assert_eq!(rec.fills().next().unwrap().fill_style, Color::WHITE);
    }
}
