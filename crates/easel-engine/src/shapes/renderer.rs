use std::any::Any;

use crate::coords::Vector2;
use crate::core::FrameCtx;
use crate::draw::DrawOptions;
use crate::error::EngineError;
use crate::paint::Color;
use crate::scene::{Component, ObjectId, Transform};

use super::{offset_from_alignment, Alignment, Shape, ShapeGeometry};

/// Component drawing one [`Shape`] at its owner's render position.
///
/// Emits exactly one draw request per update, rotated and scaled by the
/// owner's transform. Styles left unset fall back to the draw defaults; a
/// shape with neither fill nor stroke draws nothing visible.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeRenderer {
    pub shape: Shape,
    pub alignment: Alignment,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub line_width: Option<f32>,
    pub alpha: Option<f32>,
}

impl ShapeRenderer {
    /// Aligned on the shape's natural anchor: top-left for boxes and polygons,
    /// center for arcs.
    pub fn new(shape: Shape) -> Self {
        let alignment = shape.reference_alignment();
        Self {
            shape,
            alignment,
            fill: None,
            stroke: None,
            line_width: None,
            alpha: None,
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn with_stroke(mut self, color: Color) -> Self {
        self.stroke = Some(color);
        self
    }

    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = Some(width);
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Shape-local shift applied to the geometry for the current alignment.
    pub fn anchor_offset(&self) -> Vector2 {
        offset_from_alignment(
            self.alignment,
            self.shape.bounding_box(),
            self.shape.reference_alignment(),
        )
    }

    /// The request this renderer emits for an owner at `origin` with `transform`.
    pub fn draw_options(&self, origin: Vector2, transform: &Transform) -> DrawOptions<'_> {
        let offset = self.anchor_offset();
        let shape = &self.shape;
        let mut options = DrawOptions::new(move |surface| shape.emit_geometry(surface, offset))
            .origin(origin)
            .rotation(transform.rotation)
            .scale(transform.scale);
        options.fill_style = self.fill;
        options.stroke_style = self.stroke;
        options.line_width = self.line_width;
        options.alpha = self.alpha;
        options
    }
}

impl Component for ShapeRenderer {
    fn update(&mut self, owner: ObjectId, ctx: &mut FrameCtx<'_>) -> anyhow::Result<()> {
        let origin = ctx.tree.render_position(owner)?;
        let transform = ctx
            .tree
            .get(owner)
            .map(|o| o.transform)
            .ok_or(EngineError::UnknownObject(owner))?;
        ctx.painter.draw(self.draw_options(origin, &transform));
        Ok(())
    }

    fn name(&self) -> &str {
        "shape renderer"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::run_test_frame;
    use crate::draw::{PaintOp, RecordingSurface};
    use crate::scene::{GameObject, Scene, SceneTree};

    fn rect_ops(ops: &[PaintOp]) -> Vec<(f32, f32, f32, f32)> {
        ops.iter()
            .filter_map(|op| match op {
                PaintOp::Rect { x, y, width, height } => Some((*x, *y, *width, *height)),
                _ => None,
            })
            .collect()
    }

    // ── alignment ─────────────────────────────────────────────────────────

    #[test]
    fn center_aligned_rect_is_shifted_by_half_extent() {
        let t = Transform::default();
        for (alignment, expected) in [
            (Alignment::TopLeft, (0.0, 0.0)),
            (Alignment::Center, (-50.0, -25.0)),
            (Alignment::BottomRight, (-100.0, -50.0)),
        ] {
            let r = ShapeRenderer::new(Shape::rect(100.0, 50.0)).with_alignment(alignment);
            let mut s = RecordingSurface::new(10.0, 10.0);
            crate::draw::Painter::new(&mut s, None).draw(r.draw_options(Vector2::ORIGIN, &t));
            assert_eq!(rect_ops(s.ops()), vec![(expected.0, expected.1, 100.0, 50.0)]);
        }
    }

    #[test]
    fn circles_default_to_center_anchor() {
        let r = ShapeRenderer::new(Shape::circle(10.0));
        assert_eq!(r.alignment, Alignment::Center);
        assert_eq!(r.anchor_offset(), Vector2::ORIGIN);
        let r = r.with_alignment(Alignment::TopLeft);
        assert_eq!(r.anchor_offset(), Vector2::new(10.0, 10.0));
    }

    #[test]
    fn offset_is_not_scaled_twice() {
        let r = ShapeRenderer::new(Shape::square(10.0)).with_alignment(Alignment::Center);
        let t = Transform { scale: Vector2::new(3.0, 3.0), ..Transform::default() };
        let mut s = RecordingSurface::new(10.0, 10.0);
        crate::draw::Painter::new(&mut s, None).draw(r.draw_options(Vector2::ORIGIN, &t));
        assert!(s.ops().contains(&PaintOp::Scale(3.0, 3.0)));
        assert_eq!(rect_ops(s.ops()), vec![(-5.0, -5.0, 10.0, 10.0)]);
    }

    // ── per-frame emission ────────────────────────────────────────────────

    #[test]
    fn emits_one_request_per_update_with_owner_transform() {
        let mut tree = SceneTree::new();
        let scene = tree.add_scene(Scene::new("s"));
        let mut t = Transform::at(40.0, 30.0);
        t.rotation = 0.5;
        let owner = tree.spawn_child(scene, GameObject::new("box").with_transform(t)).unwrap();
        let mut renderer = ShapeRenderer::new(Shape::square(8.0)).with_fill(Color::WHITE).with_alpha(0.0);

        let mut surface = RecordingSurface::new(100.0, 100.0);
        run_test_frame(&mut tree, &mut surface, |ctx| renderer.update(owner, ctx).unwrap());

        let ops = surface.ops();
        assert_eq!(ops.iter().filter(|op| **op == PaintOp::Save).count(), 1);
        assert!(ops.contains(&PaintOp::Translate(40.0, 30.0)));
        assert!(ops.contains(&PaintOp::Rotate(0.5)));
        assert!(ops.contains(&PaintOp::SetGlobalAlpha(0.0)));
        let fills: Vec<_> = surface.fills().collect();
        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].fill_style, Color::WHITE);
        assert_eq!(surface.strokes().count(), 0);
    }

    #[test]
    fn unknown_owner_is_an_error() {
        let mut tree = SceneTree::new();
        let ghost = GameObject::new("ghost").id();
        let mut surface = RecordingSurface::new(10.0, 10.0);
        run_test_frame(&mut tree, &mut surface, |ctx| {
            let mut r = ShapeRenderer::new(Shape::square(1.0));
            assert!(r.update(ghost, ctx).is_err());
        });
        assert!(surface.ops().is_empty());
    }
}
