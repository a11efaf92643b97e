use crate::coords::Dimension2;
use crate::paint::{Color, ImageData};
use crate::raster::Affine;

use super::state::DrawState;
use super::surface::PaintSurface;

/// One recorded surface call.
///
/// `Fill` and `Stroke` carry the state that was live when they ran, which is
/// what a pixel-producing surface would have used.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    Save,
    Restore,
    Translate(f32, f32),
    Rotate(f32),
    Scale(f32, f32),
    BeginPath,
    ClosePath,
    MoveTo(f32, f32),
    LineTo(f32, f32),
    Rect { x: f32, y: f32, width: f32, height: f32 },
    Arc { x: f32, y: f32, radius: f32, start: f32, end: f32, anticlockwise: bool },
    Ellipse {
        x: f32,
        y: f32,
        radius_x: f32,
        radius_y: f32,
        rotation: f32,
        start: f32,
        end: f32,
        anticlockwise: bool,
    },
    Fill(DrawState),
    Stroke(DrawState),
    SetFillStyle(Color),
    SetStrokeStyle(Color),
    SetLineWidth(f32),
    SetGlobalAlpha(f32),
    ClearRect { x: f32, y: f32, width: f32, height: f32 },
    DrawImage { x: f32, y: f32, width: f32, height: f32, state: DrawState },
}

/// In-memory surface that records every call and tracks the live state.
///
/// Used to check the draw contract without producing pixels.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<PaintOp>,
    state: DrawState,
    stack: Vec<DrawState>,
    size: Dimension2,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { size: Dimension2::new(width, height), ..Self::default() }
    }

    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<PaintOp> {
        std::mem::take(&mut self.ops)
    }

    /// Live state (what the next fill would use).
    pub fn state(&self) -> &DrawState {
        &self.state
    }

    /// States captured by every `fill`, in order.
    pub fn fills(&self) -> impl Iterator<Item = &DrawState> {
        self.ops.iter().filter_map(|op| match op {
            PaintOp::Fill(s) => Some(s),
            _ => None,
        })
    }

    /// States captured by every `stroke`, in order.
    pub fn strokes(&self) -> impl Iterator<Item = &DrawState> {
        self.ops.iter().filter_map(|op| match op {
            PaintOp::Stroke(s) => Some(s),
            _ => None,
        })
    }

    fn transform(&mut self, m: Affine) {
        self.state.transform = self.state.transform * m;
    }
}

impl PaintSurface for RecordingSurface {
    fn save(&mut self) {
        self.stack.push(self.state);
        self.ops.push(PaintOp::Save);
    }

    fn restore(&mut self) {
        if let Some(s) = self.stack.pop() {
            self.state = s;
        }
        self.ops.push(PaintOp::Restore);
    }

    fn save_depth(&self) -> usize {
        self.stack.len()
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.transform(Affine::translation(x, y));
        self.ops.push(PaintOp::Translate(x, y));
    }

    fn rotate(&mut self, radians: f32) {
        self.transform(Affine::rotation(radians));
        self.ops.push(PaintOp::Rotate(radians));
    }

    fn scale(&mut self, x: f32, y: f32) {
        self.transform(Affine::scaling(x, y));
        self.ops.push(PaintOp::Scale(x, y));
    }

    fn begin_path(&mut self) {
        self.ops.push(PaintOp::BeginPath);
    }

    fn close_path(&mut self) {
        self.ops.push(PaintOp::ClosePath);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.ops.push(PaintOp::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.ops.push(PaintOp::LineTo(x, y));
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(PaintOp::Rect { x, y, width, height });
    }

    fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32, anticlockwise: bool) {
        self.ops.push(PaintOp::Arc { x, y, radius, start, end, anticlockwise });
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
        self.ops.push(PaintOp::Ellipse { x, y, radius_x, radius_y, rotation, start, end, anticlockwise });
    }

    fn fill(&mut self) {
        self.ops.push(PaintOp::Fill(self.state));
    }

    fn stroke(&mut self) {
        self.ops.push(PaintOp::Stroke(self.state));
    }

    fn set_fill_style(&mut self, color: Color) {
        self.state.fill_style = color;
        self.ops.push(PaintOp::SetFillStyle(color));
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.state.stroke_style = color;
        self.ops.push(PaintOp::SetStrokeStyle(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.state.line_width = width;
        self.ops.push(PaintOp::SetLineWidth(width));
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.state.global_alpha = alpha;
        self.ops.push(PaintOp::SetGlobalAlpha(alpha));
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(PaintOp::ClearRect { x, y, width, height });
    }

    fn size(&self) -> Dimension2 {
        self.size
    }

    fn draw_image(&mut self, _image: &ImageData, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(PaintOp::DrawImage { x, y, width, height, state: self.state });
    }
}
