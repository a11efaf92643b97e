use crate::coords::Vector2;
use crate::paint::Color;

use super::surface::PaintSurface;

/// Shape-emitting callback run inside a draw scope.
pub type Geometry<'a> = Box<dyn FnOnce(&mut dyn PaintSurface) + 'a>;

/// Declarative paint request.
///
/// Unset fields fall back to the defaults documented on
/// [`Painter::draw`](super::Painter::draw). Explicit zeros are honoured.
pub struct DrawOptions<'a> {
    pub origin: Option<Vector2>,
    pub stroke_style: Option<Color>,
    pub fill_style: Option<Color>,
    pub line_width: Option<f32>,
    pub alpha: Option<f32>,
    pub rotation: Option<f32>,
    pub scale: Option<Vector2>,
    pub geometry: Geometry<'a>,
}

impl<'a> DrawOptions<'a> {
    pub fn new(geometry: impl FnOnce(&mut dyn PaintSurface) + 'a) -> Self {
        Self {
            origin: None,
            stroke_style: None,
            fill_style: None,
            line_width: None,
            alpha: None,
            rotation: None,
            scale: None,
            geometry: Box::new(geometry),
        }
    }

    /// A request that emits no geometry.
    pub fn empty() -> Self {
        Self::new(|_| {})
    }

    pub fn origin(mut self, origin: Vector2) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn stroke(mut self, color: Color) -> Self {
        self.stroke_style = Some(color);
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill_style = Some(color);
        self
    }

    pub fn line_width(mut self, width: f32) -> Self {
        self.line_width = Some(width);
        self
    }

    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn rotation(mut self, radians: f32) -> Self {
        self.rotation = Some(radians);
        self
    }

    pub fn scale(mut self, scale: Vector2) -> Self {
        self.scale = Some(scale);
        self
    }
}

impl std::fmt::Debug for DrawOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawOptions")
            .field("origin", &self.origin)
            .field("stroke_style", &self.stroke_style)
            .field("fill_style", &self.fill_style)
            .field("line_width", &self.line_width)
            .field("alpha", &self.alpha)
            .field("rotation", &self.rotation)
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}

/// Something that knows how to describe its own draw.
pub trait Renderable {
    fn value(&mut self) -> DrawOptions<'_>;
}

/// The two accepted inputs of [`Painter::draw`](super::Painter::draw).
pub enum DrawRequest<'a> {
    Options(DrawOptions<'a>),
    Renderable(&'a mut dyn Renderable),
}

impl<'a> From<DrawOptions<'a>> for DrawRequest<'a> {
    fn from(options: DrawOptions<'a>) -> Self {
        DrawRequest::Options(options)
    }
}

impl<'a, R: Renderable> From<&'a mut R> for DrawRequest<'a> {
    fn from(r: &'a mut R) -> Self {
        DrawRequest::Renderable(r)
    }
}
