use crate::paint::Color;
use crate::raster::Affine;

/// Graphics state pushed by `save` and popped by `restore`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawState {
    pub transform: Affine,
    pub fill_style: Color,
    pub stroke_style: Color,
    pub line_width: f32,
    pub global_alpha: f32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            fill_style: Color::BLACK,
            stroke_style: Color::BLACK,
            line_width: 1.0,
            global_alpha: 1.0,
        }
    }
}
