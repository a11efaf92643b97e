/// Width/height pair, used for shape bounding boxes and surface sizes.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Dimension2 {
    pub width: f32,
    pub height: f32,
}

impl Dimension2 {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }
}
