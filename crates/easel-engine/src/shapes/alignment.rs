use crate::coords::{Dimension2, Vector2};

/// One of the nine anchor points of a shape's bounding box.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Alignment {
    pub const ALL: [Alignment; 9] = [
        Alignment::TopLeft,
        Alignment::TopCenter,
        Alignment::TopRight,
        Alignment::CenterLeft,
        Alignment::Center,
        Alignment::CenterRight,
        Alignment::BottomLeft,
        Alignment::BottomCenter,
        Alignment::BottomRight,
    ];

    /// Anchor position as a fraction of the box, `(0, 0)` top-left to `(1, 1)`.
    pub fn factor(self) -> Vector2 {
        let (x, y) = match self {
            Alignment::TopLeft => (0.0, 0.0),
            Alignment::TopCenter => (0.5, 0.0),
            Alignment::TopRight => (1.0, 0.0),
            Alignment::CenterLeft => (0.0, 0.5),
            Alignment::Center => (0.5, 0.5),
            Alignment::CenterRight => (1.0, 0.5),
            Alignment::BottomLeft => (0.0, 1.0),
            Alignment::BottomCenter => (0.5, 1.0),
            Alignment::BottomRight => (1.0, 1.0),
        };
        Vector2::new(x, y)
    }
}

/// Shift applied to geometry drawn around `reference` so that the
/// `alignment` anchor of a `size` box lands on the local origin.
pub fn offset_from_alignment(alignment: Alignment, size: Dimension2, reference: Alignment) -> Vector2 {
    let extent = Vector2::new(size.width, size.height);
    (reference.factor() - alignment.factor()) * extent
}
