use core::f32::consts::TAU;

use crate::coords::{Dimension2, Rect, Vector2};
use crate::draw::PaintSurface;

use super::Alignment;

/// Geometry a renderer can emit: a bounding box to align against and the
/// path itself, shifted by the alignment offset.
pub trait ShapeGeometry {
    /// Size of the shape before rotation.
    fn bounding_box(&self) -> Dimension2;

    /// The anchor the shape's natural drawing position corresponds to.
    fn reference_alignment(&self) -> Alignment {
        Alignment::TopLeft
    }

    fn emit_geometry(&self, surface: &mut dyn PaintSurface, offset: Vector2);
}

/// The built-in shapes. Arcs sweep clockwise from angle 0 by `sweep` radians.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect { width: f32, height: f32 },
    Square { size: f32 },
    Circle { radius: f32, sweep: f32 },
    Ellipse { radius_x: f32, radius_y: f32, sweep: f32 },
    Polygon { points: Vec<Vector2> },
}

impl Shape {
    pub fn rect(width: f32, height: f32) -> Self {
        Shape::Rect { width, height }
    }

    pub fn square(size: f32) -> Self {
        Shape::Square { size }
    }

    pub fn circle(radius: f32) -> Self {
        Shape::Circle { radius, sweep: TAU }
    }

    pub fn ellipse(radius_x: f32, radius_y: f32) -> Self {
        Shape::Ellipse { radius_x, radius_y, sweep: TAU }
    }

    /// Only the outline matters: the points are drawn with their bounding
    /// box's top-left at the emit offset, wherever they sit themselves.
    pub fn polygon(points: impl Into<Vec<Vector2>>) -> Self {
        Shape::Polygon { points: points.into() }
    }

    /// Limits an arc shape to `sweep` radians. No effect on other shapes.
    pub fn with_sweep(mut self, radians: f32) -> Self {
        match &mut self {
            Shape::Circle { sweep, .. } | Shape::Ellipse { sweep, .. } => *sweep = radians,
            _ => {}
        }
        self
    }

    /// Appends points to a polygon. No effect on other shapes.
    pub fn add_points(&mut self, more: impl IntoIterator<Item = Vector2>) {
        if let Shape::Polygon { points } = self {
            points.extend(more);
        }
    }
}

impl ShapeGeometry for Shape {
    fn bounding_box(&self) -> Dimension2 {
        match self {
            Shape::Rect { width, height } => Dimension2::new(*width, *height),
            Shape::Square { size } => Dimension2::new(*size, *size),
            Shape::Circle { radius, .. } => Dimension2::new(radius * 2.0, radius * 2.0),
            Shape::Ellipse { radius_x, radius_y, .. } => {
                Dimension2::new(radius_x * 2.0, radius_y * 2.0)
            }
            Shape::Polygon { points } => Rect::from_points(points)
                .map(|r| r.size)
                .unwrap_or_default(),
        }
    }

    fn reference_alignment(&self) -> Alignment {
        match self {
            Shape::Circle { .. } | Shape::Ellipse { .. } => Alignment::Center,
            _ => Alignment::TopLeft,
        }
    }

    fn emit_geometry(&self, surface: &mut dyn PaintSurface, offset: Vector2) {
        match self {
            Shape::Rect { width, height } => surface.rect(offset.x, offset.y, *width, *height),
            Shape::Square { size } => surface.rect(offset.x, offset.y, *size, *size),
            Shape::Circle { radius, sweep } => {
                surface.arc(offset.x, offset.y, *radius, 0.0, *sweep, false)
            }
            Shape::Ellipse { radius_x, radius_y, sweep } => {
                surface.ellipse(offset.x, offset.y, *radius_x, *radius_y, 0.0, 0.0, *sweep, false)
            }
            Shape::Polygon { points } => {
                // Points are placed relative to their bounding box's top-left.
                let Some(bounds) = Rect::from_points(points) else {
                    return;
                };
                let shift = offset - bounds.origin;
                let mut iter = points.iter().map(|p| *p + shift);
                if let Some(first) = iter.next() {
                    surface.move_to(first.x, first.y);
                }
                for p in iter {
                    surface.line_to(p.x, p.y);
                }
                if points.len() > 2 {
                    surface.close_path();
                }
            }
        }
    }
}
