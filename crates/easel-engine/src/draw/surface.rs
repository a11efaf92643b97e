use core::ops::{Deref, DerefMut};

use crate::coords::Dimension2;
use crate::paint::{Color, ImageData};

/// Stateful 2D paint target.
///
/// State (transform and styles) is pushed by `save` and popped by `restore`.
/// Shape primitives append to the current path; `fill`/`stroke` paint it with
/// the current styles without clearing it. `begin_path` starts a new one.
/// Angles are radians; `arc`/`ellipse` sweep clockwise in screen space unless
/// `anticlockwise` is set.
pub trait PaintSurface {
    fn save(&mut self);
    /// Pops the last saved state. Without a matching `save` this is a no-op.
    fn restore(&mut self);
    /// Number of states currently saved.
    fn save_depth(&self) -> usize;

    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, radians: f32);
    fn scale(&mut self, x: f32, y: f32);

    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32, anticlockwise: bool);
    #[allow(clippy::too_many_arguments)]
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
    );

    fn fill(&mut self);
    fn stroke(&mut self);

    fn set_fill_style(&mut self, color: Color);
    fn set_stroke_style(&mut self, color: Color);
    fn set_line_width(&mut self, width: f32);
    fn set_global_alpha(&mut self, alpha: f32);

    /// Resets the pixels under the (transformed) rectangle to transparent.
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Drawable size in pixels.
    fn size(&self) -> Dimension2;

    /// Paints `image` into the destination rectangle under the current transform.
    fn draw_image(&mut self, image: &ImageData, x: f32, y: f32, width: f32, height: f32);
}

/// Scoped `save`/`restore` pair.
///
/// Restores on drop, including during unwinding, so a panicking draw callback
/// cannot leak state into the next draw. Saves left open inside the scope are
/// unwound too.
pub struct SaveGuard<'a, S: PaintSurface + ?Sized> {
    surface: &'a mut S,
    depth: usize,
}

impl<'a, S: PaintSurface + ?Sized> SaveGuard<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        let depth = surface.save_depth();
        surface.save();
        Self { surface, depth }
    }
}

impl<S: PaintSurface + ?Sized> Deref for SaveGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: PaintSurface + ?Sized> DerefMut for SaveGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: PaintSurface + ?Sized> Drop for SaveGuard<'_, S> {
    fn drop(&mut self) {
        while self.surface.save_depth() > self.depth {
            self.surface.restore();
        }
    }
}
