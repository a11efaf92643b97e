use std::time::Instant;

use crate::coords::{Dimension2, Vector2};
use crate::draw::{DrawRequest, Painter};
use crate::input::InputState;
use crate::resource::ResourceManager;
use crate::scene::SceneTree;
use crate::schedule::Scheduler;
use crate::time::FrameTime;

use super::Cursor;

/// Per-frame context handed to the app, behaviours and components.
///
/// Replaces global application state: everything a frame can touch is
/// borrowed here for the duration of one tick.
pub struct FrameCtx<'a> {
    pub tree: &'a mut SceneTree,
    pub input: &'a InputState,
    pub time: FrameTime,
    pub painter: Painter<'a>,
    pub scheduler: &'a mut Scheduler,
    pub resources: &'a mut ResourceManager,
    pub(crate) cursor: Option<Cursor>,
    pub(crate) scene_cursor: Option<Cursor>,
}

impl<'a> FrameCtx<'a> {
    pub fn new(
        tree: &'a mut SceneTree,
        input: &'a InputState,
        time: FrameTime,
        painter: Painter<'a>,
        scheduler: &'a mut Scheduler,
        resources: &'a mut ResourceManager,
    ) -> Self {
        Self {
            tree,
            input,
            time,
            painter,
            scheduler,
            resources,
            cursor: None,
            scene_cursor: None,
        }
    }

    /// Timestamp of this tick.
    #[inline]
    pub fn now(&self) -> Instant {
        self.time.now
    }

    /// Elapsed target frames since the previous tick.
    #[inline]
    pub fn delta_time(&self) -> f32 {
        self.time.delta_time
    }

    /// Surface size in pixels.
    #[inline]
    pub fn size(&self) -> Dimension2 {
        self.painter.size()
    }

    pub fn center(&self) -> Vector2 {
        let size = self.size();
        Vector2::new(size.width / 2.0, size.height / 2.0)
    }

    /// Overrides the cursor for this frame only.
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = Some(cursor);
    }

    pub fn draw<'r>(&mut self, request: impl Into<DrawRequest<'r>>) {
        self.painter.draw(request);
    }
}

#[cfg(test)]
pub(crate) fn run_test_frame<R>(
    tree: &mut SceneTree,
    surface: &mut dyn crate::draw::PaintSurface,
    f: impl FnOnce(&mut FrameCtx<'_>) -> R,
) -> R {
    let input = InputState::default();
    let mut scheduler = Scheduler::new();
    let mut resources = ResourceManager::new();
    let mut ctx = FrameCtx::new(
        tree,
        &input,
        FrameTime::first(Instant::now()),
        Painter::new(surface, None),
        &mut scheduler,
        &mut resources,
    );
    f(&mut ctx)
}
