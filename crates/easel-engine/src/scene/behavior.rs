use crate::core::FrameCtx;

use super::{ObjectId, SceneTree};

/// User logic attached to one object.
///
/// Every hook receives the id of the object it belongs to. While a hook runs
/// the behaviour is detached from its object, so the hook is free to mutate the
/// object (and the rest of the tree) through the context. Errors are logged by
/// the engine and do not stop the frame.
pub trait Behavior: 'static {
    /// Runs once, the first time the object is attached to a parent or
    /// registered as a scene.
    fn setup(&mut self, _this: ObjectId, _tree: &mut SceneTree) -> anyhow::Result<()> {
        Ok(())
    }

    /// Per-frame logic, before the object's transform integrates.
    fn update(&mut self, _this: ObjectId, _ctx: &mut FrameCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Per-frame drawing, after `update`.
    fn render(&mut self, _this: ObjectId, _ctx: &mut FrameCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Receives messages sent with [`SceneTree::broadcast`].
    fn on_message(
        &mut self,
        _this: ObjectId,
        _tree: &mut SceneTree,
        _message: &str,
    ) -> anyhow::Result<()> {
        Ok(())
    }
}
