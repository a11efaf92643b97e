use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the program driving the engine.
pub trait App {
    /// Called once, inside the first tick, before `on_frame`. Typically
    /// registers scenes and resources. An error aborts the run.
    fn setup(&mut self, ctx: &mut FrameCtx<'_>) -> anyhow::Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Called once per tick, after input sampling and before the tree is
    /// traversed.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;
}
