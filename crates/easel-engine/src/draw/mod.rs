//! Draw pipeline: declarative requests mapped onto stateful surface calls.

mod painter;
mod recording;
mod request;
mod state;
mod surface;

pub use painter::{Camera, Painter};
pub use recording::{PaintOp, RecordingSurface};
pub use request::{DrawOptions, DrawRequest, Geometry, Renderable};
pub use state::DrawState;
pub use surface::{PaintSurface, SaveGuard};
