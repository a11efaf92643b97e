/// Pointer shape requested for the window.
///
/// Platform-agnostic; the window runtime maps it onto the platform cursor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
    Text,
    Crosshair,
    Move,
    Grab,
    Grabbing,
    NotAllowed,
    Wait,
    Help,
}
