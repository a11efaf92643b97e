use std::any::Any;

use crate::core::FrameCtx;

use super::{ComponentId, ObjectId};

/// A unit of per-frame logic owned by exactly one object.
///
/// `update` runs after the owner's transform integrated for the frame.
/// Implementors return `self` from `as_any`/`as_any_mut` so typed lookups
/// through [`SceneTree::component`](super::SceneTree::component) work.
pub trait Component: Any {
    fn update(&mut self, owner: ObjectId, ctx: &mut FrameCtx<'_>) -> anyhow::Result<()>;

    fn name(&self) -> &str {
        "component"
    }

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A component as stored on its owner: identity, enable flag and the boxed logic.
pub struct ComponentSlot {
    id: ComponentId,
    pub enabled: bool,
    pub(crate) inner: Box<dyn Component>,
}

impl ComponentSlot {
    pub(crate) fn new(inner: Box<dyn Component>) -> Self {
        Self {
            id: ComponentId::next(),
            enabled: true,
            inner,
        }
    }

    #[inline]
    pub fn id(&self) -> ComponentId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.inner.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.inner.as_any_mut().downcast_mut::<T>()
    }
}

impl std::fmt::Debug for ComponentSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentSlot")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("enabled", &self.enabled)
            .finish()
    }
}
