use crate::core::Cursor;

use super::{Behavior, ComponentSlot, ObjectId, Transform};

/// What role an object plays in the tree.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ObjectKind {
    Object,
    /// A root container. Never has a parent.
    Scene { cursor: Option<Cursor> },
}

/// A node of the scene tree.
///
/// Built detached, then handed to [`SceneTree::spawn`](super::SceneTree::spawn).
/// Parent and child links are maintained by the tree only.
pub struct GameObject {
    id: ObjectId,
    pub name: String,
    pub enabled: bool,
    pub transform: Transform,
    kind: ObjectKind,
    pub(crate) parent: Option<ObjectId>,
    pub(crate) children: Vec<ObjectId>,
    pub(crate) components: Vec<ComponentSlot>,
    pub(crate) behavior: Option<Box<dyn Behavior>>,
    pub(crate) setup_done: bool,
}

impl GameObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::next(),
            name: name.into(),
            enabled: true,
            transform: Transform::default(),
            kind: ObjectKind::Object,
            parent: None,
            children: Vec::new(),
            components: Vec::new(),
            behavior: None,
            setup_done: false,
        }
    }

    pub fn with_behavior(mut self, behavior: impl Behavior) -> Self {
        self.behavior = Some(Box::new(behavior));
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.transform.position = crate::coords::Vector2::new(x, y);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    #[inline]
    pub fn is_scene(&self) -> bool {
        matches!(self.kind, ObjectKind::Scene { .. })
    }

    /// Cursor hint of a scene; `None` for plain objects.
    pub fn cursor(&self) -> Option<Cursor> {
        match self.kind {
            ObjectKind::Scene { cursor } => cursor,
            ObjectKind::Object => None,
        }
    }

    pub fn set_cursor(&mut self, cursor: Option<Cursor>) {
        if let ObjectKind::Scene { cursor: slot } = &mut self.kind {
            *slot = cursor;
        }
    }

    #[inline]
    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[ObjectId] {
        &self.children
    }

    #[inline]
    pub fn components(&self) -> &[ComponentSlot] {
        &self.components
    }

    #[inline]
    pub fn components_mut(&mut self) -> &mut [ComponentSlot] {
        &mut self.components
    }

    #[inline]
    pub fn has_behavior(&self) -> bool {
        self.behavior.is_some()
    }
}

impl std::fmt::Debug for GameObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameObject")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("enabled", &self.enabled)
            .field("kind", &self.kind)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("components", &self.components)
            .finish_non_exhaustive()
    }
}

/// Builder for a scene root, registered with
/// [`SceneTree::add_scene`](super::SceneTree::add_scene).
pub struct Scene {
    object: GameObject,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        let mut object = GameObject::new(name);
        object.kind = ObjectKind::Scene { cursor: None };
        Self { object }
    }

    pub fn with_behavior(mut self, behavior: impl Behavior) -> Self {
        self.object.behavior = Some(Box::new(behavior));
        self
    }

    pub fn with_cursor(mut self, cursor: Cursor) -> Self {
        self.object.set_cursor(Some(cursor));
        self
    }

    pub fn disabled(mut self) -> Self {
        self.object.enabled = false;
        self
    }

    #[inline]
    pub fn id(&self) -> ObjectId {
        self.object.id
    }

    pub(crate) fn into_object(self) -> GameObject {
        self.object
    }
}
